use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use rayon::prelude::*;

use kathalu::classify::{Classifier, Label};
use kathalu::report::{self, PageRecord, Summary};
use kathalu::{from_path, index};

#[derive(Parser)]
#[command(name = "kathalu", about = "Telugu story archive classifier and index builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every archived page and write a CSV analysis report
    Analyze {
        /// Archive root containing <year>/*.html directories
        #[arg(short, long, default_value = "stories")]
        root: PathBuf,
        /// Report path (default: timestamped story_analysis_*.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Walk, classify, and regenerate stories-data.json in one pass
    Index {
        /// Archive root containing <year>/*.html directories
        #[arg(short, long, default_value = "stories")]
        root: PathBuf,
        /// Index path
        #[arg(short, long, default_value = "stories-data.json")]
        output: PathBuf,
    },
    /// Regenerate stories-data.json from an existing (possibly hand-edited) CSV report
    Rebuild {
        /// Analysis CSV to read classifications from
        #[arg(short, long)]
        csv: PathBuf,
        /// Index path
        #[arg(short, long, default_value = "stories-data.json")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { root, output } => {
            let records = analyze_archive(&root)?;
            let output = output.unwrap_or_else(|| PathBuf::from(report::default_csv_name()));
            report::write_csv(&output, &records)
                .with_context(|| format!("writing {}", output.display()))?;

            let summary = Summary::from_records(&records);
            println!("{}", summary);
            println!("Detailed analysis saved to: {}", output.display());
            Ok(())
        }
        Commands::Index { root, output } => {
            let records = analyze_archive(&root)?;
            let summary = Summary::from_records(&records);

            let mut entries = Vec::new();
            for record in &records {
                if record.outcome.label() != Some(Label::Story) {
                    continue;
                }
                let path = Path::new(&record.path);
                let page = from_path(path)
                    .with_context(|| format!("re-reading {}", record.path))?;
                entries.push(index::entry_from_page(path, &page, Some(record.year))?);
            }
            index::sort_entries(&mut entries);
            index::write_json(&output, &entries)
                .with_context(|| format!("writing {}", output.display()))?;

            println!("{}", summary);
            println!("Wrote {} stories to {}", entries.len(), output.display());
            Ok(())
        }
        Commands::Rebuild { csv, output } => {
            let rows = report::read_csv(&csv)
                .with_context(|| format!("reading {}", csv.display()))?;
            let total = rows.len();

            let mut entries = Vec::new();
            let mut missing = 0usize;
            for row in rows {
                if row.label() != Some(Label::Story) {
                    continue;
                }
                let path = Path::new(&row.filepath);
                if !path.exists() {
                    tracing::warn!("file not found: {}", row.filepath);
                    missing += 1;
                    continue;
                }
                let page = from_path(path)
                    .with_context(|| format!("reading {}", row.filepath))?;
                entries.push(index::entry_from_page(path, &page, Some(row.year))?);
            }
            index::sort_entries(&mut entries);
            index::write_json(&output, &entries)
                .with_context(|| format!("writing {}", output.display()))?;

            println!(
                "Rebuilt {} from {} CSV rows: {} stories kept, {} excluded{}",
                output.display(),
                total,
                entries.len(),
                total - entries.len(),
                if missing > 0 {
                    format!(" ({} files missing)", missing)
                } else {
                    String::new()
                }
            );
            Ok(())
        }
    };

    tracing::debug!("finished in {:.2?}", t0.elapsed());
    result
}

/// Walk the archive and classify every page in parallel.
fn analyze_archive(root: &Path) -> anyhow::Result<Vec<PageRecord>> {
    anyhow::ensure!(root.is_dir(), "archive root {} is not a directory", root.display());

    let pages = report::find_archive_pages(root);
    anyhow::ensure!(
        !pages.is_empty(),
        "no <year>/*.html pages found under {}",
        root.display()
    );
    println!("Analyzing {} pages...", pages.len());

    let bar = ProgressBar::new(pages.len() as u64);

    let classifier = Classifier::new();
    let mut records: Vec<PageRecord> = pages
        .par_iter()
        .map(|(path, year)| {
            let record = report::analyze_page(&classifier, path, *year);
            bar.inc(1);
            record
        })
        .collect();
    bar.finish_and_clear();

    records.sort_by(|a, b| (a.year, &a.filename).cmp(&(b.year, &b.filename)));
    Ok(records)
}
