//! Built-in indicator tables for story/document classification.
//!
//! Document indicators are matched against lower-cased text and title.
//! Story indicators are Telugu terms matched against original-case text,
//! since the Telugu script has no case folding.

/// Terms whose presence in text or title suggests a document rather than a
/// story (bills, forms, legal papers, logs, greetings, technical notes).
pub const DOCUMENT_INDICATORS: &[&str] = &[
    // Bills and invoices
    "invoice",
    "bill",
    "payment",
    "amount",
    "tax",
    "gst",
    "total",
    "due date",
    "account number",
    "customer id",
    "billing",
    "charges",
    "subscription",
    "fibernet",
    "broadband",
    "internet",
    "plan",
    "rental",
    // Official documents
    "application",
    "form",
    "registration",
    "certificate",
    "license",
    "government",
    "office",
    "department",
    "ministry",
    "authority",
    "proforma",
    "annexure",
    "schedule",
    "rules",
    "regulation",
    // Legal and property documents
    "agreement",
    "contract",
    "deed",
    "lease",
    "rent",
    "property",
    "house tax",
    "municipal",
    "survey number",
    "plot",
    // Personal documents
    "passport",
    "aadhaar",
    "pan card",
    "voter id",
    "driving license",
    "bank statement",
    "cheque",
    "transaction",
    // Logs and records
    "log",
    "record",
    "entry",
    "date:",
    "time:",
    "status:",
    "whatsapp chat",
    "conversation",
    "message",
    // Greetings and announcements
    "greeting",
    "congratulations",
    "birthday",
    "anniversary",
    "wishes",
    "celebration",
    "invitation",
    // Technical and administrative
    "config",
    "setup",
    "installation",
    "manual",
    "guide",
    "specification",
    "requirement",
    "procedure",
];

/// Filename substrings that suggest a document. Matched against the
/// lower-cased filename and weighted double.
pub const DOC_FILENAME_PATTERNS: &[&str] = &[
    "application",
    "form",
    "proforma",
    "bill",
    "invoice",
    "agreement",
    "log",
    "chat",
    "greeting",
    "fibernet",
    "tax",
    "eci",
    "minutes",
];

/// Telugu terms whose presence suggests narrative story content.
pub const STORY_INDICATORS: &[&str] = &[
    // Narrative elements
    "కథ",
    "కధ",
    "అనుభవం",
    "జరిగిన",
    "జరిగింది",
    "చెప్పాలని",
    "గుర్తుకు వచ్చింది",
    "జ్ఞాపకం",
    "జరిగిన విషయం",
    // Story beginnings
    "ఒకసారి",
    "ఒకప్పుడు",
    "అనగనగా",
    "ఒక రోజు",
    "ముందు రోజు",
    "గత వారం",
    "చిన్న వయసులో",
    // Dialogue indicators
    "అన్నాడు",
    "అంది",
    "చెప్పాడు",
    "చెప్పింది",
    "అడిగాడు",
    "అడిగింది",
    // Emotional and reflective content
    "అనిపించింది",
    "భావించాను",
    "అర్థమైంది",
    "తెలిసింది",
    "ఆలోచించాను",
    // Repeated entry: this term scores twice and contributes two reasons
    "గుర్తుకు వచ్చింది",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_indicators_are_lowercase() {
        for term in DOCUMENT_INDICATORS {
            assert_eq!(*term, term.to_lowercase(), "indicator {:?}", term);
        }
        for term in DOC_FILENAME_PATTERNS {
            assert_eq!(*term, term.to_lowercase(), "pattern {:?}", term);
        }
    }

    #[test]
    fn test_no_empty_indicators() {
        for term in DOCUMENT_INDICATORS
            .iter()
            .chain(DOC_FILENAME_PATTERNS)
            .chain(STORY_INDICATORS)
        {
            assert!(!term.is_empty());
        }
    }
}
