//! Detection of characters that silently push a message into Unicode encoding
//!
//! Text pasted from word processors, email clients and phones often carries
//! typographic punctuation or invisible characters. The report is advisory;
//! callers decide whether to sanitize.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A class of Unicode hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnicodeIssue {
    SmartQuotes,
    Dashes,
    NonBreakingSpace,
    ZeroWidth,
    Emoji,
    Bengali,
    Hindi,
    Arabic,
    Chinese,
}

impl UnicodeIssue {
    /// All issue classes, in reporting order
    pub const ALL: [UnicodeIssue; 9] = [
        UnicodeIssue::SmartQuotes,
        UnicodeIssue::Dashes,
        UnicodeIssue::NonBreakingSpace,
        UnicodeIssue::ZeroWidth,
        UnicodeIssue::Emoji,
        UnicodeIssue::Bengali,
        UnicodeIssue::Hindi,
        UnicodeIssue::Arabic,
        UnicodeIssue::Chinese,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UnicodeIssue::SmartQuotes => "Smart quotes detected",
            UnicodeIssue::Dashes => "Em/en dashes detected",
            UnicodeIssue::NonBreakingSpace => "Non-breaking spaces detected",
            UnicodeIssue::ZeroWidth => "Zero-width characters detected",
            UnicodeIssue::Emoji => "Emoji detected",
            UnicodeIssue::Bengali => "Bengali text detected",
            UnicodeIssue::Hindi => "Hindi text detected",
            UnicodeIssue::Arabic => "Arabic text detected",
            UnicodeIssue::Chinese => "Chinese text detected",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            UnicodeIssue::SmartQuotes => r"[\x{2018}\x{2019}\x{201C}\x{201D}]",
            UnicodeIssue::Dashes => r"[\x{2013}\x{2014}]",
            UnicodeIssue::NonBreakingSpace => r"\x{00A0}",
            UnicodeIssue::ZeroWidth => r"[\x{200B}-\x{200D}\x{FEFF}]",
            UnicodeIssue::Emoji => {
                r"[\p{Extended_Pictographic}\p{Regional_Indicator}\p{Emoji_Modifier}]"
            }
            UnicodeIssue::Bengali => r"[\x{0980}-\x{09FF}]",
            UnicodeIssue::Hindi => r"[\x{0900}-\x{097F}]",
            UnicodeIssue::Arabic => r"[\x{0600}-\x{06FF}]",
            UnicodeIssue::Chinese => r"[\x{4E00}-\x{9FFF}]",
        }
    }
}

static ISSUE_PATTERNS: Lazy<Vec<(UnicodeIssue, Regex)>> = Lazy::new(|| {
    UnicodeIssue::ALL
        .iter()
        .map(|issue| {
            let re = Regex::new(issue.pattern()).expect("issue pattern is a valid regex");
            (*issue, re)
        })
        .collect()
});

/// Result of scanning a message for Unicode hazards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnicodeIssueReport {
    pub has_issues: bool,
    /// One label per detected class, in check order
    pub issues: Vec<String>,
}

impl UnicodeIssueReport {
    fn from_issues(found: &[UnicodeIssue]) -> Self {
        Self {
            has_issues: !found.is_empty(),
            issues: found.iter().map(|i| i.label().to_string()).collect(),
        }
    }
}

/// Issue classes present in `text`, in check order
///
/// Every class is checked; one hit does not stop the scan.
pub fn find_issues(text: &str) -> Vec<UnicodeIssue> {
    ISSUE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(issue, _)| *issue)
        .collect()
}

/// Scan `text` and build an advisory report
pub fn detect_issues(text: &str) -> UnicodeIssueReport {
    UnicodeIssueReport::from_issues(&find_issues(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_has_no_issues() {
        let report = detect_issues("Join us this Sunday at 10 AM for worship service.");
        assert!(!report.has_issues);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_report_follows_check_order() {
        // Dash appears before the quote in the text, but quotes are checked first
        let report = detect_issues("Join us Sunday \u{2013} we\u{2019}d love to see you!");
        assert!(report.has_issues);
        assert_eq!(
            report.issues,
            vec!["Smart quotes detected", "Em/en dashes detected"]
        );
    }

    #[test]
    fn test_invisible_characters() {
        assert_eq!(
            find_issues("a\u{00A0}b\u{200B}c"),
            vec![UnicodeIssue::NonBreakingSpace, UnicodeIssue::ZeroWidth]
        );
        assert_eq!(find_issues("\u{FEFF}hello"), vec![UnicodeIssue::ZeroWidth]);
    }

    #[test]
    fn test_emoji() {
        assert_eq!(
            find_issues("God's love is amazing! 🙏💙"),
            vec![UnicodeIssue::Emoji]
        );
        // ASCII digits carry the Emoji property but are not pictographs
        assert!(find_issues("Call 555-0100 #3 *").is_empty());
    }

    #[test]
    fn test_flags_and_skin_tones() {
        // Flags are regional indicator pairs, not pictographs
        assert_eq!(
            find_issues("Happy 4th \u{1F1FA}\u{1F1F8}"),
            vec![UnicodeIssue::Emoji]
        );
        assert_eq!(find_issues("\u{1F3FD}"), vec![UnicodeIssue::Emoji]);

        let report = detect_issues("Happy 4th \u{1F1FA}\u{1F1F8}");
        assert!(report.has_issues);
        assert_eq!(report.issues, vec!["Emoji detected"]);
    }

    #[test]
    fn test_scripts() {
        assert_eq!(find_issues("স্বাগতম"), vec![UnicodeIssue::Bengali]);
        assert_eq!(find_issues("नमस्ते"), vec![UnicodeIssue::Hindi]);
        assert_eq!(find_issues("مرحبا"), vec![UnicodeIssue::Arabic]);
        assert_eq!(find_issues("欢迎"), vec![UnicodeIssue::Chinese]);
    }

    #[test]
    fn test_every_class_reported_once() {
        let text = "\u{201C}x\u{201D} \u{2014} \u{00A0}\u{200D} 😊 স नम مر 中 \u{2018}";
        let found = find_issues(text);
        assert_eq!(found, UnicodeIssue::ALL.to_vec());
        assert_eq!(detect_issues(text).issues.len(), 9);
    }
}
