//! SMS text analysis: encoding, segmentation, cost and sanitization
//!
//! `SmsAnalyzer` carries an injected [`SmsPricing`]; the free functions
//! [`analyze`], [`detect_issues`] and [`sanitize`] use the default rates.
//!
//! # Examples
//!
//! ```
//! use smsbudget_core::analyzer::{analyze, sanitize};
//!
//! let analysis = analyze("Join us Sunday \u{2013} we\u{2019}d love to see you!");
//! assert!(analysis.is_unicode);
//!
//! let cleaned = sanitize("Join us Sunday \u{2013} we\u{2019}d love to see you!");
//! assert!(!analyze(&cleaned).is_unicode);
//! ```

pub mod charset;
pub mod issues;
pub mod sanitize;

pub use charset::{is_gsm7, is_gsm7_char};
pub use issues::{detect_issues, find_issues, UnicodeIssue, UnicodeIssueReport};
pub use sanitize::sanitize;

use crate::pricing::{Encoding, SmsPricing};
use serde::{Deserialize, Serialize};

/// Encoding, segmentation and cost of a message body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsAnalysis {
    /// Length in UTF-16 code units (equal to the character count for GSM-7 text)
    pub length: usize,
    pub is_unicode: bool,
    pub segments: u32,
    pub char_limit_per_segment: usize,
    pub estimated_cost_usd: f64,
}

impl SmsAnalysis {
    pub fn encoding(&self) -> Encoding {
        if self.is_unicode {
            Encoding::Unicode
        } else {
            Encoding::Gsm7
        }
    }
}

/// Before/after comparison of sanitizing a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizationReport {
    pub original: String,
    pub sanitized: String,
    pub before: SmsAnalysis,
    pub after: SmsAnalysis,
    /// Hazards found in the original text
    pub issues: UnicodeIssueReport,
    /// Per-recipient saving in USD (never negative)
    pub savings_usd: f64,
    /// Saving as a percentage of the original cost, `0` when the original is free
    pub savings_percent: f64,
    pub changed: bool,
}

/// Analyzer bound to a pricing profile
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmsAnalyzer {
    pricing: SmsPricing,
}

impl SmsAnalyzer {
    pub fn new(pricing: SmsPricing) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &SmsPricing {
        &self.pricing
    }

    /// Classify `text` and estimate its per-recipient cost
    pub fn analyze(&self, text: &str) -> SmsAnalysis {
        let encoding = if is_gsm7(text) {
            Encoding::Gsm7
        } else {
            Encoding::Unicode
        };
        let length = text.encode_utf16().count();
        let segments = encoding.segment_count(length);

        SmsAnalysis {
            length,
            is_unicode: encoding == Encoding::Unicode,
            segments,
            char_limit_per_segment: encoding.char_limit_for(length),
            estimated_cost_usd: self.pricing.sms_cost(encoding, segments),
        }
    }

    /// Sanitize `text` and report what it saves
    pub fn sanitize_with_report(&self, text: &str) -> SanitizationReport {
        let sanitized = sanitize(text);
        let before = self.analyze(text);
        let after = self.analyze(&sanitized);

        let savings_usd = (before.estimated_cost_usd - after.estimated_cost_usd).max(0.0);
        let savings_percent = if before.estimated_cost_usd > 0.0 {
            savings_usd / before.estimated_cost_usd * 100.0
        } else {
            0.0
        };

        SanitizationReport {
            changed: sanitized != text,
            original: text.to_string(),
            sanitized,
            before,
            after,
            issues: detect_issues(text),
            savings_usd,
            savings_percent,
        }
    }
}

/// Analyze `text` with the default pricing
pub fn analyze(text: &str) -> SmsAnalysis {
    SmsAnalyzer::default().analyze(text)
}
