//! smsbudget-core - Core library for smsbudget
//!
//! SMS encoding classification, segment counting, Unicode hazard detection and
//! sanitization, campaign cost estimation, and a persisted rolling budget
//! tracker.

pub mod analyzer;
pub mod budget;
pub mod composer;
pub mod error;
pub mod pricing;

pub use analyzer::{
    analyze, detect_issues, sanitize, SanitizationReport, SmsAnalysis, SmsAnalyzer,
    UnicodeIssue, UnicodeIssueReport,
};
pub use budget::{
    AlertLevel, BudgetLimits, BudgetPeriod, BudgetStatus, BudgetTracker, BudgetWarning,
    CostTrackerState, WarningPeriod,
};
pub use composer::{compose, CostBreakdown, CostComposer, MessageClass, SendDecision, SendGate};
pub use error::CoreError;
pub use pricing::{Encoding, SmsPricing};
