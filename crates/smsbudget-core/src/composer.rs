//! Campaign cost breakdown and send gating
//!
//! The composer prices a prospective send without touching the tracker. The
//! gate ties it to the budget: check before sending, record only what was
//! actually delivered afterwards.
//!
//! ```text
//! compose() ──► SendGate::evaluate() ──► external send ──► SendGate::record_delivery()
//!  (live)        (warn / proceed)                           (bill delivered only)
//! ```

use crate::analyzer::SmsAnalyzer;
use crate::budget::{BudgetTracker, BudgetWarning, Clock, CostStore, CostTrackerState};
use crate::error::Result;
use crate::pricing::{Encoding, SmsPricing};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a send is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageClass {
    #[serde(rename = "SMS_GSM7")]
    SmsGsm7,
    #[serde(rename = "SMS_UNICODE")]
    SmsUnicode,
    #[serde(rename = "MMS")]
    Mms,
}

impl MessageClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageClass::SmsGsm7 => "SMS_GSM7",
            MessageClass::SmsUnicode => "SMS_UNICODE",
            MessageClass::Mms => "MMS",
        }
    }
}

impl fmt::Display for MessageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priced campaign
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub message_class: MessageClass,
    pub per_recipient_cost: f64,
    pub total_recipients: u32,
    pub total_cost: f64,
    /// SMS segments per recipient, 0 for MMS
    pub segments: u32,
}

impl CostBreakdown {
    /// Cost for the recipients confirmed sent, capped at the planned count
    pub fn billable_cost(&self, delivered: u32) -> f64 {
        self.per_recipient_cost * delivered.min(self.total_recipients) as f64
    }
}

/// Prices sends from message text, recipient count and attachment presence
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostComposer {
    analyzer: SmsAnalyzer,
}

impl CostComposer {
    pub fn new(pricing: SmsPricing) -> Self {
        Self {
            analyzer: SmsAnalyzer::new(pricing),
        }
    }

    pub fn compose(&self, text: &str, recipients: u32, has_attachment: bool) -> CostBreakdown {
        let (message_class, per_recipient_cost, segments) = if has_attachment {
            (MessageClass::Mms, self.analyzer.pricing().mms_flat, 0)
        } else {
            let analysis = self.analyzer.analyze(text);
            let class = match analysis.encoding() {
                Encoding::Gsm7 => MessageClass::SmsGsm7,
                Encoding::Unicode => MessageClass::SmsUnicode,
            };
            (class, analysis.estimated_cost_usd, analysis.segments)
        };

        CostBreakdown {
            message_class,
            per_recipient_cost,
            total_recipients: recipients,
            total_cost: per_recipient_cost * recipients as f64,
            segments,
        }
    }
}

/// Price a send with the default rates
pub fn compose(text: &str, recipients: u32, has_attachment: bool) -> CostBreakdown {
    CostComposer::default().compose(text, recipients, has_attachment)
}

/// What the caller should do before dispatching a send
#[derive(Debug, Clone, PartialEq)]
pub enum SendDecision {
    /// Within every budget
    Proceed,
    /// Over budget; dispatch only after explicit confirmation
    ConfirmRequired(BudgetWarning),
}

impl SendDecision {
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, SendDecision::ConfirmRequired(_))
    }
}

/// Budget gate around a send
pub struct SendGate<'a, S, C> {
    tracker: &'a BudgetTracker<S, C>,
}

impl<'a, S: CostStore, C: Clock> SendGate<'a, S, C> {
    pub fn new(tracker: &'a BudgetTracker<S, C>) -> Self {
        Self { tracker }
    }

    /// Check the full planned cost against the budgets (read-only)
    pub fn evaluate(&self, breakdown: &CostBreakdown) -> SendDecision {
        let warning = self.tracker.check_budget_warning(breakdown.total_cost);
        if warning.has_warning {
            SendDecision::ConfirmRequired(warning)
        } else {
            SendDecision::Proceed
        }
    }

    /// Bill the recipients that were actually sent
    pub fn record_delivery(
        &self,
        breakdown: &CostBreakdown,
        delivered: u32,
    ) -> Result<CostTrackerState> {
        let cost = breakdown.billable_cost(delivered);
        tracing::debug!(
            delivered,
            planned = breakdown.total_recipients,
            cost,
            "Recording delivered send"
        );
        self.tracker.add_cost(cost)
    }
}
