//! Budget usage levels for visual indicators

use super::state::{BudgetPeriod, CostTrackerState};
use super::BudgetLimits;
use serde::{Deserialize, Serialize};

/// Usage percentage at which a period turns from safe to warning
pub const WARNING_THRESHOLD_PCT: f64 = 80.0;

/// Alert level based on budget usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Usage < 80%
    Safe,
    /// Usage >= 80%
    Warning,
    /// Usage >= 100%
    Exceeded,
}

/// Spend against the limit of one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStatus {
    pub period: BudgetPeriod,
    pub current_cost: f64,
    pub budget_limit: f64,
    pub percentage: f64,
    pub level: AlertLevel,
}

/// Status of every bounded period plus the lifetime total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub weekly: PeriodStatus,
    pub monthly: PeriodStatus,
    pub yearly: PeriodStatus,
    pub lifetime_cost: f64,
}

impl BudgetStatus {
    pub fn periods(&self) -> [&PeriodStatus; 3] {
        [&self.weekly, &self.monthly, &self.yearly]
    }

    /// Most severe level across the bounded periods
    pub fn worst_level(&self) -> AlertLevel {
        let levels = self.periods().map(|p| p.level);
        if levels.contains(&AlertLevel::Exceeded) {
            AlertLevel::Exceeded
        } else if levels.contains(&AlertLevel::Warning) {
            AlertLevel::Warning
        } else {
            AlertLevel::Safe
        }
    }
}

/// Compute per-period usage from a loaded state
pub fn calculate_budget_status(state: &CostTrackerState, limits: &BudgetLimits) -> BudgetStatus {
    let period_status = |period: BudgetPeriod, budget_limit: f64| {
        let current_cost = state.cost_for(period);
        let percentage = if budget_limit > 0.0 {
            current_cost / budget_limit * 100.0
        } else {
            0.0
        };
        PeriodStatus {
            period,
            current_cost,
            budget_limit,
            percentage,
            level: determine_alert_level(percentage),
        }
    };

    BudgetStatus {
        weekly: period_status(BudgetPeriod::Weekly, limits.weekly),
        monthly: period_status(BudgetPeriod::Monthly, limits.monthly),
        yearly: period_status(BudgetPeriod::Yearly, limits.yearly),
        lifetime_cost: state.lifetime_cost,
    }
}

/// Determine alert level from usage percentage
fn determine_alert_level(usage_pct: f64) -> AlertLevel {
    if usage_pct >= 100.0 {
        AlertLevel::Exceeded
    } else if usage_pct >= WARNING_THRESHOLD_PCT {
        AlertLevel::Warning
    } else {
        AlertLevel::Safe
    }
}
