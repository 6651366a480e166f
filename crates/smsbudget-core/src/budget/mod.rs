//! Rolling messaging spend tracker with budget warnings
//!
//! Four counters (weekly, monthly, yearly, lifetime) live in one persisted
//! record. Period resets are lazy: each `load()` compares the stored anchors
//! with the current date and zeroes the counters whose period has ended.
//!
//! Accounting is best-effort. An unreadable or corrupt record is replaced by
//! a fresh zero state instead of blocking a send.
//!
//! # Examples
//!
//! ```
//! use smsbudget_core::budget::{BudgetLimits, BudgetTracker, MemoryStore, SystemClock};
//!
//! let tracker = BudgetTracker::new(MemoryStore::new(), SystemClock, BudgetLimits::default());
//! tracker.add_cost(24.0).unwrap();
//!
//! let warning = tracker.check_budget_warning(2.0);
//! assert!(warning.has_warning);
//! assert_eq!(warning.projected_new_total, 26.0);
//! ```

pub mod clock;
pub mod state;
pub mod status;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use state::{week_anchor, BudgetPeriod, CostTrackerState};
pub use status::{calculate_budget_status, AlertLevel, BudgetStatus, PeriodStatus};
pub use store::{CostStore, JsonFileStore, MemoryStore};

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Key under which the tracker record is stored
pub const STORAGE_KEY: &str = "gpbc_cost_tracker";

/// Weekly budget (USD)
pub const WEEKLY_BUDGET: f64 = 25.0;
/// Monthly budget (USD)
pub const MONTHLY_BUDGET: f64 = 100.0;
/// Yearly budget (USD)
pub const YEARLY_BUDGET: f64 = 1000.0;

/// Spend limits per period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLimits {
    pub weekly: f64,
    pub monthly: f64,
    pub yearly: f64,
}

impl Default for BudgetLimits {
    fn default() -> Self {
        Self {
            weekly: WEEKLY_BUDGET,
            monthly: MONTHLY_BUDGET,
            yearly: YEARLY_BUDGET,
        }
    }
}

impl BudgetLimits {
    /// Limit for `period`; lifetime is unbounded
    pub fn limit_for(&self, period: BudgetPeriod) -> Option<f64> {
        match period {
            BudgetPeriod::Weekly => Some(self.weekly),
            BudgetPeriod::Monthly => Some(self.monthly),
            BudgetPeriod::Yearly => Some(self.yearly),
            BudgetPeriod::Lifetime => None,
        }
    }
}

/// Period named by a [`BudgetWarning`]; `None` when within budget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningPeriod {
    #[default]
    None,
    Weekly,
    Monthly,
    Yearly,
}

impl WarningPeriod {
    /// Checked by `check_budget_warning`, highest priority first
    pub const PRIORITY: [WarningPeriod; 3] = [
        WarningPeriod::Monthly,
        WarningPeriod::Yearly,
        WarningPeriod::Weekly,
    ];

    /// Tracked counter behind this warning
    pub fn period(self) -> Option<BudgetPeriod> {
        match self {
            WarningPeriod::None => None,
            WarningPeriod::Weekly => Some(BudgetPeriod::Weekly),
            WarningPeriod::Monthly => Some(BudgetPeriod::Monthly),
            WarningPeriod::Yearly => Some(BudgetPeriod::Yearly),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WarningPeriod::None => "none",
            WarningPeriod::Weekly => "weekly",
            WarningPeriod::Monthly => "monthly",
            WarningPeriod::Yearly => "yearly",
        }
    }
}

impl fmt::Display for WarningPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking a proposed charge against the budgets
///
/// Exceeding a budget is a result for the caller to act on, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWarning {
    pub has_warning: bool,
    /// First period that would be exceeded
    pub exceeded_period: WarningPeriod,
    pub message: String,
    pub current_cost: f64,
    pub budget_limit: f64,
    pub projected_new_total: f64,
}

impl BudgetWarning {
    pub fn none() -> Self {
        Self {
            has_warning: false,
            exceeded_period: WarningPeriod::None,
            message: String::new(),
            current_cost: 0.0,
            budget_limit: 0.0,
            projected_new_total: 0.0,
        }
    }

    fn exceeded(period: WarningPeriod, current_cost: f64, budget_limit: f64, amount: f64) -> Self {
        Self {
            has_warning: true,
            exceeded_period: period,
            message: format!("This message will exceed your {} budget.", period),
            current_cost,
            budget_limit,
            projected_new_total: current_cost + amount,
        }
    }
}

/// Persisted spend tracker
///
/// Owns its store and clock so tests can substitute in-memory or fixed-date
/// implementations.
#[derive(Debug)]
pub struct BudgetTracker<S = JsonFileStore, C = SystemClock> {
    store: S,
    clock: C,
    limits: BudgetLimits,
    key: String,
}

impl BudgetTracker<JsonFileStore, SystemClock> {
    /// File-backed tracker in `dir` with the default limits
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(
            JsonFileStore::new(dir)?,
            SystemClock,
            BudgetLimits::default(),
        ))
    }
}

impl<S: CostStore, C: Clock> BudgetTracker<S, C> {
    pub fn new(store: S, clock: C, limits: BudgetLimits) -> Self {
        Self {
            store,
            clock,
            limits,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Use a storage key other than [`STORAGE_KEY`]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Current counters with period rollover applied
    ///
    /// Never fails: a missing, unreadable or corrupt record yields a fresh
    /// state. Rollover happens in memory only and is persisted by the next
    /// `add_cost`.
    pub fn load(&self) -> CostTrackerState {
        let today = self.clock.today();

        let raw = match self.store.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored cost tracker state, starting fresh");
                return CostTrackerState::fresh(today);
            }
            Err(e) => {
                warn!("Cost tracker state unreadable, starting fresh: {}", e);
                return CostTrackerState::fresh(today);
            }
        };

        let mut state = match serde_json::from_str::<CostTrackerState>(&raw) {
            Ok(state) if state.is_valid() => state,
            Ok(_) => {
                warn!("Cost tracker state has invalid counters, starting fresh");
                return CostTrackerState::fresh(today);
            }
            Err(e) => {
                warn!("Cost tracker state corrupt, starting fresh: {}", e);
                return CostTrackerState::fresh(today);
            }
        };

        let reset = state.roll_over(today);
        if !reset.is_empty() {
            debug!(?reset, "Budget periods rolled over");
        }

        state
    }

    /// Same as [`load`](Self::load)
    pub fn summary(&self) -> CostTrackerState {
        self.load()
    }

    /// Record a confirmed charge against every period
    ///
    /// All four counters change in one write. Negative or non-finite amounts
    /// are rejected without touching storage.
    pub fn add_cost(&self, amount: f64) -> Result<CostTrackerState> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::InvalidAmount { amount });
        }

        let mut state = self.load();
        state.add(amount);
        self.save(&state)?;

        info!(
            amount,
            weekly = state.weekly_cost,
            monthly = state.monthly_cost,
            lifetime = state.lifetime_cost,
            "Recorded messaging cost"
        );
        Ok(state)
    }

    /// Would charging `amount` exceed a budget?
    ///
    /// Read-only. Periods are checked monthly, then yearly, then weekly; only
    /// the first exceeded one is reported.
    pub fn check_budget_warning(&self, amount: f64) -> BudgetWarning {
        let state = self.load();

        for warning_period in WarningPeriod::PRIORITY {
            let Some(period) = warning_period.period() else {
                continue;
            };
            let Some(limit) = self.limits.limit_for(period) else {
                continue;
            };
            let current = state.cost_for(period);
            if current + amount > limit {
                debug!(%period, current, amount, limit, "Budget would be exceeded");
                return BudgetWarning::exceeded(warning_period, current, limit, amount);
            }
        }

        BudgetWarning::none()
    }

    /// Usage percentage and alert level per period
    pub fn budget_status(&self) -> BudgetStatus {
        calculate_budget_status(&self.load(), &self.limits)
    }

    /// Zero every counter and re-anchor at the current periods
    pub fn reset(&self) -> Result<CostTrackerState> {
        let state = CostTrackerState::fresh(self.clock.today());
        self.save(&state)?;
        info!("Cost tracker reset");
        Ok(state)
    }

    fn save(&self, state: &CostTrackerState) -> Result<()> {
        let json =
            serde_json::to_string(state).map_err(|source| CoreError::Serialize { source })?;
        self.store.write(&self.key, &json).inspect_err(|e| {
            warn!("Failed to persist cost tracker state: {}", e);
        })
    }
}
