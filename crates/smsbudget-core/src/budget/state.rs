//! Persisted cost counters and their period anchors

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spend-tracking window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Sunday-anchored week
    Weekly,
    /// Calendar month
    Monthly,
    /// Calendar year
    Yearly,
    /// Never resets
    Lifetime,
}

impl BudgetPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
            BudgetPeriod::Lifetime => "lifetime",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The Sunday on or before `date`
pub fn week_anchor(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// `YYYY-MM`
pub fn month_anchor(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// `YYYY`
pub fn year_anchor(date: NaiveDate) -> String {
    date.year().to_string()
}

/// Rolling spend counters, stored as a single JSON record
///
/// Field names on the wire are camelCase (`weeklyCost`, `lastResetWeek`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTrackerState {
    pub weekly_cost: f64,
    pub monthly_cost: f64,
    pub yearly_cost: f64,
    pub lifetime_cost: f64,
    /// Sunday that starts the tracked week
    pub last_reset_week: NaiveDate,
    /// Tracked month, `YYYY-MM`
    pub last_reset_month: String,
    /// Tracked year, `YYYY`
    pub last_reset_year: String,
}

impl CostTrackerState {
    /// All-zero state anchored at the periods containing `today`
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            weekly_cost: 0.0,
            monthly_cost: 0.0,
            yearly_cost: 0.0,
            lifetime_cost: 0.0,
            last_reset_week: week_anchor(today),
            last_reset_month: month_anchor(today),
            last_reset_year: year_anchor(today),
        }
    }

    /// Counters must be finite and non-negative
    pub fn is_valid(&self) -> bool {
        [
            self.weekly_cost,
            self.monthly_cost,
            self.yearly_cost,
            self.lifetime_cost,
        ]
        .iter()
        .all(|c| c.is_finite() && *c >= 0.0)
    }

    /// Zero every counter whose anchor no longer matches `today`
    ///
    /// Each period is checked independently; returns the periods that reset.
    pub fn roll_over(&mut self, today: NaiveDate) -> Vec<BudgetPeriod> {
        let mut reset = Vec::new();

        let week = week_anchor(today);
        if self.last_reset_week != week {
            self.weekly_cost = 0.0;
            self.last_reset_week = week;
            reset.push(BudgetPeriod::Weekly);
        }

        let month = month_anchor(today);
        if self.last_reset_month != month {
            self.monthly_cost = 0.0;
            self.last_reset_month = month;
            reset.push(BudgetPeriod::Monthly);
        }

        let year = year_anchor(today);
        if self.last_reset_year != year {
            self.yearly_cost = 0.0;
            self.last_reset_year = year;
            reset.push(BudgetPeriod::Yearly);
        }

        reset
    }

    /// Apply one charge to all four counters
    pub fn add(&mut self, amount: f64) {
        self.weekly_cost += amount;
        self.monthly_cost += amount;
        self.yearly_cost += amount;
        self.lifetime_cost += amount;
    }

    /// Current spend for `period`
    pub fn cost_for(&self, period: BudgetPeriod) -> f64 {
        match period {
            BudgetPeriod::Weekly => self.weekly_cost,
            BudgetPeriod::Monthly => self.monthly_cost,
            BudgetPeriod::Yearly => self.yearly_cost,
            BudgetPeriod::Lifetime => self.lifetime_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_anchor_is_sunday() {
        // 2024-03-13 is a Wednesday
        assert_eq!(week_anchor(date(2024, 3, 13)), date(2024, 3, 10));
        assert_eq!(week_anchor(date(2024, 3, 10)), date(2024, 3, 10));
        assert_eq!(week_anchor(date(2024, 3, 16)), date(2024, 3, 10));
        // Crosses a year boundary
        assert_eq!(week_anchor(date(2025, 1, 2)), date(2024, 12, 29));
    }

    #[test]
    fn test_month_and_year_anchor() {
        assert_eq!(month_anchor(date(2024, 3, 13)), "2024-03");
        assert_eq!(year_anchor(date(2024, 3, 13)), "2024");
    }

    #[test]
    fn test_roll_over_same_week_is_noop() {
        let mut state = CostTrackerState::fresh(date(2024, 3, 10));
        state.add(5.0);
        assert!(state.roll_over(date(2024, 3, 16)).is_empty());
        assert_eq!(state.weekly_cost, 5.0);
    }

    #[test]
    fn test_roll_over_new_week_only() {
        let mut state = CostTrackerState::fresh(date(2024, 3, 13));
        state.add(5.0);
        let reset = state.roll_over(date(2024, 3, 18));
        assert_eq!(reset, vec![BudgetPeriod::Weekly]);
        assert_eq!(state.weekly_cost, 0.0);
        assert_eq!(state.monthly_cost, 5.0);
        assert_eq!(state.yearly_cost, 5.0);
        assert_eq!(state.lifetime_cost, 5.0);
        assert_eq!(state.last_reset_week, date(2024, 3, 17));
    }

    #[test]
    fn test_roll_over_new_year_resets_all_periods() {
        let mut state = CostTrackerState::fresh(date(2024, 12, 18));
        state.add(7.5);
        let reset = state.roll_over(date(2025, 1, 6));
        assert_eq!(
            reset,
            vec![BudgetPeriod::Weekly, BudgetPeriod::Monthly, BudgetPeriod::Yearly]
        );
        assert_eq!(state.lifetime_cost, 7.5);
        assert_eq!(state.last_reset_month, "2025-01");
        assert_eq!(state.last_reset_year, "2025");
    }

    #[test]
    fn test_json_field_names() {
        let state = CostTrackerState::fresh(date(2024, 3, 13));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["weeklyCost"], 0.0);
        assert_eq!(json["lifetimeCost"], 0.0);
        assert_eq!(json["lastResetWeek"], "2024-03-10");
        assert_eq!(json["lastResetMonth"], "2024-03");
        assert_eq!(json["lastResetYear"], "2024");
    }

    #[test]
    fn test_validity() {
        let mut state = CostTrackerState::fresh(date(2024, 3, 13));
        assert!(state.is_valid());
        state.monthly_cost = -1.0;
        assert!(!state.is_valid());
    }
}
