use std::fmt;

use serde::{Deserialize, Serialize};

use super::MONEY_EPSILON;

/// Traffic-light state of one sub-period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "On track",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::Over => "Over budget",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodStatus {
    pub allowance: f64,
    pub spent: f64,
    /// Fun money left; negative once overspent.
    pub remaining: f64,
    pub overspent_amount: f64,
    pub per_period_savings: f64,
    /// Savings left after covering the overspend; may be negative.
    pub adjusted_savings: f64,
    pub is_savings_negative: bool,
    pub status: BudgetStatus,
}

pub struct PeriodStatusEvaluator;

impl PeriodStatusEvaluator {
    /// Only confirmed expenses count toward `confirmed_spend`.
    pub fn evaluate(allowance: f64, confirmed_spend: f64, per_period_savings: f64) -> PeriodStatus {
        let remaining = allowance - confirmed_spend;
        let overspent_amount = if remaining < -MONEY_EPSILON {
            -remaining
        } else {
            0.0
        };
        let adjusted_savings = per_period_savings - overspent_amount;
        let status = if remaining < -MONEY_EPSILON {
            BudgetStatus::Over
        } else if allowance > MONEY_EPSILON && remaining <= allowance / 3.0 + MONEY_EPSILON {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        };
        PeriodStatus {
            allowance,
            spent: confirmed_spend,
            remaining,
            overspent_amount,
            per_period_savings,
            adjusted_savings,
            is_savings_negative: adjusted_savings < -MONEY_EPSILON,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_third_left_is_a_warning() {
        let status = PeriodStatusEvaluator::evaluate(100.0, 70.0, 0.0);
        assert_eq!(status.remaining, 30.0);
        assert_eq!(status.status, BudgetStatus::Warning);
    }

    #[test]
    fn warning_boundary_is_inclusive() {
        let status = PeriodStatusEvaluator::evaluate(90.0, 60.0, 0.0);
        assert_eq!(status.status, BudgetStatus::Warning);
        let status = PeriodStatusEvaluator::evaluate(90.0, 59.0, 0.0);
        assert_eq!(status.status, BudgetStatus::OnTrack);
    }

    #[test]
    fn overspend_eats_into_savings() {
        let status = PeriodStatusEvaluator::evaluate(200.0, 250.0, 20.0);
        assert_eq!(status.status, BudgetStatus::Over);
        assert_eq!(status.overspent_amount, 50.0);
        assert_eq!(status.adjusted_savings, -30.0);
        assert!(status.is_savings_negative);
    }

    #[test]
    fn zero_allowance_is_on_track_until_spent() {
        let untouched = PeriodStatusEvaluator::evaluate(0.0, 0.0, 0.0);
        assert_eq!(untouched.status, BudgetStatus::OnTrack);
        let spent = PeriodStatusEvaluator::evaluate(0.0, 5.0, 0.0);
        assert_eq!(spent.status, BudgetStatus::Over);
    }

    #[test]
    fn exact_spend_is_a_warning_not_over() {
        let status = PeriodStatusEvaluator::evaluate(50.0, 50.0, 10.0);
        assert_eq!(status.status, BudgetStatus::Warning);
        assert_eq!(status.overspent_amount, 0.0);
        assert_eq!(status.adjusted_savings, 10.0);
    }
}
