use serde::{Deserialize, Serialize};

use super::allowance::{AllowanceDistributor, AllowanceSequence};
use super::cycle::CycleState;
use super::redistribution::{OverspendRedistributor, RedistributionReport};
use super::status::{PeriodStatus, PeriodStatusEvaluator};
use crate::domain::BudgetConfiguration;
use crate::ledger::ExpenseLedger;

/// Two-layer allowance plan: the user's plan (overrides or an even split) and the
/// effective plan after overspend has been spread forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowancePlan {
    pub user_plan: AllowanceSequence,
    pub effective: AllowanceSequence,
    pub per_period_savings: f64,
    /// Confirmed spend per sub-period.
    pub spend: Vec<f64>,
    pub report: RedistributionReport,
}

impl AllowancePlan {
    /// Rebuilt from scratch on every call; the configuration is never mutated.
    pub fn derive(config: &BudgetConfiguration, cycle: &CycleState, ledger: &ExpenseLedger) -> Self {
        let user_plan = AllowanceDistributor::distribute(
            config.spendable_amount(),
            cycle.sub_period_count,
            config.user_plan(),
        );
        let per_period_savings =
            AllowanceDistributor::per_period_savings(config.savings_goal, cycle.sub_period_count);
        let spend = ledger.spend_per_sub_period(cycle);
        let (effective, report) = OverspendRedistributor::recompute(&user_plan, &spend);
        Self {
            user_plan,
            effective,
            per_period_savings,
            spend,
            report,
        }
    }

    pub fn allowance(&self, index: usize) -> f64 {
        self.effective.get(index)
    }

    pub fn spent(&self, index: usize) -> f64 {
        self.spend.get(index).copied().unwrap_or(0.0)
    }

    pub fn status(&self, index: usize) -> PeriodStatus {
        PeriodStatusEvaluator::evaluate(self.allowance(index), self.spent(index), self.per_period_savings)
    }
}
