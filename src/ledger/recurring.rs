//! Derived confirmation state of recurring spends.
//!
//! A template is confirmed for a sub-period when the ledger holds an expense pointing
//! back at it inside that sub-period's dates. Nothing is stored on the template.

use std::collections::HashSet;

use uuid::Uuid;

use super::expense_ledger::ExpenseLedger;
use crate::core::cycle::{CycleState, SubPeriodBounds};
use crate::domain::{RecurringSpend, SpendSchedule, ViewGranularity};

/// A recurring spend still waiting to be confirmed in one sub-period.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRecurring<'a> {
    pub spend: &'a RecurringSpend,
    /// Expected amount for the whole sub-period.
    pub amount: f64,
}

/// Amount one sub-period of `granularity` expects from `spend`, `None` when the
/// template does not apply to that granularity.
pub fn occurrence_amount(spend: &RecurringSpend, granularity: ViewGranularity) -> Option<f64> {
    match (granularity, &spend.schedule) {
        (ViewGranularity::Daily, SpendSchedule::Weekdays { .. }) => Some(spend.amount),
        (ViewGranularity::Weekly, SpendSchedule::TimesPerWeek { .. }) => spend.weekly_amount(),
        _ => None,
    }
}

/// Ids of templates already confirmed inside `bounds`.
pub fn confirmed_ids(ledger: &ExpenseLedger, bounds: SubPeriodBounds) -> HashSet<Uuid> {
    ledger
        .iter()
        .filter(|expense| bounds.contains(expense.day()))
        .filter_map(|expense| expense.recurring_spend_id)
        .collect()
}

pub fn unconfirmed_for_sub_period<'a>(
    spends: &'a [RecurringSpend],
    ledger: &ExpenseLedger,
    cycle: &CycleState,
    index: usize,
) -> Vec<PendingRecurring<'a>> {
    let Some(bounds) = cycle.sub_period(index) else {
        return Vec::new();
    };
    let confirmed = confirmed_ids(ledger, bounds);
    spends
        .iter()
        .filter(|spend| !confirmed.contains(&spend.id))
        .filter(|spend| match (cycle.granularity, bounds.window()) {
            (ViewGranularity::Daily, Some(window)) => spend.applies_on(window.start),
            _ => true,
        })
        .filter_map(|spend| {
            occurrence_amount(spend, cycle.granularity).map(|amount| PendingRecurring { spend, amount })
        })
        .collect()
}

/// Planned but unconfirmed money for one sub-period. Informational only.
pub fn pending_total(pending: &[PendingRecurring<'_>]) -> f64 {
    pending.iter().map(|item| item.amount).sum()
}
