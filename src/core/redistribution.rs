//! Spreading overspend across the rest of the cycle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::allowance::AllowanceSequence;
use super::cycle::CycleState;
use super::MONEY_EPSILON;
use crate::ledger::ExpenseLedger;

/// Outcome of spreading one sub-period's overspend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedistributionStep {
    pub sub_period_index: usize,
    pub overspent: f64,
    /// Taken out of later sub-periods.
    pub redistributed: f64,
    /// Could not be recovered this cycle, either because no sub-period follows or
    /// because later allowances hit zero.
    pub unrecovered: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedistributionReport {
    pub steps: Vec<RedistributionStep>,
}

impl RedistributionReport {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn overspent(&self) -> f64 {
        self.steps.iter().map(|step| step.overspent).sum()
    }

    pub fn redistributed(&self) -> f64 {
        self.steps.iter().map(|step| step.redistributed).sum()
    }

    pub fn unrecovered(&self) -> f64 {
        self.steps.iter().map(|step| step.unrecovered).sum()
    }
}

pub struct OverspendRedistributor;

impl OverspendRedistributor {
    /// Deducts `overspent / remaining` from every sub-period after `current_index`.
    ///
    /// Applying this repeatedly to the same sequence compounds; prefer [`Self::recompute`].
    pub fn redistribute(
        sequence: &mut AllowanceSequence,
        current_index: usize,
        overspent: f64,
    ) -> RedistributionStep {
        let overspent = overspent.max(0.0);
        let remaining_periods = sequence.len().saturating_sub(current_index + 1);
        let mut redistributed = 0.0;
        if remaining_periods > 0 && overspent > MONEY_EPSILON {
            let deduction = overspent / remaining_periods as f64;
            for index in current_index + 1..sequence.len() {
                redistributed += sequence.deduct(index, deduction);
            }
        }
        RedistributionStep {
            sub_period_index: current_index,
            overspent,
            redistributed,
            unrecovered: (overspent - redistributed).max(0.0),
        }
    }

    /// Rebuilds the effective allowances from `base` and the spend of every sub-period,
    /// walking the cycle in order so deficits cascade. `base` is never touched.
    pub fn recompute(
        base: &AllowanceSequence,
        spend_per_period: &[f64],
    ) -> (AllowanceSequence, RedistributionReport) {
        let mut effective = base.clone();
        let mut report = RedistributionReport::default();
        for index in 0..effective.len() {
            let spent = spend_per_period.get(index).copied().unwrap_or(0.0);
            let overspent = spent - effective.get(index);
            if overspent > MONEY_EPSILON {
                let step = Self::redistribute(&mut effective, index, overspent);
                tracing::debug!(
                    sub_period = index,
                    overspent = step.overspent,
                    redistributed = step.redistributed,
                    unrecovered = step.unrecovered,
                    "overspend redistributed"
                );
                report.steps.push(step);
            }
        }
        (effective, report)
    }
}

/// A newly logged expense pushed its sub-period over budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverspendEvent {
    pub expense_id: Uuid,
    pub sub_period_index: usize,
    pub overspent_amount: f64,
    /// No later sub-period remains to absorb the deficit.
    pub unrecoverable: bool,
}

/// Remembers how much of the ledger was already inspected so each overspend is
/// reported once.
#[derive(Debug, Clone, Default)]
pub struct OverspendMonitor {
    last_seen: usize,
}

impl OverspendMonitor {
    pub fn new(ledger_len: usize) -> Self {
        Self {
            last_seen: ledger_len,
        }
    }

    pub fn last_seen(&self) -> usize {
        self.last_seen
    }

    /// Inspects expenses appended since the last call against the effective
    /// allowances. Removals only rewind the cursor.
    pub fn observe(
        &mut self,
        ledger: &ExpenseLedger,
        cycle: &CycleState,
        effective: &AllowanceSequence,
    ) -> Option<OverspendEvent> {
        let seen = self.last_seen.min(ledger.len());
        self.last_seen = ledger.len();

        let fresh = &ledger.as_slice()[seen..];
        let mut event = None;
        for (offset, expense) in fresh.iter().enumerate() {
            let Some(index) = cycle.index_for(expense.day()) else {
                continue;
            };
            let allowance = effective.get(index);
            let spent_after = ledger.spend_for_sub_period(cycle, index);
            let later_in_batch: f64 = fresh[offset..]
                .iter()
                .filter(|other| cycle.index_for(other.day()) == Some(index))
                .map(|other| other.amount)
                .sum();
            let spent_before = spent_after - later_in_batch;
            let was_over = spent_before - allowance > MONEY_EPSILON;
            let is_over = spent_before + expense.amount - allowance > MONEY_EPSILON;
            if !was_over && is_over {
                event = Some(OverspendEvent {
                    expense_id: expense.id,
                    sub_period_index: index,
                    overspent_amount: spent_after - allowance,
                    unrecoverable: index + 1 >= cycle.sub_period_count,
                });
            }
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn deficit_is_spread_over_later_periods() {
        let mut sequence = AllowanceSequence::new(vec![200.0; 5]);
        let step = OverspendRedistributor::redistribute(&mut sequence, 0, 50.0);
        assert_eq!(sequence.as_slice(), &[200.0, 187.5, 187.5, 187.5, 187.5]);
        assert_eq!(step.redistributed, 50.0);
        assert_eq!(step.unrecovered, 0.0);
    }

    #[test]
    fn last_period_overspend_is_unrecoverable() {
        let mut sequence = AllowanceSequence::new(vec![100.0, 100.0]);
        let step = OverspendRedistributor::redistribute(&mut sequence, 1, 30.0);
        assert_eq!(sequence.as_slice(), &[100.0, 100.0]);
        assert_eq!(step.unrecovered, 30.0);
    }

    #[test]
    fn floors_at_zero_and_reports_the_shortfall() {
        let mut sequence = AllowanceSequence::new(vec![10.0, 5.0, 40.0]);
        let step = OverspendRedistributor::redistribute(&mut sequence, 0, 20.0);
        assert_eq!(sequence.as_slice(), &[10.0, 0.0, 30.0]);
        assert_eq!(step.redistributed, 15.0);
        assert_eq!(step.unrecovered, 5.0);
    }

    #[test]
    fn recompute_cascades_and_leaves_base_untouched() {
        let base = AllowanceSequence::new(vec![100.0; 4]);
        let (effective, report) = OverspendRedistributor::recompute(&base, &[130.0, 110.0]);
        // Day 0 pushes 10 onto each later day; day 1 then overspends its 90 by 20.
        assert!(approx(effective.get(1), 90.0));
        assert!(approx(effective.get(2), 80.0));
        assert!(approx(effective.get(3), 80.0));
        assert_eq!(report.steps.len(), 2);
        assert!(approx(base.total() - effective.total(), report.redistributed()));
        assert!(approx(report.redistributed() + report.unrecovered(), report.overspent()));
        assert_eq!(base.as_slice(), &[100.0; 4]);
    }

    #[test]
    fn recompute_is_idempotent() {
        let base = AllowanceSequence::new(vec![50.0; 3]);
        let spend = [80.0, 0.0, 0.0];
        assert_eq!(
            OverspendRedistributor::recompute(&base, &spend),
            OverspendRedistributor::recompute(&base, &spend)
        );
    }
}
