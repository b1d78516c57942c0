use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::window::DateWindow;
use crate::core::cycle::CycleState;
use crate::domain::{find_by_id, total_amount, Expense, RecurringSpend};

/// Append-only list of counted expenses, stored as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        id
    }

    /// Removes the expense with `id`; `None` when absent.
    pub fn remove(&mut self, id: Uuid) -> Option<Expense> {
        let position = self.expenses.iter().position(|expense| expense.id == id)?;
        Some(self.expenses.remove(position))
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        find_by_id(&self.expenses, id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    pub fn as_slice(&self) -> &[Expense] {
        &self.expenses
    }

    /// Materializes one occurrence of `spend` as a counted expense.
    pub fn confirm_recurring(
        &mut self,
        spend: &RecurringSpend,
        amount: f64,
        date: NaiveDateTime,
    ) -> &Expense {
        let index = self.expenses.len();
        self.expenses
            .push(Expense::from_recurring(spend, amount, date));
        &self.expenses[index]
    }

    /// Expenses dated inside sub-period `index`, in ledger order.
    pub fn expenses_for_sub_period<'a>(
        &'a self,
        cycle: &CycleState,
        index: usize,
    ) -> Vec<&'a Expense> {
        match cycle.sub_period(index) {
            Some(bounds) => self
                .expenses
                .iter()
                .filter(|expense| bounds.contains(expense.day()))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn spend_for_sub_period(&self, cycle: &CycleState, index: usize) -> f64 {
        total_amount(self.expenses_for_sub_period(cycle, index))
    }

    /// Confirmed spend of every sub-period, indexed like the allowance sequence.
    pub fn spend_per_sub_period(&self, cycle: &CycleState) -> Vec<f64> {
        let mut totals = vec![0.0; cycle.sub_period_count];
        for expense in &self.expenses {
            if let Some(slot) = cycle
                .index_for(expense.day())
                .and_then(|index| totals.get_mut(index))
            {
                *slot += expense.amount;
            }
        }
        totals
    }

    /// Spend per category over `window`, or over everything when `window` is `None`.
    pub fn spend_by_category(&self, window: Option<DateWindow>) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            if window.map_or(true, |window| window.contains(expense.day())) {
                *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
            }
        }
        totals
    }
}
