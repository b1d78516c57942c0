//! Per-sub-period spending limits.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Ordered allowances, one per sub-period. Elements are never negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowanceSequence(Vec<f64>);

impl AllowanceSequence {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values.into_iter().map(|value| value.max(0.0)).collect())
    }

    /// Allowance at `index`; `0` past the end.
    pub fn get(&self, index: usize) -> f64 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// Lowers the allowance at `index` by `amount`, floored at zero.
    /// Returns how much was actually taken.
    pub(crate) fn deduct(&mut self, index: usize, amount: f64) -> f64 {
        match self.0.get_mut(index) {
            Some(slot) => {
                let taken = amount.min(*slot).max(0.0);
                *slot -= taken;
                taken
            }
            None => 0.0,
        }
    }
}

impl Index<usize> for AllowanceSequence {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<AllowanceSequence> for Vec<f64> {
    fn from(sequence: AllowanceSequence) -> Self {
        sequence.0
    }
}

pub struct AllowanceDistributor;

impl AllowanceDistributor {
    /// Builds `sub_period_count` allowances from a non-empty override list, or an even split.
    pub fn distribute(
        spendable_amount: f64,
        sub_period_count: usize,
        overrides: Option<&[f64]>,
    ) -> AllowanceSequence {
        let count = sub_period_count.max(1);
        match overrides.filter(|plan| !plan.is_empty()) {
            Some(plan) => AllowanceSequence::new(
                (0..count)
                    .map(|index| plan.get(index).copied().unwrap_or(0.0))
                    .collect(),
            ),
            None => AllowanceSequence::new(vec![spendable_amount / count as f64; count]),
        }
    }

    pub fn per_period_savings(savings_goal: f64, sub_period_count: usize) -> f64 {
        savings_goal / sub_period_count.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_sums_to_spendable() {
        let sequence = AllowanceDistributor::distribute(1000.0, 3, None);
        assert_eq!(sequence.len(), 3);
        assert!((sequence.total() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn zero_count_is_treated_as_one() {
        let sequence = AllowanceDistributor::distribute(80.0, 0, None);
        assert_eq!(sequence.as_slice(), &[80.0]);
        assert_eq!(AllowanceDistributor::per_period_savings(50.0, 0), 50.0);
    }

    #[test]
    fn overrides_are_used_by_index_and_padded_with_zero() {
        let plan = [120.0, 80.0];
        let sequence = AllowanceDistributor::distribute(1000.0, 4, Some(&plan));
        assert_eq!(sequence.as_slice(), &[120.0, 80.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_overrides_fall_back_to_even_split() {
        let sequence = AllowanceDistributor::distribute(600.0, 2, Some(&[]));
        assert_eq!(sequence.as_slice(), &[300.0, 300.0]);
        assert_eq!(AllowanceDistributor::per_period_savings(100.0, 2), 50.0);
    }

    #[test]
    fn deduct_never_goes_below_zero() {
        let mut sequence = AllowanceSequence::new(vec![10.0, -4.0]);
        assert_eq!(sequence[1], 0.0);
        assert_eq!(sequence.deduct(0, 25.0), 10.0);
        assert_eq!(sequence.get(0), 0.0);
        assert_eq!(sequence.deduct(7, 5.0), 0.0);
    }
}
