//! The persisted budget setup record.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{find_by_id, BudgetMode, Currency, ViewGranularity};
use super::recurring::RecurringSpend;

/// Everything the user chose during setup, stored as one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetConfiguration {
    #[serde(default)]
    pub mode: BudgetMode,
    pub total_amount: f64,
    #[serde(default)]
    pub savings_goal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payday_of_month: Option<u32>,
    #[serde(default)]
    pub view_granularity: ViewGranularity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_period_overrides: Option<Vec<f64>>,
    #[serde(default)]
    pub category_budgets: BTreeMap<String, f64>,
    #[serde(default)]
    pub recurring_spends: Vec<RecurringSpend>,
    #[serde(default)]
    pub currency: Currency,
    /// Day the setup was completed or last edited. Sub-periods never start earlier.
    pub configured_on: NaiveDate,
}

impl BudgetConfiguration {
    pub fn new(
        mode: BudgetMode,
        total_amount: f64,
        payday_of_month: Option<u32>,
        view_granularity: ViewGranularity,
        configured_on: NaiveDate,
    ) -> Self {
        Self {
            mode,
            total_amount,
            savings_goal: 0.0,
            payday_of_month,
            view_granularity,
            per_period_overrides: None,
            category_budgets: BTreeMap::new(),
            recurring_spends: Vec::new(),
            currency: Currency::default(),
            configured_on,
        }
    }

    pub fn with_savings_goal(mut self, savings_goal: f64) -> Self {
        self.savings_goal = savings_goal;
        self
    }

    pub fn with_overrides(mut self, overrides: Vec<f64>) -> Self {
        self.per_period_overrides = Some(overrides);
        self
    }

    pub fn with_category_budget(mut self, category: impl Into<String>, amount: f64) -> Self {
        self.category_budgets.insert(category.into(), amount);
        self
    }

    pub fn with_recurring(mut self, spend: RecurringSpend) -> Self {
        self.recurring_spends.push(spend);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Amount available for spending: total minus the savings goal.
    pub fn spendable_amount(&self) -> f64 {
        self.total_amount - self.savings_goal
    }

    /// Granularity actually used; a missing payday forces the undated model.
    pub fn effective_granularity(&self) -> ViewGranularity {
        if self.payday_of_month.is_none() {
            ViewGranularity::None
        } else {
            self.view_granularity
        }
    }

    /// User overrides, treating an empty list as absent.
    pub fn user_plan(&self) -> Option<&[f64]> {
        self.per_period_overrides
            .as_deref()
            .filter(|plan| !plan.is_empty())
    }

    /// Sum of the per-category budgets. Disposable mode ignores categories.
    pub fn allocated(&self) -> f64 {
        match self.mode {
            BudgetMode::EntireBudget => self.category_budgets.values().sum(),
            BudgetMode::Disposable => 0.0,
        }
    }

    /// Money not yet assigned to a category; negative when over-allocated.
    pub fn unallocated(&self) -> f64 {
        self.total_amount - self.allocated()
    }

    pub fn is_over_allocated(&self) -> bool {
        self.unallocated() < 0.0
    }

    pub fn recurring(&self, id: Uuid) -> Option<&RecurringSpend> {
        find_by_id(&self.recurring_spends, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn spendable_excludes_savings_goal() {
        let config = BudgetConfiguration::new(
            BudgetMode::Disposable,
            700.0,
            Some(1),
            ViewGranularity::Weekly,
            jan(1),
        )
        .with_savings_goal(100.0);
        assert_eq!(config.spendable_amount(), 600.0);
    }

    #[test]
    fn unallocated_goes_negative_when_categories_exceed_total() {
        let config = BudgetConfiguration::new(
            BudgetMode::EntireBudget,
            1000.0,
            Some(25),
            ViewGranularity::None,
            jan(1),
        )
        .with_category_budget("Housing", 800.0)
        .with_category_budget("Food", 300.0);
        assert_eq!(config.allocated(), 1100.0);
        assert_eq!(config.unallocated(), -100.0);
        assert!(config.is_over_allocated());
    }

    #[test]
    fn disposable_mode_ignores_category_budgets() {
        let config = BudgetConfiguration::new(
            BudgetMode::Disposable,
            400.0,
            Some(25),
            ViewGranularity::Daily,
            jan(1),
        )
        .with_category_budget("Food", 300.0);
        assert_eq!(config.unallocated(), 400.0);
    }

    #[test]
    fn missing_payday_forces_undated_granularity() {
        let config =
            BudgetConfiguration::new(BudgetMode::Disposable, 400.0, None, ViewGranularity::Daily, jan(1));
        assert_eq!(config.effective_granularity(), ViewGranularity::None);
    }

    #[test]
    fn empty_override_list_counts_as_absent() {
        let config =
            BudgetConfiguration::new(BudgetMode::Disposable, 400.0, Some(5), ViewGranularity::Daily, jan(1))
                .with_overrides(Vec::new());
        assert!(config.user_plan().is_none());
    }

    #[test]
    fn legacy_records_without_optional_fields_deserialize() {
        let json = r#"{"total_amount": 250.0, "configured_on": "2024-01-03"}"#;
        let config: BudgetConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.mode, BudgetMode::Disposable);
        assert_eq!(config.view_granularity, ViewGranularity::None);
        assert!(config.recurring_spends.is_empty());
        assert_eq!(config.currency, Currency::default());
    }
}
