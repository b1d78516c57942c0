//! Setup wizard validation and category management.

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::recurring::DAYS_PER_WEEK;
use crate::domain::{
    BudgetConfiguration, BudgetMode, Category, CategoryList, RecurringSpend, SpendSchedule,
    ViewGranularity,
};

pub struct SetupService;

impl SetupService {
    /// Checks a configuration before it replaces the stored one.
    pub fn validate(config: &BudgetConfiguration) -> ServiceResult<()> {
        if !config.total_amount.is_finite() || config.total_amount <= 0.0 {
            return Err(ServiceError::Invalid("Budget amount must be greater than zero".into()));
        }
        if !config.savings_goal.is_finite()
            || config.savings_goal < 0.0
            || config.savings_goal > config.total_amount
        {
            return Err(ServiceError::Invalid(
                "Savings goal must be between zero and the budget amount".into(),
            ));
        }
        if let Some(payday) = config.payday_of_month {
            if !(1..=31).contains(&payday) {
                return Err(ServiceError::Invalid(format!(
                    "Payday must be between 1 and 31, got {payday}"
                )));
            }
        }
        if let Some(plan) = &config.per_period_overrides {
            if plan.iter().any(|value| !value.is_finite() || *value < 0.0) {
                return Err(ServiceError::Invalid("Custom allowances cannot be negative".into()));
            }
        }
        if config.mode == BudgetMode::EntireBudget
            && config
                .category_budgets
                .values()
                .any(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(ServiceError::Invalid("Category budgets cannot be negative".into()));
        }
        let granularity = config.effective_granularity();
        for spend in &config.recurring_spends {
            Self::validate_recurring(spend, granularity)?;
        }
        Ok(())
    }

    pub fn validate_recurring(
        spend: &RecurringSpend,
        granularity: ViewGranularity,
    ) -> ServiceResult<()> {
        if !spend.amount.is_finite() || spend.amount <= 0.0 {
            return Err(ServiceError::Invalid(format!(
                "Recurring spend `{}` needs an amount greater than zero",
                spend.description
            )));
        }
        if spend.description.trim().is_empty() {
            return Err(ServiceError::Invalid("Recurring spend needs a description".into()));
        }
        if spend.category.trim().is_empty() {
            return Err(ServiceError::Invalid(format!(
                "Recurring spend `{}` needs a category",
                spend.description
            )));
        }
        match (&spend.schedule, granularity) {
            (SpendSchedule::Weekdays { days }, _) if days.is_empty() => Err(ServiceError::Invalid(
                format!("Pick at least one weekday for `{}`", spend.description),
            )),
            (SpendSchedule::TimesPerWeek { count }, _) if *count > DAYS_PER_WEEK => {
                Err(ServiceError::Invalid(format!(
                    "`{}` cannot happen more than {DAYS_PER_WEEK} times per week",
                    spend.description
                )))
            }
            (SpendSchedule::Weekdays { .. }, ViewGranularity::Weekly)
            | (SpendSchedule::TimesPerWeek { .. }, ViewGranularity::Daily) => {
                Err(ServiceError::Invalid(format!(
                    "`{}` uses a {} schedule but the budget is viewed {}",
                    spend.description,
                    spend.schedule_granularity().to_string().to_lowercase(),
                    granularity.to_string().to_lowercase()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Adds a user-defined category, rejecting blanks and case-insensitive duplicates.
    pub fn add_custom_category(categories: &mut CategoryList, name: &str) -> ServiceResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Invalid("Category name is required".into()));
        }
        if categories.contains(trimmed) {
            return Err(ServiceError::Invalid(format!(
                "Category `{trimmed}` already exists"
            )));
        }
        categories.push(Category::custom(trimmed));
        Ok(())
    }

    pub fn toggle_category(categories: &mut CategoryList, name: &str) -> ServiceResult<bool> {
        categories
            .toggle(name)
            .ok_or_else(|| ServiceError::Invalid(format!("Category `{}` not found", name.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn config() -> BudgetConfiguration {
        BudgetConfiguration::new(
            BudgetMode::EntireBudget,
            1000.0,
            Some(15),
            ViewGranularity::Daily,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    fn invalid_message(result: ServiceResult<()>) -> String {
        match result {
            Err(ServiceError::Invalid(message)) => message,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_plain_configuration() {
        SetupService::validate(&config()).unwrap();
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut bad_total = config();
        bad_total.total_amount = 0.0;
        assert!(invalid_message(SetupService::validate(&bad_total)).contains("greater than zero"));

        let bad_savings = config().with_savings_goal(1200.0);
        assert!(invalid_message(SetupService::validate(&bad_savings)).contains("Savings"));

        let nan_savings = config().with_savings_goal(f64::NAN);
        assert!(invalid_message(SetupService::validate(&nan_savings)).contains("Savings"));

        let mut nan_category = config();
        nan_category.category_budgets.insert("Food".into(), f64::NAN);
        assert!(invalid_message(SetupService::validate(&nan_category)).contains("Category budgets"));

        let mut bad_payday = config();
        bad_payday.payday_of_month = Some(32);
        assert!(invalid_message(SetupService::validate(&bad_payday)).contains("Payday"));

        let bad_plan = config().with_overrides(vec![10.0, -1.0]);
        assert!(invalid_message(SetupService::validate(&bad_plan)).contains("negative"));
    }

    #[test]
    fn recurring_schedule_must_match_view() {
        let weekly = config().with_recurring(RecurringSpend::new(
            "Lunch",
            10.0,
            "Food",
            SpendSchedule::times_per_week(3),
        ));
        assert!(invalid_message(SetupService::validate(&weekly)).contains("viewed daily"));

        let empty_days = config().with_recurring(RecurringSpend::new(
            "Coffee",
            3.0,
            "Food",
            SpendSchedule::on(Vec::<Weekday>::new()),
        ));
        assert!(invalid_message(SetupService::validate(&empty_days)).contains("weekday"));
    }

    #[test]
    fn custom_categories_are_unique_ignoring_case() {
        let mut categories = CategoryList::defaults_for(BudgetMode::Disposable);
        SetupService::add_custom_category(&mut categories, "  Pets ").unwrap();
        assert!(categories.find("pets").unwrap().is_custom);
        assert!(SetupService::add_custom_category(&mut categories, "PETS").is_err());
        assert!(SetupService::add_custom_category(&mut categories, "   ").is_err());
        assert!(SetupService::add_custom_category(&mut categories, "food & drinks").is_err());
    }

    #[test]
    fn toggling_unknown_category_fails() {
        let mut categories = CategoryList::defaults_for(BudgetMode::Disposable);
        assert!(!SetupService::toggle_category(&mut categories, "Transport").unwrap());
        assert!(SetupService::toggle_category(&mut categories, "Yachts").is_err());
    }
}
