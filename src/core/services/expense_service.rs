//! Validated mutations of the expense ledger.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::core::cycle::CycleState;
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{BudgetConfiguration, Expense, ViewGranularity};
use crate::ledger::recurring::{confirmed_ids, occurrence_amount};
use crate::ledger::ExpenseLedger;

pub struct ExpenseService;

impl ExpenseService {
    /// Appends a one-off expense and returns its identifier.
    pub fn add(
        ledger: &mut ExpenseLedger,
        amount: f64,
        description: &str,
        category: &str,
        necessary: bool,
        date: NaiveDateTime,
    ) -> ServiceResult<Uuid> {
        Self::validate(amount, description, category)?;
        let expense = Expense::new(amount, description.trim(), category.trim(), necessary, date);
        Ok(ledger.add(expense))
    }

    /// Removes the expense identified by `id`. Unknown ids are ignored.
    pub fn remove(ledger: &mut ExpenseLedger, id: Uuid) -> Option<Expense> {
        ledger.remove(id)
    }

    /// Turns one occurrence of a recurring spend into a counted expense dated `date`.
    pub fn confirm_recurring(
        ledger: &mut ExpenseLedger,
        config: &BudgetConfiguration,
        cycle: &CycleState,
        spend_id: Uuid,
        date: NaiveDateTime,
    ) -> ServiceResult<Uuid> {
        let spend = config
            .recurring(spend_id)
            .ok_or_else(|| ServiceError::Invalid("Recurring spend not found".into()))?;
        let amount = occurrence_amount(spend, cycle.granularity).ok_or_else(|| {
            ServiceError::Invalid(format!(
                "`{}` does not apply to the {} view",
                spend.description, cycle.granularity
            ))
        })?;
        if cycle.granularity == ViewGranularity::Daily && !spend.applies_on(date.date()) {
            return Err(ServiceError::Invalid(format!(
                "`{}` does not apply on this day",
                spend.description
            )));
        }
        let bounds = cycle
            .index_for(date.date())
            .and_then(|index| cycle.sub_period(index))
            .ok_or_else(|| ServiceError::Invalid("Date is outside the current cycle".into()))?;
        if confirmed_ids(ledger, bounds).contains(&spend.id) {
            return Err(ServiceError::Invalid(format!(
                "`{}` is already confirmed for this period",
                spend.description
            )));
        }
        Ok(ledger.confirm_recurring(spend, amount, date).id)
    }

    fn validate(amount: f64, description: &str, category: &str) -> ServiceResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ServiceError::Invalid("Amount must be greater than zero".into()));
        }
        if description.trim().is_empty() {
            return Err(ServiceError::Invalid("Description is required".into()));
        }
        if category.trim().is_empty() {
            return Err(ServiceError::Invalid("Category is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetMode, RecurringSpend, SpendSchedule};
    use chrono::{NaiveDate, Weekday};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn weekly_setup() -> (BudgetConfiguration, CycleState, Uuid) {
        let lunch = RecurringSpend::new("Lunch", 12.0, "Food", SpendSchedule::times_per_week(2));
        let lunch_id = lunch.id;
        let config = BudgetConfiguration::new(
            BudgetMode::Disposable,
            700.0,
            Some(25),
            ViewGranularity::Weekly,
            at(10, 0).date(),
        )
        .with_recurring(lunch);
        let cycle = CycleState::derive(&config, at(10, 9));
        (config, cycle, lunch_id)
    }

    #[test]
    fn rejects_invalid_input_without_mutating() {
        let mut ledger = ExpenseLedger::new();
        for (amount, description, category) in
            [(0.0, "Lunch", "Food"), (-3.0, "Lunch", "Food"), (5.0, "  ", "Food"), (5.0, "Lunch", "")]
        {
            let err = ExpenseService::add(&mut ledger, amount, description, category, false, at(10, 12))
                .expect_err("invalid expense must be rejected");
            assert!(matches!(err, ServiceError::Invalid(_)), "unexpected error: {err:?}");
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn trims_text_fields() {
        let mut ledger = ExpenseLedger::new();
        let id = ExpenseService::add(&mut ledger, 4.0, " Bus ", " Transport ", true, at(10, 7)).unwrap();
        let expense = ledger.expense(id).unwrap();
        assert_eq!(expense.description, "Bus");
        assert_eq!(expense.category, "Transport");
    }

    #[test]
    fn weekly_confirmation_books_whole_week_amount_once() {
        let (config, cycle, lunch_id) = weekly_setup();
        let mut ledger = ExpenseLedger::new();
        let id = ExpenseService::confirm_recurring(&mut ledger, &config, &cycle, lunch_id, at(11, 12)).unwrap();
        assert_eq!(ledger.expense(id).unwrap().amount, 24.0);

        let err = ExpenseService::confirm_recurring(&mut ledger, &config, &cycle, lunch_id, at(12, 12))
            .expect_err("second confirmation in the same week");
        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("already confirmed")));

        ExpenseService::confirm_recurring(&mut ledger, &config, &cycle, lunch_id, at(18, 12)).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn daily_confirmation_only_on_scheduled_weekdays() {
        let yoga = RecurringSpend::new("Yoga", 15.0, "Health", SpendSchedule::on(vec![Weekday::Thu]));
        let yoga_id = yoga.id;
        let config = BudgetConfiguration::new(
            BudgetMode::Disposable,
            1000.0,
            Some(15),
            ViewGranularity::Daily,
            at(10, 0).date(),
        )
        .with_recurring(yoga);
        let cycle = CycleState::derive(&config, at(10, 9));
        let mut ledger = ExpenseLedger::new();

        // 2024-01-10 is a Wednesday.
        let err = ExpenseService::confirm_recurring(&mut ledger, &config, &cycle, yoga_id, at(10, 18))
            .expect_err("Wednesday is not a yoga day");
        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("does not apply")));
        assert!(ledger.is_empty());

        let id = ExpenseService::confirm_recurring(&mut ledger, &config, &cycle, yoga_id, at(11, 18)).unwrap();
        assert_eq!(ledger.expense(id).unwrap().amount, 15.0);
    }

    #[test]
    fn confirmation_outside_cycle_is_rejected() {
        let (config, cycle, lunch_id) = weekly_setup();
        let mut ledger = ExpenseLedger::new();
        let err = ExpenseService::confirm_recurring(&mut ledger, &config, &cycle, lunch_id, at(26, 12))
            .expect_err("date after the cycle");
        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("outside")));
        assert!(ExpenseService::confirm_recurring(&mut ledger, &config, &cycle, Uuid::new_v4(), at(11, 12)).is_err());
    }
}
