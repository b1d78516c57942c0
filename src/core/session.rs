//! The budget session: one owner for configuration, categories and expenses.
//!
//! Derived state (cycle, allowance plan, status) is recomputed on demand from the
//! owned records and the clock, so reads never mutate anything.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::cycle::CycleState;
use super::plan::AllowancePlan;
use super::redistribution::{OverspendEvent, OverspendMonitor};
use super::services::{
    AllocationSummary, CategoryBreakdown, ExpenseService, ServiceError, ServiceResult,
    SetupService, SummaryService,
};
use super::status::PeriodStatus;
use super::time::Clock;
use crate::domain::{BudgetConfiguration, CategoryList, Expense, NamedEntity, ViewGranularity};
use crate::ledger::recurring::{pending_total, unconfirmed_for_sub_period};
use crate::ledger::{DateWindow, ExpenseLedger};
use crate::notify::StatusNotice;
use crate::storage::{
    load_record, save_record, KeyValueStore, BUDGET_KEY, CATEGORIES_KEY, EXPENSES_KEY,
    ONBOARDING_KEY,
};

/// Result of logging an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseOutcome {
    pub expense_id: Uuid,
    /// Set when this expense tipped its sub-period over budget.
    pub overspend: Option<OverspendEvent>,
}

/// A recurring spend the user may confirm for the viewed sub-period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingSuggestion {
    pub spend_id: Uuid,
    pub description: String,
    pub category: String,
    pub amount: f64,
}

/// Snapshot of the viewed sub-period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub sub_period_index: usize,
    pub sub_period_count: usize,
    pub is_today: bool,
    pub granularity: ViewGranularity,
    pub days_remaining: u32,
    /// `None` for an undated budget.
    pub window: Option<DateWindow>,
    /// Allowance from the user's plan before overspend was spread forward.
    pub planned_allowance: f64,
    pub period: PeriodStatus,
    pub expenses: Vec<Expense>,
    pub pending_recurring: Vec<PendingSuggestion>,
    /// Planned but unconfirmed money, not counted as spent.
    pub pending_total: f64,
    pub redistributed: f64,
    pub unrecovered: f64,
    pub currency_symbol: String,
}

pub struct BudgetSession {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    budget: Option<BudgetConfiguration>,
    categories: CategoryList,
    ledger: ExpenseLedger,
    onboarded: bool,
    /// `None` follows today's sub-period.
    selected: Option<usize>,
    monitor: OverspendMonitor,
}

impl BudgetSession {
    /// Loads whatever the store holds. Unreadable records are logged and replaced by
    /// empty defaults.
    pub fn open(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let budget: Option<BudgetConfiguration> = load_or_log(store.as_ref(), BUDGET_KEY);
        let categories = load_or_log(store.as_ref(), CATEGORIES_KEY).unwrap_or_else(|| {
            budget
                .as_ref()
                .map(|config| CategoryList::defaults_for(config.mode))
                .unwrap_or_default()
        });
        let ledger: ExpenseLedger = load_or_log(store.as_ref(), EXPENSES_KEY).unwrap_or_default();
        let onboarded = load_or_log(store.as_ref(), ONBOARDING_KEY).unwrap_or(false);
        tracing::info!(
            configured = budget.is_some(),
            expenses = ledger.len(),
            onboarded,
            "budget session opened"
        );
        Self {
            monitor: OverspendMonitor::new(ledger.len()),
            store,
            clock,
            budget,
            categories,
            ledger,
            onboarded,
            selected: None,
        }
    }

    pub fn budget(&self) -> Option<&BudgetConfiguration> {
        self.budget.as_ref()
    }

    pub fn categories(&self) -> &CategoryList {
        &self.categories
    }

    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.onboarded
    }

    /// Stores a validated configuration and marks onboarding complete.
    pub fn complete_setup(&mut self, config: BudgetConfiguration) -> ServiceResult<()> {
        SetupService::validate(&config)?;
        let mode_changed = self
            .budget
            .as_ref()
            .map_or(true, |previous| previous.mode != config.mode);
        if self.categories.is_empty() || mode_changed {
            self.categories = CategoryList::defaults_for(config.mode);
            self.persist(CATEGORIES_KEY, &self.categories);
        }
        tracing::info!(
            mode = %config.mode,
            total = config.total_amount,
            granularity = %config.view_granularity,
            "budget setup completed"
        );
        self.persist(BUDGET_KEY, &config);
        self.budget = Some(config);
        self.onboarded = true;
        self.persist(ONBOARDING_KEY, &true);
        self.selected = None;
        self.monitor = OverspendMonitor::new(self.ledger.len());
        Ok(())
    }

    pub fn add_custom_category(&mut self, name: &str) -> ServiceResult<()> {
        SetupService::add_custom_category(&mut self.categories, name)?;
        self.persist(CATEGORIES_KEY, &self.categories);
        Ok(())
    }

    pub fn toggle_category(&mut self, name: &str) -> ServiceResult<bool> {
        let active = SetupService::toggle_category(&mut self.categories, name)?;
        self.persist(CATEGORIES_KEY, &self.categories);
        Ok(active)
    }

    pub fn add_expense(
        &mut self,
        amount: f64,
        description: &str,
        category: &str,
        necessary: bool,
    ) -> ServiceResult<ExpenseOutcome> {
        let now = self.clock.now();
        self.add_expense_at(amount, description, category, necessary, now)
    }

    pub fn add_expense_at(
        &mut self,
        amount: f64,
        description: &str,
        category: &str,
        necessary: bool,
        date: NaiveDateTime,
    ) -> ServiceResult<ExpenseOutcome> {
        let expense_id =
            ExpenseService::add(&mut self.ledger, amount, description, category, necessary, date)?;
        tracing::debug!(%expense_id, amount, category, "expense added");
        self.persist(EXPENSES_KEY, &self.ledger);
        let overspend = self.observe_overspend();
        Ok(ExpenseOutcome {
            expense_id,
            overspend,
        })
    }

    /// Removes an expense; unknown ids change nothing.
    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let removed = ExpenseService::remove(&mut self.ledger, id)?;
        tracing::debug!(expense_id = %id, "expense removed");
        self.persist(EXPENSES_KEY, &self.ledger);
        self.observe_overspend();
        Some(removed)
    }

    pub fn confirm_recurring(&mut self, spend_id: Uuid) -> ServiceResult<ExpenseOutcome> {
        let now = self.clock.now();
        self.confirm_recurring_at(spend_id, now)
    }

    pub fn confirm_recurring_at(
        &mut self,
        spend_id: Uuid,
        date: NaiveDateTime,
    ) -> ServiceResult<ExpenseOutcome> {
        let config = self
            .budget
            .as_ref()
            .ok_or_else(|| ServiceError::Invalid("Budget is not set up yet".into()))?;
        let cycle = CycleState::derive(config, self.clock.now());
        let expense_id =
            ExpenseService::confirm_recurring(&mut self.ledger, config, &cycle, spend_id, date)?;
        tracing::debug!(%expense_id, %spend_id, "recurring spend confirmed");
        self.persist(EXPENSES_KEY, &self.ledger);
        let overspend = self.observe_overspend();
        Ok(ExpenseOutcome {
            expense_id,
            overspend,
        })
    }

    pub fn cycle_state(&self) -> Option<CycleState> {
        self.budget
            .as_ref()
            .map(|config| CycleState::derive(config, self.clock.now()))
    }

    pub fn plan(&self) -> Option<AllowancePlan> {
        let config = self.budget.as_ref()?;
        let cycle = CycleState::derive(config, self.clock.now());
        Some(AllowancePlan::derive(config, &cycle, &self.ledger))
    }

    /// Sub-period being viewed, clamped to the running cycle.
    pub fn selected_index(&self) -> usize {
        match self.cycle_state() {
            Some(cycle) => self.selected.unwrap_or(cycle.today_index).min(cycle.last_index()),
            None => 0,
        }
    }

    pub fn select_next(&mut self) -> usize {
        let Some(cycle) = self.cycle_state() else {
            return 0;
        };
        let next = (self.selected_index() + 1).min(cycle.last_index());
        self.selected = Some(next);
        next
    }

    pub fn select_previous(&mut self) -> usize {
        let previous = self.selected_index().saturating_sub(1);
        if self.budget.is_some() {
            self.selected = Some(previous);
        }
        previous
    }

    pub fn select_today(&mut self) -> usize {
        self.selected = None;
        self.selected_index()
    }

    /// Snapshot of the viewed sub-period; `None` before setup.
    pub fn dashboard(&self) -> Option<Dashboard> {
        let config = self.budget.as_ref()?;
        let cycle = CycleState::derive(config, self.clock.now());
        let plan = AllowancePlan::derive(config, &cycle, &self.ledger);
        let index = self.selected.unwrap_or(cycle.today_index).min(cycle.last_index());
        let pending = unconfirmed_for_sub_period(&config.recurring_spends, &self.ledger, &cycle, index);
        let pending_amount = pending_total(&pending);
        let pending_recurring = pending
            .into_iter()
            .map(|pending| PendingSuggestion {
                spend_id: pending.spend.id,
                description: pending.spend.name().to_string(),
                category: pending.spend.category.clone(),
                amount: pending.amount,
            })
            .collect();
        Some(Dashboard {
            sub_period_index: index,
            sub_period_count: cycle.sub_period_count,
            is_today: index == cycle.today_index,
            granularity: cycle.granularity,
            days_remaining: cycle.days_remaining(),
            window: cycle.sub_period(index).and_then(|bounds| bounds.window()),
            planned_allowance: plan.user_plan.get(index),
            period: plan.status(index),
            expenses: self
                .ledger
                .expenses_for_sub_period(&cycle, index)
                .into_iter()
                .cloned()
                .collect(),
            pending_recurring,
            pending_total: pending_amount,
            redistributed: plan.report.redistributed(),
            unrecovered: plan.report.unrecovered(),
            currency_symbol: config.currency.symbol.clone(),
        })
    }

    /// Status of today's sub-period for the notification layer.
    pub fn status_notice(&self) -> Option<StatusNotice> {
        let config = self.budget.as_ref()?;
        let now = self.clock.now();
        let cycle = CycleState::derive(config, now);
        let plan = AllowancePlan::derive(config, &cycle, &self.ledger);
        let period = plan.status(cycle.today_index);
        Some(StatusNotice {
            status: period.status,
            remaining_amount: period.remaining,
            currency_symbol: config.currency.symbol.clone(),
            sub_period_index: cycle.today_index,
            date: now.date(),
        })
    }

    pub fn category_breakdown(&self) -> Vec<CategoryBreakdown> {
        match (self.budget.as_ref(), self.cycle_state()) {
            (Some(config), Some(cycle)) => {
                SummaryService::category_breakdown(config, &cycle, &self.ledger)
            }
            _ => Vec::new(),
        }
    }

    pub fn allocation(&self) -> Option<AllocationSummary> {
        self.budget.as_ref().map(SummaryService::allocation)
    }

    fn observe_overspend(&mut self) -> Option<OverspendEvent> {
        let Some(config) = self.budget.as_ref() else {
            self.monitor = OverspendMonitor::new(self.ledger.len());
            return None;
        };
        let cycle = CycleState::derive(config, self.clock.now());
        let plan = AllowancePlan::derive(config, &cycle, &self.ledger);
        let event = self.monitor.observe(&self.ledger, &cycle, &plan.effective);
        if let Some(event) = &event {
            if event.unrecoverable {
                tracing::warn!(
                    sub_period = event.sub_period_index,
                    overspent = event.overspent_amount,
                    "overspend cannot be recovered this cycle"
                );
            } else {
                tracing::info!(
                    sub_period = event.sub_period_index,
                    overspent = event.overspent_amount,
                    "overspend spread over the remaining sub-periods"
                );
            }
        }
        event
    }

    fn persist<T: Serialize>(&self, key: &str, record: &T) {
        if let Err(err) = save_record(self.store.as_ref(), key, record) {
            tracing::warn!(key, error = %err, "failed to persist record; keeping in-memory state");
        }
    }
}

fn load_or_log<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match load_record(store, key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to load record; starting empty");
            None
        }
    }
}
