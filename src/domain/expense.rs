//! Logged, counted spending.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Amounted, Identifiable};
use super::recurring::RecurringSpend;

/// A dated expense in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub necessary: bool,
    pub date: NaiveDateTime,
    /// Set when the expense confirms a recurring spend. Lookup only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_spend_id: Option<Uuid>,
}

impl Expense {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        necessary: bool,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            description: description.into(),
            category: category.into(),
            necessary,
            date,
            recurring_spend_id: None,
        }
    }

    /// Materializes one occurrence of a recurring spend.
    pub fn from_recurring(spend: &RecurringSpend, amount: f64, date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            description: spend.description.clone(),
            category: spend.category.clone(),
            necessary: true,
            date,
            recurring_spend_id: Some(spend.id),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}
