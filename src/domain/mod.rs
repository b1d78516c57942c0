//! Plain data records: budget setup, categories, expenses and recurring spends.
//! No I/O and no derived state.

pub mod budget;
pub mod category;
pub mod common;
pub mod expense;
pub mod recurring;

pub use budget::BudgetConfiguration;
pub use category::{Category, CategoryList};
pub use common::{
    find_by_id, total_amount, Amounted, BudgetMode, Currency, Identifiable, NamedEntity,
    ViewGranularity,
};
pub use expense::Expense;
pub use recurring::{RecurringSpend, SpendSchedule};
