//! Expense storage, date windows, and recurring-spend confirmation helpers.

pub mod expense_ledger;
pub mod recurring;
pub mod window;

pub use expense_ledger::ExpenseLedger;
pub use recurring::{occurrence_amount, unconfirmed_for_sub_period, PendingRecurring};
pub use window::{DateWindow, DateWindowError};
