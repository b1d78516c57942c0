pub mod expense_service;
pub mod setup_service;
pub mod summary_service;

pub use expense_service::ExpenseService;
pub use setup_service::SetupService;
pub use summary_service::{AllocationSummary, CategoryBreakdown, SummaryService};

use crate::errors::BudgetError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error("{0}")]
    Invalid(String),
}
