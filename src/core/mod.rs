//! The budget period engine and the services built on it.

pub mod allowance;
pub mod cycle;
pub mod plan;
pub mod redistribution;
pub mod services;
pub mod session;
pub mod status;
pub mod time;

pub use allowance::{AllowanceDistributor, AllowanceSequence};
pub use cycle::{CycleCalculator, CycleState, CycleWindow, SubPeriodBounds};
pub use plan::AllowancePlan;
pub use redistribution::{
    OverspendEvent, OverspendMonitor, OverspendRedistributor, RedistributionReport,
    RedistributionStep,
};
pub use session::{BudgetSession, Dashboard, ExpenseOutcome};
pub use status::{BudgetStatus, PeriodStatus, PeriodStatusEvaluator};
pub use time::{Clock, FixedClock, SystemClock};

/// Tolerance for comparing money amounts.
pub const MONEY_EPSILON: f64 = 1e-9;
