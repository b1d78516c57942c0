use serde::{Deserialize, Serialize};

use crate::core::cycle::CycleState;
use crate::domain::{BudgetConfiguration, BudgetMode};
use crate::ledger::{DateWindow, ExpenseLedger};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub total: f64,
    pub allocated: f64,
    pub unallocated: f64,
    pub over_allocated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn allocation(config: &BudgetConfiguration) -> AllocationSummary {
        AllocationSummary {
            total: config.total_amount,
            allocated: config.allocated(),
            unallocated: config.unallocated(),
            over_allocated: config.is_over_allocated(),
        }
    }

    /// Budget versus spend per category over the running cycle. Empty in disposable mode.
    pub fn category_breakdown(
        config: &BudgetConfiguration,
        cycle: &CycleState,
        ledger: &ExpenseLedger,
    ) -> Vec<CategoryBreakdown> {
        if config.mode != BudgetMode::EntireBudget {
            return Vec::new();
        }
        let window = cycle
            .window
            .and_then(|window| DateWindow::new(window.cycle_start, window.reset_date).ok());
        let spent = ledger.spend_by_category(window);
        config
            .category_budgets
            .iter()
            .map(|(name, budgeted)| {
                let spent = spent.get(name).copied().unwrap_or(0.0);
                CategoryBreakdown {
                    name: name.clone(),
                    budgeted: *budgeted,
                    spent,
                    remaining: budgeted - spent,
                }
            })
            .collect()
    }
}
