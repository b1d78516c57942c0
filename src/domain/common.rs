//! Shared traits and enums for budgeting primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored by the engine.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Looks up an entity by id.
pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// Sums the amounts of `items`.
pub fn total_amount<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(Amounted::amount).sum()
}

/// Size of the slices a pay cycle is divided into.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewGranularity {
    Daily,
    Weekly,
    /// The whole cycle is a single allowance.
    #[default]
    None,
}

impl fmt::Display for ViewGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewGranularity::Daily => "Daily",
            ViewGranularity::Weekly => "Weekly",
            ViewGranularity::None => "Whole cycle",
        };
        f.write_str(label)
    }
}

/// How the configured total is interpreted.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetMode {
    /// The total is the whole budget, split across spending categories.
    EntireBudget,
    /// The total is the leftover income after fixed costs.
    #[default]
    Disposable,
}

impl fmt::Display for BudgetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetMode::EntireBudget => "Entire budget",
            BudgetMode::Disposable => "Disposable income",
        };
        f.write_str(label)
    }
}

/// Display-only currency label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Currency {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into().to_uppercase(),
            symbol: symbol.into(),
        }
    }

    /// Renders an amount with two decimals, sign first.
    pub fn format(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.symbol, amount.abs())
        } else {
            format!("{}{:.2}", self.symbol, amount)
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new("USD", "$")
    }
}
