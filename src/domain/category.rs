//! Spending categories offered during setup.

use serde::{Deserialize, Serialize};

use super::common::{BudgetMode, NamedEntity};

pub const ENTIRE_BUDGET_CATEGORIES: [&str; 11] = [
    "Housing",
    "Transport",
    "Food",
    "Bills & Subscriptions",
    "Personal",
    "Health",
    "Education",
    "Lifestyle & Fun",
    "Family & Dependents",
    "Financial",
    "Gifts & Donations",
];

pub const DISPOSABLE_CATEGORIES: [&str; 5] = [
    "Food & Drinks",
    "Transport",
    "Personal & Lifestyle",
    "Social & Gifts",
    "Miscellaneous",
];

/// A named category that can be switched off without being forgotten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default = "Category::default_active")]
    pub active: bool,
    #[serde(default)]
    pub is_custom: bool,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            is_custom: false,
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            is_custom: true,
            ..Self::new(name)
        }
    }

    fn default_active() -> bool {
        true
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered category list persisted alongside the budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl CategoryList {
    /// The built-in category set for a budget mode, all active.
    pub fn defaults_for(mode: BudgetMode) -> Self {
        let names: &[&str] = match mode {
            BudgetMode::EntireBudget => &ENTIRE_BUDGET_CATEGORIES,
            BudgetMode::Disposable => &DISPOSABLE_CATEGORIES,
        };
        Self {
            categories: names.iter().map(|name| Category::new(*name)).collect(),
        }
    }

    pub fn active_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|category| category.active)
            .map(|category| category.name.as_str())
            .collect()
    }

    /// Case-insensitive lookup on the trimmed name.
    pub fn find(&self, name: &str) -> Option<&Category> {
        let normalized = name.trim().to_lowercase();
        self.categories
            .iter()
            .find(|category| category.name().trim().to_lowercase() == normalized)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn push(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Flips the active flag, returning the new state.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let normalized = name.trim().to_lowercase();
        let category = self
            .categories
            .iter_mut()
            .find(|category| category.name.trim().to_lowercase() == normalized)?;
        category.active = !category.active;
        Some(category.active)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
