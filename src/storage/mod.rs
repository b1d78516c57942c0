//! Key-value persistence used by the session.
//!
//! Values are plain JSON. The engine writes through on every mutation and treats
//! the in-memory state as authoritative when a write fails.

pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::BudgetError;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Budget configuration, with recurring spends embedded.
pub const BUDGET_KEY: &str = "userBudget";
pub const CATEGORIES_KEY: &str = "userCategories";
pub const EXPENSES_KEY: &str = "userExpenses";
pub const ONBOARDING_KEY: &str = "hasCompletedOnboarding";

/// Abstraction over backends able to get and set JSON values by key.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

pub fn load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(Value::Null) | None => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

pub fn save_record<T: Serialize>(store: &dyn KeyValueStore, key: &str, record: &T) -> Result<()> {
    store.set(key, serde_json::to_value(record)?)
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
