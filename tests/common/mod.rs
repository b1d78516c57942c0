#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use payday_core::{
    core::{BudgetSession, FixedClock},
    domain::{BudgetConfiguration, BudgetMode, ViewGranularity},
    errors::BudgetError,
    storage::{KeyValueStore, MemoryStore},
};
use serde_json::Value;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

pub fn jan(day: u32, hour: u32) -> NaiveDateTime {
    at(2024, 1, day, hour)
}

pub fn disposable(
    total: f64,
    payday: Option<u32>,
    granularity: ViewGranularity,
    configured_on: NaiveDateTime,
) -> BudgetConfiguration {
    BudgetConfiguration::new(BudgetMode::Disposable, total, payday, granularity, configured_on.date())
}

/// Session over an in-memory store with a clock pinned to `now`.
pub fn session_at(now: NaiveDateTime) -> (BudgetSession, Arc<MemoryStore>, Arc<FixedClock>) {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(now));
    let session = BudgetSession::open(store.clone(), clock.clone());
    (session, store, clock)
}

/// Store whose writes always fail; reads see nothing.
#[derive(Debug, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Value>, BudgetError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: Value) -> Result<(), BudgetError> {
        Err(BudgetError::StorageError(format!("disk full while writing `{key}`")))
    }
}

pub fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-6
}
