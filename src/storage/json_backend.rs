use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde_json::Value;

use super::{KeyValueStore, Result};
use crate::errors::BudgetError;
use crate::utils::{ensure_dir, PathResolver};

const TMP_SUFFIX: &str = "tmp";

/// Stores each key as a pretty-printed JSON file under `<base>/store/`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let dir = PathResolver::store_dir_in(&base);
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", canonical_name(key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&data).map_err(|err| {
            BudgetError::StorageError(format!("`{}` is not valid JSON: {err}", path.display()))
        })?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let json = serde_json::to_string_pretty(&value)?;
        write_atomic(&self.path_for(key), &json)
    }
}

/// Lowercases and replaces anything outside `[a-z0-9]` so keys map to safe file names.
fn canonical_name(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "record".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    #[test]
    fn set_then_get_returns_same_value() {
        let (store, _guard) = store_with_temp_dir();
        store.set("userExpenses", json!([{"amount": 4.5}])).unwrap();
        assert_eq!(store.get("userExpenses").unwrap(), Some(json!([{"amount": 4.5}])));
        assert!(store.path_for("userExpenses").ends_with("store/userexpenses.json"));
    }

    #[test]
    fn missing_key_is_none() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.get("hasCompletedOnboarding").unwrap(), None);
    }

    #[test]
    fn no_temp_file_is_left_behind() {
        let (store, _guard) = store_with_temp_dir();
        store.set("userBudget", json!({"total_amount": 10.0})).unwrap();
        let leftovers: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().to_string_lossy().ends_with(TMP_SUFFIX))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn corrupt_file_is_reported_as_storage_error() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.path_for("userBudget"), "{not json").unwrap();
        assert!(matches!(
            store.get("userBudget"),
            Err(BudgetError::StorageError(_))
        ));
    }

    #[test]
    fn canonical_name_falls_back_for_symbol_only_keys() {
        assert_eq!(canonical_name("  ###  "), "record");
        assert_eq!(canonical_name("user Budget"), "user_budget");
    }
}
