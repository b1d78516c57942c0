use dirs::home_dir;
use std::{
    env, fs,
    io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".payday_core";
const HOME_ENV: &str = "PAYDAY_CORE_HOME";
const STORE_DIR: &str = "store";
const CONFIG_FILE: &str = "config.json";

/// Resolves where the engine keeps its files.
pub struct PathResolver;

impl PathResolver {
    /// An explicit root wins, then `PAYDAY_CORE_HOME`, then `~/.payday_core`.
    pub fn resolve_base(explicit: Option<PathBuf>) -> PathBuf {
        if let Some(root) = explicit {
            return root;
        }
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    /// Directory holding one JSON file per storage key.
    pub fn store_dir_in(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_takes_precedence() {
        let root = PathBuf::from("/tmp/payday-explicit");
        assert_eq!(PathResolver::resolve_base(Some(root.clone())), root);
        assert_eq!(
            PathResolver::store_dir_in(&root),
            PathBuf::from("/tmp/payday-explicit/store")
        );
    }
}
