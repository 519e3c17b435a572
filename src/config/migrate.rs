//! Configuration file maintenance: detect keys missing from an older
//! `metahub.conf` and fill them in with their defaults.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every key a current config file is expected to carry.
fn expected_keys() -> AppResult<Mapping> {
    let defaults = serde_yaml::to_value(Config::default())?;
    match defaults {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

/// Return the names of the keys absent from the YAML document at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let current: Value = serde_yaml::from_str(&content)?;
    let map = current
        .as_mapping()
        .ok_or_else(|| AppError::Config(format!("{} is not a YAML mapping", path.display())))?;

    Ok(expected_keys()?
        .keys()
        .filter(|k| !map.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Insert defaults for missing keys, keeping every existing value untouched.
/// Returns the list of keys that were added.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let mut current: Value = serde_yaml::from_str(&content)?;

    let map = current
        .as_mapping_mut()
        .ok_or_else(|| AppError::Config(format!("{} is not a YAML mapping", path.display())))?;

    let mut added = Vec::new();
    for (key, value) in expected_keys()? {
        if !map.contains_key(&key) {
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
            map.insert(key, value);
        }
    }

    if added.is_empty() {
        info("Configuration is up to date.");
        return Ok(added);
    }

    fs::write(path, serde_yaml::to_string(&current)?)?;
    success(format!("Configuration migrated: added {}", added.join(", ")));
    Ok(added)
}
