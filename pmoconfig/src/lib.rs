//! # PMOMusic Configuration Module
//!
//! This module provides configuration management for the PMOMusic sources:
//! - Loading configuration from YAML files
//! - Merging with an embedded default configuration
//! - Environment variable overrides (`PMOMUSIC_CONFIG__SECTION__KEY=value`)
//! - Path-based getters and setters for configuration values
//!
//! Source crates extend [`Config`] through extension traits
//! (see `pmospotify::SpotifyConfigExt`) rather than adding getters here.
//!
//! ## Usage
//!
//! ```no_run
//! use pmoconfig::Config;
//!
//! let config = Config::load_config("")?;
//! let enabled = config.get_value(&["sources", "spotify", "enabled"])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, info};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("pmomusic.yaml");

const ENV_CONFIG_DIR: &str = "PMOMUSIC_CONFIG";
const ENV_PREFIX: &str = "PMOMUSIC_CONFIG__";

/// Configuration manager for PMOMusic
///
/// Holds the merged YAML tree behind a mutex. A configuration loaded from a
/// directory writes itself back to `config.yaml` on every change; one built
/// with [`Config::from_yaml_str`] lives in memory only.
#[derive(Debug)]
pub struct Config {
    path: Option<PathBuf>,
    data: Mutex<Value>,
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> PathBuf {
        // 1. Try provided directory
        if !directory.is_empty() {
            return PathBuf::from(directory);
        }

        // 2. Try environment variable
        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return PathBuf::from(env_path);
        }

        // 3. Try current directory
        if Path::new(".pmomusic").exists() {
            return PathBuf::from(".pmomusic");
        }

        // 4. Try home directory
        if let Some(home) = home_dir() {
            let home_config = home.join(".pmomusic");
            if home_config.exists() {
                return home_config;
            }
        }

        PathBuf::from(".pmomusic")
    }

    fn validate_config_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        if !path.is_dir() {
            return Err(anyhow!(
                "Configuration path {} is not a directory",
                path.display()
            ));
        }

        Ok(())
    }

    /// Loads the configuration from the specified directory
    ///
    /// This method:
    /// 1. Determines the configuration directory (`directory`, then
    ///    `$PMOMUSIC_CONFIG`, then `./.pmomusic`, then `~/.pmomusic`)
    /// 2. Loads the default embedded configuration
    /// 3. Merges it with the external `config.yaml` file if present
    /// 4. Applies environment variable overrides
    /// 5. Saves the merged configuration
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::find_config_dir(directory);
        Self::validate_config_dir(&config_dir)?;
        info!(config_dir = %config_dir.display(), "Using config directory");

        let path = config_dir.join("config.yaml");

        let mut value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;
        match fs::read(&path) {
            Ok(data) => {
                info!(config_file = %path.display(), "Loaded config file");
                let external: Value = serde_yaml::from_slice(&data)?;
                merge_yaml(&mut value, &external);
            }
            Err(_) => {
                info!(config_file = %path.display(), "Config file not found, using default embedded config");
            }
        }

        let mut value = lower_keys_value(value);
        apply_overrides(&mut value, env::vars());

        let config = Config {
            path: Some(path),
            data: Mutex::new(value),
        };
        config.save()?;
        Ok(config)
    }

    /// Builds an in-memory configuration from a YAML document merged over
    /// the embedded defaults. Nothing is read from or written to disk and
    /// environment overrides are not applied.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;
        if !yaml.trim().is_empty() {
            let external: Value = serde_yaml::from_str(yaml)?;
            merge_yaml(&mut value, &external);
        }

        Ok(Config {
            path: None,
            data: Mutex::new(lower_keys_value(value)),
        })
    }

    /// Path of the backing `config.yaml`, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Saves the current configuration to the config.yaml file
    ///
    /// In-memory configurations are left untouched.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let yaml = {
            let data = self.lock()?;
            serde_yaml::to_string(&*data)?
        };
        fs::write(path, yaml)?;
        debug!(config_file = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Sets a configuration value at the specified path and saves it
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["sources", "spotify", "enabled"]`)
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        {
            let mut data = self.lock()?;
            set_value_internal(&mut data, path, value)?;
        }
        self.save()
    }

    /// Gets a configuration value at the specified path
    ///
    /// Returns an error if the path doesn't exist.
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.lock()?;
        get_value_internal(&data, path)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Value>> {
        self.data
            .lock()
            .map_err(|_| anyhow!("Configuration lock poisoned"))
    }
}

fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
    let Some((first, rest)) = path.split_first() else {
        *data = value;
        return Ok(());
    };
    let Value::Mapping(map) = data else {
        return Err(anyhow!("Current node is not a map"));
    };

    let key = Value::String(first.to_lowercase());
    if rest.is_empty() {
        map.insert(key, value);
        Ok(())
    } else {
        let entry = map.entry(key).or_insert(Value::Mapping(Mapping::new()));
        set_value_internal(entry, rest, value)
    }
}

fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
    let mut current = data;
    for (i, key) in path.iter().enumerate() {
        let Value::Mapping(map) = current else {
            return Err(anyhow!("Path {} is not a mapping", path[..i].join(".")));
        };
        current = map
            .get(Value::String(key.to_lowercase()))
            .ok_or_else(|| anyhow!("Path {} does not exist", path[..=i].join(".")))?;
    }
    Ok(current.clone())
}

/// Applies `PMOMUSIC_CONFIG__A__B=value` style overrides to the tree.
///
/// Values are parsed as YAML scalars, so `false` and `42` keep their type.
fn apply_overrides(config: &mut Value, vars: impl IntoIterator<Item = (String, String)>) {
    for (key, value) in vars {
        let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let key_path = stripped.split("__").collect::<Vec<_>>();
        let yaml_value = serde_yaml::from_str::<Value>(&value).unwrap_or(Value::String(value));
        if let Err(err) = set_value_internal(config, &key_path, yaml_value) {
            tracing::warn!(variable = %key, error = %err, "Ignoring configuration override");
        }
    }
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lower_keys_value(v))
                })
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}

/// Merges external YAML configuration into default configuration
///
/// Mappings are merged key by key; scalars and sequences from `external`
/// replace the default ones.
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(), // pour les scalaires ou séquences, on remplace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_embedded() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(
            config.get_value(&["sources", "spotify", "enabled"]).unwrap(),
            Value::Bool(true)
        );
        assert!(config.path().is_none());
    }

    #[test]
    fn test_external_yaml_is_merged_over_defaults() {
        let config = Config::from_yaml_str(
            "sources:\n  spotify:\n    folder_separator: \" > \"\n",
        )
        .unwrap();

        assert_eq!(
            config
                .get_value(&["sources", "spotify", "folder_separator"])
                .unwrap(),
            Value::String(" > ".to_string())
        );
        // Les autres clés par défaut restent présentes
        assert_eq!(
            config.get_value(&["sources", "spotify", "enabled"]).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let config = Config::from_yaml_str("Sources:\n  Spotify:\n    Enabled: false\n").unwrap();
        assert_eq!(
            config.get_value(&["SOURCES", "spotify", "ENABLED"]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let config = Config::from_yaml_str("").unwrap();
        let err = config.get_value(&["sources", "nowhere", "key"]).unwrap_err();
        assert!(err.to_string().contains("sources.nowhere"));
    }

    #[test]
    fn test_set_value_creates_intermediate_maps() {
        let config = Config::from_yaml_str("").unwrap();
        config
            .set_value(&["sources", "other", "nested", "key"], Value::from(42))
            .unwrap();
        assert_eq!(
            config
                .get_value(&["sources", "other", "nested", "key"])
                .unwrap(),
            Value::from(42)
        );
    }

    #[test]
    fn test_overrides_keep_yaml_types() {
        let mut value = lower_keys_value(serde_yaml::from_str(DEFAULT_CONFIG).unwrap());
        apply_overrides(
            &mut value,
            vec![
                (
                    "PMOMUSIC_CONFIG__sources__spotify__enabled".to_string(),
                    "false".to_string(),
                ),
                ("UNRELATED".to_string(), "1".to_string()),
            ],
        );

        assert_eq!(
            get_value_internal(&value, &["sources", "spotify", "enabled"]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_load_config_writes_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "sources:\n  spotify:\n    folder_separator: \"|\"\n",
        )
        .unwrap();

        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(
            config
                .get_value(&["sources", "spotify", "folder_separator"])
                .unwrap(),
            Value::String("|".to_string())
        );

        config
            .set_value(&["sources", "spotify", "enabled"], Value::Bool(false))
            .unwrap();

        let reloaded = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(
            reloaded
                .get_value(&["sources", "spotify", "enabled"])
                .unwrap(),
            Value::Bool(false)
        );
    }
}
