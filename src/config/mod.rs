use crate::errors::{AppError, AppResult};
use crate::models::object_type::ObjectType;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".rcleanops";
const CONFIG_FILE: &str = "rcleanops.conf";
const DB_FILE: &str = "rcleanops.sqlite";

/// Keys every config file is expected to carry.
pub const KNOWN_KEYS: [&str; 5] = [
    "database",
    "area_unit",
    "currency",
    "default_object_type",
    "upcoming_limit",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Service unit whose price is multiplied by the object area.
    #[serde(default = "default_area_unit")]
    pub area_unit: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub default_object_type: ObjectType,
    /// Number of upcoming work orders shown on the dashboard.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: u32,
}

fn default_area_unit() -> String {
    "sq.m".to_string()
}
fn default_currency() -> String {
    "RUB".to_string()
}
fn default_upcoming_limit() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            area_unit: default_area_unit(),
            currency: default_currency(),
            default_object_type: ObjectType::default(),
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

impl Config {
    /// `~/.rcleanops` on every platform (falls back to the working directory).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE)
    }

    /// Load the configuration file, or defaults when there is none yet.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// `--db` value as a path: `~` expanded, relative names under the config dir.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Create the config directory, write the config file (unless `is_test`)
    /// and return the database path to initialize.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let database = match custom_db {
            Some(name) => Self::resolve_database(name),
            None => Self::database_file(),
        };

        let cfg = Config {
            database: database.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&cfg)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = database.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(cfg)
    }

    /// Keys from `KNOWN_KEYS` absent from the file at `path`.
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        let mapping = read_mapping(path)?;
        Ok(KNOWN_KEYS
            .into_iter()
            .filter(|k| !mapping.contains_key(Value::String((*k).to_string())))
            .collect())
    }

    /// Add the missing keys with their default values, keeping everything
    /// already in the file. Returns the keys that were added.
    pub fn complete_file(path: &Path) -> AppResult<Vec<&'static str>> {
        let missing = Self::missing_keys(path)?;
        if missing.is_empty() {
            return Ok(missing);
        }

        let mut mapping = read_mapping(path)?;
        let defaults = serde_yaml::to_value(Config::default())?;

        for key in &missing {
            let k = Value::String((*key).to_string());
            if let Some(v) = defaults.get(*key) {
                mapping.insert(k, v.clone());
            }
        }

        fs::write(path, serde_yaml::to_string(&Value::Mapping(mapping))?)?;
        Ok(missing)
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: expected a YAML mapping",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("{name}_rcleanops.conf"));
        fs::write(&path, content).expect("write conf");
        path
    }

    #[test]
    fn missing_keys_get_defaults_on_load() {
        let path = temp_conf("cfg_defaults", "database: /tmp/x.sqlite\n");
        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.area_unit, "sq.m");
        assert_eq!(cfg.upcoming_limit, 5);
        assert_eq!(cfg.default_object_type, ObjectType::Office);
        fs::remove_file(path).ok();
    }

    #[test]
    fn complete_file_adds_only_missing_keys() {
        let path = temp_conf(
            "cfg_complete",
            "database: /tmp/y.sqlite\narea_unit: m2\n",
        );
        let added = Config::complete_file(&path).expect("complete");
        assert_eq!(added, vec!["currency", "default_object_type", "upcoming_limit"]);
        assert!(Config::missing_keys(&path).expect("check").is_empty());

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.area_unit, "m2");
        assert_eq!(cfg.database, "/tmp/y.sqlite");
        fs::remove_file(path).ok();
    }
}
