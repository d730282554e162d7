// ==========================================
// Prospect Intake - Config Manager
// ==========================================
// Responsibility: load, query and override configuration
// Layers (later wins): built-in defaults → JSON file → environment
// → explicit overrides (CLI flags)
// Storage: flat key → text map
// ==========================================

use crate::config::intake_config_trait::IntakeConfigReader;
use crate::db::is_plain_identifier;
use crate::i18n;
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix: `PROSPECT_INTAKE_MIN_AGE_YEARS=21`
pub const ENV_PREFIX: &str = "PROSPECT_INTAKE_";

/// Directory under the platform config dir holding `config.json`
pub const CONFIG_DIR_NAME: &str = "prospect-intake";
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

fn config_value_error(key: &str, value: &str, message: impl Into<String>) -> ImportError {
    ImportError::ConfigValueError {
        key: key.to_string(),
        value: value.to_string(),
        message: message.into(),
    }
}

impl ConfigManager {
    /// Empty manager: every getter returns its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard load used by the CLI
    ///
    /// # Arguments
    /// - config_path: explicit file; must exist when given
    ///
    /// Without an explicit file, `<config_dir>/prospect-intake/config.json`
    /// is read when present. Environment overrides are applied last.
    pub fn load(config_path: Option<&Path>) -> ImportResult<Self> {
        let mut manager = Self::new();

        match config_path {
            Some(path) => manager.merge_json_file(path)?,
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
                    manager.merge_json_file(&path)?;
                }
            }
        }

        manager.apply_env_overrides(std::env::vars());
        Ok(manager)
    }

    /// `<platform config dir>/prospect-intake/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Merge a flat JSON object; scalars are stored as text,
    /// arrays and objects as JSON text
    pub fn merge_json_file(&mut self, path: &Path) -> ImportResult<()> {
        let text = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.merge_json_str(&text).map_err(|e| match e {
            ImportError::JsonError(message) => ImportError::ConfigReadError {
                key: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        debug!(path = %path.display(), "config file merged");
        Ok(())
    }

    pub fn merge_json_str(&mut self, text: &str) -> ImportResult<()> {
        let map: serde_json::Map<String, Value> = serde_json::from_str(text)?;
        for (key, value) in map {
            let text = match value {
                Value::String(s) => s,
                Value::Null => continue,
                other => other.to_string(),
            };
            self.values.insert(key, text);
        }
        Ok(())
    }

    /// Apply `PROSPECT_INTAKE_<KEY>` variables (key lowercased)
    pub fn apply_env_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(key) = name.strip_prefix(ENV_PREFIX) {
                debug!(key = %key.to_lowercase(), "config overridden from environment");
                self.values.insert(key.to_lowercase(), value);
            }
        }
    }

    /// Explicit override (highest precedence)
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key).unwrap_or(default).to_string()
    }

    /// All explicitly set values, sorted by key (logged at startup)
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        let sorted: BTreeMap<&String, &String> = self.values.iter().collect();
        Ok(serde_json::to_string(&sorted)?)
    }

    fn get_identifier(&self, key: &str, default: &str) -> ImportResult<String> {
        let value = self.get_config_or_default(key, default);
        if !is_plain_identifier(&value) {
            return Err(config_value_error(
                key,
                &value,
                "expected a plain SQL identifier",
            ));
        }
        Ok(value)
    }
}

// ==========================================
// IntakeConfigReader implementation
// ==========================================
#[async_trait]
impl IntakeConfigReader for ConfigManager {
    async fn get_locale(&self) -> ImportResult<String> {
        let value = self.get_config_or_default(config_keys::LOCALE, defaults::LOCALE);
        if !i18n::is_supported(&value) {
            return Err(config_value_error(
                config_keys::LOCALE,
                &value,
                format!("supported locales: {}", i18n::SUPPORTED_LOCALES.join(", ")),
            ));
        }
        Ok(value)
    }

    async fn get_min_age_years(&self) -> ImportResult<i64> {
        let value = self.get_config_or_default(config_keys::MIN_AGE_YEARS, defaults::MIN_AGE_YEARS);
        match value.trim().parse::<i64>() {
            Ok(age) if age >= 0 => Ok(age),
            _ => Err(config_value_error(
                config_keys::MIN_AGE_YEARS,
                &value,
                "expected a non-negative integer",
            )),
        }
    }

    async fn get_birth_date_formats(&self) -> ImportResult<Vec<String>> {
        let Some(value) = self.get_config_value(config_keys::BIRTH_DATE_FORMATS) else {
            return Ok(defaults::BIRTH_DATE_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect());
        };

        let formats: Vec<String> = if value.trim_start().starts_with('[') {
            serde_json::from_str(value).map_err(|e| {
                config_value_error(config_keys::BIRTH_DATE_FORMATS, value, e.to_string())
            })?
        } else {
            value
                .split(',')
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect()
        };

        if formats.is_empty() {
            return Err(config_value_error(
                config_keys::BIRTH_DATE_FORMATS,
                value,
                "at least one date format is required",
            ));
        }
        Ok(formats)
    }

    async fn get_postal_lookup_base_url(&self) -> ImportResult<String> {
        let value = self.get_config_or_default(
            config_keys::POSTAL_LOOKUP_BASE_URL,
            defaults::POSTAL_LOOKUP_BASE_URL,
        );
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(config_value_error(
                config_keys::POSTAL_LOOKUP_BASE_URL,
                &value,
                "expected an http:// or https:// URL",
            ));
        }
        Ok(value)
    }

    async fn get_postal_lookup_timeout_secs(&self) -> ImportResult<u64> {
        let value = self.get_config_or_default(
            config_keys::POSTAL_LOOKUP_TIMEOUT_SECS,
            defaults::POSTAL_LOOKUP_TIMEOUT_SECS,
        );
        match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(config_value_error(
                config_keys::POSTAL_LOOKUP_TIMEOUT_SECS,
                &value,
                "expected a positive number of seconds",
            )),
        }
    }

    async fn get_existing_system_table(&self) -> ImportResult<String> {
        self.get_identifier(config_keys::EXISTING_SYSTEM_TABLE, defaults::EXISTING_SYSTEM_TABLE)
    }

    async fn get_existing_system_column(&self) -> ImportResult<String> {
        self.get_identifier(config_keys::EXISTING_SYSTEM_COLUMN, defaults::EXISTING_SYSTEM_COLUMN)
    }

    async fn get_rejected_output_path(&self) -> ImportResult<PathBuf> {
        Ok(PathBuf::from(self.get_config_or_default(
            config_keys::REJECTED_OUTPUT_PATH,
            defaults::REJECTED_OUTPUT_PATH,
        )))
    }

    async fn get_accepted_output_path(&self) -> ImportResult<PathBuf> {
        Ok(PathBuf::from(self.get_config_or_default(
            config_keys::ACCEPTED_OUTPUT_PATH,
            defaults::ACCEPTED_OUTPUT_PATH,
        )))
    }
}

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    pub const LOCALE: &str = "locale";

    // validation
    pub const MIN_AGE_YEARS: &str = "min_age_years";
    pub const BIRTH_DATE_FORMATS: &str = "birth_date_formats";

    // postal lookup
    pub const POSTAL_LOOKUP_BASE_URL: &str = "postal_lookup_base_url";
    pub const POSTAL_LOOKUP_TIMEOUT_SECS: &str = "postal_lookup_timeout_secs";

    // existing system
    pub const EXISTING_SYSTEM_TABLE: &str = "existing_system_table";
    pub const EXISTING_SYSTEM_COLUMN: &str = "existing_system_column";

    // outputs
    pub const REJECTED_OUTPUT_PATH: &str = "rejected_output_path";
    pub const ACCEPTED_OUTPUT_PATH: &str = "accepted_output_path";
}

pub mod defaults {
    pub const LOCALE: &str = "en";
    pub const MIN_AGE_YEARS: &str = "18";
    pub const BIRTH_DATE_FORMATS: [&str; 3] = crate::importer::data_cleaner::DEFAULT_DATE_FORMATS;
    pub const POSTAL_LOOKUP_BASE_URL: &str = "https://viacep.com.br/ws";
    pub const POSTAL_LOOKUP_TIMEOUT_SECS: &str = "10";
    pub const EXISTING_SYSTEM_TABLE: &str = "sistema";
    pub const EXISTING_SYSTEM_COLUMN: &str = "cpf";
    pub const REJECTED_OUTPUT_PATH: &str = "clientes_invalidos.csv";
    pub const ACCEPTED_OUTPUT_PATH: &str = "clientes_para_subir.json";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_defaults() {
        let config = ConfigManager::new();

        assert_eq!(config.get_locale().await.unwrap(), "en");
        assert_eq!(config.get_min_age_years().await.unwrap(), 18);
        assert_eq!(config.get_birth_date_formats().await.unwrap().len(), 3);
        assert_eq!(
            config.get_postal_lookup_base_url().await.unwrap(),
            "https://viacep.com.br/ws"
        );
        assert_eq!(config.get_postal_lookup_timeout_secs().await.unwrap(), 10);
        assert_eq!(config.get_existing_system_table().await.unwrap(), "sistema");
        assert_eq!(config.get_existing_system_column().await.unwrap(), "cpf");
        assert_eq!(
            config.get_rejected_output_path().await.unwrap(),
            PathBuf::from("clientes_invalidos.csv")
        );
    }

    #[tokio::test]
    async fn test_json_then_env_then_explicit() {
        let mut config = ConfigManager::new();
        config
            .merge_json_str(r#"{"min_age_years": 21, "locale": "pt-BR", "birth_date_formats": ["%d/%m/%Y"], "unused": null}"#)
            .unwrap();
        assert_eq!(config.get_min_age_years().await.unwrap(), 21);
        assert_eq!(config.get_birth_date_formats().await.unwrap(), vec!["%d/%m/%Y"]);

        config.apply_env_overrides(vec![
            ("PROSPECT_INTAKE_MIN_AGE_YEARS".to_string(), "16".to_string()),
            ("HOME".to_string(), "/root".to_string()),
        ]);
        assert_eq!(config.get_min_age_years().await.unwrap(), 16);
        assert_eq!(config.get_config_value("home"), None);

        config.set(config_keys::MIN_AGE_YEARS, "30");
        assert_eq!(config.get_min_age_years().await.unwrap(), 30);
        assert_eq!(config.get_locale().await.unwrap(), "pt-BR");
    }

    #[tokio::test]
    async fn test_comma_separated_formats() {
        let mut config = ConfigManager::new();
        config.set(config_keys::BIRTH_DATE_FORMATS, "%d/%m/%Y, %Y-%m-%d");
        assert_eq!(
            config.get_birth_date_formats().await.unwrap(),
            vec!["%d/%m/%Y", "%Y-%m-%d"]
        );
    }

    #[tokio::test]
    async fn test_invalid_values_are_config_errors() {
        let mut config = ConfigManager::new();
        config.set(config_keys::MIN_AGE_YEARS, "eighteen");
        config.set(config_keys::POSTAL_LOOKUP_TIMEOUT_SECS, "0");
        config.set(config_keys::LOCALE, "zh-CN");
        config.set(config_keys::EXISTING_SYSTEM_TABLE, "sistema; DROP TABLE x");
        config.set(config_keys::POSTAL_LOOKUP_BASE_URL, "viacep.com.br");
        config.set(config_keys::BIRTH_DATE_FORMATS, " , ");

        assert!(matches!(
            config.get_min_age_years().await,
            Err(ImportError::ConfigValueError { ref key, .. }) if key == "min_age_years"
        ));
        assert!(config.get_postal_lookup_timeout_secs().await.is_err());
        assert!(config.get_locale().await.is_err());
        assert!(config.get_existing_system_table().await.is_err());
        assert!(config.get_postal_lookup_base_url().await.is_err());
        assert!(config.get_birth_date_formats().await.is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"existing_system_table": "clientes"}}"#).unwrap();

        let config = ConfigManager::load(Some(file.path())).unwrap();

        assert_eq!(config.get_config_value("existing_system_table"), Some("clientes"));
    }

    #[test]
    fn test_load_missing_or_malformed_file() {
        let result = ConfigManager::load(Some(Path::new("/nonexistent/config.json")));
        assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "not json").unwrap();
        let result = ConfigManager::load(Some(file.path()));
        assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));
    }

    #[test]
    fn test_snapshot_is_sorted_json() {
        let mut config = ConfigManager::new();
        config.set("min_age_years", "18");
        config.set("locale", "en");
        assert_eq!(
            config.get_config_snapshot().unwrap(),
            r#"{"locale":"en","min_age_years":"18"}"#
        );
    }
}
