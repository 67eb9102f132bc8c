use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{default_cities, City, CityCatalog};
use crate::error::AppError;
use crate::presentation::{Presentation, Rgb};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "flat-prices.toml";

/// Prefix of environment overrides, e.g. `FLAT_PRICES__MODEL__PATH`
pub const ENV_PREFIX: &str = "FLAT_PRICES";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub presentation: PresentationConfig,
    pub logging: LoggingConfig,
    pub cities: Vec<City>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            presentation: PresentationConfig::default(),
            logging: LoggingConfig::default(),
            cities: default_cities(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
    /// Compare the model's feature names with the feature vector at startup
    pub validate_schema: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("xgb_model.json"),
            validate_schema: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// City drawn in the highlight color; empty disables highlighting
    pub highlight_city: Option<String>,
    pub currency: String,
    pub highlight_color: String,
    pub bar_color: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            highlight_city: Some("Kraków".to_string()),
            currency: "PLN".to_string(),
            highlight_color: "#ffcccc".to_string(),
            bar_color: "#cce7ff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
    /// Log file; required for any log output from the dashboard
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn catalog(&self) -> Result<CityCatalog, AppError> {
        CityCatalog::new(self.cities.clone())
    }

    pub fn presentation(&self) -> Result<Presentation, AppError> {
        Presentation::from_config(&self.presentation)
    }
}

/// Load configuration from `path` (or the default file when absent) plus environment overrides
///
/// An explicitly given file must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let file = match path {
        Some(p) => config::File::from(p)
            .format(config::FileFormat::Toml)
            .required(true),
        None => config::File::from(Path::new(DEFAULT_CONFIG_FILE))
            .format(config::FileFormat::Toml)
            .required(false),
    };

    let config = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.model.path.as_os_str().is_empty() {
        anyhow::bail!("Model path cannot be empty");
    }

    // Duplicate codes and names are rejected by the catalog itself
    cfg.catalog()?;

    if cfg.presentation.currency.trim().is_empty() {
        anyhow::bail!("Currency suffix cannot be empty");
    }
    cfg.presentation.highlight_color.parse::<Rgb>()?;
    cfg.presentation.bar_color.parse::<Rgb>()?;

    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}': must be 'text' or 'json'", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(validate_config(&cfg).is_ok());
        assert_eq!(cfg.cities.len(), 15);
        assert_eq!(cfg.model.path, PathBuf::from("xgb_model.json"));
        assert_eq!(cfg.presentation.highlight_city.as_deref(), Some("Kraków"));
    }

    #[test]
    fn test_validate_config_rejects_duplicate_city_codes() {
        let mut cfg = Config::default();
        cfg.cities.push(City::new(3, "Sopot"));

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Duplicate city code 3"));
    }

    #[test]
    fn test_validate_config_rejects_bad_color() {
        let mut cfg = Config::default();
        cfg.presentation.bar_color = "blue".to_string();

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("Invalid color 'blue'"));
    }

    #[test]
    fn test_validate_config_rejects_empty_currency() {
        let mut cfg = Config::default();
        cfg.presentation.currency = " ".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_log_format() {
        let mut cfg = Config::default();
        cfg.logging.format = "xml".to_string();
        assert!(validate_config(&cfg)
            .unwrap_err()
            .to_string()
            .contains("Invalid log format"));
    }
}
