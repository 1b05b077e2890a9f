use crate::error::{CropCalError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `CROPCAL__ENGINE__PLANTING_GRACE_DAYS=7`.
const ENV_PREFIX: &str = "CROPCAL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub openweathermap: Option<OpenWeatherMapConfig>,
}

/// Tunables for calendar generation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Days added before the optimal start and after the optimal end.
    #[serde(default = "default_planting_grace_days")]
    pub planting_grace_days: i64,
    /// Post-maturity harvest window length.
    #[serde(default = "default_harvest_grace_days")]
    pub harvest_grace_days: i64,
    /// A closed season further away than this is out of season.
    #[serde(default = "default_out_of_season_days")]
    pub out_of_season_days: i64,
    /// NDVI at or above this scores 100 for vegetation health.
    #[serde(default = "default_healthy_ndvi")]
    pub healthy_ndvi: f64,
}

fn default_planting_grace_days() -> i64 {
    5
}

fn default_harvest_grace_days() -> i64 {
    7
}

fn default_out_of_season_days() -> i64 {
    60
}

fn default_healthy_ndvi() -> f64 {
    0.6
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            planting_grace_days: default_planting_grace_days(),
            harvest_grace_days: default_harvest_grace_days(),
            out_of_season_days: default_out_of_season_days(),
            healthy_ndvi: default_healthy_ndvi(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Extra YAML catalog; its crops replace built-ins with the same name.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Skip the embedded catalog entirely.
    #[serde(default)]
    pub exclude_builtin: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DefaultsConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub area_hectares: Option<f64>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl OpenWeatherMapConfig {
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.is_empty() && !self.api_key.starts_with("${")
    }
}

impl Config {
    /// Load configuration, falling back to defaults when no file exists.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(CropCalError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                Some(p)
            }
            None => Self::find_config_path(),
        };

        let content = match config_path {
            Some(ref path) => {
                tracing::info!("Loading configuration from {}", path.display());
                std::fs::read_to_string(path)
                    .map_err(|e| CropCalError::Config(format!("Failed to read config: {}", e)))?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                String::new()
            }
        };

        Self::from_yaml_str(&content)
    }

    /// Parse YAML text, substituting `${VAR}` placeholders and layering
    /// `CROPCAL__*` environment overrides on top.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let settings = config::Config::builder()
            .add_source(config::File::from_str(&content, config::FileFormat::Yaml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Search for config.yaml in the working directory, then the XDG config directory.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("cropcal").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for a user config file (~/.config/cropcal/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropCalError::Config("Cannot determine config directory".into()))?
            .join("cropcal");
        Ok(config_dir.join("config.yaml"))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Usable weather provider settings, if any.
    pub fn weather_provider(&self) -> Option<&OpenWeatherMapConfig> {
        self.openweathermap.as_ref().filter(|c| c.is_usable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.engine.planting_grace_days, 5);
        assert_eq!(config.engine.harvest_grace_days, 7);
        assert_eq!(config.engine.out_of_season_days, 60);
        assert!(config.catalog.path.is_none());
        assert!(config.openweathermap.is_none());
    }

    #[test]
    fn parses_sections() {
        let yaml = r#"
engine:
  planting_grace_days: 3
  healthy_ndvi: 0.7
catalog:
  path: /tmp/crops.yaml
defaults:
  latitude: 28.6
  longitude: 77.2
  area_hectares: 1.5
openweathermap:
  api_key: abc123
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.engine.planting_grace_days, 3);
        assert_eq!(config.engine.harvest_grace_days, 7);
        assert!((config.engine.healthy_ndvi - 0.7).abs() < 1e-9);
        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/crops.yaml")));
        assert_eq!(config.defaults.area_hectares, Some(1.5));
        let owm = config.weather_provider().unwrap();
        assert!(owm.enabled);
        assert_eq!(owm.api_key, "abc123");
    }

    #[test]
    fn unresolved_placeholder_disables_provider() {
        let yaml = "openweathermap:\n  api_key: ${CROPCAL_TEST_UNSET_KEY_9F2A}\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert!(config.openweathermap.is_some());
        assert!(config.weather_provider().is_none());
    }

    #[test]
    fn debug_redacts_api_key() {
        let owm = OpenWeatherMapConfig {
            api_key: "secret".into(),
            enabled: true,
        };
        let debug = format!("{:?}", owm);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
