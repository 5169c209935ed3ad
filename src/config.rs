use crate::cli::{Cli, EmptyLists};
use crate::error::ConfigError;
use crate::list::EmptyListPolicy;
use serde::{Deserialize, Serialize};

/// Main configuration combining store and telemetry settings.
///
/// Can be loaded from files, env vars, or CLI args with precedence order:
/// CLI > File > Environment > Defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub empty_lists: EmptyListPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default = "default_enable_metrics")]
    pub enable_metrics: bool,
}

fn default_enable_metrics() -> bool {
    true
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enable_metrics: default_enable_metrics(),
        }
    }
}

impl Config {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// Reads `CORAL_LIST_EMPTY_LISTS` (`retain` or `reclaim`) and
    /// `CORAL_LIST_METRICS` (`true` or `false`).
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(policy) = lookup("CORAL_LIST_EMPTY_LISTS") {
            config.store.empty_lists = match policy.to_ascii_lowercase().as_str() {
                "retain" => EmptyListPolicy::Retain,
                "reclaim" => EmptyListPolicy::Reclaim,
                other => {
                    return Err(ConfigError::Validation(format!(
                        "CORAL_LIST_EMPTY_LISTS must be retain or reclaim, got {other}"
                    )))
                }
            };
        }

        if let Some(flag) = lookup("CORAL_LIST_METRICS") {
            config.telemetry.enable_metrics = flag.parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "CORAL_LIST_METRICS must be true or false, got {flag}"
                ))
            })?;
        }

        Ok(config)
    }

    /// Create config with CLI args taking precedence over environment and file.
    ///
    /// Precedence: CLI > File > Environment > Defaults
    pub fn from_sources(cli: &Cli) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let file_config = cli
            .config
            .as_ref()
            .map(Self::load_from_file)
            .transpose()?;

        Ok(Self::merge(cli, file_config.as_ref(), &env_config))
    }

    fn merge(cli: &Cli, file_config: Option<&Config>, env_config: &Config) -> Self {
        let empty_lists = cli
            .empty_lists
            .as_ref()
            .map(EmptyLists::policy)
            .or_else(|| file_config.map(|c| c.store.empty_lists))
            .unwrap_or(env_config.store.empty_lists);

        let enable_metrics = if cli.no_metrics {
            false
        } else {
            file_config
                .map(|c| c.telemetry.enable_metrics)
                .unwrap_or(env_config.telemetry.enable_metrics)
        };

        Config {
            store: StoreConfig { empty_lists },
            telemetry: TelemetrySettings { enable_metrics },
        }
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.empty_lists, EmptyListPolicy::Retain);
        assert!(config.telemetry.enable_metrics);
    }

    #[test]
    fn test_from_vars() {
        let config = Config::from_vars(vars(&[
            ("CORAL_LIST_EMPTY_LISTS", "Reclaim"),
            ("CORAL_LIST_METRICS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.store.empty_lists, EmptyListPolicy::Reclaim);
        assert!(!config.telemetry.enable_metrics);
    }

    #[test]
    fn test_from_vars_rejects_bad_values() {
        assert!(Config::from_vars(vars(&[("CORAL_LIST_EMPTY_LISTS", "sometimes")])).is_err());
        assert!(Config::from_vars(vars(&[("CORAL_LIST_METRICS", "maybe")])).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"store":{"empty_lists":"reclaim"}}"#).unwrap();
        assert_eq!(config.store.empty_lists, EmptyListPolicy::Reclaim);
        assert!(config.telemetry.enable_metrics);
    }

    #[test]
    fn test_cli_overrides_file_and_env() {
        let cli = Cli::parse_from(["coral-list", "--empty-lists", "retain", "--no-metrics"]);
        let file = Config {
            store: StoreConfig {
                empty_lists: EmptyListPolicy::Reclaim,
            },
            telemetry: TelemetrySettings::default(),
        };

        let config = Config::merge(&cli, Some(&file), &Config::default());
        assert_eq!(config.store.empty_lists, EmptyListPolicy::Retain);
        assert!(!config.telemetry.enable_metrics);
    }

    #[test]
    fn test_file_overrides_env() {
        let cli = Cli::parse_from(["coral-list"]);
        let env = Config::from_vars(vars(&[("CORAL_LIST_EMPTY_LISTS", "reclaim")])).unwrap();
        let file = Config::default();

        assert_eq!(
            Config::merge(&cli, Some(&file), &env).store.empty_lists,
            EmptyListPolicy::Retain
        );
        assert_eq!(
            Config::merge(&cli, None, &env).store.empty_lists,
            EmptyListPolicy::Reclaim
        );
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!("coral-list-config-{}.json", std::process::id()));
        let config = Config {
            store: StoreConfig {
                empty_lists: EmptyListPolicy::Reclaim,
            },
            telemetry: TelemetrySettings {
                enable_metrics: false,
            },
        };

        config.save_to_file(&path).unwrap();
        let loaded = Config::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }
}
