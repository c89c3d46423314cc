use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

use super::model::{BuildConfig, Config};

const CONFIG_FILE: &str = "admin-view.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigSer {
    pub build: Option<BuildSer>,
}

#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildSer {
    #[serde(rename = "content-types")]
    pub content_types: Option<String>,
    #[serde(rename = "default-views")]
    pub default_views: Option<bool>,
}

impl TryFrom<ConfigSer> for Config {
    type Error = anyhow::Error;

    fn try_from(config: ConfigSer) -> Result<Self, Self::Error> {
        Ok(Config {
            build: config
                .build
                .map(BuildConfig::try_from)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

impl TryFrom<BuildSer> for BuildConfig {
    type Error = anyhow::Error;

    fn try_from(config: BuildSer) -> Result<Self, Self::Error> {
        let content_types = match config.content_types {
            Some(path) if path.trim().is_empty() => {
                return Err(anyhow!("`content-types` must not be empty"));
            }
            Some(path) => Some(PathBuf::from(path)),
            None => None,
        };

        Ok(BuildConfig {
            content_types,
            default_views: config.default_views.unwrap_or(true),
        })
    }
}

fn load_config_from_file(path: &Path) -> Result<Config> {
    let toml_str = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read file '{}': {}", path.display(), e))?;
    let config: ConfigSer = toml::from_str(&toml_str)
        .map_err(|e| anyhow!("Failed to parse TOML file '{}': {}", path.display(), e))?;

    config.try_into()
}

pub fn load_config() -> Result<Config> {
    let config_path = Path::new(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(Config::default());
    }

    load_config_from_file(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_test_config(name: &str) -> Result<Config> {
        let test_configs_dir =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("src/config/test-configs");
        let file_path = test_configs_dir.join(format!("{}.toml", name));
        load_config_from_file(&file_path)
    }

    #[test]
    fn test_load_config() {
        let config = load_test_config("empty").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.build.default_views);
    }

    #[test]
    fn test_load_build_config() {
        let config = load_test_config("build").unwrap();
        assert_eq!(
            config,
            Config {
                build: BuildConfig {
                    content_types: Some(PathBuf::from("schema/content-types.json")),
                    default_views: false,
                },
            }
        );
    }

    #[test]
    fn test_load_config_with_unknown_key() {
        let error = load_test_config("unknown-key").unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse TOML file"));
    }

    #[test]
    fn test_load_config_with_empty_path() {
        let error = load_test_config("empty-path").unwrap_err();
        assert_eq!(error.to_string(), "`content-types` must not be empty");
    }
}
