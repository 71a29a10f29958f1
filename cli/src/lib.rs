use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{Result, eyre::WrapErr as _};
use engine::gemini::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;

pub mod cli;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
const CONFIG_FILE: &str = "sitesmith.ron";

/// Optional settings file, e.g.
///
/// ```ron
/// (
///     gemini_api_key: Some("..."),
///     image_model: Some("gemini-2.0-flash-preview-image-generation"),
///     output_dir: Some("site"),
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub gemini_base_url: Option<String>,
    #[serde(default)]
    pub text_model: Option<String>,
    #[serde(default)]
    pub image_model: Option<String>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "GEMINI_API_KEY environment variable is required (alternatively pass --api-key or set gemini_api_key in sitesmith.ron)"
    )]
    MissingApiKey,
}

/// Everything a run needs, after merging flags, environment and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub prompt: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub text_model: String,
    pub image_model: String,
    pub output_dir: PathBuf,
}

impl Settings {
    /// Flags win over the environment, the environment over the config file.
    pub fn resolve(cli: Cli, env_api_key: Option<String>, config: Config) -> Result<Self, ConfigError> {
        let api_key = non_empty(cli.api_key)
            .or(non_empty(env_api_key))
            .or(non_empty(config.gemini_api_key))
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Settings {
            prompt: cli.prompt,
            api_key,
            base_url: non_empty(config.gemini_base_url),
            text_model: non_empty(cli.text_model)
                .or(non_empty(config.text_model))
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.into()),
            image_model: non_empty(cli.image_model)
                .or(non_empty(config.image_model))
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.into()),
            output_dir: cli
                .output
                .or(config.output_dir)
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into()),
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_local_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// A missing config file (or config dir) just means defaults.
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        Some(path) => {
            debug!("No config file at {}", path.display());
            Ok(Config::default())
        }
        None => {
            debug!("Couldn't determine config dir");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let src = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    ron::from_str(&src).wrap_err_with(|| format!("parsing {}", path.display()))
}
