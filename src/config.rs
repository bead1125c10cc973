use anyhow::{Context, Result};
use macroplan_core::MacroTotals;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
}

/// Gemini API settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model used for meal planning and macro extraction
    pub name: String,

    /// API key; falls back to the GEMINI_API_KEY environment variable
    pub api_key: Option<String>,

    pub base_url: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            name: "gemini-1.5-flash".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

impl ModelConfig {
    /// Resolve the API key from config, falling back to the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(ref key) = self.api_key {
            return Ok(key.clone());
        }

        std::env::var("GEMINI_API_KEY").context(
            "No API key configured.\n\n\
            Either set the GEMINI_API_KEY environment variable, or add it to config.toml:\n\n\
            [model]\n\
            api_key = \"your-api-key\"",
        )
    }
}

/// Get the config directory path (~/.config/macroplan)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("macroplan");
    Ok(config_dir)
}

/// Get the config file path (~/.config/macroplan/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the running-totals state path (~/.config/macroplan/totals.json)
pub fn totals_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("totals.json"))
}

/// Load config from ~/.config/macroplan/config.toml.
///
/// A missing file is not an error: the defaults work as long as
/// GEMINI_API_KEY is set.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}

/// Load the running totals; a missing state file means a fresh zero
/// accumulator.
pub fn load_totals(path: &Path) -> Result<MacroTotals> {
    if !path.exists() {
        return Ok(MacroTotals::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read totals file at {}", path.display()))?;

    let totals: MacroTotals = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse totals file at {}", path.display()))?;

    Ok(totals)
}

/// Save the running totals for the next accumulate call.
pub fn save_totals(path: &Path, totals: &MacroTotals) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory at {}", parent.display())
        })?;
    }

    let contents = serde_json::to_string_pretty(totals).context("Failed to serialize totals")?;

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write totals file at {}", path.display()))?;

    Ok(())
}
