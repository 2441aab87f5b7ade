use crate::render::{ColorMode, RenderMode};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User configuration loaded from config file.
/// All fields are optional: CLI flags override config, config overrides defaults.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Default render mode
    pub render: Option<RenderModeConfig>,
    /// Default color mode
    pub color: Option<ColorModeConfig>,
    /// Target FPS (1-120)
    pub fps: Option<u32>,
    /// Surface pixels per canvas dot
    pub zoom: Option<f64>,
    /// Milliseconds between rocket launches
    pub spawn_interval_ms: Option<u64>,
    /// Hide status bar
    pub clean: Option<bool>,
    /// Page address used when building share links
    pub base_url: Option<String>,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
}

/// Render mode names for config file (kebab-case friendly)
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum RenderModeConfig {
    Braille,
    HalfBlock,
    Ascii,
}

impl From<RenderModeConfig> for RenderMode {
    fn from(c: RenderModeConfig) -> Self {
        match c {
            RenderModeConfig::Braille => RenderMode::Braille,
            RenderModeConfig::HalfBlock => RenderMode::HalfBlock,
            RenderModeConfig::Ascii => RenderMode::Ascii,
        }
    }
}

/// Color mode names for config file (kebab-case friendly)
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ColorModeConfig {
    Mono,
    Ansi16,
    Ansi256,
    TrueColor,
}

impl From<ColorModeConfig> for ColorMode {
    fn from(c: ColorModeConfig) -> Self {
        match c {
            ColorModeConfig::Mono => ColorMode::Mono,
            ColorModeConfig::Ansi16 => ColorMode::Ansi16,
            ColorModeConfig::Ansi256 => ColorMode::Ansi256,
            ColorModeConfig::TrueColor => ColorMode::TrueColor,
        }
    }
}

/// Get the config file path: ~/.config/diwali-sky/config.toml
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("diwali-sky").join("config.toml"))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    toml::from_str(contents).context("invalid config")
}

fn read_config(path: &Path) -> anyhow::Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))
        .map(Some)
}

/// Load config from file. Returns default config if the file is missing or broken.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    match read_config(&path) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Warning: {:#}", e);
            Config::default()
        }
    }
}

/// Generate a default config file with all options commented out
pub fn default_config_string() -> String {
    r#"# diwali-sky configuration
# Use --show-config to see the active config file path.
# CLI flags override these settings.

# Render mode: braille, half-block, ascii
# render = "braille"

# Color mode: mono, ansi16, ansi256, true-color
# color = "true-color"

# Target FPS (1-120); motion is per frame, so this also sets the speed
# fps = 60

# Surface pixels per canvas dot (larger = smaller fireworks)
# zoom = 4.0

# Milliseconds between rocket launches
# spawn-interval-ms = 1500

# Hide status bar
# clean = false

# Page address used by --share
# base-url = "http://localhost:8080/"

# Write logs to this file (RUST_LOG sets the level)
# log-file = "/tmp/diwali-sky.log"
"#
    .to_string()
}
