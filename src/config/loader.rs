use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use bon::Builder;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::common::project_config_dir;

const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_INTERVAL_MS: u64 = 80;
const DEFAULT_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Milliseconds between frames (default: 80)
    #[builder(default = DEFAULT_INTERVAL_MS)]
    pub interval_ms: u64,
    /// Glyphs cycled through while the spinner runs
    #[builder(default = default_frames())]
    pub frames: Vec<String>,
}

fn default_frames() -> Vec<String> {
    DEFAULT_FRAMES.iter().map(ToString::to_string).collect()
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            frames: default_frames(),
        }
    }
}

impl SpinnerConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Glyphs used to decorate prompts and spinner outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub prompt: String,
    pub success: String,
    pub error: String,
    pub pointer: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            prompt: "?".into(),
            success: "✔".into(),
            error: "✖".into(),
            pointer: ">".into(),
        }
    }
}

/// Default answer labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub yes: String,
    pub no: String,
    /// Label of the pseudo-option that selects nothing in optional lists
    pub none: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            yes: "Yes".into(),
            no: "No".into(),
            none: "(none)".into(),
        }
    }
}

/// Settings shared by every prompt and spinner created by a `Prompter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct PrompterConfig {
    /// Paint prompts and outcomes with ANSI colours (default: true)
    #[builder(default = true)]
    pub color: bool,
    #[builder(default)]
    pub spinner: SpinnerConfig,
    #[builder(default)]
    pub glyphs: Glyphs,
    #[builder(default)]
    pub labels: Labels,
}

impl Default for PrompterConfig {
    fn default() -> Self {
        Self {
            color: true,
            spinner: SpinnerConfig::default(),
            glyphs: Glyphs::default(),
            labels: Labels::default(),
        }
    }
}

impl PrompterConfig {
    /// Loads `config.toml` from the project config directory, falling back
    /// to defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let config_file = project_config_dir()?.join(CONFIG_FILE_NAME);

        if !config_file.exists() {
            debug!(
                "No configuration at {}, using defaults",
                config_file.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(&config_file)
    }

    /// Loads and validates an explicit configuration file.
    pub fn load_from(config_file: &Path) -> Result<Self> {
        let config_string = fs::read_to_string(config_file)
            .with_context(|| format!("Unable to read {}", config_file.display()))?;

        let config: PrompterConfig = toml::from_str(&config_string)
            .with_context(|| format!("Unable to parse {}", config_file.display()))?;

        config.validate()?;

        info!("Loaded configuration from {}", config_file.display());
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Unable to serialize configuration")
    }

    pub fn validate(&self) -> Result<()> {
        if self.spinner.interval_ms == 0 {
            bail!("spinner.interval_ms must be greater than zero");
        }
        if self.spinner.frames.is_empty() {
            bail!("spinner.frames must contain at least one frame");
        }
        if self.labels.yes.trim().is_empty() || self.labels.no.trim().is_empty() {
            bail!("labels.yes and labels.no cannot be empty");
        }
        if self.labels.yes.eq_ignore_ascii_case(&self.labels.no) {
            bail!("labels.yes and labels.no must differ");
        }
        Ok(())
    }
}
