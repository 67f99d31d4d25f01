use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};

pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");
pub const PROJECT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable to override the config directory.
///
/// Example usage in tests:
///   export PROMPTER_CONFIG_DIR="/tmp/test-config/prompter"
pub const ENV_CONFIG_DIR_OVERRIDE: &str = "PROMPTER_CONFIG_DIR";

/// Returns the project config directory without creating it.
///
/// If `PROMPTER_CONFIG_DIR` is set, uses that path directly (validated for
/// safety). Otherwise falls back to `dirs::config_dir()/prompter`.
pub fn project_config_dir() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var(ENV_CONFIG_DIR_OVERRIDE) {
        let path = checked_override_dir(&override_dir)?;
        info!(
            "Using config directory override from {ENV_CONFIG_DIR_OVERRIDE}: {}",
            path.display()
        );
        return Ok(path);
    }

    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow!(
            "Unable to determine config directory. Ensure XDG_CONFIG_HOME or HOME environment variable is set"
        )
    })?;
    Ok(config_dir.join(PROJECT_NAME))
}

fn checked_override_dir(override_dir: &str) -> Result<PathBuf> {
    let path = PathBuf::from(override_dir);

    if !path.is_absolute() {
        bail!("{ENV_CONFIG_DIR_OVERRIDE} must be an absolute path: {override_dir}");
    }
    // Reject path traversal
    if path
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        bail!("{ENV_CONFIG_DIR_OVERRIDE} contains parent directory references: {override_dir}");
    }

    Ok(path)
}

/// Returns the project data directory, creating it if needed.
///
/// Log files live here so they never interleave with prompt output.
///
/// Returns: Path to `~/.local/share/prompter` (or equivalent)
pub fn project_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow!(
            "Unable to determine data directory. Ensure XDG_DATA_HOME or HOME environment variable is set"
        )
    })?;

    let project_data_dir = data_dir.join(PROJECT_NAME);

    debug!("Creating data directory: {}", project_data_dir.display());
    fs::create_dir_all(&project_data_dir).with_context(|| {
        format!(
            "Unable to create directory: {}",
            project_data_dir.display()
        )
    })?;

    Ok(project_data_dir)
}
