use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::project_data_dir;

/// Logger setup for applications embedding the prompts.
///
/// Log records go to stderr by default. Interactive programs should send
/// them to a file with [`Logging::with_file`] so they never interleave with
/// prompt redraws or spinner frames.
#[derive(Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: None,
            debug_mode: false,
        }
    }

    /// Log to `file_name`, relative to the project data directory unless
    /// absolute.
    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Enable debug mode for verbose logging including every rejected answer.
    ///
    /// Parameters:
    ///   - enable: true to enable debug mode
    ///
    /// Returns: Self for chaining
    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    #[must_use]
    pub fn level(&self) -> LevelFilter {
        if self.debug_mode {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();
        b.filter_level(self.level());

        if let Some(file_name) = &self.file_name {
            let log_file = get_log_file_path(file_name)?;

            let fd = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_file)
                .with_context(|| format!("Unable to open {} for writing", log_file.display()))?;

            b.target(Target::Pipe(Box::new(fd)));
        }

        b.try_init().context("Logger already initialized")?;

        Ok(())
    }
}

/// Get the path to the log file.
///
/// Parameters:
///   - `file_name`: File name or absolute path of the log file
///
/// Returns: Full path to the log file
fn get_log_file_path(file_name: &Path) -> Result<PathBuf> {
    if file_name.is_absolute() {
        return Ok(file_name.to_path_buf());
    }
    Ok(project_data_dir()?.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_default_debug_mode_disabled() {
        let logging = Logging::new();
        assert!(!logging.debug_mode);
        assert_eq!(logging.level(), LevelFilter::Info);
    }

    #[test]
    fn test_logging_with_debug_mode_raises_level() {
        let logging = Logging::new().with_debug_mode(true);
        assert_eq!(logging.level(), LevelFilter::Debug);
    }

    #[test]
    fn test_absolute_log_file_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("prompter.log");

        assert_eq!(get_log_file_path(&file).unwrap(), file);
    }
}
