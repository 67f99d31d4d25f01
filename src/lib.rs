//! Interactive terminal prompts with validation, plus an animated spinner.
//!
//! ```no_run
//! use prompter::{Prompter, validation::NonEmpty};
//!
//! let mut p = Prompter::new();
//! let name = p.prompt_validated("Project name", &NonEmpty::default())?;
//! let version = p.prompt_semver("Initial version")?;
//! let publish = p.yes_or_no("Publish now?", false)?;
//!
//! let spinner = p.start_spinner("Publishing")?;
//! // ... do work ...
//! spinner.success(&format!("Published {name} {version}"))?;
//! # let _ = publish;
//! # Ok::<(), prompter::PromptError>(())
//! ```

mod common;
pub mod config;
mod error;
mod logging;
pub mod prompt;
pub mod spinner;
pub mod terminal;
pub mod validation;

pub use common::{ENV_CONFIG_DIR_OVERRIDE, PROJECT_NAME, PROJECT_VERSION};
pub use config::PrompterConfig;
pub use error::{PromptError, PromptResult};
pub use logging::Logging;
pub use prompt::{NO_SELECTION, Prompter};
pub use spinner::Spinner;
pub use terminal::{Key, ScriptedTerminal, StdTerminal, Terminal};
pub use validation::{ValidationResult, Validator};
