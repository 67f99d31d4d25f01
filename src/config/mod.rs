mod loader;
pub use loader::{Glyphs, Labels, PrompterConfig, SpinnerConfig};
