//! Presentation layer for rapport
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive screening interface.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod screening;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, ContactArg, OutputArg, ProfileAction, ProfileUpdate, SignUpArgs,
};
pub use config::{OutputConfig, ReplConfig};
pub use output::{ConsoleFormatter, JsonFormatter, OutputFormatter, formatter_for};
pub use progress::reporter::{ProgressMode, ProgressReporter, SimpleProgress};
pub use screening::ScreeningRepl;
