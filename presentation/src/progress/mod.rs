//! Progress indicators

pub mod reporter;

pub use reporter::{ProgressMode, ProgressReporter, SimpleProgress};
