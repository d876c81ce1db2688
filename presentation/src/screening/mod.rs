//! Interactive screening module
//!
//! Provides a readline-based walkthrough of the consent, chat and report
//! screens.

mod repl;

pub use repl::{ReplCommand, ScreeningRepl, parse_choice_answer};
