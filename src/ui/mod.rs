//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All output goes through this module so that `--quiet` and `--debug`
//! are honored consistently. Diagnostics go to stderr, results to stdout.

pub mod output;
