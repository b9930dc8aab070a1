//! core
//!
//! Core domain types and operations for climdir.
//!
//! # Modules
//!
//! - [`fields`] - The closed vocabulary of DRS attribute names and field groups
//! - [`temporal`] - Segment access for `temporal_subset`
//! - [`extract`] - Extractors from raw filenames and paths
//! - [`record`] - The `Cmip5File` metadata record and its generators
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Field names are an enum; unknown names cannot reach storage through
//!   the checked API
//! - Derived temporal fields are computed, never stored
//! - Generation and extraction are pure and deterministic

pub mod config;
pub mod extract;
pub mod fields;
pub mod record;
pub mod temporal;
