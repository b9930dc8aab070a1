//! climdir - CMIP5 Data Reference Syntax metadata for file names and paths
//!
//! climdir maps between the metadata of a CMIP5 model output file and the
//! three string forms the Data Reference Syntax defines for it: a CMOR
//! filename, a standard CMOR directory path, and an extended datanode path.
//!
//! # Architecture
//!
//! - [`core`] - Field vocabulary, extractors, the `Cmip5File` record, config
//! - [`cli`] - Command-line interface layer (parses args, calls into core)
//! - [`ui`] - Output formatting and diagnostics
//!
//! # Correctness Invariants
//!
//! 1. Only recognized field names enter a record through the checked API
//! 2. `t_start`, `t_end` and `temporal_suffix` always agree with `temporal_subset`
//! 3. Generating an encoding from a record extracted from that encoding
//!    reproduces the input exactly
//!
//! # Example
//!
//! ```
//! use climdir::core::record::Cmip5File;
//!
//! let path = "CMIP5/output1/MOHC/HadGEM2-ES/rcp45/mon/atmos/Amon/r1i1p1/v20110101/tas/\
//!             tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc";
//! let file = Cmip5File::from_datanode_fp(path).unwrap();
//!
//! assert_eq!(file.t_end(), Some("210012"));
//! assert_eq!(file.datanode_fp().unwrap().to_str(), Some(path));
//! ```

pub mod cli;
pub mod core;
pub mod ui;
