//! core::extract
//!
//! Extraction of DRS attributes from raw filenames and paths.
//!
//! # Encodings
//!
//! - [`Encoding::CmorFname`] - `tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc`
//! - [`Encoding::CmorFp`] - `CMIP5/output1/MOHC/HadGEM2-ES/rcp45/mon/atmos/tas/r1i1p1/<fname>`
//! - [`Encoding::DatanodeFp`] - `CMIP5/output1/MOHC/HadGEM2-ES/rcp45/mon/atmos/Amon/r1i1p1/v20110101/tas/<fname>`
//!
//! Each encoding has an [`Extractor`] that turns a conforming string into a
//! [`RawFields`] mapping. Extractors are strict about structure and lenient
//! about values: they check separators, part counts and that directory and
//! filename agree, but never check that a model or experiment exists.
//!
//! Path extractors accept exactly the relative path a record would generate:
//! no root, no `.` or `..`, no doubled or trailing separators. A data root
//! such as `/badc/cmip5/data` has to be stripped by the caller first.
//!
//! # Example
//!
//! ```
//! use climdir::core::extract::Encoding;
//!
//! let fields = Encoding::CmorFname
//!     .extractor()
//!     .extract("tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc")
//!     .unwrap();
//!
//! assert_eq!(fields["model"], "HadGEM2-ES");
//! assert_eq!(fields["temporal_subset"], "200601-210012");
//! ```

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

use crate::core::fields::{
    Field, CMOR_FP_SEGMENTS, DATANODE_FP_SEGMENTS, FNAME_OPTIONAL, FNAME_REQUIRED,
};

/// Field name to value mapping produced by an extractor, in DRS order.
pub type RawFields = IndexMap<String, String>;

/// Extension of every CMOR output file.
pub const NC_EXTENSION: &str = ".nc";

/// Separator between filename attributes.
pub const FNAME_SEPARATOR: char = '_';

/// Prefix that marks a geographical subset token in a filename.
pub const GEO_PREFIX: &str = "g-";

static TEMPORAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+-\d+(-[A-Za-z0-9]+)?$").expect("valid regex"));

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(v?\d+|latest)$").expect("valid regex"));

/// Errors from raw string extraction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathGrammarError {
    #[error("'{input}' does not end with '{NC_EXTENSION}'")]
    MissingExtension { input: String },

    #[error("'{input}' has {found} '_'-separated parts, expected 5 to 7")]
    WrongPartCount { input: String, found: usize },

    #[error("'{input}' has an empty part at position {position}")]
    EmptyPart { input: String, position: usize },

    #[error("'{token}' in '{input}' is neither a temporal subset nor a geographical subset")]
    UnrecognizedToken { input: String, token: String },

    #[error("'{input}' has {found} path components, expected {expected}")]
    WrongComponentCount {
        input: String,
        expected: usize,
        found: usize,
    },

    #[error("'{input}' is not a relative path of plain components")]
    NonCanonicalPath { input: String },

    #[error("'{input}' is not a valid version directory")]
    InvalidVersion { input: String },

    #[error("{field} is '{directory}' in the directory but '{filename}' in the filename")]
    Inconsistent {
        field: Field,
        directory: String,
        filename: String,
    },
}

/// One of the three string encodings of a DRS record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Short CMOR filename.
    CmorFname,
    /// Standard CMOR directory path ending in a filename.
    CmorFp,
    /// Extended datanode directory path ending in a filename.
    DatanodeFp,
}

impl Encoding {
    /// All encodings, in the order a record builder prefers them.
    pub const ALL: [Encoding; 3] = [Encoding::CmorFp, Encoding::DatanodeFp, Encoding::CmorFname];

    /// The extractor for this encoding.
    pub fn extractor(self) -> &'static dyn Extractor {
        match self {
            Encoding::CmorFname => &CmorFnameExtractor,
            Encoding::CmorFp => &CmorFpExtractor,
            Encoding::DatanodeFp => &DatanodeFpExtractor,
        }
    }

    /// Short name used in messages and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::CmorFname => "cmor-fname",
            Encoding::CmorFp => "cmor-fp",
            Encoding::DatanodeFp => "datanode-fp",
        }
    }

    /// Guess the encoding of a raw string from its shape.
    ///
    /// A single component is a filename. A path of at least twelve
    /// components whose third-from-last looks like a version directory is a
    /// datanode path. Anything else is treated as a standard CMOR path.
    ///
    /// ```
    /// use climdir::core::extract::Encoding;
    ///
    /// assert_eq!(Encoding::detect("tas_Amon_M_e_r1i1p1.nc"), Encoding::CmorFname);
    /// assert_eq!(
    ///     Encoding::detect("CMIP5/output1/I/M/e/mon/atmos/Amon/r1i1p1/v1/tas/tas_Amon_M_e_r1i1p1.nc"),
    ///     Encoding::DatanodeFp
    /// );
    /// ```
    pub fn detect(raw: &str) -> Encoding {
        let components: Vec<_> = Path::new(raw)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect();
        if components.len() <= 1 {
            return Encoding::CmorFname;
        }
        let version_slot = components.len().checked_sub(3).map(|i| &components[i]);
        match version_slot {
            Some(v)
                if components.len() > DATANODE_FP_SEGMENTS.len() && VERSION_RE.is_match(v) =>
            {
                Encoding::DatanodeFp
            }
            _ => Encoding::CmorFp,
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Turns a raw string in one encoding into a field mapping.
pub trait Extractor: Send + Sync {
    /// The encoding this extractor parses.
    fn encoding(&self) -> Encoding;

    /// Extract fields from `raw`.
    ///
    /// # Errors
    ///
    /// Returns a [`PathGrammarError`] if `raw` does not follow the encoding's grammar.
    fn extract(&self, raw: &str) -> Result<RawFields, PathGrammarError>;
}

/// Extractor for CMOR filenames.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmorFnameExtractor;

impl Extractor for CmorFnameExtractor {
    fn encoding(&self) -> Encoding {
        Encoding::CmorFname
    }

    fn extract(&self, raw: &str) -> Result<RawFields, PathGrammarError> {
        let stem = raw
            .strip_suffix(NC_EXTENSION)
            .ok_or_else(|| PathGrammarError::MissingExtension {
                input: raw.to_string(),
            })?;

        let parts: Vec<&str> = stem.split(FNAME_SEPARATOR).collect();
        let max = FNAME_REQUIRED.len() + FNAME_OPTIONAL.len();
        if !(FNAME_REQUIRED.len()..=max).contains(&parts.len()) {
            return Err(PathGrammarError::WrongPartCount {
                input: raw.to_string(),
                found: parts.len(),
            });
        }
        if let Some(position) = parts.iter().position(|p| p.is_empty()) {
            return Err(PathGrammarError::EmptyPart {
                input: raw.to_string(),
                position,
            });
        }

        let (required, optional) = parts.split_at(FNAME_REQUIRED.len());
        let mut fields = RawFields::new();
        for (field, value) in FNAME_REQUIRED.iter().zip(required) {
            fields.insert(field.to_string(), value.to_string());
        }

        let unrecognized = |token: &str| PathGrammarError::UnrecognizedToken {
            input: raw.to_string(),
            token: token.to_string(),
        };
        match optional {
            [] => {}
            [token] if token.starts_with(GEO_PREFIX) => {
                fields.insert(Field::GeographicalInfo.to_string(), token.to_string());
            }
            [token] if TEMPORAL_RE.is_match(token) => {
                fields.insert(Field::TemporalSubset.to_string(), token.to_string());
            }
            [token] => return Err(unrecognized(*token)),
            [temporal, geo, ..] => {
                if !TEMPORAL_RE.is_match(temporal) {
                    return Err(unrecognized(*temporal));
                }
                if !geo.starts_with(GEO_PREFIX) {
                    return Err(unrecognized(*geo));
                }
                fields.insert(Field::TemporalSubset.to_string(), temporal.to_string());
                fields.insert(Field::GeographicalInfo.to_string(), geo.to_string());
            }
        }

        Ok(fields)
    }
}

/// Extractor for standard CMOR file paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmorFpExtractor;

impl Extractor for CmorFpExtractor {
    fn encoding(&self) -> Encoding {
        Encoding::CmorFp
    }

    fn extract(&self, raw: &str) -> Result<RawFields, PathGrammarError> {
        extract_path(raw, &CMOR_FP_SEGMENTS)
    }
}

/// Extractor for extended datanode file paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatanodeFpExtractor;

impl Extractor for DatanodeFpExtractor {
    fn encoding(&self) -> Encoding {
        Encoding::DatanodeFp
    }

    fn extract(&self, raw: &str) -> Result<RawFields, PathGrammarError> {
        let fields = extract_path(raw, &DATANODE_FP_SEGMENTS)?;
        if let Some(version) = fields.get(Field::VersionNumber.as_str()) {
            if !VERSION_RE.is_match(version) {
                return Err(PathGrammarError::InvalidVersion {
                    input: version.clone(),
                });
            }
        }
        Ok(fields)
    }
}

/// Read `segments` from the directories that precede the filename, then
/// merge in the filename's own fields.
fn extract_path(raw: &str, segments: &[Field]) -> Result<RawFields, PathGrammarError> {
    let components = path_components(raw)?;
    let expected = segments.len() + 1;
    if components.len() != expected {
        return Err(PathGrammarError::WrongComponentCount {
            input: raw.to_string(),
            expected,
            found: components.len(),
        });
    }

    let (dirs, fname) = components.split_at(segments.len());

    let mut fields = RawFields::new();
    for (field, value) in segments.iter().zip(dirs) {
        fields.insert(field.to_string(), value.clone());
    }

    let fname_fields = CmorFnameExtractor.extract(&fname[0])?;
    for field in FNAME_REQUIRED.iter().chain(FNAME_OPTIONAL.iter()) {
        let Some(value) = fname_fields.get(field.as_str()) else {
            continue;
        };
        match fields.get(field.as_str()) {
            Some(existing) if existing != value => {
                return Err(PathGrammarError::Inconsistent {
                    field: *field,
                    directory: existing.clone(),
                    filename: value.clone(),
                });
            }
            Some(_) => {}
            None => {
                fields.insert(field.to_string(), value.clone());
            }
        }
    }

    Ok(fields)
}

/// Split a relative path into its components.
///
/// Fails unless joining the components back gives `raw` exactly.
fn path_components(raw: &str) -> Result<Vec<String>, PathGrammarError> {
    let non_canonical = || PathGrammarError::NonCanonicalPath {
        input: raw.to_string(),
    };

    let components = Path::new(raw)
        .components()
        .map(|c| match c {
            Component::Normal(part) => Ok(part.to_string_lossy().into_owned()),
            _ => Err(non_canonical()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rejoined: PathBuf = components.iter().collect();
    if rejoined.as_os_str() != raw {
        return Err(non_canonical());
    }
    Ok(components)
}
