//! core::fields
//!
//! The closed vocabulary of CMIP5 DRS attribute names.
//!
//! # Types
//!
//! - [`Field`] - One recognized attribute name
//! - [`FieldError`] - Raised when a name is outside the vocabulary
//!
//! # Field Groups
//!
//! The DRS fixes the order in which attributes appear in each encoding.
//! These orders are not alphabetical and not the vocabulary order:
//!
//! - [`FNAME_REQUIRED`] - Always present in a CMOR filename
//! - [`FNAME_OPTIONAL`] - Appended to a filename only when set
//! - [`CMOR_FP_SEGMENTS`] - Directories of a standard CMOR path
//! - [`DATANODE_FP_SEGMENTS`] - Directories of an extended datanode path
//!
//! # Examples
//!
//! ```
//! use climdir::core::fields::Field;
//!
//! let field: Field = "mip_table".parse().unwrap();
//! assert_eq!(field, Field::MipTable);
//! assert_eq!(field.as_str(), "mip_table");
//!
//! assert!("bogus".parse::<Field>().is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from field name validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// A recognized CMIP5 DRS attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    Activity,
    Product,
    Institute,
    Model,
    Experiment,
    Frequency,
    ModelingRealm,
    MipTable,
    EnsembleMember,
    VersionNumber,
    VariableName,
    TemporalSubset,
    GeographicalInfo,
    TStart,
    TEnd,
    TemporalSuffix,
}

/// Every recognized field, in vocabulary order.
pub const ALL: [Field; 16] = [
    Field::Activity,
    Field::Product,
    Field::Institute,
    Field::Model,
    Field::Experiment,
    Field::Frequency,
    Field::ModelingRealm,
    Field::MipTable,
    Field::EnsembleMember,
    Field::VersionNumber,
    Field::VariableName,
    Field::TemporalSubset,
    Field::GeographicalInfo,
    Field::TStart,
    Field::TEnd,
    Field::TemporalSuffix,
];

/// Fields that make up the mandatory part of a CMOR filename.
pub const FNAME_REQUIRED: [Field; 5] = [
    Field::VariableName,
    Field::MipTable,
    Field::Model,
    Field::Experiment,
    Field::EnsembleMember,
];

/// Fields appended to a CMOR filename when present.
pub const FNAME_OPTIONAL: [Field; 2] = [Field::TemporalSubset, Field::GeographicalInfo];

/// Directory segments of a standard CMOR file path.
pub const CMOR_FP_SEGMENTS: [Field; 9] = [
    Field::Activity,
    Field::Product,
    Field::Institute,
    Field::Model,
    Field::Experiment,
    Field::Frequency,
    Field::ModelingRealm,
    Field::VariableName,
    Field::EnsembleMember,
];

/// Directory segments of an extended datanode file path.
pub const DATANODE_FP_SEGMENTS: [Field; 11] = [
    Field::Activity,
    Field::Product,
    Field::Institute,
    Field::Model,
    Field::Experiment,
    Field::Frequency,
    Field::ModelingRealm,
    Field::MipTable,
    Field::EnsembleMember,
    Field::VersionNumber,
    Field::VariableName,
];

impl Field {
    /// The canonical snake_case name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Activity => "activity",
            Field::Product => "product",
            Field::Institute => "institute",
            Field::Model => "model",
            Field::Experiment => "experiment",
            Field::Frequency => "frequency",
            Field::ModelingRealm => "modeling_realm",
            Field::MipTable => "mip_table",
            Field::EnsembleMember => "ensemble_member",
            Field::VersionNumber => "version_number",
            Field::VariableName => "variable_name",
            Field::TemporalSubset => "temporal_subset",
            Field::GeographicalInfo => "geographical_info",
            Field::TStart => "t_start",
            Field::TEnd => "t_end",
            Field::TemporalSuffix => "temporal_suffix",
        }
    }

    /// Whether the field is a view over `temporal_subset` rather than stored.
    ///
    /// ```
    /// use climdir::core::fields::Field;
    ///
    /// assert!(Field::TStart.is_derived());
    /// assert!(!Field::TemporalSubset.is_derived());
    /// ```
    pub fn is_derived(self) -> bool {
        matches!(self, Field::TStart | Field::TEnd | Field::TemporalSuffix)
    }

    /// Whether `name` is in the closed vocabulary.
    pub fn is_known(name: &str) -> bool {
        name.parse::<Field>().is_ok()
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

impl TryFrom<String> for Field {
    type Error = FieldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.as_str().to_string()
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
