//! core::record
//!
//! The CMIP5 file metadata record.
//!
//! # Storage
//!
//! A [`Cmip5File`] is a sparse, insertion-ordered map from attribute name to
//! value. An attribute that was never set is absent, which is different from
//! an attribute set to an empty string. Reads of absent attributes return
//! `None`; this applies to stored and derived attributes alike.
//!
//! # Derived Attributes
//!
//! `t_start`, `t_end` and `temporal_suffix` are never stored. They are views
//! over `temporal_subset` (`start-end[-suffix]`): reads re-parse it and
//! writes rewrite the matching segment.
//!
//! # Trusted vs Checked Input
//!
//! Fields produced by an extractor are stored verbatim, including any names
//! outside the vocabulary. Fields supplied by hand go through
//! [`Cmip5File::update`], which rejects unknown names and deletes fields
//! given an empty value.
//!
//! # Example
//!
//! ```
//! use climdir::core::record::Cmip5File;
//!
//! let mut file = Cmip5File::from_cmor_fname("tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc")
//!     .unwrap();
//!
//! file.set_t_start("200001").unwrap();
//! file.update([("experiment", "historical")]).unwrap();
//!
//! assert_eq!(
//!     file.cmor_fname().unwrap(),
//!     "tas_Amon_HadGEM2-ES_historical_r1i1p1_200001-210012.nc"
//! );
//! ```

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::extract::{
    Encoding, PathGrammarError, RawFields, FNAME_SEPARATOR, NC_EXTENSION,
};
use crate::core::fields::{
    Field, FieldError, CMOR_FP_SEGMENTS, DATANODE_FP_SEGMENTS, FNAME_OPTIONAL, FNAME_REQUIRED,
};
use crate::core::temporal;

/// Errors from record operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("missing field: {0}")]
    MissingField(Field),

    #[error("field not set: {0}")]
    FieldNotSet(Field),

    #[error("cannot delete {0}, it is derived from temporal_subset")]
    DerivedField(Field),

    #[error("invalid {field} '{value}': must be non-empty and contain no '-'")]
    InvalidSegment { field: Field, value: String },

    #[error("cannot add a temporal_suffix to '{0}', expected start-end")]
    SuffixWithoutRange(String),

    #[error(transparent)]
    Grammar(#[from] PathGrammarError),
}

impl From<FieldError> for RecordError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::UnknownField(name) => RecordError::UnknownField(name),
        }
    }
}

/// Metadata for one CMIP5 output file.
///
/// Two records are equal when they store the same fields with the same
/// values, regardless of the order in which the fields were set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cmip5File {
    fields: IndexMap<String, String>,
}

impl Cmip5File {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that picks a raw source and applies checked fields.
    pub fn builder() -> Cmip5FileBuilder {
        Cmip5FileBuilder::default()
    }

    /// Store an extractor's mapping verbatim.
    ///
    /// No vocabulary check is made and empty values are kept.
    pub fn from_raw_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Extract a record from `raw` in the given encoding.
    ///
    /// # Errors
    ///
    /// Returns the extractor's [`PathGrammarError`] unchanged.
    pub fn parse(encoding: Encoding, raw: &str) -> Result<Self, PathGrammarError> {
        let fields: RawFields = encoding.extractor().extract(raw)?;
        Ok(Self::from_raw_fields(fields))
    }

    /// Extract a record from a CMOR filename.
    pub fn from_cmor_fname(raw: &str) -> Result<Self, PathGrammarError> {
        Self::parse(Encoding::CmorFname, raw)
    }

    /// Extract a record from a standard CMOR file path.
    pub fn from_cmor_fp(raw: &str) -> Result<Self, PathGrammarError> {
        Self::parse(Encoding::CmorFp, raw)
    }

    /// Extract a record from an extended datanode file path.
    pub fn from_datanode_fp(raw: &str) -> Result<Self, PathGrammarError> {
        Self::parse(Encoding::DatanodeFp, raw)
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// Get a field's value, resolving derived fields through `temporal_subset`.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::TStart => self.t_start(),
            Field::TEnd => self.t_end(),
            Field::TemporalSuffix => self.temporal_suffix(),
            stored => self.stored(stored),
        }
    }

    /// Get any stored value by name, including names outside the vocabulary.
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether the field currently has a value.
    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Stored fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are stored.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn stored(&self, field: Field) -> Option<&str> {
        self.get_raw(field.as_str())
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Set a single field.
    ///
    /// Derived fields rewrite `temporal_subset`. An empty value is stored
    /// as-is; use [`update`](Self::update) for delete-on-empty semantics.
    ///
    /// # Errors
    ///
    /// Derived fields fail as their setters do, e.g. `RecordError::FieldNotSet`
    /// when there is no `temporal_subset` to rewrite.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), RecordError> {
        let value = value.into();
        match field {
            Field::TStart => self.set_t_start(&value),
            Field::TEnd => self.set_t_end(&value),
            Field::TemporalSuffix => self.set_temporal_suffix(&value),
            stored => {
                self.fields.insert(stored.to_string(), value);
                Ok(())
            }
        }
    }

    /// Remove a single field. Removing an absent field does nothing.
    ///
    /// Removing `temporal_suffix` drops the third segment of
    /// `temporal_subset`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::DerivedField` for `t_start` and `t_end`.
    pub fn remove(&mut self, field: Field) -> Result<(), RecordError> {
        match field {
            Field::TStart | Field::TEnd => Err(RecordError::DerivedField(field)),
            Field::TemporalSuffix => {
                if let Some(subset) = self.temporal_subset() {
                    let trimmed = temporal::without_suffix(subset);
                    self.fields.insert(Field::TemporalSubset.to_string(), trimmed);
                }
                Ok(())
            }
            stored => {
                self.fields.shift_remove(stored.as_str());
                Ok(())
            }
        }
    }

    /// Apply a batch of named field values.
    ///
    /// Empty values delete the field. The batch is all-or-nothing: names
    /// are validated first and changes are staged, so any error leaves the
    /// record unchanged.
    ///
    /// # Errors
    ///
    /// - `RecordError::UnknownField` if a name is outside the vocabulary
    /// - `RecordError::FieldNotSet` if a derived field is set without `temporal_subset`
    /// - `RecordError::InvalidSegment` or `RecordError::SuffixWithoutRange` for
    ///   derived values that would not read back unchanged
    /// - `RecordError::DerivedField` if `t_start` or `t_end` is deleted
    ///
    /// # Example
    ///
    /// ```
    /// use climdir::core::record::{Cmip5File, RecordError};
    ///
    /// let mut file = Cmip5File::new();
    /// let err = file.update([("model", "X"), ("bogus", "Y")]).unwrap_err();
    ///
    /// assert_eq!(err, RecordError::UnknownField("bogus".into()));
    /// assert!(file.is_empty());
    /// ```
    pub fn update<I, K, V>(&mut self, fields: I) -> Result<(), RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let changes = fields
            .into_iter()
            .map(|(name, value)| -> Result<(Field, String), RecordError> {
                Ok((name.as_ref().parse::<Field>()?, value.into()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut staged = self.clone();
        for (field, value) in changes {
            if value.is_empty() {
                staged.remove(field)?;
            } else {
                staged.set(field, value)?;
            }
        }

        *self = staged;
        Ok(())
    }

    /// Delete fields by name.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub fn delete<I, K>(&mut self, names: I) -> Result<(), RecordError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.update(names.into_iter().map(|name| (name, String::new())))
    }

    // =========================================================================
    // Temporal subset
    // =========================================================================

    /// The full temporal subset, `start-end[-suffix]`.
    pub fn temporal_subset(&self) -> Option<&str> {
        self.stored(Field::TemporalSubset)
    }

    /// Start of the temporal range.
    pub fn t_start(&self) -> Option<&str> {
        self.temporal_subset()
            .and_then(|s| temporal::segment(s, temporal::START))
    }

    /// End of the temporal range.
    pub fn t_end(&self) -> Option<&str> {
        self.temporal_subset()
            .and_then(|s| temporal::segment(s, temporal::END))
    }

    /// Suffix of the temporal range, e.g. `clim`.
    pub fn temporal_suffix(&self) -> Option<&str> {
        self.temporal_subset().and_then(temporal::suffix)
    }

    /// Rewrite the start of the temporal range.
    ///
    /// # Errors
    ///
    /// - `RecordError::InvalidSegment` if `value` is empty or contains `-`
    /// - `RecordError::FieldNotSet` if there is no `temporal_subset`
    pub fn set_t_start(&mut self, value: &str) -> Result<(), RecordError> {
        check_segment(Field::TStart, value)?;
        self.rewrite_subset(|s| Ok(temporal::with_segment(s, temporal::START, value)))
    }

    /// Rewrite the end of the temporal range.
    ///
    /// # Errors
    ///
    /// Same as [`set_t_start`](Self::set_t_start).
    pub fn set_t_end(&mut self, value: &str) -> Result<(), RecordError> {
        check_segment(Field::TEnd, value)?;
        self.rewrite_subset(|s| Ok(temporal::with_segment(s, temporal::END, value)))
    }

    /// Replace the temporal suffix, or append one to a `start-end` range.
    ///
    /// # Errors
    ///
    /// Same as [`set_t_start`](Self::set_t_start), plus
    /// `RecordError::SuffixWithoutRange` unless the subset is
    /// `start-end` or `start-end-suffix`.
    pub fn set_temporal_suffix(&mut self, value: &str) -> Result<(), RecordError> {
        check_segment(Field::TemporalSuffix, value)?;
        self.rewrite_subset(|s| {
            temporal::with_suffix(s, value)
                .ok_or_else(|| RecordError::SuffixWithoutRange(s.to_string()))
        })
    }

    fn rewrite_subset(
        &mut self,
        rewrite: impl FnOnce(&str) -> Result<String, RecordError>,
    ) -> Result<(), RecordError> {
        let subset = self
            .temporal_subset()
            .ok_or(RecordError::FieldNotSet(Field::TemporalSubset))?;
        let rewritten = rewrite(subset)?;
        self.fields
            .insert(Field::TemporalSubset.to_string(), rewritten);
        Ok(())
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Generate the CMOR filename.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if a required field is absent.
    pub fn cmor_fname(&self) -> Result<String, RecordError> {
        let mut parts = self.require_all(&FNAME_REQUIRED)?;
        parts.extend(FNAME_OPTIONAL.iter().filter_map(|f| self.stored(*f)));

        let separator = FNAME_SEPARATOR.to_string();
        Ok(format!("{}{}", parts.join(&separator), NC_EXTENSION))
    }

    /// Generate the standard CMOR file path.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if a path or filename field is absent.
    pub fn cmor_fp(&self) -> Result<PathBuf, RecordError> {
        self.joined_path(&CMOR_FP_SEGMENTS)
    }

    /// Generate the extended datanode file path.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::MissingField` if a path or filename field is absent.
    pub fn datanode_fp(&self) -> Result<PathBuf, RecordError> {
        self.joined_path(&DATANODE_FP_SEGMENTS)
    }

    /// Generate the string form of the given encoding.
    pub fn generate(&self, encoding: Encoding) -> Result<String, RecordError> {
        match encoding {
            Encoding::CmorFname => self.cmor_fname(),
            Encoding::CmorFp => Ok(self.cmor_fp()?.to_string_lossy().into_owned()),
            Encoding::DatanodeFp => Ok(self.datanode_fp()?.to_string_lossy().into_owned()),
        }
    }

    fn joined_path(&self, segments: &[Field]) -> Result<PathBuf, RecordError> {
        let mut path: PathBuf = self.require_all(segments)?.into_iter().collect();
        path.push(self.cmor_fname()?);
        Ok(path)
    }

    fn require_all(&self, fields: &[Field]) -> Result<Vec<&str>, RecordError> {
        fields
            .iter()
            .map(|f| self.stored(*f).ok_or(RecordError::MissingField(*f)))
            .collect()
    }
}

fn check_segment(field: Field, value: &str) -> Result<(), RecordError> {
    if temporal::is_segment(value) {
        Ok(())
    } else {
        Err(RecordError::InvalidSegment {
            field,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Cmip5File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .iter()
            .filter(|(name, _)| Field::is_known(name))
            .map(|(name, value)| format!("{name} = '{value}'"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Cmip5File({args})")
    }
}

/// Builder for [`Cmip5File`] from an optional raw source plus checked fields.
///
/// At most one raw source is used: the first supplied of standard path,
/// datanode path, then filename. Empty sources count as not supplied.
///
/// # Example
///
/// ```
/// use climdir::core::record::Cmip5File;
///
/// let file = Cmip5File::builder()
///     .cmor_fname("tas_Amon_HadGEM2-ES_rcp45_r1i1p1.nc")
///     .field("activity", "CMIP5")
///     .build()
///     .unwrap();
///
/// assert_eq!(file.get_raw("activity"), Some("CMIP5"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cmip5FileBuilder {
    cmor_fp: Option<String>,
    datanode_fp: Option<String>,
    cmor_fname: Option<String>,
    fields: Vec<(String, String)>,
}

impl Cmip5FileBuilder {
    /// Use a standard CMOR file path as the source.
    pub fn cmor_fp(mut self, raw: impl Into<String>) -> Self {
        self.cmor_fp = Some(raw.into());
        self
    }

    /// Use an extended datanode file path as the source.
    pub fn datanode_fp(mut self, raw: impl Into<String>) -> Self {
        self.datanode_fp = Some(raw.into());
        self
    }

    /// Use a CMOR filename as the source.
    pub fn cmor_fname(mut self, raw: impl Into<String>) -> Self {
        self.cmor_fname = Some(raw.into());
        self
    }

    /// Use `raw` as the source for `encoding`.
    pub fn source(self, encoding: Encoding, raw: impl Into<String>) -> Self {
        match encoding {
            Encoding::CmorFp => self.cmor_fp(raw),
            Encoding::DatanodeFp => self.datanode_fp(raw),
            Encoding::CmorFname => self.cmor_fname(raw),
        }
    }

    /// Add a checked field, applied after extraction.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add several checked fields.
    pub fn fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The source that [`build`](Self::build) would extract from.
    pub fn selected_source(&self) -> Option<(Encoding, &str)> {
        [
            (Encoding::CmorFp, &self.cmor_fp),
            (Encoding::DatanodeFp, &self.datanode_fp),
            (Encoding::CmorFname, &self.cmor_fname),
        ]
        .into_iter()
        .find_map(|(encoding, raw)| {
            raw.as_deref()
                .filter(|r| !r.is_empty())
                .map(|r| (encoding, r))
        })
    }

    /// Build the record.
    ///
    /// # Errors
    ///
    /// - `RecordError::Grammar` if the selected source does not parse
    /// - Any error from [`Cmip5File::update`] for the checked fields
    pub fn build(self) -> Result<Cmip5File, RecordError> {
        let mut file = match self.selected_source() {
            Some((encoding, raw)) => Cmip5File::parse(encoding, raw)?,
            None => Cmip5File::new(),
        };
        file.update(self.fields)?;
        Ok(file)
    }
}
