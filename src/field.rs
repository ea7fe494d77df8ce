//! Field-access handles: the runtime's view of one writable field.
//!
//! The external runtime owns the field storage; this crate only borrows a
//! [`FieldHandle`] for the duration of a single hook call. The handle exposes
//! the field's identity (`record.field`), its element count, and a typed view
//! of its raw contents via [`FieldData`].

use std::fmt;

/// A borrowed view of one writable field at the moment of interception.
///
/// Implemented by the external runtime (or by [`OwnedField`] for callers that
/// snapshot field contents themselves). The handle is only valid for the
/// duration of one hook call; nothing in this crate retains it.
pub trait FieldHandle {
    /// Name of the record owning the field.
    fn record_name(&self) -> &str;

    /// Name of the field within the record.
    fn field_name(&self) -> &str;

    /// Number of elements currently held by the field. Always at least 1.
    fn element_count(&self) -> usize;

    /// Typed view of the field's raw contents.
    fn data(&self) -> FieldData<'_>;
}

/// Typed view over a field's raw contents.
///
/// This is a closed enumeration: single- and double-precision floats get
/// dedicated formatting (the runtime's generic conversion is poor at
/// floating point), and everything else carries the runtime's own
/// string-conversion collaborator as an explicit variant. New element
/// classes must be added here deliberately, not absorbed by a fallthrough.
pub enum FieldData<'a> {
    /// Single-precision floating point elements.
    Float(&'a [f32]),
    /// Double-precision floating point elements.
    Double(&'a [f64]),
    /// Any other element class. Rendering is delegated back to the runtime
    /// through the attached conversion collaborator.
    Other(&'a dyn ConvertToStrings),
}

/// The external runtime's generic string-conversion facility.
///
/// For element classes this crate does not format itself, the runtime
/// converts the field's current contents to one printable string per
/// element. Failures are reported to the caller, never retried.
pub trait ConvertToStrings {
    /// Converts the field's current contents to printable strings,
    /// one per element.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] if the runtime cannot render the field.
    fn convert(&self) -> Result<Vec<String>, ConvertError>;
}

/// Error returned when the runtime's generic string conversion fails.
///
/// # Examples
///
/// ```
/// use pvlog::ConvertError;
///
/// let err = ConvertError::new("field storage unreadable");
/// assert_eq!(err.to_string(), "field storage unreadable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    message: String,
}

impl ConvertError {
    /// Creates a new conversion error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConvertError {}

/// An owned [`FieldHandle`] implementation.
///
/// Useful for tests, demos, and callers that bridge from a foreign runtime
/// by snapshotting field contents into owned buffers before invoking the
/// hook. The `texts` payload stands in for every element class this crate
/// does not format itself; its conversion collaborator returns the stored
/// strings verbatim and never fails.
///
/// # Examples
///
/// ```
/// use pvlog::{FieldData, FieldHandle, OwnedField};
///
/// let field = OwnedField::doubles("MOTOR1", "VAL", vec![1.5, 2.5]);
/// assert_eq!(field.record_name(), "MOTOR1");
/// assert_eq!(field.element_count(), 2);
/// assert!(matches!(field.data(), FieldData::Double(_)));
/// ```
#[derive(Debug, Clone)]
pub struct OwnedField {
    record: String,
    field: String,
    values: FieldValues,
}

/// Owned payload variants backing [`OwnedField`].
#[derive(Debug, Clone)]
enum FieldValues {
    Float(Vec<f32>),
    Double(Vec<f64>),
    Text(Vec<String>),
}

impl OwnedField {
    /// Creates a single-precision floating point field.
    pub fn floats(record: impl Into<String>, field: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
            values: FieldValues::Float(values),
        }
    }

    /// Creates a double-precision floating point field.
    pub fn doubles(record: impl Into<String>, field: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
            values: FieldValues::Double(values),
        }
    }

    /// Creates a field of an element class formatted by the runtime's
    /// generic conversion; the given strings are returned verbatim.
    pub fn texts(
        record: impl Into<String>,
        field: impl Into<String>,
        values: Vec<impl Into<String>>,
    ) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
            values: FieldValues::Text(values.into_iter().map(Into::into).collect()),
        }
    }
}

impl FieldHandle for OwnedField {
    fn record_name(&self) -> &str {
        &self.record
    }

    fn field_name(&self) -> &str {
        &self.field
    }

    fn element_count(&self) -> usize {
        match &self.values {
            FieldValues::Float(v) => v.len(),
            FieldValues::Double(v) => v.len(),
            FieldValues::Text(v) => v.len(),
        }
    }

    fn data(&self) -> FieldData<'_> {
        match &self.values {
            FieldValues::Float(v) => FieldData::Float(v),
            FieldValues::Double(v) => FieldData::Double(v),
            FieldValues::Text(_) => FieldData::Other(self),
        }
    }
}

impl ConvertToStrings for OwnedField {
    fn convert(&self) -> Result<Vec<String>, ConvertError> {
        match &self.values {
            FieldValues::Text(v) => Ok(v.clone()),
            // Float/Double fields never reach the generic conversion path.
            _ => Err(ConvertError::new("field has no text payload")),
        }
    }
}
