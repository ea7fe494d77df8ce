//! Type-directed rendering of field contents to printable strings.
//!
//! The generic runtime conversion is poor at floating point, so single- and
//! double-precision fields are formatted here with fixed decimal precision;
//! every other element class is delegated back to the runtime.

use crate::capture::CapturedValue;
use crate::error::Error;
use crate::field::{FieldData, FieldHandle};

/// Renders a field's current contents, one printable string per element.
///
/// The result's length always equals the handle's element count. No
/// truncation happens here — bounding long arrays is a display concern,
/// handled at emission. Formatting is deterministic: the same raw contents
/// of the same element class always produce the same strings.
///
/// # Errors
///
/// Fails only when the runtime's generic conversion collaborator fails, or
/// when it returns a string count that disagrees with the handle's element
/// count.
///
/// # Examples
///
/// ```
/// use pvlog::{format_field, OwnedField};
///
/// let field = OwnedField::floats("MOTOR1", "VAL", vec![3.14]);
/// let value = format_field(&field).unwrap();
/// assert_eq!(value.elements(), ["3.1400000"]);
/// ```
pub fn format_field(handle: &dyn FieldHandle) -> Result<CapturedValue, Error> {
    let elements = match handle.data() {
        FieldData::Float(raw) => raw.iter().map(|v| format_single(*v)).collect(),
        FieldData::Double(raw) => raw.iter().map(|v| format_double(*v)).collect(),
        FieldData::Other(conv) => {
            let strings = conv
                .convert()
                .map_err(|e| Error::convert(handle.record_name(), handle.field_name(), e))?;
            if strings.len() != handle.element_count() {
                return Err(Error::convert(
                    handle.record_name(),
                    handle.field_name(),
                    crate::field::ConvertError::new(format!(
                        "conversion returned {} strings for {} elements",
                        strings.len(),
                        handle.element_count()
                    )),
                ));
            }
            strings
        }
    };
    Ok(CapturedValue::new(elements))
}

/// Formats a single-precision element at 7-digit decimal precision.
///
/// Formatting the raw f32 directly at fixed precision exposes binary noise
/// past single precision (3.14f32 would print as 3.1400001), so the value
/// is rounded through its shortest round-trip decimal form first.
fn format_single(value: f32) -> String {
    let shortest = value.to_string();
    match shortest.parse::<f64>() {
        Ok(rounded) => format!("{:.7}", rounded),
        Err(_) => shortest,
    }
}

/// Formats a double-precision element at 15-digit decimal precision.
fn format_double(value: f64) -> String {
    format!("{:.15}", value)
}
