//! Display rendering of captured values and audit-line composition.

use crate::capture::CapturedValue;

/// Marker printed in place of elided interior elements.
pub const TRUNCATION_MARKER: &str = "...";

/// Rendering printed when a write completes with no pre-write capture.
pub const UNKNOWN_VALUE: &str = "<unknown>";

/// Renders a captured value for display, bounding long arrays.
///
/// A single element is printed verbatim. Longer captures render as a
/// bracketed, comma-separated list of the first `max_array_length` elements;
/// when elements are elided, the truncation marker and the literal final
/// element are appended. `max_array_length == 0` follows the same rule, so
/// the marker and final element still appear.
///
/// # Examples
///
/// ```
/// use pvlog::{render_value, CapturedValue};
///
/// let value = CapturedValue::new(
///     ["1", "2", "3", "4", "5"].map(String::from).to_vec(),
/// );
/// assert_eq!(render_value(&value, 2), "[1, 2, ..., 5]");
/// assert_eq!(render_value(&value, 5), "[1, 2, 3, 4, 5]");
/// ```
pub fn render_value(value: &CapturedValue, max_array_length: usize) -> String {
    let elements = value.elements();
    if elements.len() == 1 {
        return elements[0].clone();
    }

    let shown = elements.len().min(max_array_length);
    let mut out = String::from("[");
    for (i, element) in elements[..shown].iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(element);
    }
    if elements.len() > max_array_length {
        if shown > 0 {
            out.push_str(", ");
        }
        out.push_str(TRUNCATION_MARKER);
        if let Some(last) = elements.last() {
            out.push_str(", ");
            out.push_str(last);
        }
    }
    out.push(']');
    out
}

/// Composes one audit line for a completed write.
///
/// Format: `<user>@<host> <record>.<field> <old> -> <new>`, where the value
/// renderings come from [`render_value`] (or [`UNKNOWN_VALUE`] when no
/// pre-write capture exists). The trailing newline is supplied by the sink.
pub fn audit_line(
    user: &str,
    host: &str,
    record: &str,
    field: &str,
    old: &str,
    new: &str,
) -> String {
    format!("{}@{} {}.{} {} -> {}", user, host, record, field, old, new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(elements: &[&str]) -> CapturedValue {
        CapturedValue::new(elements.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn scalar_renders_verbatim() {
        assert_eq!(render_value(&capture(&["3.1400000"]), 2), "3.1400000");
    }

    #[test]
    fn short_array_renders_in_full() {
        let value = capture(&["1", "2", "3", "4", "5"]);
        assert_eq!(render_value(&value, 5), "[1, 2, 3, 4, 5]");
        assert_eq!(render_value(&value, 10), "[1, 2, 3, 4, 5]");
    }

    #[test]
    fn long_array_elides_interior_elements() {
        let value = capture(&["1", "2", "3", "4", "5"]);
        assert_eq!(render_value(&value, 2), "[1, 2, ..., 5]");
    }

    #[test]
    fn one_past_the_bound_still_shows_the_marker() {
        let value = capture(&["1", "2", "3"]);
        assert_eq!(render_value(&value, 2), "[1, 2, ..., 3]");
    }

    #[test]
    fn zero_bound_shows_marker_and_final_element() {
        let value = capture(&["1", "2", "3"]);
        assert_eq!(render_value(&value, 0), "[..., 3]");
    }

    #[test]
    fn two_element_array_is_bracketed() {
        let value = capture(&["a", "b"]);
        assert_eq!(render_value(&value, 4), "[a, b]");
    }

    #[test]
    fn audit_line_matches_fixed_layout() {
        let line = audit_line("alice", "host1", "MOTOR1", "VAL", "3.1400000", "6.2800000");
        assert_eq!(line, "alice@host1 MOTOR1.VAL 3.1400000 -> 6.2800000");
    }
}
