//! Captured values and the per-call storage slot that carries them
//! between the two hook phases.

use std::fmt;

/// A field's contents rendered to printable strings at a point in time.
///
/// One string per element; the length equals the handle's element count at
/// capture time. A `CapturedValue` is immutable once produced — truncation
/// for display happens later, at emission.
///
/// # Examples
///
/// ```
/// use pvlog::CapturedValue;
///
/// let value = CapturedValue::new(vec!["1.5000000".to_string()]);
/// assert_eq!(value.len(), 1);
/// assert_eq!(value.elements(), ["1.5000000"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedValue {
    elements: Vec<String>,
}

impl CapturedValue {
    /// Wraps rendered elements into a captured value.
    pub fn new(elements: Vec<String>) -> Self {
        Self { elements }
    }

    /// Returns the rendered elements in field order.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the capture holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for CapturedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elements.join(", "))
    }
}

/// Single-owner storage for one in-flight write's pre-write capture.
///
/// The external runtime embeds a `PendingSlot` in whatever per-call storage
/// it uses to correlate the two phases of a write, and passes it back to the
/// hook on both calls. The slot owns the capture outright: if the runtime
/// abandons the write and drops its per-call context, the capture is
/// reclaimed with it — release does not depend on an `after` ever arriving.
///
/// At most one capture is pending per slot. Storing into an occupied slot
/// returns the displaced capture so the caller can observe the overlap.
///
/// # Examples
///
/// ```
/// use pvlog::{CapturedValue, PendingSlot};
///
/// let mut slot = PendingSlot::new();
/// assert!(!slot.is_pending());
///
/// slot.store(CapturedValue::new(vec!["3.14".to_string()]));
/// assert!(slot.is_pending());
///
/// let taken = slot.take().unwrap();
/// assert_eq!(taken.elements(), ["3.14"]);
/// assert!(!slot.is_pending());
/// ```
#[derive(Debug, Default)]
pub struct PendingSlot {
    pending: Option<CapturedValue>,
}

impl PendingSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Stores a capture, returning any capture that was still pending.
    pub fn store(&mut self, value: CapturedValue) -> Option<CapturedValue> {
        self.pending.replace(value)
    }

    /// Transfers the pending capture out of the slot, leaving it empty.
    pub fn take(&mut self) -> Option<CapturedValue> {
        self.pending.take()
    }

    /// Returns true if a capture is awaiting its `after` phase.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(s: &str) -> CapturedValue {
        CapturedValue::new(vec![s.to_string()])
    }

    #[test]
    fn slot_starts_empty() {
        let slot = PendingSlot::new();
        assert!(!slot.is_pending());
    }

    #[test]
    fn store_then_take_round_trips() {
        let mut slot = PendingSlot::new();
        slot.store(capture("old"));

        let taken = slot.take().expect("capture should be pending");
        assert_eq!(taken.elements(), ["old"]);
        assert!(slot.take().is_none());
    }

    #[test]
    fn store_into_occupied_slot_displaces_previous_capture() {
        let mut slot = PendingSlot::new();
        assert!(slot.store(capture("first")).is_none());

        let displaced = slot.store(capture("second")).expect("overlap displaces");
        assert_eq!(displaced.elements(), ["first"]);

        // Only the newer capture remains pending.
        assert_eq!(slot.take().unwrap().elements(), ["second"]);
    }

    #[test]
    fn captured_value_display_joins_elements() {
        let value = CapturedValue::new(vec!["1".to_string(), "2".to_string()]);
        assert_eq!(value.to_string(), "1, 2");
    }
}
