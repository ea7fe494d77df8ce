//! The two-phase write interceptor.
//!
//! The external runtime calls [`PutLogger::on_write`] twice per trapped
//! write: once before the write is applied and once after it completes.
//! The pre-write capture travels between the two calls inside the
//! runtime-owned [`PendingSlot`], so abandoned writes release their capture
//! when the runtime drops its per-call context.

use crate::capture::PendingSlot;
use crate::config::LogConfig;
use crate::error::Error;
use crate::field::FieldHandle;
use crate::format::format_field;
use crate::render::{audit_line, render_value, UNKNOWN_VALUE};
use crate::sink::{AuditSink, StdoutSink};

/// Which side of the write a hook invocation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    /// The write has been authorized but not yet applied.
    Before,
    /// The write has completed.
    After,
}

/// Payload of one hook invocation, assembled by the external runtime.
///
/// The handle is borrowed for the duration of the call; `slot` is the
/// runtime's per-call storage correlating the two phases of one write.
/// A runtime that cannot supply a handle passes `None`, in which case
/// nothing is captured (before) or emitted (after).
pub struct WriteMessage<'a> {
    /// Identity of the user performing the write.
    pub user: &'a str,
    /// Host the write originates from.
    pub host: &'a str,
    /// The field being written, if the runtime can supply it.
    pub handle: Option<&'a dyn FieldHandle>,
    /// Per-call storage for the pre-write capture.
    pub slot: &'a mut PendingSlot,
}

/// Audit logger for trapped process-variable writes.
///
/// Construct with [`PutLogger::new`] for stdout output, or
/// [`PutLogger::with_sink`] to direct lines elsewhere (tests, demos).
///
/// # Examples
///
/// ```
/// use pvlog::{
///     LogConfig, MemorySink, OwnedField, PendingSlot, PutLogger, WriteMessage, WritePhase,
/// };
///
/// let config = LogConfig::new(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"), 10)?;
/// let logger = PutLogger::with_sink(config, Box::new(MemorySink::new()));
///
/// let mut slot = PendingSlot::new();
/// let old = OwnedField::floats("MOTOR1", "VAL", vec![3.14]);
/// logger.on_write(
///     &mut WriteMessage { user: "alice", host: "host1", handle: Some(&old), slot: &mut slot },
///     WritePhase::Before,
/// )?;
///
/// let new = OwnedField::floats("MOTOR1", "VAL", vec![6.28]);
/// logger.on_write(
///     &mut WriteMessage { user: "alice", host: "host1", handle: Some(&new), slot: &mut slot },
///     WritePhase::After,
/// )?;
/// # Ok::<(), pvlog::Error>(())
/// ```
pub struct PutLogger {
    config: LogConfig,
    sink: Box<dyn AuditSink>,
}

impl PutLogger {
    /// Creates a logger emitting to standard output.
    pub fn new(config: LogConfig) -> Self {
        Self::with_sink(config, Box::new(StdoutSink::new()))
    }

    /// Creates a logger emitting to the given sink.
    pub fn with_sink(config: LogConfig, sink: Box<dyn AuditSink>) -> Self {
        Self { config, sink }
    }

    /// Returns the logger's configuration.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Handles one phase of a trapped write.
    ///
    /// `Before` captures the field's current value into the message's slot.
    /// Any capture still pending in the slot is released first, so a runtime
    /// that violates pairing discipline (two `Before`s without an `After`)
    /// leaks nothing. `After` takes the capture out of the slot before doing
    /// anything fallible, formats the new value, and emits one audit line.
    ///
    /// An `After` whose slot holds no capture — hook installed mid-stream,
    /// or a `Before` that could not capture — emits the line with the
    /// `<unknown>` previous-value marker rather than skipping it.
    ///
    /// # Errors
    ///
    /// Propagates conversion failures from the runtime's generic string
    /// conversion and sink failures from emission. On every error path the
    /// slot has already been cleared; per-write state stays consistent.
    pub fn on_write(&self, message: &mut WriteMessage<'_>, phase: WritePhase) -> Result<(), Error> {
        match phase {
            WritePhase::Before => self.capture_before(message),
            WritePhase::After => self.emit_after(message),
        }
    }

    fn capture_before(&self, message: &mut WriteMessage<'_>) -> Result<(), Error> {
        // Clear the slot before anything fallible: a stale capture from a
        // violated pairing must not survive into this write's after phase.
        if message.slot.take().is_some() {
            tracing::warn!(
                user = message.user,
                host = message.host,
                "pending capture displaced by overlapping before phase"
            );
        }

        let Some(handle) = message.handle else {
            tracing::debug!(
                user = message.user,
                host = message.host,
                "before phase without field handle, nothing captured"
            );
            return Ok(());
        };

        let captured = format_field(handle)?;
        message.slot.store(captured);
        Ok(())
    }

    fn emit_after(&self, message: &mut WriteMessage<'_>) -> Result<(), Error> {
        // Take ownership of the capture first so it is released on every
        // path, including format and emission failures.
        let old = message.slot.take();

        let Some(handle) = message.handle else {
            tracing::debug!(
                user = message.user,
                host = message.host,
                "after phase without field handle, nothing emitted"
            );
            return Ok(());
        };

        let new = format_field(handle)?;

        let max = self.config.max_array_length();
        let old_rendering = match &old {
            Some(value) => render_value(value, max),
            None => UNKNOWN_VALUE.to_string(),
        };
        let new_rendering = render_value(&new, max);

        let line = audit_line(
            message.user,
            message.host,
            handle.record_name(),
            handle.field_name(),
            &old_rendering,
            &new_rendering,
        );
        self.sink.emit(&line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::rc::Rc;

    fn test_config(max: usize) -> LogConfig {
        LogConfig::new(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"), max)
            .expect("manifest path resolves")
    }

    fn logger_with_memory(max: usize) -> (PutLogger, Rc<MemorySink>) {
        let sink = Rc::new(MemorySink::new());
        let logger = PutLogger::with_sink(test_config(max), Box::new(Rc::clone(&sink)));
        (logger, sink)
    }

    fn message<'a>(
        handle: Option<&'a dyn FieldHandle>,
        slot: &'a mut PendingSlot,
    ) -> WriteMessage<'a> {
        WriteMessage {
            user: "alice",
            host: "host1",
            handle,
            slot,
        }
    }

    #[test]
    fn before_then_after_emits_one_line() {
        let (logger, sink) = logger_with_memory(10);
        let mut slot = PendingSlot::new();

        let old = crate::OwnedField::floats("MOTOR1", "VAL", vec![3.14]);
        logger
            .on_write(&mut message(Some(&old), &mut slot), WritePhase::Before)
            .unwrap();
        assert!(slot.is_pending());

        let new = crate::OwnedField::floats("MOTOR1", "VAL", vec![6.28]);
        logger
            .on_write(&mut message(Some(&new), &mut slot), WritePhase::After)
            .unwrap();

        assert_eq!(
            sink.lines(),
            vec!["alice@host1 MOTOR1.VAL 3.1400000 -> 6.2800000".to_string()]
        );
        assert!(!slot.is_pending());
    }

    #[test]
    fn after_without_before_emits_unknown_marker() {
        let (logger, sink) = logger_with_memory(10);
        let mut slot = PendingSlot::new();

        let new = crate::OwnedField::floats("MOTOR1", "VAL", vec![6.28]);
        logger
            .on_write(&mut message(Some(&new), &mut slot), WritePhase::After)
            .unwrap();

        assert_eq!(
            sink.lines(),
            vec!["alice@host1 MOTOR1.VAL <unknown> -> 6.2800000".to_string()]
        );
    }

    #[test]
    fn overlapping_before_releases_earlier_capture() {
        let (logger, sink) = logger_with_memory(10);
        let mut slot = PendingSlot::new();

        let first = crate::OwnedField::floats("MOTOR1", "VAL", vec![1.0]);
        logger
            .on_write(&mut message(Some(&first), &mut slot), WritePhase::Before)
            .unwrap();

        let second = crate::OwnedField::floats("MOTOR1", "VAL", vec![2.0]);
        logger
            .on_write(&mut message(Some(&second), &mut slot), WritePhase::Before)
            .unwrap();

        let new = crate::OwnedField::floats("MOTOR1", "VAL", vec![3.0]);
        logger
            .on_write(&mut message(Some(&new), &mut slot), WritePhase::After)
            .unwrap();

        // The line pairs with the second before, not the displaced first.
        assert_eq!(
            sink.lines(),
            vec!["alice@host1 MOTOR1.VAL 2.0000000 -> 3.0000000".to_string()]
        );
    }

    #[test]
    fn after_without_handle_emits_nothing_and_clears_slot() {
        let (logger, sink) = logger_with_memory(10);
        let mut slot = PendingSlot::new();

        let old = crate::OwnedField::floats("MOTOR1", "VAL", vec![1.0]);
        logger
            .on_write(&mut message(Some(&old), &mut slot), WritePhase::Before)
            .unwrap();

        logger
            .on_write(&mut message(None, &mut slot), WritePhase::After)
            .unwrap();

        assert!(sink.is_empty());
        assert!(!slot.is_pending());
    }

    #[test]
    fn before_without_handle_captures_nothing() {
        let (logger, _sink) = logger_with_memory(10);
        let mut slot = PendingSlot::new();

        logger
            .on_write(&mut message(None, &mut slot), WritePhase::Before)
            .unwrap();

        assert!(!slot.is_pending());
    }

    #[test]
    fn array_values_are_truncated_at_emission() {
        let (logger, sink) = logger_with_memory(2);
        let mut slot = PendingSlot::new();

        let old = crate::OwnedField::texts("WAVE", "VAL", vec!["1", "2", "3", "4", "5"]);
        logger
            .on_write(&mut message(Some(&old), &mut slot), WritePhase::Before)
            .unwrap();

        let new = crate::OwnedField::texts("WAVE", "VAL", vec!["6", "7", "8", "9", "10"]);
        logger
            .on_write(&mut message(Some(&new), &mut slot), WritePhase::After)
            .unwrap();

        assert_eq!(
            sink.lines(),
            vec!["alice@host1 WAVE.VAL [1, 2, ..., 5] -> [6, 7, ..., 10]".to_string()]
        );
    }

    #[test]
    fn format_failure_in_after_still_clears_slot() {
        struct Unreadable;

        impl crate::ConvertToStrings for Unreadable {
            fn convert(&self) -> Result<Vec<String>, crate::ConvertError> {
                Err(crate::ConvertError::new("unreadable"))
            }
        }

        impl FieldHandle for Unreadable {
            fn record_name(&self) -> &str {
                "BROKEN"
            }
            fn field_name(&self) -> &str {
                "VAL"
            }
            fn element_count(&self) -> usize {
                1
            }
            fn data(&self) -> crate::FieldData<'_> {
                crate::FieldData::Other(self)
            }
        }

        let (logger, sink) = logger_with_memory(10);
        let mut slot = PendingSlot::new();

        let old = crate::OwnedField::floats("BROKEN", "VAL", vec![1.0]);
        logger
            .on_write(&mut message(Some(&old), &mut slot), WritePhase::Before)
            .unwrap();

        let err = logger
            .on_write(&mut message(Some(&Unreadable), &mut slot), WritePhase::After)
            .unwrap_err();

        assert!(matches!(err, Error::Convert { .. }));
        assert!(sink.is_empty());
        // The capture was released even though emission never happened.
        assert!(!slot.is_pending());
    }
}
