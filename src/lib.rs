//! Audit logging for external writes to process variables.
//!
//! An external control-system runtime traps each external write and calls
//! into this crate twice: once just before the write is applied and once
//! after it completes. The crate captures the field's value at the first
//! call, holds it across the write inside runtime-owned per-call storage,
//! and emits a single human-readable line at the second call:
//!
//! ```text
//! alice@host1 MOTOR1.VAL 3.1400000 -> 6.2800000
//! ```
//!
//! # Core Types
//!
//! - [`PutLogger`]: the two-phase interceptor driven by the runtime
//! - [`FieldHandle`]: the runtime's borrowed view of one writable field
//! - [`CapturedValue`] / [`PendingSlot`]: a pre-write snapshot and the
//!   single-owner slot that carries it between phases
//! - [`AuditSink`]: where completed audit lines go ([`StdoutSink`] in
//!   production, [`MemorySink`] in tests)
//! - [`hook_pv_logging`]: one-shot initialization against a [`WriteRuntime`]
//!
//! # Examples
//!
//! ```
//! use pvlog::{
//!     LogConfig, MemorySink, OwnedField, PendingSlot, PutLogger, WriteMessage, WritePhase,
//! };
//!
//! let config = LogConfig::new(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"), 10)?;
//! let logger = PutLogger::with_sink(config, Box::new(MemorySink::new()));
//!
//! // The runtime drives both phases of each trapped write.
//! let mut slot = PendingSlot::new();
//! let before = OwnedField::floats("MOTOR1", "VAL", vec![3.14]);
//! logger.on_write(
//!     &mut WriteMessage { user: "alice", host: "host1", handle: Some(&before), slot: &mut slot },
//!     WritePhase::Before,
//! )?;
//!
//! let after = OwnedField::floats("MOTOR1", "VAL", vec![6.28]);
//! logger.on_write(
//!     &mut WriteMessage { user: "alice", host: "host1", handle: Some(&after), slot: &mut slot },
//!     WritePhase::After,
//! )?;
//! # Ok::<(), pvlog::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capture;
mod config;
mod error;
mod field;
mod format;
mod logger;
mod render;
mod runtime;
mod sink;

pub use capture::{CapturedValue, PendingSlot};
pub use config::LogConfig;
pub use error::Error;
pub use field::{ConvertError, ConvertToStrings, FieldData, FieldHandle, OwnedField};
pub use format::format_field;
pub use logger::{PutLogger, WriteMessage, WritePhase};
pub use render::{audit_line, render_value, TRUNCATION_MARKER, UNKNOWN_VALUE};
pub use runtime::{hook_pv_logging, WriteRuntime};
pub use sink::{AuditSink, MemorySink, SinkError, SinkErrorKind, StdoutSink};
