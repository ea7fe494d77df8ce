use std::cell::RefCell;
use std::fmt;
use std::io::Write;

/// Error returned when an audit line cannot be written to a sink.
///
/// # Examples
///
/// ```
/// use pvlog::{SinkError, SinkErrorKind};
///
/// let error = SinkError::new(SinkErrorKind::Io);
/// assert_eq!(error.kind(), SinkErrorKind::Io);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    kind: SinkErrorKind,
    message: Option<String>,
}

impl SinkError {
    /// Creates a new sink error with the specified kind.
    pub fn new(kind: SinkErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a new sink error with a custom message.
    pub fn with_message(kind: SinkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SinkErrorKind {
        self.kind
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = &self.message {
            write!(f, "audit sink error ({}): {}", self.kind, msg)
        } else {
            write!(f, "audit sink error ({})", self.kind)
        }
    }
}

impl std::error::Error for SinkError {}

/// Kind of sink error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkErrorKind {
    /// I/O error while writing the line.
    Io,
    /// Sink cannot accept further lines.
    Closed,
}

impl fmt::Display for SinkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::Closed => write!(f, "sink closed"),
        }
    }
}

/// Destination for completed audit lines.
///
/// One call per completed write; the line carries no trailing newline, the
/// sink supplies its own line termination. Emission is never retried by the
/// caller — a failure is reported upward and the write's captured state stays
/// released.
pub trait AuditSink {
    /// Writes one audit line.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the line could not be written.
    fn emit(&self, line: &str) -> Result<(), SinkError>;
}

/// Shared sinks emit through the shared reference, letting a caller keep a
/// handle to a sink that has been handed to a logger.
impl<S: AuditSink + ?Sized> AuditSink for std::rc::Rc<S> {
    fn emit(&self, line: &str) -> Result<(), SinkError> {
        (**self).emit(line)
    }
}

/// Sink that prints each audit line to the process's standard output.
///
/// This is the production sink: one newline-terminated line per completed
/// write, nothing buffered across calls.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    /// Creates a stdout sink.
    pub fn new() -> Self {
        Self
    }
}

impl AuditSink for StdoutSink {
    fn emit(&self, line: &str) -> Result<(), SinkError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", line)
            .map_err(|e| SinkError::with_message(SinkErrorKind::Io, e.to_string()))
    }
}

/// In-memory sink recording audit lines in order.
///
/// Intended for tests and demos; production traffic goes to [`StdoutSink`].
///
/// # Examples
///
/// ```
/// use pvlog::{AuditSink, MemorySink};
///
/// let sink = MemorySink::new();
/// sink.emit("alice@host1 MOTOR1.VAL 1 -> 2").unwrap();
///
/// assert_eq!(sink.lines(), vec!["alice@host1 MOTOR1.VAL 1 -> 2".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: RefCell<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty in-memory sink.
    pub fn new() -> Self {
        Self {
            lines: RefCell::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all recorded lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Returns the number of recorded lines.
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    /// Returns true if no lines have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl AuditSink for MemorySink {
    fn emit(&self, line: &str) -> Result<(), SinkError> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }
}
