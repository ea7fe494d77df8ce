use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::field::ConvertError;
use crate::sink::SinkError;

/// Errors that can occur in the put-logging crate.
///
/// Every failure is surfaced synchronously to the caller of the failing
/// operation; nothing here is retried internally.
#[derive(Debug)]
pub enum Error {
    /// The audit policy path could not be resolved at startup. Fatal to
    /// initialization: the hook is never registered.
    Config {
        /// The path as supplied by the caller.
        path: PathBuf,
        /// The underlying resolution failure.
        source: io::Error,
    },
    /// The external runtime rejected the audit policy file.
    Policy {
        /// Reason reported by the runtime.
        message: String,
    },
    /// The runtime's generic string conversion failed for a field.
    Convert {
        /// `record.field` identity of the field that failed.
        target: String,
        /// The underlying conversion failure.
        source: ConvertError,
    },
    /// An audit line could not be written to the sink.
    Emit(SinkError),
}

impl Error {
    /// Creates a configuration error for an unresolvable policy path.
    pub fn config(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Config {
            path: path.into(),
            source,
        }
    }

    /// Creates a policy-application error.
    pub fn policy(message: impl Into<String>) -> Self {
        Error::Policy {
            message: message.into(),
        }
    }

    /// Creates a conversion error for the named `record.field`.
    pub fn convert(record: &str, field: &str, source: ConvertError) -> Self {
        Error::Convert {
            target: format!("{}.{}", record, field),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config { path, source } => {
                write!(f, "cannot resolve policy path {}: {}", path.display(), source)
            }
            Error::Policy { message } => write!(f, "policy rejected: {}", message),
            Error::Convert { target, source } => {
                write!(f, "cannot format {}: {}", target, source)
            }
            Error::Emit(e) => write!(f, "audit emission failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config { source, .. } => Some(source),
            Error::Policy { .. } => None,
            Error::Convert { source, .. } => Some(source),
            Error::Emit(e) => Some(e),
        }
    }
}

impl From<SinkError> for Error {
    fn from(e: SinkError) -> Self {
        Error::Emit(e)
    }
}
