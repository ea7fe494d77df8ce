//! Initialization entry point and the seam to the external runtime.

use std::path::Path;

use crate::config::LogConfig;
use crate::error::Error;
use crate::logger::PutLogger;

/// The external control-system runtime, as seen by put logging.
///
/// The runtime decides which writes are trapped (driven by the policy file)
/// and calls the registered logger's [`PutLogger::on_write`] once before and
/// once after each trapped write. See the crate demos for an in-memory
/// implementation.
pub trait WriteRuntime {
    /// Applies the audit policy file that selects trapped writes.
    ///
    /// The path is already resolved to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Policy`] (or any error the runtime chooses) if the
    /// policy file is rejected.
    fn apply_access_policy(&mut self, path: &Path) -> Result<(), Error>;

    /// Registers the write listener. Called once per process lifetime.
    fn register_listener(&mut self, logger: PutLogger);
}

/// Initializes put logging against the given runtime.
///
/// Resolves `policy_path` to an absolute path, applies it through the
/// runtime, then registers a stdout-backed [`PutLogger`] configured with
/// `max_array_length`. Expected to run exactly once per process lifetime,
/// before any write traffic begins.
///
/// # Errors
///
/// Fails with [`Error::Config`] if the policy path cannot be resolved (the
/// hook is then never registered), or with whatever the runtime reports from
/// applying the policy.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use pvlog::{hook_pv_logging, Error, PutLogger, WriteRuntime};
///
/// struct Ioc {
///     listener: Option<PutLogger>,
/// }
///
/// impl WriteRuntime for Ioc {
///     fn apply_access_policy(&mut self, _path: &Path) -> Result<(), Error> {
///         Ok(())
///     }
///     fn register_listener(&mut self, logger: PutLogger) {
///         self.listener = Some(logger);
///     }
/// }
///
/// let mut ioc = Ioc { listener: None };
/// hook_pv_logging(&mut ioc, "db/access.acf", 10)?;
/// # Ok::<(), pvlog::Error>(())
/// ```
pub fn hook_pv_logging(
    runtime: &mut impl WriteRuntime,
    policy_path: impl AsRef<Path>,
    max_array_length: usize,
) -> Result<(), Error> {
    let config = LogConfig::new(policy_path, max_array_length)?;
    runtime.apply_access_policy(config.policy_path())?;

    tracing::debug!(
        policy = %config.policy_path().display(),
        max_array_length,
        "registering put-logging listener"
    );
    runtime.register_listener(PutLogger::new(config));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeRuntime {
        applied: Option<std::path::PathBuf>,
        listener: Option<PutLogger>,
        reject_policy: bool,
    }

    impl WriteRuntime for FakeRuntime {
        fn apply_access_policy(&mut self, path: &Path) -> Result<(), Error> {
            if self.reject_policy {
                return Err(Error::policy("unparseable access file"));
            }
            self.applied = Some(path.to_path_buf());
            Ok(())
        }

        fn register_listener(&mut self, logger: PutLogger) {
            self.listener = Some(logger);
        }
    }

    #[test]
    fn hook_applies_policy_then_registers_listener() {
        let mut runtime = FakeRuntime::default();
        let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");

        hook_pv_logging(&mut runtime, manifest, 10).unwrap();

        let applied = runtime.applied.expect("policy applied");
        assert!(applied.is_absolute());
        let listener = runtime.listener.expect("listener registered");
        assert_eq!(listener.config().max_array_length(), 10);
    }

    #[test]
    fn unresolvable_policy_path_fails_before_registration() {
        let mut runtime = FakeRuntime::default();

        let err = hook_pv_logging(&mut runtime, "/no/such/access.acf", 10).unwrap_err();

        assert!(matches!(err, Error::Config { .. }));
        assert!(runtime.applied.is_none());
        assert!(runtime.listener.is_none());
    }

    #[test]
    fn rejected_policy_fails_before_registration() {
        let mut runtime = FakeRuntime {
            reject_policy: true,
            ..FakeRuntime::default()
        };
        let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");

        let err = hook_pv_logging(&mut runtime, manifest, 10).unwrap_err();

        assert!(matches!(err, Error::Policy { .. }));
        assert!(runtime.listener.is_none());
    }
}
