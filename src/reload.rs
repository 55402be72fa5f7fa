//! Verify-then-reload coordination and the live runtime-state query.
//!
//! External processes are reached through [`CommandRunner`], so tests
//! can script outcomes without an Unbound installation.

use std::path::Path;
use std::process::Command;

use crate::error::{OverrideError, Result};
use crate::record::ContentClass;

/// Configuration syntax checker binary.
const CHECKCONF: &str = "unbound-checkconf";
/// Remote-control client binary for runtime-state queries.
const CONTROL: &str = "unbound-control";
/// Service manager invocation that activates a checked configuration.
const RESTART: [&str; 3] = ["systemctl", "restart", "unbound.service"];

/// Runs an external command and reports its output.
///
/// `Ok` carries captured stdout; `Err` carries stderr or a spawn failure
/// message. Implementations decide nothing about retries or rollback.
pub trait CommandRunner {
    /// Runs `argv[0]` with the remaining arguments.
    ///
    /// # Errors
    ///
    /// Returns the command's stderr (or a description of the spawn
    /// failure) when the command does not exit successfully.
    fn run(&self, argv: &[&str]) -> std::result::Result<String, String>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
///
/// # Permissions
///
/// Checking, restarting, and querying Unbound require root. The caller
/// must handle elevation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[&str]) -> std::result::Result<String, String> {
        let (program, args) = argv.split_first().ok_or("empty command")?;
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| format!("failed to run {program}: {e}"))?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).into_owned())
        }
    }
}

/// Runs the external syntax check and, if it passes, the service reload.
pub struct Reloader<R> {
    runner: R,
}

impl<R: CommandRunner> Reloader<R> {
    /// Creates a coordinator over the given runner.
    #[must_use]
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Checks the configuration at `conf_path` and restarts the service.
    ///
    /// The two steps are sequential and short-circuit: a failing check
    /// skips the reload. There is no retry policy; a failure is terminal
    /// for the request and the mutation already on disk is not rolled
    /// back.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::Config`] if the syntax check fails, or
    /// [`OverrideError::Service`] if the reload fails.
    pub fn verify_and_activate(&self, conf_path: &Path) -> Result<()> {
        let conf = conf_path.display().to_string();
        if let Err(stderr) = self.runner.run(&[CHECKCONF, &conf]) {
            tracing::warn!(conf = %conf, stderr = %stderr, "Configuration check failed");
            return Err(OverrideError::Config(stderr));
        }
        tracing::debug!(conf = %conf, "Configuration check passed");

        if let Err(stderr) = self.runner.run(&RESTART) {
            tracing::warn!(stderr = %stderr, "Service restart failed");
            return Err(OverrideError::Service(stderr));
        }
        tracing::info!(conf = %conf, "Reloaded resolver with updated overrides");
        Ok(())
    }

    /// Queries the resolver's live override state for a content class.
    ///
    /// Returns each non-empty output line of the control command.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::Internal`] if the query command fails.
    pub fn list(&self, class: ContentClass) -> Result<Vec<String>> {
        let output = self
            .runner
            .run(&[CONTROL, class.list_command()])
            .map_err(OverrideError::Internal)?;
        Ok(output
            .lines()
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scripted runner: pops pre-programmed results, records argv.
    struct Script {
        results: RefCell<Vec<std::result::Result<String, String>>>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl Script {
        fn new(results: Vec<std::result::Result<String, String>>) -> Self {
            Self {
                results: RefCell::new(results),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for &Script {
        fn run(&self, argv: &[&str]) -> std::result::Result<String, String> {
            self.calls
                .borrow_mut()
                .push(argv.iter().map(ToString::to_string).collect());
            self.results.borrow_mut().remove(0)
        }
    }

    #[test]
    fn check_then_restart_on_success() {
        let script = Script::new(vec![Ok(String::new()), Ok(String::new())]);
        let reloader = Reloader::new(&script);
        reloader
            .verify_and_activate(Path::new("/etc/unbound/unbound.conf.d/local_data.conf"))
            .unwrap();

        let calls = script.calls.borrow();
        assert_eq!(
            calls[0],
            vec!["unbound-checkconf", "/etc/unbound/unbound.conf.d/local_data.conf"]
        );
        assert_eq!(calls[1], vec!["systemctl", "restart", "unbound.service"]);
    }

    #[test]
    fn failed_check_skips_restart() {
        let script = Script::new(vec![Err("syntax error".into())]);
        let reloader = Reloader::new(&script);
        let err = reloader
            .verify_and_activate(Path::new("/tmp/local_data.conf"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Error: Configuration error.");
        assert_eq!(script.calls.borrow().len(), 1);
    }

    #[test]
    fn failed_restart_is_service_error() {
        let script = Script::new(vec![Ok(String::new()), Err("unit failed".into())]);
        let reloader = Reloader::new(&script);
        let err = reloader
            .verify_and_activate(Path::new("/tmp/local_data.conf"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Error: Service could not be restarted!");
    }

    #[test]
    fn list_filters_empty_lines() {
        let script = Script::new(vec![Ok("a.example.com. 3600 IN A 10.0.0.1\n\n\
                                          b.example.com. 3600 IN A 10.0.0.2\n"
            .into())]);
        let reloader = Reloader::new(&script);
        let lines = reloader.list(ContentClass::Data).unwrap();
        assert_eq!(
            lines,
            vec![
                "a.example.com. 3600 IN A 10.0.0.1",
                "b.example.com. 3600 IN A 10.0.0.2"
            ]
        );
        assert_eq!(
            script.calls.borrow()[0],
            vec!["unbound-control", "list_local_data"]
        );
    }

    #[test]
    fn list_failure_is_internal() {
        let script = Script::new(vec![Err("connect failed".into())]);
        let reloader = Reloader::new(&script);
        let err = reloader.list(ContentClass::Zones).unwrap_err();
        assert_eq!(err.status(), 500);
        assert_eq!(err.to_string(), "connect failed");
    }
}
