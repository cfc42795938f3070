//! launchctl registration capability.
//!
//! The engine never talks to launchd directly; it goes through the
//! [`JobScheduler`] trait so tests can substitute a recording fake and the
//! production path stays a thin wrapper over `/bin/launchctl`.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

const LAUNCHCTL: &str = "/bin/launchctl";

/// Outcome of one register/unregister subprocess call.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Captured stdout followed by stderr.
    pub combined: String,
    /// Exit code. `None` when the process died on a signal or never spawned.
    pub status: Option<i32>,
}

impl RunOutput {
    /// `true` when the call exited zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// A successful output with no text, for fakes and short-circuits.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            combined: String::new(),
            status: Some(0),
        }
    }
}

/// Capability seam over the OS job scheduler.
///
/// Both operations block until the underlying call completes; neither has a
/// timeout. A hung scheduler hangs the caller — an accepted property of the
/// engine, not something this layer papers over.
pub trait JobScheduler {
    /// Register the job description at `plist_path` with the scheduler,
    /// writing it even if a job with the same label is already loaded.
    fn register(&self, plist_path: &Path) -> RunOutput;

    /// Unregister the job description at `plist_path`.
    fn unregister(&self, plist_path: &Path) -> RunOutput;
}

/// Production scheduler backed by the `launchctl` CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchctlCli;

impl JobScheduler for LaunchctlCli {
    fn register(&self, plist_path: &Path) -> RunOutput {
        // `-w` overrides a previous disable so re-adding a slot always takes.
        run_launchctl(&["load", "-w"], plist_path)
    }

    fn unregister(&self, plist_path: &Path) -> RunOutput {
        run_launchctl(&["unload"], plist_path)
    }
}

/// Run launchctl with the given subcommand, blocking until it exits and
/// capturing combined output. Spawn failure becomes a failed [`RunOutput`]
/// rather than an error: the caller's reaction is the same either way.
fn run_launchctl(args: &[&str], plist_path: &Path) -> RunOutput {
    debug!("launchctl {} {}", args.join(" "), plist_path.display());
    let spawned = Command::new(LAUNCHCTL)
        .args(args)
        .arg(plist_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match spawned {
        Ok(output) => {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            RunOutput {
                combined,
                status: output.status.code(),
            }
        }
        Err(e) => RunOutput {
            combined: format!("failed to spawn {LAUNCHCTL}: {e}"),
            status: None,
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn success_requires_exit_zero() {
        assert!(RunOutput::ok().success());
        assert!(
            !RunOutput {
                combined: String::new(),
                status: Some(1)
            }
            .success()
        );
        assert!(
            !RunOutput {
                combined: String::new(),
                status: None
            }
            .success()
        );
    }

    #[test]
    fn default_output_is_not_success() {
        assert!(!RunOutput::default().success());
    }
}
