//! The schedule reconciliation engine.
//!
//! [`ScheduleEngine`] owns the published schedule list as a *derived*
//! value: every mutation writes through to the LaunchAgents directory and
//! then rescans it, so the list always reflects what launchd will actually
//! run, never merely what the caller asked for.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::engine::codec::{self, ScriptOptions};
use crate::engine::launchctl::{JobScheduler, LaunchctlCli};
use crate::fade_dirs;
use crate::schedule::{self, Schedule};

/// The "Remember to Sleep" ramp: dusk to midnight, 1% to 100%.
pub const SLEEP_RAMP_PRESET: [(u8, u8, i32); 6] = [
    (19, 0, 1),
    (20, 0, 10),
    (21, 0, 25),
    (22, 0, 35),
    (23, 0, 50),
    (0, 0, 100),
];

/// Reconciles an in-memory schedule list against launchd's on-disk state.
///
/// Synchronous and single-owner: `add`, `remove`, and `reload` read and
/// write the same time-keyed files with no internal locking, so callers
/// must serialize mutations (the UI drives the engine from one interaction
/// thread). Subprocess calls block to completion with no timeout.
#[derive(Debug)]
pub struct ScheduleEngine<S: JobScheduler> {
    scheduler: S,
    agents_dir: PathBuf,
    script_options: ScriptOptions,
    schedules: Vec<Schedule>,
}

impl ScheduleEngine<LaunchctlCli> {
    /// Engine wired to the real launchctl and the user's LaunchAgents
    /// directory, with script options resolved from `config`.
    #[must_use]
    pub fn system(config: &AppConfig) -> Self {
        Self::new(
            LaunchctlCli,
            fade_dirs::agents_dir(),
            ScriptOptions::from_config(config),
        )
    }
}

impl<S: JobScheduler> ScheduleEngine<S> {
    /// Create an engine over an explicit scheduler and directory.
    ///
    /// The schedule list starts empty; call [`reload`](Self::reload) to
    /// populate it.
    #[must_use]
    pub fn new(scheduler: S, agents_dir: PathBuf, script_options: ScriptOptions) -> Self {
        Self {
            scheduler,
            agents_dir,
            script_options,
            schedules: Vec::new(),
        }
    }

    /// The published schedule list, as of the last reload.
    #[must_use]
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Discard the in-memory list and rebuild it from the directory.
    ///
    /// Files that don't follow our naming convention are ignored; files
    /// that fail to decode are skipped with a debug log so one malformed
    /// or foreign plist never hides the rest. A missing directory reads
    /// as "nothing scheduled". The new list is published in one
    /// assignment, already sorted evening-first.
    pub fn reload(&mut self) {
        let mut found = Vec::new();

        let entries = match fs::read_dir(&self.agents_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("cannot scan {}: {e}", self.agents_dir.display());
                self.schedules = found;
                return;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !schedule::is_job_file_name(name) {
                continue;
            }

            let path = entry.path();
            let decoded = fs::read(&path)
                .map_err(Into::into)
                .and_then(|bytes| codec::decode(&bytes));
            match decoded {
                Ok(job) => found.push(Schedule::new(job.hour, job.minute, job.intensity)),
                Err(e) => debug!("skipping {}: {e}", path.display()),
            }
        }

        found.sort_by_key(Schedule::evening_rank);
        self.schedules = found;
    }

    /// Persist and register a schedule, then reconcile.
    ///
    /// Writes the job description under its time-of-day file name, asks the
    /// scheduler to load it, and rescans unconditionally — the rescan, not
    /// the register exit status, is how the engine learns what actually
    /// took effect. Failures along the way are logged and degrade to "the
    /// schedule doesn't appear after reload".
    pub fn add(&mut self, schedule: &Schedule) {
        if let Err(e) = fs::create_dir_all(&self.agents_dir) {
            warn!("cannot create {}: {e}", self.agents_dir.display());
        }

        let path = self.agents_dir.join(schedule.file_name());
        if path.exists() {
            // Same time-of-day, same file: the previous job is replaced.
            debug!("replacing existing job at {}", path.display());
        }

        match codec::to_xml(&codec::encode(schedule, &self.script_options)) {
            Ok(bytes) => {
                if let Err(e) = fs::write(&path, bytes) {
                    error!("failed to write {}: {e}", path.display());
                } else {
                    let outcome = self.scheduler.register(&path);
                    if outcome.success() {
                        info!(
                            "registered {} at {}",
                            schedule.label(),
                            schedule.display_time()
                        );
                    } else {
                        warn!(
                            "register of {} failed (status {:?}): {}",
                            schedule.label(),
                            outcome.status,
                            outcome.combined.trim()
                        );
                    }
                }
            }
            Err(e) => error!("failed to encode job for {}: {e}", schedule.label()),
        }

        self.reload();
    }

    /// Unregister and delete a schedule's job, then reconcile.
    ///
    /// The unregister call is best-effort and its exit status ignored —
    /// deleting the file is what removes the job from future scans. A file
    /// that is already gone counts as removed.
    pub fn remove(&mut self, schedule: &Schedule) {
        let path = self.agents_dir.join(schedule.file_name());

        let outcome = self.scheduler.unregister(&path);
        if !outcome.success() {
            debug!(
                "unregister of {} reported status {:?}",
                schedule.label(),
                outcome.status
            );
        }

        match fs::remove_file(&path) {
            Ok(()) => info!("removed {}", schedule.label()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to delete {}: {e}", path.display()),
        }

        self.reload();
    }

    /// Add the [`SLEEP_RAMP_PRESET`] as six independent `add` calls.
    ///
    /// There is no atomicity across the six: whatever subset was written
    /// before an interruption stays registered, and each slot is
    /// independently idempotent per time-of-day.
    pub fn add_preset(&mut self) {
        for (hour, minute, intensity) in SLEEP_RAMP_PRESET {
            self.add(&Schedule::new(hour, minute, intensity));
        }
    }
}
