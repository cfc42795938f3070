//! Schedule reconciliation engine.
//!
//! Encodes schedules into launchd job descriptions, registers them through
//! `launchctl`, and rebuilds the authoritative schedule list by scanning
//! the LaunchAgents directory. The directory, not this process, is the
//! single source of truth for what is scheduled.

pub mod codec;
pub mod launchctl;
pub mod manager;

pub use codec::{DecodedJob, LaunchdJob, ScriptOptions};
pub use launchctl::{JobScheduler, LaunchctlCli, RunOutput};
pub use manager::ScheduleEngine;
