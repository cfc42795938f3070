//! Nightfade: scheduled display-warmth ramps for macOS.
//!
//! Nightfade lets a user say "at 9pm, warm the display to 25%" and have
//! that happen every day, across reboots, whether or not the app is
//! running. It does so by handing each schedule to launchd as a per-user
//! LaunchAgent whose job script drives the `nightlight` CLI.
//!
//! # Architecture
//!
//! There is deliberately no schedule database. The plists in
//! `~/Library/LaunchAgents` — the files launchd itself executes — are the
//! single source of truth, and the in-memory schedule list is a cache
//! rebuilt by scanning them:
//!
//! - **[`schedule`]**: the immutable (hour, minute, intensity) value type
//!   and its time-of-day-only external identity
//! - **[`engine`]**: the reconciliation engine — job codec, launchctl
//!   capability, and the scan/add/remove manager
//! - **[`nightlight`]**: discovery of the background-set binary
//! - **[`config`]** / **[`fade_dirs`]**: TOML app config and centralized
//!   filesystem paths

pub mod config;
pub mod engine;
pub mod error;
pub mod fade_dirs;
pub mod nightlight;
pub mod schedule;

pub use config::AppConfig;
pub use engine::launchctl::{JobScheduler, LaunchctlCli, RunOutput};
pub use engine::manager::ScheduleEngine;
pub use error::{FadeError, Result};
pub use schedule::Schedule;
