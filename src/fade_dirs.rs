//! Centralized filesystem paths for nightfade.
//!
//! Provides a single source of truth for every path the engine touches.
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! # Directory Layout
//!
//! | Purpose | Path |
//! |---------|------|
//! | Launchd jobs | `~/Library/LaunchAgents/` |
//! | Config | `~/Library/Application Support/nightfade/` (macOS) |
//! | Job run logs | `/tmp/nightfade-<label>.log` |
//!
//! # Environment Overrides
//!
//! All directories can be overridden for testing or custom deployments:
//! - `NIGHTFADE_AGENTS_DIR` — overrides [`agents_dir`]
//! - `NIGHTFADE_CONFIG_DIR` — overrides [`config_dir`]

use std::path::PathBuf;

/// Directory scanned by launchd for per-user job descriptions.
///
/// This is always `~/Library/LaunchAgents` — launchd reads no other per-user
/// location, so the path is home-relative rather than XDG-mapped. Override
/// with the `NIGHTFADE_AGENTS_DIR` environment variable.
#[must_use]
pub fn agents_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("NIGHTFADE_AGENTS_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::home_dir()
        .map(|d| d.join("Library").join("LaunchAgents"))
        .unwrap_or_else(|| PathBuf::from("/tmp/nightfade-agents"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/nightfade/` by default. Override with
/// the `NIGHTFADE_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("NIGHTFADE_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("nightfade"))
        .unwrap_or_else(|| PathBuf::from("/tmp/nightfade-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Stdout log path written by a scheduled job at fire time.
///
/// Lives under `/tmp` so firing jobs never need the app container. The
/// engine writes this path into the job document but never reads it back.
#[must_use]
pub fn job_stdout_path(label: &str) -> String {
    format!("/tmp/nightfade-{label}.log")
}

/// Stderr log path written by a scheduled job at fire time.
#[must_use]
pub fn job_stderr_path(label: &str) -> String {
    format!("/tmp/nightfade-{label}.error.log")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn agents_dir_honors_env_override() {
        unsafe { std::env::set_var("NIGHTFADE_AGENTS_DIR", "/tmp/agents-override") };
        assert_eq!(agents_dir(), PathBuf::from("/tmp/agents-override"));
        unsafe { std::env::remove_var("NIGHTFADE_AGENTS_DIR") };
        assert!(!agents_dir().to_string_lossy().contains("agents-override"));
    }

    #[test]
    fn config_file_lives_under_config_dir() {
        unsafe { std::env::set_var("NIGHTFADE_CONFIG_DIR", "/tmp/config-override") };
        assert_eq!(config_file(), PathBuf::from("/tmp/config-override/config.toml"));
        unsafe { std::env::remove_var("NIGHTFADE_CONFIG_DIR") };
    }

    #[test]
    fn job_log_paths_embed_the_label() {
        assert_eq!(
            job_stdout_path("com.nightfade.schedule.21.30"),
            "/tmp/nightfade-com.nightfade.schedule.21.30.log"
        );
        assert_eq!(
            job_stderr_path("com.nightfade.schedule.21.30"),
            "/tmp/nightfade-com.nightfade.schedule.21.30.error.log"
        );
    }
}
