//! Nightlight binary discovery.
//!
//! Generated job scripts invoke the `nightlight` CLI to apply a warmth
//! intensity. The binary may be bundled next to this executable, installed
//! by Homebrew, or anywhere on `PATH`; this module resolves which copy a
//! script should call.

use std::path::{Path, PathBuf};

/// Bare name of the background-set tool.
pub const NIGHTLIGHT_BIN: &str = "nightlight";

/// Fixed install locations probed after the bundled copy.
pub const FALLBACK_PATHS: &[&str] = &["/opt/homebrew/bin/nightlight", "/usr/local/bin/nightlight"];

/// Locate the nightlight binary to embed in generated job scripts.
///
/// Probes locations in this order:
/// 1. `explicit_path` (config override, used verbatim without probing)
/// 2. A copy bundled alongside the current executable (or in the app
///    bundle's `Resources/` directory)
/// 3. [`FALLBACK_PATHS`]
/// 4. `PATH` lookup via [`which::which`]
/// 5. The bare name, leaving resolution to the shell at job fire time
///
/// There is no error path: a wrong guess surfaces later in the job's
/// stderr log, not here.
#[must_use]
pub fn discover(explicit_path: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit_path {
        return path.to_path_buf();
    }

    for candidate in local_candidates() {
        if candidate.is_file() {
            return candidate;
        }
    }

    if let Ok(found) = which::which(NIGHTLIGHT_BIN) {
        return found;
    }

    PathBuf::from(NIGHTLIGHT_BIN)
}

/// Candidate on-disk locations, bundled copies first.
fn local_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(FALLBACK_PATHS.len() + 2);

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(NIGHTLIGHT_BIN));
            // .app layout: Contents/MacOS/<exe> with tools in Contents/Resources.
            if let Some(contents) = dir.parent() {
                candidates.push(contents.join("Resources").join(NIGHTLIGHT_BIN));
            }
        }
    }

    candidates.extend(FALLBACK_PATHS.iter().map(PathBuf::from));
    candidates
}
