// ============================================================================
// karaplan-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every interaction with external command-line
// tools. The planner itself never touches a process; the probes here run
// once, up front, and their results are passed into the planner as plain
// values, keeping it referentially transparent and testable without
// spawning anything.

use crate::error::{CoreError, CoreResult};
use std::io;
use std::process::{Command, Stdio};

/// Capability and media probing.
pub mod probe;

pub use probe::{MediaProbe, detect_capabilities, probe_media};

/// Checks whether the ffmpeg binary is present and executable.
pub fn is_ffmpeg_installed() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Returns the installed ffmpeg version string.
///
/// Parses the third token of the first output line of `ffmpeg -version`.
/// A missing binary or an unrecognized banner is an explicit error, never
/// a fatal condition for planning.
pub fn ffmpeg_version() -> CoreResult<String> {
    let output = Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CoreError::DependencyNotFound("ffmpeg".to_string())
            } else {
                CoreError::CommandStart("ffmpeg".to_string(), e)
            }
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or_default();
    first_line
        .split_whitespace()
        .nth(2)
        .map(str::to_string)
        .ok_or_else(|| CoreError::VersionUnparsable(first_line.to_string()))
}
