//! Capability and media probing.
//!
//! Both probes fail safe: a capability that cannot be confirmed is reported
//! as absent, and media properties that cannot be read are reported as
//! unknown. Neither is a fatal condition for planning. Callers may cache
//! [`detect_capabilities`] process-wide under their own refresh policy; the
//! planner never re-probes.

use crate::config::Capabilities;
use ffprobe::ffprobe;
use serde::Serialize;
use std::path::Path;
use std::process::Command;

/// Probes the installed ffmpeg for the capabilities the planner consumes.
pub fn detect_capabilities() -> Capabilities {
    let capabilities = Capabilities {
        hardware_h264: ffmpeg_lists("-codecs", "h264_v4l2m2m"),
        pitch_filter: ffmpeg_lists("-filters", "rubberband"),
    };
    log::debug!("detected capabilities: {capabilities:?}");
    capabilities
}

/// Runs `ffmpeg <flag>` and scans stdout for `needle`. Any failure to run
/// the probe counts as the capability being unavailable.
fn ffmpeg_lists(flag: &str, needle: &str) -> bool {
    match Command::new("ffmpeg").arg(flag).output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains(needle),
        Err(e) => {
            log::warn!("ffmpeg {flag} probe failed, assuming '{needle}' unavailable: {e}");
            false
        }
    }
}

/// Media properties the planner and its callers care about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaProbe {
    /// Duration rounded to whole seconds, if known.
    pub duration_secs: Option<u64>,
    /// Number of audio streams, if known.
    pub audio_streams: Option<u32>,
}

/// Probes a media file with ffprobe.
///
/// A failed probe returns all-unknown values rather than an error; the
/// planner's fallbacks handle the rest.
pub fn probe_media(path: &Path) -> MediaProbe {
    log::debug!("running ffprobe on: {}", path.display());
    match ffprobe(path) {
        Ok(metadata) => {
            let duration_secs = metadata
                .format
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok())
                .map(|d| d.round() as u64);
            let audio_streams = metadata
                .streams
                .iter()
                .filter(|s| s.codec_type.as_deref() == Some("audio"))
                .count() as u32;

            MediaProbe {
                duration_secs,
                audio_streams: Some(audio_streams),
            }
        }
        Err(e) => {
            log::warn!("ffprobe failed for {}: {e:?}", path.display());
            MediaProbe::default()
        }
    }
}
