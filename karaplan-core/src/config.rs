// ============================================================================
// karaplan-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Transcode Options, Capability Flags and Fixed Constants
//
// This module defines the per-request adjustment options, the externally
// probed capability flags, and the fixed encoder/filter constants used by
// the planner. Instances are created by consumers of the library (like
// karaplan-cli) and passed to build_plan.

use serde::{Deserialize, Serialize};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Gain ratio substituted when the remix volume percentage cannot be parsed.
pub const DEFAULT_REMIX_RATIO: f64 = 0.5;

/// Integrated loudness target (LUFS) for the loudnorm filter.
pub const LOUDNORM_INTEGRATED: f64 = -16.0;

/// True-peak ceiling (dBTP) for the loudnorm filter.
pub const LOUDNORM_TRUE_PEAK: f64 = -1.5;

/// Loudness range target (LU) for the loudnorm filter.
pub const LOUDNORM_RANGE: f64 = 11.0;

/// Target bitrate for the source-video path. Yields the best results with
/// h264_v4l2m2m on the Pi, recommended for 720p.
pub const SOURCE_VIDEO_BITRATE: &str = "15M";

/// Target bitrate forced on the sidecar-rendering path; the low-resolution
/// synthetic frames need far less than the source-video path.
pub const SIDECAR_VIDEO_BITRATE: &str = "500k";

/// Frame rate the sidecar graphics are normalized to. Without it ffmpeg
/// needlessly rasterizes CDG graphics at 300fps.
pub const SIDECAR_FRAME_RATE: u32 = 25;

/// Pixel format forced on the sidecar-rendering path.
pub const SIDECAR_PIXEL_FORMAT: &str = "yuv420p";

/// Encoder speed preset used for all re-encodes; planning favors latency
/// over compression since output is streamed to a single listener.
pub const ENCODER_PRESET: &str = "ultrafast";

/// Fixed output container format identifier.
pub const OUTPUT_FORMAT: &str = "mp4";

// ============================================================================
// TRANSCODE OPTIONS
// ============================================================================

/// Per-request audio/video adjustment options.
///
/// Every combination of values is valid and maps to some plan; unparsable
/// values fall back to safe defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscodeOptions {
    /// Semitones to shift the instrumental track by (0 = no pitch change).
    pub semitones: i32,

    /// Whether to apply loudness normalization to the instrumental track.
    pub normalize: bool,

    /// Optimize the container for fully-buffered playback instead of
    /// progressive streaming of a growing file.
    pub buffer_fully_before_playback: bool,

    /// AV-sync offset in seconds; positive delays audio, negative trims it.
    pub avsync: f64,

    /// Nearest-neighbor upscale of the sidecar graphics to 720p.
    pub upscale_sidecar: bool,

    /// Mix the vocal-containing original track back into the instrumental.
    pub remix_original: bool,

    /// Remix volume as a percentage in [0, 100], kept as text since it
    /// arrives from user-facing settings; see [`Self::remix_volume_ratio`].
    pub remix_volume: String,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            semitones: 0,
            normalize: true,
            buffer_fully_before_playback: false,
            avsync: 0.0,
            upscale_sidecar: false,
            remix_original: true,
            remix_volume: "40".to_string(),
        }
    }
}

impl TranscodeOptions {
    /// Linear gain ratio for the remixed original track.
    ///
    /// Parses the percentage and divides by 100; an unparsable value
    /// substitutes [`DEFAULT_REMIX_RATIO`] rather than erroring.
    pub fn remix_volume_ratio(&self) -> f64 {
        self.remix_volume
            .trim()
            .parse::<f64>()
            .map(|percent| percent / 100.0)
            .unwrap_or(DEFAULT_REMIX_RATIO)
    }
}

// ============================================================================
// CAPABILITIES
// ============================================================================

/// Externally probed ffmpeg capability flags.
///
/// These are opaque, immutable inputs to the planner; probing (and any
/// process-wide caching policy) is the caller's responsibility. The default
/// is all-false: never assume hardware acceleration or an optional filter
/// exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Whether the h264_v4l2m2m hardware encoder is available.
    pub hardware_h264: bool,

    /// Whether the rubberband pitch-shift filter is available.
    pub pitch_filter: bool,
}
