//! Core library for planning karaoke playback/transcode jobs with ffmpeg.
//!
//! This crate turns a request descriptor (media file, optional CDG-style
//! graphics sidecar, audio/video adjustment options) into a complete,
//! internally consistent ffmpeg invocation plan: codec choices, stream
//! roles, ordered filter operations and container flags. It decides *what*
//! should run; executing and monitoring the process belongs to the caller.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use karaplan_core::{MediaRequest, TranscodeOptions, build_plan};
//! use karaplan_core::external::{detect_capabilities, probe_media};
//! use std::path::Path;
//!
//! let probe = probe_media(Path::new("song.mp4"));
//! let mut request = MediaRequest::new("song.mp4", "out.mp4");
//! request.audio_streams = probe.audio_streams;
//!
//! let options = TranscodeOptions {
//!     semitones: 2,
//!     ..TranscodeOptions::default()
//! };
//! let plan = build_plan(&request, &options, detect_capabilities());
//! println!("ffmpeg {}", plan.to_args().join(" "));
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod planning;
pub mod request;

// Re-exports for public API
pub use config::{Capabilities, TranscodeOptions};
pub use error::{CoreError, CoreResult};
pub use planning::{
    AudioCodec, AudioFilter, AudioGraph, AudioPath, AudioRole, AudioStreamPair, AudioStreamRef,
    ContainerFlags, InvocationPlan, VideoCodec, VideoFilter, VideoPath, build_audio_path,
    build_plan, select_audio_streams, select_video_path,
};
pub use request::{ContainerKind, MediaRequest};
