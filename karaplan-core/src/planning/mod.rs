//! The planning core: request descriptor in, invocation plan out.
//!
//! Control flow is strictly one-shot and synchronous: stream selection,
//! audio graph construction, video path selection, plan assembly. Each
//! stage is a pure function over its inputs, so the whole pipeline is safe
//! to invoke concurrently for independent requests.

pub mod audio;
pub mod filters;
pub mod plan;
pub mod streams;
pub mod video;

pub use audio::{AudioCodec, AudioPath, build_audio_path};
pub use filters::{AudioFilter, AudioGraph, VideoFilter};
pub use plan::{ContainerFlags, InvocationPlan, build_plan};
pub use streams::{AudioRole, AudioStreamPair, AudioStreamRef, select_audio_streams};
pub use video::{VideoCodec, VideoPath, select_video_path};
