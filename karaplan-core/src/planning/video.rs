//! Video path selection.
//!
//! Chooses between copying the source video stream, re-encoding it in
//! hardware or software, and an entirely different rendering chain that
//! rasterizes the sidecar when a synchronized-graphics file is present. The two paths are mutually exclusive.

use crate::config::{
    Capabilities, SIDECAR_FRAME_RATE, SIDECAR_VIDEO_BITRATE, SOURCE_VIDEO_BITRATE,
    TranscodeOptions,
};
use crate::planning::filters::VideoFilter;
use crate::request::MediaRequest;
use log::debug;
use serde::Serialize;

/// Video codec decision for the source-video path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VideoCodec {
    /// Pass the source stream through without re-encoding.
    Copy,
    /// h264_v4l2m2m hardware encoder.
    HardwareH264,
    /// libx264 software fallback.
    SoftwareH264,
}

impl VideoCodec {
    /// Codec identifier as ffmpeg expects it.
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::HardwareH264 => "h264_v4l2m2m",
            Self::SoftwareH264 => "libx264",
        }
    }
}

/// The resolved video side of a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VideoPath {
    /// Use the source's own video stream with the given codec decision.
    Source { codec: VideoCodec },

    /// Ignore the source video and rasterize the graphics sidecar instead.
    /// Always encodes with libx264: the Pi's hardware encoder has memory
    /// issues with this kind of low-resolution synthetic video.
    SidecarRender { upscale: bool },
}

impl VideoPath {
    /// Codec identifier for this path.
    pub fn codec_arg(&self) -> &'static str {
        match self {
            Self::Source { codec } => codec.as_arg(),
            Self::SidecarRender { .. } => VideoCodec::SoftwareH264.as_arg(),
        }
    }

    /// Target video bitrate for this path.
    pub fn bitrate(&self) -> &'static str {
        match self {
            Self::Source { .. } => SOURCE_VIDEO_BITRATE,
            Self::SidecarRender { .. } => SIDECAR_VIDEO_BITRATE,
        }
    }

    /// Rasterization filter chain for the sidecar path; empty for the
    /// source path.
    pub fn filters(&self) -> Vec<VideoFilter> {
        match self {
            Self::Source { .. } => Vec::new(),
            Self::SidecarRender { upscale } => {
                let mut chain = vec![VideoFilter::FrameRate {
                    fps: SIDECAR_FRAME_RATE,
                }];
                if *upscale {
                    chain.push(VideoFilter::ScaleNearest { height: 720 });
                }
                chain
            }
        }
    }
}

/// Selects the video path for one request.
///
/// Stream copy is always preferred when the container already supports
/// native playback, regardless of hardware capability. The sidecar path
/// deliberately ignores `capabilities`.
pub fn select_video_path(
    request: &MediaRequest,
    options: &TranscodeOptions,
    capabilities: Capabilities,
) -> VideoPath {
    if let Some(sidecar) = &request.sidecar {
        debug!("rendering graphics sidecar: {}", sidecar.display());
        return VideoPath::SidecarRender {
            upscale: options.upscale_sidecar,
        };
    }

    let codec = if request.container.is_natively_streamable() {
        VideoCodec::Copy
    } else if capabilities.hardware_h264 {
        VideoCodec::HardwareH264
    } else {
        VideoCodec::SoftwareH264
    };
    VideoPath::Source { codec }
}
