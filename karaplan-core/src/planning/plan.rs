//! Plan assembly.
//!
//! Combines the resolved audio path, video path and container flags into a
//! single [`InvocationPlan`] and renders it as the exact argument vector
//! ffmpeg accepts. The plan is handed off to the caller; nothing here
//! spawns or monitors a process.

use crate::config::{
    Capabilities, ENCODER_PRESET, OUTPUT_FORMAT, SIDECAR_PIXEL_FORMAT, TranscodeOptions,
};
use crate::planning::audio::{AudioCodec, AudioPath, build_audio_path};
use crate::planning::filters::{AudioGraph, VideoFilter};
use crate::planning::streams::select_audio_streams;
use crate::planning::video::{VideoPath, select_video_path};
use crate::request::MediaRequest;
use ffmpeg_sidecar::command::FfmpegCommand;
use log::debug;
use serde::Serialize;
use std::path::PathBuf;

/// Container flag strategy for the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerFlags {
    /// `+faststart`: metadata up front, for fully-buffered playback.
    FastStart,
    /// `frag_keyframe+default_base_moof`: fragmented output so certain
    /// browsers can play a partially-written file.
    FragmentedStreaming,
}

impl ContainerFlags {
    /// Value for ffmpeg's `-movflags` option.
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::FastStart => "+faststart",
            Self::FragmentedStreaming => "frag_keyframe+default_base_moof",
        }
    }
}

/// A fully-specified ffmpeg invocation: every codec, stream role, filter
/// operation and container flag has been decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationPlan {
    pub input: PathBuf,
    pub sidecar: Option<PathBuf>,
    pub output: PathBuf,
    pub audio: AudioPath,
    /// Final audio codec. Follows the audio path's decision except on the
    /// sidecar path, which always re-encodes to aac.
    pub audio_codec: AudioCodec,
    pub video: VideoPath,
    pub container_flags: ContainerFlags,
}

/// Builds the complete invocation plan for one request.
///
/// Pure and synchronous: no I/O, no shared state, and no failure mode;
/// every combination of option values maps to some plan.
pub fn build_plan(
    request: &MediaRequest,
    options: &TranscodeOptions,
    capabilities: Capabilities,
) -> InvocationPlan {
    let streams = select_audio_streams(request.audio_streams);
    let audio = build_audio_path(streams, options);
    let video = select_video_path(request, options, capabilities);

    // CDG is fussy: the Pi's ffmpeg cannot just copy the mp3 stream on the
    // sidecar path, so aac is forced even when the graph is empty.
    let audio_codec = if request.sidecar.is_some() {
        AudioCodec::Aac
    } else {
        audio.codec()
    };

    let container_flags = if options.buffer_fully_before_playback {
        ContainerFlags::FastStart
    } else {
        ContainerFlags::FragmentedStreaming
    };

    let plan = InvocationPlan {
        input: request.input.clone(),
        sidecar: request.sidecar.clone(),
        output: request.output.clone(),
        audio,
        audio_codec,
        video,
        container_flags,
    };
    debug!("assembled plan: {plan:?}");
    plan
}

impl InvocationPlan {
    /// Label of the rendered sidecar video output in the filter graph.
    const VIDEO_OUTPUT_LABEL: &'static str = "vout";

    /// Renders the plan as the argument vector for the ffmpeg binary
    /// (everything after `ffmpeg` itself).
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().into_owned());
        if let Some(sidecar) = &self.sidecar {
            // copyts helps with sync between the sidecar frames and audio.
            args.push("-copyts".to_string());
            args.push("-i".to_string());
            args.push(sidecar.to_string_lossy().into_owned());
        }

        let mut filter_parts: Vec<String> = Vec::new();

        let video_map = match &self.video {
            VideoPath::Source { .. } => "0:v:0".to_string(),
            VideoPath::SidecarRender { .. } => {
                let chain = self
                    .video
                    .filters()
                    .iter()
                    .map(VideoFilter::render)
                    .collect::<Vec<_>>()
                    .join(",");
                filter_parts.push(format!("[1:v:0]{chain}[{}]", Self::VIDEO_OUTPUT_LABEL));
                format!("[{}]", Self::VIDEO_OUTPUT_LABEL)
            }
        };
        let audio_map = match &self.audio {
            AudioPath::Passthrough(stream) => format!("0:a:{}", stream.index),
            AudioPath::Graph(graph) => {
                filter_parts.push(graph.render());
                format!("[{}]", AudioGraph::OUTPUT_LABEL)
            }
        };

        if !filter_parts.is_empty() {
            args.push("-filter_complex".to_string());
            args.push(filter_parts.join(";"));
        }

        args.push("-map".to_string());
        args.push(video_map);
        args.push("-map".to_string());
        args.push(audio_map);

        args.push("-c:v".to_string());
        args.push(self.video.codec_arg().to_string());
        args.push("-c:a".to_string());
        args.push(self.audio_codec.as_arg().to_string());
        args.push("-preset".to_string());
        args.push(ENCODER_PRESET.to_string());
        if matches!(self.video, VideoPath::SidecarRender { .. }) {
            args.push("-pix_fmt".to_string());
            args.push(SIDECAR_PIXEL_FORMAT.to_string());
        }
        args.push("-b:v".to_string());
        args.push(self.video.bitrate().to_string());
        args.push("-movflags".to_string());
        args.push(self.container_flags.as_arg().to_string());

        // Single-listener streaming mode and a fixed container format.
        args.push("-listen".to_string());
        args.push("1".to_string());
        args.push("-f".to_string());
        args.push(OUTPUT_FORMAT.to_string());

        args.push(self.output.to_string_lossy().into_owned());
        args
    }

    /// Prepares the plan as an `FfmpegCommand` for the component that owns
    /// process execution.
    pub fn to_command(&self) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new();
        cmd.arg("-hide_banner");
        for arg in self.to_args() {
            cmd.arg(arg);
        }
        cmd
    }
}
