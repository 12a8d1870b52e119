//! Request descriptor for a single playback/transcode job.
//!
//! A [`MediaRequest`] is the already-resolved input to the planner: paths
//! have been located by the caller, the container kind is derived from the
//! file extension, and the audio stream count (if known) comes from a prior
//! ffprobe run. The planner never touches the file system itself.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Container kind of the source file, derived from its extension.
///
/// The only distinction the planner cares about is whether the container is
/// natively streamable in an HTML5 `<video>` element, in which case the
/// video stream is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerKind {
    Mp4,
    Webm,
    Other,
}

impl ContainerKind {
    /// Derives the container kind from a file path's extension
    /// (case-insensitive). Unknown or missing extensions map to `Other`.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("mp4") => Self::Mp4,
            Some("webm") => Self::Webm,
            _ => Self::Other,
        }
    }

    /// Whether browsers play this container natively, making video stream
    /// copy safe.
    pub fn is_natively_streamable(self) -> bool {
        matches!(self, Self::Mp4 | Self::Webm)
    }
}

/// A single playback/transcode request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRequest {
    /// Source media file.
    pub input: PathBuf,

    /// Container kind of the source, derived from `input`'s extension.
    pub container: ContainerKind,

    /// Optional synchronized-graphics sidecar (CDG lyric graphics). When
    /// present, the source's own video stream is ignored entirely.
    pub sidecar: Option<PathBuf>,

    /// Output target.
    pub output: PathBuf,

    /// Number of audio streams in the source, if the caller probed it.
    /// `None` means unknown and triggers the single-stream fallback.
    pub audio_streams: Option<u32>,
}

impl MediaRequest {
    /// Creates a request for `input` -> `output` with no sidecar and an
    /// unknown audio stream count.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let container = ContainerKind::from_path(&input);
        Self {
            input,
            container,
            sidecar: None,
            output: output.into(),
            audio_streams: None,
        }
    }

    /// Attaches a synchronized-graphics sidecar file.
    #[must_use]
    pub fn with_sidecar(mut self, sidecar: impl Into<PathBuf>) -> Self {
        self.sidecar = Some(sidecar.into());
        self
    }

    /// Records the probed audio stream count.
    #[must_use]
    pub fn with_audio_streams(mut self, count: u32) -> Self {
        self.audio_streams = Some(count);
        self
    }
}
