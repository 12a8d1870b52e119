//! Typed filter nodes and the audio filter graph.
//!
//! Filter operations are modeled as explicit enum variants rather than
//! pre-formatted strings so tests can assert directly against the expected
//! node sequence and parameters. Rendering to ffmpeg's filter grammar
//! happens in one place, and the identifiers and parameter names here are
//! the exact vocabulary the engine accepts.

use crate::planning::streams::{AudioStreamPair, AudioStreamRef};
use serde::Serialize;

/// A single audio filter operation with its named parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AudioFilter {
    /// `adelay`: delays the stream by a per-channel millisecond pair.
    Delay { milliseconds: u64 },

    /// `atrim`: drops the first `start` seconds of the stream.
    Trim { start: f64 },

    /// `rubberband`: pitch shift by a frequency ratio.
    PitchShift { ratio: f64 },

    /// `loudnorm`: EBU R128 loudness normalization with fixed targets.
    Loudnorm {
        integrated: f64,
        true_peak: f64,
        range: f64,
    },

    /// `volume`: linear gain multiplier.
    Volume { ratio: f64 },

    /// `amix`: merges two input streams into one.
    Mix { inputs: u32, dropout_transition: u32 },
}

impl AudioFilter {
    /// Renders the node in ffmpeg filter syntax.
    pub fn render(&self) -> String {
        match self {
            Self::Delay { milliseconds } => format!("adelay={milliseconds}|{milliseconds}"),
            Self::Trim { start } => format!("atrim=start={start}"),
            Self::PitchShift { ratio } => format!("rubberband=pitch={ratio}"),
            Self::Loudnorm {
                integrated,
                true_peak,
                range,
            } => format!("loudnorm=i={integrated}:tp={true_peak}:lra={range}"),
            Self::Volume { ratio } => format!("volume={ratio}"),
            Self::Mix {
                inputs,
                dropout_transition,
            } => format!("amix=inputs={inputs}:dropout_transition={dropout_transition}"),
        }
    }
}

/// A single video filter operation, used only on the sidecar path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VideoFilter {
    /// `fps`: normalizes the frame rate.
    FrameRate { fps: u32 },

    /// `scale` with nearest-neighbor interpolation, preserving aspect ratio.
    ScaleNearest { height: u32 },
}

impl VideoFilter {
    /// Renders the node in ffmpeg filter syntax.
    pub fn render(&self) -> String {
        match self {
            Self::FrameRate { fps } => format!("fps={fps}"),
            Self::ScaleNearest { height } => format!("scale=-1:{height}:flags=neighbor"),
        }
    }
}

/// The audio filter graph: one chain per role-stream plus an optional
/// terminal merge node.
///
/// The graph starts from the two bound role-streams and ends in exactly one
/// output. When `mix` is absent only the processed chain reaches the
/// output; the original chain then carries at most the sync-compensation
/// nodes, which are kept so a later remix of the same options would stay
/// aligned, and is simply not rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioGraph {
    pub original: AudioStreamRef,
    pub processed: AudioStreamRef,
    pub original_chain: Vec<AudioFilter>,
    pub processed_chain: Vec<AudioFilter>,
    /// Terminal `amix` node combining processed and scaled original.
    pub mix: Option<AudioFilter>,
}

impl AudioGraph {
    /// Creates a graph with empty chains over the given role-streams.
    pub fn new(streams: AudioStreamPair) -> Self {
        Self {
            original: streams.original,
            processed: streams.processed,
            original_chain: Vec::new(),
            processed_chain: Vec::new(),
            mix: None,
        }
    }

    /// True when no filter node was applied on any lane.
    pub fn is_empty(&self) -> bool {
        self.original_chain.is_empty() && self.processed_chain.is_empty() && self.mix.is_none()
    }

    /// Label of the single output stream produced by [`Self::render`].
    pub const OUTPUT_LABEL: &'static str = "aout";

    /// Renders the graph as an ffmpeg `-filter_complex` fragment ending in
    /// `[aout]`.
    pub fn render(&self) -> String {
        let processed_source = format!("[0:a:{}]", self.processed.index);
        let original_source = format!("[0:a:{}]", self.original.index);

        let Some(mix) = &self.mix else {
            // No merge: the processed lane is the whole graph.
            return format!(
                "{processed_source}{}[{}]",
                render_chain(&self.processed_chain),
                Self::OUTPUT_LABEL
            );
        };

        let mut parts = Vec::new();

        // An unfiltered lane feeds the mix directly instead of going through
        // an intermediate no-op label.
        let processed_input = if self.processed_chain.is_empty() {
            processed_source
        } else {
            parts.push(format!(
                "{processed_source}{}[proc]",
                render_chain(&self.processed_chain)
            ));
            "[proc]".to_string()
        };
        let original_input = if self.original_chain.is_empty() {
            original_source
        } else {
            parts.push(format!(
                "{original_source}{}[orig]",
                render_chain(&self.original_chain)
            ));
            "[orig]".to_string()
        };

        parts.push(format!(
            "{processed_input}{original_input}{}[{}]",
            mix.render(),
            Self::OUTPUT_LABEL
        ));
        parts.join(";")
    }
}

/// Joins a lane's nodes with commas; an empty lane renders as `anull` so
/// the label graph stays well-formed.
fn render_chain(chain: &[AudioFilter]) -> String {
    if chain.is_empty() {
        "anull".to_string()
    } else {
        chain
            .iter()
            .map(AudioFilter::render)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::streams::select_audio_streams;

    #[test]
    fn test_audio_filter_rendering() {
        assert_eq!(
            AudioFilter::Delay { milliseconds: 500 }.render(),
            "adelay=500|500"
        );
        assert_eq!(AudioFilter::Trim { start: 0.5 }.render(), "atrim=start=0.5");
        assert_eq!(
            AudioFilter::PitchShift { ratio: 2.0 }.render(),
            "rubberband=pitch=2"
        );
        assert_eq!(
            AudioFilter::Loudnorm {
                integrated: -16.0,
                true_peak: -1.5,
                range: 11.0
            }
            .render(),
            "loudnorm=i=-16:tp=-1.5:lra=11"
        );
        assert_eq!(AudioFilter::Volume { ratio: 0.4 }.render(), "volume=0.4");
        assert_eq!(
            AudioFilter::Mix {
                inputs: 2,
                dropout_transition: 0
            }
            .render(),
            "amix=inputs=2:dropout_transition=0"
        );
    }

    #[test]
    fn test_video_filter_rendering() {
        assert_eq!(VideoFilter::FrameRate { fps: 25 }.render(), "fps=25");
        assert_eq!(
            VideoFilter::ScaleNearest { height: 720 }.render(),
            "scale=-1:720:flags=neighbor"
        );
    }

    #[test]
    fn test_render_processed_lane_only() {
        let mut graph = AudioGraph::new(select_audio_streams(Some(2)));
        graph.processed_chain.push(AudioFilter::Loudnorm {
            integrated: -16.0,
            true_peak: -1.5,
            range: 11.0,
        });

        assert_eq!(graph.render(), "[0:a:1]loudnorm=i=-16:tp=-1.5:lra=11[aout]");
    }

    #[test]
    fn test_render_mix_with_unfiltered_processed_lane() {
        // Remix-only: the unmodified processed stream must route straight
        // into the merge node.
        let mut graph = AudioGraph::new(select_audio_streams(Some(2)));
        graph.original_chain.push(AudioFilter::Volume { ratio: 0.4 });
        graph.mix = Some(AudioFilter::Mix {
            inputs: 2,
            dropout_transition: 0,
        });

        assert_eq!(
            graph.render(),
            "[0:a:0]volume=0.4[orig];[0:a:1][orig]amix=inputs=2:dropout_transition=0[aout]"
        );
    }

    #[test]
    fn test_render_mix_with_both_lanes_filtered() {
        let mut graph = AudioGraph::new(select_audio_streams(Some(2)));
        graph
            .processed_chain
            .push(AudioFilter::Delay { milliseconds: 250 });
        graph
            .original_chain
            .push(AudioFilter::Delay { milliseconds: 250 });
        graph.original_chain.push(AudioFilter::Volume { ratio: 0.5 });
        graph.mix = Some(AudioFilter::Mix {
            inputs: 2,
            dropout_transition: 0,
        });

        assert_eq!(
            graph.render(),
            "[0:a:1]adelay=250|250[proc];\
             [0:a:0]adelay=250|250,volume=0.5[orig];\
             [proc][orig]amix=inputs=2:dropout_transition=0[aout]"
        );
    }

    #[test]
    fn test_empty_graph_reports_empty() {
        let graph = AudioGraph::new(select_audio_streams(Some(2)));
        assert!(graph.is_empty());
    }
}
