//! Audio graph construction.
//!
//! Decides whether any audio transformation is needed at all and, if so,
//! builds the ordered filter chain: sync compensation, pitch shift,
//! loudness normalization, volume scaling, remix. The cheapest legal path
//! (stream copy of the instrumental track) is chosen whenever no filter and
//! no remix is requested, avoiding an unnecessary re-encode.

use crate::config::{
    LOUDNORM_INTEGRATED, LOUDNORM_RANGE, LOUDNORM_TRUE_PEAK, TranscodeOptions,
};
use crate::planning::filters::{AudioFilter, AudioGraph};
use crate::planning::streams::{AudioStreamPair, AudioStreamRef};
use log::{debug, info};
use serde::Serialize;

/// Audio codec decision for the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioCodec {
    /// Pass the source stream through without re-encoding.
    Copy,
    /// Lossy re-encode; unavoidable once any filter is applied or streams
    /// are merged.
    Aac,
}

impl AudioCodec {
    /// Codec identifier as ffmpeg expects it.
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Aac => "aac",
        }
    }
}

/// The resolved audio side of a plan: either an untouched stream reference
/// or a filter graph ending in one output stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AudioPath {
    Passthrough(AudioStreamRef),
    Graph(AudioGraph),
}

impl AudioPath {
    /// Codec implied by this path: `copy` if and only if no filter node was
    /// applied and no remix occurred.
    pub fn codec(&self) -> AudioCodec {
        match self {
            Self::Passthrough(_) => AudioCodec::Copy,
            Self::Graph(_) => AudioCodec::Aac,
        }
    }
}

/// Converts a semitone shift to the frequency ratio the pitch filter takes.
///
/// The ratio is `2^(semitones/12)`; this is the only place the conversion
/// appears.
fn semitones_to_pitch_ratio(semitones: i32) -> f64 {
    f64::powf(2.0, f64::from(semitones) / 12.0)
}

/// Builds the audio path for one request.
///
/// Sync compensation is applied identically to both role-streams before any
/// other step so that a subsequent remix stays aligned. Pitch shift and
/// normalization apply to the processed (instrumental) stream only; the
/// remix scales the original and merges it with the processed output.
pub fn build_audio_path(streams: AudioStreamPair, options: &TranscodeOptions) -> AudioPath {
    let is_transposed = options.semitones != 0;
    let needs_processing = is_transposed || options.normalize || options.avsync != 0.0;
    let wants_remix = options.remix_original;

    if !needs_processing && !wants_remix {
        debug!(
            "no audio processing requested, copying stream a:{}",
            streams.processed.index
        );
        return AudioPath::Passthrough(streams.processed);
    }

    let mut graph = AudioGraph::new(streams);

    // Step 1: sync compensation, identical on both lanes.
    if options.avsync > 0.0 {
        let milliseconds = (options.avsync * 1000.0) as u64;
        graph
            .processed_chain
            .push(AudioFilter::Delay { milliseconds });
        graph
            .original_chain
            .push(AudioFilter::Delay { milliseconds });
    } else if options.avsync < 0.0 {
        let start = -options.avsync;
        graph.processed_chain.push(AudioFilter::Trim { start });
        graph.original_chain.push(AudioFilter::Trim { start });
    }

    // Step 2: pitch shift, instrumental only.
    if is_transposed {
        graph.processed_chain.push(AudioFilter::PitchShift {
            ratio: semitones_to_pitch_ratio(options.semitones),
        });
    }

    // Step 3: loudness normalization, instrumental only.
    if options.normalize {
        graph.processed_chain.push(AudioFilter::Loudnorm {
            integrated: LOUDNORM_INTEGRATED,
            true_peak: LOUDNORM_TRUE_PEAK,
            range: LOUDNORM_RANGE,
        });
    }

    // Step 4: scale the original and merge it with the instrumental.
    if wants_remix {
        let ratio = options.remix_volume_ratio();
        graph.original_chain.push(AudioFilter::Volume { ratio });
        graph.mix = Some(AudioFilter::Mix {
            inputs: 2,
            dropout_transition: 0,
        });
        info!(
            "including original vocals (a:{}) at {:.0}% volume in the mix",
            streams.original.index,
            ratio * 100.0
        );
    }

    AudioPath::Graph(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::streams::select_audio_streams;

    fn dual_track() -> AudioStreamPair {
        select_audio_streams(Some(2))
    }

    #[test]
    fn test_no_options_is_passthrough_copy() {
        let mut options = TranscodeOptions::default();
        options.normalize = false;
        options.remix_original = false;

        let path = build_audio_path(dual_track(), &options);
        assert_eq!(path.codec(), AudioCodec::Copy);
        match path {
            AudioPath::Passthrough(stream) => assert_eq!(stream.index, 1),
            AudioPath::Graph(_) => panic!("expected passthrough"),
        }
    }

    #[test]
    fn test_any_processing_forces_aac() {
        let base = TranscodeOptions {
            normalize: false,
            remix_original: false,
            ..TranscodeOptions::default()
        };

        for options in [
            TranscodeOptions { semitones: 2, ..base.clone() },
            TranscodeOptions { normalize: true, ..base.clone() },
            TranscodeOptions { avsync: 0.25, ..base.clone() },
            TranscodeOptions { remix_original: true, ..base.clone() },
        ] {
            let path = build_audio_path(dual_track(), &options);
            assert_eq!(path.codec(), AudioCodec::Aac, "options: {options:?}");
        }
    }

    #[test]
    fn test_pitch_ratio_conversion() {
        assert_eq!(semitones_to_pitch_ratio(-12), 0.5);
        assert_eq!(semitones_to_pitch_ratio(0), 1.0);
        assert!((semitones_to_pitch_ratio(7) - 1.498).abs() < 0.001);
        assert_eq!(semitones_to_pitch_ratio(12), 2.0);
    }

    #[test]
    fn test_positive_avsync_delays_both_lanes() {
        let options = TranscodeOptions {
            normalize: false,
            remix_original: false,
            avsync: 0.5,
            ..TranscodeOptions::default()
        };

        match build_audio_path(dual_track(), &options) {
            AudioPath::Graph(graph) => {
                assert_eq!(
                    graph.processed_chain,
                    vec![AudioFilter::Delay { milliseconds: 500 }]
                );
                assert_eq!(
                    graph.original_chain,
                    vec![AudioFilter::Delay { milliseconds: 500 }]
                );
            }
            AudioPath::Passthrough(_) => panic!("expected graph"),
        }
    }

    #[test]
    fn test_negative_avsync_trims_both_lanes() {
        let options = TranscodeOptions {
            normalize: false,
            remix_original: false,
            avsync: -0.5,
            ..TranscodeOptions::default()
        };

        match build_audio_path(dual_track(), &options) {
            AudioPath::Graph(graph) => {
                assert_eq!(graph.processed_chain, vec![AudioFilter::Trim { start: 0.5 }]);
                assert_eq!(graph.original_chain, vec![AudioFilter::Trim { start: 0.5 }]);
            }
            AudioPath::Passthrough(_) => panic!("expected graph"),
        }
    }

    #[test]
    fn test_filter_order_on_processed_lane() {
        let options = TranscodeOptions {
            semitones: 7,
            normalize: true,
            avsync: 0.25,
            remix_original: false,
            ..TranscodeOptions::default()
        };

        match build_audio_path(dual_track(), &options) {
            AudioPath::Graph(graph) => {
                assert_eq!(graph.processed_chain.len(), 3);
                assert!(matches!(graph.processed_chain[0], AudioFilter::Delay { .. }));
                assert!(matches!(
                    graph.processed_chain[1],
                    AudioFilter::PitchShift { .. }
                ));
                assert!(matches!(
                    graph.processed_chain[2],
                    AudioFilter::Loudnorm { .. }
                ));
                assert!(graph.mix.is_none());
            }
            AudioPath::Passthrough(_) => panic!("expected graph"),
        }
    }

    #[test]
    fn test_remix_without_processing_merges_unmodified_instrumental() {
        let options = TranscodeOptions {
            normalize: false,
            remix_original: true,
            ..TranscodeOptions::default()
        };

        match build_audio_path(dual_track(), &options) {
            AudioPath::Graph(graph) => {
                assert!(graph.processed_chain.is_empty());
                assert_eq!(graph.original_chain, vec![AudioFilter::Volume { ratio: 0.4 }]);
                assert_eq!(
                    graph.mix,
                    Some(AudioFilter::Mix {
                        inputs: 2,
                        dropout_transition: 0
                    })
                );
            }
            AudioPath::Passthrough(_) => panic!("expected graph"),
        }
    }

    #[test]
    fn test_remix_with_unparsable_volume_uses_default_ratio() {
        let options = TranscodeOptions {
            normalize: false,
            remix_original: true,
            remix_volume: "invalid".to_string(),
            ..TranscodeOptions::default()
        };

        match build_audio_path(dual_track(), &options) {
            AudioPath::Graph(graph) => {
                assert_eq!(graph.original_chain, vec![AudioFilter::Volume { ratio: 0.5 }]);
            }
            AudioPath::Passthrough(_) => panic!("expected graph"),
        }
    }

    #[test]
    fn test_single_track_remix_merges_stream_with_itself() {
        let options = TranscodeOptions {
            normalize: false,
            remix_original: true,
            ..TranscodeOptions::default()
        };
        let streams = select_audio_streams(Some(1));

        match build_audio_path(streams, &options) {
            AudioPath::Graph(graph) => {
                assert_eq!(graph.original.index, 0);
                assert_eq!(graph.processed.index, 0);
                assert!(graph.mix.is_some());
            }
            AudioPath::Passthrough(_) => panic!("expected graph"),
        }
    }
}
