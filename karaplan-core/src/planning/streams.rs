//! Audio stream role selection.
//!
//! Karaoke sources carry up to two audio tracks: track 0 with the original
//! vocals and track 1 with the instrumental ("processed") mix. This module
//! binds those roles to concrete stream indexes, with a deterministic
//! fallback for single-track sources.

use serde::Serialize;

/// Logical role an audio stream plays in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioRole {
    /// The track believed to contain vocals.
    Original,
    /// The instrumental track believed to lack vocals.
    Processed,
}

/// A role bound to a concrete audio stream index within input 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioStreamRef {
    pub role: AudioRole,
    /// Index within the source's audio streams (`a:N` specifier).
    pub index: u32,
}

/// The resolved pair of role-streams for one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioStreamPair {
    pub original: AudioStreamRef,
    pub processed: AudioStreamRef,
}

/// Binds the `original` role to audio stream 0 and `processed` to stream 1.
///
/// If the source has fewer than two audio streams, or the count is unknown,
/// both roles bind to stream 0. This is expected, common behavior for
/// single-track sources, not an error.
///
/// Known quirk: with the fallback active and a remix requested, the plan
/// mixes stream 0 against a gain-scaled copy of itself, matching the
/// long-standing behavior of the original player.
pub fn select_audio_streams(audio_streams: Option<u32>) -> AudioStreamPair {
    let has_instrumental_track = audio_streams.is_some_and(|count| count >= 2);
    let processed_index = if has_instrumental_track { 1 } else { 0 };

    AudioStreamPair {
        original: AudioStreamRef {
            role: AudioRole::Original,
            index: 0,
        },
        processed: AudioStreamRef {
            role: AudioRole::Processed,
            index: processed_index,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_track_source_binds_both_roles() {
        let pair = select_audio_streams(Some(2));
        assert_eq!(pair.original.index, 0);
        assert_eq!(pair.processed.index, 1);
        assert_eq!(pair.original.role, AudioRole::Original);
        assert_eq!(pair.processed.role, AudioRole::Processed);
    }

    #[test]
    fn test_single_track_source_falls_back_to_stream_zero() {
        let pair = select_audio_streams(Some(1));
        assert_eq!(pair.original.index, 0);
        assert_eq!(pair.processed.index, 0);
    }

    #[test]
    fn test_unknown_count_falls_back_to_stream_zero() {
        let pair = select_audio_streams(None);
        assert_eq!(pair.original.index, 0);
        assert_eq!(pair.processed.index, 0);
    }

    #[test]
    fn test_extra_tracks_still_bind_first_two() {
        let pair = select_audio_streams(Some(5));
        assert_eq!(pair.original.index, 0);
        assert_eq!(pair.processed.index, 1);
    }
}
