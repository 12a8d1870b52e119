// karaplan-cli/src/commands.rs
//
// Implements the 'plan' and 'probe' subcommands on top of karaplan-core.

use crate::cli::{PlanArgs, ProbeArgs};
use anyhow::Result;
use karaplan_core::external::{detect_capabilities, ffmpeg_version, is_ffmpeg_installed, probe_media};
use karaplan_core::{Capabilities, MediaRequest, TranscodeOptions, build_plan};
use log::debug;

/// Builds a plan for the given request and prints it.
pub fn run_plan(args: PlanArgs) -> Result<()> {
    // Capabilities and stream counts are probed once per run; with
    // --no-probe everything falls back to the fail-safe defaults.
    let (capabilities, audio_streams) = if args.no_probe {
        debug!("probing skipped, assuming no optional capabilities");
        (Capabilities::default(), None)
    } else {
        let capabilities = detect_capabilities();
        let probe = probe_media(&args.input);
        (capabilities, probe.audio_streams)
    };

    let mut request = MediaRequest::new(args.input, args.output);
    request.audio_streams = audio_streams;
    if let Some(sidecar) = args.sidecar {
        request = request.with_sidecar(sidecar);
    }

    let options = TranscodeOptions {
        semitones: args.semitones,
        normalize: !args.no_normalize,
        buffer_fully_before_playback: args.buffer_fully,
        avsync: args.avsync,
        upscale_sidecar: args.upscale_sidecar,
        remix_original: !args.no_remix,
        remix_volume: args.remix_volume,
    };

    let plan = build_plan(&request, &options, capabilities);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("ffmpeg {}", plan.to_args().join(" "));
    }
    Ok(())
}

/// Reports the ffmpeg install, its capabilities and, optionally, the
/// properties of a media file.
pub fn run_probe(args: ProbeArgs) -> Result<()> {
    if !is_ffmpeg_installed() {
        println!("ffmpeg: not installed");
        return Ok(());
    }
    let version = ffmpeg_version()?;
    println!("ffmpeg version: {version}");

    let capabilities = detect_capabilities();
    println!(
        "hardware h264 encoder (h264_v4l2m2m): {}",
        availability(capabilities.hardware_h264)
    );
    println!(
        "pitch shift filter (rubberband): {}",
        availability(capabilities.pitch_filter)
    );

    if let Some(file) = args.file {
        let probe = probe_media(&file);
        match probe.duration_secs {
            Some(secs) => println!("duration: {secs}s"),
            None => println!("duration: unknown"),
        }
        match probe.audio_streams {
            Some(count) => println!("audio streams: {count}"),
            None => println!("audio streams: unknown"),
        }
    }
    Ok(())
}

fn availability(available: bool) -> &'static str {
    if available { "available" } else { "unavailable" }
}
