// karaplan-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Karaplan: karaoke transcode planning tool",
    long_about = "Builds complete ffmpeg invocation plans for karaoke playback via the karaplan-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Builds the ffmpeg invocation plan for a media file
    Plan(PlanArgs),
    /// Reports the installed ffmpeg version and its capabilities
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Source media file
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Output target path
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Synchronized-graphics sidecar file (CDG lyric graphics)
    #[arg(long, value_name = "SIDECAR_FILE")]
    pub sidecar: Option<PathBuf>,

    // --- Audio Adjustments ---
    /// Semitones to shift the instrumental track by (0 = no pitch change)
    #[arg(long, value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
    pub semitones: i32,

    /// Disable loudness normalization of the instrumental track (enabled by default)
    #[arg(long, default_value_t = false)]
    pub no_normalize: bool,

    /// AV-sync offset in seconds (positive delays audio, negative trims it)
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0, allow_negative_numbers = true)]
    pub avsync: f64,

    /// Disable mixing the original vocal track back in (enabled by default)
    #[arg(long, default_value_t = false)]
    pub no_remix: bool,

    /// Remix volume for the original track as a percentage (0-100)
    #[arg(long, value_name = "PERCENT", default_value = "40")]
    pub remix_volume: String,

    // --- Video/Container Adjustments ---
    /// Nearest-neighbor upscale of the sidecar graphics to 720p
    #[arg(long, default_value_t = false)]
    pub upscale_sidecar: bool,

    /// Optimize the container for fully-buffered playback instead of progressive streaming
    #[arg(long, default_value_t = false)]
    pub buffer_fully: bool,

    // --- Output Control ---
    /// Print the plan as JSON instead of an ffmpeg argument line
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Skip probing ffmpeg/ffprobe; capabilities are then assumed unavailable
    #[arg(long, default_value_t = false)]
    pub no_probe: bool,
}

#[derive(Parser, Debug)]
pub struct ProbeArgs {
    /// Optional media file to probe for duration and audio stream count
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}
