use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hevcgate")]
#[command(author, version, about = "Decide whether a video is worth re-encoding to NVENC HEVC")]
pub struct Cli {
    /// Path to options file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one probed file and print the decision
    Decide {
        /// Host file object (JSON with fileMedium, ffProbeData, mediaInfo)
        #[arg(long, conflicts_with_all = ["ffprobe", "mediainfo", "medium"])]
        file: Option<PathBuf>,

        /// Raw `ffprobe -print_format json -show_format -show_streams` output
        #[arg(long, required_unless_present = "file")]
        ffprobe: Option<PathBuf>,

        /// Raw `mediainfo --Output=JSON` output
        #[arg(long, requires = "ffprobe")]
        mediainfo: Option<PathBuf>,

        /// Override the medium derived from the streams
        #[arg(long, requires = "ffprobe")]
        medium: Option<String>,

        /// Options file for this run (takes precedence over --config)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Output the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the plugin descriptor as JSON
    Describe,

    /// Print the default options as TOML
    Defaults,

    /// Validate an options file
    Validate {
        /// Options file to validate (uses default search path if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
