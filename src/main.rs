mod cli;

use hevcgate::{config, details};
use hevcgate_probe::{parse_ffprobe_output, parse_mediainfo_output, MediaFile, Medium};
use hevcgate_rules::{evaluate, PolicyInputs};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hevcgate=debug,hevcgate_rules=debug,hevcgate_probe=debug".to_string()
        } else {
            "hevcgate=warn,hevcgate_rules=warn,hevcgate_probe=warn".to_string()
        }
    });

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Decide {
            file,
            ffprobe,
            mediainfo,
            medium,
            options,
            json,
        } => {
            let source = match (file, ffprobe) {
                (Some(file), _) => Source::Host(file),
                (None, Some(ffprobe)) => Source::Probe {
                    ffprobe,
                    mediainfo,
                    medium,
                },
                (None, None) => anyhow::bail!("Either --file or --ffprobe is required"),
            };
            let options_path = options.or(cli.config);
            decide(&source, options_path.as_deref(), json)
        }
        Commands::Describe => describe(),
        Commands::Defaults => {
            print!("{}", config::default_options_toml()?);
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_options(path.as_deref())
        }
        Commands::Version => {
            println!("hevcgate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Where the probed file comes from.
enum Source {
    /// The host pipeline's file object.
    Host(PathBuf),
    /// Raw tool output.
    Probe {
        ffprobe: PathBuf,
        mediainfo: Option<PathBuf>,
        medium: Option<String>,
    },
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

fn load_media_file(source: &Source) -> Result<MediaFile> {
    match source {
        Source::Host(path) => MediaFile::from_json(&read(path)?)
            .with_context(|| format!("Failed to parse host file object: {:?}", path)),
        Source::Probe {
            ffprobe,
            mediainfo,
            medium,
        } => {
            let mut file = parse_ffprobe_output(&read(ffprobe)?)
                .with_context(|| format!("Failed to parse ffprobe output: {:?}", ffprobe))?;

            if let Some(path) = mediainfo {
                let block = parse_mediainfo_output(&read(path)?)
                    .with_context(|| format!("Failed to parse mediainfo output: {:?}", path))?;
                file = file.with_media_info(block);
            }
            if let Some(medium) = medium {
                file.file_medium = Medium::from(medium.clone());
            }

            Ok(file)
        }
    }
}

fn decide(source: &Source, options_path: Option<&Path>, json: bool) -> Result<()> {
    let inputs = config::load_options_or_default(options_path)?;
    let file = load_media_file(source)?;

    tracing::debug!(
        medium = %file.file_medium,
        streams = file.streams().len(),
        "Evaluating file"
    );
    let decision = evaluate(&file, &inputs);

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }

    for line in &decision.log {
        println!("{}", line);
    }
    println!();
    if decision.should_process {
        println!("Container: .{}", decision.container);
        println!("Preset: {}", decision.preset());
    } else {
        println!("No transcode needed.");
    }

    Ok(())
}

fn describe() -> Result<()> {
    let json_str = serde_json::to_string_pretty(&details::details())?;
    println!("{}", json_str);
    Ok(())
}

fn validate_options(path: Option<&Path>) -> Result<()> {
    let inputs = match path {
        Some(p) => {
            println!("Validating options: {:?}", p);
            config::load_options(p)?
        }
        None => {
            println!("No options file specified, searching default locations");
            config::load_options_or_default(None)?
        }
    };

    println!("✓ Options are valid");
    print_inputs(&inputs);
    Ok(())
}

fn print_inputs(inputs: &PolicyInputs) {
    println!(
        "  targetCodecCompression: {}",
        inputs.target_codec_compression
    );
    println!("  cqv: {}", inputs.cqv);
    println!("  bframe: {}", inputs.bframe);
    println!("  ten_bit: {}", inputs.ten_bit);
    println!("  ffmpeg_preset: {}", inputs.ffmpeg_preset);
    println!("  lowResThreshold: {}", inputs.low_res_threshold);
    println!("  minCompressionGain: {}", inputs.min_compression_gain);
}
