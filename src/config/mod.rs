//! Options file loading.
//!
//! An options file is a flat TOML (or JSON, by extension) table using the
//! host's option names:
//!
//! ```toml
//! targetCodecCompression = 0.10
//! cqv = 26
//! bframe = 3
//! ten_bit = true
//! ffmpeg_preset = "slow"
//! lowResThreshold = 720
//! minCompressionGain = 0.10
//! ```
//!
//! Unset keys take their defaults in [`PolicyOverrides::merge`].

use anyhow::{Context, Result};
use hevcgate_rules::{PolicyInputs, PolicyOverrides};
use std::path::Path;

/// Locations searched when no options file is given.
const DEFAULT_PATHS: &[&str] = &[
    "./hevcgate.toml",
    "~/.config/hevcgate/options.toml",
    "/etc/hevcgate/options.toml",
];

/// Read an options file without applying defaults.
pub fn load_overrides(path: &Path) -> Result<PolicyOverrides> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file: {:?}", path))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let overrides = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse options file: {:?}", path))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse options file: {:?}", path))?
    };

    Ok(overrides)
}

/// Load an options file and merge it over the defaults.
pub fn load_options(path: &Path) -> Result<PolicyInputs> {
    let overrides = load_overrides(path)?;
    let inputs = overrides
        .merge()
        .with_context(|| format!("Invalid options in {:?}", path))?;

    tracing::debug!(?path, ?inputs, "Loaded options");
    Ok(inputs)
}

/// Load options from `custom_path`, else the first default location that
/// exists, else the built-in defaults.
pub fn load_options_or_default(custom_path: Option<&Path>) -> Result<PolicyInputs> {
    if let Some(path) = custom_path {
        return load_options(path);
    }

    for path_str in DEFAULT_PATHS {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_options(path);
        }
    }

    Ok(PolicyInputs::default())
}

/// The defaults rendered as an options file.
pub fn default_options_toml() -> Result<String> {
    toml::to_string(&PolicyInputs::default()).context("Failed to render default options")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "opts.toml", "cqv = 24\nffmpeg_preset = \"slow\"\n");

        let inputs = load_options(&path).unwrap();
        assert_eq!(inputs.cqv, 24);
        assert_eq!(inputs.ffmpeg_preset, "slow");
        assert_eq!(inputs.low_res_threshold, 720);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "opts.json", r#"{"bframe": "2", "ten_bit": "false"}"#);

        let inputs = load_options(&path).unwrap();
        assert_eq!(inputs.bframe, 2);
        assert!(!inputs.ten_bit);
    }

    #[test]
    fn test_invalid_value_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.toml", "bframe = 9\n");

        let err = load_options(&path).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("bad.toml"), "unexpected error: {chain}");
        assert!(chain.contains("bframe"), "unexpected error: {chain}");
    }

    #[test]
    fn test_missing_file() {
        let err = load_options(Path::new("/nonexistent/hevcgate.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read options file"));
    }

    #[test]
    fn test_defaults_round_trip() {
        let rendered = default_options_toml().unwrap();
        assert!(rendered.contains("targetCodecCompression = 0.12"));
        let overrides: PolicyOverrides = toml::from_str(&rendered).unwrap();
        assert_eq!(overrides.merge().unwrap(), PolicyInputs::default());
    }
}
