use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Defaults compiled into the binary; validated by `build.rs`.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("tourism.md"),
            output: PathBuf::from("tourism_rtl.docx"),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Config bundled with the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::compiled_default()),
            Err(source) => Err(Error::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Pick the input and output paths for a run.
    ///
    /// An explicit output always wins. An explicit input without an output
    /// writes `<stem>_rtl.docx` next to the input.
    pub fn resolve_paths(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> (PathBuf, PathBuf) {
        match (input, output) {
            (Some(input), Some(output)) => (input, output),
            (Some(input), None) => {
                let output = derived_output(&input);
                (input, output)
            }
            (None, Some(output)) => (self.paths.input.clone(), output),
            (None, None) => (self.paths.input.clone(), self.paths.output.clone()),
        }
    }
}

fn derived_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    input.with_file_name(format!("{stem}_rtl.docx"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_fallbacks() {
        let config = Config::compiled_default();
        assert_eq!(config.paths, PathsConfig::default());
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config = Config::parse("[log]\nlevel = \"debug\"\n", Path::new("x.toml")).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.paths.input, PathBuf::from("tourism.md"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = Config::parse("[paths\ninput = 3", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("definitely/not/here/rtl-docx.toml")).unwrap();
        assert_eq!(config, Config::compiled_default());
    }

    #[test]
    fn resolve_paths_rules() {
        let config = Config::compiled_default();

        assert_eq!(
            config.resolve_paths(None, None),
            (PathBuf::from("tourism.md"), PathBuf::from("tourism_rtl.docx"))
        );
        assert_eq!(
            config.resolve_paths(Some(PathBuf::from("docs/guide.md")), None),
            (PathBuf::from("docs/guide.md"), PathBuf::from("docs/guide_rtl.docx"))
        );
        assert_eq!(
            config.resolve_paths(Some(PathBuf::from("a.md")), Some(PathBuf::from("b.docx"))),
            (PathBuf::from("a.md"), PathBuf::from("b.docx"))
        );
        assert_eq!(
            config.resolve_paths(None, Some(PathBuf::from("out.docx"))),
            (PathBuf::from("tourism.md"), PathBuf::from("out.docx"))
        );
    }
}
