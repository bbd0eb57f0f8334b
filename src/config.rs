//! Runtime configuration: defaults, optional TOML file, command line.

use crate::cli::Cli;
use crate::error::Result;
use anyhow::{Context, bail};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Results per search when the caller does not say.
pub const DEFAULT_LIMIT: usize = 10;

/// Hard cap on results per search.
pub const DEFAULT_MAX_LIMIT: usize = 50;

/// Settings as they may appear in the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    docs_dir: Option<PathBuf>,
    base_url: Option<String>,
    default_limit: Option<usize>,
    max_limit: Option<usize>,
    refresh_secs: Option<u64>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut file: Self = toml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        // Relative paths in the file are relative to the file itself
        if let Some(dir) = file.docs_dir.take() {
            let dir = PathBuf::from(&*expand_tilde(&dir.to_string_lossy()));
            file.docs_dir = Some(match path.parent() {
                Some(parent) if dir.is_relative() => parent.join(dir),
                _ => dir,
            });
        }

        Ok(file)
    }
}

/// Validated server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub docs_dir: PathBuf,
    pub base_url: Option<String>,
    pub default_limit: usize,
    pub max_limit: usize,
    /// `None` disables periodic reloading
    pub refresh_interval: Option<Duration>,
}

impl Config {
    /// Builds the configuration from the command line, layered over the config
    /// file when one is given, layered over built-in defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::read(&PathBuf::from(&*expand_tilde(&path.to_string_lossy())))?,
            None => FileConfig::default(),
        };

        let docs_dir = cli
            .docs_dir
            .as_ref()
            .map(|dir| PathBuf::from(&*expand_tilde(&dir.to_string_lossy())))
            .or(file.docs_dir)
            .context("No documentation directory configured. Pass --docs-dir or set DOCSEARCH_DOCS_DIR")?;

        let refresh_secs = cli.refresh_secs.or(file.refresh_secs).unwrap_or(0);

        let config = Self {
            docs_dir,
            base_url: cli.base_url.clone().or(file.base_url),
            default_limit: cli.default_limit.or(file.default_limit).unwrap_or(DEFAULT_LIMIT),
            max_limit: cli.max_limit.or(file.max_limit).unwrap_or(DEFAULT_MAX_LIMIT),
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.docs_dir.exists() {
            bail!("Documentation directory does not exist: {}", self.docs_dir.display());
        }
        if !self.docs_dir.is_dir() {
            bail!("Documentation path is not a directory: {}", self.docs_dir.display());
        }
        if self.default_limit == 0 {
            bail!("default_limit must be at least 1");
        }
        if self.max_limit < self.default_limit {
            bail!(
                "max_limit ({}) must not be smaller than default_limit ({})",
                self.max_limit,
                self.default_limit
            );
        }
        Ok(())
    }

    /// The number of results to return for a request asking for `requested`.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use clap::Parser;
    use rstest::rstest;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("docsearch-mcp").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();

        let_assert!(Ok(config) = Config::load(&cli(&["--docs-dir", path])));
        check!(config.docs_dir == dir.path());
        check!(config.default_limit == DEFAULT_LIMIT);
        check!(config.max_limit == DEFAULT_MAX_LIMIT);
        check!(config.refresh_interval.is_none());
        check!(config.base_url.is_none());
    }

    #[test]
    fn test_file_values_and_cli_precedence() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("pages")).unwrap();
        let config_path = dir.path().join("docsearch.toml");
        std::fs::write(
            &config_path,
            "docs_dir = \"pages\"\nbase_url = \"https://docs.example\"\ndefault_limit = 5\nmax_limit = 20\nrefresh_secs = 300\n",
        )
        .unwrap();

        let_assert!(
            Ok(config) = Config::load(&cli(&[
                "--config",
                config_path.to_str().unwrap(),
                "--max-limit",
                "30",
            ]))
        );
        check!(config.docs_dir == dir.path().join("pages"));
        check!(config.base_url.as_deref() == Some("https://docs.example"));
        check!(config.default_limit == 5);
        check!(config.max_limit == 30);
        check!(config.refresh_interval == Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_unknown_file_keys_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.toml");
        std::fs::write(&config_path, "docs_directory = \"x\"\n").unwrap();

        check!(Config::load(&cli(&["--config", config_path.to_str().unwrap()])).is_err());
    }

    #[test]
    fn test_missing_docs_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        check!(Config::load(&cli(&["--docs-dir", missing.to_str().unwrap()])).is_err());
    }

    #[rstest]
    #[case(&["--default-limit", "0"])]
    #[case(&["--default-limit", "20", "--max-limit", "10"])]
    fn test_invalid_limits(#[case] extra: &[&str]) {
        let dir = TempDir::new().unwrap();
        let mut args = vec!["--docs-dir", dir.path().to_str().unwrap()];
        args.extend_from_slice(extra);
        check!(Config::load(&cli(&args)).is_err());
    }

    #[rstest]
    #[case(None, 10)]
    #[case(Some(3), 3)]
    #[case(Some(0), 0)]
    #[case(Some(500), 50)]
    fn test_effective_limit(#[case] requested: Option<usize>, #[case] expected: usize) {
        let config = Config {
            docs_dir: PathBuf::from("."),
            base_url: None,
            default_limit: 10,
            max_limit: 50,
            refresh_interval: None,
        };
        check!(config.effective_limit(requested) == expected);
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        check!(expand_tilde("/abs/path") == "/abs/path");
        check!(expand_tilde("relative") == "relative");
    }
}
