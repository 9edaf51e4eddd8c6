use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::compile::Compiler;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub compiler: CompilerConfig,
    pub judge: JudgeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Toolchain override; when absent the compiler is located relative to
    /// the running executable, falling back to PATH.
    pub path: Option<PathBuf>,
    pub flags: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            path: None,
            flags: Compiler::DEFAULT_FLAGS.map(str::to_owned).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub problems_dir: PathBuf,
    /// Per-test wall-clock limit in milliseconds; 0 disables the limit.
    pub execution_timeout_ms: u64,
}

impl JudgeConfig {
    pub const DEFAULT_EXECUTION_TIMEOUT_MS: u64 = 10_000;
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            problems_dir: PathBuf::from("./problems"),
            execution_timeout_ms: Self::DEFAULT_EXECUTION_TIMEOUT_MS,
        }
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "loj.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        std::str::from_utf8(file.data.as_ref()).unwrap().to_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file in ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Option<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
    }

    /// Loads the nearest config file, or the built-in defaults when no
    /// `loj.toml` exists anywhere up the tree.
    pub fn from_file_finding_in_ancestors_or_default(
        cur_dir: impl AsRef<Path>,
    ) -> anyhow::Result<Self> {
        match Self::find_file_in_ancestors(cur_dir) {
            Some(filepath) => Self::from_toml_file(filepath),
            None => Ok(Self::default()),
        }
    }

    pub fn execution_timeout(&self) -> Option<Duration> {
        match self.judge.execution_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Problems dir resolved against the config file's directory when the
    /// configured path is relative.
    pub fn problems_dir(&self) -> PathBuf {
        let dir = &self.judge.problems_dir;
        match (dir.is_relative(), &self.source_config_file) {
            (true, Some(file)) => match file.parent() {
                Some(parent) => parent.join(dir),
                None => dir.clone(),
            },
            _ => dir.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_toml_should_be_parsable() {
        let toml = Config::example_toml();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();

        assert_eq!(cfg.source_config_file, None);
        assert_eq!(cfg.compiler.path, None);
        assert_eq!(cfg.compiler.flags, ["-O2", "-static", "-std=c++17"]);
        assert_eq!(cfg.judge.problems_dir, Path::new("./problems"));
        assert_eq!(cfg.judge.execution_timeout_ms, 10_000);
    }

    #[test]
    fn example_toml_matches_the_defaults() {
        let cfg = Config::from_toml(&Config::example_toml()).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn zero_timeout_disables_the_limit() {
        let cfg = Config::from_toml("[judge]\nexecution_timeout_ms = 0\n").unwrap();
        assert_eq!(cfg.execution_timeout(), None);

        let cfg = Config::from_toml("[judge]\nexecution_timeout_ms = 250\n").unwrap();
        assert_eq!(cfg.execution_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn relative_problems_dir_resolves_against_config_file() {
        let mut cfg = Config::default();
        cfg.source_config_file = Some(PathBuf::from("/srv/judge/loj.toml"));
        assert_eq!(cfg.problems_dir(), Path::new("/srv/judge/./problems"));

        cfg.judge.problems_dir = PathBuf::from("/data/problems");
        assert_eq!(cfg.problems_dir(), Path::new("/data/problems"));
    }
}
