use std::{
    fs::File,
    path::{Path, PathBuf},
    process::Stdio,
};

use anyhow::Context;
use tokio::process::Command;

use crate::config::CompilerConfig;
use crate::judging::ScratchDir;

/// Result of one compiler invocation. A failure carries the path to the
/// error-log file; the log is surfaced verbatim, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Success { artifact: PathBuf },
    Failure { log_file: PathBuf },
}

/// Thin pass-through to the external C++ toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    path: PathBuf,
    flags: Vec<String>,
}

impl Compiler {
    pub const DEFAULT_FLAGS: [&str; 3] = ["-O2", "-static", "-std=c++17"];

    pub fn new(path: impl Into<PathBuf>, flags: Vec<String>) -> Self {
        Self {
            path: path.into(),
            flags,
        }
    }

    pub fn from_config(cfg: &CompilerConfig) -> Self {
        let path = cfg.path.clone().unwrap_or_else(Self::locate_default);
        Self::new(path, cfg.flags.clone())
    }

    /// Prefers the toolchain bundled next to the judge executable
    /// (`<exe-dir>/mingw64/bin/g++`); falls back to `g++` on PATH.
    pub fn locate_default() -> PathBuf {
        let bundled = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("mingw64/bin/g++")));
        match bundled {
            Some(path) if path.is_file() => path,
            _ => PathBuf::from("g++"),
        }
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }

    pub fn get_flags(&self) -> &[String] {
        &self.flags
    }

    /// Compiles `source_file` into the scratch dir's artifact slot, with the
    /// compiler's diagnostic stream redirected to the scratch error log.
    /// Failure means a non-zero exit status OR a zero exit that produced no
    /// artifact. Leaves all files in place; cleanup belongs to the session.
    pub async fn compile(
        &self,
        source_file: &Path,
        scratch: &ScratchDir,
    ) -> anyhow::Result<CompileOutcome> {
        let artifact = scratch.artifact_file();
        let log_file = scratch.compile_log_file();

        let log = File::create(&log_file)
            .with_context(|| format!("Cannot create compile log '{}'", log_file.display()))?;

        let status = Command::new(&self.path)
            .arg(source_file)
            .arg("-o")
            .arg(&artifact)
            .args(&self.flags)
            .stdin(Stdio::null())
            .stderr(Stdio::from(log))
            .status()
            .await
            .with_context(|| format!("Failed to spawn compiler '{}'", self.path.display()))?;

        if status.success() && artifact.is_file() {
            Ok(CompileOutcome::Success { artifact })
        } else {
            Ok(CompileOutcome::Failure { log_file })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_script(path: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, body).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[tokio::test]
    async fn success_requires_artifact_on_disk() {
        let scratch = ScratchDir::create().unwrap();
        let cc = scratch.path().join("cc-ok");
        write_script(&cc, "#!/bin/sh\ncp \"$1\" \"$3\"\n");
        let src = scratch.path().join("main.cpp");
        std::fs::write(&src, "int main() {}").unwrap();

        let compiler = Compiler::new(&cc, vec![]);
        let outcome = compiler.compile(&src, &scratch).await.unwrap();
        assert_eq!(
            outcome,
            CompileOutcome::Success {
                artifact: scratch.artifact_file()
            }
        );
    }

    #[tokio::test]
    async fn nonzero_exit_redirects_diagnostics_to_log() {
        let scratch = ScratchDir::create().unwrap();
        let cc = scratch.path().join("cc-err");
        write_script(&cc, "#!/bin/sh\necho 'main.cpp:1: error' >&2\nexit 1\n");
        let src = scratch.path().join("main.cpp");
        std::fs::write(&src, "int main(").unwrap();

        let compiler = Compiler::new(&cc, vec![]);
        let outcome = compiler.compile(&src, &scratch).await.unwrap();
        let CompileOutcome::Failure { log_file } = outcome else {
            panic!("expected failure");
        };
        let log = fsutil::read_to_string(&log_file).unwrap();
        assert!(log.contains("main.cpp:1: error"));
    }

    #[tokio::test]
    async fn zero_exit_without_artifact_is_failure() {
        let scratch = ScratchDir::create().unwrap();
        let cc = scratch.path().join("cc-silent");
        write_script(&cc, "#!/bin/sh\nexit 0\n");
        let src = scratch.path().join("main.cpp");
        std::fs::write(&src, "int main() {}").unwrap();

        let compiler = Compiler::new(&cc, vec![]);
        let outcome = compiler.compile(&src, &scratch).await.unwrap();
        assert!(matches!(outcome, CompileOutcome::Failure { .. }));
    }

    #[test]
    fn default_flags_match_toolchain_invocation() {
        assert_eq!(Compiler::DEFAULT_FLAGS, ["-O2", "-static", "-std=c++17"]);
    }
}
