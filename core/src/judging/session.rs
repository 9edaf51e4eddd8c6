use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use super::{outcome::*, runner::TestRunner};
use crate::compile::{CompileOutcome, Compiler};
use crate::problem::Testcase;

static SESSION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Per-session scratch directory holding every temporary artifact of one
/// judge run: the compiled binary, the staged input/output files, and the
/// compile error log. The unique name keeps concurrent sessions from
/// contending for the same paths.
///
/// Removal is idempotent and also happens on drop, so no artifact survives
/// the session on any exit path.
#[derive(Debug)]
pub struct ScratchDir {
    dir: PathBuf,
    removed: bool,
}

impl ScratchDir {
    const ARTIFACT_FILENAME: &str = "submission_build";
    const INPUT_FILENAME: &str = "input.txt";
    const OUTPUT_FILENAME: &str = "output.txt";
    const COMPILE_LOG_FILENAME: &str = "compile_errors.txt";

    pub fn create() -> fsutil::Result<Self> {
        let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("loj-session-{}-{}", std::process::id(), seq));
        fsutil::mkdir_all(&dir)?;
        Ok(Self { dir, removed: false })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_file(&self) -> PathBuf {
        self.dir.join(Self::ARTIFACT_FILENAME)
    }

    pub fn input_file(&self) -> PathBuf {
        self.dir.join(Self::INPUT_FILENAME)
    }

    pub fn output_file(&self) -> PathBuf {
        self.dir.join(Self::OUTPUT_FILENAME)
    }

    pub fn compile_log_file(&self) -> PathBuf {
        self.dir.join(Self::COMPILE_LOG_FILENAME)
    }

    #[must_use]
    pub fn cleanup(&mut self) -> fsutil::Result<()> {
        if !self.removed {
            fsutil::remove_dir_all_if_exists(&self.dir)?;
            self.removed = true;
        }
        Ok(())
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            log::warn!("Failed to remove scratch dir: {}", e);
        }
    }
}

/// Progress notifications emitted while a session runs.
#[derive(Debug, Clone, Copy)]
pub enum SessionEvent<'a> {
    Compiled { ok: bool },
    Case(&'a CaseOutcome),
}

/// One complete compile-and-judge cycle for a single submission.
///
/// `run` drives compile -> empty-check -> per-test execution and guarantees
/// that the scratch directory is removed on every terminal path: compile
/// failure, no tests, mid-run failure, execution error, and full success.
#[derive(Debug, Clone, Copy)]
pub struct JudgeSession<'a> {
    compiler: &'a Compiler,
    execution_time_limit: Option<Duration>,
}

impl<'a> JudgeSession<'a> {
    pub fn new(compiler: &'a Compiler, execution_time_limit: Option<Duration>) -> Self {
        Self {
            compiler,
            execution_time_limit,
        }
    }

    pub async fn run(
        &self,
        source_file: &Path,
        cases: &[Testcase],
        mut on_event: impl FnMut(SessionEvent),
    ) -> anyhow::Result<SessionOutcome> {
        let mut scratch = ScratchDir::create()?;

        let outcome = match self.compiler.compile(source_file, &scratch).await? {
            CompileOutcome::Failure { log_file } => {
                on_event(SessionEvent::Compiled { ok: false });
                // The log file dies with the scratch dir; capture it now.
                let log = fsutil::read_to_string(&log_file).unwrap_or_default();
                SessionOutcome::CompileFailed { log }
            }
            CompileOutcome::Success { .. } => {
                on_event(SessionEvent::Compiled { ok: true });
                if cases.is_empty() {
                    SessionOutcome::NoTestsFound
                } else {
                    let runner = TestRunner::new(&scratch, self.execution_time_limit);
                    let run = runner
                        .run_all(cases, |case| on_event(SessionEvent::Case(case)))
                        .await;
                    run.into()
                }
            }
        };

        if let Err(e) = scratch.cleanup() {
            log::warn!("Failed to clean up scratch dir: {}", e);
        }
        Ok(outcome)
    }
}
