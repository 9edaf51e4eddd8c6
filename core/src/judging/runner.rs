use std::{
    fs::File,
    process::Stdio,
    time::{Duration, Instant},
};

use tokio::process::Command;

use super::{normalize, outcome::*, session::ScratchDir};
use crate::problem::Testcase;

/// Executes a compiled artifact against an ordered test sequence, strictly
/// one case at a time, stopping at the first case that does not pass.
///
/// Each case is staged through the scratch dir: the input file is rewritten,
/// the artifact runs with stdin/stdout bound to the scratch files, and the
/// captured output is compared after normalization. Ordering across cases is
/// enforced by the sequential control flow alone.
#[derive(Debug, Clone, Copy)]
pub struct TestRunner<'a> {
    scratch: &'a ScratchDir,
    execution_time_limit: Option<Duration>,
}

impl<'a> TestRunner<'a> {
    pub fn new(scratch: &'a ScratchDir, execution_time_limit: Option<Duration>) -> Self {
        Self {
            scratch,
            execution_time_limit,
        }
    }

    /// Runs cases in sequence order. The observer fires once per executed
    /// case, in order; cases after the first non-pass are never executed.
    pub async fn run_all(
        &self,
        cases: &[Testcase],
        mut observer: impl FnMut(&CaseOutcome),
    ) -> RunOutcome {
        for (index, case) in cases.iter().enumerate() {
            let started = Instant::now();
            let verdict = self.execute(case).await;
            let outcome = CaseOutcome {
                index,
                elapsed: started.elapsed(),
                verdict,
            };
            observer(&outcome);
            if !outcome.verdict.is_passed() {
                return RunOutcome::Stopped(outcome);
            }
        }
        RunOutcome::AllPassed { count: cases.len() }
    }

    async fn execute(&self, case: &Testcase) -> TestVerdict {
        let error = |message: String| TestVerdict::Error {
            input: case.input.clone(),
            message,
        };

        let input_path = self.scratch.input_file();
        let output_path = self.scratch.output_file();

        if let Err(e) = tokio::fs::write(&input_path, &case.input).await {
            return error(format!(
                "Cannot stage input file '{}': {}",
                input_path.display(),
                e
            ));
        }
        let stdin = match File::open(&input_path) {
            Ok(f) => f,
            Err(e) => return error(format!("Cannot open staged input: {}", e)),
        };
        let stdout = match File::create(&output_path) {
            Ok(f) => f,
            Err(e) => return error(format!("Cannot create output file: {}", e)),
        };

        let artifact = self.scratch.artifact_file();
        let mut child = match Command::new(&artifact)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .spawn()
        {
            Ok(c) => c,
            Err(e) => return error(format!("Failed to spawn '{}': {}", artifact.display(), e)),
        };

        let waited = match self.execution_time_limit {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(res) => res,
                Err(_) => {
                    child.kill().await.unwrap_or_else(|e| {
                        log::warn!("Failed to kill timed-out process: {}", e)
                    });
                    return error(format!(
                        "Execution timed out after {}ms",
                        limit.as_millis()
                    ));
                }
            },
            None => child.wait().await,
        };
        if let Err(e) = waited {
            return error(format!("Failed to wait for submission process: {}", e));
        }
        // The submission's exit status is ignored; only its output is judged.

        let captured = match tokio::fs::read(&output_path).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => return error(format!("Cannot read captured output: {}", e)),
        };

        if normalize::outputs_match(&captured, &case.expected) {
            TestVerdict::Passed
        } else {
            TestVerdict::Failed {
                input: case.input.clone(),
                actual: captured,
                expected: case.expected.clone(),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;

    fn write_script(path: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, body).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn scratch_with_artifact(body: &str) -> ScratchDir {
        let scratch = ScratchDir::create().unwrap();
        write_script(&scratch.artifact_file(), body);
        scratch
    }

    fn case(input: &str, expected: &str) -> Testcase {
        Testcase {
            input: input.to_owned(),
            expected: expected.to_owned(),
        }
    }

    #[tokio::test]
    async fn echo_artifact_passes_matching_case() {
        let scratch = scratch_with_artifact("#!/bin/sh\ncat\n");
        let runner = TestRunner::new(&scratch, None);
        let res = runner.run_all(&[case("10\n", "10\n")], |_| {}).await;
        assert_eq!(res, RunOutcome::AllPassed { count: 1 });
    }

    #[tokio::test]
    async fn missing_final_newline_is_forgiven() {
        let scratch = scratch_with_artifact("#!/bin/sh\nprintf '10'\n");
        let runner = TestRunner::new(&scratch, None);
        let res = runner.run_all(&[case("", "10\n")], |_| {}).await;
        assert_eq!(res, RunOutcome::AllPassed { count: 1 });
    }

    #[tokio::test]
    async fn trailing_space_before_newline_is_forgiven() {
        let scratch = scratch_with_artifact("#!/bin/sh\nprintf '10 \\n'\n");
        let runner = TestRunner::new(&scratch, None);
        let res = runner.run_all(&[case("", "10\n")], |_| {}).await;
        assert_eq!(res, RunOutcome::AllPassed { count: 1 });
    }

    #[tokio::test]
    async fn nonzero_exit_status_is_ignored() {
        let scratch = scratch_with_artifact("#!/bin/sh\ncat\nexit 3\n");
        let runner = TestRunner::new(&scratch, None);
        let res = runner.run_all(&[case("ok\n", "ok\n")], |_| {}).await;
        assert_eq!(res, RunOutcome::AllPassed { count: 1 });
    }

    #[tokio::test]
    async fn stops_at_first_mismatch_and_reports_raw_texts() {
        let scratch = scratch_with_artifact("#!/bin/sh\ncat\n");
        let runner = TestRunner::new(&scratch, None);
        let cases = [
            case("a\n", "a\n"),
            case("b\n", "XX\n"),
            case("never-run\n", "never-run\n"),
        ];
        let mut seen = Vec::new();
        let res = runner.run_all(&cases, |c| seen.push(c.index)).await;

        assert_eq!(seen, vec![0, 1]);
        match res {
            RunOutcome::Stopped(c) => {
                assert_eq!(c.index, 1);
                assert_eq!(
                    c.verdict,
                    TestVerdict::Failed {
                        input: "b\n".to_owned(),
                        actual: "b\n".to_owned(),
                        expected: "XX\n".to_owned(),
                    }
                );
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_artifact_is_an_execution_error() {
        let scratch = ScratchDir::create().unwrap();
        let runner = TestRunner::new(&scratch, None);
        let res = runner.run_all(&[case("1\n", "1\n")], |_| {}).await;
        match res {
            RunOutcome::Stopped(c) => {
                assert_eq!(c.index, 0);
                assert!(matches!(c.verdict, TestVerdict::Error { .. }));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn overrunning_submission_is_killed_and_reported() {
        let scratch = scratch_with_artifact("#!/bin/sh\nsleep 5\n");
        let runner = TestRunner::new(&scratch, Some(Duration::from_millis(200)));
        let started = Instant::now();
        let res = runner.run_all(&[case("", "10\n")], |_| {}).await;
        assert!(started.elapsed() < Duration::from_secs(4));
        match res {
            RunOutcome::Stopped(c) => match c.verdict {
                TestVerdict::Error { ref message, .. } => {
                    assert!(message.contains("timed out"), "message: {}", message)
                }
                ref other => panic!("unexpected verdict: {:?}", other),
            },
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn scratch_input_is_rewritten_between_cases() {
        // Second case only passes if its own (shorter) input fully replaced
        // the first case's staged input.
        let scratch = scratch_with_artifact("#!/bin/sh\ncat\n");
        let runner = TestRunner::new(&scratch, None);
        let cases = [case("long long line\n", "long long line\n"), case("x\n", "x\n")];
        let res = runner.run_all(&cases, |_| {}).await;
        assert_eq!(res, RunOutcome::AllPassed { count: 2 });
    }
}
