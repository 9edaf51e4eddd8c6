pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use error::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::compile::Compiler;
use crate::config::Config;
use crate::judging::{JudgeSession, SessionEvent, SessionOutcome};
use crate::problem::{dir, ProblemId, ProblemMeta, ProblemSource};
use crate::style;

/// Judges one submission against one problem: compile, run every test case
/// until the first failure, render the report. Returns the session outcome so
/// callers can decide on exit codes; all four non-accepted outcomes are
/// recoverable and the caller may judge another submission afterwards.
pub async fn judge(
    source_file: impl AsRef<Path>,
    problem_id: ProblemId,
    source: &dyn ProblemSource,
    cfg: &Config,
) -> Result<SessionOutcome> {
    let source_file = source_file.as_ref();
    ensure!(
        source_file.is_file(),
        "Submission file not found: {}",
        source_file.to_string_lossy()
    );
    ensure!(
        source.contains(problem_id)?,
        "Unknown problem ID: {}",
        problem_id
    );

    let meta = source.load_metadata(problem_id)?;
    style::print_problem_header(&meta);

    let cases = source.load_testcases(problem_id)?;
    if !cases.is_empty() {
        log::info!("Loaded {} test case(s)", cases.len());
    }

    let compiler = Compiler::from_config(&cfg.compiler);
    log::info!(
        "Compiling {} with '{}'",
        source_file.to_string_lossy(),
        compiler.get_path().to_string_lossy()
    );

    let spinner = ProgressBar::new_spinner()
        .with_style(ProgressStyle::default_spinner().template("{spinner} {msg}").unwrap())
        .with_message("Compiling ...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let session = JudgeSession::new(&compiler, cfg.execution_timeout());
    let result = session
        .run(source_file, &cases, |ev| match ev {
            SessionEvent::Compiled { ok } => {
                spinner.finish_and_clear();
                if ok {
                    println!("{}\n", "Compilation successful. Running tests...".green());
                } else {
                    println!("{}", "Compilation failed.".bright_red());
                }
            }
            SessionEvent::Case(case) => style::print_case_line(case),
        })
        .await;
    spinner.finish_and_clear();
    let outcome = result?;

    println!();
    match &outcome {
        SessionOutcome::CompileFailed { log } => style::print_compile_log(log),
        SessionOutcome::Stopped(case) => style::print_failure_detail(case),
        SessionOutcome::NoTestsFound => {
            println!(
                "{}",
                format!("No test cases found for problem {}.", problem_id).yellow()
            );
            if let Some(hint) = source.tests_location_hint(problem_id) {
                println!("{}", format!("Please check '{}'.", hint).yellow());
            }
        }
        SessionOutcome::AllPassed { .. } => {}
    }
    style::print_session_summary(&outcome, cases.len());

    Ok(outcome)
}

pub fn list_problems(source: &dyn ProblemSource) -> Result<Vec<(ProblemId, ProblemMeta)>> {
    source
        .list_problems()?
        .into_iter()
        .map(|id| Ok((id, source.load_metadata(id)?)))
        .collect()
}

/// Writes the example config plus a sample problem so the directory layout
/// is visible from the start.
pub fn init_judge_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    let config_path = dir.join(Config::FILENAME);
    ensure!(
        !config_path.exists(),
        "Already initialized: '{}' exists",
        config_path.to_string_lossy()
    );
    fsutil::write_with_mkdir(&config_path, Config::example_toml())?;

    let problems = dir.join("problems");
    let sample_meta = dir::MetaRecord {
        id: 1,
        title: "Sample Problem".to_owned(),
        time_limit: "1 second".to_owned(),
        memory_limit: "256 megabytes".to_owned(),
    };
    fsutil::write_json_with_mkdir(problems.join("1").join("info.json"), &sample_meta)?;
    let sample_case = dir::TestcaseRecord {
        input: "5\n0 1 2 3 4\n".to_owned(),
        output: "10\n".to_owned(),
    };
    fsutil::write_json_with_mkdir(
        problems.join("1").join("tests").join("001.json"),
        &sample_case,
    )?;
    Ok(())
}
