use std::path::PathBuf;

use loj_core::{action, problem::ProblemId, Config};

use crate::util;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub problem: ProblemId,

    #[arg()]
    pub file: PathBuf,

    #[arg(short = 'd', long)]
    pub problems_dir: Option<PathBuf>,

    /// Use the built-in problem table instead of the problems directory.
    #[arg(long)]
    pub builtin: bool,
}

pub async fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = Config::from_file_finding_in_ancestors_or_default(util::current_dir())?;
    let source = util::problem_source(args.builtin, &args.problems_dir, &cfg);

    let outcome = action::judge(&args.file, args.problem, source.as_ref(), &cfg).await?;
    if !outcome.is_accepted() {
        std::process::exit(1);
    }
    Ok(())
}
