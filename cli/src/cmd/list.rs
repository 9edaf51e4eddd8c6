use std::path::PathBuf;

use colored::Colorize;
use loj_core::{action, Config};

use crate::util;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(short = 'd', long)]
    pub problems_dir: Option<PathBuf>,

    /// Use the built-in problem table instead of the problems directory.
    #[arg(long)]
    pub builtin: bool,
}

pub fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = Config::from_file_finding_in_ancestors_or_default(util::current_dir())?;
    let source = util::problem_source(args.builtin, &args.problems_dir, &cfg);

    let problems = action::list_problems(source.as_ref())?;
    if problems.is_empty() {
        println!("{}", "No problems found.".yellow());
        return Ok(());
    }
    for (id, meta) in &problems {
        println!(
            "{:>4}  {}  [{} / {}]",
            id.to_string().bold(),
            meta.title,
            meta.time_limit,
            meta.memory_limit,
        );
    }
    Ok(())
}
