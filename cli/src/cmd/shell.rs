use std::path::PathBuf;

use anyhow::bail;
use colored::Colorize;
use loj_core::{action, interactive, Config};

use crate::util;

use super::{GlobalArgs, SubcmdResult};

const BANNER: &str = r#"
   __       _
  / /  ___ (_)
 / /__/ _ \/ /
/____/\___/ /
       |__/
"#;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(short = 'd', long)]
    pub problems_dir: Option<PathBuf>,

    /// Use the built-in problem table instead of the problems directory.
    #[arg(long)]
    pub builtin: bool,
}

/// Interactive judge loop: pick a problem, point at a submission, judge,
/// repeat. A failed session is not fatal; the loop prompts again.
pub async fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    println!("{}", BANNER.cyan());
    println!("Welcome to the loj C++ judge!\n");

    let cfg = Config::from_file_finding_in_ancestors_or_default(util::current_dir())?;
    let source = util::problem_source(args.builtin, &args.problems_dir, &cfg);

    loop {
        let problems = action::list_problems(source.as_ref())?;
        if problems.is_empty() {
            bail!(
                "No problems found. Put problem dirs under '{}' or run with --builtin.",
                cfg.problems_dir().to_string_lossy()
            );
        }

        let items: Vec<String> = problems
            .iter()
            .map(|(id, meta)| format!("{}: {}", id, meta.title))
            .collect();
        let selected = interactive::ask_select("Select a problem", &items)?;
        let (problem_id, _) = problems[selected];

        let path = interactive::ask_text("Path to the submitted C++ file")?;
        let path = PathBuf::from(path.trim());
        if !path.is_file() {
            eprintln!("{}", "Submission file not found. Try again.".bright_red());
            continue;
        }

        if let Err(e) = action::judge(&path, problem_id, source.as_ref(), &cfg).await {
            eprintln!("Error: {:?}", e);
        }

        if !interactive::ask_confirm("Judge another submission?", true)? {
            break;
        }
        println!("\n========== New Submission ==========\n");
    }

    println!("Thank you for using loj. Goodbye!");
    Ok(())
}
