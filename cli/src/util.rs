use std::{path::PathBuf, process::exit};

use loj_core::{
    problem::{BuiltinSource, DirSource, ProblemSource},
    Config,
};

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

/// Selects between the built-in problem table and the on-disk problem
/// directory (from the `-d` override or the config).
pub fn problem_source(
    builtin: bool,
    problems_dir: &Option<PathBuf>,
    cfg: &Config,
) -> Box<dyn ProblemSource> {
    if builtin {
        Box::new(BuiltinSource::new())
    } else {
        let dir = problems_dir.clone().unwrap_or_else(|| cfg.problems_dir());
        Box::new(DirSource::new(dir))
    }
}
