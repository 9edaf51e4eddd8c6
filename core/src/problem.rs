pub mod builtin;
pub mod dir;

pub use builtin::BuiltinSource;
pub use dir::DirSource;

pub type ProblemId = u32;

/// One (input, expected-output) pair. Immutable once loaded; sequence order
/// decides execution order and which failure is reported first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testcase {
    pub input: String,
    pub expected: String,
}

impl Testcase {
    pub fn new(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected: expected.into(),
        }
    }
}

/// Informational problem metadata; every field has a default so a missing or
/// partial record never blocks judging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemMeta {
    pub id: ProblemId,
    pub title: String,
    pub time_limit: String,
    pub memory_limit: String,
}

impl ProblemMeta {
    pub fn defaulted(id: ProblemId) -> Self {
        Self {
            id,
            title: format!("Problem {}", id),
            time_limit: "1 second".to_owned(),
            memory_limit: "256 megabytes".to_owned(),
        }
    }
}

/// Provider of problems and their ordered test sequences. The judging engine
/// depends only on this interface, so the built-in table and the on-disk
/// problem directory are interchangeable.
pub trait ProblemSource {
    fn list_problems(&self) -> anyhow::Result<Vec<ProblemId>>;
    fn load_testcases(&self, id: ProblemId) -> anyhow::Result<Vec<Testcase>>;
    fn load_metadata(&self, id: ProblemId) -> anyhow::Result<ProblemMeta>;

    fn contains(&self, id: ProblemId) -> anyhow::Result<bool> {
        Ok(self.list_problems()?.contains(&id))
    }

    /// Where a user should look when a problem turns out to have no tests.
    fn tests_location_hint(&self, _id: ProblemId) -> Option<String> {
        None
    }
}
