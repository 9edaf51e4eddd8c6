use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::{ProblemId, ProblemMeta, ProblemSource, Testcase};

/// On-disk record of one test case: `<root>/<id>/tests/<name>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestcaseRecord {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaRecord {
    pub id: ProblemId,
    pub title: String,
    pub time_limit: String,
    pub memory_limit: String,
}

/// Problem directory layout:
///
/// ```text
/// <root>/
///   <id>/
///     info.json          (optional metadata)
///     tests/
///       001.json         {"input": "...", "output": "..."}
///       002.json
/// ```
///
/// Test files are consumed in filename order; records with an empty input or
/// an empty output are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub const TESTS_DIR_NAME: &str = "tests";
    pub const METADATA_FILENAME: &str = "info.json";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn problem_dir(&self, id: ProblemId) -> PathBuf {
        self.root.join(id.to_string())
    }

    pub fn tests_dir(&self, id: ProblemId) -> PathBuf {
        self.problem_dir(id).join(Self::TESTS_DIR_NAME)
    }

    pub fn metadata_file(&self, id: ProblemId) -> PathBuf {
        self.problem_dir(id).join(Self::METADATA_FILENAME)
    }
}

impl ProblemSource for DirSource {
    fn list_problems(&self) -> anyhow::Result<Vec<ProblemId>> {
        if !self.root.is_dir() {
            log::warn!("Problems directory not found: {}", self.root.display());
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fsutil::read_dir(&self.root)?.filter_map(Result::ok) {
            let Ok(ft) = entry.file_type() else {
                continue;
            };
            if !ft.is_dir() {
                continue;
            }
            if let Some(id) = entry.file_name().to_str().and_then(|s| s.parse().ok()) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    fn load_testcases(&self, id: ProblemId) -> anyhow::Result<Vec<Testcase>> {
        let tests_dir = self.tests_dir(id);
        if !tests_dir.is_dir() {
            log::warn!("Tests directory not found: {}", tests_dir.display());
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = fsutil::read_dir(&tests_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
            .collect();
        files.sort();

        let mut cases = Vec::with_capacity(files.len());
        for path in &files {
            let record: TestcaseRecord = fsutil::read_json_with_deserialize(path)
                .with_context(|| format!("Invalid testcase record '{}'", path.display()))?;
            if record.input.is_empty() || record.output.is_empty() {
                log::debug!("Skipping empty testcase record '{}'", path.display());
                continue;
            }
            cases.push(Testcase {
                input: record.input,
                expected: record.output,
            });
        }
        Ok(cases)
    }

    fn load_metadata(&self, id: ProblemId) -> anyhow::Result<ProblemMeta> {
        let mut meta = ProblemMeta::defaulted(id);
        let path = self.metadata_file(id);
        if !path.is_file() {
            return Ok(meta);
        }

        let record: MetaRecord = fsutil::read_json_with_deserialize(&path)
            .with_context(|| format!("Invalid problem metadata '{}'", path.display()))?;
        if record.id != 0 {
            meta.id = record.id;
        }
        if !record.title.is_empty() {
            meta.title = record.title;
        }
        if !record.time_limit.is_empty() {
            meta.time_limit = record.time_limit;
        }
        if !record.memory_limit.is_empty() {
            meta.memory_limit = record.memory_limit;
        }
        Ok(meta)
    }

    fn tests_location_hint(&self, id: ProblemId) -> Option<String> {
        Some(self.tests_dir(id).display().to_string())
    }
}
