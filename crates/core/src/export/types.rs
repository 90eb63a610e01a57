//! Export request and result types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use zeugnis_shared::types::StudentId;
use zeugnis_shared::{CompilePolicy, JobConfig};

use crate::compile::CompileFailure;

/// A batch to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Class whose students are exported.
    pub class_name: String,
    /// Students to export. Empty means the whole class.
    pub student_ids: Vec<StudentId>,
    /// Compile policy.
    pub policy: CompilePolicy,
}

impl ExportRequest {
    /// Request for every student of a class.
    #[must_use]
    pub fn whole_class(class_name: impl Into<String>, policy: CompilePolicy) -> Self {
        Self {
            class_name: class_name.into(),
            student_ids: Vec::new(),
            policy,
        }
    }
}

impl From<&JobConfig> for ExportRequest {
    fn from(job: &JobConfig) -> Self {
        Self {
            class_name: job.class_name.clone(),
            student_ids: job.student_ids.iter().copied().map(StudentId::new).collect(),
            policy: job.policy,
        }
    }
}

/// Files written by [`ReportEngine::export`](super::ReportEngine::export).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    /// Output root of the school year.
    pub root: PathBuf,
    /// Class directory.
    pub class_dir: PathBuf,
    /// Base name to data file.
    pub data_files: BTreeMap<String, PathBuf>,
    /// Distinct base names in student order.
    pub base_names: Vec<String>,
}

/// Result of a full batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    /// Base name to data file, for every exported student.
    pub data_files: BTreeMap<String, PathBuf>,
    /// Documents compiled in this batch.
    pub compiled: Vec<PathBuf>,
    /// Documents that failed to compile.
    pub failures: Vec<CompileFailure>,
    /// Base names whose documents were already compiled.
    pub skipped: Vec<String>,
}

impl ExportOutcome {
    /// Splits the outcome into the data-file map and the compiled documents.
    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<String, PathBuf>, Vec<PathBuf>) {
        (self.data_files, self.compiled)
    }

    /// Base names that have neither a fresh nor a cached document.
    #[must_use]
    pub fn uncompiled(&self) -> Vec<&str> {
        self.data_files
            .keys()
            .map(String::as_str)
            .filter(|name| {
                !self.skipped.iter().any(|skipped| skipped == name)
                    && !self
                        .compiled
                        .iter()
                        .any(|document| document.file_stem().is_some_and(|stem| stem == *name))
            })
            .collect()
    }

    /// Whether every document compiled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
