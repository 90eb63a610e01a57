//! Batch compilation with a per-class cache.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};
use zeugnis_shared::{CompilePolicy, CompilerConfig};

use super::cache::CompileCache;
use super::compiler::{DocumentCompiler, LatexCompiler};
use super::error::CompileError;

/// Lifecycle state of one document in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Requested, not yet started.
    Pending,
    /// Compiler running.
    Compiling,
    /// Document produced.
    Compiled,
    /// Compiler failed.
    Failed,
    /// Served from the cache.
    Skipped,
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Compiling => "compiling",
            Self::Compiled => "compiled",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        };
        f.write_str(name)
    }
}

/// A document that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileFailure {
    /// Document base name.
    pub base_name: String,
    /// Error description.
    pub reason: String,
}

/// Result of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Documents produced by this batch, in request order.
    pub compiled: Vec<PathBuf>,
    /// Documents that failed, in request order.
    pub failures: Vec<CompileFailure>,
    /// Base names served from the cache.
    pub skipped: Vec<String>,
    states: Vec<(String, DocumentState)>,
}

impl CompileReport {
    /// Final state of a requested document.
    #[must_use]
    pub fn state_of(&self, base_name: &str) -> Option<DocumentState> {
        self.states
            .iter()
            .find(|(name, _)| name == base_name)
            .map(|(_, state)| *state)
    }
}

/// Compiles class batches and maintains the class cache.
#[derive(Clone)]
pub struct CompileOrchestrator {
    compiler: Arc<dyn DocumentCompiler>,
    workers: usize,
}

impl fmt::Debug for CompileOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOrchestrator")
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

impl CompileOrchestrator {
    /// Creates a sequential orchestrator around `compiler`.
    #[must_use]
    pub fn new(compiler: Arc<dyn DocumentCompiler>) -> Self {
        Self {
            compiler,
            workers: 1,
        }
    }

    /// Creates an orchestrator running LuaLaTeX as configured.
    #[must_use]
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self::new(Arc::new(LatexCompiler::from_config(config))).with_workers(config.workers())
    }

    /// Allows up to `workers` documents to compile at once.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Compiles `base_names` in `class_dir` under `policy`.
    ///
    /// Failures are logged and reported per document; they never abort the
    /// batch. The cache file is rewritten afterwards in every case.
    ///
    /// # Errors
    ///
    /// Returns `Cache` if the cache file cannot be read or written.
    pub async fn run(
        &self,
        class_dir: &Path,
        base_names: &[String],
        policy: CompilePolicy,
    ) -> Result<CompileReport, CompileError> {
        let mut cache = CompileCache::load(class_dir)?;

        let mut seen = HashSet::new();
        let requested: Vec<&str> = base_names
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect();

        let mut report = CompileReport::default();
        let mut pending = Vec::new();
        for name in &requested {
            if policy == CompilePolicy::SkipCompiled && cache.contains(name) {
                debug!(document = %name, state = %DocumentState::Skipped, "Served from cache");
                report.skipped.push((*name).to_string());
            } else {
                debug!(document = %name, state = %DocumentState::Pending, "Queued");
                pending.push(*name);
            }
        }

        info!(
            class_dir = %class_dir.display(),
            %policy,
            requested = requested.len(),
            queued = pending.len(),
            skipped = report.skipped.len(),
            workers = self.workers,
            "Compiling documents"
        );

        let compiler = &self.compiler;
        let mut results: Vec<(usize, &str, Result<PathBuf, CompileError>)> =
            stream::iter(pending.into_iter().enumerate())
                .map(|(index, name)| async move {
                    debug!(document = %name, state = %DocumentState::Compiling, "Starting compiler");
                    (index, name, compiler.compile(class_dir, name).await)
                })
                .buffer_unordered(self.workers)
                .collect()
                .await;
        results.sort_by_key(|(index, _, _)| *index);

        let mut outcomes = Vec::with_capacity(results.len());
        for (_, name, result) in results {
            match result {
                Ok(document) => {
                    info!(document = %name, state = %DocumentState::Compiled, "Compiled");
                    cache.insert(name);
                    report.compiled.push(document);
                    outcomes.push((name.to_string(), DocumentState::Compiled));
                }
                Err(err) => {
                    warn!(
                        document = %name,
                        state = %DocumentState::Failed,
                        error = %err,
                        output = err.output().unwrap_or_default(),
                        "Compilation failed"
                    );
                    cache.remove(name);
                    report.failures.push(CompileFailure {
                        base_name: name.to_string(),
                        reason: err.to_string(),
                    });
                    outcomes.push((name.to_string(), DocumentState::Failed));
                }
            }
        }

        cache.save()?;

        report.states = requested
            .iter()
            .map(|name| {
                let state = outcomes
                    .iter()
                    .find(|(done, _)| done == *name)
                    .map_or(DocumentState::Skipped, |(_, state)| *state);
                ((*name).to_string(), state)
            })
            .collect();

        info!(
            compiled = report.compiled.len(),
            failed = report.failures.len(),
            skipped = report.skipped.len(),
            "Compilation finished"
        );
        Ok(report)
    }
}
