//! Document compilers.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use zeugnis_shared::CompilerConfig;

use super::error::CompileError;

/// Lines of compiler output kept in a failure.
const OUTPUT_TAIL_LINES: usize = 40;

/// Turns `<workdir>/<base_name>.tex` into `<workdir>/<base_name>.pdf`.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    /// Compiles one document and returns the path of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiler cannot be started, fails, times out,
    /// or produces no document.
    async fn compile(&self, workdir: &Path, base_name: &str) -> Result<PathBuf, CompileError>;
}

/// Runs LuaLaTeX (or a compatible executable) as a subprocess.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
    timeout: Option<Duration>,
}

impl LatexCompiler {
    /// Flags passed before the template file name.
    pub const FLAGS: [&'static str; 2] = ["-interaction=nonstopmode", "-halt-on-error"];

    /// Creates a compiler for `program` without a time limit.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Creates a compiler from configuration.
    #[must_use]
    pub fn from_config(config: &CompilerConfig) -> Self {
        let compiler = Self::new(config.program());
        match config.timeout_secs {
            Some(seconds) => compiler.with_timeout(Duration::from_secs(seconds)),
            None => compiler,
        }
    }

    /// Kills the compiler when a document takes longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command-line arguments for a document.
    #[must_use]
    pub fn args(base_name: &str) -> Vec<String> {
        let mut args: Vec<String> = Self::FLAGS.iter().map(ToString::to_string).collect();
        args.push(format!("{base_name}.tex"));
        args
    }

    async fn run(&self, workdir: &Path, base_name: &str) -> Result<Output, CompileError> {
        let mut command = Command::new(&self.program);
        command
            .args(Self::args(base_name))
            .current_dir(workdir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = command.output();
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| CompileError::TimedOut {
                    base_name: base_name.to_string(),
                    seconds: limit.as_secs(),
                })?,
            None => output.await,
        };

        result.map_err(|source| CompileError::Spawn {
            program: self.program.clone(),
            source,
        })
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(&self, workdir: &Path, base_name: &str) -> Result<PathBuf, CompileError> {
        let output = self.run(workdir, base_name).await?;

        if !output.status.success() {
            return Err(CompileError::Failed {
                base_name: base_name.to_string(),
                status: output.status.code(),
                output: output_tail(&output),
            });
        }

        let document = workdir.join(format!("{base_name}.pdf"));
        if !document.is_file() {
            return Err(CompileError::MissingOutput {
                base_name: base_name.to_string(),
                path: document,
            });
        }
        Ok(document)
    }
}

/// Last lines of stdout and stderr. LaTeX reports errors on stdout.
fn output_tail(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }

    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
    lines[start..].join("\n")
}
