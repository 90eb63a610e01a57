//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::CompilePolicy;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Output layout and report content configuration.
    #[serde(default)]
    pub export: ExportConfig,
    /// Document compiler configuration.
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// The batch the exporter runs. Only the exporter binary requires it.
    pub job: Option<JobConfig>,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Output layout and report content configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory the `print_<year>_<term>` roots are created in.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Static template bundle copied into every output root.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
    /// Template file inside the output root.
    #[serde(default = "default_template_file")]
    pub template_file: String,
    /// Data-file reference inside the template that is rewritten per student.
    #[serde(default = "default_data_placeholder")]
    pub data_placeholder: String,
    /// Level texts longer than this (trimmed, in characters) are long-form.
    #[serde(default = "default_level_threshold")]
    pub level_threshold: usize,
    /// Name prefix marking elective subjects.
    #[serde(default = "default_elective_prefix")]
    pub elective_prefix: String,
    /// First grade of the upper grade band.
    #[serde(default = "default_upper_band_from")]
    pub upper_band_from: u8,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("TexTemplate")
}

fn default_template_file() -> String {
    "Zeugnis.tex".to_string()
}

fn default_data_placeholder() -> String {
    "studentdata.lua".to_string()
}

fn default_level_threshold() -> usize {
    3
}

fn default_elective_prefix() -> String {
    "Wahlpflichtbereich".to_string()
}

fn default_upper_band_from() -> u8 {
    7
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            template_dir: default_template_dir(),
            template_file: default_template_file(),
            data_placeholder: default_data_placeholder(),
            level_threshold: default_level_threshold(),
            elective_prefix: default_elective_prefix(),
            upper_band_from: default_upper_band_from(),
        }
    }
}

/// Document compiler configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompilerConfig {
    /// Compiler executable. Falls back to the platform default when unset.
    pub program: Option<String>,
    /// Per-document time limit in seconds. No limit when unset.
    pub timeout_secs: Option<u64>,
    /// Maximum number of documents compiled at once.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,
}

fn default_max_parallel() -> usize {
    1
}

impl CompilerConfig {
    /// Returns the configured executable or the platform default.
    #[must_use]
    pub fn program(&self) -> String {
        self.program
            .clone()
            .unwrap_or_else(|| default_compiler_program().to_string())
    }

    /// Returns the effective worker count (at least one).
    #[must_use]
    pub fn workers(&self) -> usize {
        self.max_parallel.max(1)
    }
}

/// Returns the LuaLaTeX executable name for the host platform.
#[must_use]
pub const fn default_compiler_program() -> &'static str {
    if cfg!(windows) {
        "lualatex.exe"
    } else {
        "lualatex"
    }
}

/// A single export batch.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Class whose students are exported.
    pub class_name: String,
    /// Students to export. Empty means the whole class.
    #[serde(default)]
    pub student_ids: Vec<i32>,
    /// Compile policy. Must be configured.
    pub policy: CompilePolicy,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("ZEUGNIS")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("job.student_ids"),
            )
            .build()?;

        config.try_deserialize()
    }
}
