//! Report engine.

use std::collections::BTreeMap;

use tracing::{info, warn};
use zeugnis_shared::{AppConfig, ExportConfig};

use super::document::student_document;
use super::error::ExportError;
use super::types::{ExportOutcome, ExportRequest, ExportedFiles};
use crate::compile::CompileOrchestrator;
use crate::eligibility::{ClassContext, EligibilityResolver, EligibilityRules};
use crate::layout::OutputLayout;
use crate::lua::to_assignment;
use crate::record::{ExportSnapshot, RecordStore};
use crate::template::TemplateBinder;

/// Name of the variable every data file assigns.
const DATA_VARIABLE: &str = "student";

/// Generates the reports of one class batch.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    config: ExportConfig,
    resolver: EligibilityResolver,
    orchestrator: CompileOrchestrator,
}

impl ReportEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new(config: ExportConfig, orchestrator: CompileOrchestrator) -> Self {
        let resolver = EligibilityResolver::new(EligibilityRules::from(&config));
        Self {
            config,
            resolver,
            orchestrator,
        }
    }

    /// Creates an engine running LuaLaTeX as configured.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.export.clone(),
            CompileOrchestrator::from_config(&config.compiler),
        )
    }

    /// Writes data files and template instances for a snapshot.
    ///
    /// Prepares the output root (installing the template bundle on first use),
    /// then resolves, serializes and binds every student in order. Students
    /// that share a base name overwrite each other; the last one wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout, template bundle or template is unusable,
    /// a data file cannot be serialized, or a file cannot be written.
    pub fn export(&self, snapshot: &ExportSnapshot) -> Result<ExportedFiles, ExportError> {
        let layout = OutputLayout::resolve(&self.config.output_dir, &snapshot.school_year)?;
        layout.install_template_bundle(&self.config.template_dir)?;
        let binder = TemplateBinder::load(
            &layout.root().join(&self.config.template_file),
            &self.config.data_placeholder,
        )?;
        let class_dir = layout.class_dir(&snapshot.class.name)?;

        let context = ClassContext::from_snapshot(snapshot);
        let mut data_files = BTreeMap::new();
        let mut base_names = Vec::with_capacity(snapshot.students.len());

        for record in &snapshot.students {
            let report = self.resolver.resolve(&context, record);
            let literal = to_assignment(DATA_VARIABLE, &student_document(&report))?;
            let files = binder.write_student(&class_dir, &report.base_name, &literal)?;

            if data_files
                .insert(report.base_name.clone(), files.data)
                .is_some()
            {
                warn!(
                    base_name = %report.base_name,
                    student_id = %record.student.id,
                    "Base name collision, overwriting previous student files"
                );
            } else {
                base_names.push(report.base_name);
            }
        }

        info!(
            class = %snapshot.class.name,
            students = snapshot.students.len(),
            files = data_files.len(),
            "Exported student data"
        );

        Ok(ExportedFiles {
            root: layout.root().to_path_buf(),
            class_dir,
            data_files,
            base_names,
        })
    }

    /// Loads a snapshot from `store`, exports it and compiles the batch.
    ///
    /// # Errors
    ///
    /// Returns an error for configuration problems (missing records, template
    /// or bundle), serialization failures and filesystem errors. Compiler
    /// failures of single documents are reported in the outcome instead.
    pub async fn generate<S>(
        &self,
        store: &S,
        request: &ExportRequest,
    ) -> Result<ExportOutcome, ExportError>
    where
        S: RecordStore + ?Sized,
    {
        info!(class = %request.class_name, policy = %request.policy, "Generating reports");
        let snapshot = store
            .load_snapshot(&request.class_name, &request.student_ids)
            .await?;
        let files = self.export(&snapshot)?;

        let report = self
            .orchestrator
            .run(&files.class_dir, &files.base_names, request.policy)
            .await?;

        if !report.failures.is_empty() {
            warn!(
                failed = report.failures.len(),
                "Some documents failed to compile"
            );
        }

        Ok(ExportOutcome {
            data_files: files.data_files,
            compiled: report.compiled,
            failures: report.failures,
            skipped: report.skipped,
        })
    }
}
