//! Output root and class directory resolution.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use super::error::LayoutError;
use crate::record::SchoolYear;

/// Returns the output root directory name, e.g. `print_2025_hj`.
///
/// # Errors
///
/// Returns `ReportYearUnknown` when the school year has no report date and
/// its name carries no parsable second year.
pub fn root_dir_name(year: &SchoolYear) -> Result<String, LayoutError> {
    let report_year = year
        .report_year()
        .ok_or_else(|| LayoutError::ReportYearUnknown {
            name: year.name.clone(),
        })?;
    Ok(format!("print_{report_year}_{}", year.term().dir_suffix()))
}

/// Resolved output root for one school year and term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Resolves the output root below `output_dir` and creates it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the report year is unknown or the directory cannot be created.
    pub fn resolve(output_dir: &Path, year: &SchoolYear) -> Result<Self, LayoutError> {
        let root = output_dir.join(root_dir_name(year)?);
        fs::create_dir_all(&root).map_err(|e| LayoutError::io(&root, e))?;
        debug!(root = %root.display(), "Output root ready");
        Ok(Self { root })
    }

    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the class directory inside the root, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidClassName` for names that are empty or would escape the
    /// root, and `Io` if the directory cannot be created.
    pub fn class_dir(&self, class_name: &str) -> Result<PathBuf, LayoutError> {
        let name = class_name.trim();
        let mut components = Path::new(name).components();
        let valid = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none()
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(LayoutError::InvalidClassName(class_name.to_string()));
        }

        let dir = self.root.join(name);
        fs::create_dir_all(&dir).map_err(|e| LayoutError::io(&dir, e))?;
        Ok(dir)
    }

    /// Copies the static template bundle into the root.
    ///
    /// Entries that already exist in the root are left untouched, so repeated
    /// calls are no-ops. Returns the number of top-level entries copied.
    ///
    /// # Errors
    ///
    /// Returns `TemplateBundleMissing` if `bundle` is not a directory, or `Io`
    /// if copying fails.
    pub fn install_template_bundle(&self, bundle: &Path) -> Result<usize, LayoutError> {
        if !bundle.is_dir() {
            return Err(LayoutError::TemplateBundleMissing(bundle.to_path_buf()));
        }

        let entries = fs::read_dir(bundle).map_err(|e| LayoutError::io(bundle, e))?;
        let mut copied = 0;
        for entry in entries {
            let entry = entry.map_err(|e| LayoutError::io(bundle, e))?;
            let source = entry.path();
            let target = self.root.join(entry.file_name());
            if target.exists() {
                continue;
            }
            if source.is_dir() {
                copy_dir(&source, &target)?;
            } else {
                fs::copy(&source, &target).map_err(|e| LayoutError::io(&target, e))?;
            }
            copied += 1;
        }

        if copied > 0 {
            info!(root = %self.root.display(), copied, "Installed template bundle");
        }
        Ok(copied)
    }
}

fn copy_dir(source: &Path, target: &Path) -> Result<(), LayoutError> {
    fs::create_dir_all(target).map_err(|e| LayoutError::io(target, e))?;
    let entries = fs::read_dir(source).map_err(|e| LayoutError::io(source, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| LayoutError::io(source, e))?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if from.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| LayoutError::io(&to, e))?;
        }
    }
    Ok(())
}
