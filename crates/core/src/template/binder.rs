//! Template binder.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::TemplateError;

/// Files written for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundFiles {
    /// The data file, `<base>.lua`.
    pub data: PathBuf,
    /// The template instance, `<base>.tex`.
    pub document: PathBuf,
}

/// A loaded template, ready to be bound to data files.
#[derive(Debug, Clone)]
pub struct TemplateBinder {
    source: String,
    placeholder: String,
}

impl TemplateBinder {
    /// Loads the template at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file is missing, `PlaceholderMissing` if it
    /// does not contain `placeholder`, or `Io` for other read failures.
    pub fn load(path: &Path, placeholder: &str) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => TemplateError::NotFound(path.to_path_buf()),
            _ => TemplateError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        if placeholder.is_empty() || !source.contains(placeholder) {
            return Err(TemplateError::PlaceholderMissing {
                path: path.to_path_buf(),
                placeholder: placeholder.to_string(),
            });
        }

        Ok(Self {
            source,
            placeholder: placeholder.to_string(),
        })
    }

    /// Returns the template text with every placeholder replaced by `data_file`.
    #[must_use]
    pub fn bind(&self, data_file: &str) -> String {
        self.source.replace(&self.placeholder, data_file)
    }

    /// Writes `<base>.lua` with `data_literal` and the bound `<base>.tex` into `dir`.
    ///
    /// Existing files of the same name are overwritten.
    ///
    /// # Errors
    ///
    /// Returns `Io` if a file cannot be written.
    pub fn write_student(
        &self,
        dir: &Path,
        base_name: &str,
        data_literal: &str,
    ) -> Result<BoundFiles, TemplateError> {
        let data_name = format!("{base_name}.lua");
        let data = dir.join(&data_name);
        let document = dir.join(format!("{base_name}.tex"));

        write(&data, data_literal)?;
        write(&document, &self.bind(&data_name))?;
        debug!(data = %data.display(), document = %document.display(), "Wrote student files");

        Ok(BoundFiles { data, document })
    }
}

fn write(path: &Path, contents: &str) -> Result<(), TemplateError> {
    fs::write(path, contents).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })
}
