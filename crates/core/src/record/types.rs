//! Snapshot types handed from the record store to the engine.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use zeugnis_shared::types::{ClassId, CompetenceId, SchoolYearId, StudentId, SubjectId, TopicId};

/// Half-year or end-of-year report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Mid-year report ("Halbjahr").
    HalfYear,
    /// End-of-year report ("Endjahr").
    EndOfYear,
}

impl Term {
    /// Suffix of the output root directory.
    #[must_use]
    pub const fn dir_suffix(self) -> &'static str {
        match self {
            Self::HalfYear => "hj",
            Self::EndOfYear => "ej",
        }
    }

    /// Label written into the report data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HalfYear => "Halbjahr",
            Self::EndOfYear => "Endjahr",
        }
    }
}

/// The active school year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolYear {
    /// Record identifier.
    pub id: SchoolYearId,
    /// Display name, e.g. `2024/2025`.
    pub name: String,
    /// Whether this is the end-of-year report.
    pub end_of_year: bool,
    /// Date printed on the reports.
    pub report_date: Option<NaiveDate>,
}

impl SchoolYear {
    /// Returns the report term.
    #[must_use]
    pub const fn term(&self) -> Term {
        if self.end_of_year {
            Term::EndOfYear
        } else {
            Term::HalfYear
        }
    }

    /// Returns the calendar year the reports are issued in.
    ///
    /// Uses the report date when set, otherwise the second half of the name
    /// (`2024/2025` gives 2025).
    #[must_use]
    pub fn report_year(&self) -> Option<i32> {
        if let Some(date) = self.report_date {
            return Some(date.year());
        }
        self.name
            .split('/')
            .nth(1)
            .and_then(|year| year.trim().parse().ok())
    }
}

/// A school class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolClass {
    /// Record identifier.
    pub id: ClassId,
    /// Class name, e.g. `5a`.
    pub name: String,
}

/// A student row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Record identifier.
    pub id: StudentId,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Excused absence in days.
    pub days_absent_excused: u32,
    /// Unexcused absence in days.
    pub days_absent_unexcused: u32,
    /// Excused absence in lesson periods.
    pub lessons_absent_excused: u32,
    /// Unexcused absence in lesson periods.
    pub lessons_absent_unexcused: u32,
    /// Personal report narrative.
    pub report_text: String,
    /// Free-text remarks.
    pub remarks: String,
    /// Reduced competence mode (stored as `lb`).
    pub reduced_competence_mode: bool,
    /// Narrative-only mode (stored as `gb`). Suppresses every competence breakdown.
    pub narrative_only_mode: bool,
}

/// A competence text of a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competence {
    /// Record identifier.
    pub id: CompetenceId,
    /// Competence description.
    pub text: String,
}

/// A topic of a subject, scoped to one grade band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Record identifier.
    pub id: TopicId,
    /// Topic title.
    pub name: String,
    /// Grade band, e.g. `5/6`.
    pub block: String,
    /// Competences in catalog order.
    pub competences: Vec<Competence>,
}

/// A subject a student is enrolled in, with the student's level text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectLink {
    /// Subject identifier.
    pub subject_id: SubjectId,
    /// Subject name.
    pub name: String,
    /// The student's level ("niveau") for this subject.
    pub level: Option<String>,
    /// Topics of the subject in catalog order.
    pub topics: Vec<Topic>,
}

/// Everything the engine needs about one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    /// The student row.
    pub student: Student,
    /// Subject links in enrollment order.
    pub subjects: Vec<SubjectLink>,
    /// Raw grade text per topic.
    pub grades: HashMap<TopicId, String>,
}

impl StudentRecord {
    /// Returns the trimmed grade for a topic, if one is recorded and non-empty.
    #[must_use]
    pub fn grade(&self, topic: TopicId) -> Option<&str> {
        self.grades
            .get(&topic)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// One consistent read of the record store for a single class batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSnapshot {
    /// The active school year.
    pub school_year: SchoolYear,
    /// The exported class.
    pub class: SchoolClass,
    /// Competences selected for the class. Empty means no restriction.
    pub selected_competences: BTreeSet<CompetenceId>,
    /// Students in export order.
    pub students: Vec<StudentRecord>,
}
