//! Eligibility rules and the filtered report model.

use chrono::NaiveDate;
use zeugnis_shared::ExportConfig;

use crate::record::Term;

/// Tunables of the eligibility rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityRules {
    /// Level texts longer than this (trimmed, in characters) are long-form.
    pub level_threshold: usize,
    /// Name prefix marking elective subjects.
    pub elective_prefix: String,
    /// Classes from this grade on belong to the upper grade band.
    pub upper_band_from: u8,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for EligibilityRules {
    fn from(config: &ExportConfig) -> Self {
        Self {
            level_threshold: config.level_threshold,
            elective_prefix: config.elective_prefix.clone(),
            upper_band_from: config.upper_band_from,
        }
    }
}

/// Highest school grade a class name can carry.
pub const MAX_GRADE: u8 = 13;

/// Two-year grade band of a class, derived from the leading grade number of
/// its name (`7b` is in band `7/8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBand {
    grade: u8,
}

impl GradeBand {
    /// Derives the band from a class name. Names without a leading grade, or
    /// with one outside `1..=13`, have none.
    #[must_use]
    pub fn from_class_name(name: &str) -> Option<Self> {
        let digits: String = name
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        match digits.parse::<u8>() {
            Ok(grade) if (1..=MAX_GRADE).contains(&grade) => Some(Self { grade }),
            _ => None,
        }
    }

    /// The class grade.
    #[must_use]
    pub const fn grade(self) -> u8 {
        self.grade
    }

    /// First grade of the band; bands start at odd grades.
    #[must_use]
    pub const fn first_grade(self) -> u8 {
        if self.grade % 2 == 1 {
            self.grade
        } else {
            self.grade - 1
        }
    }

    /// Band label as stored on topics, e.g. `5/6`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{}/{}", self.first_grade(), self.first_grade() + 1)
    }

    /// Whether a topic block (`5/6`, `5 / 6`) belongs to this band.
    #[must_use]
    pub fn contains_block(self, block: &str) -> bool {
        let normalized: String = block.chars().filter(|c| !c.is_whitespace()).collect();
        normalized == self.label()
    }

    /// Whether the class is in the upper grade band.
    #[must_use]
    pub const fn is_upper(self, upper_band_from: u8) -> bool {
        self.grade >= upper_band_from
    }
}

/// Classified level ("niveau") text of a subject link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    /// No level or only whitespace.
    Absent,
    /// A short code such as `G`, `E` or `2`.
    Short(String),
    /// A verbal assessment replacing the competence breakdown.
    LongForm(String),
}

impl Level {
    /// Classifies a raw level text against the long-form threshold.
    #[must_use]
    pub fn classify(raw: Option<&str>, threshold: usize) -> Self {
        let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::Absent;
        };
        if text.chars().count() > threshold {
            Self::LongForm(text.to_string())
        } else {
            Self::Short(text.to_string())
        }
    }

    /// Whether any level value is present.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Whether the level is long-form.
    #[must_use]
    pub const fn is_long_form(&self) -> bool {
        matches!(self, Self::LongForm(_))
    }
}

/// Level as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelOutput {
    /// No level.
    Empty,
    /// Short code, passed through.
    Code(String),
    /// Long-form text split into paragraphs with collapsed whitespace.
    Narrative(Vec<String>),
}

impl From<&Level> for LevelOutput {
    fn from(level: &Level) -> Self {
        match level {
            Level::Absent => Self::Empty,
            Level::Short(code) => Self::Code(code.clone()),
            Level::LongForm(text) => Self::Narrative(paragraphs(text)),
        }
    }
}

/// Splits text at blank lines and collapses whitespace inside each paragraph.
#[must_use]
pub fn paragraphs(text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                result.push(current.join(" "));
                current.clear();
            }
        } else {
            current.extend(line.split_whitespace());
        }
    }
    if !current.is_empty() {
        result.push(current.join(" "));
    }
    result
}

/// Absence totals as printed on the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsenceSummary {
    /// Days absent in total.
    pub days_total: u32,
    /// Days absent without excuse.
    pub days_unexcused: u32,
    /// Lesson periods absent in total.
    pub lessons_total: u32,
    /// Lesson periods absent without excuse.
    pub lessons_unexcused: u32,
}

/// A topic row of a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicReport {
    /// Topic title.
    pub title: String,
    /// Raw grade text, empty when no grade is recorded.
    pub grade: String,
    /// Competence texts passing the class-wide selection.
    pub competences: Vec<String>,
}

/// A subject block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectReport {
    /// Subject name.
    pub name: String,
    /// Level output.
    pub level: LevelOutput,
    /// Whether the competence breakdown was suppressed.
    pub breakdown_suppressed: bool,
    /// Topic rows; always empty when the breakdown is suppressed.
    pub topics: Vec<TopicReport>,
}

/// Filtered report content for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentReport {
    /// File base name.
    pub base_name: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Class name.
    pub class_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// School-year display name.
    pub school_year: String,
    /// Report term.
    pub term: Term,
    /// Date printed on the report.
    pub report_date: Option<NaiveDate>,
    /// Personal report narrative.
    pub personal_text: String,
    /// Free-text remarks.
    pub comment: String,
    /// Absence totals.
    pub absence: AbsenceSummary,
    /// Reduced competence mode.
    pub reduced_competence_mode: bool,
    /// Narrative-only mode.
    pub narrative_only_mode: bool,
    /// Reported subjects in enrollment order.
    pub subjects: Vec<SubjectReport>,
}
