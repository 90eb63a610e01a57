//! Eligibility resolution service.

use std::collections::BTreeSet;

use tracing::debug;
use zeugnis_shared::types::CompetenceId;

use super::types::{
    AbsenceSummary, EligibilityRules, GradeBand, Level, LevelOutput, StudentReport, SubjectReport,
    TopicReport,
};
use crate::layout::base_name;
use crate::record::{ExportSnapshot, SchoolClass, SchoolYear, StudentRecord, SubjectLink, Topic};

/// Class-wide inputs shared by every student of a batch.
#[derive(Debug, Clone, Copy)]
pub struct ClassContext<'a> {
    /// The active school year.
    pub school_year: &'a SchoolYear,
    /// The exported class.
    pub class: &'a SchoolClass,
    /// Selected competences. Empty means no restriction.
    pub selected: &'a BTreeSet<CompetenceId>,
    /// Grade band of the class, if its name carries a grade.
    pub band: Option<GradeBand>,
}

impl<'a> ClassContext<'a> {
    /// Builds the context for a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &'a ExportSnapshot) -> Self {
        Self {
            school_year: &snapshot.school_year,
            class: &snapshot.class,
            selected: &snapshot.selected_competences,
            band: GradeBand::from_class_name(&snapshot.class.name),
        }
    }

    fn is_selected(&self, competence: CompetenceId) -> bool {
        self.selected.is_empty() || self.selected.contains(&competence)
    }

    fn in_band(&self, topic: &Topic) -> bool {
        self.band.is_none_or(|band| band.contains_block(&topic.block))
    }
}

/// Applies the eligibility rules to student records.
#[derive(Debug, Clone, Default)]
pub struct EligibilityResolver {
    rules: EligibilityRules,
}

impl EligibilityResolver {
    /// Creates a resolver with the given rules.
    #[must_use]
    pub const fn new(rules: EligibilityRules) -> Self {
        Self { rules }
    }

    /// Returns the rules in use.
    #[must_use]
    pub const fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    /// Builds the filtered report for one student.
    #[must_use]
    pub fn resolve(&self, context: &ClassContext<'_>, record: &StudentRecord) -> StudentReport {
        let student = &record.student;
        let base = base_name(&student.last_name, &student.first_name);
        let upper_band = context
            .band
            .is_some_and(|band| band.is_upper(self.rules.upper_band_from));

        let mut subjects = Vec::with_capacity(record.subjects.len());
        let mut elective_retained = false;

        for link in &record.subjects {
            let elective = self.is_elective(link);
            if elective && elective_retained {
                debug!(student = %base, subject = %link.name, "Dropping additional elective");
                continue;
            }

            let level = Level::classify(link.level.as_deref(), self.rules.level_threshold);
            let topics: Vec<&Topic> = link.topics.iter().filter(|t| context.in_band(t)).collect();

            if elective && upper_band && !level.is_present() && !has_any_grade(record, &topics) {
                debug!(student = %base, subject = %link.name, "Omitting empty elective");
                continue;
            }

            let breakdown_suppressed = student.narrative_only_mode || level.is_long_form();
            let topic_reports = if breakdown_suppressed {
                Vec::new()
            } else {
                topics
                    .iter()
                    .filter_map(|topic| Self::topic_report(context, record, topic))
                    .collect()
            };

            subjects.push(SubjectReport {
                name: link.name.clone(),
                level: LevelOutput::from(&level),
                breakdown_suppressed,
                topics: topic_reports,
            });

            if elective {
                elective_retained = true;
            }
        }

        StudentReport {
            base_name: base,
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            class_name: context.class.name.clone(),
            date_of_birth: student.birth_date,
            school_year: context.school_year.name.clone(),
            term: context.school_year.term(),
            report_date: context.school_year.report_date,
            personal_text: student.report_text.clone(),
            comment: student.remarks.clone(),
            absence: AbsenceSummary {
                days_total: student
                    .days_absent_excused
                    .saturating_add(student.days_absent_unexcused),
                days_unexcused: student.days_absent_unexcused,
                lessons_total: student
                    .lessons_absent_excused
                    .saturating_add(student.lessons_absent_unexcused),
                lessons_unexcused: student.lessons_absent_unexcused,
            },
            reduced_competence_mode: student.reduced_competence_mode,
            narrative_only_mode: student.narrative_only_mode,
            subjects,
        }
    }

    fn is_elective(&self, link: &SubjectLink) -> bool {
        !self.rules.elective_prefix.is_empty() && link.name.starts_with(&self.rules.elective_prefix)
    }

    fn topic_report(
        context: &ClassContext<'_>,
        record: &StudentRecord,
        topic: &Topic,
    ) -> Option<TopicReport> {
        let competences: Vec<String> = topic
            .competences
            .iter()
            .filter(|c| context.is_selected(c.id))
            .map(|c| c.text.clone())
            .collect();

        if competences.is_empty() {
            return None;
        }

        Some(TopicReport {
            title: topic.name.clone(),
            grade: record.grade(topic.id).unwrap_or_default().to_string(),
            competences,
        })
    }
}

fn has_any_grade(record: &StudentRecord, topics: &[&Topic]) -> bool {
    topics.iter().any(|topic| record.grade(topic.id).is_some())
}
