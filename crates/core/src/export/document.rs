//! Report model to data-file value.

use chrono::NaiveDate;

use crate::eligibility::{LevelOutput, StudentReport, SubjectReport, TopicReport};
use crate::lua::{LuaValue, normalize_grade};

const DATE_FORMAT: &str = "%d.%m.%Y";

/// Builds the `student` table the report template reads.
#[must_use]
pub fn student_document(report: &StudentReport) -> LuaValue {
    LuaValue::table([
        ("first_name", text(&report.first_name)),
        ("last_name", text(&report.last_name)),
        ("classRoom", text(&report.class_name)),
        ("date_of_birth", date(Some(report.date_of_birth))),
        ("school_year", text(&report.school_year)),
        ("part_of_year", LuaValue::from(report.term.label())),
        ("report_date", date(report.report_date)),
        ("personal_text", text(&report.personal_text)),
        ("comment", text(&report.comment)),
        ("absenceDaysTotal", LuaValue::from(report.absence.days_total)),
        ("absenceDaysUnauthorized", LuaValue::from(report.absence.days_unexcused)),
        ("absenceHoursTotal", LuaValue::from(report.absence.lessons_total)),
        ("absenceHoursUnauthorized", LuaValue::from(report.absence.lessons_unexcused)),
        ("lb", LuaValue::from(report.reduced_competence_mode)),
        ("gb", LuaValue::from(report.narrative_only_mode)),
        ("subjects", LuaValue::array(report.subjects.iter().map(subject))),
    ])
}

fn subject(subject: &SubjectReport) -> LuaValue {
    LuaValue::table([
        ("name", text(&subject.name)),
        ("level", level(&subject.level)),
        ("topics", LuaValue::array(subject.topics.iter().map(topic))),
    ])
}

fn topic(topic: &TopicReport) -> LuaValue {
    LuaValue::table([
        ("title", text(&topic.title)),
        ("grade", normalize_grade(&normalize_line_breaks(&topic.grade))),
        (
            "competences",
            LuaValue::array(
                topic
                    .competences
                    .iter()
                    .map(|description| LuaValue::table([("description", text(description))])),
            ),
        ),
    ])
}

fn level(level: &LevelOutput) -> LuaValue {
    match level {
        LevelOutput::Empty => LuaValue::from(""),
        LevelOutput::Code(code) => normalize_grade(code),
        LevelOutput::Narrative(paragraphs) => LuaValue::table([
            ("kind", LuaValue::from("narrative")),
            (
                "paragraphs",
                LuaValue::array(paragraphs.iter().map(|p| text(p))),
            ),
        ]),
    }
}

fn date(value: Option<NaiveDate>) -> LuaValue {
    value.map_or_else(
        || LuaValue::from(""),
        |date| LuaValue::from(date.format(DATE_FORMAT).to_string()),
    )
}

fn text(value: &str) -> LuaValue {
    LuaValue::from(normalize_line_breaks(value))
}

/// Replaces `\r\n` and lone `\r` with `\n`.
fn normalize_line_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}
