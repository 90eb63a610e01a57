//! Record builders shared by the unit tests.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use zeugnis_shared::types::{
    ClassId, CompetenceId, SchoolYearId, StudentId, SubjectId, TopicId,
};

use crate::record::{
    Competence, ExportSnapshot, SchoolClass, SchoolYear, Student, StudentRecord, SubjectLink, Topic,
};

pub fn school_year() -> SchoolYear {
    SchoolYear {
        id: SchoolYearId::new(1),
        name: "2024/2025".to_string(),
        end_of_year: false,
        report_date: NaiveDate::from_ymd_opt(2025, 1, 31),
    }
}

pub fn class(name: &str) -> SchoolClass {
    SchoolClass {
        id: ClassId::new(1),
        name: name.to_string(),
    }
}

pub fn student(id: i32, last_name: &str, first_name: &str) -> Student {
    Student {
        id: StudentId::new(id),
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(2013, 4, 2).unwrap(),
        days_absent_excused: 3,
        days_absent_unexcused: 1,
        lessons_absent_excused: 5,
        lessons_absent_unexcused: 2,
        report_text: String::new(),
        remarks: String::new(),
        reduced_competence_mode: false,
        narrative_only_mode: false,
    }
}

pub fn competence(id: i32, text: &str) -> Competence {
    Competence {
        id: CompetenceId::new(id),
        text: text.to_string(),
    }
}

pub fn topic(id: i32, name: &str, block: &str, competences: Vec<Competence>) -> Topic {
    Topic {
        id: TopicId::new(id),
        name: name.to_string(),
        block: block.to_string(),
        competences,
    }
}

pub fn subject(id: i32, name: &str, level: Option<&str>, topics: Vec<Topic>) -> SubjectLink {
    SubjectLink {
        subject_id: SubjectId::new(id),
        name: name.to_string(),
        level: level.map(str::to_string),
        topics,
    }
}

pub fn record(student: Student, subjects: Vec<SubjectLink>, grades: &[(i32, &str)]) -> StudentRecord {
    StudentRecord {
        student,
        subjects,
        grades: grades
            .iter()
            .map(|(topic, value)| (TopicId::new(*topic), (*value).to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

pub fn selection(ids: &[i32]) -> BTreeSet<CompetenceId> {
    ids.iter().copied().map(CompetenceId::new).collect()
}

/// The "Müller, Jan" scenario: class 5a, Deutsch / Lesen, grade "1,0",
/// two competences of which one is selected.
pub fn mueller_snapshot() -> ExportSnapshot {
    let deutsch = subject(
        1,
        "Deutsch",
        None,
        vec![topic(
            10,
            "Lesen",
            "5/6",
            vec![
                competence(100, "liest altersgemäße Texte sinnerfassend"),
                competence(101, "trägt Texte betont vor"),
            ],
        )],
    );

    ExportSnapshot {
        school_year: school_year(),
        class: class("5a"),
        selected_competences: selection(&[100]),
        students: vec![record(
            student(1, "Müller", "Jan"),
            vec![deutsch],
            &[(10, "1,0")],
        )],
    }
}
