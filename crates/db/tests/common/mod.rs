//! Shared setup for the database integration tests.
//!
//! Every test gets its own in-memory SQLite database migrated with the real
//! migrator. A single pooled connection keeps the in-memory database alive.

#![allow(dead_code)]

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use zeugnis_db::entities::{
    competences, grades, school_classes, school_years, student_subjects, students, subjects,
    topics,
};
use zeugnis_db::migration::{Migrator, MigratorTrait};
use zeugnis_db::{Catalog, CatalogRepository};

pub const CATALOG_JSON: &str = r#"{
  "subjects": [
    {
      "name": "Deutsch",
      "blocks": [
        {
          "block": "5/6",
          "topics": [
            {
              "name": "Lesen",
              "competences": [
                "liest altersgemäße Texte sinnerfassend",
                "trägt Texte betont vor"
              ]
            }
          ]
        },
        {
          "block": "7/8",
          "topics": [
            { "name": "Erörtern", "competences": ["argumentiert schlüssig"] }
          ]
        }
      ]
    },
    {
      "name": "Wahlpflichtbereich Technik",
      "blocks": [
        {
          "block": "7/8",
          "topics": [{ "name": "Werkstoffe", "competences": ["bearbeitet Holz"] }]
        }
      ]
    }
  ]
}"#;

/// Connects to a fresh, migrated in-memory database.
pub async fn setup() -> DatabaseConnection {
    let db = zeugnis_db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Imports the test catalog.
pub async fn import_catalog(db: &DatabaseConnection) {
    let catalog = Catalog::from_json(CATALOG_JSON).expect("Invalid catalog");
    CatalogRepository::new(db.clone())
        .import(&catalog)
        .await
        .expect("Failed to import catalog");
}

/// Creates a school year.
pub async fn create_school_year(
    db: &DatabaseConnection,
    name: &str,
    report_date: Option<NaiveDate>,
) -> school_years::Model {
    school_years::ActiveModel {
        name: Set(name.to_string()),
        end_of_year: Set(false),
        report_date: Set(report_date),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create school year")
}

/// Creates a class.
pub async fn create_class(db: &DatabaseConnection, name: &str) -> school_classes::Model {
    school_classes::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create class")
}

/// Creates a student with a few absences.
pub async fn create_student(
    db: &DatabaseConnection,
    class_id: i32,
    last_name: &str,
    first_name: &str,
) -> students::Model {
    students::ActiveModel {
        class_id: Set(class_id),
        last_name: Set(last_name.to_string()),
        first_name: Set(first_name.to_string()),
        birth_date: Set(NaiveDate::from_ymd_opt(2013, 4, 2).expect("valid date")),
        days_absent_excused: Set(3),
        days_absent_unexcused: Set(1),
        lessons_absent_excused: Set(5),
        lessons_absent_unexcused: Set(2),
        report_text: Set(String::new()),
        remarks: Set(String::new()),
        reduced_competence_mode: Set(false),
        narrative_only_mode: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create student")
}

/// Enrolls a student in a subject.
pub async fn enroll(db: &DatabaseConnection, student_id: i32, subject_id: i32, level: Option<&str>) {
    student_subjects::ActiveModel {
        student_id: Set(student_id),
        subject_id: Set(subject_id),
        level: Set(level.map(str::to_string)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to enroll student");
}

/// Records a grade.
pub async fn grade(db: &DatabaseConnection, student_id: i32, topic_id: i32, value: &str) {
    grades::ActiveModel {
        student_id: Set(student_id),
        topic_id: Set(topic_id),
        value: Set(value.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to record grade");
}

/// Looks up a subject id by name.
pub async fn subject_id(db: &DatabaseConnection, name: &str) -> i32 {
    subjects::Entity::find()
        .filter(subjects::Column::Name.eq(name))
        .one(db)
        .await
        .expect("Query failed")
        .expect("Subject should exist")
        .id
}

/// Looks up a topic id by name.
pub async fn topic_id(db: &DatabaseConnection, name: &str) -> i32 {
    topics::Entity::find()
        .filter(topics::Column::Name.eq(name))
        .one(db)
        .await
        .expect("Query failed")
        .expect("Topic should exist")
        .id
}

/// Looks up a competence id by text.
pub async fn competence_id(db: &DatabaseConnection, text: &str) -> i32 {
    competences::Entity::find()
        .filter(competences::Column::Text.eq(text))
        .one(db)
        .await
        .expect("Query failed")
        .expect("Competence should exist")
        .id
}
