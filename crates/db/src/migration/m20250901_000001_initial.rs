//! Initial database migration.
//!
//! Creates the competence catalog, classes, students and their report data.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: SCHOOL YEAR
        // ============================================================
        db.execute_unprepared(SCHOOL_YEARS_SQL).await?;

        // ============================================================
        // PART 2: COMPETENCE CATALOG
        // ============================================================
        db.execute_unprepared(SUBJECTS_SQL).await?;
        db.execute_unprepared(TOPICS_SQL).await?;
        db.execute_unprepared(COMPETENCES_SQL).await?;

        // ============================================================
        // PART 3: CLASSES & SELECTION
        // ============================================================
        db.execute_unprepared(SCHOOL_CLASSES_SQL).await?;
        db.execute_unprepared(CLASS_COMPETENCES_SQL).await?;

        // ============================================================
        // PART 4: STUDENTS & REPORT DATA
        // ============================================================
        db.execute_unprepared(STUDENTS_SQL).await?;
        db.execute_unprepared(STUDENT_SUBJECTS_SQL).await?;
        db.execute_unprepared(GRADES_SQL).await?;

        // ============================================================
        // PART 5: INDEXES
        // ============================================================
        for index in INDEXES_SQL {
            db.execute_unprepared(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in [
            "grades",
            "student_subjects",
            "students",
            "class_competences",
            "school_classes",
            "competences",
            "topics",
            "subjects",
            "school_years",
        ] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {table}"))
                .await?;
        }
        Ok(())
    }
}

const SCHOOL_YEARS_SQL: &str = r"
CREATE TABLE school_years (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    end_of_year BOOLEAN NOT NULL DEFAULT FALSE,
    report_date DATE
)";

const SUBJECTS_SQL: &str = r"
CREATE TABLE subjects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)";

const TOPICS_SQL: &str = r"
CREATE TABLE topics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    block TEXT NOT NULL,
    UNIQUE (subject_id, name, block)
)";

const COMPETENCES_SQL: &str = r"
CREATE TABLE competences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_id INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    text TEXT NOT NULL,
    UNIQUE (topic_id, text)
)";

const SCHOOL_CLASSES_SQL: &str = r"
CREATE TABLE school_classes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)";

const CLASS_COMPETENCES_SQL: &str = r"
CREATE TABLE class_competences (
    class_id INTEGER NOT NULL REFERENCES school_classes(id) ON DELETE CASCADE,
    competence_id INTEGER NOT NULL REFERENCES competences(id) ON DELETE CASCADE,
    selected BOOLEAN NOT NULL DEFAULT FALSE,
    PRIMARY KEY (class_id, competence_id)
)";

const STUDENTS_SQL: &str = r"
CREATE TABLE students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    class_id INTEGER NOT NULL REFERENCES school_classes(id),
    last_name TEXT NOT NULL,
    first_name TEXT NOT NULL,
    birth_date DATE NOT NULL,
    days_absent_excused INTEGER NOT NULL DEFAULT 0 CHECK (days_absent_excused >= 0),
    days_absent_unexcused INTEGER NOT NULL DEFAULT 0 CHECK (days_absent_unexcused >= 0),
    lessons_absent_excused INTEGER NOT NULL DEFAULT 0 CHECK (lessons_absent_excused >= 0),
    lessons_absent_unexcused INTEGER NOT NULL DEFAULT 0 CHECK (lessons_absent_unexcused >= 0),
    report_text TEXT NOT NULL DEFAULT '',
    remarks TEXT NOT NULL DEFAULT '',
    reduced_competence_mode BOOLEAN NOT NULL DEFAULT FALSE,
    narrative_only_mode BOOLEAN NOT NULL DEFAULT FALSE
)";

const STUDENT_SUBJECTS_SQL: &str = r"
CREATE TABLE student_subjects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    subject_id INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
    level TEXT,
    UNIQUE (student_id, subject_id)
)";

const GRADES_SQL: &str = r"
CREATE TABLE grades (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    topic_id INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    value TEXT NOT NULL,
    UNIQUE (student_id, topic_id)
)";

const INDEXES_SQL: [&str; 4] = [
    "CREATE INDEX idx_students_class ON students (class_id, last_name, first_name)",
    "CREATE INDEX idx_topics_subject ON topics (subject_id)",
    "CREATE INDEX idx_competences_topic ON competences (topic_id)",
    "CREATE INDEX idx_grades_student ON grades (student_id)",
];
