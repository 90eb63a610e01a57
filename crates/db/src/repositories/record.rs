//! Record repository: the database-backed [`RecordStore`].

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::debug;
use zeugnis_core::record::{
    Competence, ExportSnapshot, RecordStore, RecordStoreError, SchoolClass, SchoolYear, Student,
    StudentRecord, SubjectLink, Topic,
};
use zeugnis_shared::types::{
    ClassId, CompetenceId, SchoolYearId, StudentId, SubjectId, TopicId,
};

use crate::entities::{
    class_competences, competences, grades, school_classes, school_years, student_subjects,
    students, subjects, topics,
};

/// Reads export snapshots from the database.
#[derive(Debug, Clone)]
pub struct RecordRepository {
    db: DatabaseConnection,
}

impl RecordRepository {
    /// Creates a new record repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for RecordRepository {
    async fn load_snapshot(
        &self,
        class_name: &str,
        student_ids: &[StudentId],
    ) -> Result<ExportSnapshot, RecordStoreError> {
        let txn = self.db.begin().await.map_err(RecordStoreError::backend)?;
        let snapshot = read_snapshot(&txn, class_name, student_ids).await?;
        txn.commit().await.map_err(RecordStoreError::backend)?;

        debug!(
            class = %snapshot.class.name,
            students = snapshot.students.len(),
            selected = snapshot.selected_competences.len(),
            "Loaded record snapshot"
        );
        Ok(snapshot)
    }
}

async fn read_snapshot(
    txn: &DatabaseTransaction,
    class_name: &str,
    student_ids: &[StudentId],
) -> Result<ExportSnapshot, RecordStoreError> {
    let year = school_years::Entity::find()
        .order_by_desc(school_years::Column::Id)
        .one(txn)
        .await
        .map_err(RecordStoreError::backend)?
        .ok_or(RecordStoreError::SchoolYearMissing)?;

    let class = school_classes::Entity::find()
        .filter(school_classes::Column::Name.eq(class_name))
        .one(txn)
        .await
        .map_err(RecordStoreError::backend)?
        .ok_or_else(|| RecordStoreError::ClassNotFound(class_name.to_string()))?;

    let rows = read_students(txn, &class, student_ids).await?;
    let student_keys: Vec<i32> = rows.iter().map(|row| row.id).collect();

    let links = student_subjects::Entity::find()
        .filter(student_subjects::Column::StudentId.is_in(student_keys.clone()))
        .order_by_asc(student_subjects::Column::Id)
        .all(txn)
        .await
        .map_err(RecordStoreError::backend)?;
    let subject_keys: BTreeSet<i32> = links.iter().map(|link| link.subject_id).collect();

    let subject_names: HashMap<i32, String> = subjects::Entity::find()
        .filter(subjects::Column::Id.is_in(subject_keys.iter().copied()))
        .all(txn)
        .await
        .map_err(RecordStoreError::backend)?
        .into_iter()
        .map(|subject| (subject.id, subject.name))
        .collect();

    let topic_rows = topics::Entity::find()
        .filter(topics::Column::SubjectId.is_in(subject_keys.iter().copied()))
        .order_by_asc(topics::Column::Id)
        .all(txn)
        .await
        .map_err(RecordStoreError::backend)?;

    let competence_rows = competences::Entity::find()
        .filter(competences::Column::TopicId.is_in(topic_rows.iter().map(|topic| topic.id)))
        .order_by_asc(competences::Column::Id)
        .all(txn)
        .await
        .map_err(RecordStoreError::backend)?;

    let grade_rows = grades::Entity::find()
        .filter(grades::Column::StudentId.is_in(student_keys))
        .all(txn)
        .await
        .map_err(RecordStoreError::backend)?;

    let selected_competences = class_competences::Entity::find()
        .filter(class_competences::Column::ClassId.eq(class.id))
        .filter(class_competences::Column::Selected.eq(true))
        .all(txn)
        .await
        .map_err(RecordStoreError::backend)?
        .into_iter()
        .map(|row| CompetenceId::new(row.competence_id))
        .collect();

    let mut competences_by_topic: HashMap<i32, Vec<Competence>> = HashMap::new();
    for row in competence_rows {
        competences_by_topic
            .entry(row.topic_id)
            .or_default()
            .push(Competence {
                id: CompetenceId::new(row.id),
                text: row.text,
            });
    }

    let mut topics_by_subject: HashMap<i32, Vec<Topic>> = HashMap::new();
    for row in topic_rows {
        let competences = competences_by_topic.remove(&row.id).unwrap_or_default();
        topics_by_subject
            .entry(row.subject_id)
            .or_default()
            .push(Topic {
                id: TopicId::new(row.id),
                name: row.name,
                block: row.block,
                competences,
            });
    }

    let mut links_by_student: HashMap<i32, Vec<SubjectLink>> = HashMap::new();
    for link in links {
        links_by_student
            .entry(link.student_id)
            .or_default()
            .push(SubjectLink {
                subject_id: SubjectId::new(link.subject_id),
                name: subject_names
                    .get(&link.subject_id)
                    .cloned()
                    .unwrap_or_default(),
                level: link.level,
                topics: topics_by_subject
                    .get(&link.subject_id)
                    .cloned()
                    .unwrap_or_default(),
            });
    }

    let mut grades_by_student: HashMap<i32, HashMap<TopicId, String>> = HashMap::new();
    for grade in grade_rows {
        grades_by_student
            .entry(grade.student_id)
            .or_default()
            .insert(TopicId::new(grade.topic_id), grade.value);
    }

    let students = rows
        .into_iter()
        .map(|row| StudentRecord {
            subjects: links_by_student.remove(&row.id).unwrap_or_default(),
            grades: grades_by_student.remove(&row.id).unwrap_or_default(),
            student: student(row),
        })
        .collect();

    Ok(ExportSnapshot {
        school_year: SchoolYear {
            id: SchoolYearId::new(year.id),
            name: year.name,
            end_of_year: year.end_of_year,
            report_date: year.report_date,
        },
        class: SchoolClass {
            id: ClassId::new(class.id),
            name: class.name,
        },
        selected_competences,
        students,
    })
}

/// Students of the class: all of them ordered by name, or the requested ones
/// in request order.
async fn read_students(
    txn: &DatabaseTransaction,
    class: &school_classes::Model,
    student_ids: &[StudentId],
) -> Result<Vec<students::Model>, RecordStoreError> {
    let mut query = students::Entity::find().filter(students::Column::ClassId.eq(class.id));
    if !student_ids.is_empty() {
        query = query.filter(
            students::Column::Id.is_in(student_ids.iter().map(|id| id.into_inner())),
        );
    }
    let mut rows = query
        .order_by_asc(students::Column::LastName)
        .order_by_asc(students::Column::FirstName)
        .order_by_asc(students::Column::Id)
        .all(txn)
        .await
        .map_err(RecordStoreError::backend)?;

    if !student_ids.is_empty() {
        let found: HashSet<i32> = rows.iter().map(|row| row.id).collect();
        let outside: Vec<StudentId> = student_ids
            .iter()
            .copied()
            .filter(|id| !found.contains(&id.into_inner()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !outside.is_empty() {
            return Err(RecordStoreError::StudentsOutsideClass {
                class: class.name.clone(),
                ids: outside,
            });
        }
        rows.sort_by_key(|row| {
            student_ids
                .iter()
                .position(|id| id.into_inner() == row.id)
        });
    }

    if rows.is_empty() {
        return Err(RecordStoreError::NoStudents(class.name.clone()));
    }
    Ok(rows)
}

fn student(row: students::Model) -> Student {
    Student {
        id: StudentId::new(row.id),
        last_name: row.last_name,
        first_name: row.first_name,
        birth_date: row.birth_date,
        days_absent_excused: count(row.days_absent_excused),
        days_absent_unexcused: count(row.days_absent_unexcused),
        lessons_absent_excused: count(row.lessons_absent_excused),
        lessons_absent_unexcused: count(row.lessons_absent_unexcused),
        report_text: row.report_text,
        remarks: row.remarks,
        reduced_competence_mode: row.reduced_competence_mode,
        narrative_only_mode: row.narrative_only_mode,
    }
}

/// Absence counters are non-negative in the schema.
fn count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
