//! `SeaORM` Entity for students table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub class_id: i32,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: Date,
    pub days_absent_excused: i32,
    pub days_absent_unexcused: i32,
    pub lessons_absent_excused: i32,
    pub lessons_absent_unexcused: i32,
    pub report_text: String,
    pub remarks: String,
    /// Reduced competence mode (`lb` in the report data).
    pub reduced_competence_mode: bool,
    /// Narrative-only mode (`gb` in the report data).
    pub narrative_only_mode: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::school_classes::Entity",
        from = "Column::ClassId",
        to = "super::school_classes::Column::Id"
    )]
    SchoolClasses,
    #[sea_orm(has_many = "super::student_subjects::Entity")]
    StudentSubjects,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::school_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolClasses.def()
    }
}

impl Related<super::student_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentSubjects.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
