//! `SeaORM` Entity for class_competences table.
//!
//! Absent rows mean "not selected".

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "class_competences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub competence_id: i32,
    pub selected: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::school_classes::Entity",
        from = "Column::ClassId",
        to = "super::school_classes::Column::Id"
    )]
    SchoolClasses,
    #[sea_orm(
        belongs_to = "super::competences::Entity",
        from = "Column::CompetenceId",
        to = "super::competences::Column::Id"
    )]
    Competences,
}

impl Related<super::school_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolClasses.def()
    }
}

impl Related<super::competences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Competences.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
