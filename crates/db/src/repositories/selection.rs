//! Class-wide competence selection.
//!
//! Selection changes are explicit commands applied in one transaction. A
//! command for an unknown class creates the class.

use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::info;
use zeugnis_shared::types::{CompetenceId, TopicId};

use crate::entities::{class_competences, competences, school_classes, topics};

/// Error types for selection operations.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// The competence does not exist.
    #[error("Competence not found: {0}")]
    CompetenceNotFound(CompetenceId),

    /// The topic does not exist.
    #[error("Topic not found: {0}")]
    TopicNotFound(TopicId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Selects or deselects one competence for a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCompetenceSelection {
    /// Class name.
    pub class_name: String,
    /// Competence to change.
    pub competence_id: CompetenceId,
    /// New state.
    pub selected: bool,
}

/// Selects or deselects every competence of a topic for a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTopicSelection {
    /// Class name.
    pub class_name: String,
    /// Topic whose competences change.
    pub topic_id: TopicId,
    /// New state.
    pub selected: bool,
}

/// A selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCommand {
    /// Single competence.
    Competence(SetCompetenceSelection),
    /// All competences of a topic.
    Topic(SetTopicSelection),
}

impl From<SetCompetenceSelection> for SelectionCommand {
    fn from(command: SetCompetenceSelection) -> Self {
        Self::Competence(command)
    }
}

impl From<SetTopicSelection> for SelectionCommand {
    fn from(command: SetTopicSelection) -> Self {
        Self::Topic(command)
    }
}

/// Selection repository.
#[derive(Debug, Clone)]
pub struct SelectionRepository {
    db: DatabaseConnection,
}

impl SelectionRepository {
    /// Creates a new selection repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies `commands` in order, all or nothing.
    ///
    /// Returns the number of selection rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced competence or topic does not exist or
    /// the database fails. No change is kept in that case.
    pub async fn apply(&self, commands: &[SelectionCommand]) -> Result<usize, SelectionError> {
        let txn = self.db.begin().await?;

        let mut written = 0;
        for command in commands {
            written += match command {
                SelectionCommand::Competence(command) => set_competence(&txn, command).await?,
                SelectionCommand::Topic(command) => set_topic(&txn, command).await?,
            };
        }

        txn.commit().await?;
        info!(commands = commands.len(), written, "Applied selection changes");
        Ok(written)
    }

    /// Returns the selected competences of a class. Unknown classes have none.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn selected(&self, class_name: &str) -> Result<BTreeSet<CompetenceId>, DbErr> {
        let Some(class) = school_classes::Entity::find()
            .filter(school_classes::Column::Name.eq(class_name))
            .one(&self.db)
            .await?
        else {
            return Ok(BTreeSet::new());
        };

        let rows = class_competences::Entity::find()
            .filter(class_competences::Column::ClassId.eq(class.id))
            .filter(class_competences::Column::Selected.eq(true))
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| CompetenceId::new(row.competence_id))
            .collect())
    }
}

async fn set_competence(
    txn: &DatabaseTransaction,
    command: &SetCompetenceSelection,
) -> Result<usize, SelectionError> {
    let competence_id = command.competence_id.into_inner();
    if competences::Entity::find_by_id(competence_id)
        .one(txn)
        .await?
        .is_none()
    {
        return Err(SelectionError::CompetenceNotFound(command.competence_id));
    }

    let class = find_or_create_class(txn, &command.class_name).await?;
    upsert(txn, class.id, competence_id, command.selected).await?;
    Ok(1)
}

async fn set_topic(
    txn: &DatabaseTransaction,
    command: &SetTopicSelection,
) -> Result<usize, SelectionError> {
    let topic_id = command.topic_id.into_inner();
    if topics::Entity::find_by_id(topic_id).one(txn).await?.is_none() {
        return Err(SelectionError::TopicNotFound(command.topic_id));
    }

    let class = find_or_create_class(txn, &command.class_name).await?;
    let members = competences::Entity::find()
        .filter(competences::Column::TopicId.eq(topic_id))
        .all(txn)
        .await?;
    for competence in &members {
        upsert(txn, class.id, competence.id, command.selected).await?;
    }
    Ok(members.len())
}

async fn find_or_create_class(
    txn: &DatabaseTransaction,
    name: &str,
) -> Result<school_classes::Model, DbErr> {
    if let Some(class) = school_classes::Entity::find()
        .filter(school_classes::Column::Name.eq(name))
        .one(txn)
        .await?
    {
        return Ok(class);
    }

    info!(class = %name, "Creating class");
    school_classes::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(txn)
    .await
}

async fn upsert(
    txn: &DatabaseTransaction,
    class_id: i32,
    competence_id: i32,
    selected: bool,
) -> Result<(), DbErr> {
    match class_competences::Entity::find_by_id((class_id, competence_id))
        .one(txn)
        .await?
    {
        Some(row) => {
            let mut active: class_competences::ActiveModel = row.into();
            active.selected = Set(selected);
            active.update(txn).await?;
        }
        None => {
            class_competences::ActiveModel {
                class_id: Set(class_id),
                competence_id: Set(competence_id),
                selected: Set(selected),
            }
            .insert(txn)
            .await?;
        }
    }
    Ok(())
}
