//! Competence catalog import.

use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::{competences, subjects, topics};

/// Nested catalog: subject, grade band, topic, competence texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Subjects in catalog order.
    pub subjects: Vec<CatalogSubject>,
}

/// A subject of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSubject {
    /// Subject name.
    pub name: String,
    /// Topics grouped by grade band.
    pub blocks: Vec<CatalogBlock>,
}

/// Topics of one grade band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBlock {
    /// Grade band, e.g. `5/6`.
    pub block: String,
    /// Topics of the band.
    pub topics: Vec<CatalogTopic>,
}

/// A topic and its competence texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTopic {
    /// Topic name.
    pub name: String,
    /// Competence texts in catalog order.
    pub competences: Vec<String>,
}

impl Catalog {
    /// Parses a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Rows created by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// New subjects.
    pub subjects: usize,
    /// New topics.
    pub topics: usize,
    /// New competences.
    pub competences: usize,
}

impl ImportSummary {
    /// Whether the import changed nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.subjects == 0 && self.topics == 0 && self.competences == 0
    }
}

/// Catalog repository.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts every catalog row that does not exist yet.
    ///
    /// Existing subjects, topics and competences are matched by their unique
    /// keys and left untouched, so importing the same catalog twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails; nothing is kept then.
    pub async fn import(&self, catalog: &Catalog) -> Result<ImportSummary, DbErr> {
        let txn = self.db.begin().await?;
        let mut summary = ImportSummary::default();

        for subject in &catalog.subjects {
            let subject_id = find_or_create_subject(&txn, &subject.name, &mut summary).await?;
            for block in &subject.blocks {
                for topic in &block.topics {
                    let topic_id =
                        find_or_create_topic(&txn, subject_id, &topic.name, &block.block, &mut summary)
                            .await?;
                    add_competences(&txn, topic_id, &topic.competences, &mut summary).await?;
                }
            }
        }

        txn.commit().await?;
        info!(
            subjects = summary.subjects,
            topics = summary.topics,
            competences = summary.competences,
            "Imported competence catalog"
        );
        Ok(summary)
    }
}

async fn find_or_create_subject(
    txn: &DatabaseTransaction,
    name: &str,
    summary: &mut ImportSummary,
) -> Result<i32, DbErr> {
    if let Some(subject) = subjects::Entity::find()
        .filter(subjects::Column::Name.eq(name))
        .one(txn)
        .await?
    {
        return Ok(subject.id);
    }

    let subject = subjects::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(txn)
    .await?;
    summary.subjects += 1;
    Ok(subject.id)
}

async fn find_or_create_topic(
    txn: &DatabaseTransaction,
    subject_id: i32,
    name: &str,
    block: &str,
    summary: &mut ImportSummary,
) -> Result<i32, DbErr> {
    if let Some(topic) = topics::Entity::find()
        .filter(topics::Column::SubjectId.eq(subject_id))
        .filter(topics::Column::Name.eq(name))
        .filter(topics::Column::Block.eq(block))
        .one(txn)
        .await?
    {
        return Ok(topic.id);
    }

    let topic = topics::ActiveModel {
        subject_id: Set(subject_id),
        name: Set(name.to_string()),
        block: Set(block.to_string()),
        ..Default::default()
    }
    .insert(txn)
    .await?;
    summary.topics += 1;
    Ok(topic.id)
}

async fn add_competences(
    txn: &DatabaseTransaction,
    topic_id: i32,
    texts: &[String],
    summary: &mut ImportSummary,
) -> Result<(), DbErr> {
    let mut existing: HashSet<String> = competences::Entity::find()
        .filter(competences::Column::TopicId.eq(topic_id))
        .all(txn)
        .await?
        .into_iter()
        .map(|competence| competence.text)
        .collect();

    for text in texts {
        if !existing.insert(text.clone()) {
            continue;
        }
        competences::ActiveModel {
            topic_id: Set(topic_id),
            text: Set(text.clone()),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        summary.competences += 1;
    }
    Ok(())
}
