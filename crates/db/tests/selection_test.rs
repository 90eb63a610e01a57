//! Integration tests for class-wide competence selection commands.

mod common;

use std::collections::BTreeSet;

use sea_orm::{EntityTrait, PaginatorTrait};
use zeugnis_db::entities::{class_competences, school_classes};
use zeugnis_db::repositories::SelectionError;
use zeugnis_db::{SelectionCommand, SelectionRepository, SetCompetenceSelection, SetTopicSelection};
use zeugnis_shared::types::{CompetenceId, TopicId};

use common::{competence_id, import_catalog, setup, topic_id};

fn competence(class_name: &str, id: i32, selected: bool) -> SelectionCommand {
    SelectionCommand::from(SetCompetenceSelection {
        class_name: class_name.to_string(),
        competence_id: CompetenceId::new(id),
        selected,
    })
}

fn topic(class_name: &str, id: i32, selected: bool) -> SelectionCommand {
    SelectionCommand::from(SetTopicSelection {
        class_name: class_name.to_string(),
        topic_id: TopicId::new(id),
        selected,
    })
}

#[tokio::test]
async fn test_select_competence_creates_class() {
    let db = setup().await;
    import_catalog(&db).await;
    let repo = SelectionRepository::new(db.clone());
    let reading = competence_id(&db, "trägt Texte betont vor").await;

    let written = repo
        .apply(&[competence("5a", reading, true)])
        .await
        .expect("Failed to apply selection");

    assert_eq!(written, 1);
    assert_eq!(
        school_classes::Entity::find().count(&db).await.expect("Query failed"),
        1
    );
    assert_eq!(
        repo.selected("5a").await.expect("Query failed"),
        BTreeSet::from([CompetenceId::new(reading)])
    );
}

#[tokio::test]
async fn test_deselect_updates_existing_row() {
    let db = setup().await;
    import_catalog(&db).await;
    let repo = SelectionRepository::new(db.clone());
    let reading = competence_id(&db, "trägt Texte betont vor").await;

    repo.apply(&[competence("5a", reading, true)])
        .await
        .expect("Failed to select");
    repo.apply(&[competence("5a", reading, false)])
        .await
        .expect("Failed to deselect");

    assert!(repo.selected("5a").await.expect("Query failed").is_empty());
    // the row is kept as an explicit "not selected"
    assert_eq!(
        class_competences::Entity::find()
            .count(&db)
            .await
            .expect("Query failed"),
        1
    );
}

#[tokio::test]
async fn test_topic_toggle_covers_all_competences() {
    let db = setup().await;
    import_catalog(&db).await;
    let repo = SelectionRepository::new(db.clone());
    let lesen = topic_id(&db, "Lesen").await;

    let written = repo
        .apply(&[topic("5a", lesen, true)])
        .await
        .expect("Failed to toggle topic");
    assert_eq!(written, 2);
    assert_eq!(repo.selected("5a").await.expect("Query failed").len(), 2);

    // a later single deselection wins over the topic toggle
    let reading = competence_id(&db, "trägt Texte betont vor").await;
    repo.apply(&[topic("5a", lesen, true), competence("5a", reading, false)])
        .await
        .expect("Failed to apply selection");
    let selected = repo.selected("5a").await.expect("Query failed");
    assert_eq!(selected.len(), 1);
    assert!(!selected.contains(&CompetenceId::new(reading)));
}

#[tokio::test]
async fn test_selection_is_per_class() {
    let db = setup().await;
    import_catalog(&db).await;
    let repo = SelectionRepository::new(db.clone());
    let lesen = topic_id(&db, "Lesen").await;

    repo.apply(&[topic("5a", lesen, true)])
        .await
        .expect("Failed to toggle topic");

    assert!(repo.selected("5b").await.expect("Query failed").is_empty());
}

#[tokio::test]
async fn test_unknown_competence_rolls_back_batch() {
    let db = setup().await;
    import_catalog(&db).await;
    let repo = SelectionRepository::new(db.clone());
    let lesen = topic_id(&db, "Lesen").await;

    let result = repo
        .apply(&[topic("5a", lesen, true), competence("5a", 9999, true)])
        .await;

    assert!(matches!(
        result,
        Err(SelectionError::CompetenceNotFound(id)) if id == CompetenceId::new(9999)
    ));
    assert!(repo.selected("5a").await.expect("Query failed").is_empty());
    assert_eq!(
        school_classes::Entity::find().count(&db).await.expect("Query failed"),
        0
    );
}

#[tokio::test]
async fn test_unknown_topic() {
    let db = setup().await;
    let repo = SelectionRepository::new(db.clone());

    let result = repo.apply(&[topic("5a", 42, true)]).await;
    assert!(matches!(result, Err(SelectionError::TopicNotFound(_))));
}
