//! Database seeder for Zeugnis development and testing.
//!
//! Seeds the demo competence catalog, a school year, the classes 5a and 7b
//! with a few students, their subjects, grades and a class-wide competence
//! selection. Rows that already exist are skipped.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zeugnis_db::entities::{
    competences, grades, school_classes, school_years, student_subjects, students, subjects,
    topics,
};
use zeugnis_db::{
    Catalog, CatalogRepository, SelectionCommand, SelectionRepository, SetCompetenceSelection,
    SetTopicSelection,
};
use zeugnis_shared::AppConfig;
use zeugnis_shared::types::{CompetenceId, TopicId};

const DEMO_CATALOG: &str = include_str!("demo_catalog.json");

const SCHOOL_YEAR: &str = "2024/2025";

/// A demo student: class, last name, first name, birth date, report modes.
struct DemoStudent {
    class: &'static str,
    last_name: &'static str,
    first_name: &'static str,
    birth_date: (i32, u32, u32),
    narrative_only: bool,
    /// Subject name and optional level text.
    subjects: &'static [(&'static str, Option<&'static str>)],
    /// Topic name and grade.
    grades: &'static [(&'static str, &'static str)],
}

const DEMO_STUDENTS: &[DemoStudent] = &[
    DemoStudent {
        class: "5a",
        last_name: "Müller",
        first_name: "Jan",
        birth_date: (2013, 4, 2),
        narrative_only: false,
        subjects: &[("Deutsch", None), ("Mathematik", None)],
        grades: &[("Lesen", "1,0"), ("Schreiben", "2"), ("Zahlen und Operationen", "2,0")],
    },
    DemoStudent {
        class: "5a",
        last_name: "Schmidt",
        first_name: "Lea",
        birth_date: (2013, 9, 17),
        narrative_only: false,
        subjects: &[("Deutsch", None), ("Mathematik", Some("G"))],
        grades: &[("Lesen", "3"), ("Geometrie", "1")],
    },
    DemoStudent {
        class: "7b",
        last_name: "Öztürk",
        first_name: "Ayşe",
        birth_date: (2011, 1, 23),
        narrative_only: false,
        subjects: &[
            ("Deutsch", Some("E")),
            ("Wahlpflichtbereich Technik", None),
            ("Wahlpflichtbereich Französisch", None),
        ],
        grades: &[("Erörtern", "2"), ("Kommunikation", "1")],
    },
    DemoStudent {
        class: "7b",
        last_name: "Weiß",
        first_name: "Jonas",
        birth_date: (2011, 6, 5),
        narrative_only: true,
        subjects: &[(
            "Deutsch",
            Some("Jonas arbeitet im Unterricht aufmerksam mit.\nSeine Texte sind sorgfältig gegliedert."),
        )],
        grades: &[],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zeugnis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = zeugnis_db::connect(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding competence catalog...");
    let catalog = Catalog::from_json(DEMO_CATALOG).context("Invalid demo catalog")?;
    let summary = CatalogRepository::new(db.clone()).import(&catalog).await?;
    println!(
        "  {} subjects, {} topics, {} competences added",
        summary.subjects, summary.topics, summary.competences
    );

    println!("Seeding school year...");
    seed_school_year(&db).await?;

    println!("Seeding students...");
    for student in DEMO_STUDENTS {
        seed_student(&db, student).await?;
    }

    println!("Seeding competence selection...");
    seed_selection(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Seeds the half-year school year.
async fn seed_school_year(db: &DatabaseConnection) -> anyhow::Result<()> {
    if school_years::Entity::find()
        .filter(school_years::Column::Name.eq(SCHOOL_YEAR))
        .one(db)
        .await?
        .is_some()
    {
        println!("  School year {SCHOOL_YEAR} already exists, skipping...");
        return Ok(());
    }

    school_years::ActiveModel {
        name: Set(SCHOOL_YEAR.to_string()),
        end_of_year: Set(false),
        report_date: Set(NaiveDate::from_ymd_opt(2025, 1, 31)),
        ..Default::default()
    }
    .insert(db)
    .await?;
    println!("  Created school year {SCHOOL_YEAR}");
    Ok(())
}

async fn find_or_create_class(
    db: &DatabaseConnection,
    name: &str,
) -> anyhow::Result<school_classes::Model> {
    if let Some(class) = school_classes::Entity::find()
        .filter(school_classes::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(class);
    }

    let class = school_classes::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    println!("  Created class {name}");
    Ok(class)
}

/// Seeds one student with subjects and grades.
async fn seed_student(db: &DatabaseConnection, demo: &DemoStudent) -> anyhow::Result<()> {
    let class = find_or_create_class(db, demo.class).await?;

    if students::Entity::find()
        .filter(students::Column::ClassId.eq(class.id))
        .filter(students::Column::LastName.eq(demo.last_name))
        .filter(students::Column::FirstName.eq(demo.first_name))
        .one(db)
        .await?
        .is_some()
    {
        println!(
            "  {}, {} already exists, skipping...",
            demo.last_name, demo.first_name
        );
        return Ok(());
    }

    let (year, month, day) = demo.birth_date;
    let birth_date = NaiveDate::from_ymd_opt(year, month, day).context("Invalid birth date")?;
    let student = students::ActiveModel {
        class_id: Set(class.id),
        last_name: Set(demo.last_name.to_string()),
        first_name: Set(demo.first_name.to_string()),
        birth_date: Set(birth_date),
        days_absent_excused: Set(2),
        days_absent_unexcused: Set(0),
        lessons_absent_excused: Set(4),
        lessons_absent_unexcused: Set(1),
        report_text: Set(format!(
            "{} hat sich im Halbjahr gut in die Klassengemeinschaft eingebracht.",
            demo.first_name
        )),
        remarks: Set(String::new()),
        reduced_competence_mode: Set(false),
        narrative_only_mode: Set(demo.narrative_only),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for (subject, level) in demo.subjects {
        let subject_id = subject_id(db, subject).await?;
        student_subjects::ActiveModel {
            student_id: Set(student.id),
            subject_id: Set(subject_id),
            level: Set(level.map(str::to_string)),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for (topic, value) in demo.grades {
        let topic_id = topic_id(db, topic).await?;
        grades::ActiveModel {
            student_id: Set(student.id),
            topic_id: Set(topic_id),
            value: Set((*value).to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    info!(student_id = student.id, class = %demo.class, "Seeded student");
    println!("  Created {}, {}", demo.last_name, demo.first_name);
    Ok(())
}

/// Selects all Lesen competences and one Mathematik competence for 5a.
async fn seed_selection(db: &DatabaseConnection) -> anyhow::Result<()> {
    let lesen = topic_id(db, "Lesen").await?;
    let arithmetic = competences::Entity::find()
        .filter(competences::Column::Text.eq("nutzt schriftliche Rechenverfahren"))
        .one(db)
        .await?
        .context("Demo competence missing from catalog")?;

    let commands = [
        SelectionCommand::from(SetTopicSelection {
            class_name: "5a".to_string(),
            topic_id: TopicId::new(lesen),
            selected: true,
        }),
        SelectionCommand::from(SetCompetenceSelection {
            class_name: "5a".to_string(),
            competence_id: CompetenceId::new(arithmetic.id),
            selected: true,
        }),
    ];
    let written = SelectionRepository::new(db.clone()).apply(&commands).await?;
    println!("  {written} selections written");
    Ok(())
}

async fn subject_id(db: &DatabaseConnection, name: &str) -> anyhow::Result<i32> {
    Ok(subjects::Entity::find()
        .filter(subjects::Column::Name.eq(name))
        .one(db)
        .await?
        .with_context(|| format!("Subject {name} missing from catalog"))?
        .id)
}

async fn topic_id(db: &DatabaseConnection, name: &str) -> anyhow::Result<i32> {
    Ok(topics::Entity::find()
        .filter(topics::Column::Name.eq(name))
        .one(db)
        .await?
        .with_context(|| format!("Topic {name} missing from catalog"))?
        .id)
}
