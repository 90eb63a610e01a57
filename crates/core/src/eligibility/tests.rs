//! Tests for eligibility resolution.

use proptest::prelude::*;

use super::service::{ClassContext, EligibilityResolver};
use super::types::{GradeBand, Level, LevelOutput, paragraphs};
use crate::fixtures::{
    class, competence, mueller_snapshot, record, school_year, selection, student, subject, topic,
};
use crate::record::ExportSnapshot;

fn snapshot_for(class_name: &str, selected: &[i32]) -> ExportSnapshot {
    ExportSnapshot {
        school_year: school_year(),
        class: class(class_name),
        selected_competences: selection(selected),
        students: Vec::new(),
    }
}

proptest! {
    /// Narrative-only students never get a competence breakdown.
    #[test]
    fn test_narrative_only_has_no_competences(
        topic_count in 0usize..5,
        competence_count in 0usize..5,
        level in prop::option::of("[A-Za-z ]{0,12}"),
    ) {
        let topics = (0..topic_count)
            .map(|t| {
                let t = i32::try_from(t).unwrap();
                let competences = (0..competence_count)
                    .map(|c| competence(t * 10 + i32::try_from(c).unwrap(), "kann etwas"))
                    .collect();
                topic(t, "Thema", "5/6", competences)
            })
            .collect();

        let mut pupil = student(1, "Weber", "Lea");
        pupil.narrative_only_mode = true;
        let rec = record(pupil, vec![subject(1, "Mathematik", level.as_deref(), topics)], &[(0, "2")]);

        let snapshot = snapshot_for("5b", &[]);
        let report = EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);

        prop_assert_eq!(report.subjects.len(), 1);
        prop_assert!(report.subjects[0].topics.is_empty());
        prop_assert!(report.subjects[0].breakdown_suppressed);
    }

    /// Levels longer than the threshold always suppress the breakdown.
    #[test]
    fn test_long_level_suppresses_breakdown(level in "[a-z]{4,40}") {
        let rec = record(
            student(1, "Weber", "Lea"),
            vec![subject(
                1,
                "Englisch",
                Some(&level),
                vec![topic(1, "Hören", "5/6", vec![competence(1, "versteht Anweisungen")])],
            )],
            &[(1, "2")],
        );

        let snapshot = snapshot_for("5b", &[]);
        let report = EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);

        prop_assert!(report.subjects[0].topics.is_empty());
        prop_assert_eq!(&report.subjects[0].level, &LevelOutput::Narrative(vec![level.clone()]));
    }

    /// Paragraph splitting never produces empty paragraphs or stray whitespace.
    #[test]
    fn test_paragraphs_are_clean(text in "[a-z \n\t]{0,60}") {
        for paragraph in paragraphs(&text) {
            prop_assert!(!paragraph.is_empty());
            prop_assert_eq!(paragraph.trim(), paragraph.as_str());
            prop_assert!(!paragraph.contains("  "));
            prop_assert!(!paragraph.contains('\n'));
        }
    }
}

mod unit_tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_mueller_scenario() {
        let snapshot = mueller_snapshot();
        let context = ClassContext::from_snapshot(&snapshot);
        let report = EligibilityResolver::default().resolve(&context, &snapshot.students[0]);

        assert_eq!(report.base_name, "mueller_jan");
        assert_eq!(report.class_name, "5a");
        assert_eq!(report.subjects.len(), 1);

        let deutsch = &report.subjects[0];
        assert_eq!(deutsch.level, LevelOutput::Empty);
        assert_eq!(deutsch.topics.len(), 1);
        assert_eq!(deutsch.topics[0].title, "Lesen");
        assert_eq!(deutsch.topics[0].grade, "1,0");
        assert_eq!(
            deutsch.topics[0].competences,
            vec!["liest altersgemäße Texte sinnerfassend".to_string()]
        );
    }

    #[test]
    fn test_empty_selection_keeps_all_competences() {
        let mut snapshot = mueller_snapshot();
        snapshot.selected_competences.clear();
        let context = ClassContext::from_snapshot(&snapshot);
        let report = EligibilityResolver::default().resolve(&context, &snapshot.students[0]);

        assert_eq!(report.subjects[0].topics[0].competences.len(), 2);
    }

    #[test]
    fn test_topic_without_competences_is_dropped_without_selection() {
        let rec = record(
            student(1, "Weber", "Lea"),
            vec![subject(
                1,
                "Deutsch",
                None,
                vec![
                    topic(1, "Leer", "5/6", vec![]),
                    topic(2, "Lesen", "5/6", vec![competence(1, "liest")]),
                ],
            )],
            &[(1, "2")],
        );
        let snapshot = snapshot_for("5a", &[]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);

        let titles: Vec<&str> = report.subjects[0]
            .topics
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Lesen"]);
    }

    #[test]
    fn test_topic_without_selected_competence_is_dropped() {
        let rec = record(
            student(1, "Weber", "Lea"),
            vec![subject(
                1,
                "Mathematik",
                None,
                vec![
                    topic(1, "Zahlen", "5/6", vec![competence(1, "rechnet")]),
                    topic(2, "Geometrie", "5/6", vec![competence(2, "zeichnet")]),
                ],
            )],
            &[],
        );
        let snapshot = snapshot_for("6a", &[2]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);

        let titles: Vec<&str> = report.subjects[0]
            .topics
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Geometrie"]);
        assert_eq!(report.subjects[0].topics[0].grade, "");
    }

    #[test]
    fn test_subject_without_topics_is_emitted() {
        let rec = record(
            student(1, "Weber", "Lea"),
            vec![subject(1, "Sport", Some("2"), vec![])],
            &[],
        );
        let snapshot = snapshot_for("5a", &[1]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);

        assert_eq!(report.subjects.len(), 1);
        assert_eq!(report.subjects[0].level, LevelOutput::Code("2".to_string()));
        assert!(report.subjects[0].topics.is_empty());
        assert!(!report.subjects[0].breakdown_suppressed);
    }

    #[test]
    fn test_topics_outside_band_are_skipped() {
        let rec = record(
            student(1, "Weber", "Lea"),
            vec![subject(
                1,
                "Deutsch",
                None,
                vec![
                    topic(1, "Lesen", "5/6", vec![competence(1, "liest")]),
                    topic(2, "Erörtern", "7/8", vec![competence(2, "argumentiert")]),
                ],
            )],
            &[],
        );
        let snapshot = snapshot_for("8c", &[]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);
        assert_eq!(report.subjects[0].topics.len(), 1);
        assert_eq!(report.subjects[0].topics[0].title, "Erörtern");

        // no band: every topic counts
        let snapshot = snapshot_for("Förderklasse", &[]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);
        assert_eq!(report.subjects[0].topics.len(), 2);
    }

    #[test]
    fn test_only_first_eligible_elective_in_upper_band() {
        let rec = record(
            student(1, "Yilmaz", "Deniz"),
            vec![
                subject(1, "Deutsch", None, vec![]),
                subject(
                    2,
                    "Wahlpflichtbereich Technik",
                    None,
                    vec![topic(1, "Werkstoffe", "7/8", vec![competence(1, "sägt")])],
                ),
                subject(
                    3,
                    "Wahlpflichtbereich Französisch",
                    None,
                    vec![topic(2, "Hören", "7/8", vec![competence(2, "versteht")])],
                ),
                subject(4, "Wahlpflichtbereich Informatik", Some("E"), vec![]),
            ],
            &[(2, "2")],
        );
        let snapshot = snapshot_for("7a", &[]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);

        let names: Vec<&str> = report.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Deutsch", "Wahlpflichtbereich Französisch"]);
    }

    #[test]
    fn test_elective_with_level_only_is_kept() {
        let rec = record(
            student(1, "Yilmaz", "Deniz"),
            vec![
                subject(1, "Wahlpflichtbereich Technik", Some("G"), vec![]),
                subject(2, "Wahlpflichtbereich Musik", Some("E"), vec![]),
            ],
            &[],
        );
        let snapshot = snapshot_for("9b", &[]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);

        assert_eq!(report.subjects.len(), 1);
        assert_eq!(report.subjects[0].name, "Wahlpflichtbereich Technik");
    }

    #[test]
    fn test_empty_elective_kept_below_upper_band() {
        let rec = record(
            student(1, "Yilmaz", "Deniz"),
            vec![subject(1, "Wahlpflichtbereich Technik", None, vec![])],
            &[],
        );
        let snapshot = snapshot_for("6a", &[]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);
        assert_eq!(report.subjects.len(), 1);
    }

    #[test]
    fn test_reduced_mode_alone_keeps_breakdown() {
        let mut pupil = student(1, "Weber", "Lea");
        pupil.reduced_competence_mode = true;
        let rec = record(
            pupil,
            vec![subject(
                1,
                "Mathematik",
                Some("G"),
                vec![topic(1, "Zahlen", "5/6", vec![competence(1, "rechnet")])],
            )],
            &[(1, "3")],
        );
        let snapshot = snapshot_for("5a", &[]);
        let report =
            EligibilityResolver::default().resolve(&ClassContext::from_snapshot(&snapshot), &rec);

        assert!(report.reduced_competence_mode);
        assert_eq!(report.subjects[0].topics.len(), 1);
    }

    #[test]
    fn test_absence_totals() {
        let snapshot = mueller_snapshot();
        let context = ClassContext::from_snapshot(&snapshot);
        let report = EligibilityResolver::default().resolve(&context, &snapshot.students[0]);

        assert_eq!(report.absence.days_total, 4);
        assert_eq!(report.absence.days_unexcused, 1);
        assert_eq!(report.absence.lessons_total, 7);
        assert_eq!(report.absence.lessons_unexcused, 2);
    }

    #[test]
    fn test_level_classification() {
        assert_eq!(Level::classify(None, 3), Level::Absent);
        assert_eq!(Level::classify(Some("   "), 3), Level::Absent);
        assert_eq!(Level::classify(Some(" G "), 3), Level::Short("G".to_string()));
        assert_eq!(Level::classify(Some("abc"), 3), Level::Short("abc".to_string()));
        assert!(Level::classify(Some("abcd"), 3).is_long_form());
        // counted in characters, not bytes
        assert_eq!(Level::classify(Some("äöü"), 3), Level::Short("äöü".to_string()));
    }

    #[test]
    fn test_narrative_paragraphs() {
        let text = "Lea arbeitet\n  sehr   sorgfältig.\n\n\nSie hilft anderen.";
        assert_eq!(
            paragraphs(text),
            vec![
                "Lea arbeitet sehr sorgfältig.".to_string(),
                "Sie hilft anderen.".to_string()
            ]
        );
    }

    #[rstest]
    #[case("0a")]
    #[case("14b")]
    #[case("255a")]
    #[case("300")]
    fn test_grade_band_out_of_range(#[case] name: &str) {
        assert!(GradeBand::from_class_name(name).is_none());
    }

    #[test]
    fn test_grade_band_highest_grade() {
        let band = GradeBand::from_class_name("13").unwrap();
        assert_eq!(band.label(), "13/14");
        assert!(band.contains_block("13/14"));
    }

    #[test]
    fn test_grade_band() {
        let band = GradeBand::from_class_name("7b").unwrap();
        assert_eq!(band.grade(), 7);
        assert_eq!(band.label(), "7/8");
        assert!(band.contains_block("7 / 8"));
        assert!(!band.contains_block("5/6"));
        assert!(band.is_upper(7));

        let band = GradeBand::from_class_name("10c").unwrap();
        assert_eq!(band.label(), "9/10");
        assert_eq!(band.first_grade(), 9);

        assert!(!GradeBand::from_class_name("6a").unwrap().is_upper(7));
        assert!(GradeBand::from_class_name("DaZ").is_none());
        assert!(GradeBand::from_class_name("0").is_none());
    }
}
