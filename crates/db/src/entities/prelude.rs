//! Entity re-exports.

pub use super::class_competences::Entity as ClassCompetences;
pub use super::competences::Entity as Competences;
pub use super::grades::Entity as Grades;
pub use super::school_classes::Entity as SchoolClasses;
pub use super::school_years::Entity as SchoolYears;
pub use super::student_subjects::Entity as StudentSubjects;
pub use super::students::Entity as Students;
pub use super::subjects::Entity as Subjects;
pub use super::topics::Entity as Topics;
