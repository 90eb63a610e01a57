//! `SeaORM` entity definitions.

pub mod prelude;

pub mod class_competences;
pub mod competences;
pub mod grades;
pub mod school_classes;
pub mod school_years;
pub mod student_subjects;
pub mod students;
pub mod subjects;
pub mod topics;
