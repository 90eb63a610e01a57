//! Typed IDs for type-safe record references.
//!
//! Using typed IDs prevents accidentally passing a `TopicId` where a `CompetenceId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers around integer primary keys.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Wraps a raw primary key.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the raw primary key.
            #[must_use]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(StudentId, "Unique identifier for a student.");
typed_id!(ClassId, "Unique identifier for a school class.");
typed_id!(SubjectId, "Unique identifier for a subject.");
typed_id!(TopicId, "Unique identifier for a topic of a subject.");
typed_id!(CompetenceId, "Unique identifier for a competence of a topic.");
typed_id!(SchoolYearId, "Unique identifier for a school year record.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod id_tests;
