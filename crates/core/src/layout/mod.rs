//! Output directory layout and per-student file names.
//!
//! - `print_<year>_{hj|ej}/` output root per school year and term
//! - one subdirectory per class
//! - `<slug(last)>_<slug(first)>` base name per student

pub mod error;
pub mod service;
pub mod slug;


pub use error::LayoutError;
pub use service::{OutputLayout, root_dir_name};
pub use slug::{base_name, slug};
