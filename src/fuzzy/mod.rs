// File: src/fuzzy/mod.rs
pub mod cognate;
pub mod distance;

pub use cognate::cognate_score;
pub use distance::{edit_distance, longest_common_substring};
