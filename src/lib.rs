// src/lib.rs

pub mod batch;
pub mod core;
pub mod errors;
pub mod extract;
pub mod fuzzy;
pub mod persistence;
pub mod translation;

pub use crate::batch::{AlignerConfig, BatchAligner, FilePair};
pub use crate::core::engine::{AlignmentEngine, MatchConfig, THRESHOLD};
pub use crate::core::types::{AlignedPair, Alignment, Entity, FormCounts};
pub use crate::errors::{AlignError, Result};
pub use crate::translation::TranslationLexicon;
