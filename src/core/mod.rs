// src/core/mod.rs
pub mod counter;
pub mod engine;
pub mod types;
