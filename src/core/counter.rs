// File: src/core/counter.rs
use crate::core::types::{Entity, FormCounts};

/// Aggregates extracted entities into per-form type counts.
/// Forms are lower-cased; entity types are kept verbatim.
pub fn count_forms<'a, I>(entities: I) -> FormCounts
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut counts = FormCounts::new();
    for entity in entities {
        counts.add(&entity.occurrence.to_lowercase(), &entity.entity_type);
    }
    counts
}
