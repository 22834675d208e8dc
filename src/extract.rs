//! Named-entity extraction from `*MEX`-style markup, e.g.
//! `<NEMEX TYPE="LOC">Romania</NEMEX>` or `<TIMEX TYPE="DATE">1918</TIMEX>`.

use crate::core::types::Entity;
use crate::errors::{AlignError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;

// The closing tag may not contain '<' or '>', otherwise the lazy occurrence would
// stop at the first nested closing tag (`</w>`) and swallow the rest into the tag.
static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<.+?MEX TYPE="(?P<type>.+?)">(?P<occ>.+?)</[^<>]+?MEX>"#).unwrap()
});

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.+?>").unwrap());

/// Removes any markup tags nested inside an occurrence,
/// e.g. `<w lemma="x">Ion</w> Popescu` -> `Ion Popescu`.
pub fn strip_annotation(text: &str) -> Cow<'_, str> {
    TAG_REGEX.replace_all(text, "")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor {
    strip_annotation: bool,
}

impl EntityExtractor {
    /// `strip_annotation` removes tags nested inside entity spans, for inputs that
    /// carry additional xml-like markup.
    pub fn new(strip_annotation: bool) -> Self {
        Self { strip_annotation }
    }

    /// Lazily yields the entities tagged in `text`, in document order.
    pub fn extract<'t>(&self, text: &'t str) -> impl Iterator<Item = Entity> + 't {
        let strip = self.strip_annotation;
        ENTITY_REGEX.captures_iter(text).map(move |cap| {
            let occurrence = &cap["occ"];
            let occurrence = if strip {
                strip_annotation(occurrence).into_owned()
            } else {
                occurrence.to_string()
            };
            Entity::new(occurrence, &cap["type"])
        })
    }

    pub fn extract_file(&self, path: &Path) -> Result<Vec<Entity>> {
        let text = std::fs::read_to_string(path).map_err(|e| AlignError::io(path, e))?;
        Ok(self.extract(&text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_entities_in_order() {
        let text = r#"The <NEMEX TYPE="PER">President</NEMEX> of <NEMEX TYPE="LOC">Romania</NEMEX>
            arrived in <ENAMEX TYPE="LOC">Brussels</ENAMEX> on <TIMEX TYPE="DATE">Monday</TIMEX>."#;
        let entities: Vec<Entity> = EntityExtractor::default().extract(text).collect();

        assert_eq!(
            entities,
            vec![
                Entity::new("President", "PER"),
                Entity::new("Romania", "LOC"),
                Entity::new("Brussels", "LOC"),
                Entity::new("Monday", "DATE"),
            ]
        );
    }

    #[test]
    fn test_extract_spans_lines() {
        let text = "<NEMEX TYPE=\"ORG\">European\nUnion</NEMEX>";
        let entities: Vec<Entity> = EntityExtractor::default().extract(text).collect();
        assert_eq!(entities, vec![Entity::new("European\nUnion", "ORG")]);
    }

    #[test]
    fn test_no_markup_yields_nothing() {
        let extractor = EntityExtractor::default();
        assert_eq!(extractor.extract("plain text, no tags").count(), 0);
        assert_eq!(extractor.extract("").count(), 0);
    }

    #[test]
    fn test_nested_annotation_kept_unless_stripped() {
        let text = r#"<NEMEX TYPE="PER"><w ana="Np">Ion</w> <w ana="Np">Popescu</w></NEMEX>"#;

        let raw: Vec<Entity> = EntityExtractor::new(false).extract(text).collect();
        assert_eq!(raw[0].occurrence, r#"<w ana="Np">Ion</w> <w ana="Np">Popescu</w>"#);

        let stripped: Vec<Entity> = EntityExtractor::new(true).extract(text).collect();
        assert_eq!(stripped, vec![Entity::new("Ion Popescu", "PER")]);
    }

    #[test]
    fn test_strip_annotation() {
        assert_eq!(strip_annotation("<b>Cluj</b>-Napoca"), "Cluj-Napoca");
        assert_eq!(strip_annotation("Iași"), "Iași");
    }
}
