// File: src/persistence.rs
use crate::core::types::Alignment;
use crate::errors::{AlignError, Result};
use crate::translation::TranslationLexicon;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `source \t target \t score`, one pair per line.
    #[default]
    Tsv,
    /// A JSON array of `{source, target, score}` objects.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected tsv or json)")),
        }
    }
}

/// Versioned envelope for the binary lexicon snapshot. Written from a borrowed
/// lexicon, read back into an owned one.
#[derive(Serialize, Deserialize)]
struct LexiconSnapshot<L> {
    version: u32,
    lexicon: L,
}

const SNAPSHOT_VERSION: u32 = 1;

/// Writes `contents` to a temp file beside `path`, then renames it into place,
/// so a failed run never leaves a truncated file behind.
fn write_atomically<F>(path: &Path, contents: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| AlignError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| AlignError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        contents(&mut writer)?;
        writer.flush().map_err(|e| AlignError::io(path, e))?;
    }
    temp_file
        .persist(path)
        .map_err(|e| AlignError::io(path, e.error))?;
    Ok(())
}

/// Writes the alignment in insertion order.
pub fn write_alignment<W: Write>(alignment: &Alignment, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            for pair in alignment.pairs() {
                writeln!(out, "{}\t{}", pair.key(), pair.score)
                    .map_err(|e| AlignError::io("<output>", e))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, alignment.pairs())?;
            writeln!(out).map_err(|e| AlignError::io("<output>", e))?;
        }
    }
    Ok(())
}

pub fn save_alignment(alignment: &Alignment, format: OutputFormat, path: &Path) -> Result<()> {
    write_atomically(path, |writer| write_alignment(alignment, format, writer))?;
    info!("Wrote {} aligned pairs to {}", alignment.len(), path.display());
    Ok(())
}

pub fn save_lexicon_snapshot(lexicon: &TranslationLexicon, path: &Path) -> Result<()> {
    let snapshot = LexiconSnapshot {
        version: SNAPSHOT_VERSION,
        lexicon,
    };
    write_atomically(path, |writer| {
        bincode::serialize_into(writer, &snapshot)?;
        Ok(())
    })
}

pub fn load_lexicon_snapshot(path: &Path) -> Result<TranslationLexicon> {
    let file = File::open(path).map_err(|e| AlignError::io(path, e))?;
    let reader = BufReader::new(file);
    let snapshot: LexiconSnapshot<TranslationLexicon> = bincode::deserialize_from(reader)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(AlignError::Snapshot(Box::new(bincode::ErrorKind::Custom(format!(
            "unsupported snapshot version {} (expected {})",
            snapshot.version, SNAPSHOT_VERSION
        )))));
    }
    Ok(snapshot.lexicon)
}
