//! Trame documents
//!
//! A trame is a markdown file rendered as a sequence of pieces.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

use crate::extractor::extract;
use crate::piece::Piece;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trame {
    /// Where the markdown came from (a file path or a caller-chosen label).
    pub origin: String,
    /// Text of the first title piece, if any.
    pub title: Option<String>,
    pub pieces: Vec<Piece>,
}

impl Trame {
    /// Public field names, listed on the debug page.
    pub const FIELD_NAMES: [&'static str; 3] = ["origin", "title", "pieces"];

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}

pub struct TrameBuilder;

impl TrameBuilder {
    pub fn from_string(origin: impl Into<String>, markdown: &str) -> Trame {
        let pieces = extract(markdown);
        let title = pieces.iter().find_map(|piece| match piece {
            Piece::Title { text, .. } => Some(text.clone()),
            _ => None,
        });
        Trame {
            origin: origin.into(),
            title,
            pieces,
        }
    }

    /// Reads `path` and extracts it. Bytes that are not UTF-8 are replaced
    /// with U+FFFD rather than failing the whole trame.
    pub fn from_file(path: &Path) -> Result<Trame> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read trame: {}", path.display()))?;
        let markdown = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = markdown {
            debug!(path = %path.display(), "Trame is not valid UTF-8, decoded lossily");
        }
        Ok(Self::from_string(path.display().to_string(), &markdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_first_title_piece() {
        let trame = TrameBuilder::from_string("test", "intro\n\n## Nav\n# Later");
        assert_eq!(trame.title.as_deref(), Some("Nav"));
        assert_eq!(trame.piece_count(), 3);
        assert_eq!(trame.origin, "test");
    }

    #[test]
    fn no_title() {
        let trame = TrameBuilder::from_string("test", "- a");
        assert!(trame.title.is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = TrameBuilder::from_file(Path::new("does/not/exist.md")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.md"));
    }

    #[test]
    fn latin1_file_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.md");
        std::fs::write(&path, b"# Caf\xe9\n- na\xefve\n").unwrap();

        let trame = TrameBuilder::from_file(&path).unwrap();
        assert_eq!(trame.title.as_deref(), Some("Caf\u{FFFD}"));
        assert_eq!(trame.piece_count(), 2);
    }
}
