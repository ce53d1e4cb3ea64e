//! Trame Pieces
//!
//! One piece is one structural unit of a trame, rendered by its own template.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Piece {
    Title { text: String, level: u8 },
    Paragraph { text: String },
    UnorderedList { items: Vec<String> },
    CodeBlock { content: String, language: Option<String> },
    /// First row is the header.
    Table { rows: Vec<Vec<String>> },
    /// A line that could not be classified, kept as written.
    Unknown { raw: String },
}

/// Discriminant of [`Piece`], used for template dispatch and introspection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Title,
    Paragraph,
    UnorderedList,
    CodeBlock,
    Table,
    Unknown,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Title,
        PieceKind::Paragraph,
        PieceKind::UnorderedList,
        PieceKind::CodeBlock,
        PieceKind::Table,
        PieceKind::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::Title => "title",
            PieceKind::Paragraph => "paragraph",
            PieceKind::UnorderedList => "unordered_list",
            PieceKind::CodeBlock => "code_block",
            PieceKind::Table => "table",
            PieceKind::Unknown => "unknown",
        }
    }
}

impl Piece {
    pub fn kind(&self) -> PieceKind {
        match self {
            Piece::Title { .. } => PieceKind::Title,
            Piece::Paragraph { .. } => PieceKind::Paragraph,
            Piece::UnorderedList { .. } => PieceKind::UnorderedList,
            Piece::CodeBlock { .. } => PieceKind::CodeBlock,
            Piece::Table { .. } => PieceKind::Table,
            Piece::Unknown { .. } => PieceKind::Unknown,
        }
    }

    /// Header row of a table piece.
    pub fn table_header(&self) -> Option<&[String]> {
        match self {
            Piece::Table { rows } => rows.first().map(Vec::as_slice),
            _ => None,
        }
    }

    /// Body rows of a table piece (everything after the header).
    pub fn table_body(&self) -> &[Vec<String>] {
        match self {
            Piece::Table { rows } if !rows.is_empty() => &rows[1..],
            _ => &[],
        }
    }
}
