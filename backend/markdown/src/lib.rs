//! Trame Markdown Piece Extraction
//!
//! Classifies the lines of a markdown "trame" into a flat, ordered list of
//! renderable pieces (titles, paragraphs, lists, code blocks, tables) that
//! the HTML templates consume one by one.

pub mod extractor;
pub mod piece;
pub mod renderer;
pub mod trame;

pub use extractor::{extract, PieceExtractor};
pub use piece::{Piece, PieceKind};
pub use renderer::Renderer;
pub use trame::{Trame, TrameBuilder};
