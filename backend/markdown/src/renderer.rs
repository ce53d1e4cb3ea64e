//! Renderers for trame pieces
//!
//! HTML goes through the gateway templates; this module covers plain text.

use crate::piece::Piece;

pub struct Renderer;

impl Renderer {
    /// Renders pieces to plain text, one line per source line of content.
    pub fn to_plain_text(pieces: &[Piece]) -> String {
        let mut output = String::new();
        for piece in pieces {
            match piece {
                Piece::Title { text, .. } | Piece::Paragraph { text } => {
                    output.push_str(text);
                    output.push('\n');
                }
                Piece::UnorderedList { items } => {
                    for item in items {
                        output.push_str(item);
                        output.push('\n');
                    }
                }
                Piece::CodeBlock { content, .. } => {
                    output.push_str(content);
                    output.push('\n');
                }
                Piece::Table { rows } => {
                    for row in rows {
                        output.push_str(&row.join(" "));
                        output.push('\n');
                    }
                }
                Piece::Unknown { raw } => {
                    output.push_str(raw);
                    output.push('\n');
                }
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;

    #[test]
    fn plain_text_follows_piece_order() {
        let pieces = extract("# Cap\n- a\n- b\n| x | y |\n```\ncode\n```");
        assert_eq!(Renderer::to_plain_text(&pieces), "Cap\na\nb\nx y\ncode\n");
    }
}
