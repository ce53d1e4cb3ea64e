//! Template rendering helpers and one askama template per piece kind.

use askama::Template;
use axum::response::Html;
use markdown::Piece;

use crate::error::AppResult;

/// Renders a page template into an HTML response.
pub fn page<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "pieces/title.html")]
struct TitleTemplate<'a> {
    text: &'a str,
    level: u8,
}

#[derive(Template)]
#[template(path = "pieces/paragraph.html")]
struct ParagraphTemplate<'a> {
    text: &'a str,
}

#[derive(Template)]
#[template(path = "pieces/unordered_list.html")]
struct UnorderedListTemplate<'a> {
    items: &'a [String],
}

#[derive(Template)]
#[template(path = "pieces/code_block.html")]
struct CodeBlockTemplate<'a> {
    content: &'a str,
    /// Empty when the fence has no info string.
    language: &'a str,
}

#[derive(Template)]
#[template(path = "pieces/table.html")]
struct TableTemplate<'a> {
    header: &'a [String],
    body: &'a [Vec<String>],
}

#[derive(Template)]
#[template(path = "pieces/unknown.html")]
struct UnknownTemplate<'a> {
    raw: &'a str,
}

pub fn render_piece(piece: &Piece) -> askama::Result<String> {
    match piece {
        Piece::Title { text, level } => TitleTemplate {
            text,
            level: (*level).clamp(1, 6),
        }
        .render(),
        Piece::Paragraph { text } => ParagraphTemplate { text }.render(),
        Piece::UnorderedList { items } => UnorderedListTemplate { items }.render(),
        Piece::CodeBlock { content, language } => CodeBlockTemplate {
            content,
            language: language.as_deref().unwrap_or_default(),
        }
        .render(),
        Piece::Table { .. } => TableTemplate {
            header: piece.table_header().unwrap_or_default(),
            body: piece.table_body(),
        }
        .render(),
        Piece::Unknown { raw } => UnknownTemplate { raw }.render(),
    }
}

/// Rendered HTML of each piece, in document order.
pub fn render_pieces(pieces: &[Piece]) -> askama::Result<Vec<String>> {
    pieces.iter().map(render_piece).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::extract;

    #[test]
    fn title_level_sets_heading_tag() {
        let html = render_piece(&Piece::Title {
            text: "Nav".into(),
            level: 2,
        })
        .unwrap();
        assert!(html.contains("<h2"));
        assert!(html.contains("Nav</h2>"));
    }

    #[test]
    fn text_is_escaped() {
        let html = render_piece(&Piece::Paragraph {
            text: "<script>alert(1)</script>".into(),
        })
        .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn code_block_language_class() {
        let html = render_piece(&Piece::CodeBlock {
            content: "fn main() {}".into(),
            language: Some("rust".into()),
        })
        .unwrap();
        assert!(html.contains("language-rust"));

        let html = render_piece(&Piece::CodeBlock {
            content: "plain".into(),
            language: None,
        })
        .unwrap();
        assert!(!html.contains("language-"));
    }

    #[test]
    fn table_header_and_body() {
        let pieces = extract("| a | b |\n|---|---|\n| 1 | 2 |");
        let html = render_pieces(&pieces).unwrap().concat();
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn keeps_document_order() {
        let pieces = extract("# One\n\ntwo\n\n- three");
        let html = render_pieces(&pieces).unwrap();
        assert_eq!(html.len(), 3);
        assert!(html[0].contains("One"));
        assert!(html[2].contains("three"));
    }
}
