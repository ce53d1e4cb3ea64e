//! Line-driven Piece Extractor
//!
//! Single pass over the lines of a trame. Each line is classified on its own
//! (leading whitespace ignored) and either extends the piece currently open or
//! closes it and starts a new one. Extraction never fails: lines that cannot
//! be classified meaningfully come out as [`Piece::Unknown`].
//!
//! Line syntax:
//! - `#`..`######` followed by whitespace: title
//! - `- `, `* `, `+ `: list item, consecutive items form one list
//! - three or more backticks or tildes: code fence, optional language after it
//! - a line starting with `|`: table row, an optional `|---|` row under the
//!   header is dropped
//! - blank line: closes the open list, table or paragraph
//! - anything else: paragraph text, consecutive lines joined with one space

use tracing::debug;

use crate::piece::Piece;

/// Extracts the pieces of a markdown document.
pub fn extract(markdown: &str) -> Vec<Piece> {
    PieceExtractor::extract(markdown)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    /// A closing fence uses the same marker, is at least as long, and carries no info string.
    fn is_closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let run = trimmed.chars().take_while(|c| *c == self.marker).count();
        run >= self.len && run == trimmed.chars().count()
    }
}

#[derive(Debug)]
enum Line<'a> {
    Blank,
    Title { level: u8, text: &'a str },
    Bullet(&'a str),
    Fence { fence: Fence, language: Option<&'a str> },
    CorruptFence,
    TableRow(Vec<String>),
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() {
        return Line::Blank;
    }

    if let Some(title) = classify_title(trimmed) {
        return title;
    }
    if let Some(fence) = classify_fence(trimmed) {
        return fence;
    }
    if let Some(item) = bullet_text(trimmed) {
        return Line::Bullet(item);
    }
    if trimmed.starts_with('|') {
        return Line::TableRow(split_cells(trimmed));
    }
    Line::Text(trimmed.trim_end())
}

fn classify_title(trimmed: &str) -> Option<Line<'_>> {
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    match rest.chars().next() {
        None => Some(Line::Title { level: level as u8, text: "" }),
        Some(c) if c.is_whitespace() => Some(Line::Title {
            level: level as u8,
            text: rest.trim(),
        }),
        Some(_) => None,
    }
}

fn classify_fence(trimmed: &str) -> Option<Line<'_>> {
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len..].trim();
    if marker == '`' && info.contains('`') {
        return Some(Line::CorruptFence);
    }
    Some(Line::Fence {
        fence: Fence { marker, len },
        language: info.split_whitespace().next(),
    })
}

fn bullet_text(trimmed: &str) -> Option<&str> {
    let mut chars = trimmed.chars();
    let marker = chars.next()?;
    if !matches!(marker, '-' | '*' | '+') {
        return None;
    }
    match chars.next() {
        Some(' ') | Some('\t') => Some(trimmed[1..].trim()),
        _ => None,
    }
}

fn split_cells(trimmed: &str) -> Vec<String> {
    let inner = trimmed.trim_end();
    let inner = inner.strip_prefix('|').unwrap_or(inner);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| {
        let body = cell.strip_prefix(':').unwrap_or(cell);
        let body = body.strip_suffix(':').unwrap_or(body);
        !body.is_empty() && body.chars().all(|c| c == '-')
    })
}

/// The piece being accumulated while lines are consumed.
#[derive(Debug, Default)]
enum Open {
    #[default]
    Nothing,
    Paragraph(Vec<String>),
    List(Vec<String>),
    Table {
        rows: Vec<Vec<String>>,
        width: usize,
        expects_separator: bool,
    },
    Code {
        fence: Fence,
        language: Option<String>,
        lines: Vec<String>,
    },
}

/// Stateful extractor; feed lines with [`PieceExtractor::push_line`] and
/// collect with [`PieceExtractor::finish`], or use [`PieceExtractor::extract`].
#[derive(Debug, Default)]
pub struct PieceExtractor {
    pieces: Vec<Piece>,
    open: Open,
}

impl PieceExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(markdown: &str) -> Vec<Piece> {
        let mut extractor = Self::new();
        for line in markdown.lines() {
            extractor.push_line(line);
        }
        extractor.finish()
    }

    pub fn push_line(&mut self, line: &str) {
        if let Open::Code { fence, lines, .. } = &mut self.open {
            if fence.is_closed_by(line) {
                self.close();
            } else {
                lines.push(line.to_string());
            }
            return;
        }

        match classify(line) {
            Line::Blank => self.close(),
            Line::Title { level, text } => {
                self.close();
                self.pieces.push(Piece::Title {
                    text: text.to_string(),
                    level,
                });
            }
            Line::Bullet(item) => match &mut self.open {
                Open::List(items) => items.push(item.to_string()),
                _ => {
                    self.close();
                    self.open = Open::List(vec![item.to_string()]);
                }
            },
            Line::Fence { fence, language } => {
                self.close();
                self.open = Open::Code {
                    fence,
                    language: language.map(str::to_string),
                    lines: Vec::new(),
                };
            }
            Line::CorruptFence => {
                debug!(line, "Corrupt code fence kept as unknown piece");
                self.close();
                self.push_unknown(line);
            }
            Line::TableRow(cells) => self.push_table_row(line, cells),
            Line::Text(text) => match &mut self.open {
                Open::Paragraph(lines) => lines.push(text.to_string()),
                _ => {
                    self.close();
                    self.open = Open::Paragraph(vec![text.to_string()]);
                }
            },
        }
    }

    fn push_table_row(&mut self, raw: &str, cells: Vec<String>) {
        if let Open::Table {
            rows,
            width,
            expects_separator,
        } = &mut self.open
        {
            if cells.len() != *width {
                debug!(
                    expected = *width,
                    found = cells.len(),
                    "Table row width mismatch, closing table"
                );
                self.close();
                self.push_unknown(raw);
                return;
            }
            let separator = *expects_separator && is_separator_row(&cells);
            *expects_separator = false;
            if !separator {
                rows.push(cells);
            }
            return;
        }

        self.close();
        if is_separator_row(&cells) {
            self.push_unknown(raw);
            return;
        }
        self.open = Open::Table {
            width: cells.len(),
            rows: vec![cells],
            expects_separator: true,
        };
    }

    fn push_unknown(&mut self, raw: &str) {
        self.pieces.push(Piece::Unknown {
            raw: raw.to_string(),
        });
    }

    fn close(&mut self) {
        match std::mem::take(&mut self.open) {
            Open::Nothing => {}
            Open::Paragraph(lines) => self.pieces.push(Piece::Paragraph {
                text: lines.join(" "),
            }),
            Open::List(items) => self.pieces.push(Piece::UnorderedList { items }),
            Open::Table { rows, .. } => self.pieces.push(Piece::Table { rows }),
            Open::Code {
                language, lines, ..
            } => self.pieces.push(Piece::CodeBlock {
                content: lines.join("\n"),
                language,
            }),
        }
    }

    /// Closes whatever is still open (an unterminated code block included).
    pub fn finish(mut self) -> Vec<Piece> {
        if matches!(self.open, Open::Code { .. }) {
            debug!("Unterminated code block closed at end of input");
        }
        self.close();
        self.pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn single_title() {
        assert_eq!(
            extract("# Title"),
            vec![Piece::Title { text: s("Title"), level: 1 }]
        );
    }

    #[test]
    fn title_levels_and_non_titles() {
        let pieces = extract("###### Deep\n####### Too deep\n#hashtag");
        assert_eq!(
            pieces,
            vec![
                Piece::Title { text: s("Deep"), level: 6 },
                Piece::Paragraph { text: s("####### Too deep #hashtag") },
            ]
        );
    }

    #[test]
    fn consecutive_bullets_form_one_list() {
        assert_eq!(
            extract("- a\n- b\n- c"),
            vec![Piece::UnorderedList { items: vec![s("a"), s("b"), s("c")] }]
        );
    }

    #[test]
    fn mixed_markers_stay_in_one_list() {
        assert_eq!(
            extract("* one\n+ two\n- three"),
            vec![Piece::UnorderedList { items: vec![s("one"), s("two"), s("three")] }]
        );
    }

    #[test]
    fn blank_line_splits_lists() {
        let pieces = extract("- a\n\n- b");
        assert_eq!(pieces.len(), 2);
    }

    #[test]
    fn dash_rule_is_not_a_bullet() {
        assert_eq!(extract("---"), vec![Piece::Paragraph { text: s("---") }]);
    }

    #[test]
    fn paragraph_lines_join_with_space() {
        assert_eq!(
            extract("first line\n  second line  \n\nnext"),
            vec![
                Piece::Paragraph { text: s("first line second line") },
                Piece::Paragraph { text: s("next") },
            ]
        );
    }

    #[test]
    fn list_then_text_closes_list() {
        assert_eq!(
            extract("- a\nafter"),
            vec![
                Piece::UnorderedList { items: vec![s("a")] },
                Piece::Paragraph { text: s("after") },
            ]
        );
    }

    #[test]
    fn fenced_code_keeps_lines_verbatim() {
        let md = "```python\n  x = 1\n\n# not a title\n```\nafter";
        assert_eq!(
            extract(md),
            vec![
                Piece::CodeBlock {
                    content: s("  x = 1\n\n# not a title"),
                    language: Some(s("python")),
                },
                Piece::Paragraph { text: s("after") },
            ]
        );
    }

    #[test]
    fn unterminated_code_block_closes_at_end() {
        assert_eq!(
            extract("intro\n~~~\nline 1\nline 2"),
            vec![
                Piece::Paragraph { text: s("intro") },
                Piece::CodeBlock { content: s("line 1\nline 2"), language: None },
            ]
        );
    }

    #[test]
    fn shorter_or_different_fence_does_not_close() {
        let pieces = extract("````\n```\n~~~~\n````");
        assert_eq!(
            pieces,
            vec![Piece::CodeBlock { content: s("```\n~~~~"), language: None }]
        );
    }

    #[test]
    fn corrupt_fence_degrades_to_unknown() {
        assert_eq!(
            extract("```rust`oops\ntext"),
            vec![
                Piece::Unknown { raw: s("```rust`oops") },
                Piece::Paragraph { text: s("text") },
            ]
        );
    }

    #[test]
    fn table_with_separator() {
        let md = "| Cap | Distance |\n|:---|---:|\n| N | 12 |\n| S | 4 |";
        assert_eq!(
            extract(md),
            vec![Piece::Table {
                rows: vec![
                    vec![s("Cap"), s("Distance")],
                    vec![s("N"), s("12")],
                    vec![s("S"), s("4")],
                ]
            }]
        );
    }

    #[test]
    fn table_without_trailing_pipe() {
        assert_eq!(
            extract("| a | b\n| 1 | 2"),
            vec![Piece::Table {
                rows: vec![vec![s("a"), s("b")], vec![s("1"), s("2")]]
            }]
        );
    }

    #[test]
    fn malformed_row_after_header_is_unknown() {
        let md = "| a | b |\n|---|---|\n| 1 | 2 | 3 |\n| 4 | 5 |";
        assert_eq!(
            extract(md),
            vec![
                Piece::Table { rows: vec![vec![s("a"), s("b")]] },
                Piece::Unknown { raw: s("| 1 | 2 | 3 |") },
                Piece::Table { rows: vec![vec![s("4"), s("5")]] },
            ]
        );
    }

    #[test]
    fn headerless_separator_is_unknown() {
        assert_eq!(
            extract("|---|---|"),
            vec![Piece::Unknown { raw: s("|---|---|") }]
        );
    }

    #[test]
    fn blank_line_closes_table() {
        let pieces = extract("| a |\n\n| b |");
        assert_eq!(pieces.len(), 2);
        assert!(pieces.iter().all(|p| matches!(p, Piece::Table { .. })));
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(extract("").is_empty());
        assert!(extract("\n   \n\t\n").is_empty());
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            extract("# Cap\r\n- a\r\n- b\r\n"),
            vec![
                Piece::Title { text: s("Cap"), level: 1 },
                Piece::UnorderedList { items: vec![s("a"), s("b")] },
            ]
        );
    }

    #[test]
    fn push_line_api_matches_extract() {
        let mut extractor = PieceExtractor::new();
        extractor.push_line("## Nav");
        extractor.push_line("- cap");
        assert_eq!(extractor.finish(), extract("## Nav\n- cap"));
    }
}
