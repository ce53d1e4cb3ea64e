//! `attam extract`: shows how a markdown file splits into pieces.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use markdown::{Renderer, Trame, TrameBuilder};

pub fn run(path: &Path, json: bool) -> Result<()> {
    let trame = TrameBuilder::from_file(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&trame)?);
    } else {
        print!("{}", describe(&trame));
    }
    Ok(())
}

/// One block per piece: `[index] kind` followed by its text.
pub fn describe(trame: &Trame) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} pieces)",
        trame.title.as_deref().unwrap_or(&trame.origin),
        trame.piece_count()
    );
    for (index, piece) in trame.pieces.iter().enumerate() {
        let _ = writeln!(out, "\n[{index}] {}", piece.kind().as_str());
        out.push_str(&Renderer::to_plain_text(std::slice::from_ref(piece)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_each_piece() {
        let trame = TrameBuilder::from_string("t.md", "# Cap\n\n- a\n- b");
        let text = describe(&trame);
        assert!(text.starts_with("Cap (2 pieces)"));
        assert!(text.contains("[0] title"));
        assert!(text.contains("[1] unordered_list"));
    }

    #[test]
    fn reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nav.md");
        std::fs::write(&path, "para").unwrap();
        assert!(run(&path, true).is_ok());
        assert!(run(&dir.path().join("missing.md"), false).is_err());
    }
}
