//! Initial state resolution.
//!
//! Theme: persisted choice, then the `data-theme` attribute already on the
//! page, then the page's declared default, then the fallback. Font: persisted
//! choice, then [`FontType::Default`]. Invalid values are skipped.

use crate::state::{FontType, Theme};

pub fn resolve_theme(
    persisted: Option<&str>,
    dom_attribute: Option<&str>,
    page_default: Option<&str>,
    fallback: &Theme,
) -> Theme {
    [persisted, dom_attribute, page_default]
        .into_iter()
        .flatten()
        .find_map(|candidate| Theme::new(candidate).ok())
        .unwrap_or_else(|| fallback.clone())
}

pub fn resolve_font(persisted: Option<&str>) -> FontType {
    persisted
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> Theme {
        Theme::fallback()
    }

    #[test]
    fn persisted_wins() {
        let theme = resolve_theme(Some("night"), Some("day"), Some("pan-light"), &fallback());
        assert_eq!(theme.as_str(), "night");
    }

    #[test]
    fn dom_before_page_default() {
        let theme = resolve_theme(None, Some("day"), Some("pan-light"), &fallback());
        assert_eq!(theme.as_str(), "day");
    }

    #[test]
    fn page_default_before_fallback() {
        let theme = resolve_theme(None, None, Some("pan-light"), &fallback());
        assert_eq!(theme.as_str(), "pan-light");
    }

    #[test]
    fn fallback_when_nothing_usable() {
        let theme = resolve_theme(Some(""), Some("bad value"), None, &fallback());
        assert_eq!(theme.as_str(), "anchor");
    }

    #[test]
    fn font_resolution() {
        assert_eq!(resolve_font(Some("dyslexic")), FontType::Dyslexic);
        assert_eq!(resolve_font(Some("garbage")), FontType::Default);
        assert_eq!(resolve_font(None), FontType::Default);
    }
}
