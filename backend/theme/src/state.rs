//! Preference types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Theme used when nothing else is known.
pub const FALLBACK_THEME: &str = "anchor";

/// Returned when a string is not a usable theme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid theme name: {0:?}")]
pub struct InvalidTheme(pub String);

/// A theme name as used in `data-theme` (daisyUI theme identifiers).
///
/// Non-empty, ASCII alphanumerics, `-` and `_` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Theme(String);

impl Theme {
    pub fn new(name: &str) -> Result<Self, InvalidTheme> {
        let name = name.trim();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(InvalidTheme(name.to_string()))
        }
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_THEME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Theme {
    type Err = InvalidTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Theme {
    type Error = InvalidTheme;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.0
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Font family set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    #[default]
    Default,
    Dyslexic,
}

impl FontType {
    pub fn as_str(self) -> &'static str {
        match self {
            FontType::Default => "default",
            FontType::Dyslexic => "dyslexic",
        }
    }

    /// Concrete fonts for each logical role.
    pub fn stack(self) -> FontStack {
        match self {
            FontType::Default => FontStack {
                sans: "'Outfit', sans-serif",
                body: "'Lexend', sans-serif",
                heading: "'EB Garamond', serif",
            },
            FontType::Dyslexic => FontStack {
                sans: "'OpenDyslexic', sans-serif",
                body: "'OpenDyslexic', sans-serif",
                heading: "'OpenDyslexic', sans-serif",
            },
        }
    }
}

impl FromStr for FontType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" => Ok(FontType::Default),
            "dyslexic" => Ok(FontType::Dyslexic),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FontType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font reference per role, applied as CSS custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontStack {
    pub sans: &'static str,
    pub body: &'static str,
    pub heading: &'static str,
}

impl FontStack {
    /// `(css variable, value)` pairs.
    pub fn css_variables(&self) -> [(&'static str, &'static str); 3] {
        [
            ("--font-sans", self.sans),
            ("--font-body", self.body),
            ("--font-heading", self.heading),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityState {
    pub theme: Theme,
    pub font_type: FontType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names() {
        assert_eq!(Theme::new(" pan-light ").unwrap().as_str(), "pan-light");
        assert!(Theme::new("").is_err());
        assert!(Theme::new("night; color: red").is_err());
        assert_eq!(Theme::fallback().as_str(), FALLBACK_THEME);
    }

    #[test]
    fn font_type_strings() {
        assert_eq!("dyslexic".parse::<FontType>(), Ok(FontType::Dyslexic));
        assert!("comic".parse::<FontType>().is_err());
        assert_eq!(FontType::Default.to_string(), "default");
    }

    #[test]
    fn dyslexic_stack_uses_one_family() {
        let stack = FontType::Dyslexic.stack();
        assert!(stack
            .css_variables()
            .iter()
            .all(|(_, v)| v.contains("OpenDyslexic")));
    }
}
