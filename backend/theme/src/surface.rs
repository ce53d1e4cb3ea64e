//! The visual side: page attributes and preference controls.

use crate::state::{FontStack, FontType, Theme};

/// The page the preferences are applied to.
pub trait Surface {
    /// Theme currently set on the page (`data-theme`).
    fn theme_attribute(&self) -> Option<String>;
    /// Default theme the page declares (`data-default-theme`).
    fn default_theme_attribute(&self) -> Option<String>;
    fn apply_theme(&mut self, theme: &Theme);
    fn apply_fonts(&mut self, fonts: &FontStack);
    /// Shows a transient message to the user.
    fn notify(&mut self, message: &str);
}

/// What a control selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Theme(Theme),
    Font(FontType),
}

/// A radio input or button bound to one preference value.
pub trait Control {
    fn binding(&self) -> Binding;
    fn set_active(&mut self, active: bool);
    fn set_enabled(&mut self, enabled: bool);
}

/// Surface kept in memory, recording everything applied to it.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    pub theme_attribute: Option<String>,
    pub default_theme: Option<String>,
    pub fonts: Option<FontStack>,
    pub applied_themes: Vec<String>,
    pub notifications: Vec<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_theme(mut self, theme: &str) -> Self {
        self.default_theme = Some(theme.to_string());
        self
    }

    pub fn with_theme_attribute(mut self, theme: &str) -> Self {
        self.theme_attribute = Some(theme.to_string());
        self
    }
}

impl Surface for MemorySurface {
    fn theme_attribute(&self) -> Option<String> {
        self.theme_attribute.clone()
    }

    fn default_theme_attribute(&self) -> Option<String> {
        self.default_theme.clone()
    }

    fn apply_theme(&mut self, theme: &Theme) {
        self.theme_attribute = Some(theme.to_string());
        self.applied_themes.push(theme.to_string());
    }

    fn apply_fonts(&mut self, fonts: &FontStack) {
        self.fonts = Some(*fonts);
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}
