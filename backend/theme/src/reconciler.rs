//! Accessibility State Reconciler
//!
//! Owns the theme/font state of one page session together with the store it
//! persists to, the surface it is applied to, and every control bound to it.
//! Each state change renders all bound controls in one pass: a control is
//! active if and only if its value equals the current state.

use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::Result;
use tracing::{debug, warn};

use crate::resolve::{resolve_font, resolve_theme};
use crate::state::{AccessibilityState, FontType, Theme};
use crate::store::{PreferenceStore, FONT_TYPE_KEY, THEME_KEY};
use crate::surface::{Binding, Control, Surface};

/// Which preference changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Theme,
    Font,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Theme => "theme",
            ChangeKind::Font => "font",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for SubscriptionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

type Subscriber = Box<dyn FnMut(ChangeKind, &str) -> Result<()>>;

#[derive(Debug, Clone)]
pub struct ReconcilerOptions {
    pub fallback_theme: Theme,
    /// Theme picked when the platform switches to a dark color scheme.
    pub dark_theme: Theme,
    /// Theme picked when the platform switches to a light color scheme.
    pub light_theme: Theme,
}

impl Default for ReconcilerOptions {
    fn default() -> Self {
        Self {
            fallback_theme: Theme::fallback(),
            dark_theme: Theme::new("night").unwrap_or_else(|_| Theme::fallback()),
            light_theme: Theme::new("day").unwrap_or_else(|_| Theme::fallback()),
        }
    }
}

pub struct Reconciler<S: PreferenceStore, F: Surface> {
    store: S,
    surface: F,
    options: ReconcilerOptions,
    state: AccessibilityState,
    page_default: Option<Theme>,
    enforced: Option<Theme>,
    controls: Vec<Box<dyn Control>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: PreferenceStore, F: Surface> Reconciler<S, F> {
    /// Resolves the initial state and applies it to the surface.
    pub fn new(store: S, mut surface: F, options: ReconcilerOptions) -> Self {
        let page_default = surface
            .default_theme_attribute()
            .and_then(|value| Theme::new(&value).ok());
        let theme = resolve_theme(
            store.get(THEME_KEY).as_deref(),
            surface.theme_attribute().as_deref(),
            page_default.as_ref().map(Theme::as_str),
            &options.fallback_theme,
        );
        let font_type = resolve_font(store.get(FONT_TYPE_KEY).as_deref());

        surface.apply_theme(&theme);
        surface.apply_fonts(&font_type.stack());
        debug!(theme = %theme, font = %font_type, "Accessibility state initialized");

        Self {
            store,
            surface,
            options,
            state: AccessibilityState { theme, font_type },
            page_default,
            enforced: None,
            controls: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.state.theme
    }

    pub fn font_type(&self) -> FontType {
        self.state.font_type
    }

    pub fn state(&self) -> &AccessibilityState {
        &self.state
    }

    pub fn enforced_theme(&self) -> Option<&Theme> {
        self.enforced.as_ref()
    }

    pub fn page_default_theme(&self) -> Option<&Theme> {
        self.page_default.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &F {
        &self.surface
    }

    /// User theme choice. Returns `false` while a theme is enforced.
    ///
    /// Choosing the page's declared default clears the persisted value so the
    /// page default keeps applying on later visits.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if let Some(enforced) = &self.enforced {
            debug!(requested = %theme, enforced = %enforced, "Theme change refused while enforced");
            return false;
        }
        if self.change_theme(theme.clone()) {
            if self.page_default.as_ref() == Some(&theme) {
                self.store.remove(THEME_KEY);
            } else {
                self.store.set(THEME_KEY, theme.as_str());
            }
            self.notify(ChangeKind::Theme, theme.as_str());
        }
        true
    }

    /// User font choice. Always persisted on change.
    pub fn set_font(&mut self, font_type: FontType) -> bool {
        if self.state.font_type == font_type {
            self.render();
            return true;
        }
        self.state.font_type = font_type;
        self.surface.apply_fonts(&font_type.stack());
        self.store.set(FONT_TYPE_KEY, font_type.as_str());
        self.render();
        self.notify(ChangeKind::Font, font_type.as_str());
        true
    }

    /// Forces `theme` and locks the theme controls until
    /// [`Reconciler::clear_enforced_theme`]. The user's persisted choice is kept.
    pub fn enforce_theme(&mut self, theme: Theme, message: Option<&str>) {
        self.enforced = Some(theme.clone());
        // Renders even when the theme is unchanged, which disables the controls.
        if self.change_theme(theme.clone()) {
            self.notify(ChangeKind::Theme, theme.as_str());
        }
        if let Some(message) = message {
            self.surface.notify(message);
        }
    }

    /// Unlocks the theme controls. The current theme stays.
    pub fn clear_enforced_theme(&mut self) {
        if self.enforced.take().is_some() {
            self.render();
        }
    }

    /// Platform light/dark preference changed. Only followed when the user has
    /// no persisted theme and nothing is enforced; never persisted.
    pub fn color_scheme_changed(&mut self, prefers_dark: bool) -> bool {
        if self.enforced.is_some() || self.store.get(THEME_KEY).is_some() {
            return false;
        }
        let theme = if prefers_dark {
            self.options.dark_theme.clone()
        } else {
            self.options.light_theme.clone()
        };
        if self.change_theme(theme.clone()) {
            self.notify(ChangeKind::Theme, theme.as_str());
        }
        true
    }

    /// Registers a control and renders it right away.
    pub fn bind_control(&mut self, mut control: Box<dyn Control>) {
        self.render_control(control.as_mut());
        self.controls.push(control);
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Renders every bound control from the current state.
    pub fn render(&mut self) {
        let state = &self.state;
        let locked = self.enforced.is_some();
        for control in self.controls.iter_mut() {
            sync_control(state, locked, control.as_mut());
        }
    }

    pub fn subscribe<C>(&mut self, callback: C) -> SubscriptionId
    where
        C: FnMut(ChangeKind, &str) -> Result<()> + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Updates, applies and renders a new theme. `false` if it was already current.
    fn change_theme(&mut self, theme: Theme) -> bool {
        if self.state.theme == theme {
            self.render();
            return false;
        }
        self.surface.apply_theme(&theme);
        self.state.theme = theme;
        self.render();
        true
    }

    fn render_control(&self, control: &mut dyn Control) {
        sync_control(&self.state, self.enforced.is_some(), control);
    }

    fn notify(&mut self, kind: ChangeKind, value: &str) {
        for (id, callback) in self.subscribers.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| callback(kind, value))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(subscription = id.0, kind = kind.as_str(), error = %e, "Subscriber failed");
                }
                Err(_) => {
                    warn!(subscription = id.0, kind = kind.as_str(), "Subscriber panicked");
                }
            }
        }
    }
}

fn sync_control(state: &AccessibilityState, theme_locked: bool, control: &mut dyn Control) {
    match control.binding() {
        Binding::Theme(theme) => {
            control.set_active(theme == state.theme);
            control.set_enabled(!theme_locked);
        }
        Binding::Font(font_type) => {
            control.set_active(font_type == state.font_type);
        }
    }
}
