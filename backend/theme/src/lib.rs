//! `attam-theme` — theme and font preferences for Attam pages.
//!
//! Provides:
//! - Typed preferences (`Theme`, `FontType`) and their persisted keys
//! - Pure resolution of the initial state from storage, page and fallback
//! - `Reconciler`, which keeps registered controls in line with the state
//! - A browser binding over `web-sys` (feature `web`)

pub mod reconciler;
pub mod resolve;
pub mod state;
pub mod store;
pub mod surface;
#[cfg(feature = "web")]
pub mod web;

pub use reconciler::{ChangeKind, Reconciler, ReconcilerOptions, SubscriptionId};
pub use resolve::{resolve_font, resolve_theme};
pub use state::{AccessibilityState, FontStack, FontType, InvalidTheme, Theme, FALLBACK_THEME};
pub use store::{MemoryStore, PreferenceStore, FONT_TYPE_KEY, THEME_KEY};
pub use surface::{Binding, Control, MemorySurface, Surface};
