//! Attam HTTP server
//!
//! Serves the landing and showcase pages, renders trames (markdown and images
//! under the trames directory), guards the admin area with a signed session
//! cookie and hosts the static front-end dependencies.

pub mod admin;
pub mod assets;
pub mod auth;
pub mod context;
pub mod domain;
pub mod error;
pub mod health;
pub mod jwt;
pub mod pages;
pub mod render;
pub mod server;
pub mod state;
pub mod trame;

pub use assets::{copy_dependencies, AssetSource, AssetUrls};
pub use error::AppError;
pub use server::{build_router, start_server};
pub use state::AppState;
