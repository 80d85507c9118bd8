//! Recipe search and step narration client.
//!
//! The crate talks to three endpoints (voice catalog, recipe search and
//! speech synthesis) and keeps what the user sees in a [`session::SessionState`].
//! [`app::RecipeApp`] wires the components together and exposes the user
//! actions.

pub mod app;
pub mod backend;
pub mod config_loader;
pub mod detail;
pub mod error;
pub mod models;
pub mod narration;
pub mod notify;
pub mod object_url;
pub mod search;
pub mod sequence;
pub mod session;
pub mod status_log;
pub mod voices;

pub use app::{Outcome, RecipeApp, UiAction};
pub use backend::{HttpBackend, RecipeBackend};
pub use config_loader::Settings;
pub use error::{ActionError, ApiError, InputError};
pub use models::{NarrationRequest, NarrationResult, Recipe, Voice};
