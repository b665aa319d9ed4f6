//! Widget Desk - A state-managed HTTP server hosting small single-screen widgets
//!
//! Each widget (countdown timer, number guessing game, random joke, tip
//! calculator) keeps its own in-memory session and is driven through JSON
//! endpoints that return a rendered view of that session.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod widgets;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::WidgetError;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
