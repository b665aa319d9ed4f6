//! External service access
//!
//! This module contains the clients for services outside the process.

pub mod joke_api;

// Re-export main types
pub use joke_api::HttpJokeSource;
