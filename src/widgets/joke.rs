//! Random joke display

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

/// Text shown whenever a fetch fails for any reason
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch joke. Please try again.";

/// Placeholder shown before the first fetch completes
pub const LOADING_MESSAGE: &str = "Loading...";

/// Response body of the joke endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

impl Joke {
    pub fn display(&self) -> String {
        format!("{} - {}", self.setup, self.punchline)
    }
}

#[derive(Error, Debug)]
pub enum JokeError {
    /// Connection, transport or body decoding failure
    #[error("Joke request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Joke endpoint returned status {0}")]
    Status(u16),

    #[error("Joke source unavailable: {0}")]
    Unavailable(String),
}

/// Where jokes come from
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn fetch_joke(&self) -> Result<Joke, JokeError>;
}

/// The text currently on the joke widget
#[derive(Debug, Clone, Default)]
pub struct JokeBoard {
    text: String,
}

impl JokeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_loaded(&self) -> bool {
        !self.text.is_empty()
    }

    /// Replace the text with the outcome of one fetch
    pub fn apply(&mut self, outcome: Result<Joke, JokeError>) -> &str {
        self.text = display_text(outcome);
        &self.text
    }

    pub fn view(&self) -> JokeView {
        JokeView {
            loaded: self.is_loaded(),
            text: if self.is_loaded() {
                self.text.clone()
            } else {
                LOADING_MESSAGE.to_string()
            },
        }
    }
}

fn display_text(outcome: Result<Joke, JokeError>) -> String {
    match outcome {
        Ok(joke) => {
            info!("Fetched a new joke");
            joke.display()
        }
        Err(e) => {
            error!("Error fetching joke: {}", e);
            FETCH_FAILED_MESSAGE.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeView {
    pub loaded: bool,
    pub text: String,
}
