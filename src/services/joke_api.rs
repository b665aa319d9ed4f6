//! Joke endpoint client

use async_trait::async_trait;
use tracing::debug;

use crate::widgets::joke::{Joke, JokeError, JokeSource};

/// Fetches one joke per call with a single unauthenticated GET.
///
/// No retry, no timeout, no backoff.
#[derive(Debug, Clone)]
pub struct HttpJokeSource {
    client: reqwest::Client,
    url: String,
}

impl HttpJokeSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JokeSource for HttpJokeSource {
    async fn fetch_joke(&self) -> Result<Joke, JokeError> {
        debug!("Requesting joke from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JokeError::Status(status.as_u16()));
        }

        Ok(response.json::<Joke>().await?)
    }
}
