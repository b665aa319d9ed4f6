//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

/// Public endpoint returning `{ "setup": ..., "punchline": ... }`
pub const DEFAULT_JOKE_URL: &str = "https://official-joke-api.appspot.com/random_joke";

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "widget-desk")]
#[command(about = "A state-managed HTTP server hosting small single-screen widgets")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Endpoint the joke widget fetches from
    #[arg(long, default_value = DEFAULT_JOKE_URL)]
    pub joke_url: String,

    /// Countdown tick period in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Countdown tick period, never shorter than one millisecond
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = Config::try_parse_from(["widget-desk"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.joke_url, DEFAULT_JOKE_URL);
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn zero_tick_is_clamped() {
        let config = Config::try_parse_from(["widget-desk", "--tick-ms", "0", "-v"]).unwrap();
        assert_eq!(config.tick_period(), Duration::from_millis(1));
        assert_eq!(config.log_level(), "debug");
    }
}
