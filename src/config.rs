//! Service configuration

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// SEO website analysis service
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "SEO website analysis service backed by a local generative model", long_about = None)]
pub struct Config {
    /// Address to bind the API server on
    #[arg(long, env = "SITELENS_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Base URL of the OpenAI-compatible model backend
    #[arg(long, env = "MODEL_BASE_URL", default_value = "http://127.0.0.1:8080")]
    pub model_url: String,

    /// Model name passed to the backend
    #[arg(long, env = "MODEL_NAME", default_value = "mistral-7b-instruct")]
    pub model: String,

    /// Timeout for page fetches, in seconds
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Timeout for model inference calls, in seconds
    #[arg(long, default_value_t = 120)]
    pub model_timeout_secs: u64,

    /// Response cache time-to-live, in seconds
    #[arg(long, default_value_t = 3600)]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached responses
    #[arg(long, default_value_t = 1024)]
    pub cache_capacity: usize,
}

impl Config {
    /// Fetch timeout as a [`Duration`]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Model timeout as a [`Duration`]
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Cache TTL as a [`Duration`]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["sitelens"]);
        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.cache_capacity, 1024);
        assert_eq!(config.model, "mistral-7b-instruct");
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from([
            "sitelens",
            "--bind",
            "0.0.0.0:9000",
            "--fetch-timeout-secs",
            "5",
        ]);
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
    }
}
