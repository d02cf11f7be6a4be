use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::{AppError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub llm: LlmConfig,
}

/// Chat-completion settings. The credential, endpoint, model and sampling
/// parameters all come from the environment rather than living in the
/// client code.
#[derive(Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let api_key = env::var("LLM_API_KEY")
            .map_err(|_| AppError::ConfigError("LLM_API_KEY is not set".to_string()))?;
        let endpoint = env::var("LLM_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = parse_var("LLM_TEMPERATURE", 0.3)?;
        let max_tokens = parse_var("LLM_MAX_TOKENS", 1000)?;
        let top_p = parse_var("LLM_TOP_P", 0.9)?;

        // Server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = parse_var("PORT", 3000)?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            llm: LlmConfig {
                endpoint,
                api_key,
                model,
                temperature,
                max_tokens,
                top_p,
            },
        })
    }
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_var_yields_default() {
        let port: u16 = parse_var("SCRAPE_CHAT_TEST_UNSET_PORT", 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn set_var_is_parsed() {
        unsafe { env::set_var("SCRAPE_CHAT_TEST_PORT", "8080") };
        let port: u16 = parse_var("SCRAPE_CHAT_TEST_PORT", 3000).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn malformed_var_is_a_config_error() {
        unsafe { env::set_var("SCRAPE_CHAT_TEST_BAD_PORT", "not-a-port") };
        let result: Result<u16> = parse_var("SCRAPE_CHAT_TEST_BAD_PORT", 3000);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
