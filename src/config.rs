use std::str::FromStr;

use crate::errors::CustomError;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080,http://localhost:5173";

pub struct Config {
    pub host: String,
    pub port: u16,
    pub alchemy_api_key: String,
    pub alchemy_rpc_url: Option<String>,
    pub metadata_concurrency: usize,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, CustomError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CustomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let alchemy_rpc_url = lookup("ALCHEMY_RPC_URL").filter(|url| !url.trim().is_empty());
        let alchemy_api_key = lookup("ALCHEMY_API_KEY").unwrap_or_default();
        if alchemy_api_key.trim().is_empty() && alchemy_rpc_url.is_none() {
            return Err(CustomError::ConfigError(
                "ALCHEMY_API_KEY is not set".to_string(),
            ));
        }

        let metadata_concurrency = parse_or(&lookup, "METADATA_CONCURRENCY", 1usize)?;
        if metadata_concurrency == 0 {
            return Err(CustomError::ConfigError(
                "METADATA_CONCURRENCY must be at least 1".to_string(),
            ));
        }

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080u16)?,
            alchemy_api_key,
            alchemy_rpc_url,
            metadata_concurrency,
            allowed_origins,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, CustomError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| CustomError::ConfigError(format!("Failed to parse {key}: {value:?}"))),
        None => Ok(default),
    }
}
