//! Server configuration from environment variables.
//!
//! A `.env` file in the working directory is loaded first when present.

use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::client::{UserProfile, DEFAULT_BASE_URL};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

#[derive(Debug, Clone)]
pub struct Config {
    /// Spoonacular API root, without a trailing slash
    pub base_url: String,
    pub api_key: String,
    /// Profile connected at start-up
    pub profile: UserProfile,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_key = lookup("SPOONACULAR_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("SPOONACULAR_API_KEY environment variable is required")?;

        let base_url = var("SPOONACULAR_BASE_URL", DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let profile = UserProfile::new(
            var("SPOONACULAR_USERNAME", "grocery-list"),
            var("SPOONACULAR_FIRST_NAME", ""),
            var("SPOONACULAR_LAST_NAME", ""),
            var("SPOONACULAR_EMAIL", ""),
        );

        let bind_addr = var("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 127.0.0.1:3001")?;

        Ok(Self {
            base_url,
            api_key,
            profile,
            bind_addr,
        })
    }
}
