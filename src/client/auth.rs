//! User handshake with the Spoonacular API.
//!
//! Spoonacular has no password login. A client "connects" a user profile
//! under its API key and receives a canonical username plus a hash. Both are
//! required by every meal-planner endpoint, including the shopping list.

use std::fmt;
use std::time::Duration;

use reqwest::Client;

use crate::client::client::read_json;
use crate::client::types::{ConnectRequest, ConnectResponse};
use crate::error::{GroceryError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Profile sent to `POST /users/connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserProfile {
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// Identity returned by the handshake.
///
/// Immutable once issued; the hash never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    hash: String,
}

impl Credentials {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("hash", &"<redacted>")
            .finish()
    }
}

/// Connects `profile` under `api_key` and returns the issued credentials.
///
/// A 401, or a `{"status":"failure","code":401}` body, becomes
/// [`GroceryError::Authentication`]. Nothing is retried.
pub async fn connect(
    client: &Client,
    base_url: &str,
    api_key: &str,
    profile: &UserProfile,
) -> Result<Credentials> {
    if api_key.trim().is_empty() {
        return Err(GroceryError::validation("API key must not be empty"));
    }
    if profile.username.trim().is_empty() {
        return Err(GroceryError::validation("username must not be empty"));
    }

    tracing::info!("Connecting Spoonacular user: {}", profile.username);

    let request = ConnectRequest {
        username: profile.username.clone(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        email: profile.email.clone(),
    };
    let connect_url = format!("{}/users/connect", base_url);

    tracing::debug!("Making connect request to: {}", connect_url);

    let response = client
        .post(&connect_url)
        .query(&[("apiKey", api_key)])
        .json(&request)
        .timeout(CONNECT_TIMEOUT)
        .send()
        .await
        .map_err(|e| {
            let error = GroceryError::from(e);
            tracing::error!("Network error during connect: {}", error);
            error
        })?;

    let connected: ConnectResponse = read_json(response, "connect user").await?;

    tracing::info!("Connected as Spoonacular user: {}", connected.username);

    Ok(Credentials {
        username: connected.username,
        hash: connected.hash,
    })
}
