//! # Spoonacular HTTP Client
//!
//! This module provides a direct HTTP client for the Spoonacular API, covering
//! the user handshake, recipe search, ingredient lookup and the meal-planner
//! shopping list.
//!
//! ## Modules
//!
//! - [`auth`] - User profile, credentials and the connect handshake
//! - [`client`] - HTTP client with one method per endpoint
//! - [`types`] - Request and response records
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_spoonacular::client::{SpoonacularClient, UserProfile};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let profile = UserProfile::new("cook", "Ada", "Lovelace", "ada@example.com");
//! let client = SpoonacularClient::connect("https://api.spoonacular.com", "api-key", &profile).await?;
//!
//! let search = client.search_recipes("pasta", &[], 5).await?;
//! println!("Found {} recipes", search.results.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod types;

pub use auth::{Credentials, UserProfile};
pub use client::{SpoonacularClient, DEFAULT_BASE_URL};
pub use types::*;
