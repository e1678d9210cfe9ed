//! # Spoonacular Grocery MCP Library
//!
//! This library wraps the Spoonacular recipe API as a grocery-list session and
//! exposes it through the Model Context Protocol (MCP). It consists of these
//! components:
//!
//! ## Client Module
//!
//! The [`client`] module is a direct HTTP client for the Spoonacular API: the
//! user connect handshake, recipe search, ingredient widgets and the
//! meal-planner shopping list.
//!
//! ## Grocery Module
//!
//! The [`grocery`] module holds [`GroceryList`], the connected session. Its
//! operations reshape API payloads into fixed-column tables.
//!
//! ## Server Module
//!
//! The [`server`] module implements an MCP server that exposes each grocery
//! operation as a tool.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use mcp_spoonacular::{GroceryList, GroceryMcpServer, UserProfile};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let profile = UserProfile::new("cook", "Ada", "Lovelace", "ada@example.com");
//! let session = GroceryList::connect("https://api.spoonacular.com", "api-key", &profile).await?;
//!
//! // Use the session directly
//! let list = session.get_shopping_list().await?;
//!
//! // Or serve it over MCP
//! let server = GroceryMcpServer::new(Arc::new(session));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod grocery;
pub mod server;

pub use client::{SpoonacularClient, UserProfile};
pub use error::{GroceryError, Result};
pub use grocery::GroceryList;
pub use server::GroceryMcpServer;
