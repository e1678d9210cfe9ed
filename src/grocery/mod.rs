//! # Grocery Session
//!
//! [`GroceryList`] is the connected user session. Each operation makes one
//! remote call (or a short sequential loop of them) and returns typed rows
//! that render as a fixed-column [`Table`](table::Table).
//!
//! ## Modules
//!
//! - [`list`] - the session and its operations
//! - [`model`] - row types and cents-to-dollars rounding
//! - [`table`] - text and JSON table rendering
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_spoonacular::client::UserProfile;
//! use mcp_spoonacular::grocery::{GroceryList, Tabular};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let profile = UserProfile::new("cook", "Ada", "Lovelace", "ada@example.com");
//! let session = GroceryList::connect("https://api.spoonacular.com", "api-key", &profile).await?;
//!
//! let recipes = session.search_recipes("soup", &["chicken", "carrot"]).await?;
//! println!("{}", recipes.to_table());
//!
//! let list = session.add_all_ingredients(recipes[0].recipe_id).await?;
//! println!("{}", list.to_table());
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod model;
pub mod table;

pub use list::{GroceryList, MAX_SEARCH_RESULTS};
pub use model::*;
pub use table::{Cell, Table, Tabular};
