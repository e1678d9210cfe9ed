//! Type definitions for the Spoonacular API.
//!
//! One typed record per endpoint payload. Fields this crate never reads are
//! left out and ignored by serde; fields it does read are required, so a
//! payload missing them fails to decode instead of producing partial rows.
//!
//! ## Key Types
//!
//! - [`ConnectRequest`] / [`ConnectResponse`] - user handshake
//! - [`RecipeSearchResponse`] - `complexSearch` results
//! - [`IngredientWidget`] - per-recipe ingredient breakdown
//! - [`ShoppingListResponse`] - aisles and items of the user's list
//! - [`AddItemRequest`] - free-text item added to the list
//!
//! ## API Compatibility
//!
//! Shopping-list item ids sometimes arrive as floats (`1400329.0`); see
//! [`ShoppingListEntry::id`].

use serde::{Deserialize, Serialize};

/// Payload for `POST /users/connect`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Handshake response. `username` is the canonical name Spoonacular assigned,
/// which may differ from the one requested.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub username: String,
    pub hash: String,
}

/// Error envelope Spoonacular returns, sometimes with a 200 status.
///
/// ```json
/// {"status": "failure", "code": 401, "message": "You are not authorized..."}
/// ```
#[derive(Debug, Deserialize)]
pub struct ApiFailure {
    pub status: String,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiFailure {
    pub fn is_failure(&self) -> bool {
        self.status.eq_ignore_ascii_case("failure")
    }
}

/// Response of `GET /recipes/complexSearch` with `addRecipeInformation=true`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSearchResponse {
    pub results: Vec<RecipeResult>,
    #[serde(default)]
    pub total_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResult {
    pub id: u64,
    pub title: String,
    pub servings: u32,
    /// Price in US cents, frequently fractional.
    pub price_per_serving: f64,
}

/// Response of `GET /recipes/{id}/ingredientWidget.json`.
#[derive(Debug, Deserialize)]
pub struct IngredientWidget {
    pub ingredients: Vec<WidgetIngredient>,
}

#[derive(Debug, Deserialize)]
pub struct WidgetIngredient {
    pub name: String,
    pub amount: WidgetAmount,
}

/// Only the metric branch is read; the `us` sibling is ignored.
#[derive(Debug, Deserialize)]
pub struct WidgetAmount {
    pub metric: WidgetMeasure,
}

#[derive(Debug, Deserialize)]
pub struct WidgetMeasure {
    pub value: f64,
    pub unit: String,
}

/// Body of `POST /mealplanner/{username}/shopping-list/items`.
///
/// Spoonacular parses the free-text `item` itself when `parse` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub item: String,
    pub parse: bool,
}

impl AddItemRequest {
    /// Composes `"{amount} {unit} {name}"`, skipping an empty unit.
    pub fn from_parts(amount: f64, unit: &str, name: &str) -> Self {
        let amount = amount.to_string();
        let item = [amount.as_str(), unit.trim(), name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        Self { item, parse: true }
    }
}

/// Response of `GET /mealplanner/{username}/shopping-list`.
#[derive(Debug, Deserialize)]
pub struct ShoppingListResponse {
    pub aisles: Vec<Aisle>,
    /// Total in US cents.
    pub cost: f64,
}

/// A store section grouping one or more items.
#[derive(Debug, Deserialize)]
pub struct Aisle {
    pub aisle: String,
    pub items: Vec<ShoppingListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ShoppingListEntry {
    /// Item id, coerced to an integer even when sent as an integral float.
    #[serde(deserialize_with = "deserialize_item_id")]
    pub id: u64,
    pub name: String,
    pub measures: Measures,
    /// Cost in US cents.
    pub cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct Measures {
    pub metric: MetricMeasure,
}

#[derive(Debug, Deserialize)]
pub struct MetricMeasure {
    pub amount: f64,
    pub unit: String,
}

fn deserialize_item_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ItemIdVisitor;

    impl<'de> Visitor<'de> for ItemIdVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integral item id")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
            u64::try_from(value).map_err(|_| E::custom(format!("negative item id {}", value)))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
                Ok(value as u64)
            } else {
                Err(E::custom(format!("item id {} is not an integer", value)))
            }
        }
    }

    deserializer.deserialize_any(ItemIdVisitor)
}
