//! Row types produced by the grocery operations.
//!
//! These are reshaped views of a single API response. None of them is kept
//! after the call that produced it returns.

use serde::Serialize;
use serde_json::Value;

use crate::client::types::{RecipeResult, ShoppingListEntry, ShoppingListResponse, WidgetIngredient};
use crate::error::{GroceryError, Result};

/// Converts US cents to dollars rounded to two decimal places.
///
/// Exact halves round to the even cent, so 12.5 cents is $0.12.
pub fn cents_to_usd(cents: f64) -> f64 {
    let dollars = cents / 100.0;
    (dollars * 100.0).round_ties_even() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    pub title: String,
    pub servings: u32,
    pub price_per_serving: f64,
    pub recipe_id: u64,
}

impl From<RecipeResult> for RecipeSummary {
    fn from(recipe: RecipeResult) -> Self {
        Self {
            title: recipe.title,
            servings: recipe.servings,
            price_per_serving: cents_to_usd(recipe.price_per_serving),
            recipe_id: recipe.id,
        }
    }
}

/// One ingredient of a recipe, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientEntry {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl From<WidgetIngredient> for IngredientEntry {
    fn from(ingredient: WidgetIngredient) -> Self {
        Self {
            name: ingredient.name,
            amount: ingredient.amount.metric.value,
            unit: ingredient.amount.metric.unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub cost: f64,
    pub item_id: u64,
}

impl From<ShoppingListEntry> for ShoppingListItem {
    fn from(entry: ShoppingListEntry) -> Self {
        Self {
            name: entry.name,
            amount: entry.measures.metric.amount,
            unit: entry.measures.metric.unit,
            cost: cents_to_usd(entry.cost),
            item_id: entry.id,
        }
    }
}

/// The user's shopping list flattened across aisles, in API order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
    pub total_cost: f64,
}

impl ShoppingList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_ids(&self) -> Vec<u64> {
        self.items.iter().map(|item| item.item_id).collect()
    }
}

impl From<ShoppingListResponse> for ShoppingList {
    fn from(response: ShoppingListResponse) -> Self {
        let items = response
            .aisles
            .into_iter()
            .flat_map(|aisle| aisle.items)
            .map(ShoppingListItem::from)
            .collect();

        Self {
            items,
            total_cost: cents_to_usd(response.cost),
        }
    }
}

/// Validates loosely typed item ids, as received from a tool call.
///
/// Every value must be a non-negative JSON integer. Strings, floats and
/// negatives reject the whole batch.
pub fn parse_item_ids(values: &[Value]) -> Result<Vec<u64>> {
    values
        .iter()
        .map(|value| {
            value.as_u64().ok_or_else(|| {
                GroceryError::validation(format!("Item IDs must all be integers, got {}", value))
            })
        })
        .collect()
}
