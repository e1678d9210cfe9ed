use serde_json::Value;

use crate::client::{
    auth::{Credentials, UserProfile},
    types::AddItemRequest,
    SpoonacularClient,
};
use crate::error::{GroceryError, Result};
use crate::grocery::model::{parse_item_ids, IngredientEntry, RecipeSummary, ShoppingList};

/// Upper bound on rows returned by [`GroceryList::search_recipes`].
pub const MAX_SEARCH_RESULTS: u32 = 5;

/// A connected Spoonacular user and the operations on their shopping list.
///
/// Created once through the connect handshake and never modified afterwards.
/// The shopping list itself lives on the server: every operation that touches
/// it ends by fetching it again.
pub struct GroceryList {
    client: SpoonacularClient,
}

impl GroceryList {
    /// Connects `profile` under `api_key`.
    ///
    /// Fails with [`GroceryError::Authentication`] when the key is rejected;
    /// build a new session with a valid key to recover.
    pub async fn connect(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        profile: &UserProfile,
    ) -> Result<Self> {
        let client = SpoonacularClient::connect(base_url, api_key, profile).await?;
        Ok(Self { client })
    }

    pub fn username(&self) -> &str {
        self.client.credentials().username()
    }

    pub fn hash(&self) -> &str {
        self.client.credentials().hash()
    }

    pub fn credentials(&self) -> &Credentials {
        self.client.credentials()
    }

    /// Top recipes for `query` containing every ingredient in `include_ingredients`,
    /// in the popularity order Spoonacular returns.
    pub async fn search_recipes<S: AsRef<str>>(
        &self,
        query: &str,
        include_ingredients: &[S],
    ) -> Result<Vec<RecipeSummary>> {
        let include = include_ingredients
            .iter()
            .map(|ingredient| {
                let ingredient = ingredient.as_ref().trim();
                if ingredient.is_empty() {
                    Err(GroceryError::validation("Ingredients must be non-empty strings"))
                } else {
                    Ok(ingredient.to_string())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let response = self
            .client
            .search_recipes(query, &include, MAX_SEARCH_RESULTS)
            .await?;

        Ok(response
            .results
            .into_iter()
            .take(MAX_SEARCH_RESULTS as usize)
            .map(RecipeSummary::from)
            .collect())
    }

    /// Ingredients of `recipe_id` with metric amounts, in recipe order.
    pub async fn get_ingredients(&self, recipe_id: u64) -> Result<Vec<IngredientEntry>> {
        validate_recipe_id(recipe_id)?;

        let widget = self.client.get_ingredient_widget(recipe_id).await?;
        Ok(widget
            .ingredients
            .into_iter()
            .map(IngredientEntry::from)
            .collect())
    }

    /// Adds `"{amount} {unit} {name}"` to the list and returns the refreshed list.
    pub async fn add_ingredient(&self, name: &str, amount: f64, unit: &str) -> Result<ShoppingList> {
        if name.trim().is_empty() {
            return Err(GroceryError::validation("ingredient name must not be empty"));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(GroceryError::validation(format!(
                "amount must be a non-negative number but amount = {}",
                amount
            )));
        }

        let request = AddItemRequest::from_parts(amount, unit, name);
        self.client.add_shopping_list_item(&request).await?;

        self.get_shopping_list().await
    }

    /// Adds every ingredient of `recipe_id`, one call at a time in recipe
    /// order, then returns the refreshed list.
    ///
    /// A failed add is logged and skipped. An authentication failure stops the
    /// batch since no later call could succeed.
    pub async fn add_all_ingredients(&self, recipe_id: u64) -> Result<ShoppingList> {
        let ingredients = self.get_ingredients(recipe_id).await?;

        tracing::info!(
            "Adding {} ingredients of recipe {} to the shopping list",
            ingredients.len(),
            recipe_id
        );

        for ingredient in &ingredients {
            let request = AddItemRequest::from_parts(ingredient.amount, &ingredient.unit, &ingredient.name);
            match self.client.add_shopping_list_item(&request).await {
                Ok(()) => {}
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => tracing::warn!("Skipping '{}': {}", request.item, e),
            }
        }

        self.get_shopping_list().await
    }

    /// Fetches the whole list, flattened across aisles.
    pub async fn get_shopping_list(&self) -> Result<ShoppingList> {
        let response = self.client.get_shopping_list().await?;
        Ok(ShoppingList::from(response))
    }

    /// Deletes each item in order, then returns the refreshed list.
    ///
    /// Failures follow the same rule as [`GroceryList::add_all_ingredients`].
    pub async fn delete_items(&self, item_ids: &[u64]) -> Result<ShoppingList> {
        for &item_id in item_ids {
            match self.client.delete_shopping_list_item(item_id).await {
                Ok(()) => {}
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => tracing::warn!("Failed to delete item {}: {}", item_id, e),
            }
        }

        self.get_shopping_list().await
    }

    /// [`GroceryList::delete_items`] for untyped ids. The whole batch is
    /// validated before the first request, so one bad id sends nothing.
    pub async fn delete_item_values(&self, item_ids: &[Value]) -> Result<ShoppingList> {
        let item_ids = parse_item_ids(item_ids)?;
        self.delete_items(&item_ids).await
    }
}

fn validate_recipe_id(recipe_id: u64) -> Result<()> {
    if recipe_id == 0 {
        return Err(GroceryError::validation("recipe ID must be a positive integer"));
    }
    Ok(())
}
