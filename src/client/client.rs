use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::client::{
    auth::{self, Credentials, UserProfile},
    types::*,
};
use crate::error::{GroceryError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Typed access to the Spoonacular endpoints this crate uses.
///
/// Holds the API key and the credentials issued by the connect handshake.
/// Nothing returned by the API is kept; every call goes to the network.
pub struct SpoonacularClient {
    base_url: String,
    api_key: String,
    client: Client,
    credentials: Credentials,
}

impl SpoonacularClient {
    pub async fn connect(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        profile: &UserProfile,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let api_key = api_key.into();
        let client = Client::new();
        let credentials = auth::connect(&client, &base_url, &api_key, profile).await?;

        Ok(Self {
            base_url,
            api_key,
            client,
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn shopping_list_url(&self) -> String {
        format!(
            "{}/mealplanner/{}/shopping-list",
            self.base_url,
            urlencoding::encode(self.credentials.username())
        )
    }

    fn user_params(&self) -> [(&str, &str); 2] {
        [
            ("apiKey", self.api_key.as_str()),
            ("hash", self.credentials.hash()),
        ]
    }

    // Recipe operations
    pub async fn search_recipes(
        &self,
        query: &str,
        include_ingredients: &[String],
        limit: u32,
    ) -> Result<RecipeSearchResponse> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let limit = limit.to_string();

        let mut params = vec![("apiKey", self.api_key.as_str()), ("query", query)];
        let include = include_ingredients.join(",");
        if !include.is_empty() {
            params.push(("includeIngredients", include.as_str()));
        }
        params.push(("addRecipeInformation", "true"));
        params.push(("sort", "popularity"));
        params.push(("number", limit.as_str()));

        tracing::debug!("Searching recipes: query={:?} include={:?}", query, include);

        let response = self.client.get(&url).query(&params).send().await?;
        let search: RecipeSearchResponse = read_json(response, "search recipes").await?;

        tracing::debug!(
            "Recipe search returned {} of {:?} results",
            search.results.len(),
            search.total_results
        );
        Ok(search)
    }

    pub async fn get_ingredient_widget(&self, recipe_id: u64) -> Result<IngredientWidget> {
        let url = format!("{}/recipes/{}/ingredientWidget.json", self.base_url, recipe_id);

        tracing::debug!("Making request to get ingredients: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        read_json(response, "get ingredients").await
    }

    // Shopping list operations
    pub async fn get_shopping_list(&self) -> Result<ShoppingListResponse> {
        let url = self.shopping_list_url();

        let response = self
            .client
            .get(&url)
            .query(&self.user_params())
            .send()
            .await?;

        read_json(response, "get shopping list").await
    }

    pub async fn add_shopping_list_item(&self, request: &AddItemRequest) -> Result<()> {
        let url = format!("{}/items", self.shopping_list_url());

        tracing::debug!("Adding shopping list item: {}", request.item);

        let response = self
            .client
            .post(&url)
            .query(&self.user_params())
            .json(request)
            .send()
            .await?;

        check_status(response, "add shopping list item").await
    }

    pub async fn delete_shopping_list_item(&self, item_id: u64) -> Result<()> {
        let url = format!("{}/items/{}", self.shopping_list_url(), item_id);

        tracing::debug!("Deleting shopping list item: {}", item_id);

        let response = self
            .client
            .delete(&url)
            .query(&self.user_params())
            .send()
            .await?;

        check_status(response, "delete shopping list item").await
    }
}

/// Decodes a successful response body as `T`.
///
/// Status and failure-envelope handling is shared with [`check_status`]; a
/// body that does not match `T` is a [`GroceryError::Validation`].
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    operation: &'static str,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    classify(status, &body, operation)?;

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Failed to parse {} response: {}", operation, e);
        GroceryError::validation(format!("unexpected {} response: {}", operation, e))
    })
}

pub(crate) async fn check_status(response: Response, operation: &'static str) -> Result<()> {
    let status = response.status();
    let body = response.text().await?;
    classify(status, &body, operation)
}

fn classify(status: StatusCode, body: &str, operation: &'static str) -> Result<()> {
    tracing::debug!("{} response status: {}", operation, status);

    let failure = serde_json::from_str::<ApiFailure>(body)
        .ok()
        .filter(ApiFailure::is_failure);

    if status == StatusCode::UNAUTHORIZED {
        let message = failure
            .and_then(|f| f.message)
            .unwrap_or_else(|| body.to_string());
        tracing::error!("{} rejected as unauthorized: {}", operation, message);
        return Err(GroceryError::Authentication(message));
    }

    if !status.is_success() {
        tracing::error!("Failed to {} with status {}: {}", operation, status, body);
        return Err(GroceryError::Api {
            operation,
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    match failure {
        Some(ApiFailure {
            code: Some(401),
            message,
            ..
        }) => {
            let message = message.unwrap_or_else(|| "unauthorized".to_string());
            tracing::error!("{} rejected as unauthorized: {}", operation, message);
            Err(GroceryError::Authentication(message))
        }
        Some(failure) => {
            tracing::error!("{} reported failure: {:?}", operation, failure);
            Err(GroceryError::Api {
                operation,
                status: failure.code.unwrap_or_else(|| status.as_u16()),
                body: failure.message.unwrap_or_default(),
            })
        }
        None => Ok(()),
    }
}
