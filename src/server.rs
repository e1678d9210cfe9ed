use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde_json::json;

use crate::error::GroceryError;
use crate::grocery::{GroceryList, Table, Tabular};

// Parameter structs for tools
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchRecipesParams {
    pub query: String,
    /// Ingredients every returned recipe must use
    #[serde(default)]
    pub include_ingredients: Vec<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RecipeIdParams {
    pub recipe_id: u64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddIngredientParams {
    pub name: String,
    pub amount: f64,
    /// Unit of `amount`, e.g. g, ml, oz or tbsp
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DeleteItemsParams {
    /// Shopping-list item IDs; all must be integers
    pub item_ids: Vec<serde_json::Value>,
}

/// MCP front end over one connected [`GroceryList`].
///
/// The session is shared read-only between connections; it is never
/// re-authenticated or mutated.
#[derive(Clone)]
pub struct GroceryMcpServer {
    session: Arc<GroceryList>,
    tool_router: ToolRouter<GroceryMcpServer>,
}

#[tool_router]
impl GroceryMcpServer {
    pub fn new(session: Arc<GroceryList>) -> Self {
        Self {
            session,
            tool_router: Self::tool_router(),
        }
    }

    pub fn session(&self) -> &GroceryList {
        &self.session
    }

    // Recipe tools
    #[tool(description = "Search the five most popular recipes matching a query and required ingredients")]
    async fn search_recipes(
        &self,
        Parameters(params): Parameters<SearchRecipesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: search_recipes {:?}", params);

        let result = self
            .session
            .search_recipes(&params.query, params.include_ingredients.as_slice())
            .await;
        table_result("search recipes", result.map(|recipes| recipes.to_table()))
    }

    #[tool(description = "List the ingredients of a recipe with metric amounts")]
    async fn get_ingredients(
        &self,
        Parameters(params): Parameters<RecipeIdParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: get_ingredients {}", params.recipe_id);

        let result = self.session.get_ingredients(params.recipe_id).await;
        table_result("get ingredients", result.map(|ingredients| ingredients.to_table()))
    }

    // Shopping list tools
    #[tool(description = "Add one ingredient to the shopping list and return the updated list")]
    async fn add_ingredient(
        &self,
        Parameters(params): Parameters<AddIngredientParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: add_ingredient {:?}", params);

        let result = self
            .session
            .add_ingredient(&params.name, params.amount, &params.unit)
            .await;
        table_result("add ingredient", result.map(|list| list.to_table()))
    }

    #[tool(description = "Add every ingredient of a recipe to the shopping list and return the updated list")]
    async fn add_all_ingredients(
        &self,
        Parameters(params): Parameters<RecipeIdParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: add_all_ingredients {}", params.recipe_id);

        let result = self.session.add_all_ingredients(params.recipe_id).await;
        table_result("add all ingredients", result.map(|list| list.to_table()))
    }

    #[tool(description = "Get the current shopping list with item costs and the total")]
    async fn get_shopping_list(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: get_shopping_list");

        let result = self.session.get_shopping_list().await;
        table_result("get shopping list", result.map(|list| list.to_table()))
    }

    #[tool(description = "Delete shopping list items by item ID and return the updated list")]
    async fn delete_items(
        &self,
        Parameters(params): Parameters<DeleteItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP tool call: delete_items {:?}", params.item_ids);

        let result = self.session.delete_item_values(&params.item_ids).await;
        table_result("delete items", result.map(|list| list.to_table()))
    }
}

/// Maps an operation outcome onto a tool result.
///
/// Bad arguments are protocol errors; remote failures are tool errors the
/// assistant can read.
fn table_result(
    operation: &str,
    result: Result<Table, GroceryError>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(table) => Ok(CallToolResult::success(vec![Content::text(table.to_string())])),
        Err(GroceryError::Validation(message)) => Err(McpError::invalid_params(
            message,
            Some(json!({ "operation": operation })),
        )),
        Err(e) => {
            tracing::error!("{} tool failed: {}", operation, e);
            let error = json!({
                "error": format!("Failed to {}", operation),
                "details": e.to_string(),
            });
            Ok(CallToolResult::error(vec![Content::text(error.to_string())]))
        }
    }
}

#[tool_handler]
impl ServerHandler for GroceryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server manages a Spoonacular grocery list. Search recipes, look up a recipe's ingredients, add single ingredients or whole recipes to the shopping list, view the list with costs, and delete items by ID. Every shopping list tool returns the refreshed list as a table.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}
