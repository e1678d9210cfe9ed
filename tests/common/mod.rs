#![allow(dead_code)]

use mcp_spoonacular::{GroceryList, UserProfile};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const USERNAME: &str = "cook-1234";
pub const HASH: &str = "4b5v4398573406";

pub fn test_profile() -> UserProfile {
    UserProfile::new("cook", "Ada", "Lovelace", "ada@example.com")
}

/// Mock API with a working connect endpoint.
pub async fn start_api() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/connect"))
        .and(query_param("apiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "username": USERNAME,
            "spoonacularPassword": "secret",
            "hash": HASH
        })))
        .mount(&server)
        .await;

    server
}

pub async fn connect(server: &MockServer) -> GroceryList {
    GroceryList::connect(server.uri(), API_KEY, &test_profile())
        .await
        .expect("connect against mock API")
}

pub fn shopping_list_path() -> String {
    format!("/mealplanner/{}/shopping-list", USERNAME)
}

pub fn shopping_list_item(id: u64, name: &str, amount: f64, unit: &str, cost: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "measures": {
            "original": {"amount": amount, "unit": unit},
            "metric": {"amount": amount, "unit": unit},
            "us": {"amount": amount / 10.0, "unit": "oz"}
        },
        "pantryItem": false,
        "aisle": "Canned and Jarred",
        "cost": cost,
        "ingredientId": 1
    })
}

pub async fn mount_shopping_list(server: &MockServer, aisles: Value, cost: f64) {
    Mock::given(method("GET"))
        .and(path(shopping_list_path()))
        .and(query_param("apiKey", API_KEY))
        .and(query_param("hash", HASH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aisles": aisles,
            "cost": cost,
            "startDate": 1588291200,
            "endDate": 1588896000
        })))
        .mount(server)
        .await;
}

pub fn widget_ingredient(name: &str, value: f64, unit: &str) -> Value {
    json!({
        "name": name,
        "image": "placeholder.png",
        "amount": {
            "metric": {"value": value, "unit": unit},
            "us": {"value": value * 2.0, "unit": "cups"}
        }
    })
}

pub async fn mount_ingredients(server: &MockServer, recipe_id: u64, ingredients: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/recipes/{}/ingredientWidget.json", recipe_id)))
        .and(query_param("apiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ingredients": ingredients
        })))
        .mount(server)
        .await;
}

/// Requests received after the connect handshake.
pub async fn requests_after_connect(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path() != "/users/connect")
        .collect()
}

/// Address nothing is listening on.
pub fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// API that completes the connect handshake, then drops every later
/// connection without answering.
pub async fn start_dropping_api() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let body = json!({"username": USERNAME, "hash": HASH}).to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        let mut rest = Vec::new();
        let _ = socket.read_to_end(&mut rest).await;

        loop {
            match listener.accept().await {
                Ok((socket, _)) => drop(socket),
                Err(_) => break,
            }
        }
    });

    format!("http://{}", addr)
}

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
