mod common;

use common::{API_KEY, HASH};
use mcp_spoonacular::grocery::{Cell, Tabular};
use mcp_spoonacular::{GroceryError, GroceryList};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, path_regex, query_param};
use wiremock::{Mock, ResponseTemplate};

fn items_path() -> String {
    format!("{}/items", common::shopping_list_path())
}

fn two_aisles() -> Value {
    json!([
        {
            "aisle": "Canned and Jarred",
            "items": [
                common::shopping_list_item(1400329, "canned black beans", 1.276, "kg", 228.0),
                common::shopping_list_item(1400333, "chicken broth", 940.0, "ml", 300.0)
            ]
        },
        {
            "aisle": "Produce",
            "items": [
                common::shopping_list_item(1400327, "avocado", 1.0, "small", 150.0)
            ]
        }
    ])
}

#[tokio::test]
async fn test_get_shopping_list() {
    common::init_test_logging();
    let server = common::start_api().await;
    common::mount_shopping_list(&server, two_aisles(), 678.0).await;

    let session = common::connect(&server).await;
    let list = session
        .get_shopping_list()
        .await
        .expect("Should retrieve shopping list successfully");

    assert_eq!(list.item_ids(), vec![1400329, 1400333, 1400327]);
    assert_eq!(list.items[0].cost, 2.28);
    assert_eq!(list.total_cost, 6.78);

    let table = list.to_table();
    assert_eq!(table.len(), list.len() + 1, "N items render as N+1 rows");
    assert_eq!(table.cell(3, "Item"), Some(&Cell::Text("Total cost".to_string())));
    assert_eq!(table.cell(3, "Cost (USD)"), Some(&Cell::Money(6.78)));
    assert!(table.cell(3, "Amount").unwrap().is_blank());
    assert!(table.cell(3, "Unit").unwrap().is_blank());
    assert!(table.cell(3, "Item ID").unwrap().is_blank());
    assert_eq!(table.cell(2, "Item ID"), Some(&Cell::Integer(1400327)));
}

#[tokio::test]
async fn test_get_empty_shopping_list() {
    common::init_test_logging();
    let server = common::start_api().await;
    common::mount_shopping_list(&server, json!([]), 0.0).await;

    let session = common::connect(&server).await;
    let list = session.get_shopping_list().await.expect("empty list is valid");

    assert!(list.is_empty());
    assert_eq!(list.to_table().len(), 1);
}

#[tokio::test]
async fn test_get_shopping_list_every_read_refetches() {
    common::init_test_logging();
    let server = common::start_api().await;

    Mock::given(method("GET"))
        .and(path(common::shopping_list_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aisles": [],
            "cost": 0
        })))
        .expect(2)
        .mount(&server)
        .await;

    let session = common::connect(&server).await;
    session.get_shopping_list().await.unwrap();
    session.get_shopping_list().await.unwrap();
}

#[tokio::test]
async fn test_get_shopping_list_missing_measures_fails_closed() {
    common::init_test_logging();
    let server = common::start_api().await;

    Mock::given(method("GET"))
        .and(path(common::shopping_list_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aisles": [{"aisle": "Produce", "items": [{"id": 1, "name": "avocado", "cost": 150}]}],
            "cost": 150
        })))
        .mount(&server)
        .await;

    let session = common::connect(&server).await;
    let result = session.get_shopping_list().await;

    assert!(matches!(result, Err(GroceryError::Validation(_))));
}

#[tokio::test]
async fn test_add_ingredient() {
    common::init_test_logging();
    let server = common::start_api().await;

    Mock::given(method("POST"))
        .and(path(items_path()))
        .and(query_param("apiKey", API_KEY))
        .and(query_param("hash", HASH))
        .and(body_json(json!({"item": "940 ml chicken broth", "parse": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1400323,
            "name": "chicken broth",
            "aisle": "Canned and Jarred"
        })))
        .expect(1)
        .mount(&server)
        .await;

    common::mount_shopping_list(
        &server,
        json!([{
            "aisle": "Canned and Jarred",
            "items": [common::shopping_list_item(1400323, "chicken broth", 940.0, "ml", 300.0)]
        }]),
        300.0,
    )
    .await;

    let session = common::connect(&server).await;
    let list = session
        .add_ingredient("chicken broth", 940.0, "ml")
        .await
        .expect("Should add item to shopping list successfully");

    assert_eq!(list.item_ids(), vec![1400323]);
    assert_eq!(list.total_cost, 3.0);
}

#[tokio::test]
async fn test_add_ingredient_rejects_bad_amount() {
    common::init_test_logging();
    let server = common::start_api().await;
    let session = common::connect(&server).await;

    for amount in [f64::NAN, f64::INFINITY, -1.0] {
        let result = session.add_ingredient("lemon juice", amount, "Tbsp").await;
        assert!(matches!(result, Err(GroceryError::Validation(_))));
    }
    let result = session.add_ingredient(" ", 1.0, "Tbsp").await;
    assert!(matches!(result, Err(GroceryError::Validation(_))));

    assert!(common::requests_after_connect(&server).await.is_empty());
}

#[tokio::test]
async fn test_add_all_ingredients_one_call_per_ingredient_in_order() {
    common::init_test_logging();
    let server = common::start_api().await;

    common::mount_ingredients(
        &server,
        638741,
        vec![
            common::widget_ingredient("avocado", 1.0, "small"),
            common::widget_ingredient("canned black beans", 1.276, "kgs"),
            common::widget_ingredient("diced carrots", 256.0, "g"),
        ],
    )
    .await;

    Mock::given(method("POST"))
        .and(path(items_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(3)
        .mount(&server)
        .await;

    common::mount_shopping_list(&server, two_aisles(), 678.0).await;

    let session = common::connect(&server).await;
    let list = session
        .add_all_ingredients(638741)
        .await
        .expect("Should add all ingredients");
    assert_eq!(list.len(), 3);

    let posted: Vec<String> = common::requests_after_connect(&server)
        .await
        .into_iter()
        .filter(|request| request.method.as_str() == "POST")
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            assert_eq!(body["parse"], json!(true));
            body["item"].as_str().unwrap().to_string()
        })
        .collect();

    assert_eq!(
        posted,
        vec!["1 small avocado", "1.276 kgs canned black beans", "256 g diced carrots"]
    );
}

#[tokio::test]
async fn test_add_all_ingredients_continues_after_failed_add() {
    common::init_test_logging();
    let server = common::start_api().await;

    common::mount_ingredients(
        &server,
        42,
        vec![
            common::widget_ingredient("saffron", 0.1, "g"),
            common::widget_ingredient("rice", 200.0, "g"),
        ],
    )
    .await;

    Mock::given(method("POST"))
        .and(path(items_path()))
        .and(body_json(json!({"item": "0.1 g saffron", "parse": true})))
        .respond_with(ResponseTemplate::new(500).set_body_string("parse failure"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(items_path()))
        .and(body_json(json!({"item": "200 g rice", "parse": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    common::mount_shopping_list(
        &server,
        json!([{
            "aisle": "Pasta and Rice",
            "items": [common::shopping_list_item(7, "rice", 200.0, "g", 40.0)]
        }]),
        40.0,
    )
    .await;

    let session = common::connect(&server).await;
    let list = session
        .add_all_ingredients(42)
        .await
        .expect("A failed add should not abort the batch");

    assert_eq!(list.item_ids(), vec![7]);
}

#[tokio::test]
async fn test_add_all_ingredients_stops_on_unauthorized() {
    common::init_test_logging();
    let server = common::start_api().await;

    common::mount_ingredients(
        &server,
        42,
        vec![
            common::widget_ingredient("saffron", 0.1, "g"),
            common::widget_ingredient("rice", 200.0, "g"),
        ],
    )
    .await;

    Mock::given(method("POST"))
        .and(path(items_path()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "failure",
            "code": 401,
            "message": "You are not authorized."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = common::connect(&server).await;
    let result = session.add_all_ingredients(42).await;

    assert!(matches!(result, Err(GroceryError::Authentication(_))));
}

#[tokio::test]
async fn test_delete_items_sequentially() {
    common::init_test_logging();
    let server = common::start_api().await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/mealplanner/cook-1234/shopping-list/items/\d+$"))
        .and(query_param("apiKey", API_KEY))
        .and(query_param("hash", HASH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(2)
        .mount(&server)
        .await;

    common::mount_shopping_list(
        &server,
        json!([{
            "aisle": "Produce",
            "items": [common::shopping_list_item(1400327, "avocado", 1.0, "small", 150.0)]
        }]),
        150.0,
    )
    .await;

    let session = common::connect(&server).await;
    let list = session
        .delete_items(&[1400329, 1400333])
        .await
        .expect("Should delete items");

    assert_eq!(list.item_ids(), vec![1400327]);

    let deleted: Vec<String> = common::requests_after_connect(&server)
        .await
        .into_iter()
        .filter(|request| request.method.as_str() == "DELETE")
        .map(|request| request.url.path().to_string())
        .collect();
    assert_eq!(
        deleted,
        vec![
            format!("{}/1400329", items_path()),
            format!("{}/1400333", items_path()),
        ]
    );
}

#[tokio::test]
async fn test_delete_non_integer_id_sends_nothing() {
    common::init_test_logging();
    let server = common::start_api().await;
    let session = common::connect(&server).await;

    let result = session
        .delete_item_values(&[json!(1400329), json!("1400333")])
        .await;

    assert!(matches!(result, Err(GroceryError::Validation(_))));
    assert!(
        common::requests_after_connect(&server).await.is_empty(),
        "Validation must happen before any network call"
    );
}

#[tokio::test]
async fn test_delete_item_values_accepts_integers() {
    common::init_test_logging();
    let server = common::start_api().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/1400329", items_path())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;
    common::mount_shopping_list(&server, json!([]), 0.0).await;

    let session = common::connect(&server).await;
    let list = session
        .delete_item_values(&[json!(1400329)])
        .await
        .expect("Integer ids are valid");

    assert!(list.is_empty());
}

#[tokio::test]
async fn test_network_failure_is_transport_error_without_secrets() {
    common::init_test_logging();
    let base_url = common::start_dropping_api().await;

    let session = GroceryList::connect(base_url, API_KEY, &common::test_profile())
        .await
        .expect("handshake should succeed");

    let error = match session.get_shopping_list().await {
        Err(error @ GroceryError::Transport(_)) => error,
        Err(other) => panic!("expected a transport error, got {}", other),
        Ok(_) => panic!("a dropped connection should fail"),
    };
    let text = format!("{} {:?}", error, error);
    assert!(!text.contains(API_KEY), "API key leaked into error: {}", text);
    assert!(!text.contains(HASH), "hash leaked into error: {}", text);
}
