use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use stockforge_alerts::{AlertSender, SendError};
use stockforge_api::app::{self, services::AppServices};
use stockforge_inventory::AppSettings;
use stockforge_store::{Document, InMemoryStore};

/// Records deliveries so tests can assert on alert behavior end to end.
struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSender for RecordingSender {
    async fn send(&self, destination: &str, message: &str) -> Result<(), SendError> {
        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), message.to_string()));
        Ok(())
    }
}

struct TestServer {
    base_url: String,
    sender: Arc<RecordingSender>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, backed by the in-memory store and a
        // recording sender, bound to an ephemeral port.
        let store = Arc::new(InMemoryStore::with_document(Document {
            settings: AppSettings {
                phone_numbers: vec!["+15551234567".to_string(), "+15557654321".to_string()],
            },
            ..Document::default()
        }));
        let sender = Arc::new(RecordingSender::new());
        let services = Arc::new(AppServices::new(store, sender.clone()));
        let router = app::build_app(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url,
            sender,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn item_body(name: &str, quantity: i64, min_stock_limit: i64) -> serde_json::Value {
    json!({
        "name": name,
        "category": "Fasteners",
        "location": "Warehouse A",
        "quantity": quantity,
        "minStockLimit": min_stock_limit,
    })
}

async fn create_item(
    client: &reqwest::Client,
    base_url: &str,
    body: &serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/stock/items", base_url))
        .json(body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn item_lifecycle_create_get_list() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_item(&client, &srv.base_url, &item_body("Screws", 5000, 1000)).await;
    assert_eq!(created["name"], "Screws");
    assert_eq!(created["quantity"], 5000);
    assert_eq!(created["minStockLimit"], 1000);
    assert_eq!(created["lowStock"], false);
    let id = created["id"].as_str().unwrap();

    let fetched: serde_json::Value = client
        .get(format!("{}/stock/items/{}", srv.base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    let listed: Vec<serde_json::Value> = client
        .get(format!("{}/stock/items", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn create_rejects_invalid_input_per_field() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/stock/items", srv.base_url))
        .json(&json!({
            "name": "",
            "category": "Fasteners",
            "location": "Warehouse A",
            "quantity": -5,
            "minStockLimit": 0,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["quantity"].is_array());
}

#[tokio::test]
async fn update_then_delete_leaves_no_trace() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_item(&client, &srv.base_url, &item_body("Nuts", 8000, 2000)).await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .put(format!("{}/stock/items/{}", srv.base_url, id))
        .json(&json!({ "quantity": 7000, "location": "Warehouse B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["quantity"], 7000);
    assert_eq!(updated["location"], "Warehouse B");
    assert_eq!(updated["name"], "Nuts");

    let res = client
        .delete(format!("{}/stock/items/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/stock/items/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let listed: Vec<serde_json::Value> = client
        .get(format!("{}/stock/items", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.iter().all(|item| item["id"] != created["id"]));
}

#[tokio::test]
async fn deleting_a_missing_item_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!(
            "{}/stock/items/{}",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_item_id_is_a_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/stock/items/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn usage_transaction_deducts_logs_and_alerts_once() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_item(&client, &srv.base_url, &item_body("Bolts", 600, 500)).await;
    let id = created["id"].as_str().unwrap();

    // 600 -> 450: crosses the threshold.
    let res = client
        .post(format!("{}/usage/logs", srv.base_url))
        .json(&json!({
            "employeeName": "John Doe",
            "itemId": id,
            "quantityUsed": 150,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["item"]["quantity"], 450);
    assert_eq!(body["item"]["lowStock"], true);
    assert_eq!(body["log"]["itemName"], "Bolts");
    assert_eq!(body["log"]["quantityUsed"], 150);

    let sent = srv.sender.sent();
    assert_eq!(sent.len(), 2, "one alert per configured destination");
    assert!(sent[0].1.contains("\"Bolts\""));
    assert!(sent[0].1.contains("450"));

    // 450 -> 400: still low, no re-alert.
    let res = client
        .post(format!("{}/usage/logs", srv.base_url))
        .json(&json!({
            "employeeName": "John Doe",
            "itemId": id,
            "quantityUsed": 50,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(srv.sender.sent().len(), 2);

    let logs: Vec<serde_json::Value> = client
        .get(format!("{}/usage/logs", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(logs.len(), 2);
}

#[tokio::test]
async fn insufficient_stock_is_unprocessable_and_changes_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_item(&client, &srv.base_url, &item_body("Rivets", 100, 10)).await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/usage/logs", srv.base_url))
        .json(&json!({
            "employeeName": "Jane Smith",
            "itemId": id,
            "quantityUsed": 101,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");

    let fetched: serde_json::Value = client
        .get(format!("{}/stock/items/{}", srv.base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["quantity"], 100);

    let logs: Vec<serde_json::Value> = client
        .get(format!("{}/usage/logs", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn usage_against_an_unknown_item_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/usage/logs", srv.base_url))
        .json(&json!({
            "employeeName": "Jane Smith",
            "itemId": uuid::Uuid::now_v7().to_string(),
            "quantityUsed": 1,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn settings_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/settings", srv.base_url))
        .json(&json!({ "phoneNumbers": ["+4915500000000"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let fetched: serde_json::Value = client
        .get(format!("{}/settings", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["phoneNumbers"], json!(["+4915500000000"]));
}

#[tokio::test]
async fn usage_report_totals_per_item() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let screws = create_item(&client, &srv.base_url, &item_body("Screws", 5000, 10)).await;
    let nuts = create_item(&client, &srv.base_url, &item_body("Nuts", 8000, 10)).await;

    for (id, used) in [
        (screws["id"].as_str().unwrap(), 200),
        (nuts["id"].as_str().unwrap(), 500),
        (screws["id"].as_str().unwrap(), 100),
    ] {
        let res = client
            .post(format!("{}/usage/logs", srv.base_url))
            .json(&json!({
                "employeeName": "John Doe",
                "itemId": id,
                "quantityUsed": used,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let report: Vec<serde_json::Value> = client
        .get(format!("{}/reports/usage?range=all", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0]["itemName"], "Nuts");
    assert_eq!(report[0]["quantityUsed"], 500);
    assert_eq!(report[1]["itemName"], "Screws");
    assert_eq!(report[1]["quantityUsed"], 300);

    let res = client
        .get(format!("{}/reports/usage?range=yesterday", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn csv_export_flattens_the_stock_collection() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_item(&client, &srv.base_url, &item_body("Aluminum Plate", 150, 50)).await;

    let res = client
        .get(format!("{}/stock/export", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()
            .get(reqwest::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );

    let body = res.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Name,Category,Quantity,Quantity KG,Min Stock Limit,Location,Last Updated"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("\"Aluminum Plate\""));
    assert!(row.contains(",N/A,"));
}
