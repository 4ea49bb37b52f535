use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode as AxumStatus;
use axum::routing::post;
use axum::Router;
use reqwest::StatusCode;
use serde_json::{Value, json};

use gstforge_api::config::ApiConfig;
use gstforge_invoicing::PartyDetails;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: ApiConfig) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = gstforge_api::app::build_app(&config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spreadsheet endpoint stand-in that records row bodies.
struct StubSheet {
    endpoint: String,
    rows: Arc<Mutex<Vec<Value>>>,
    handle: tokio::task::JoinHandle<()>,
}

#[derive(Clone)]
struct StubState {
    rows: Arc<Mutex<Vec<Value>>>,
    fail_on: Option<usize>,
    /// Record the row, then never answer.
    hang: bool,
}

async fn stub_append(State(state): State<StubState>, body: String) -> (AxumStatus, String) {
    let count = {
        let mut rows = state.rows.lock().unwrap();
        rows.push(serde_json::from_str(&body).unwrap_or(Value::Null));
        rows.len()
    };
    if state.hang {
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }
    if Some(count) == state.fail_on {
        return (AxumStatus::INTERNAL_SERVER_ERROR, "quota exceeded".to_string());
    }
    (AxumStatus::OK, "ok".to_string())
}

impl StubSheet {
    async fn spawn(fail_on: Option<usize>) -> Self {
        Self::spawn_with(fail_on, false).await
    }

    async fn spawn_with(fail_on: Option<usize>, hang: bool) -> Self {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/exec", post(stub_append))
            .with_state(StubState {
                rows: rows.clone(),
                fail_on,
                hang,
            });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            endpoint: format!("http://{addr}/exec"),
            rows,
            handle,
        }
    }

    fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl Drop for StubSheet {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn config(sheets_endpoint: Option<String>) -> ApiConfig {
    ApiConfig {
        sheets_endpoint,
        seller: PartyDetails {
            name: "HAYA ENGINEERING".into(),
            address: "Maninagar, Ahmedabad-380001".into(),
            gstin: "24AACPH8224G1Z7".into(),
            state: "GUJARAT".into(),
            state_code: "24".into(),
        },
        ..ApiConfig::default()
    }
}

async fn update(client: &reqwest::Client, base_url: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/draft/updates", base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

/// Invoice "INV-9" to a buyer in another state, with two priced items.
async fn fill_interstate_invoice(client: &reqwest::Client, base_url: &str) {
    let res = client
        .post(format!("{}/draft/items", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    for body in [
        json!({"kind": "set_invoice_number", "value": "INV-9"}),
        json!({"kind": "set_invoice_date", "value": "2024-03-15"}),
        json!({"kind": "replace_buyer", "details": {
            "name": "Globex", "address": "MG Road", "gstin": "29ABCDE1234F1Z5",
            "state": "Karnataka", "state_code": "29"
        }}),
        json!({"kind": "set_item_description", "id": 1, "value": "Bolts"}),
        json!({"kind": "set_item_quantity", "id": 1, "value": 2}),
        json!({"kind": "set_item_rate", "id": 1, "value": 100}),
        json!({"kind": "set_item_description", "id": 2, "value": "Nuts"}),
        json!({"kind": "set_item_quantity", "id": 2, "value": 1}),
        json!({"kind": "set_item_rate", "id": 2, "value": 50}),
    ] {
        let res = update(client, base_url, body).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}

async fn point_at_sheet(client: &reqwest::Client, base_url: &str) {
    for body in [
        json!({"kind": "set_sheet_url", "value": "https://docs.google.com/spreadsheets/d/Sheet_42/edit#gid=0"}),
        json!({"kind": "set_credential", "value": "s3cret"}),
    ] {
        let res = update(client, base_url, body).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let srv = TestServer::spawn(config(None)).await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn draft_view_tracks_items_and_totals() {
    let srv = TestServer::spawn(config(None)).await;
    let client = reqwest::Client::new();
    fill_interstate_invoice(&client, &srv.base_url).await;

    let draft: Value = client
        .get(format!("{}/draft", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(draft["items"][1]["amount"], 50.0);
    assert_eq!(draft["summary"]["subtotal"], 250.0);
    assert_eq!(draft["summary"]["tax"]["igst"], 45.0);
    assert_eq!(draft["summary"]["grand_total"], 295.0);
    assert_eq!(draft["next_item_id"], 3);

    // Removing the highest id must not make it available again.
    let res = client
        .delete(format!("{}/draft/items/2", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let draft: Value = res.json().await.unwrap();
    assert_eq!(draft["items"].as_array().unwrap().len(), 1);
    assert_eq!(draft["next_item_id"], 3);

    // The last item stays.
    let draft: Value = client
        .delete(format!("{}/draft/items/1", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(draft["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_item_id_is_rejected() {
    let srv = TestServer::spawn(config(None)).await;
    let res = reqwest::Client::new()
        .delete(format!("{}/draft/items/zero", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn document_export_requires_invoice_number_and_buyer() {
    let srv = TestServer::spawn(config(None)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/exports/document", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "please fill in invoice number and buyer details");

    let notices: Value = client
        .get(format!("{}/notices", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notices["notices"][0]["level"], "error");
}

#[tokio::test]
async fn document_export_returns_pdf_attachment() {
    let srv = TestServer::spawn(config(None)).await;
    let client = reqwest::Client::new();
    fill_interstate_invoice(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/exports/document", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/pdf");
    assert_eq!(
        res.headers()["content-disposition"],
        "attachment; filename=\"Invoice-INV-9.pdf\""
    );
    let bytes = res.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn sheet_export_appends_one_row_per_item() {
    let sheet = StubSheet::spawn(None).await;
    let srv = TestServer::spawn(config(Some(sheet.endpoint.clone()))).await;
    let client = reqwest::Client::new();
    fill_interstate_invoice(&client, &srv.base_url).await;
    point_at_sheet(&client, &srv.base_url).await;

    let draft: Value = client
        .get(format!("{}/draft", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(draft["has_credential"], true);
    assert!(!draft.to_string().contains("s3cret"));

    let res = client
        .post(format!("{}/exports/sheet", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report: Value = res.json().await.unwrap();
    assert_eq!(report["items_written"], 2);
    assert!(report["export_id"].is_string());

    let rows = sheet.rows.lock().unwrap().clone();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["values"][8], "Bolts");
    assert_eq!(rows[1]["values"][8], "Nuts");
    assert_eq!(rows[1]["values"][17], "295.00");
}

#[tokio::test]
async fn sheet_failure_stops_export_and_keeps_draft() {
    let sheet = StubSheet::spawn(Some(1)).await;
    let srv = TestServer::spawn(config(Some(sheet.endpoint.clone()))).await;
    let client = reqwest::Client::new();
    fill_interstate_invoice(&client, &srv.base_url).await;
    point_at_sheet(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/exports/sheet", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "remote_error");
    assert!(body["message"].as_str().unwrap().contains("quota exceeded"));
    assert_eq!(sheet.row_count(), 1);

    let draft: Value = client
        .get(format!("{}/draft", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(draft["invoice_number"], "INV-9");
    assert_eq!(draft["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_sheet_url_sends_nothing() {
    let sheet = StubSheet::spawn(None).await;
    let srv = TestServer::spawn(config(Some(sheet.endpoint.clone()))).await;
    let client = reqwest::Client::new();
    fill_interstate_invoice(&client, &srv.base_url).await;
    point_at_sheet(&client, &srv.base_url).await;
    update(
        &client,
        &srv.base_url,
        json!({"kind": "set_sheet_url", "value": "https://example.com/not-a-sheet"}),
    )
    .await;

    let res = client
        .post(format!("{}/exports/sheet", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "malformed_url");
    assert_eq!(sheet.row_count(), 0);
}

#[tokio::test]
async fn form_stays_usable_while_sheet_export_hangs() {
    let sheet = StubSheet::spawn_with(None, true).await;
    let srv = TestServer::spawn(config(Some(sheet.endpoint.clone()))).await;
    let client = reqwest::Client::new();
    fill_interstate_invoice(&client, &srv.base_url).await;
    point_at_sheet(&client, &srv.base_url).await;

    let export = tokio::spawn({
        let client = client.clone();
        let url = format!("{}/exports/sheet", srv.base_url);
        async move { client.post(url).send().await }
    });

    // Wait until the first row request is parked at the endpoint.
    for _ in 0..100 {
        if sheet.row_count() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(sheet.row_count(), 1);

    let res = client
        .get(format!("{}/draft", srv.base_url))
        .timeout(Duration::from_secs(3))
        .send()
        .await
        .expect("GET /draft blocked by the pending export");
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/draft/updates", srv.base_url))
        .json(&json!({"kind": "set_invoice_number", "value": "INV-10"}))
        .timeout(Duration::from_secs(3))
        .send()
        .await
        .expect("draft update blocked by the pending export");
    assert_eq!(res.status(), StatusCode::OK);
    let draft: Value = res.json().await.unwrap();
    assert_eq!(draft["invoice_number"], "INV-10");

    let res = client
        .get(format!("{}/notices", srv.base_url))
        .timeout(Duration::from_secs(3))
        .send()
        .await
        .expect("GET /notices blocked by the pending export");
    assert_eq!(res.status(), StatusCode::OK);

    // The row already sent carries the invoice number at export time.
    assert_eq!(sheet.rows.lock().unwrap()[0]["values"][0], "INV-9");

    export.abort();
}
