//! Integration tests for the CRUD page controller against a live mock
//! backend.
//!
//! One axum server plays a stateful classes endpoint; the tests drive the
//! controller the way a UI shell would: load, search, create, edit,
//! toggle, and watch the table, the form, and the notice queue.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};

use campus_erp_client::{ApiClient, MemoryTokenStore, TokenPair};
use campus_erp_core::settings::Settings;
use campus_erp_pages::{entities, CrudPage, NoticeLevel, PageState};

// ============================================================================
// Mock classes backend
// ============================================================================

struct Backend {
    rows: Mutex<Vec<serde_json::Value>>,
}

impl Backend {
    fn seeded() -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(vec![
                json!({"id": 1, "name": "5A", "is_active": true}),
                json!({"id": 2, "name": "5B", "is_active": true}),
            ]),
        })
    }
}

async fn list_classes(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if body.get("boom").is_some() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "database unavailable"})),
        );
    }
    let rows = backend.rows.lock().await;
    let filtered: Vec<_> = match body.get("search_text").and_then(|v| v.as_str()) {
        Some(text) => rows
            .iter()
            .filter(|row| {
                row["name"]
                    .as_str()
                    .is_some_and(|name| name.contains(text))
            })
            .cloned()
            .collect(),
        None => rows.clone(),
    };
    (
        StatusCode::OK,
        Json(json!({"data": filtered, "count": filtered.len()})),
    )
}

async fn create_class(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut rows = backend.rows.lock().await;
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if rows.iter().any(|row| row["name"] == json!(name)) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "status": 400,
                "errors": {"name": ["class with this name already exists."]}
            })),
        );
    }
    let id = rows.len() as i64 + 1;
    rows.push(json!({"id": id, "name": name, "is_active": true}));
    (
        StatusCode::CREATED,
        Json(json!({"status": 201, "data": {"id": id}})),
    )
}

async fn class_detail(
    State(backend): State<Arc<Backend>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let rows = backend.rows.lock().await;
    (
        StatusCode::OK,
        Json(json!({"status": 200, "data": rows[0].clone()})),
    )
}

async fn class_patch(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut rows = backend.rows.lock().await;
    if let Some(row) = rows.first_mut() {
        if let (Some(row_obj), Some(patch)) = (row.as_object_mut(), body.as_object()) {
            for (key, value) in patch {
                row_obj.insert(key.clone(), value.clone());
            }
        }
    }
    (
        StatusCode::OK,
        Json(json!({"status": 200, "data": rows[0].clone()})),
    )
}

async fn start_server(backend: Arc<Backend>) -> (SocketAddr, oneshot::Sender<()>) {
    let app = Router::new()
        .route("/api/master/classes/", post(list_classes))
        .route("/api/master/classes/create/", post(create_class))
        .route("/api/master/classes/1/", get(class_detail).patch(class_patch))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().expect("local addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });
    (addr, shutdown_tx)
}

async fn page_for(addr: SocketAddr) -> CrudPage {
    let settings = Settings {
        api_base_url: format!("http://{addr}/api"),
        token_refresh_url: format!("http://{addr}/api/token/refresh/"),
        ..Settings::default()
    };
    let store = Arc::new(MemoryTokenStore::with_tokens(TokenPair {
        access: "test-access".into(),
        refresh: "test-refresh".into(),
    }));
    let client = Arc::new(ApiClient::new(&settings, store).expect("client"));
    CrudPage::for_entity(entities::class(), client)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_loads_rows_and_total() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;

    page.refresh().await;
    assert_eq!(page.state(), PageState::Idle);
    assert!(!page.table().loading);
    assert_eq!(page.table().rows.len(), 2);
    assert_eq!(page.table().pagination.total, 2);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_search_filters_and_resets_to_first_page() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;

    page.change_page(3, 10).await;
    page.search("5B").await;
    assert_eq!(page.query().page, 1);
    assert_eq!(page.table().rows.len(), 1);
    assert_eq!(page.table().rows[0]["name"], json!("5B"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_create_flow_success() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;
    page.refresh().await;

    page.open_create();
    assert_eq!(page.state(), PageState::FormOpen);
    page.form_mut().unwrap().set("name", "6A");
    page.submit().await;

    // Form closed, success notice queued, list reloaded with the new row.
    assert_eq!(page.state(), PageState::Idle);
    assert!(page.form().is_none());
    let notices = page.drain_notices();
    assert!(notices
        .iter()
        .any(|n| n.level == NoticeLevel::Success && n.message.contains("Class")));
    assert_eq!(page.table().rows.len(), 3);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_create_duplicate_reopens_form_with_field_errors() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;
    page.refresh().await;

    page.open_create();
    page.form_mut().unwrap().set("name", "5A");
    page.submit().await;

    assert_eq!(page.state(), PageState::FormOpen);
    let form = page.form().unwrap();
    assert_eq!(
        form.errors().get("name"),
        Some(&vec!["class with this name already exists.".to_string()])
    );
    // Prior rows are untouched.
    assert_eq!(page.table().rows.len(), 2);
    assert!(page
        .drain_notices()
        .iter()
        .any(|n| n.level == NoticeLevel::Error));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_local_validation_blocks_submit_without_network() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;

    page.open_create();
    page.submit().await;

    // Required name missing: the form stays open with local errors.
    assert_eq!(page.state(), PageState::FormOpen);
    assert!(page.form().unwrap().errors().get("name").is_some());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_edit_without_changes_is_a_noop() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;

    page.open_edit("1").await;
    assert_eq!(page.state(), PageState::FormOpen);
    assert!(page.form().unwrap().is_editing());

    page.submit().await;
    // Nothing changed: info notice, form still open.
    assert_eq!(page.state(), PageState::FormOpen);
    let notices = page.drain_notices();
    assert!(notices
        .iter()
        .any(|n| n.level == NoticeLevel::Info && n.message.contains("No changes")));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_edit_change_patches_record() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;

    page.open_edit("1").await;
    page.form_mut().unwrap().set("name", "5A-renamed");
    page.submit().await;

    assert!(page.form().is_none());
    page.refresh().await;
    assert_eq!(page.table().rows[0]["name"], json!("5A-renamed"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_toggle_active_updates_and_reloads() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;
    page.refresh().await;

    page.toggle_active("1", false).await;
    assert_eq!(page.table().rows[0]["is_active"], json!(false));
    assert!(page
        .drain_notices()
        .iter()
        .any(|n| n.level == NoticeLevel::Success));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_failed_fetch_keeps_prior_rows() {
    let (addr, shutdown) = start_server(Backend::seeded()).await;
    let mut page = page_for(addr).await;
    page.refresh().await;
    assert_eq!(page.table().rows.len(), 2);

    page.set_filter("boom", json!(true)).await;

    // The failed fetch left the previous page on screen.
    assert_eq!(page.state(), PageState::Idle);
    assert_eq!(page.table().rows.len(), 2);
    assert!(page
        .drain_notices()
        .iter()
        .any(|n| n.level == NoticeLevel::Error));

    let _ = shutdown.send(());
}
