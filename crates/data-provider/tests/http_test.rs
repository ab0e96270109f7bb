//! End-to-end tests against a fake REST backend.
//!
//! Starts an axum server speaking the `filter`/`range`/`sort` dialect and
//! drives it through the real reqwest transport.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use data_provider::{
    CreateParams, DataProvider, DeleteManyParams, DeleteParams, Filter, GetListParams,
    GetManyParams, GetManyReferenceParams, GetOneParams, Identifier, Pagination, ProviderConfig,
    ProviderError, Record, RestDataProvider, Sort, UpdateManyParams, UpdateParams,
};
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// --- Fake backend ---

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: Vec<Value>,
}

type Db = Arc<Mutex<Store>>;
type Reply = (StatusCode, Json<Value>);

fn not_found() -> Reply {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Resource not found"})))
}

fn matches(row: &Value, filter: &serde_json::Map<String, Value>) -> bool {
    filter.iter().all(|(key, wanted)| match wanted {
        Value::Array(options) => options.contains(&row[key]),
        other => &row[key] == other,
    })
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

async fn list(State(db): State<Db>, Query(query): Query<HashMap<String, String>>) -> Reply {
    let filter: serde_json::Map<String, Value> = query
        .get("filter")
        .map(|raw| serde_json::from_str(raw).unwrap())
        .unwrap_or_default();
    let store = db.lock().unwrap();
    let mut rows: Vec<Value> = store
        .rows
        .iter()
        .filter(|row| matches(row, &filter))
        .cloned()
        .collect();
    let total = rows.len();

    if let Some(raw) = query.get("sort") {
        let (field, order): (String, String) = serde_json::from_str(raw).unwrap();
        rows.sort_by(|a, b| compare(&a[&field], &b[&field]));
        if order == "DESC" {
            rows.reverse();
        }
    }
    if let Some(raw) = query.get("range") {
        let (start, end): (usize, usize) = serde_json::from_str(raw).unwrap();
        rows = rows.into_iter().skip(start).take(end + 1 - start).collect();
    }
    (StatusCode::OK, Json(json!({"data": rows, "total": total})))
}

async fn get_one(State(db): State<Db>, Path(id): Path<i64>) -> Reply {
    let store = db.lock().unwrap();
    match store.rows.iter().find(|row| row["id"] == id) {
        Some(row) => (StatusCode::OK, Json(json!({"data": row}))),
        None => not_found(),
    }
}

async fn create(State(db): State<Db>, Json(mut body): Json<Value>) -> Reply {
    let mut store = db.lock().unwrap();
    store.next_id += 1;
    let id = store.next_id;
    body["id"] = json!(id);
    store.rows.push(body);
    (
        StatusCode::CREATED,
        Json(json!({"id": id, "created_at": "2024-05-01T00:00:00Z"})),
    )
}

async fn update(State(db): State<Db>, Path(id): Path<i64>, Json(body): Json<Value>) -> Reply {
    let mut store = db.lock().unwrap();
    let Some(row) = store.rows.iter_mut().find(|row| row["id"] == id) else {
        return not_found();
    };
    if let (Some(row), Some(fields)) = (row.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            row.insert(key.clone(), value.clone());
        }
    }
    (StatusCode::OK, Json(json!({"data": row})))
}

async fn update_many(State(db): State<Db>, Json(body): Json<Value>) -> Reply {
    let ids = body["ids"].as_array().cloned().unwrap_or_default();
    let mut store = db.lock().unwrap();
    for row in store.rows.iter_mut().filter(|row| ids.contains(&row["id"])) {
        if let (Some(row), Some(fields)) = (row.as_object_mut(), body["data"].as_object()) {
            for (key, value) in fields {
                row.insert(key.clone(), value.clone());
            }
        }
    }
    (StatusCode::OK, Json(json!({"data": ids})))
}

async fn remove(State(db): State<Db>, Path(id): Path<i64>) -> Reply {
    let mut store = db.lock().unwrap();
    match store.rows.iter().position(|row| row["id"] == id) {
        Some(index) => {
            let row = store.rows.remove(index);
            (StatusCode::OK, Json(json!({"data": row})))
        }
        None => not_found(),
    }
}

async fn bulk_delete(State(db): State<Db>, Json(ids): Json<Vec<i64>>) -> Reply {
    let mut store = db.lock().unwrap();
    let before = store.rows.len();
    store
        .rows
        .retain(|row| !ids.iter().any(|id| row["id"] == *id));
    let deleted = before - store.rows.len();
    (StatusCode::OK, Json(json!({"deleted": deleted})))
}

async fn broken() -> Reply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Database error"})),
    )
}

fn seed() -> Store {
    let rows = vec![
        json!({"id": 1, "name": "Bolt", "price": 0.25, "in_stock": true, "category_id": 1}),
        json!({"id": 2, "name": "Nut", "price": 0.10, "in_stock": true, "category_id": 1}),
        json!({"id": 3, "name": "Gear", "price": 4.50, "in_stock": false, "category_id": 2}),
        json!({"id": 4, "name": "Spring", "price": 1.20, "in_stock": true, "category_id": 2}),
        json!({"id": 5, "name": "Washer", "price": 0.05, "in_stock": true, "category_id": 1}),
    ];
    Store { next_id: 5, rows }
}

/// Bind to port 0 and return a provider pointed at the server.
async fn start_server() -> RestDataProvider {
    let db: Db = Arc::new(Mutex::new(seed()));
    let app = Router::new()
        .route("/api/products", get(list).post(create).put(update_many))
        .route("/api/products/bulk-delete", post(bulk_delete))
        .route("/api/products/:id", get(get_one).put(update).delete(remove))
        .route("/api/broken", get(broken))
        .with_state(db);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    RestDataProvider::new(ProviderConfig::new(&format!("http://{addr}/api")).unwrap())
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not a record: {other}"),
    }
}

fn names(records: &[Record]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect()
}

// --- Tests ---

#[tokio::test]
async fn list_pages_sorts_and_filters_over_http() {
    let provider = start_server().await;

    let page = provider
        .get_list(
            "products",
            GetListParams {
                pagination: Pagination::new(1, 2),
                sort: Sort::desc("price"),
                filter: in_stock(),
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 4);
    assert_eq!(names(&page.data), ["Spring", "Bolt"]);

    let second = provider
        .get_list(
            "products",
            GetListParams {
                pagination: Pagination::new(2, 2),
                sort: Sort::desc("price"),
                filter: in_stock(),
            },
        )
        .await
        .unwrap();
    assert_eq!(names(&second.data), ["Nut", "Washer"]);
}

fn in_stock() -> Filter {
    let mut filter = Filter::new();
    filter.insert("in_stock".into(), json!(true));
    filter
}

#[tokio::test]
async fn get_many_and_reference_over_http() {
    let provider = start_server().await;

    let many = provider
        .get_many(
            "products",
            GetManyParams {
                ids: vec![Identifier::from(2), Identifier::from(4)],
            },
        )
        .await
        .unwrap();
    assert_eq!(names(&many.data), ["Nut", "Spring"]);

    let related = provider
        .get_many_reference(
            "products",
            GetManyReferenceParams {
                target: "category_id".into(),
                id: Identifier::from(2),
                pagination: Pagination::new(1, 10),
                sort: Sort::asc("name"),
                filter: Filter::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(related.total, 2);
    assert_eq!(names(&related.data), ["Gear", "Spring"]);
}

#[tokio::test]
async fn record_lifecycle_over_http() {
    let provider = start_server().await;

    // 1. Create: the input comes back with the server id only.
    let created = provider
        .create(
            "products",
            CreateParams {
                data: record(json!({"name": "Widget", "price": 9.99, "in_stock": true})),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        Value::Object(created.data.clone()),
        json!({"name": "Widget", "price": 9.99, "in_stock": true, "id": 6})
    );
    let id = Identifier::of_record(&created.data).unwrap();

    // 2. Update
    let updated = provider
        .update(
            "products",
            UpdateParams {
                id: id.clone(),
                data: record(json!({"price": 7.5})),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.data["price"], json!(7.5));
    assert_eq!(updated.data["name"], json!("Widget"));

    // 3. Read back
    let fetched = provider
        .get_one("products", GetOneParams { id: id.clone() })
        .await
        .unwrap();
    assert_eq!(fetched.data, updated.data);

    // 4. Delete
    let deleted = provider
        .delete("products", DeleteParams { id: id.clone() })
        .await
        .unwrap();
    assert_eq!(deleted.data["name"], json!("Widget"));

    let err = provider
        .get_one("products", GetOneParams { id })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn bulk_operations_over_http() {
    let provider = start_server().await;
    let ids = vec![Identifier::from(1), Identifier::from(2)];

    let updated = provider
        .update_many(
            "products",
            UpdateManyParams {
                ids: ids.clone(),
                data: record(json!({"in_stock": false})),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.data, ids);

    // The backend answers `{"deleted": 2}`; the requested ids stand in.
    let deleted = provider
        .delete_many("products", DeleteManyParams { ids: ids.clone() })
        .await
        .unwrap();
    assert_eq!(deleted.data, ids);

    let remaining = provider
        .get_list("products", GetListParams::default())
        .await
        .unwrap();
    assert_eq!(remaining.total, 3);
    assert_eq!(names(&remaining.data), ["Gear", "Spring", "Washer"]);
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let provider = start_server().await;

    let err = provider
        .get_list("broken", GetListParams::default())
        .await
        .unwrap_err();
    match &err {
        ProviderError::HttpStatus { status, body, .. } => {
            assert_eq!(*status, 500);
            assert!(body.contains("Database error"));
        }
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider =
        RestDataProvider::new(ProviderConfig::new(&format!("http://{addr}/api")).unwrap());
    let err = provider
        .get_one("products", GetOneParams { id: Identifier::from(1) })
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Transport { .. }), "{err}");
}
