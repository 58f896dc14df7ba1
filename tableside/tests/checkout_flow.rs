// tableside/tests/checkout_flow.rs
//
// Checkout against an in-process stub backend: the cart only empties
// when the backend accepts the order, and card payments are captured
// before the order goes out.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use shared::models::{MenuItem, PaymentMethod};
use tably_client::{ClientConfig, ClientError, HttpClient};
use tableside::checkout::{self, CheckoutError};
use tableside::payment;
use tableside::session::{CartSession, SessionData, SessionStore, spawn_persister};
use tableside::tasks::BackgroundTasks;

type Captured = Arc<Mutex<Vec<(String, Value)>>>;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base: String) -> HttpClient {
    ClientConfig::new(base).build_http_client()
}

fn menu_item(name: &str, price: f64) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        price,
        description: None,
        image: Some("data:image/png;base64,AAAA".to_string()),
        is_available: true,
        volume: None,
    }
}

async fn create_order(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    captured
        .lock()
        .unwrap()
        .push(("order".to_string(), body.clone()));
    let mut saved = body;
    saved["_id"] = json!("ord-1");
    Json(saved)
}

async fn process_payment(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    captured
        .lock()
        .unwrap()
        .push(("payment".to_string(), body));
    Json(json!({ "success": true }))
}

/// Session with two Dosa and one Chai on table 7, persisted for real
fn loaded_session(persist: tableside::session::PersistHandle) -> CartSession {
    let mut session = CartSession::new(SessionData::default(), persist);
    session.set_restaurant_id("rest-1");
    session.set_table_number(Some(7));
    let dosa = menu_item("Dosa", 10.0);
    session.add_to_cart("cat-1", &dosa);
    session.add_to_cart("cat-1", &dosa);
    session.add_to_cart("cat-1", &menu_item("Chai", 5.0));
    session
}

#[tokio::test]
async fn test_placed_order_clears_cart_and_stored_keys() {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/api/orders", post(create_order))
        .with_state(captured.clone());
    let client = client(serve(router).await);

    let dir = tempfile::tempdir().unwrap();
    let mut tasks = BackgroundTasks::new();
    let persist = spawn_persister(SessionStore::new(dir.path()), &mut tasks);
    let mut session = loaded_session(persist);

    let order = checkout::place_order(&client, &mut session, PaymentMethod::Counter)
        .await
        .unwrap();
    assert!(order.order_number.starts_with("ORD-rest-1-"));
    assert_eq!(order.id, "ord-1");
    assert!(session.is_empty());
    assert_eq!(session.table_number(), None);
    assert_eq!(session.restaurant_id(), Some("rest-1"));

    let (label, body) = captured.lock().unwrap()[0].clone();
    assert_eq!(label, "order");
    assert_eq!(body["subtotal"], 25.0);
    assert_eq!(body["tax"], 3.25);
    assert_eq!(body["total"], 28.25);
    assert_eq!(body["orderStatus"], "Notcomplete");
    assert_eq!(body["paid"], false);
    assert_eq!(body["tableNumber"], 7);
    assert_eq!(body["restaurantId"], "rest-1");
    assert_eq!(body["paymentMethod"], "counter");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.get("image").is_none()));

    // the immediate flush dropped the stored keys but kept the file
    drop(session);
    tasks.shutdown().await;
    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("session.json")).unwrap())
            .unwrap();
    assert_eq!(saved["cart"].as_array().unwrap().len(), 0);
    assert!(saved["restaurantId"].is_null());
    assert!(saved["tableNumber"].is_null());
}

#[tokio::test]
async fn test_rejected_order_keeps_the_cart() {
    async fn refuse() -> impl IntoResponse {
        (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }
    let router = Router::new().route("/api/orders", post(refuse));
    let client = client(serve(router).await);

    let dir = tempfile::tempdir().unwrap();
    let mut tasks = BackgroundTasks::new();
    let persist = spawn_persister(SessionStore::new(dir.path()), &mut tasks);
    let mut session = loaded_session(persist);

    let result = checkout::place_order(&client, &mut session, PaymentMethod::Counter).await;
    assert!(matches!(
        result,
        Err(CheckoutError::Client(ClientError::Backend { status: 500, .. }))
    ));
    assert_eq!(session.items().len(), 2);
    assert_eq!(session.item_count(), 3);
    assert_eq!(session.table_number(), Some(7));

    drop(session);
    tasks.shutdown().await;
}

#[tokio::test]
async fn test_card_checkout_captures_before_placing() {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/api/orders", post(create_order))
        .route("/api/process-payment", post(process_payment))
        .with_state(captured.clone());
    let client = client(serve(router).await);

    let dir = tempfile::tempdir().unwrap();
    let mut tasks = BackgroundTasks::new();
    let persist = spawn_persister(SessionStore::new(dir.path()), &mut tasks);
    let mut session = loaded_session(persist);

    let capture = payment::capture_from_token("tok_visa", session.totals().total);
    payment::capture_card_payment(&client, &capture).await.unwrap();
    let order = checkout::place_order(&client, &mut session, PaymentMethod::GooglePay)
        .await
        .unwrap();
    assert!(order.paid);
    assert!(session.is_empty());

    let log = captured.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].0, "payment");
    assert_eq!(log[0].1["amount"], 28.25);
    assert_eq!(
        log[0].1["paymentData"]["paymentMethodData"]["tokenizationData"]["token"],
        "tok_visa"
    );
    assert_eq!(log[1].0, "order");
    assert_eq!(log[1].1["paid"], true);
    assert_eq!(log[1].1["paymentMethod"], "googlepay");

    drop(session);
    drop(log);
    tasks.shutdown().await;
}

#[tokio::test]
async fn test_failed_capture_stops_the_flow() {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    async fn refuse_payment(State(captured): State<Captured>) -> impl IntoResponse {
        captured
            .lock()
            .unwrap()
            .push(("payment".to_string(), Value::Null));
        (axum::http::StatusCode::BAD_REQUEST, "card declined")
    }
    let router = Router::new()
        .route("/api/orders", post(create_order))
        .route("/api/process-payment", post(refuse_payment))
        .with_state(captured.clone());
    let client = client(serve(router).await);

    let capture = payment::capture_from_token("tok_bad", 2825);
    let result = payment::capture_card_payment(&client, &capture).await;
    assert!(matches!(result, Err(ClientError::Validation(_))));

    // nothing but the capture attempt reached the backend
    let log = captured.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, "payment");
}
