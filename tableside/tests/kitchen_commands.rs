// tableside/tests/kitchen_commands.rs
//
// Dispatched commands report back over the event channel; the outcome
// carries enough to patch the local slice without refetching.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::mpsc;

use shared::models::{ChatMessage, WaiterCall, WaiterReason};
use tably_client::{ClientConfig, HttpClient};
use tableside::sync::{Command, CommandOutcome, SyncEvent, commands};

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

async fn complete_order(State(captured): State<Captured>, Path(id): Path<String>) -> Json<Value> {
    captured
        .lock()
        .unwrap()
        .push((format!("complete {id}"), Value::Null));
    Json(json!({ "acknowledged": true }))
}

async fn update_item(
    State(captured): State<Captured>,
    Path(category_id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    captured
        .lock()
        .unwrap()
        .push((format!("menus {category_id}"), body));
    Json(json!({ "acknowledged": true }))
}

async fn update_stock(
    State(captured): State<Captured>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    captured.lock().unwrap().push((format!("stock {id}"), body));
    Json(json!({ "acknowledged": true }))
}

async fn waiter_assistance(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    captured.lock().unwrap().push(("waiter".to_string(), body));
    Json(json!({ "acknowledged": true }))
}

async fn create_message(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    captured.lock().unwrap().push(("message".to_string(), body));
    Json(json!({ "acknowledged": true }))
}

fn stub(captured: &Captured) -> Router {
    Router::new()
        .route("/api/orders/{id}/complete", patch(complete_order))
        .route("/api/menus/{category_id}/item", patch(update_item))
        .route("/api/stock/{id}/update", patch(update_stock))
        .route("/api/waiter-request/waiter-assistance", post(waiter_assistance))
        .route("/api/messages", post(create_message))
        .with_state(captured.clone())
}

#[tokio::test]
async fn test_complete_order_outcome() {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let client = client(serve(stub(&captured)).await);
    let (tx, mut rx) = mpsc::unbounded_channel();

    commands::dispatch(
        &client,
        Command::CompleteOrder {
            order_id: "ord-9".to_string(),
        },
        &tx,
    );
    match rx.recv().await.unwrap() {
        SyncEvent::Command(CommandOutcome::OrderCompleted { order_id }) => {
            assert_eq!(order_id, "ord-9");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(captured.lock().unwrap()[0].0, "complete ord-9");
}

#[tokio::test]
async fn test_availability_outcome_carries_the_toggle() {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let client = client(serve(stub(&captured)).await);
    let (tx, mut rx) = mpsc::unbounded_channel();

    commands::dispatch(
        &client,
        Command::SetAvailability {
            category_id: "cat-1".to_string(),
            item_name: "Dosa".to_string(),
            is_available: false,
        },
        &tx,
    );
    match rx.recv().await.unwrap() {
        SyncEvent::Command(CommandOutcome::AvailabilitySet {
            category_id,
            item_name,
            is_available,
        }) => {
            assert_eq!(category_id, "cat-1");
            assert_eq!(item_name, "Dosa");
            assert!(!is_available);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let (label, body) = captured.lock().unwrap()[0].clone();
    assert_eq!(label, "menus cat-1");
    assert_eq!(body["itemName"], "Dosa");
    assert_eq!(body["isAvailable"], false);
}

#[tokio::test]
async fn test_stock_and_waiter_and_chat_outcomes() {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let client = client(serve(stub(&captured)).await);
    let (tx, mut rx) = mpsc::unbounded_channel();

    commands::dispatch(
        &client,
        Command::UpdateStock {
            stock_id: "stk-1".to_string(),
            quantity: 4.5,
        },
        &tx,
    );
    match rx.recv().await.unwrap() {
        SyncEvent::Command(CommandOutcome::StockUpdated { stock_id, quantity }) => {
            assert_eq!(stock_id, "stk-1");
            assert_eq!(quantity, 4.5);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    commands::dispatch(
        &client,
        Command::CallWaiter(WaiterCall {
            restaurant_id: "rest-1".to_string(),
            table_number: 7,
            reason: WaiterReason::Refill,
        }),
        &tx,
    );
    assert!(matches!(
        rx.recv().await.unwrap(),
        SyncEvent::Command(CommandOutcome::WaiterCalled)
    ));

    let message = ChatMessage::new("rest-1", "kitchen", "86 the dosa");
    let message_id = message.message_id;
    commands::dispatch(&client, Command::SendMessage(message), &tx);
    match rx.recv().await.unwrap() {
        SyncEvent::Command(CommandOutcome::MessageSent(sent)) => {
            assert_eq!(sent.message_id, message_id);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let log = captured.lock().unwrap();
    assert_eq!(log[0].0, "stock stk-1");
    assert_eq!(log[0].1["quantity"], 4.5);
    assert_eq!(log[1].0, "waiter");
    assert_eq!(log[1].1["reason"], "Refill");
    assert_eq!(log[1].1["tableNumber"], 7);
    assert_eq!(log[2].0, "message");
    assert_eq!(log[2].1["body"], "86 the dosa");
    assert_eq!(log[2].1["sender"], "kitchen");
}

#[tokio::test]
async fn test_failed_command_reports_the_action() {
    async fn refuse() -> impl IntoResponse {
        (axum::http::StatusCode::BAD_REQUEST, "no such stock item")
    }
    let router = Router::new().route("/api/stock/{id}/update", patch(refuse));
    let client = client(serve(router).await);
    let (tx, mut rx) = mpsc::unbounded_channel();

    commands::dispatch(
        &client,
        Command::UpdateStock {
            stock_id: "stk-404".to_string(),
            quantity: 1.0,
        },
        &tx,
    );
    match rx.recv().await.unwrap() {
        SyncEvent::Command(CommandOutcome::Failed { action, error }) => {
            assert_eq!(action, "update stock");
            assert!(error.contains("no such stock item"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
