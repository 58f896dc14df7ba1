//! Fixed-interval pollers
//!
//! Every loop fetches first, sends the fresh slice, then sleeps, so a
//! newly opened screen is populated on the first pass. A failed fetch
//! logs a warning and leaves the previous snapshot in place until the
//! next tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tably_client::HttpClient;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::tasks::{BackgroundTasks, TaskKind};

use super::events::SyncEvent;

/// Menu refresh cadence in the diner flow
pub const MENU_POLL: Duration = Duration::from_secs(25);
/// Kitchen dashboard cadence (orders, menu, assistance, stock)
pub const KITCHEN_POLL: Duration = Duration::from_secs(30);
/// Chat cadence while the panel is open
pub const CHAT_POLL: Duration = Duration::from_secs(5);
/// Tracked-order cadence on the status screen
pub const STATUS_POLL: Duration = Duration::from_secs(30);

/// Knobs the UI flips to steer the on-demand pollers
#[derive(Default)]
pub struct PollTargets {
    /// Chat fetches happen only while the panel is open
    chat_open: AtomicBool,
    /// Order tracked by the status screen
    status_order: Mutex<Option<String>>,
    /// Diner whose history the orders screen shows
    history_user: Mutex<Option<String>>,
}

impl PollTargets {
    pub fn set_chat_open(&self, open: bool) {
        self.chat_open.store(open, Ordering::Relaxed);
    }

    pub fn chat_open(&self) -> bool {
        self.chat_open.load(Ordering::Relaxed)
    }

    pub async fn watch_order(&self, order_id: Option<String>) {
        *self.status_order.lock().await = order_id;
    }

    pub async fn watch_history(&self, user_id: Option<String>) {
        *self.history_user.lock().await = user_id;
    }

    async fn status_order(&self) -> Option<String> {
        self.status_order.lock().await.clone()
    }

    async fn history_user(&self) -> Option<String> {
        self.history_user.lock().await.clone()
    }
}

/// Spawn the diner-flow pollers
pub fn spawn_diner(
    client: &HttpClient,
    restaurant_id: &str,
    targets: Arc<PollTargets>,
    events: mpsc::UnboundedSender<SyncEvent>,
    tasks: &mut BackgroundTasks,
) {
    let token = tasks.shutdown_token();

    spawn_restaurant_warmup(client, restaurant_id, events.clone(), tasks);
    spawn_menu_poller(client, restaurant_id, MENU_POLL, events.clone(), token.clone(), tasks);

    // tracked order status
    {
        let client = client.clone();
        let events = events.clone();
        let targets = targets.clone();
        let token = token.clone();
        tasks.spawn("order_status_poller", TaskKind::Periodic, async move {
            loop {
                if let Some(order_id) = targets.status_order().await {
                    match client.order(&order_id).await {
                        Ok(order) => {
                            let _ = events.send(SyncEvent::OrderStatus(order));
                        }
                        Err(e) => tracing::warn!(order_id, error = %e, "Order status poll failed"),
                    }
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(STATUS_POLL) => {}
                }
            }
        });
    }

    // order history of the logged-in diner
    {
        let client = client.clone();
        let events = events.clone();
        let targets = targets.clone();
        let token = token.clone();
        tasks.spawn("history_poller", TaskKind::Periodic, async move {
            loop {
                if let Some(user_id) = targets.history_user().await {
                    match client.orders_for_user(&user_id).await {
                        Ok(orders) => {
                            let _ = events.send(SyncEvent::History(orders));
                        }
                        Err(e) => tracing::warn!(user_id, error = %e, "History poll failed"),
                    }
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(STATUS_POLL) => {}
                }
            }
        });
    }
}

/// Spawn the kitchen-console pollers
pub fn spawn_kitchen(
    client: &HttpClient,
    restaurant_id: &str,
    targets: Arc<PollTargets>,
    events: mpsc::UnboundedSender<SyncEvent>,
    tasks: &mut BackgroundTasks,
) {
    let token = tasks.shutdown_token();

    spawn_menu_poller(client, restaurant_id, KITCHEN_POLL, events.clone(), token.clone(), tasks);

    {
        let client = client.clone();
        let events = events.clone();
        let restaurant_id = restaurant_id.to_string();
        let token = token.clone();
        tasks.spawn("orders_poller", TaskKind::Periodic, async move {
            loop {
                match client.live_orders(&restaurant_id).await {
                    Ok(orders) => {
                        let _ = events.send(SyncEvent::Orders(orders));
                    }
                    Err(e) => tracing::warn!(error = %e, "Orders poll failed"),
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(KITCHEN_POLL) => {}
                }
            }
        });
    }

    {
        let client = client.clone();
        let events = events.clone();
        let restaurant_id = restaurant_id.to_string();
        let token = token.clone();
        tasks.spawn("assistance_poller", TaskKind::Periodic, async move {
            loop {
                match client.waiter_requests(&restaurant_id).await {
                    Ok(requests) => {
                        let _ = events.send(SyncEvent::Assistance(requests));
                    }
                    Err(e) => tracing::warn!(error = %e, "Assistance poll failed"),
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(KITCHEN_POLL) => {}
                }
            }
        });
    }

    {
        let client = client.clone();
        let events = events.clone();
        let restaurant_id = restaurant_id.to_string();
        let token = token.clone();
        tasks.spawn("stock_poller", TaskKind::Periodic, async move {
            loop {
                match client.stock(&restaurant_id).await {
                    Ok(stock) => {
                        let _ = events.send(SyncEvent::Stock(stock));
                    }
                    Err(e) => tracing::warn!(error = %e, "Stock poll failed"),
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(KITCHEN_POLL) => {}
                }
            }
        });
    }

    // chat polls fast, but only while the panel is open
    {
        let client = client.clone();
        let events = events.clone();
        let restaurant_id = restaurant_id.to_string();
        let targets = targets.clone();
        let token = token.clone();
        tasks.spawn("chat_poller", TaskKind::Periodic, async move {
            loop {
                if targets.chat_open() {
                    match client.messages(&restaurant_id).await {
                        Ok(messages) => {
                            let _ = events.send(SyncEvent::Messages(messages));
                        }
                        Err(e) => tracing::warn!(error = %e, "Chat poll failed"),
                    }
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(CHAT_POLL) => {}
                }
            }
        });
    }
}

fn spawn_restaurant_warmup(
    client: &HttpClient,
    restaurant_id: &str,
    events: mpsc::UnboundedSender<SyncEvent>,
    tasks: &mut BackgroundTasks,
) {
    let client = client.clone();
    let restaurant_id = restaurant_id.to_string();
    tasks.spawn("restaurant_warmup", TaskKind::Warmup, async move {
        match client.restaurant(&restaurant_id).await {
            Ok(Some(restaurant)) => {
                let _ = events.send(SyncEvent::Restaurant(restaurant));
            }
            Ok(None) => tracing::warn!(restaurant_id, "Restaurant not found"),
            Err(e) => tracing::warn!(restaurant_id, error = %e, "Restaurant fetch failed"),
        }
    });
}

fn spawn_menu_poller(
    client: &HttpClient,
    restaurant_id: &str,
    period: Duration,
    events: mpsc::UnboundedSender<SyncEvent>,
    token: CancellationToken,
    tasks: &mut BackgroundTasks,
) {
    let client = client.clone();
    let restaurant_id = restaurant_id.to_string();
    tasks.spawn("menu_poller", TaskKind::Periodic, async move {
        loop {
            match client.menu(&restaurant_id).await {
                Ok(menu) => {
                    let _ = events.send(SyncEvent::Menu(menu));
                }
                Err(e) => tracing::warn!(error = %e, "Menu poll failed"),
            }
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(period) => {}
            }
        }
    });
}

/// One-off refresh of a tracked order, outside the poll cadence
pub fn refresh_order(client: &HttpClient, order_id: &str, events: &mpsc::UnboundedSender<SyncEvent>) {
    let client = client.clone();
    let order_id = order_id.to_string();
    let events = events.clone();
    tokio::spawn(async move {
        match client.order(&order_id).await {
            Ok(order) => {
                let _ = events.send(SyncEvent::OrderStatus(order));
            }
            Err(e) => tracing::warn!(order_id, error = %e, "Order refresh failed"),
        }
    });
}

/// One-off refresh of a diner's order history
pub fn refresh_history(client: &HttpClient, user_id: &str, events: &mpsc::UnboundedSender<SyncEvent>) {
    let client = client.clone();
    let user_id = user_id.to_string();
    let events = events.clone();
    tokio::spawn(async move {
        match client.orders_for_user(&user_id).await {
            Ok(orders) => {
                let _ = events.send(SyncEvent::History(orders));
            }
            Err(e) => tracing::warn!(user_id, error = %e, "History refresh failed"),
        }
    });
}

/// One-off chat refresh, for when the panel opens
pub fn refresh_messages(
    client: &HttpClient,
    restaurant_id: &str,
    events: &mpsc::UnboundedSender<SyncEvent>,
) {
    let client = client.clone();
    let restaurant_id = restaurant_id.to_string();
    let events = events.clone();
    tokio::spawn(async move {
        match client.messages(&restaurant_id).await {
            Ok(messages) => {
                let _ = events.send(SyncEvent::Messages(messages));
            }
            Err(e) => tracing::warn!(error = %e, "Chat refresh failed"),
        }
    });
}
