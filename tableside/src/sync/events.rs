//! Events flowing from pollers and commands into the UI

use shared::models::{ChatMessage, MenuCategory, Order, Restaurant, StockItem, WaiterRequest};

/// A replaced state slice or a command outcome
#[derive(Debug)]
pub enum SyncEvent {
    /// Fresh menu snapshot
    Menu(Vec<MenuCategory>),
    /// Fresh open-order list
    Orders(Vec<Order>),
    /// Fresh stock list
    Stock(Vec<StockItem>),
    /// Fresh assistance-request list
    Assistance(Vec<WaiterRequest>),
    /// Fresh chat history
    Messages(Vec<ChatMessage>),
    /// The tenant record
    Restaurant(Restaurant),
    /// Latest state of the tracked order
    OrderStatus(Order),
    /// Order history of the logged-in diner
    History(Vec<Order>),
    /// Result of a dispatched command
    Command(CommandOutcome),
}

/// What a dispatched command did
#[derive(Debug)]
pub enum CommandOutcome {
    OrderCompleted {
        order_id: String,
    },
    AvailabilitySet {
        category_id: String,
        item_name: String,
        is_available: bool,
    },
    StockUpdated {
        stock_id: String,
        quantity: f64,
    },
    WaiterCalled,
    MessageSent(ChatMessage),
    Failed {
        action: &'static str,
        error: String,
    },
}
