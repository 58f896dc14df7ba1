//! Backend mutations as dispatched commands
//!
//! A command runs on its own task and reports back through the event
//! channel. The UI applies the change to its slices only on a success
//! outcome; on failure the slice stays as-is until the next poll.

use tably_client::{ClientResult, HttpClient};
use tokio::sync::mpsc;

use shared::models::{AvailabilityUpdate, ChatMessage, StockUpdate, WaiterCall};

use super::events::{CommandOutcome, SyncEvent};

/// Mutations the UI can dispatch
#[derive(Debug, Clone)]
pub enum Command {
    CompleteOrder {
        order_id: String,
    },
    SetAvailability {
        category_id: String,
        item_name: String,
        is_available: bool,
    },
    UpdateStock {
        stock_id: String,
        quantity: f64,
    },
    CallWaiter(WaiterCall),
    SendMessage(ChatMessage),
}

impl Command {
    fn action(&self) -> &'static str {
        match self {
            Command::CompleteOrder { .. } => "complete order",
            Command::SetAvailability { .. } => "update availability",
            Command::UpdateStock { .. } => "update stock",
            Command::CallWaiter(_) => "call waiter",
            Command::SendMessage(_) => "send message",
        }
    }
}

/// Run a command in the background, reporting through the event channel
pub fn dispatch(client: &HttpClient, command: Command, events: &mpsc::UnboundedSender<SyncEvent>) {
    let client = client.clone();
    let events = events.clone();
    tokio::spawn(async move {
        let action = command.action();
        let outcome = match run(&client, command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(action, error = %e, "Command failed");
                CommandOutcome::Failed {
                    action,
                    error: e.to_string(),
                }
            }
        };
        let _ = events.send(SyncEvent::Command(outcome));
    });
}

async fn run(client: &HttpClient, command: Command) -> ClientResult<CommandOutcome> {
    match command {
        Command::CompleteOrder { order_id } => {
            client.complete_order(&order_id).await?;
            tracing::info!(order_id, "Order marked complete");
            Ok(CommandOutcome::OrderCompleted { order_id })
        }
        Command::SetAvailability {
            category_id,
            item_name,
            is_available,
        } => {
            let update = AvailabilityUpdate {
                item_name: item_name.clone(),
                is_available,
            };
            client.set_item_availability(&category_id, &update).await?;
            Ok(CommandOutcome::AvailabilitySet {
                category_id,
                item_name,
                is_available,
            })
        }
        Command::UpdateStock { stock_id, quantity } => {
            client.update_stock(&stock_id, &StockUpdate { quantity }).await?;
            Ok(CommandOutcome::StockUpdated { stock_id, quantity })
        }
        Command::CallWaiter(call) => {
            client.call_waiter(&call).await?;
            tracing::info!(table = call.table_number, reason = %call.reason.label(), "Waiter called");
            Ok(CommandOutcome::WaiterCalled)
        }
        Command::SendMessage(message) => {
            client.send_message(&message).await?;
            Ok(CommandOutcome::MessageSent(message))
        }
    }
}
