//! Kitchen console
//!
//! Five panes over the polled slices: live orders, menu availability,
//! assistance requests, stock, and the staff chat. Mutations dispatch
//! as commands and the local slice changes only on a success outcome.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use shared::models::{
    ChatMessage, DEFAULT_CURRENCY, MenuCategory, Order, StockItem, WaiterRequest,
};
use shared::money::{format_cents, to_cents};
use tably_client::HttpClient;

use crate::config::Config;
use crate::sync::poller::{self, PollTargets};
use crate::sync::{Command, CommandOutcome, SyncEvent, commands};
use crate::tasks::BackgroundTasks;

use super::widgets::{self, Banner, format_time, selected_style, step_cursor, title_block};
use super::{Tui, restore_terminal, setup_terminal};

/// Run the kitchen console until the operator quits
pub async fn run(config: &Config, restaurant_id: &str, operator: &str) -> anyhow::Result<()> {
    let client = config.client_config().build_http_client();

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let targets = Arc::new(PollTargets::default());
    let mut tasks = BackgroundTasks::new();
    poller::spawn_kitchen(&client, restaurant_id, targets.clone(), events_tx.clone(), &mut tasks);

    let mut terminal = setup_terminal()?;
    let mut app = KitchenApp::new(
        client,
        restaurant_id.to_string(),
        operator.to_string(),
        targets,
        events_tx,
        events_rx,
    );
    let result = app.run(&mut terminal).await;
    restore_terminal(&mut terminal)?;

    drop(app);
    tasks.shutdown().await;
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Orders,
    Menu,
    Assistance,
    Stock,
    Chat,
}

impl Pane {
    const ALL: [Pane; 5] = [
        Pane::Orders,
        Pane::Menu,
        Pane::Assistance,
        Pane::Stock,
        Pane::Chat,
    ];

    fn title(self) -> &'static str {
        match self {
            Pane::Orders => "Orders",
            Pane::Menu => "Menu",
            Pane::Assistance => "Assistance",
            Pane::Stock => "Stock",
            Pane::Chat => "Chat",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

pub struct KitchenApp {
    client: HttpClient,
    restaurant_id: String,
    operator: String,
    targets: Arc<PollTargets>,
    events_tx: mpsc::UnboundedSender<SyncEvent>,
    events_rx: mpsc::UnboundedReceiver<SyncEvent>,

    pane: Pane,

    orders: Vec<Order>,
    menu: Vec<MenuCategory>,
    assistance: Vec<WaiterRequest>,
    stock: Vec<StockItem>,
    messages: Vec<ChatMessage>,
    /// Sent locally, not yet seen in a poll
    pending: Vec<ChatMessage>,
    /// Assistance requests hidden on this console
    dismissed: HashSet<String>,

    order_idx: usize,
    cat_idx: usize,
    item_idx: usize,
    assist_idx: usize,
    stock_idx: usize,

    editing_stock: bool,
    stock_input: Input,
    chat_editing: bool,
    chat_input: Input,

    banner: Option<Banner>,
    should_quit: bool,
}

impl KitchenApp {
    pub fn new(
        client: HttpClient,
        restaurant_id: String,
        operator: String,
        targets: Arc<PollTargets>,
        events_tx: mpsc::UnboundedSender<SyncEvent>,
        events_rx: mpsc::UnboundedReceiver<SyncEvent>,
    ) -> Self {
        Self {
            client,
            restaurant_id,
            operator,
            targets,
            events_tx,
            events_rx,
            pane: Pane::Orders,
            orders: Vec::new(),
            menu: Vec::new(),
            assistance: Vec::new(),
            stock: Vec::new(),
            messages: Vec::new(),
            pending: Vec::new(),
            dismissed: HashSet::new(),
            order_idx: 0,
            cat_idx: 0,
            item_idx: 0,
            assist_idx: 0,
            stock_idx: 0,
            editing_stock: false,
            stock_input: Input::default(),
            chat_editing: false,
            chat_input: Input::default(),
            banner: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        self.on_key(key);
                    }
                }
            }

            while let Ok(event) = self.events_rx.try_recv() {
                self.apply(event);
            }

            if self.banner.as_ref().is_some_and(|b| b.is_expired()) {
                self.banner = None;
            }
            if self.should_quit {
                return Ok(());
            }
        }
    }

    // ---- server events ----

    fn apply(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Orders(orders) => {
                self.orders = orders;
                self.order_idx = self.order_idx.min(self.orders.len().saturating_sub(1));
            }
            SyncEvent::Menu(menu) => {
                self.menu = menu;
                self.cat_idx = self.cat_idx.min(self.menu.len().saturating_sub(1));
                self.clamp_item_idx();
            }
            SyncEvent::Assistance(requests) => {
                self.assistance = requests;
                self.assist_idx = self.assist_idx.min(self.open_requests().len().saturating_sub(1));
            }
            SyncEvent::Stock(stock) => {
                self.stock = stock;
                self.stock_idx = self.stock_idx.min(self.stock.len().saturating_sub(1));
            }
            SyncEvent::Messages(messages) => {
                self.messages = messages;
                self.pending.retain(|p| {
                    !self.messages.iter().any(|m| m.message_id == p.message_id)
                });
            }
            SyncEvent::Command(outcome) => self.apply_outcome(outcome),
            // diner slices are not polled in this console
            _ => {}
        }
    }

    fn apply_outcome(&mut self, outcome: CommandOutcome) {
        match outcome {
            CommandOutcome::OrderCompleted { order_id } => {
                self.orders.retain(|o| o.id != order_id);
                self.order_idx = self.order_idx.min(self.orders.len().saturating_sub(1));
                self.banner = Some(Banner::info("Order marked complete"));
            }
            CommandOutcome::AvailabilitySet {
                category_id,
                item_name,
                is_available,
            } => {
                if let Some(item) = self
                    .menu
                    .iter_mut()
                    .find(|c| c.id == category_id)
                    .and_then(|c| c.items.iter_mut().find(|i| i.name == item_name))
                {
                    item.is_available = is_available;
                }
                let state = if is_available { "available" } else { "unavailable" };
                self.banner = Some(Banner::info(format!("{item_name} is now {state}")));
            }
            CommandOutcome::StockUpdated { stock_id, quantity } => {
                if let Some(line) = self.stock.iter_mut().find(|s| s.id == stock_id) {
                    line.quantity = quantity;
                }
                self.banner = Some(Banner::info("Stock updated"));
            }
            CommandOutcome::MessageSent(message) => self.pending.push(message),
            CommandOutcome::Failed { action, error } => {
                self.banner = Some(Banner::error(format!("Failed to {action}: {error}")));
            }
            CommandOutcome::WaiterCalled => {}
        }
    }

    // ---- input ----

    fn on_key(&mut self, key: KeyEvent) {
        if self.editing_stock {
            return self.on_stock_edit_key(key);
        }
        if self.chat_editing {
            return self.on_chat_edit_key(key);
        }
        match key.code {
            KeyCode::Char('q') => {
                self.targets.set_chat_open(false);
                self.should_quit = true;
            }
            KeyCode::Tab => {
                let next = (self.pane.index() + 1) % Pane::ALL.len();
                self.set_pane(Pane::ALL[next]);
            }
            KeyCode::BackTab => {
                let prev = (self.pane.index() + Pane::ALL.len() - 1) % Pane::ALL.len();
                self.set_pane(Pane::ALL[prev]);
            }
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                self.set_pane(Pane::ALL[idx]);
            }
            _ => match self.pane {
                Pane::Orders => self.on_orders_key(key),
                Pane::Menu => self.on_menu_key(key),
                Pane::Assistance => self.on_assistance_key(key),
                Pane::Stock => self.on_stock_key(key),
                Pane::Chat => self.on_chat_key(key),
            },
        }
    }

    fn set_pane(&mut self, pane: Pane) {
        if pane == self.pane {
            return;
        }
        let was_chat = self.pane == Pane::Chat;
        self.pane = pane;
        if pane == Pane::Chat {
            self.targets.set_chat_open(true);
            poller::refresh_messages(&self.client, &self.restaurant_id, &self.events_tx);
        } else if was_chat {
            self.targets.set_chat_open(false);
            self.chat_editing = false;
        }
    }

    fn on_orders_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.order_idx = step_cursor(self.order_idx, self.orders.len(), false),
            KeyCode::Down => self.order_idx = step_cursor(self.order_idx, self.orders.len(), true),
            KeyCode::Char('c') | KeyCode::Enter => {
                if let Some(order) = self.orders.get(self.order_idx) {
                    commands::dispatch(
                        &self.client,
                        Command::CompleteOrder {
                            order_id: order.id.clone(),
                        },
                        &self.events_tx,
                    );
                }
            }
            _ => {}
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => {
                self.cat_idx = self.cat_idx.saturating_sub(1);
                self.item_idx = 0;
            }
            KeyCode::Right => {
                self.cat_idx = (self.cat_idx + 1).min(self.menu.len().saturating_sub(1));
                self.item_idx = 0;
            }
            KeyCode::Up => {
                let len = self.current_category().map(|c| c.items.len()).unwrap_or(0);
                self.item_idx = step_cursor(self.item_idx, len, false);
            }
            KeyCode::Down => {
                let len = self.current_category().map(|c| c.items.len()).unwrap_or(0);
                self.item_idx = step_cursor(self.item_idx, len, true);
            }
            KeyCode::Char('a') | KeyCode::Enter => {
                let Some(category) = self.current_category() else {
                    return;
                };
                let Some(item) = category.items.get(self.item_idx) else {
                    return;
                };
                commands::dispatch(
                    &self.client,
                    Command::SetAvailability {
                        category_id: category.id.clone(),
                        item_name: item.name.clone(),
                        is_available: !item.is_available,
                    },
                    &self.events_tx,
                );
            }
            _ => {}
        }
    }

    fn on_assistance_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.assist_idx = step_cursor(self.assist_idx, self.open_requests().len(), false);
            }
            KeyCode::Down => {
                self.assist_idx = step_cursor(self.assist_idx, self.open_requests().len(), true);
            }
            KeyCode::Char('d') | KeyCode::Enter => {
                let id = self
                    .open_requests()
                    .get(self.assist_idx)
                    .map(|request| request.id.clone());
                if let Some(id) = id {
                    self.dismissed.insert(id);
                    self.assist_idx = self
                        .assist_idx
                        .min(self.open_requests().len().saturating_sub(1));
                }
            }
            _ => {}
        }
    }

    fn on_stock_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.stock_idx = step_cursor(self.stock_idx, self.stock.len(), false),
            KeyCode::Down => self.stock_idx = step_cursor(self.stock_idx, self.stock.len(), true),
            KeyCode::Char('e') | KeyCode::Enter => {
                if self.stock.get(self.stock_idx).is_some() {
                    self.stock_input.reset();
                    self.editing_stock = true;
                }
            }
            _ => {}
        }
    }

    fn on_stock_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.editing_stock = false,
            KeyCode::Enter => {
                let parsed = self.stock_input.value().trim().parse::<f64>();
                match parsed {
                    Ok(quantity) if quantity >= 0.0 && quantity.is_finite() => {
                        if let Some(line) = self.stock.get(self.stock_idx) {
                            commands::dispatch(
                                &self.client,
                                Command::UpdateStock {
                                    stock_id: line.id.clone(),
                                    quantity,
                                },
                                &self.events_tx,
                            );
                        }
                        self.editing_stock = false;
                    }
                    _ => self.banner = Some(Banner::error("Enter a non-negative quantity")),
                }
            }
            _ => {
                self.stock_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn on_chat_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char('i') | KeyCode::Enter = key.code {
            self.chat_editing = true;
        }
    }

    fn on_chat_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.chat_editing = false,
            KeyCode::Enter => {
                let body = self.chat_input.value().trim().to_string();
                if body.is_empty() {
                    return;
                }
                let message = ChatMessage::new(&self.restaurant_id, &self.operator, body);
                commands::dispatch(
                    &self.client,
                    Command::SendMessage(message),
                    &self.events_tx,
                );
                self.chat_input.reset();
            }
            _ => {
                self.chat_input.handle_event(&Event::Key(key));
            }
        }
    }

    // ---- helpers ----

    fn current_category(&self) -> Option<&MenuCategory> {
        self.menu.get(self.cat_idx)
    }

    fn clamp_item_idx(&mut self) {
        let len = self.current_category().map(|c| c.items.len()).unwrap_or(0);
        self.item_idx = self.item_idx.min(len.saturating_sub(1));
    }

    /// Assistance requests not yet dismissed on this console
    fn open_requests(&self) -> Vec<&WaiterRequest> {
        self.assistance
            .iter()
            .filter(|r| !self.dismissed.contains(&r.id))
            .collect()
    }

    /// Poll snapshot plus optimistic local sends
    fn chat_log(&self) -> Vec<(&ChatMessage, bool)> {
        let mut log: Vec<(&ChatMessage, bool)> =
            self.messages.iter().map(|m| (m, false)).collect();
        log.extend(self.pending.iter().map(|m| (m, true)));
        log
    }

    // ---- drawing ----

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        let titles: Vec<String> = Pane::ALL
            .iter()
            .map(|pane| {
                let badge = match pane {
                    Pane::Orders => self.orders.len(),
                    Pane::Assistance => self.open_requests().len(),
                    _ => 0,
                };
                if badge > 0 {
                    format!("{} ({})", pane.title(), badge)
                } else {
                    pane.title().to_string()
                }
            })
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.pane.index())
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(title_block(&format!("Tably Kitchen - {}", self.restaurant_id)));
        f.render_widget(tabs, chunks[0]);

        match self.pane {
            Pane::Orders => self.draw_orders(f, chunks[1]),
            Pane::Menu => self.draw_menu(f, chunks[1]),
            Pane::Assistance => self.draw_assistance(f, chunks[1]),
            Pane::Stock => self.draw_stock(f, chunks[1]),
            Pane::Chat => self.draw_chat(f, chunks[1]),
        }

        f.render_widget(widgets::footer(&self.banner, &self.hints()), chunks[2]);
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.editing_stock {
            return vec![("Enter", "save"), ("Esc", "cancel")];
        }
        if self.chat_editing {
            return vec![("Enter", "send"), ("Esc", "done")];
        }
        let mut hints = vec![("Tab", "pane"), ("1-5", "jump")];
        match self.pane {
            Pane::Orders => hints.push(("c", "complete")),
            Pane::Menu => {
                hints.push(("←→", "category"));
                hints.push(("a", "toggle availability"));
            }
            Pane::Assistance => hints.push(("d", "dismiss")),
            Pane::Stock => hints.push(("e", "edit quantity")),
            Pane::Chat => hints.push(("i", "type")),
        }
        hints.push(("q", "quit"));
        hints
    }

    fn draw_orders(&self, f: &mut Frame, area: Rect) {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(area);

        let selected = self.order_idx.min(self.orders.len().saturating_sub(1));
        let rows: Vec<ListItem> = self
            .orders
            .iter()
            .enumerate()
            .map(|(row, order)| {
                let table = order
                    .table_number
                    .map(|n| format!("T{n}"))
                    .unwrap_or_else(|| "T?".to_string());
                let paid = if order.paid { "paid" } else { "due " };
                let when = order
                    .created_at
                    .as_deref()
                    .map(format_time)
                    .unwrap_or_default();
                let mut line = Line::from(vec![
                    Span::raw(format!("{:<22}", order.order_number)),
                    Span::raw(format!("{:<5}", table)),
                    Span::styled(
                        format!("{:>9}", format_cents(to_cents(order.total), DEFAULT_CURRENCY)),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw(format!("  {paid}  ")),
                    Span::styled(when, Style::default().add_modifier(Modifier::DIM)),
                ]);
                if row == selected && !self.orders.is_empty() {
                    line = line.style(selected_style());
                }
                ListItem::new(line)
            })
            .collect();

        let title = if self.orders.is_empty() {
            "Open Orders (none)".to_string()
        } else {
            format!("Open Orders ({})", self.orders.len())
        };
        f.render_widget(List::new(rows).block(title_block(&title)), body[0]);

        let detail: Vec<Line> = match self.orders.get(selected) {
            Some(order) if !self.orders.is_empty() => {
                let mut lines = vec![Line::from(Span::styled(
                    order.order_number.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))];
                if let Some(user) = &order.user_id {
                    lines.push(Line::from(format!("For: {user}")));
                }
                lines.push(Line::from(""));
                for item in &order.items {
                    let volume = item
                        .volume
                        .as_deref()
                        .map(|v| format!(" ({v})"))
                        .unwrap_or_default();
                    lines.push(Line::from(format!(
                        "{}x {}{}",
                        item.quantity, item.name, volume
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(format!(
                    "Total {}",
                    format_cents(to_cents(order.total), DEFAULT_CURRENCY)
                )));
                lines
            }
            _ => vec![Line::from("No order selected")],
        };
        f.render_widget(
            Paragraph::new(detail).wrap(Wrap { trim: true }).block(title_block("Ticket")),
            body[1],
        );
    }

    fn draw_menu(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let titles: Vec<String> = self.menu.iter().map(|c| c.category.clone()).collect();
        let tabs = Tabs::new(titles)
            .select(self.cat_idx.min(self.menu.len().saturating_sub(1)))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(title_block("Categories"));
        f.render_widget(tabs, chunks[0]);

        let items: &[shared::models::MenuItem] = self
            .current_category()
            .map(|c| c.items.as_slice())
            .unwrap_or(&[]);
        let selected = self.item_idx.min(items.len().saturating_sub(1));
        let rows: Vec<ListItem> = items
            .iter()
            .enumerate()
            .map(|(row, item)| {
                let (state, style) = if item.is_available {
                    ("ON ", Style::default().fg(Color::Green))
                } else {
                    ("OFF", Style::default().fg(Color::Red))
                };
                let mut line = Line::from(vec![
                    Span::styled(format!("[{state}] "), style),
                    Span::raw(format!("{:<28}", item.name)),
                    Span::styled(
                        format!("{:>9}", format_cents(to_cents(item.price), DEFAULT_CURRENCY)),
                        Style::default().fg(Color::Green),
                    ),
                ]);
                if row == selected && !items.is_empty() {
                    line = line.style(selected_style());
                }
                ListItem::new(line)
            })
            .collect();
        f.render_widget(List::new(rows).block(title_block("Availability")), chunks[1]);
    }

    fn draw_assistance(&self, f: &mut Frame, area: Rect) {
        let open = self.open_requests();
        let selected = self.assist_idx.min(open.len().saturating_sub(1));
        let rows: Vec<ListItem> = open
            .iter()
            .enumerate()
            .map(|(row, request)| {
                let when = request
                    .created_at
                    .as_deref()
                    .map(format_time)
                    .unwrap_or_default();
                let mut line = Line::from(vec![
                    Span::styled(
                        format!("Table {:<4}", request.table_number),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("{:<16}", request.reason)),
                    Span::styled(when, Style::default().add_modifier(Modifier::DIM)),
                ]);
                if row == selected && !open.is_empty() {
                    line = line.style(selected_style());
                }
                ListItem::new(line)
            })
            .collect();

        let title = if open.is_empty() {
            "Assistance (no open requests)".to_string()
        } else {
            format!("Assistance ({} open)", open.len())
        };
        f.render_widget(List::new(rows).block(title_block(&title)), area);
    }

    fn draw_stock(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let selected = self.stock_idx.min(self.stock.len().saturating_sub(1));
        let rows: Vec<ListItem> = self
            .stock
            .iter()
            .enumerate()
            .map(|(row, line)| {
                let mut spans = vec![
                    Span::raw(format!("{:<24}", line.name)),
                    Span::raw(format!("{:>8.2} {:<8}", line.quantity, line.unit)),
                    Span::styled(
                        format!("min {:.2}", line.min_quantity),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                ];
                if line.is_low() {
                    spans.push(Span::styled(
                        "  LOW STOCK",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ));
                }
                let mut text = Line::from(spans);
                if row == selected && !self.stock.is_empty() {
                    text = text.style(selected_style());
                }
                ListItem::new(text)
            })
            .collect();

        let low = self.stock.iter().filter(|s| s.is_low()).count();
        let title = if low > 0 {
            format!("Stock ({low} low)")
        } else {
            "Stock".to_string()
        };
        f.render_widget(List::new(rows).block(title_block(&title)), chunks[0]);

        if self.editing_stock {
            let label = self
                .stock
                .get(selected)
                .map(|s| format!("New quantity for {} ({})", s.name, s.unit))
                .unwrap_or_else(|| "New quantity".to_string());
            self.draw_input(f, chunks[1], &label, &self.stock_input, true);
        } else {
            f.render_widget(
                Paragraph::new("Press [e] to adjust the selected item")
                    .block(title_block("Adjust")),
                chunks[1],
            );
        }
    }

    fn draw_chat(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let log = self.chat_log();
        let capacity = chunks[0].height.saturating_sub(2) as usize;
        let skip = log.len().saturating_sub(capacity);
        let rows: Vec<ListItem> = log
            .iter()
            .skip(skip)
            .map(|(message, is_pending)| {
                let own = message.sender == self.operator;
                let sender_style = if own {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                };
                let mut spans = vec![
                    Span::styled(format!("{:<12}", message.sender), sender_style),
                    Span::raw(message.body.clone()),
                ];
                if *is_pending {
                    spans.push(Span::styled(
                        "  (sending)",
                        Style::default().add_modifier(Modifier::DIM),
                    ));
                } else {
                    spans.push(Span::styled(
                        format!("  {}", format_time(&message.created_at)),
                        Style::default().add_modifier(Modifier::DIM),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        f.render_widget(List::new(rows).block(title_block("Staff Chat")), chunks[0]);
        self.draw_input(
            f,
            chunks[1],
            &format!("Message as {}", self.operator),
            &self.chat_input,
            self.chat_editing,
        );
    }

    fn draw_input(&self, f: &mut Frame, area: Rect, label: &str, input: &Input, cursor: bool) {
        let width = area.width.max(3) - 3;
        let scroll = input.visual_scroll(width as usize);
        let widget = Paragraph::new(input.value())
            .scroll((0, scroll as u16))
            .block(title_block(label));
        f.render_widget(widget, area);
        if cursor {
            f.set_cursor_position(Position::new(
                area.x + (input.visual_cursor().saturating_sub(scroll)) as u16 + 1,
                area.y + 1,
            ));
        }
    }
}
