//! Diner flow
//!
//! Login, menu browsing, cart, checkout, and order tracking. Screens
//! map onto the session state; server slices arrive over the event
//! channel and replace local copies wholesale.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use shared::models::{
    DEFAULT_CURRENCY, MenuCategory, Order, OrderStatus, PaymentMethod, Restaurant, WaiterCall,
    WaiterReason,
};
use shared::money::{format_cents, to_cents};
use tably_client::HttpClient;

use crate::checkout;
use crate::config::Config;
use crate::payment;
use crate::session::{CartSession, SessionData, SessionStore, UserIdentity, spawn_persister};
use crate::sync::poller::{self, PollTargets};
use crate::sync::{Command, CommandOutcome, SyncEvent, commands};
use crate::tasks::BackgroundTasks;

use super::widgets::{self, Banner, selected_style, step_cursor, title_block};
use super::{Tui, restore_terminal, setup_terminal};

/// Run the diner flow until the user quits
pub async fn run(config: &Config, restaurant_id: &str, table: Option<u32>) -> anyhow::Result<()> {
    let client = config.client_config().build_http_client();
    let store = SessionStore::new(&config.data_dir);
    let data = store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Session file unreadable, starting fresh");
        SessionData::default()
    });

    let mut tasks = BackgroundTasks::new();
    let persist = spawn_persister(store, &mut tasks);
    let mut session = CartSession::new(data, persist);
    session.set_restaurant_id(restaurant_id);
    if let Some(table) = table {
        session.set_table_number(Some(table));
    }

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let targets = Arc::new(PollTargets::default());
    poller::spawn_diner(&client, restaurant_id, targets.clone(), events_tx.clone(), &mut tasks);

    let mut terminal = setup_terminal()?;
    let mut app = DinerApp::new(
        client,
        session,
        restaurant_id.to_string(),
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
enum Screen {
    Login,
    Menu,
    Cart,
    Payment,
    Confirmation,
    Status,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    None,
    /// Menu filter box has focus
    Search,
    /// Waiter call modal
    Waiter { reason_idx: usize },
    /// Table number prompt on the cart screen
    TableEdit,
    /// Card token prompt for prepaid checkout
    CardToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Name,
    Phone,
}

pub struct DinerApp {
    client: HttpClient,
    session: CartSession,
    restaurant_id: String,
    targets: Arc<PollTargets>,
    events_tx: mpsc::UnboundedSender<SyncEvent>,
    events_rx: mpsc::UnboundedReceiver<SyncEvent>,

    screen: Screen,
    overlay: Overlay,

    menu: Vec<MenuCategory>,
    restaurant: Option<Restaurant>,
    history: Vec<Order>,
    tracked: Option<Order>,

    category_idx: usize,
    item_idx: usize,
    search: Input,

    cart_idx: usize,
    table_input: Input,

    name_input: Input,
    phone_input: Input,
    login_focus: LoginField,

    method_idx: usize,
    token_input: Input,
    confirmed: Option<Order>,
    history_idx: usize,

    banner: Option<Banner>,
    should_quit: bool,
}

impl DinerApp {
    pub fn new(
        client: HttpClient,
        session: CartSession,
        restaurant_id: String,
        targets: Arc<PollTargets>,
        events_tx: mpsc::UnboundedSender<SyncEvent>,
        events_rx: mpsc::UnboundedReceiver<SyncEvent>,
    ) -> Self {
        let screen = if session.user().is_some() {
            Screen::Menu
        } else {
            Screen::Login
        };
        Self {
            client,
            session,
            restaurant_id,
            targets,
            events_tx,
            events_rx,
            screen,
            overlay: Overlay::None,
            menu: Vec::new(),
            restaurant: None,
            history: Vec::new(),
            tracked: None,
            category_idx: 0,
            item_idx: 0,
            search: Input::default(),
            cart_idx: 0,
            table_input: Input::default(),
            name_input: Input::default(),
            phone_input: Input::default(),
            login_focus: LoginField::Name,
            method_idx: 0,
            token_input: Input::default(),
            confirmed: None,
            history_idx: 0,
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
                        self.on_key(key).await;
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
            SyncEvent::Menu(menu) => {
                self.menu = menu;
                let changed = self.session.hydrate_from_menu(&self.menu);
                if changed > 0 {
                    tracing::debug!(changed, "Cart lines refreshed from the menu");
                }
                if self.category_idx > self.menu.len() {
                    self.category_idx = 0;
                }
            }
            SyncEvent::Restaurant(restaurant) => self.restaurant = Some(restaurant),
            SyncEvent::OrderStatus(order) => self.tracked = Some(order),
            SyncEvent::History(orders) => {
                self.history = orders;
                self.history_idx = self.history_idx.min(self.history.len().saturating_sub(1));
            }
            SyncEvent::Command(outcome) => match outcome {
                CommandOutcome::WaiterCalled => {
                    self.banner = Some(Banner::info("Waiter has been called!"));
                }
                CommandOutcome::Failed { action, error } => {
                    self.banner = Some(Banner::error(format!("Failed to {action}: {error}")));
                }
                _ => {}
            },
            // kitchen slices are not polled in this flow
            _ => {}
        }
    }

    // ---- input ----

    async fn on_key(&mut self, key: KeyEvent) {
        match self.overlay {
            Overlay::Search => return self.on_search_key(key),
            Overlay::Waiter { reason_idx } => return self.on_waiter_key(key, reason_idx),
            Overlay::TableEdit => return self.on_table_key(key),
            Overlay::CardToken => return self.on_token_key(key).await,
            Overlay::None => {}
        }
        match self.screen {
            Screen::Login => self.on_login_key(key),
            Screen::Menu => self.on_menu_key(key).await,
            Screen::Cart => self.on_cart_key(key),
            Screen::Payment => self.on_payment_key(key).await,
            Screen::Confirmation => self.on_confirmation_key(key).await,
            Screen::Status => self.on_status_key(key).await,
            Screen::History => self.on_history_key(key).await,
        }
    }

    fn on_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.login_focus = match self.login_focus {
                    LoginField::Name => LoginField::Phone,
                    LoginField::Phone => LoginField::Name,
                };
            }
            KeyCode::Enter => match UserIdentity::new(self.name_input.value(), self.phone_input.value()) {
                Ok(user) => {
                    let name = user.fullname.clone();
                    self.session.login(user);
                    self.banner = Some(Banner::info(format!("Welcome, {name}!")));
                    self.screen = Screen::Menu;
                }
                Err(e) => self.banner = Some(Banner::error(e.to_string())),
            },
            KeyCode::Esc => {
                // browsing as a guest is fine; checkout works without an account
                self.screen = Screen::Menu;
            }
            _ => {
                let field = match self.login_focus {
                    LoginField::Name => &mut self.name_input,
                    LoginField::Phone => &mut self.phone_input,
                };
                field.handle_event(&Event::Key(key));
            }
        }
    }

    async fn on_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') => self.screen = Screen::Cart,
            KeyCode::Char('o') => self.goto_history().await,
            KeyCode::Char('w') => {
                self.table_input.reset();
                self.overlay = Overlay::Waiter { reason_idx: 0 };
            }
            KeyCode::Char('/') => self.overlay = Overlay::Search,
            KeyCode::Left => {
                self.category_idx = self.category_idx.saturating_sub(1);
                self.item_idx = 0;
            }
            KeyCode::Right => {
                self.category_idx = (self.category_idx + 1).min(self.menu.len());
                self.item_idx = 0;
            }
            KeyCode::Up => self.item_idx = step_cursor(self.item_idx, self.visible_items().len(), false),
            KeyCode::Down => self.item_idx = step_cursor(self.item_idx, self.visible_items().len(), true),
            KeyCode::Char('a') | KeyCode::Enter => self.add_selected_item(),
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.overlay = Overlay::None,
            _ => {
                self.search.handle_event(&Event::Key(key));
                self.item_idx = 0;
            }
        }
    }

    fn on_waiter_key(&mut self, key: KeyEvent, reason_idx: usize) {
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Up => {
                self.overlay = Overlay::Waiter {
                    reason_idx: step_cursor(reason_idx, WaiterReason::ALL.len(), false),
                };
            }
            KeyCode::Down => {
                self.overlay = Overlay::Waiter {
                    reason_idx: step_cursor(reason_idx, WaiterReason::ALL.len(), true),
                };
            }
            KeyCode::Enter => self.submit_waiter_call(reason_idx),
            _ => {
                self.table_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn on_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Enter => {
                match self.table_input.value().trim().parse::<u32>() {
                    Ok(table) if table > 0 => {
                        self.session.set_table_number(Some(table));
                        self.overlay = Overlay::None;
                    }
                    _ => self.banner = Some(Banner::error("Enter a valid table number")),
                }
            }
            _ => {
                self.table_input.handle_event(&Event::Key(key));
            }
        }
    }

    async fn on_token_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Enter => {
                let token = self.token_input.value().trim().to_string();
                if token.is_empty() {
                    self.banner = Some(Banner::error("Enter the card token"));
                    return;
                }
                self.overlay = Overlay::None;
                self.pay_by_card(&token).await;
            }
            _ => {
                self.token_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn on_cart_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => self.screen = Screen::Menu,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.cart_idx = step_cursor(self.cart_idx, self.session.items().len(), false),
            KeyCode::Down => self.cart_idx = step_cursor(self.cart_idx, self.session.items().len(), true),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => self.adjust_selected_line(1),
            KeyCode::Char('-') | KeyCode::Left => self.adjust_selected_line(-1),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_line(),
            KeyCode::Char('t') => {
                self.table_input.reset();
                self.overlay = Overlay::TableEdit;
            }
            KeyCode::Char('p') | KeyCode::Enter => {
                if self.session.is_empty() {
                    self.banner = Some(Banner::error("Cart is empty"));
                } else if self.session.table_number().is_none() {
                    self.banner = Some(Banner::error("Select a table number before placing the order"));
                    self.table_input.reset();
                    self.overlay = Overlay::TableEdit;
                } else {
                    self.method_idx = 0;
                    self.screen = Screen::Payment;
                }
            }
            _ => {}
        }
    }

    async fn on_payment_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => self.screen = Screen::Cart,
            KeyCode::Up | KeyCode::Down => self.method_idx = 1 - self.method_idx.min(1),
            KeyCode::Enter => {
                if self.method_idx == 0 {
                    self.place(PaymentMethod::Counter).await;
                } else {
                    self.token_input.reset();
                    self.overlay = Overlay::CardToken;
                }
            }
            _ => {}
        }
    }

    async fn on_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') | KeyCode::Enter => self.screen = Screen::Status,
            KeyCode::Char('m') | KeyCode::Esc => self.goto_menu().await,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn on_status_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') => {
                if let Some(order) = &self.tracked {
                    poller::refresh_order(&self.client, &order.id, &self.events_tx);
                }
            }
            KeyCode::Char('o') => self.goto_history().await,
            KeyCode::Char('m') | KeyCode::Esc => self.goto_menu().await,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn on_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.history_idx = step_cursor(self.history_idx, self.history.len(), false),
            KeyCode::Down => self.history_idx = step_cursor(self.history_idx, self.history.len(), true),
            KeyCode::Enter => {
                if let Some(order) = self.history.get(self.history_idx).cloned() {
                    self.targets.watch_order(Some(order.id.clone())).await;
                    poller::refresh_order(&self.client, &order.id, &self.events_tx);
                    self.tracked = Some(order);
                    self.screen = Screen::Status;
                }
            }
            KeyCode::Char('r') => {
                if let Some(user) = self.session.user() {
                    poller::refresh_history(&self.client, &user.fullname, &self.events_tx);
                }
            }
            KeyCode::Char('m') | KeyCode::Esc => self.goto_menu().await,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    // ---- actions ----

    async fn goto_menu(&mut self) {
        self.targets.watch_order(None).await;
        self.targets.watch_history(None).await;
        self.screen = Screen::Menu;
    }

    async fn goto_history(&mut self) {
        let Some(user) = self.session.user() else {
            self.banner = Some(Banner::error("Sign in to see your orders"));
            return;
        };
        let user_id = user.fullname.clone();
        self.targets.watch_history(Some(user_id.clone())).await;
        poller::refresh_history(&self.client, &user_id, &self.events_tx);
        self.history_idx = 0;
        self.screen = Screen::History;
    }

    /// Indices into `menu` matching the category tab and search filter
    fn visible_items(&self) -> Vec<(usize, usize)> {
        let needle = self.search.value().trim().to_lowercase();
        let mut visible = Vec::new();
        for (ci, category) in self.menu.iter().enumerate() {
            if self.category_idx > 0 && ci != self.category_idx - 1 {
                continue;
            }
            for (ii, item) in category.items.iter().enumerate() {
                if !needle.is_empty() && !item.name.to_lowercase().contains(&needle) {
                    continue;
                }
                visible.push((ci, ii));
            }
        }
        visible
    }

    fn add_selected_item(&mut self) {
        let visible = self.visible_items();
        if visible.is_empty() {
            return;
        }
        let (ci, ii) = visible[self.item_idx.min(visible.len() - 1)];
        let category_id = self.menu[ci].id.clone();
        let item = self.menu[ci].items[ii].clone();
        if !item.is_available {
            self.banner = Some(Banner::error(format!("{} is currently unavailable", item.name)));
            return;
        }
        self.session.add_to_cart(&category_id, &item);
        self.banner = Some(Banner::info(format!("Added {} to the cart", item.name)));
    }

    fn adjust_selected_line(&mut self, delta: i64) {
        let Some(line) = self.session.items().get(self.cart_idx) else {
            return;
        };
        if delta > 0 && !line.is_available {
            self.banner = Some(Banner::error(format!("{} is currently unavailable", line.name)));
            return;
        }
        let line_id = line.id.clone();
        self.session.adjust_quantity(&line_id, delta);
        self.cart_idx = self.cart_idx.min(self.session.items().len().saturating_sub(1));
    }

    fn remove_selected_line(&mut self) {
        let Some(line) = self.session.items().get(self.cart_idx) else {
            return;
        };
        let line_id = line.id.clone();
        self.session.update_quantity(&line_id, 0);
        self.cart_idx = self.cart_idx.min(self.session.items().len().saturating_sub(1));
    }

    fn submit_waiter_call(&mut self, reason_idx: usize) {
        let reason = WaiterReason::ALL[reason_idx.min(WaiterReason::ALL.len() - 1)];
        let table_number = if self.table_input.value().trim().is_empty() {
            self.session.table_number()
        } else {
            self.table_input.value().trim().parse::<u32>().ok()
        };
        let Some(table_number) = table_number.filter(|n| *n > 0) else {
            self.banner = Some(Banner::error("Enter a valid table number"));
            return;
        };
        self.session.set_table_number(Some(table_number));
        let call = WaiterCall {
            restaurant_id: self.restaurant_id.clone(),
            table_number,
            reason,
        };
        commands::dispatch(&self.client, Command::CallWaiter(call), &self.events_tx);
        self.overlay = Overlay::None;
    }

    async fn place(&mut self, method: PaymentMethod) {
        match checkout::place_order(&self.client, &mut self.session, method).await {
            Ok(order) => {
                self.targets.watch_order(Some(order.id.clone())).await;
                self.tracked = Some(order.clone());
                self.confirmed = Some(order);
                self.screen = Screen::Confirmation;
            }
            Err(e) => self.banner = Some(Banner::error(format!("Order failed: {e}"))),
        }
    }

    async fn pay_by_card(&mut self, token: &str) {
        let totals = self.session.totals();
        let capture = payment::capture_from_token(token, totals.total);
        match payment::capture_card_payment(&self.client, &capture).await {
            Ok(()) => self.place(PaymentMethod::GooglePay).await,
            Err(e) => self.banner = Some(Banner::error(format!("Payment failed: {e}"))),
        }
    }

    fn currency(&self) -> &str {
        self.restaurant
            .as_ref()
            .map(|r| r.currency_symbol())
            .unwrap_or(DEFAULT_CURRENCY)
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

        self.draw_header(f, chunks[0]);
        match self.screen {
            Screen::Login => self.draw_login(f, chunks[1]),
            Screen::Menu => self.draw_menu(f, chunks[1]),
            Screen::Cart => self.draw_cart(f, chunks[1]),
            Screen::Payment => self.draw_payment(f, chunks[1]),
            Screen::Confirmation => self.draw_confirmation(f, chunks[1]),
            Screen::Status => self.draw_status(f, chunks[1]),
            Screen::History => self.draw_history(f, chunks[1]),
        }
        f.render_widget(widgets::footer(&self.banner, &self.hints()), chunks[2]);

        match self.overlay {
            Overlay::Waiter { reason_idx } => self.draw_waiter_modal(f, reason_idx),
            Overlay::TableEdit => self.draw_prompt(f, "Table Number", &self.table_input),
            Overlay::CardToken => self.draw_prompt(f, "Card Token", &self.token_input),
            _ => {}
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match self.overlay {
            Overlay::Search => return vec![("Enter/Esc", "done")],
            Overlay::Waiter { .. } => return vec![("↑↓", "reason"), ("Enter", "call"), ("Esc", "close")],
            Overlay::TableEdit => return vec![("Enter", "set table"), ("Esc", "cancel")],
            Overlay::CardToken => return vec![("Enter", "pay"), ("Esc", "cancel")],
            Overlay::None => {}
        }
        match self.screen {
            Screen::Login => vec![
                ("Tab", "switch field"),
                ("Enter", "sign in"),
                ("Esc", "continue as guest"),
            ],
            Screen::Menu => vec![
                ("↑↓", "item"),
                ("←→", "category"),
                ("a", "add"),
                ("/", "search"),
                ("w", "waiter"),
                ("c", "cart"),
                ("o", "orders"),
                ("q", "quit"),
            ],
            Screen::Cart => vec![
                ("↑↓", "line"),
                ("+/-", "quantity"),
                ("d", "remove"),
                ("t", "table"),
                ("p", "pay"),
                ("Esc", "menu"),
            ],
            Screen::Payment => vec![("↑↓", "method"), ("Enter", "confirm"), ("Esc", "back")],
            Screen::Confirmation => vec![("s", "track order"), ("m", "menu")],
            Screen::Status => vec![("r", "refresh"), ("o", "orders"), ("m", "menu")],
            Screen::History => vec![
                ("↑↓", "select"),
                ("Enter", "track"),
                ("r", "refresh"),
                ("m", "menu"),
            ],
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let name = self
            .restaurant
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or(self.restaurant_id.as_str());
        let table = match self.session.table_number() {
            Some(n) => format!("Table {n}"),
            None => "No table".to_string(),
        };
        let user = self
            .session
            .user()
            .map(|u| u.fullname.clone())
            .unwrap_or_else(|| "Guest".to_string());
        let line = Line::from(vec![
            Span::styled(name.to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(format!("  |  {table}  |  Cart: {}  |  {user}", self.session.item_count())),
        ]);
        f.render_widget(Paragraph::new(line).block(title_block("Tably")), area);
    }

    fn draw_login(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new("Sign in to keep an order history. Details never leave this device."),
            chunks[0],
        );

        let focused = Style::default().fg(Color::Yellow);
        let name_style = if self.login_focus == LoginField::Name { focused } else { Style::default() };
        let phone_style = if self.login_focus == LoginField::Phone { focused } else { Style::default() };

        self.draw_input(f, chunks[1], "Full Name", &self.name_input, name_style,
            self.login_focus == LoginField::Name);
        self.draw_input(f, chunks[2], "Phone Number", &self.phone_input, phone_style,
            self.login_focus == LoginField::Phone);
    }

    fn draw_input(&self, f: &mut Frame, area: Rect, label: &str, input: &Input, style: Style, cursor: bool) {
        let width = area.width.max(3) - 3;
        let scroll = input.visual_scroll(width as usize);
        let widget = Paragraph::new(input.value())
            .style(style)
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

    fn draw_menu(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(area);

        let mut titles = vec!["All".to_string()];
        titles.extend(self.menu.iter().map(|c| c.category.clone()));
        let tabs = Tabs::new(titles)
            .select(self.category_idx.min(self.menu.len()))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(title_block("Categories"));
        f.render_widget(tabs, chunks[0]);

        self.draw_input(
            f,
            chunks[1],
            "Search",
            &self.search,
            Style::default(),
            self.overlay == Overlay::Search,
        );

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        let visible = self.visible_items();
        let selected = self.item_idx.min(visible.len().saturating_sub(1));
        let symbol = self.currency();

        let rows: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(row, (ci, ii))| {
                let item = &self.menu[*ci].items[*ii];
                let price = format_cents(to_cents(item.price), symbol);
                let mut spans = vec![
                    Span::raw(format!("{:<28}", item.name)),
                    Span::styled(format!("{:>10}", price), Style::default().fg(Color::Green)),
                ];
                if !item.is_available {
                    spans.push(Span::styled(
                        "  unavailable",
                        Style::default().fg(Color::Red),
                    ));
                }
                let mut line = Line::from(spans);
                if !item.is_available {
                    line = line.style(Style::default().add_modifier(Modifier::DIM));
                }
                if row == selected && !visible.is_empty() {
                    line = line.style(selected_style());
                }
                ListItem::new(line)
            })
            .collect();

        let title = if self.menu.is_empty() {
            "Menu (loading...)".to_string()
        } else {
            format!("Menu ({} items)", visible.len())
        };
        f.render_widget(List::new(rows).block(title_block(&title)), body[0]);

        let detail: Vec<Line> = match visible.get(selected) {
            Some((ci, ii)) if !visible.is_empty() => {
                let category = &self.menu[*ci];
                let item = &category.items[*ii];
                let mut lines = vec![
                    Line::from(Span::styled(
                        item.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("Category: {}", category.category)),
                    Line::from(Span::styled(
                        format_cents(to_cents(item.price), symbol),
                        Style::default().fg(Color::Green),
                    )),
                ];
                if let Some(volume) = &item.volume {
                    lines.push(Line::from(format!("Volume: {volume}")));
                }
                lines.push(Line::from(""));
                if let Some(description) = &item.description {
                    lines.push(Line::from(description.clone()));
                }
                if !item.is_available {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Currently unavailable",
                        Style::default().fg(Color::Red),
                    )));
                }
                lines
            }
            _ => vec![Line::from("No items match")],
        };
        f.render_widget(
            Paragraph::new(detail).wrap(Wrap { trim: true }).block(title_block("Details")),
            body[1],
        );
    }

    fn draw_cart(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(5)])
            .split(area);

        let symbol = self.currency();
        let items = self.session.items();
        let selected = self.cart_idx.min(items.len().saturating_sub(1));

        let rows: Vec<ListItem> = items
            .iter()
            .enumerate()
            .map(|(row, line)| {
                let total = format_cents(to_cents(line.price) * i64::from(line.quantity), symbol);
                let mut spans = vec![
                    Span::raw(format!("{:<24}", line.name)),
                    Span::raw(format!("x{:<3}", line.quantity)),
                    Span::styled(format!("{:>10}", total), Style::default().fg(Color::Green)),
                ];
                if !line.is_available {
                    spans.push(Span::styled("  unavailable", Style::default().fg(Color::Red)));
                }
                let mut text = Line::from(spans);
                if row == selected && !items.is_empty() {
                    text = text.style(selected_style());
                }
                ListItem::new(text)
            })
            .collect();

        let title = if items.is_empty() {
            "Cart (empty)".to_string()
        } else {
            format!("Cart ({} items)", self.session.item_count())
        };
        f.render_widget(List::new(rows).block(title_block(&title)), chunks[0]);

        let totals = self.session.totals();
        let table = match self.session.table_number() {
            Some(n) => format!("Table {n}"),
            None => "No table selected".to_string(),
        };
        let summary = vec![
            Line::from(format!("Subtotal: {}", format_cents(totals.subtotal, symbol))),
            Line::from(format!(
                "Tax ({}%): {}",
                shared::money::TAX_RATE_PERCENT,
                format_cents(totals.tax, symbol)
            )),
            Line::from(vec![
                Span::raw("Total: "),
                Span::styled(
                    format_cents(totals.total, symbol),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("    {table}")),
            ]),
        ];
        f.render_widget(Paragraph::new(summary).block(title_block("Summary")), chunks[1]);
    }

    fn draw_payment(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let methods = [PaymentMethod::Counter, PaymentMethod::GooglePay];
        let rows: Vec<ListItem> = methods
            .iter()
            .enumerate()
            .map(|(row, method)| {
                let marker = if row == self.method_idx { "> " } else { "  " };
                let mut line = Line::from(format!("{marker}{}", method.label()));
                if row == self.method_idx {
                    line = line.style(selected_style());
                }
                ListItem::new(line)
            })
            .collect();
        f.render_widget(List::new(rows).block(title_block("Payment Method")), chunks[0]);

        let symbol = self.currency();
        let totals = self.session.totals();
        let note = if self.method_idx == 0 {
            "Settle at the counter after your meal."
        } else {
            "Card payment is captured before the order is placed."
        };
        let lines = vec![
            Line::from(vec![
                Span::raw("Amount due: "),
                Span::styled(
                    format_cents(totals.total, symbol),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(note),
        ];
        f.render_widget(Paragraph::new(lines).block(title_block("Checkout")), chunks[1]);
    }

    fn draw_confirmation(&self, f: &mut Frame, area: Rect) {
        let lines = match &self.confirmed {
            Some(order) => {
                let symbol = self.currency();
                vec![
                    Line::from(Span::styled(
                        "Order placed!",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::raw("Order number: "),
                        Span::styled(
                            order.order_number.clone(),
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(format!(
                        "Total: {}",
                        format_cents(to_cents(order.total), symbol)
                    )),
                    Line::from(match order.paid {
                        true => "Paid by card.",
                        false => "Pay at the counter when you leave.",
                    }),
                    Line::from(""),
                    Line::from("The kitchen has your order. Track its progress with [s]."),
                ]
            }
            None => vec![Line::from("No order placed yet.")],
        };
        f.render_widget(Paragraph::new(lines).block(title_block("Confirmation")), area);
    }

    fn draw_status(&self, f: &mut Frame, area: Rect) {
        let lines = match &self.tracked {
            Some(order) => {
                let mut lines = vec![
                    Line::from(format!("Order {}", order.order_number)),
                    Line::from(""),
                ];
                let reached = order.order_status.step_index();
                for (i, step) in OrderStatus::STEPS.iter().enumerate() {
                    let (marker, style) = match reached {
                        Some(r) if i < r => ("[x]", Style::default().fg(Color::Green)),
                        Some(r) if i == r => {
                            ("[>]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                        }
                        _ => ("[ ]", Style::default().add_modifier(Modifier::DIM)),
                    };
                    lines.push(Line::from(Span::styled(
                        format!("{marker} {}", step.label()),
                        style,
                    )));
                }
                if reached.is_none() {
                    lines.push(Line::from(""));
                    lines.push(Line::from("Waiting for the kitchen to accept the order."));
                }
                lines
            }
            None => vec![Line::from("No order is being tracked.")],
        };
        f.render_widget(Paragraph::new(lines).block(title_block("Order Status")), area);
    }

    fn draw_history(&self, f: &mut Frame, area: Rect) {
        let symbol = self.currency();
        let selected = self.history_idx.min(self.history.len().saturating_sub(1));
        let rows: Vec<ListItem> = self
            .history
            .iter()
            .enumerate()
            .map(|(row, order)| {
                let when = order
                    .created_at
                    .as_deref()
                    .map(widgets::format_time)
                    .unwrap_or_default();
                let mut line = Line::from(vec![
                    Span::raw(format!("{:<24}", order.order_number)),
                    Span::styled(
                        format!("{:>10}", format_cents(to_cents(order.total), symbol)),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw(format!("  {:<10}", order.order_status.label())),
                    Span::styled(when, Style::default().add_modifier(Modifier::DIM)),
                ]);
                if row == selected && !self.history.is_empty() {
                    line = line.style(selected_style());
                }
                ListItem::new(line)
            })
            .collect();

        let title = if self.history.is_empty() {
            "Your Orders (none yet)".to_string()
        } else {
            format!("Your Orders ({})", self.history.len())
        };
        f.render_widget(List::new(rows).block(title_block(&title)), area);
    }

    fn draw_waiter_modal(&self, f: &mut Frame, reason_idx: usize) {
        let area = centered_rect(44, 12, f.area());
        f.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let rows: Vec<ListItem> = WaiterReason::ALL
            .iter()
            .enumerate()
            .map(|(row, reason)| {
                let marker = if row == reason_idx { "> " } else { "  " };
                let mut line = Line::from(format!("{marker}{}", reason.label()));
                if row == reason_idx {
                    line = line.style(selected_style());
                }
                ListItem::new(line)
            })
            .collect();
        f.render_widget(List::new(rows).block(title_block("Call Waiter")), chunks[0]);

        let label = match self.session.table_number() {
            Some(n) => format!("Table (current: {n})"),
            None => "Table".to_string(),
        };
        self.draw_input(f, chunks[1], &label, &self.table_input, Style::default(), true);
    }

    fn draw_prompt(&self, f: &mut Frame, title: &str, input: &Input) {
        let area = centered_rect(40, 3, f.area());
        f.render_widget(Clear, area);
        self.draw_input(f, area, title, input, Style::default(), true);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
