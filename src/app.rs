//! Main application module.
//!
//! [`App`] owns the terminal and runs the event loop. Everything that
//! reacts to actions lives in [`Dispatcher`], which can be driven without
//! a terminal.

use crate::api::{ApiClient, DataConverter, MarketApi};
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::market;
use crate::state::{Action, LookupKind, Notification, Store};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Reacts to actions: updates the store and starts background fetches.
///
/// Each fetch runs in its own task with a clone of the current client.
/// Results come back as actions on the channel and are applied in arrival
/// order, so when two requests overlap the later response wins.
pub struct Dispatcher {
    /// Application store.
    pub store: Store,
    /// Action sender handed to background tasks.
    action_tx: mpsc::UnboundedSender<Action>,
    /// API client used for new requests.
    api: Arc<dyn MarketApi>,
    /// Active configuration.
    config: Config,
    /// Where settings are saved; `None` means the default location.
    config_path: Option<PathBuf>,
}

impl Dispatcher {
    /// Create a dispatcher with the client built from `config`.
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Result<Self> {
        let api: Arc<dyn MarketApi> = Arc::new(ApiClient::new(&config)?);
        Ok(Self::with_api(config, config_path, api, action_tx))
    }

    /// Create a dispatcher around an existing client.
    pub fn with_api(
        config: Config,
        config_path: Option<PathBuf>,
        api: Arc<dyn MarketApi>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let store = Store::new(&config, action_tx.clone());
        Self {
            store,
            action_tx,
            api,
            config,
            config_path,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::RefreshMarket => {
                self.store.reduce(Action::RefreshMarket);
                self.spawn_market_fetch();
            }
            Action::NextPage | Action::PrevPage | Action::CycleSort => {
                let before = self.store.market.query();
                self.store.reduce(action);
                if self.store.market.query() != before {
                    self.spawn_market_fetch();
                }
            }
            Action::Lookup(kind, query) => {
                let query = query.trim().to_string();
                if kind != LookupKind::Status && query.is_empty() {
                    return;
                }
                self.store.reduce(Action::Lookup(kind, query.clone()));
                self.spawn_lookup(kind, query);
            }
            Action::ExportCsv(path) => self.export(&path),
            Action::SaveSettings => self.save_settings(),
            other => self.store.reduce(other),
        }
    }

    /// Replace the active configuration.
    ///
    /// Builds a new client from `config`; requests already in flight keep
    /// the client they started with.
    pub fn apply_config(&mut self, config: Config) -> Result<()> {
        let api = ApiClient::new(&config)?;
        self.api = Arc::new(api);
        self.config = config.clone();
        self.store.reduce(Action::ConfigApplied(config));
        tracing::info!("configuration applied");
        Ok(())
    }

    fn spawn_market_fetch(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let query = self.store.market.query();

        tokio::spawn(async move {
            let page = query.page;
            let action = match api.fetch_market_page(&query).await {
                Ok(payload) => Action::MarketPageLoaded {
                    page,
                    records: DataConverter::convert_market_page(&payload),
                },
                Err(e) if e.is_recoverable() => Action::MarketFetchFailed {
                    page,
                    error: format!("{e} (press r to retry)"),
                },
                Err(e) => Action::MarketFetchFailed {
                    page,
                    error: e.to_string(),
                },
            };
            deliver(&tx, action);
        });
    }

    fn spawn_lookup(&self, kind: LookupKind, query: String) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let result = match kind {
                LookupKind::Player => api.fetch_player(&query).await,
                LookupKind::Faction => api.fetch_faction(&query).await,
                LookupKind::Status => api.fetch_status().await,
            };
            let output = match result {
                Ok(payload) => payload.pretty(),
                Err(e) => {
                    tracing::warn!(?kind, "lookup failed: {}", e);
                    format!("Error: {e}")
                }
            };
            deliver(&tx, Action::LookupFinished(kind, output));
        });
    }

    fn export(&mut self, path: &Path) {
        let result = market::export_csv(path, self.store.market.visible_rows());
        let action = match result {
            Ok(rows) => Action::ShowNotification(Notification::success(format!(
                "{rows} rows exported to {}",
                path.display()
            ))),
            Err(e) => Action::SetError(format!("Export failed: {e}")),
        };
        self.store.reduce(action);
    }

    fn save_settings(&mut self) {
        let result = self.store.settings.to_config().and_then(|config| {
            config.save(self.config_path.clone())?;
            self.apply_config(config)
        });
        let action = match result {
            Ok(()) => Action::ShowNotification(Notification::success("Settings saved")),
            Err(e) => Action::SetError(e.to_string()),
        };
        self.store.reduce(action);
    }
}

/// Hand a background result to the UI loop. Returns false once the loop
/// has exited and the result is dropped.
fn deliver(tx: &mpsc::UnboundedSender<Action>, action: Action) -> bool {
    match tx.send(action) {
        Ok(()) => true,
        Err(mpsc::error::SendError(action)) => {
            tracing::debug!(?action, "background result dropped; UI loop has exited");
            false
        }
    }
}

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Action handling and state.
    dispatcher: Dispatcher,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        // Build the client before touching the terminal so a bad config
        // is reported on a normal screen.
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(config, None, action_tx)?;
        let event_handler = EventHandler::new();

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            dispatcher,
            event_handler,
            action_rx,
        })
    }

    /// Apply a new configuration, rebuilding the API client.
    pub fn apply_config(&mut self, config: Config) -> Result<()> {
        self.dispatcher.apply_config(config)
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        self.dispatcher.handle_action(Action::RefreshMarket);

        loop {
            self.event_handler
                .update_store_snapshot(&self.dispatcher.store);
            self.dispatcher
                .store
                .expire_notification(chrono::Utc::now());

            let store = &self.dispatcher.store;
            self.terminal.draw(|frame| Ui::render(frame, store))?;

            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.dispatcher.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.dispatcher.handle_action(action);
                }
            }

            if self.dispatcher.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::api::{MockMarketApi, Payload, SortKey};
    use crate::state::{InputTarget, View};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dispatcher(
        api: MockMarketApi,
    ) -> (Dispatcher, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let d = Dispatcher::with_api(Config::default(), None, Arc::new(api), tx);
        (d, rx)
    }

    async fn pump(d: &mut Dispatcher, rx: &mut mpsc::UnboundedReceiver<Action>) {
        let action = rx.recv().await.expect("channel closed");
        d.handle_action(action);
    }

    #[test]
    fn test_deliver_reports_closed_loop() {
        let (tx, rx) = mpsc::unbounded_channel();
        assert!(deliver(&tx, Action::Quit));

        drop(rx);
        assert!(!deliver(
            &tx,
            Action::LookupFinished(LookupKind::Status, "OK".to_string())
        ));
    }

    #[tokio::test]
    async fn test_refresh_loads_normalized_page() {
        let mut api = MockMarketApi::new();
        api.expect_fetch_market_page()
            .withf(|q| q.page == 1 && q.page_size == 50 && q.sort == SortKey::None)
            .times(1)
            .returning(|_| {
                Ok(Payload::Json(json!({"data": [
                    {"name": "Sword", "unit_price": "12.5", "count": 3},
                    {"item": "Bread", "price": "free"}
                ]})))
            });
        let (mut d, mut rx) = dispatcher(api);

        d.handle_action(Action::RefreshMarket);
        assert!(d.store.market.loading);
        pump(&mut d, &mut rx).await;

        assert!(!d.store.market.loading);
        assert_eq!(d.store.market.records.len(), 2);
        assert_eq!(d.store.market.filtered.len(), 1);
        assert_eq!(d.store.market.aggregates.top_quantities[0].item, "Sword");
    }

    #[tokio::test]
    async fn test_fetch_error_is_shown_not_fatal() {
        let mut api = MockMarketApi::new();
        api.expect_fetch_market_page().returning(|_| {
            Err(Error::Status {
                status: reqwest::StatusCode::UNAUTHORIZED,
                body: "bad key".to_string(),
            })
        });
        let (mut d, mut rx) = dispatcher(api);

        d.handle_action(Action::RefreshMarket);
        pump(&mut d, &mut rx).await;

        assert_eq!(
            d.store.app.error.as_deref(),
            Some("API returned 401 Unauthorized: bad key")
        );
        assert!(!d.store.market.loading);
        assert!(!d.store.app.should_quit);
    }

    #[tokio::test]
    async fn test_prev_page_on_first_page_does_not_fetch() {
        let mut api = MockMarketApi::new();
        api.expect_fetch_market_page().times(0);
        let (mut d, _rx) = dispatcher(api);

        d.handle_action(Action::PrevPage);

        assert_eq!(d.store.market.page, 1);
    }

    #[tokio::test]
    async fn test_sort_change_refetches_with_key() {
        let mut api = MockMarketApi::new();
        api.expect_fetch_market_page()
            .withf(|q| q.sort == SortKey::PriceAsc)
            .times(1)
            .returning(|_| Ok(Payload::Json(json!([]))));
        let (mut d, mut rx) = dispatcher(api);

        d.handle_action(Action::CycleSort);
        pump(&mut d, &mut rx).await;

        assert!(d.store.market.records.is_empty());
    }

    #[tokio::test]
    async fn test_player_lookup_renders_payload() {
        let mut api = MockMarketApi::new();
        api.expect_fetch_player()
            .withf(|id| id.to_string() == "Notch")
            .returning(|_| Ok(Payload::Json(json!({"name": "Notch"}))));
        let (mut d, mut rx) = dispatcher(api);

        d.handle_action(Action::Lookup(LookupKind::Player, " Notch ".to_string()));
        assert_eq!(d.store.players.output, "Loading…");
        pump(&mut d, &mut rx).await;

        assert_eq!(d.store.players.output, "{\n  \"name\": \"Notch\"\n}");
        assert!(!d.store.players.loading);
    }

    #[tokio::test]
    async fn test_faction_lookup_error_is_inline() {
        let mut api = MockMarketApi::new();
        api.expect_fetch_faction()
            .returning(|_| Err(Error::application("connection refused")));
        let (mut d, mut rx) = dispatcher(api);

        d.handle_action(Action::Lookup(LookupKind::Faction, "42".to_string()));
        pump(&mut d, &mut rx).await;

        assert_eq!(d.store.factions.output, "Error: connection refused");
        assert!(d.store.app.error.is_none());
    }

    #[tokio::test]
    async fn test_status_text_body() {
        let mut api = MockMarketApi::new();
        api.expect_fetch_status()
            .returning(|| Ok(Payload::Text("OK".to_string())));
        let (mut d, mut rx) = dispatcher(api);

        d.handle_action(Action::Lookup(LookupKind::Status, String::new()));
        pump(&mut d, &mut rx).await;

        assert_eq!(d.store.status.output, "OK");
    }

    #[tokio::test]
    async fn test_export_writes_visible_rows() {
        let mut api = MockMarketApi::new();
        api.expect_fetch_market_page().returning(|_| {
            Ok(Payload::Json(json!([
                {"name": "Sword", "price": 10},
                {"name": "Shield", "price": 20},
                {"name": "Bow", "price": 30}
            ])))
        });
        let (mut d, mut rx) = dispatcher(api);
        d.handle_action(Action::RefreshMarket);
        pump(&mut d, &mut rx).await;
        d.handle_action(Action::SetSearch("s".to_string()));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market.csv");
        d.handle_action(Action::ExportCsv(path.clone()));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("Sword"));
        assert!(content.contains("Shield"));
        assert!(!content.contains("Bow"));
        assert!(d.store.app.notification.is_some());
    }

    #[tokio::test]
    async fn test_save_settings_persists_and_applies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut d = Dispatcher::with_api(
            Config::default(),
            Some(path.clone()),
            Arc::new(MockMarketApi::new()),
            tx,
        );

        d.handle_action(Action::SetView(View::Settings));
        d.handle_action(Action::GoToBottom);
        d.handle_action(Action::EditSelectedSetting);
        assert_eq!(
            d.store.app.input.target,
            Some(InputTarget::Setting(crate::state::SettingField::PageSize))
        );
        d.handle_action(Action::InputBackspace);
        d.handle_action(Action::InputBackspace);
        for c in "120".chars() {
            d.handle_action(Action::InputChar(c));
        }
        d.handle_action(Action::SubmitInput);
        d.handle_action(Action::SaveSettings);

        assert!(d.store.app.error.is_none());
        assert_eq!(d.config().page_size, 120);
        assert_eq!(d.store.market.page_size, 120);
        let saved = Config::load(Some(path)).unwrap();
        assert_eq!(saved.page_size, 120);
    }

    #[tokio::test]
    async fn test_invalid_settings_are_reported() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut d = Dispatcher::with_api(
            Config::default(),
            None,
            Arc::new(MockMarketApi::new()),
            tx,
        );
        d.store.settings.timeout = "soon".to_string();

        d.handle_action(Action::SaveSettings);

        assert!(d.store.app.error.is_some());
        assert_eq!(d.config().timeout, 15);
    }
}
