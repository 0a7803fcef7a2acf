use crate::monday::{BoardGateway, CachePolicy, RetryPolicy, SchemaCache};
use crate::state::{BoardLoad, PendingSubmission, State};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    /// Load the board for the form, bypassing the cache when forced.
    LoadBoard { board_id: String, force: bool },
    /// Refetch the board in the background after it was invalidated.
    RefreshBoard { board_id: String },
    CreateItem(PendingSubmission),
}

/// Specify struct for managing state with network events.
///
#[derive(Clone)]
pub struct Handler {
    state: Arc<Mutex<State>>,
    gateway: Arc<dyn BoardGateway>,
    cache: SchemaCache,
    create_retry: RetryPolicy,
}

impl Handler {
    /// Return new instance reading boards through a fresh schema cache.
    ///
    pub fn new(
        state: Arc<Mutex<State>>,
        gateway: Arc<dyn BoardGateway>,
        cache_policy: CachePolicy,
        create_retry: RetryPolicy,
    ) -> Self {
        let cache = SchemaCache::new(Arc::clone(&gateway), cache_policy);
        Handler {
            state,
            gateway,
            cache,
            create_retry,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&self, event: Event) {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::LoadBoard { board_id, force } => self.load_board(&board_id, force).await,
            Event::RefreshBoard { board_id } => self.refresh_board(&board_id).await,
            Event::CreateItem(pending) => self.create_item(pending).await,
        }
    }

    /// Update state with the board schema or the reason it could not be
    /// loaded.
    ///
    async fn load_board(&self, board_id: &str, force: bool) {
        if force {
            self.cache.invalidate(board_id).await;
        }
        let result = self.cache.get_columns(board_id).await;

        let mut state = self.state.lock().await;
        if state.get_board_id() != Some(board_id) {
            warn!("Discarding schema for board {} no longer in use.", board_id);
            return;
        }
        match result {
            Ok(schema) => {
                info!("Loaded board '{}'.", schema.board_name);
                state.set_board_schema(schema);
            }
            Err(e) => {
                error!("Failed to load board {}: {}", board_id, e);
                state.set_board_failed(e.to_string());
            }
        }
    }

    /// Refetch the board schema without disturbing the form. Failures are
    /// only logged.
    ///
    async fn refresh_board(&self, board_id: &str) {
        match self.cache.get_columns(board_id).await {
            Ok(schema) => {
                let mut state = self.state.lock().await;
                if state.get_board_id() == Some(board_id)
                    && matches!(state.get_board(), BoardLoad::Loaded(_))
                {
                    debug!("Refreshed board '{}'.", schema.board_name);
                    state.set_board_schema(schema);
                }
            }
            Err(e) => warn!("Background refresh of board {} failed: {}", board_id, e),
        }
    }

    /// Create the item and report the outcome to the form. A created item
    /// invalidates the cached board and schedules a refresh.
    ///
    async fn create_item(&self, pending: PendingSubmission) {
        info!(
            "Creating item '{}' on board {}...",
            pending.item_name, pending.board_id
        );
        let gateway = &self.gateway;
        let outcome = self
            .create_retry
            .run("Item creation", || {
                gateway.create_item(
                    &pending.board_id,
                    &pending.item_name,
                    &pending.column_values,
                )
            })
            .await;
        let created = outcome.is_ok();

        self.state.lock().await.finish_submit(&pending, outcome);

        if created {
            self.cache.invalidate(&pending.board_id).await;
            self.state.lock().await.dispatch(Event::RefreshBoard {
                board_id: pending.board_id,
            });
        }
    }

    #[cfg(test)]
    fn cache(&self) -> &SchemaCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogBuffer;
    use crate::monday::testing::{sample_schema, FakeGateway};
    use crate::state::{NotificationKind, View, ITEM_NAME_KEY};
    use crate::ui::Theme;
    use std::time::Duration;

    fn policy() -> CachePolicy {
        CachePolicy {
            retry: RetryPolicy::none(),
            ..CachePolicy::default()
        }
    }

    fn handler(gateway: Arc<FakeGateway>) -> Handler {
        let state = State::new(
            None,
            Some("42".to_string()),
            None,
            Theme::default(),
            Arc::new(LogBuffer::new(10)),
        );
        Handler::new(
            Arc::new(Mutex::new(state)),
            gateway,
            policy(),
            RetryPolicy::fixed(1, Duration::from_millis(1)),
        )
    }

    async fn load(handler: &Handler) {
        handler
            .handle(Event::LoadBoard {
                board_id: "42".to_string(),
                force: false,
            })
            .await;
    }

    async fn fill_and_begin(handler: &Handler, name: &str) -> PendingSubmission {
        let mut state = handler.state.lock().await;
        for c in name.chars() {
            state.input_char(c);
        }
        state.begin_submit().unwrap()
    }

    #[tokio::test]
    async fn load_board_shows_form() {
        let gateway = Arc::new(FakeGateway::new());
        let handler = handler(gateway.clone());

        load(&handler).await;

        let state = handler.state.lock().await;
        assert_eq!(state.current_view(), View::Form);
        assert_eq!(state.board_title(), "Roadmap");
        assert_eq!(gateway.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn load_board_failure_shows_error() {
        let gateway = Arc::new(FakeGateway::new().failing_fetches(1));
        let handler = handler(gateway);

        load(&handler).await;

        let state = handler.state.lock().await;
        assert_eq!(state.current_view(), View::LoadFailed);
        assert!(matches!(state.get_board(), BoardLoad::Failed(m) if m.contains("fetch failed")));
    }

    #[tokio::test]
    async fn forced_load_bypasses_cache() {
        let gateway = Arc::new(FakeGateway::new());
        let handler = handler(gateway.clone());

        load(&handler).await;
        load(&handler).await;
        assert_eq!(gateway.fetch_calls(), 1);

        handler
            .handle(Event::LoadBoard {
                board_id: "42".to_string(),
                force: true,
            })
            .await;
        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn refresh_failure_keeps_form() {
        let gateway = Arc::new(FakeGateway::new().failing_fetches(1));
        let handler = handler(gateway.clone());
        handler
            .state
            .lock()
            .await
            .set_board_schema(Arc::new(sample_schema()));

        handler
            .handle(Event::RefreshBoard {
                board_id: "42".to_string(),
            })
            .await;

        assert_eq!(gateway.fetch_calls(), 1);
        let state = handler.state.lock().await;
        assert_eq!(state.current_view(), View::Form);
        assert_eq!(state.get_status().error(), None);
    }

    #[tokio::test]
    async fn create_item_success_resets_form_and_invalidates_board() {
        let gateway = Arc::new(FakeGateway::new());
        let handler = handler(gateway.clone());
        load(&handler).await;
        assert!(handler.cache().is_fresh("42").await);
        let pending = fill_and_begin(&handler, "Launch").await;

        handler.handle(Event::CreateItem(pending)).await;

        let created = gateway.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, "42");
        assert_eq!(created[0].1, "Launch");
        assert!(!handler.cache().is_fresh("42").await);

        let state = handler.state.lock().await;
        assert_eq!(state.get_form().form_data().item_name(), "");
        assert!(state.get_form().form_data().contains_key("text0"));
        assert!(!state.get_form().is_submitting());
        assert_eq!(
            state.get_status().toast().unwrap().kind,
            NotificationKind::Success
        );
    }

    #[tokio::test]
    async fn create_item_failure_is_retried_once_and_keeps_data() {
        let gateway = Arc::new(FakeGateway::new().failing_creates("board is archived"));
        let handler = handler(gateway.clone());
        load(&handler).await;
        let pending = fill_and_begin(&handler, "Launch").await;

        handler.handle(Event::CreateItem(pending)).await;

        assert_eq!(gateway.create_calls(), 2);
        assert!(handler.cache().is_fresh("42").await);
        let state = handler.state.lock().await;
        assert!(!state.get_form().is_submitting());
        assert_eq!(
            state.get_form().form_data().get(ITEM_NAME_KEY).unwrap().to_string(),
            "Launch"
        );
        assert!(state.get_status().error().unwrap().contains("board is archived"));
        assert_eq!(
            state.get_status().toast().unwrap().kind,
            NotificationKind::Error
        );
    }
}
