//! # Cart Session
//!
//! One shopping session: the cart store plus everything that reacts to it.
//!
//! ## Intent Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartIntent ──► CartSession ──► CartStore (validate → mutate → total)  │
//! │                      │                                                  │
//! │          ┌───────────┴──────────────┐                                   │
//! │          │ Ok(event)                │ Err(error)                        │
//! │          ▼                          ▼                                   │
//! │   1. renderer.render(view)    1. warn! log                             │
//! │   2. notifier.post(event)     2. notifier.post(error, Error)           │
//! │                               (no render: state unchanged)             │
//! │                                                                         │
//! │  checkout ──► CheckoutMachine ──► success toast ──► clear after delay  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! All mutations run synchronously to completion. The store and checkout
//! machine sit behind separate mutexes that are always taken in the order
//! checkout → store, and the renderer is only called after both are
//! released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use basket_core::validation::parse_quantity;
use basket_core::{
    render, CartError, CartEvent, CartIntent, CartResult, CartSnapshot, CartStore, CartView,
    CheckoutSummary, Severity,
};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::checkout::{CheckoutMachine, CheckoutState, ClearToken};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::notifier::{NoOpSurface, Notification, NotificationSurface, Notifier};
use crate::renderer::{NoOpRenderer, Renderer};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Explicit handle to a cart session.
///
/// Create one per session and pass it to whatever forwards user intents.
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct CartSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    store: Mutex<CartStore>,
    checkout: Mutex<CheckoutMachine>,
    notifier: Notifier,
    renderer: Arc<dyn Renderer>,
    runtime: Handle,
}

impl CartSession {
    /// Creates a session that renders and displays nothing.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        Self::with_outputs(config, Arc::new(NoOpRenderer), Arc::new(NoOpSurface))
    }

    /// Creates a session wired to a renderer and a notification surface.
    ///
    /// The renderer receives the initial (empty) view immediately.
    pub fn with_outputs(
        config: SessionConfig,
        renderer: Arc<dyn Renderer>,
        surface: Arc<dyn NotificationSurface>,
    ) -> SessionResult<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let notifier = Notifier::new(config.notification_ttl(), surface, runtime.clone());

        let session = CartSession {
            inner: Arc::new(SessionInner {
                config,
                store: Mutex::new(CartStore::new()),
                checkout: Mutex::new(CheckoutMachine::new()),
                notifier,
                renderer,
                runtime,
            }),
        };

        info!(
            ttl_ms = session.inner.config.notifier.ttl_ms,
            clear_delay_ms = session.inner.config.checkout.clear_delay_ms,
            cancel_clear_on_mutation = session.inner.config.checkout.cancel_clear_on_mutation,
            "Cart session started"
        );
        session.inner.refresh(&session.snapshot());
        Ok(session)
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one unit of `name` at `unit_price`.
    pub fn add_item(&self, name: &str, unit_price: f64) -> CartResult<CartEvent> {
        debug!(name = %name, unit_price, "add_item");
        self.inner
            .apply("add_item", |store| store.add_item(name, unit_price))
    }

    /// Removes the entry called `name`.
    pub fn remove_item(&self, name: &str) -> CartResult<CartEvent> {
        debug!(name = %name, "remove_item");
        self.inner.apply("remove_item", |store| store.remove_item(name))
    }

    /// Sets the quantity of `name`; 0 removes the entry.
    pub fn update_quantity(&self, name: &str, quantity: i64) -> CartResult<CartEvent> {
        debug!(name = %name, quantity, "update_quantity");
        self.inner
            .apply("update_quantity", |store| store.update_quantity(name, quantity))
    }

    /// Sets the quantity from raw input text, as typed into a renderer.
    pub fn update_quantity_text(&self, name: &str, raw: &str) -> CartResult<CartEvent> {
        debug!(name = %name, raw = %raw, "update_quantity_text");
        self.inner.apply("update_quantity", |store| {
            let quantity = parse_quantity(raw)?;
            store.update_quantity(name, quantity)
        })
    }

    /// Empties the cart. Never fails.
    pub fn clear(&self) -> CartEvent {
        debug!("clear");
        let (event, snapshot) = {
            let mut store = lock(&self.inner.store);
            let event = store.clear();
            (event, store.snapshot())
        };
        self.inner.publish("clear", &event, &snapshot);
        event
    }

    /// Runs the simulated purchase.
    ///
    /// On success the cart is left as is, a summary notification is posted
    /// and the cart is cleared after the configured delay. On an empty cart
    /// the flow is rejected and nothing changes.
    pub fn checkout(&self) -> CartResult<CheckoutSummary> {
        debug!("checkout");
        let mut machine = lock(&self.inner.checkout);
        machine.begin();

        let summary = lock(&self.inner.store).checkout_summary();
        let summary = match summary {
            Ok(summary) => summary,
            Err(err) => {
                machine.reject();
                drop(machine);
                self.inner.report("checkout", &err);
                return Err(err);
            }
        };

        let token = machine.succeed();
        let delay = self.inner.config.clear_delay();
        let inner = Arc::clone(&self.inner);
        let task = self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            inner.run_scheduled_clear(token);
        });
        machine.schedule(token, task.abort_handle());
        drop(machine);

        info!(
            items = summary.item_count,
            total = %summary.total,
            clear_in_ms = self.inner.config.checkout.clear_delay_ms,
            "Checkout complete"
        );
        self.inner
            .notifier
            .post(summary.message(), Severity::Success);

        Ok(summary)
    }

    /// Forwards a renderer intent to the matching operation.
    ///
    /// Errors have already been logged and shown to the user by the time
    /// this returns; the result is for callers that want to inspect it.
    pub fn dispatch(&self, intent: CartIntent) -> CartResult<()> {
        match intent {
            CartIntent::Add { name, price } => self.add_item(&name, price).map(drop),
            CartIntent::Remove { name } => self.remove_item(&name).map(drop),
            CartIntent::SetQuantity { name, quantity } => {
                self.update_quantity_text(&name, &quantity).map(drop)
            }
            CartIntent::Clear => {
                self.clear();
                Ok(())
            }
            CartIntent::Checkout => self.checkout().map(drop),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn snapshot(&self) -> CartSnapshot {
        lock(&self.inner.store).snapshot()
    }

    /// The view a renderer would currently show.
    pub fn view(&self) -> CartView {
        render(&self.snapshot())
    }

    /// Re-checks the cart invariants.
    pub fn validate(&self) -> bool {
        lock(&self.inner.store).validate()
    }

    pub fn checkout_state(&self) -> CheckoutState {
        lock(&self.inner.checkout).state()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Visible notifications, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.notifier.active()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }
}

impl SessionInner {
    /// Runs a fallible store mutation and publishes or reports the outcome.
    fn apply<F>(&self, operation: &'static str, mutate: F) -> CartResult<CartEvent>
    where
        F: FnOnce(&mut CartStore) -> CartResult<CartEvent>,
    {
        let outcome = {
            let mut store = lock(&self.store);
            mutate(&mut store).map(|event| (event, store.snapshot()))
        };

        match outcome {
            Ok((event, snapshot)) => {
                self.publish(operation, &event, &snapshot);
                Ok(event)
            }
            Err(err) => {
                self.report(operation, &err);
                Err(err)
            }
        }
    }

    /// After a successful mutation: cancel a pending clear if configured,
    /// re-render, then notify.
    fn publish(&self, operation: &'static str, event: &CartEvent, snapshot: &CartSnapshot) {
        info!(
            operation,
            ?event,
            entries = snapshot.entries.len(),
            total = %snapshot.grand_total,
            "Cart updated"
        );

        if self.config.checkout.cancel_clear_on_mutation && *event != CartEvent::AlreadyEmpty {
            if lock(&self.checkout).cancel_pending() {
                info!(operation, "Pending post-checkout clear cancelled");
            }
        }

        self.refresh(snapshot);

        if let Some((severity, text)) = event.notification() {
            self.notifier.post(text, severity);
        }
    }

    /// Logs a recovered error and shows it to the user.
    fn report(&self, operation: &'static str, err: &CartError) {
        warn!(operation, kind = ?err.code(), error = %err, "Cart operation failed");
        self.notifier.post(err.to_string(), Severity::Error);
    }

    fn refresh(&self, snapshot: &CartSnapshot) {
        self.renderer.render(&render(snapshot));
    }

    /// Body of the delayed post-checkout clear.
    ///
    /// Fires on whatever the cart holds at that moment, unless the clear was
    /// cancelled or replaced in the meantime.
    fn run_scheduled_clear(&self, token: ClearToken) {
        let (event, snapshot) = {
            let mut machine = lock(&self.checkout);
            if !machine.finish_clear(token) {
                return;
            }
            let mut store = lock(&self.store);
            (store.clear(), store.snapshot())
        };

        info!(?event, "Cart cleared after checkout");
        self.refresh(&snapshot);

        if let Some((severity, text)) = event.notification() {
            self.notifier.post(text, severity);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use basket_core::Money;
    use std::time::Duration;

    #[derive(Default)]
    struct LastView(Mutex<Option<CartView>>);

    impl Renderer for LastView {
        fn render(&self, view: &CartView) {
            *self.0.lock().unwrap() = Some(view.clone());
        }
    }

    fn session() -> (CartSession, Arc<LastView>) {
        let renderer = Arc::new(LastView::default());
        let session = CartSession::with_outputs(
            SessionConfig::default(),
            renderer.clone(),
            Arc::new(NoOpSurface),
        )
        .unwrap();
        (session, renderer)
    }

    #[test]
    fn test_requires_runtime() {
        assert!(matches!(
            CartSession::new(SessionConfig::default()),
            Err(SessionError::NoRuntime)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_invalid_config() {
        let mut config = SessionConfig::default();
        config.checkout.clear_delay_ms = 0;
        assert!(matches!(
            CartSession::new(config),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_render_is_empty() {
        let (_session, renderer) = session();
        let view = renderer.0.lock().unwrap().clone().unwrap();
        assert!(view.lines.is_empty());
        assert!(!view.checkout_enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_renders_and_notifies() {
        let (session, renderer) = session();

        session.add_item("Widget", 9.99).unwrap();

        let view = renderer.0.lock().unwrap().clone().unwrap();
        assert_eq!(view.grand_total, "$9.99");
        let notes = session.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_posts_error_notification() {
        let (session, _renderer) = session();

        let err = session.remove_item("Ghost").unwrap_err();

        assert_eq!(err, CartError::NotFound { name: "Ghost".into() });
        let notes = session.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Error);
        assert_eq!(notes[0].text, "Ghost is not in the cart");
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_quantity_text() {
        let (session, _renderer) = session();
        session.add_item("Widget", 9.99).unwrap();

        session.update_quantity_text("Widget", " 3 ").unwrap();
        assert_eq!(session.snapshot().grand_total, Money::from_cents(2997));

        assert!(matches!(
            session.update_quantity_text("Widget", "lots"),
            Err(CartError::InvalidInput(_))
        ));
        assert_eq!(session.snapshot().total_quantity, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_clears_after_delay() {
        let (session, renderer) = session();
        session.add_item("Widget", 9.99).unwrap();

        let summary = session.checkout().unwrap();
        assert_eq!(summary.item_count, 1);
        assert_eq!(session.checkout_state(), CheckoutState::ScheduledClear);
        assert!(!session.snapshot().is_empty());

        tokio::time::sleep(Duration::from_millis(2001)).await;

        assert!(session.snapshot().is_empty());
        assert_eq!(session.checkout_state(), CheckoutState::Idle);
        let view = renderer.0.lock().unwrap().clone().unwrap();
        assert!(view.lines.is_empty());

        let last = session.notifications().pop().unwrap();
        assert_eq!(last.severity, Severity::Info);
        assert_eq!(last.text, "Cart cleared! Removed 1 item(s)");
    }
}
