//! End-to-end session tests driven through renderer intents.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use basket_core::{CartError, CartIntent, CartView, Money, Severity};
use basket_session::{
    CartSession, CheckoutState, Notification, NotificationId, NotificationSurface, Renderer,
    SessionConfig,
};

#[derive(Default)]
struct RecordingRenderer {
    views: Mutex<Vec<CartView>>,
}

impl RecordingRenderer {
    fn count(&self) -> usize {
        self.views.lock().unwrap().len()
    }

    fn last(&self) -> CartView {
        self.views.lock().unwrap().last().cloned().unwrap()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, view: &CartView) {
        self.views.lock().unwrap().push(view.clone());
    }
}

#[derive(Default)]
struct RecordingSurface {
    shown: Mutex<Vec<Notification>>,
    hidden: Mutex<Vec<NotificationId>>,
}

impl NotificationSurface for RecordingSurface {
    fn show(&self, notification: &Notification) {
        self.shown.lock().unwrap().push(notification.clone());
    }

    fn hide(&self, id: NotificationId) {
        self.hidden.lock().unwrap().push(id);
    }
}

struct Harness {
    session: CartSession,
    renderer: Arc<RecordingRenderer>,
    surface: Arc<RecordingSurface>,
}

fn harness(config: SessionConfig) -> Harness {
    let renderer = Arc::new(RecordingRenderer::default());
    let surface = Arc::new(RecordingSurface::default());
    let session =
        CartSession::with_outputs(config, renderer.clone(), surface.clone()).unwrap();
    Harness {
        session,
        renderer,
        surface,
    }
}

fn add(name: &str, price: f64) -> CartIntent {
    CartIntent::Add {
        name: name.to_string(),
        price,
    }
}

fn set_qty(name: &str, quantity: &str) -> CartIntent {
    CartIntent::SetQuantity {
        name: name.to_string(),
        quantity: quantity.to_string(),
    }
}

fn last_text(h: &Harness) -> String {
    h.surface.shown.lock().unwrap().last().unwrap().text.clone()
}

#[tokio::test(start_paused = true)]
async fn widget_walkthrough() {
    let h = harness(SessionConfig::default());

    h.session.dispatch(add("Widget", 9.99)).unwrap();
    assert_eq!(h.renderer.last().grand_total, "$9.99");
    assert_eq!(h.renderer.last().lines[0].quantity, 1);

    h.session.dispatch(add("Widget", 9.99)).unwrap();
    assert_eq!(h.renderer.last().lines[0].line_total, "$19.98");
    assert_eq!(h.renderer.last().grand_total, "$19.98");

    h.session.dispatch(set_qty("Widget", "3")).unwrap();
    assert_eq!(h.renderer.last().grand_total, "$29.97");

    h.session
        .dispatch(CartIntent::Remove {
            name: "Widget".into(),
        })
        .unwrap();
    assert!(h.renderer.last().lines.is_empty());
    assert_eq!(h.renderer.last().grand_total, "$0.00");

    assert!(h.session.validate());
}

#[tokio::test(start_paused = true)]
async fn add_reports_added_then_increased() {
    let h = harness(SessionConfig::default());

    h.session.dispatch(add("Widget", 9.99)).unwrap();
    h.session.dispatch(add("Widget", 9.99)).unwrap();

    let shown = h.surface.shown.lock().unwrap();
    assert_eq!(shown[0].severity, Severity::Success);
    assert_eq!(shown[1].severity, Severity::Info);
    assert_ne!(shown[0].text, shown[1].text);
}

#[tokio::test(start_paused = true)]
async fn sub_cent_price_rounds_up() {
    let h = harness(SessionConfig::default());

    h.session.dispatch(add("Gadget", 5.005)).unwrap();

    assert_eq!(h.session.snapshot().grand_total, Money::from_cents(501));
    assert_eq!(h.renderer.last().grand_total, "$5.01");
}

#[tokio::test(start_paused = true)]
async fn failures_leave_state_and_view_untouched() {
    let h = harness(SessionConfig::default());
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    let before = h.session.snapshot();
    let renders = h.renderer.count();

    let results = [
        h.session.dispatch(add("", 1.0)),
        h.session.dispatch(add("Gizmo", -3.0)),
        h.session.dispatch(set_qty("Widget", "-2")),
        h.session.dispatch(set_qty("Widget", "two")),
        h.session.dispatch(set_qty("Gizmo", "4")),
        h.session.dispatch(CartIntent::Remove {
            name: "Gizmo".into(),
        }),
    ];

    assert!(results.iter().all(Result::is_err));
    assert!(matches!(results[0], Err(CartError::InvalidInput(_))));
    assert!(matches!(results[4], Err(CartError::NotFound { .. })));
    assert_eq!(h.session.snapshot(), before);
    assert_eq!(h.renderer.count(), renders);

    let errors = h
        .surface
        .shown
        .lock()
        .unwrap()
        .iter()
        .filter(|n| n.severity == Severity::Error)
        .count();
    assert_eq!(errors, results.len());
}

#[tokio::test(start_paused = true)]
async fn oversized_input_is_reported_and_state_kept() {
    let h = harness(SessionConfig::default());
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    let before = h.session.snapshot();

    assert!(h.session.dispatch(set_qty("Widget", "1000000000000000000")).is_err());
    assert!(h.session.update_quantity("Widget", i64::MAX).is_err());
    assert!(h.session.dispatch(add("Yacht", 1.0e14)).is_err());

    assert_eq!(h.session.snapshot(), before);
    assert!(h.session.validate());
    assert_eq!(
        h.surface.shown.lock().unwrap().last().unwrap().severity,
        Severity::Error
    );
}

#[tokio::test(start_paused = true)]
async fn clear_distinguishes_empty_cart() {
    let h = harness(SessionConfig::default());
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    h.session.dispatch(add("Gadget", 1.25)).unwrap();

    h.session.dispatch(CartIntent::Clear).unwrap();
    let cleared = last_text(&h);
    assert!(h.session.snapshot().is_empty());
    assert_eq!(h.session.snapshot().grand_total, Money::zero());

    h.session.dispatch(CartIntent::Clear).unwrap();
    let already = last_text(&h);

    assert_ne!(cleared, already);
    assert!(h.session.snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn checkout_reports_summary_and_clears_later() {
    let h = harness(SessionConfig::default());
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    h.session.dispatch(add("Widget", 9.99)).unwrap();

    h.session.dispatch(CartIntent::Checkout).unwrap();

    let text = last_text(&h);
    assert_eq!(text, "Checkout successful! 2 item(s) for $19.98");
    assert_eq!(
        h.surface.shown.lock().unwrap().last().unwrap().severity,
        Severity::Success
    );
    assert_eq!(h.session.checkout_state(), CheckoutState::ScheduledClear);

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert_eq!(h.session.snapshot().total_quantity, 2);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(h.session.snapshot().is_empty());
    assert!(h.renderer.last().lines.is_empty());
    assert_eq!(h.session.checkout_state(), CheckoutState::Idle);

    let shown = h.surface.shown.lock().unwrap();
    let cleared = shown.last().unwrap();
    assert_eq!(cleared.severity, Severity::Info);
    assert_eq!(cleared.text, "Cart cleared! Removed 2 item(s)");
}

#[tokio::test(start_paused = true)]
async fn checkout_on_empty_cart_is_rejected() {
    let h = harness(SessionConfig::default());

    let err = h.session.checkout().unwrap_err();

    assert_eq!(err, CartError::EmptyCart);
    assert!(h.session.snapshot().is_empty());
    assert_eq!(h.session.checkout_state(), CheckoutState::Idle);
    let shown = h.surface.shown.lock().unwrap();
    assert_eq!(shown.last().unwrap().severity, Severity::Error);
}

#[tokio::test(start_paused = true)]
async fn scheduled_clear_fires_on_repopulated_cart_by_default() {
    let h = harness(SessionConfig::default());
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    h.session.checkout().unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    h.session.dispatch(add("Gadget", 4.00)).unwrap();
    assert_eq!(h.session.checkout_state(), CheckoutState::ScheduledClear);

    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert!(h.session.snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn mutation_cancels_scheduled_clear_when_enabled() {
    let mut config = SessionConfig::default();
    config.checkout.cancel_clear_on_mutation = true;
    let h = harness(config);
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    h.session.checkout().unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    h.session.dispatch(add("Gadget", 4.00)).unwrap();
    assert_eq!(h.session.checkout_state(), CheckoutState::Idle);

    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(h.session.snapshot().entries.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn second_checkout_reschedules_clear() {
    let h = harness(SessionConfig::default());
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    h.session.checkout().unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    h.session.checkout().unwrap();

    // The first clear would have fired at 2000 ms.
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(!h.session.snapshot().is_empty());

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(h.session.snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn notifications_expire_and_hide() {
    let h = harness(SessionConfig::default());
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    assert_eq!(h.session.notifications().len(), 1);

    tokio::time::sleep(Duration::from_millis(3001)).await;

    assert!(h.session.notifications().is_empty());
    assert_eq!(h.surface.hidden.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn manual_dismiss_then_timer_is_harmless() {
    let h = harness(SessionConfig::default());
    h.session.dispatch(add("Widget", 9.99)).unwrap();
    let id = h.session.notifications()[0].id;

    assert!(h.session.notifier().dismiss(id));
    tokio::time::sleep(Duration::from_millis(3001)).await;

    assert!(!h.session.notifier().dismiss(id));
    assert_eq!(h.surface.hidden.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn intents_from_json() {
    let h = harness(SessionConfig::default());
    let script = r#"[
        {"type": "add", "name": "Widget", "price": 9.99},
        {"type": "add", "name": "Gadget", "price": 5.005},
        {"type": "set_quantity", "name": "Gadget", "quantity": "0"},
        {"type": "add", "name": "Widget", "price": 9.99}
    ]"#;

    let intents: Vec<CartIntent> = serde_json::from_str(script).unwrap();
    for intent in intents {
        h.session.dispatch(intent).unwrap();
    }

    let snapshot = h.session.snapshot();
    assert_eq!(snapshot.entries.len(), 1);
    assert_eq!(snapshot.entries[0].name(), "Widget");
    assert_eq!(snapshot.grand_total, Money::from_cents(1998));
}
