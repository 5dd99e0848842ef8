//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use stylemart_core::{Cart, CheckoutForm};
use tower_sessions::Session;
use tracing::instrument;

use crate::chrome::PageChrome;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::Toast;
use crate::services::{
    CartStore, CheckoutOutcome, SessionCartStore, SessionToasts, processing_toast,
};
use crate::state::AppState;

/// Payment methods offered by the mock checkout: `(value, label)`.
pub const PAYMENT_OPTIONS: &[(&str, &str)] = &[
    ("card", "Credit card"),
    ("paypal", "PayPal"),
    ("cod", "Cash on delivery"),
];

/// One read-only summary row.
#[derive(Clone)]
pub struct SummaryLineView {
    /// `"{name} x{quantity}"`.
    pub label: String,
    pub subtotal: String,
}

/// An entry in the payment selector.
#[derive(Clone)]
pub struct PaymentOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub chrome: PageChrome,
    pub lines: Vec<SummaryLineView>,
    pub total: String,
    pub form: CheckoutForm,
    pub payment_options: Vec<PaymentOptionView>,
    /// Shown by the browser while the submission is held.
    pub pending_toast: Toast,
}

impl CheckoutTemplate {
    fn new(chrome: PageChrome, cart: &Cart, form: CheckoutForm) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| SummaryLineView {
                label: format!("{} x{}", item.name, item.quantity),
                subtotal: item.subtotal().to_string(),
            })
            .collect();

        let payment_options = PAYMENT_OPTIONS
            .iter()
            .enumerate()
            .map(|(index, &(value, label))| PaymentOptionView {
                value,
                label,
                selected: form
                    .payment
                    .as_deref()
                    .map_or(index == 0, |chosen| chosen == value),
            })
            .collect();

        Self {
            chrome,
            lines,
            total: cart.total().to_string(),
            form,
            payment_options,
            pending_toast: processing_toast(),
        }
    }
}

/// Display the order summary and checkout form.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let store = SessionCartStore::new(session.clone());
    let toasts = SessionToasts::new(session);

    let cart = store.load().await;
    let chrome = PageChrome::new("/checkout", cart.item_count(), toasts.take().await);

    CheckoutTemplate::new(chrome, &cart, CheckoutForm::default())
}

/// Submit the mock checkout.
///
/// A blank required field re-renders the form in place with what was typed.
/// A valid submission holds the request for the simulated payment, clears the
/// cart, and redirects to the landing page where the success toast shows.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let store = SessionCartStore::new(session.clone());
    let toasts = SessionToasts::new(session);

    match state.checkout().submit(&form, &store, &toasts).await? {
        CheckoutOutcome::Invalid(err) => {
            tracing::debug!(error = ?err, "Re-rendering checkout form");
            let cart = store.load().await;
            let chrome = PageChrome::new("/checkout", cart.item_count(), toasts.take().await);
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutTemplate::new(chrome, &cart, form),
            )
                .into_response())
        }
        CheckoutOutcome::Completed { redirect_to, .. } => {
            add_breadcrumb("checkout", "Order placed", None);
            Ok(Redirect::to(redirect_to).into_response())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn chrome() -> PageChrome {
        PageChrome::new("/checkout", 0, None)
    }

    #[test]
    fn test_summary_lines() {
        let mut cart = Cart::new();
        cart.add_item("Blue Shirt", "$50", "");
        cart.add_item("Blue Shirt", "$50", "");
        cart.add_item("Leather Belt", "$32.00", "");

        let page = CheckoutTemplate::new(chrome(), &cart, CheckoutForm::default());
        assert_eq!(page.lines.len(), 2);
        assert_eq!(page.lines[0].label, "Blue Shirt x2");
        assert_eq!(page.lines[0].subtotal, "$100.00");
        assert_eq!(page.lines[1].label, "Leather Belt x1");
        assert_eq!(page.total, "$132.00");
    }

    #[test]
    fn test_first_payment_option_selected_by_default() {
        let page = CheckoutTemplate::new(chrome(), &Cart::new(), CheckoutForm::default());
        let selected: Vec<_> = page
            .payment_options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value)
            .collect();
        assert_eq!(selected, vec!["card"]);
    }

    #[test]
    fn test_submitted_payment_option_kept() {
        let form = CheckoutForm {
            payment: Some("paypal".to_string()),
            ..CheckoutForm::default()
        };
        let page = CheckoutTemplate::new(chrome(), &Cart::new(), form);
        assert!(!page.payment_options[0].selected);
        assert!(page.payment_options[1].selected);
    }

    #[test]
    fn test_renders_typed_values() {
        let form = CheckoutForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..CheckoutForm::default()
        };
        let html = CheckoutTemplate::new(chrome(), &Cart::new(), form)
            .render()
            .unwrap();
        assert!(html.contains(r#"value="Ada""#));
        assert!(html.contains(r#"value="ada@example.com""#));
        assert!(html.contains("Total: $0.00"));
        assert!(html.contains(r#"data-pending-message="Processing payment...""#));
    }
}
