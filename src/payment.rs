//! Payment hand-off
//!
//! The checkout widget itself is loaded by the page shell. The app asks the
//! backend for an order, announces it with a `venuehub:checkout` window
//! event and waits for the widget to answer with `venuehub:payment`, whose
//! detail is then verified by the backend.

use leptos::task::spawn_local;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit};

use crate::api::{ApiError, PaymentConfirmation};
use crate::context::AppContext;
use crate::models::PaymentOrder;
use crate::store::{store_payment_verified, store_push_toast, toast_error, toast_success, AppStore};
use crate::toast::ToastLevel;

pub const CHECKOUT_EVENT: &str = "venuehub:checkout";
pub const PAID_EVENT: &str = "venuehub:payment";

/// Detail of the checkout event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub booking_id: String,
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub key: String,
    pub description: String,
}

impl CheckoutRequest {
    pub fn new(booking_id: &str, order: &PaymentOrder, key: &str, description: &str) -> Self {
        Self {
            booking_id: booking_id.to_string(),
            order_id: order.order_id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            key: key.to_string(),
            description: description.to_string(),
        }
    }
}

/// Decode the widget's answer
pub fn parse_confirmation(json: &str) -> Result<PaymentConfirmation, ApiError> {
    let confirmation: PaymentConfirmation = serde_json::from_str(json)?;
    confirmation.validate()?;
    Ok(confirmation)
}

fn dispatch(name: &str, detail: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let init = CustomEventInit::new();
    init.set_detail(&js_sys::JSON::parse(detail)?);
    let event = CustomEvent::new_with_event_init_dict(name, &init)?;
    window.dispatch_event(&event)?;
    Ok(())
}

/// Create a payment order for `booking_id` and open the checkout
pub fn start_checkout(ctx: &AppContext, store: AppStore, booking_id: String, description: String) {
    let Some(key) = ctx.config.payment_key.clone() else {
        log::warn!("[payment] VENUE_PAYMENT_KEY not set, cannot open checkout");
        store_push_toast(&store, ToastLevel::Warning, "Online payment is not available right now");
        return;
    };
    let api = ctx.api.clone();
    spawn_local(async move {
        let order = match api.create_payment_order(&booking_id).await {
            Ok(order) => order,
            Err(e) => {
                log::error!("[payment] order for {} failed: {}", booking_id, e);
                toast_error(&store, e.to_string());
                return;
            }
        };
        let request = CheckoutRequest::new(&booking_id, &order, &key, &description);
        let sent = serde_json::to_string(&request)
            .map_err(|e| JsValue::from_str(&e.to_string()))
            .and_then(|detail| dispatch(CHECKOUT_EVENT, &detail));
        match sent {
            Ok(()) => log::info!("[payment] checkout opened for order {}", order.order_id),
            Err(e) => {
                log::error!("[payment] could not open checkout: {:?}", e);
                toast_error(&store, "Could not open the payment window");
            }
        }
    });
}

/// Listen for completed payments and verify them with the backend
pub fn install(ctx: &AppContext, store: AppStore) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let api = ctx.api.clone();
    let on_paid = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let detail = ev
            .dyn_ref::<CustomEvent>()
            .map(CustomEvent::detail)
            .and_then(|d| js_sys::JSON::stringify(&d).ok())
            .map(String::from)
            .unwrap_or_default();
        let confirmation = match parse_confirmation(&detail) {
            Ok(c) => c,
            Err(e) => {
                log::error!("[payment] bad confirmation: {}", e);
                toast_error(&store, "Payment could not be confirmed");
                return;
            }
        };
        let api = api.clone();
        spawn_local(async move {
            match api.verify_payment(&confirmation).await {
                Ok(message) => {
                    toast_success(&store, message);
                    store_payment_verified(&store);
                }
                Err(e) => {
                    log::error!("[payment] verify {} failed: {}", confirmation.order_id, e);
                    toast_error(&store, e.to_string());
                }
            }
        });
    });
    if let Err(e) = window.add_event_listener_with_callback(PAID_EVENT, on_paid.as_ref().unchecked_ref()) {
        log::warn!("[payment] could not listen for payments: {:?}", e);
    }
    on_paid.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_detail_shape() {
        let order = PaymentOrder {
            order_id: "order_9".into(),
            amount: 25000.0,
            currency: "INR".into(),
        };
        let request = CheckoutRequest::new("b1", &order, "pk_test", "Lotus Hall on 2024-06-15");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["bookingId"], "b1");
        assert_eq!(json["orderId"], "order_9");
        assert_eq!(json["key"], "pk_test");
    }

    #[test]
    fn test_parse_confirmation() {
        let ok = parse_confirmation(
            r#"{"bookingId": "b1", "orderId": "order_9", "paymentId": "pay_1", "signature": "abc"}"#,
        )
        .unwrap();
        assert_eq!(ok.payment_id, "pay_1");

        let missing = parse_confirmation(r#"{"bookingId": "b1", "orderId": "order_9"}"#).unwrap_err();
        assert!(matches!(missing, ApiError::Decode(_)));

        let blank = parse_confirmation(
            r#"{"bookingId": "b1", "orderId": "order_9", "paymentId": "", "signature": "abc"}"#,
        )
        .unwrap_err();
        assert!(matches!(blank, ApiError::Invalid(_)));
    }
}
