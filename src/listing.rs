//! Listing page plumbing
//!
//! Connects a `ListingSignals` bundle to an API call: begin a request,
//! settle the response, toast failures.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listing::{create_listing_with, FilterSpec, FilterState, ListingItem, ListingSignals, Settled};

use crate::api::{ApiClient, ApiError};
use crate::context::use_app_context;
use crate::store::{toast_error, toast_success, use_app_store, AppStore};

/// Run `request` and apply its result to `listing`.
///
/// Failures become a toast plus the inline error kept by the collection.
/// Responses that lost the race against a newer request are dropped.
pub fn load_into<T, Fut>(store: AppStore, listing: ListingSignals<T>, request: Fut)
where
    T: ListingItem,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let Some(token) = listing.begin() else {
        return;
    };
    spawn_local(async move {
        let result = request.await;
        match listing.settle(token, result) {
            Settled::Applied => {}
            Settled::Stale => log::debug!("[listing] dropped stale response"),
            Settled::Failed(message) => {
                log::error!("[listing] load failed: {}", message);
                toast_error(&store, message);
            }
        }
    });
}

/// Create a listing with preselected filters and start loading it.
///
/// Returns the signals and a reload callback for the Try Again button and
/// for refreshing after a mutation.
pub fn use_listing<T, F, Fut>(spec: FilterSpec<T>, filters: FilterState, fetch: F) -> (ListingSignals<T>, Callback<()>)
where
    T: ListingItem + PartialEq,
    F: Fn(ApiClient) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let ctx = use_app_context();
    let store = use_app_store();
    let listing = create_listing_with(spec, ctx.page_size(), filters);
    let api = ctx.api.clone();

    let reload = Callback::new(move |_: ()| load_into(store, listing, fetch(api.clone())));
    reload.run(());

    (listing, reload)
}

/// Run a mutation. Success toasts the server message and calls `on_done`;
/// failure toasts the error and leaves local state alone.
pub fn run_action<Fut>(store: AppStore, action: Fut, on_done: impl FnOnce() + 'static)
where
    Fut: Future<Output = Result<String, ApiError>> + 'static,
{
    spawn_local(async move {
        match action.await {
            Ok(message) => {
                toast_success(&store, message);
                on_done();
            }
            Err(e) => {
                log::error!("[action] {}", e);
                toast_error(&store, e.to_string());
            }
        }
    });
}
