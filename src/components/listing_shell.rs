//! Listing Shell Component
//!
//! The frame every listing page shares: filter bar, loading and error
//! states, the current page of rows and pagination.

use leptos::prelude::*;
use leptos_listing::{ListingItem, ListingSignals};

use crate::components::{FilterBar, Pagination};
use crate::filters::FilterControl;

/// Generic listing page body.
///
/// With `headers` the rows are rendered into a table (`row` must return a
/// `<tr>`); without, into a card grid.
#[component]
pub fn ListingShell<T, R, IV>(
    listing: ListingSignals<T>,
    #[prop(into)] controls: Signal<Vec<FilterControl>>,
    #[prop(into)] on_retry: Callback<()>,
    row: R,
    #[prop(optional)] headers: Vec<&'static str>,
    #[prop(into, default = "Nothing here yet.".to_string())] empty_text: String,
    #[prop(into, default = "Search...".to_string())] placeholder: String,
) -> impl IntoView
where
    T: ListingItem + PartialEq,
    R: Fn(T) -> IV + Clone + Send + Sync + 'static,
    IV: IntoView + 'static,
{
    let page = listing.page;
    let has_rows = Memo::new(move |_| page.with(|p| !p.items.is_empty()));
    let first_load = move || listing.is_loading() && listing.is_empty();

    // Rows are patched in place after mutations (status, reply), so the
    // page is re-rendered as a whole rather than keyed by id
    let rows = move || {
        let row = row.clone();
        move || page.get().items.into_iter().map(row.clone()).collect_view()
    };

    let body = if headers.is_empty() {
        view! { <div class="card-grid">{rows()}</div> }.into_any()
    } else {
        view! {
            <table class="listing-table">
                <thead>
                    <tr>{headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}</tr>
                </thead>
                <tbody>{rows()}</tbody>
            </table>
        }
        .into_any()
    };

    view! {
        <div class="listing">
            <FilterBar query=listing.query controls=controls placeholder=placeholder />

            {move || listing.error().map(|message| view! {
                <div class="inline-error" role="alert">
                    <p>{message}</p>
                    <button class="btn" on:click=move |_| on_retry.run(())>"Try Again"</button>
                </div>
            })}

            <Show when=first_load>
                <div class="loading-placeholder">"Loading..."</div>
            </Show>

            <Show when=move || !first_load() && !has_rows.get() && listing.error().is_none()>
                {
                    let empty_text = empty_text.clone();
                    move || if listing.is_empty() {
                        view! { <p class="empty-state">{empty_text.clone()}</p> }.into_any()
                    } else {
                        view! {
                            <div class="empty-state">
                                <p>"No results match your filters."</p>
                                <button class="btn btn-link" on:click=move |_| listing.clear_filters()>
                                    "Clear filters"
                                </button>
                            </div>
                        }
                        .into_any()
                    }
                }
            </Show>

            <div class="listing-body" class:hidden=move || !has_rows.get()>
                {body}
            </div>

            <div class="listing-footer">
                <span class="listing-count">
                    {move || page.with(|p| format!("{} of {} shown", p.items.len(), p.total_items))}
                </span>
                <Pagination
                    current=Signal::derive(move || page.with(|p| p.number))
                    total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                    on_change=Callback::new(move |n: usize| listing.goto(n))
                />
            </div>
        </div>
    }
}
