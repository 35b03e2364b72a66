//! Explore Page
//!
//! Server-filtered venue feed with infinite scroll. Any change to the
//! search or filters starts over at page 1; scrolling to the sentinel
//! appends the next page until the server reports no more.

use gloo_timers::callback::Timeout;
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listing::{use_sentinel, Collection, FetchFailure, InfiniteLoader, ListingQuery, Settled};

use crate::api::{ExploreQuery, PageChunk};
use crate::components::{FilterBar, VenueCard};
use crate::context::use_app_context;
use crate::filters::explore_controls;
use crate::models::Venue;
use crate::store::{toast_error, use_app_store};

/// Quiet window before a typed search is sent
const SEARCH_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn ExplorePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let api = StoredValue::new(ctx.api.clone());

    let venues = RwSignal::new(Collection::<Venue>::new());
    let query = RwSignal::new(ListingQuery::default());
    let loader = RwSignal::new(InfiniteLoader::new(ctx.page_size() as u32));
    let sentinel = NodeRef::<Div>::new();

    // Fetch the next page, or page 1 after a reset
    let load_next = move || {
        let Some(ticket) = loader.try_update(InfiniteLoader::begin).flatten() else {
            return;
        };
        let Some(token) = venues.try_update(Collection::begin) else {
            return;
        };
        let request = query.with_untracked(|q| ExploreQuery {
            page: ticket.page,
            limit: loader.with_untracked(InfiniteLoader::limit),
            search: q.search.clone(),
            filters: q.filters.clone(),
        });
        log::debug!("[explore] loading page {}", ticket.page);

        let api = api.get_value();
        spawn_local(async move {
            let result = api.explore_venues(&request).await;
            let accepted = loader
                .try_update(|l| match &result {
                    Ok(chunk) => l.finish(ticket, chunk.has_more),
                    Err(e) if e.is_empty_collection() => l.finish(ticket, false),
                    Err(_) => l.fail(ticket),
                })
                .unwrap_or(false);
            if !accepted {
                log::debug!("[explore] dropped page {} after a reset", ticket.page);
                return;
            }

            let items = result.map(|PageChunk { items, .. }| items);
            let settled = venues.try_update(|c| {
                if ticket.replaces() {
                    c.settle(token, items)
                } else {
                    c.append(token, items)
                }
            });
            if let Some(Settled::Failed(message)) = settled {
                log::error!("[explore] page {} failed: {}", ticket.page, message);
                toast_error(&store, message);
            }
        });
    };

    let handle = use_sentinel(sentinel, load_next);

    // Restart from page 1 whenever the query changes. The first run loads
    // immediately; later runs wait for typing to settle.
    let pending = StoredValue::new_local(None::<Timeout>);
    Effect::new(move |prev: Option<()>| {
        query.track();
        let restart = move || {
            loader.update(InfiniteLoader::reset);
            load_next();
        };
        if prev.is_none() {
            restart();
        } else {
            pending.set_value(Some(Timeout::new(SEARCH_DEBOUNCE_MS, restart)));
        }
    });
    on_cleanup(move || {
        pending.try_update_value(|t| {
            t.take();
        });
    });

    // A sentinel still on screen after an append would never fire again
    Effect::new(move |_| {
        venues.with(|c| c.items.len());
        handle.recheck();
    });

    let controls = Signal::derive(move || {
        let city = query.with(|q| q.filters.get("city").to_string());
        venues.with(|c| explore_controls(&c.items, &city))
    });
    let first_load = move || venues.with(|c| c.loading && c.items.is_empty());
    let has_items = move || venues.with(|c| !c.items.is_empty());
    let exhausted = move || loader.with(InfiniteLoader::is_exhausted);
    let retry = move |_| {
        venues.update(|c| c.error = None);
        load_next();
    };

    view! {
        <section class="page explore-page">
            <h1>"Find a venue"</h1>
            <FilterBar query=query controls=controls placeholder="Search by name, city or area" />

            {move || venues.with(|c| c.error.clone()).map(|message| view! {
                <div class="inline-error" role="alert">
                    <p>{message}</p>
                    <button class="btn" on:click=retry>"Try Again"</button>
                </div>
            })}

            <Show when=first_load>
                <div class="loading-placeholder">"Loading venues..."</div>
            </Show>

            <div class="card-grid">
                <For
                    each=move || venues.with(|c| c.items.clone())
                    key=|venue| venue.id.clone()
                    children=|venue| view! { <VenueCard venue=venue /> }
                />
            </div>

            <Show when=move || exhausted() && !has_items() && venues.with(|c| c.error.is_none())>
                <p class="empty-state">"No venues match your search."</p>
            </Show>

            <div node_ref=sentinel class="scroll-sentinel">
                <Show when=move || has_items() && loader.with(InfiniteLoader::is_loading)>
                    <span class="loading-more">"Loading more..."</span>
                </Show>
                <Show when=move || has_items() && exhausted()>
                    <span class="end-of-list">"You've seen every venue."</span>
                </Show>
            </div>
        </section>
    }
}
