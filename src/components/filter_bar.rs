//! Filter Bar Component
//!
//! Search box and select filters bound to a listing query.

use leptos::prelude::*;
use leptos_listing::ListingQuery;

use crate::filters::{options_for, FilterControl};

/// Search input plus one select per control.
///
/// Every change goes through `ListingQuery`, which sends the page back to 1.
#[component]
pub fn FilterBar(
    query: RwSignal<ListingQuery>,
    #[prop(into)] controls: Signal<Vec<FilterControl>>,
    #[prop(into, default = "Search...".to_string())] placeholder: String,
    /// Hide the search box for pages without searchable fields
    #[prop(optional)]
    no_search: bool,
) -> impl IntoView {
    let has_active = move || query.with(|q| q.filters.active_count() > 0 || !q.search.trim().is_empty());

    view! {
        <div class="filter-bar">
            {(!no_search).then(|| view! {
                <input
                    type="search"
                    class="filter-search"
                    placeholder=placeholder.clone()
                    prop:value=move || query.with(|q| q.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.set_search(value));
                    }
                />
            })}
            <For
                each=move || controls.get()
                key=|control| control.key
                children=move |control| {
                    let key = control.key;
                    let selected = move || query.with(|q| q.filters.get(key).to_string());
                    view! {
                        <label class="filter-select">
                            <span class="filter-label">{control.label}</span>
                            <select
                                prop:value=selected
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    query.update(|q| q.set_filter(key, value));
                                }
                            >
                                // Keyed by name only, so options are read from the live list
                                {move || {
                                    controls
                                        .with(|cs| options_for(cs, key))
                                        .into_iter()
                                        .map(|(value, label)| {
                                            let is_selected = {
                                                let value = value.clone();
                                                move || selected() == value
                                            };
                                            view! { <option value=value selected=is_selected>{label}</option> }
                                        })
                                        .collect_view()
                                }}
                            </select>
                        </label>
                    }
                }
            />
            <Show when=has_active>
                <button class="btn btn-link" on:click=move |_| query.update(ListingQuery::clear)>
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}
