//! Reserved Dates Page
//!
//! Owners block dates booked outside the platform so visitors cannot
//! request them.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

use super::OwnerTabs;
use crate::context::use_app_context;
use crate::listing::run_action;
use crate::pages::{fmt_day, today};
use crate::store::{toast_error, use_app_store};

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ReserveParams {
    pub id: Option<String>,
}

/// Insert `day` keeping the list sorted and free of duplicates.
/// Returns false when the date was already there.
pub fn add_date(dates: &mut Vec<NaiveDate>, day: NaiveDate) -> bool {
    match dates.binary_search(&day) {
        Ok(_) => false,
        Err(pos) => {
            dates.insert(pos, day);
            true
        }
    }
}

#[component]
pub fn ReserveDatesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let params = use_params::<ReserveParams>();
    let venue_id = Memo::new(move |_| params.get().ok().and_then(|p| p.id).unwrap_or_default());

    let venue_name = RwSignal::new(String::new());
    let dates = RwSignal::new(Vec::<NaiveDate>::new());
    let draft = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let (loading, set_loading) = signal(false);
    let (dirty, set_dirty) = signal(false);
    let api = StoredValue::new(ctx.api.clone());

    Effect::new(move |_| {
        let id = venue_id.get();
        if id.is_empty() {
            return;
        }
        set_loading.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match api.fetch_venue(&id).await {
                Ok(venue) => {
                    let mut sorted = venue.reserved_dates.clone();
                    sorted.sort();
                    sorted.dedup();
                    venue_name.try_set(venue.name);
                    dates.try_set(sorted);
                    set_dirty.try_set(false);
                }
                Err(e) => {
                    log::error!("[reserve] load {} failed: {}", id, e);
                    toast_error(&store, e.to_string());
                }
            }
            set_loading.try_set(false);
        });
    });

    let add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Ok(day) = NaiveDate::parse_from_str(draft.get_untracked().trim(), "%Y-%m-%d") else {
            form_error.set(Some("Pick a date to block".to_string()));
            return;
        };
        if day < today() {
            form_error.set(Some("Past dates cannot be blocked".to_string()));
            return;
        }
        form_error.set(None);
        if dates.try_update(|d| add_date(d, day)).unwrap_or(false) {
            set_dirty.set(true);
        }
        draft.set(String::new());
    };

    let remove = move |day: NaiveDate| {
        dates.update(|d| d.retain(|x| *x != day));
        set_dirty.set(true);
    };

    let save = move |_| {
        let id = venue_id.get_untracked();
        let selected = dates.get_untracked();
        let api = api.get_value();
        run_action(store, async move { api.reserve_dates(&id, &selected).await }, move || {
            set_dirty.try_set(false);
        });
    };

    view! {
        <section class="page dashboard-page">
            <OwnerTabs />
            <h1>"Blocked dates"</h1>
            <p class="muted">{move || venue_name.get()}</p>
            <Show when=move || loading.get()>
                <div class="loading-placeholder">"Loading dates..."</div>
            </Show>
            <form class="reserve-form" on:submit=add>
                <input
                    type="date"
                    min=today().format("%Y-%m-%d").to_string()
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button type="submit" class="btn">"Block date"</button>
            </form>
            {move || form_error.get().map(|m| view! { <p class="form-error">{m}</p> })}
            <ul class="reserved-list">
                <For
                    each=move || dates.get()
                    key=|day| *day
                    children=move |day| view! {
                        <li>
                            <span>{fmt_day(day)}</span>
                            <button class="btn btn-link" on:click=move |_| remove(day)>"Remove"</button>
                        </li>
                    }
                />
            </ul>
            <Show when=move || dates.with(Vec::is_empty) && !loading.get()>
                <p class="empty-state">"No dates are blocked."</p>
            </Show>
            <button class="btn btn-primary" disabled=move || !dirty.get() on:click=save>"Save dates"</button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_add_date_keeps_order_and_skips_duplicates() {
        let mut dates = vec![day(3), day(10)];
        assert!(add_date(&mut dates, day(5)));
        assert!(!add_date(&mut dates, day(10)));
        assert!(add_date(&mut dates, day(1)));
        assert_eq!(dates, vec![day(1), day(3), day(5), day(10)]);
    }
}
