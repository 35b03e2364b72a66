//! Venue Detail Page
//!
//! Venue facts plus the three visitor actions: book a date, ask the owner a
//! question and leave a review.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_listing::FilterState;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;

use crate::api::{BookingRequest, InquiryRequest, ReviewRequest};
use crate::components::{FavoriteButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{reviews_controls, reviews_spec};
use crate::listing::use_listing;
use crate::models::{format_price, Review, Venue};
use crate::pages::{fmt_created, fmt_day, non_empty, today};
use crate::payment::start_checkout;
use crate::store::{toast_error, toast_success, use_app_store, AppStateStoreFields};

#[derive(Params, PartialEq, Clone, Debug)]
pub struct VenueRouteParams {
    pub id: Option<String>,
}

#[component]
pub fn VenueDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let params = use_params::<VenueRouteParams>();
    let venue_id = Memo::new(move |_| params.get().ok().and_then(|p| p.id).unwrap_or_default());

    let venue = RwSignal::new(None::<Venue>);
    let load_error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let id = venue_id.get();
        if id.is_empty() {
            return;
        }
        venue.set(None);
        load_error.set(None);
        let api = ctx.api.clone();
        spawn_local(async move {
            match api.fetch_venue(&id).await {
                // The visitor may have moved on to another venue
                Ok(v) if venue_id.try_get_untracked().as_deref() == Some(v.id.as_str()) => {
                    venue.try_set(Some(v));
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("[venue] load {} failed: {}", id, e);
                    load_error.try_set(Some(e.to_string()));
                }
            }
        });
    });

    view! {
        <section class="page venue-page">
            {move || load_error.get().map(|message| view! {
                <div class="inline-error" role="alert">
                    <p>{message}</p>
                    <a href="/">"Back to venues"</a>
                </div>
            })}
            {move || match venue.get() {
                Some(v) => view! { <VenueDetail venue=v /> }.into_any(),
                None if load_error.with(Option::is_none) => {
                    view! { <div class="loading-placeholder">"Loading venue..."</div> }.into_any()
                }
                None => ().into_any(),
            }}
        </section>
    }
}

#[component]
fn VenueDetail(venue: Venue) -> impl IntoView {
    let amenities = venue.amenities.clone();
    let location = [venue.address.clone(), venue.city.clone()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

    view! {
        <div class="venue-detail">
            <div class="venue-gallery">
                {venue.images.iter().map(|src| view! {
                    <img src=src.clone() alt=venue.name.clone() loading="lazy" />
                }).collect_view()}
            </div>
            <header class="venue-header">
                <h1>{venue.name.clone()}</h1>
                <FavoriteButton venue_id=venue.id.clone() />
            </header>
            <p class="venue-location">{location}</p>
            <p class="venue-stats">
                <span class="price">{format_price(venue.price)}</span>
                <span class="capacity">{format!("Up to {} guests", venue.capacity)}</span>
                {venue.venue_type.clone().map(|t| view! { <span class="venue-type">{t}</span> })}
            </p>
            <p class="venue-description">{venue.description.clone()}</p>
            {(!amenities.is_empty()).then(|| view! {
                <ul class="amenities">
                    {amenities.into_iter().map(|a| view! { <li>{a}</li> }).collect_view()}
                </ul>
            })}

            <div class="venue-actions">
                <BookingPanel venue=venue.clone() />
                <InquiryForm venue_id=venue.id.clone() />
            </div>
            <ReviewSection venue_id=venue.id.clone() />
        </div>
    }
}

#[component]
fn BookingPanel(venue: Venue) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = StoredValue::new(use_navigate());
    let venue = StoredValue::new(venue);

    let date = RwSignal::new(String::new());
    let guests = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if store.session().with_untracked(Option::is_none) {
            toast_error(&store, "Log in to book this venue");
            navigate.with_value(|nav| nav("/login", Default::default()));
            return;
        }
        let request = venue.with_value(|v| {
            BookingRequest::from_form(
                v,
                &date.get_untracked(),
                &guests.get_untracked(),
                &notes.get_untracked(),
                today(),
            )
        });
        let request = match request {
            Ok(r) => r,
            Err(e) => {
                form_error.set(Some(e.to_string()));
                return;
            }
        };
        form_error.set(None);
        set_submitting.set(true);

        let ctx = ctx.clone();
        let description = venue.with_value(|v| format!("{} on {}", v.name, fmt_day(request.event_date)));
        spawn_local(async move {
            match ctx.api.create_booking(&request).await {
                Ok(booking) => {
                    log::info!("[booking] created {}", booking.id);
                    toast_success(&store, "Booking requested");
                    date.try_set(String::new());
                    guests.try_set(String::new());
                    notes.try_set(String::new());
                    if booking.awaiting_payment() {
                        start_checkout(&ctx, store, booking.id, description);
                    }
                }
                Err(e) => {
                    log::error!("[booking] create failed: {}", e);
                    form_error.try_set(Some(e.to_string()));
                }
            }
            set_submitting.try_set(false);
        });
    };

    let min_date = today().format("%Y-%m-%d").to_string();
    let reserved = venue.with_value(|v| {
        v.reserved_dates
            .iter()
            .filter(|d| **d >= today())
            .map(|d| fmt_day(*d))
            .collect::<Vec<_>>()
            .join(", ")
    });

    view! {
        <form class="booking-form" on:submit=submit>
            <h2>"Book this venue"</h2>
            {(!reserved.is_empty()).then(|| view! {
                <p class="reserved-dates">"Unavailable: " {reserved}</p>
            })}
            <label>
                "Event date"
                <input
                    type="date"
                    min=min_date
                    prop:value=move || date.get()
                    on:input=move |ev| date.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Guests"
                <input
                    type="number"
                    min="1"
                    prop:value=move || guests.get()
                    on:input=move |ev| guests.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Notes"
                <textarea
                    prop:value=move || notes.get()
                    on:input=move |ev| notes.set(event_target_value(&ev))
                />
            </label>
            {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "Booking..." } else { "Request booking" }}
            </button>
        </form>
    }
}

#[component]
fn InquiryForm(venue_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let venue_id = StoredValue::new(venue_id);

    let session = store.session().get_untracked();
    let name = RwSignal::new(session.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let email = RwSignal::new(session.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let phone = RwSignal::new(String::new());
    let event_date = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let (sending, set_sending) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = InquiryRequest {
            venue_id: venue_id.get_value(),
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: non_empty(&phone.get_untracked()),
            message: message.get_untracked().trim().to_string(),
            event_date: NaiveDate::parse_from_str(event_date.get_untracked().trim(), "%Y-%m-%d").ok(),
        };
        if let Err(e) = request.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        form_error.set(None);
        set_sending.set(true);

        let api = ctx.api.clone();
        spawn_local(async move {
            match api.create_inquiry(&request).await {
                Ok(reply) => {
                    toast_success(&store, reply);
                    message.try_set(String::new());
                }
                Err(e) => {
                    form_error.try_set(Some(e.to_string()));
                }
            }
            set_sending.try_set(false);
        });
    };

    view! {
        <form class="inquiry-form" on:submit=submit>
            <h2>"Ask the owner"</h2>
            <input placeholder="Your name" prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
            <input type="email" placeholder="Email" prop:value=move || email.get() on:input=move |ev| email.set(event_target_value(&ev)) />
            <input type="tel" placeholder="Phone (optional)" prop:value=move || phone.get() on:input=move |ev| phone.set(event_target_value(&ev)) />
            <input type="date" prop:value=move || event_date.get() on:input=move |ev| event_date.set(event_target_value(&ev)) />
            <textarea placeholder="Your question" prop:value=move || message.get() on:input=move |ev| message.set(event_target_value(&ev)) />
            {move || form_error.get().map(|m| view! { <p class="form-error">{m}</p> })}
            <button type="submit" class="btn" disabled=move || sending.get()>"Send inquiry"</button>
        </form>
    }
}

#[component]
fn ReviewSection(venue_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let fetch_id = venue_id.clone();
    let (listing, reload) = use_listing(reviews_spec(), FilterState::new(), move |api| {
        let id = fetch_id.clone();
        async move { api.venue_reviews(&id).await }
    });

    let venue_id = StoredValue::new(venue_id);
    let api = StoredValue::new(ctx.api.clone());
    let rating = RwSignal::new(5u8);
    let comment = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let logged_in = move || store.session().with(Option::is_some);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = ReviewRequest {
            venue_id: venue_id.get_value(),
            rating: rating.get_untracked(),
            comment: comment.get_untracked().trim().to_string(),
        };
        if let Err(e) = request.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        form_error.set(None);
        let api = api.get_value();
        spawn_local(async move {
            match api.create_review(&request).await {
                Ok(message) => {
                    toast_success(&store, message);
                    comment.try_set(String::new());
                    reload.run(());
                }
                Err(e) => {
                    form_error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <section class="reviews">
            <h2>"Reviews"</h2>
            <ListingShell
                listing=listing
                controls=Signal::derive(reviews_controls)
                on_retry=reload
                row=|review: Review| view! {
                    <article class="review-card">
                        <header>
                            <span class="stars">{review.stars()}</span>
                            <span class="review-author">{review.user_name.clone().unwrap_or_else(|| "Guest".to_string())}</span>
                            <span class="review-date">{fmt_created(review.created_at.as_ref())}</span>
                        </header>
                        <p>{review.comment.clone()}</p>
                    </article>
                }
                empty_text="No reviews yet."
                placeholder="Search reviews"
            />
            <Show
                when=logged_in
                fallback=|| view! { <p class="hint"><a href="/login">"Log in"</a>" to leave a review."</p> }
            >
                <form class="review-form" on:submit=submit>
                    <select
                        prop:value=move || rating.get().to_string()
                        on:change=move |ev| rating.set(event_target_value(&ev).parse().unwrap_or(5))
                    >
                        {(1..=5u8).rev().map(|n| view! { <option value=n.to_string()>{"★".repeat(n as usize)}</option> }).collect_view()}
                    </select>
                    <textarea
                        placeholder="How was your event?"
                        prop:value=move || comment.get()
                        on:input=move |ev| comment.set(event_target_value(&ev))
                    />
                    {move || form_error.get().map(|m| view! { <p class="form-error">{m}</p> })}
                    <button type="submit" class="btn">"Post review"</button>
                </form>
            </Show>
        </section>
    }
}
