//! Owner Bookings Page

use leptos::prelude::*;
use leptos_listing::FilterState;

use super::OwnerTabs;
use crate::components::{ConfirmButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{bookings_spec, owner_bookings_controls};
use crate::listing::{run_action, use_listing};
use crate::models::{format_price, Booking, BookingStatus};
use crate::pages::{fmt_day, status_badge};
use crate::store::use_app_store;

/// Booking requests for the owner's venues. Pending requests can be
/// confirmed or declined.
#[component]
pub fn OwnerBookingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) = use_listing(bookings_spec(), FilterState::new(), |api| async move { api.owner_bookings().await });

    let decide = Callback::new(move |(id, status): (String, BookingStatus)| {
        let api = ctx.api.clone();
        let target = id.clone();
        run_action(store, async move { api.set_booking_status(&id, status).await }, move || {
            listing.update_items(|items| {
                if let Some(b) = items.iter_mut().find(|b| b.id == target) {
                    b.status = status;
                }
            });
        });
    });

    let row = move |booking: Booking| {
        let pending = booking.status == BookingStatus::Pending;
        let id = booking.id.clone();
        let guest = match (&booking.user_name, &booking.user_email) {
            (Some(name), Some(email)) => format!("{} <{}>", name, email),
            (Some(name), None) => name.clone(),
            (None, Some(email)) => email.clone(),
            (None, None) => "-".to_string(),
        };
        view! {
            <tr>
                <td>{booking.venue_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                <td>{guest}</td>
                <td>{fmt_day(booking.event_date)}</td>
                <td>{booking.guests}</td>
                <td>{format_price(booking.total_amount)}</td>
                <td>{status_badge(booking.status.as_str())}</td>
                <td>{status_badge(booking.payment_status.as_str())}</td>
                <td class="row-actions">
                    {pending.then(|| {
                        let confirm_id = id.clone();
                        view! {
                            <button
                                class="btn btn-primary"
                                on:click=move |_| decide.run((confirm_id.clone(), BookingStatus::Confirmed))
                            >
                                "Confirm"
                            </button>
                            <ConfirmButton
                                label="Decline"
                                prompt="Decline this request?"
                                on_confirm=Callback::new(move |_| decide.run((id.clone(), BookingStatus::Cancelled)))
                            />
                        }
                    })}
                </td>
            </tr>
        }
    };

    view! {
        <section class="page dashboard-page">
            <OwnerTabs />
            <h1>"Bookings"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(owner_bookings_controls)
                on_retry=reload
                row=row
                headers=vec!["Venue", "Guest", "Date", "Guests", "Amount", "Status", "Payment", ""]
                empty_text="No bookings for your venues yet."
                placeholder="Search by venue or guest"
            />
        </section>
    }
}
