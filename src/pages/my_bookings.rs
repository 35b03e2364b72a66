//! My Bookings Page

use leptos::prelude::*;
use leptos_listing::FilterState;

use crate::components::{ConfirmButton, ListingShell};
use crate::context::use_app_context;
use crate::filters::{bookings_spec, my_bookings_controls};
use crate::listing::{run_action, use_listing};
use crate::models::{format_price, Booking, BookingStatus};
use crate::pages::{fmt_day, status_badge, today};
use crate::payment::start_checkout;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn MyBookingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (listing, reload) = use_listing(bookings_spec(), FilterState::new(), |api| async move { api.my_bookings().await });

    // A verified payment changes the payment status server-side
    Effect::new(move |prev: Option<u32>| {
        let version = store.payments_version().get();
        if prev.is_some() {
            reload.run(());
        }
        version
    });

    let cancel = Callback::new({
        let api = ctx.api.clone();
        move |id: String| {
            let api = api.clone();
            let target = id.clone();
            run_action(store, async move { api.cancel_booking(&id).await }, move || {
                listing.update_items(|items| {
                    if let Some(b) = items.iter_mut().find(|b| b.id == target) {
                        b.status = BookingStatus::Cancelled;
                    }
                });
            });
        }
    });

    let pay = Callback::new(move |booking: Booking| {
        let description = format!(
            "{} on {}",
            booking.venue_name.as_deref().unwrap_or("Venue booking"),
            fmt_day(booking.event_date)
        );
        start_checkout(&ctx, store, booking.id, description);
    });

    let row = move |booking: Booking| {
        let can_cancel = booking.can_cancel(today());
        let can_pay = booking.awaiting_payment();
        let id = booking.id.clone();
        view! {
            <tr>
                <td>{booking.venue_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                <td>{fmt_day(booking.event_date)}</td>
                <td>{booking.guests}</td>
                <td>{format_price(booking.total_amount)}</td>
                <td>{status_badge(booking.status.as_str())}</td>
                <td>{status_badge(booking.payment_status.as_str())}</td>
                <td class="row-actions">
                    {can_pay.then(|| {
                        let booking = booking.clone();
                        view! {
                            <button class="btn btn-primary" on:click=move |_| pay.run(booking.clone())>"Pay now"</button>
                        }
                    })}
                    {can_cancel.then(|| view! {
                        <ConfirmButton
                            label="Cancel"
                            prompt="Cancel this booking?"
                            on_confirm=Callback::new(move |_| cancel.run(id.clone()))
                        />
                    })}
                </td>
            </tr>
        }
    };

    view! {
        <section class="page bookings-page">
            <h1>"My bookings"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(my_bookings_controls)
                on_retry=reload
                row=row
                headers=vec!["Venue", "Date", "Guests", "Amount", "Status", "Payment", ""]
                empty_text="You have not booked any venues yet."
                placeholder="Search by venue"
            />
        </section>
    }
}
