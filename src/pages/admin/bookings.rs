//! Admin Bookings Page

use leptos::prelude::*;
use leptos_listing::FilterState;

use super::AdminTabs;
use crate::components::ListingShell;
use crate::filters::{admin_bookings_controls, bookings_spec};
use crate::listing::use_listing;
use crate::models::{format_price, Booking};
use crate::pages::{fmt_created, fmt_day, status_badge};

#[component]
pub fn AdminBookingsPage() -> impl IntoView {
    let (listing, reload) = use_listing(bookings_spec(), FilterState::new(), |api| async move { api.admin_bookings().await });

    let row = |booking: Booking| {
        view! {
            <tr>
                <td>{booking.venue_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                <td>{booking.user_name.clone().or(booking.user_email.clone()).unwrap_or_else(|| "-".to_string())}</td>
                <td>{fmt_day(booking.event_date)}</td>
                <td>{booking.guests}</td>
                <td>{format_price(booking.total_amount)}</td>
                <td>{status_badge(booking.status.as_str())}</td>
                <td>{status_badge(booking.payment_status.as_str())}</td>
                <td>{fmt_created(booking.created_at.as_ref())}</td>
            </tr>
        }
    };

    view! {
        <section class="page dashboard-page">
            <AdminTabs />
            <h1>"All bookings"</h1>
            <ListingShell
                listing=listing
                controls=Signal::derive(admin_bookings_controls)
                on_retry=reload
                row=row
                headers=vec!["Venue", "Guest", "Date", "Guests", "Amount", "Status", "Payment", "Booked"]
                empty_text="No bookings yet."
                placeholder="Search by venue or guest"
            />
        </section>
    }
}
