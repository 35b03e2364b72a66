//! Owner dashboard
//!
//! Only reachable for approved owners; the router wraps every page here in
//! `RequireRole`.

mod bookings;
mod inquiries;
mod reserve;
mod reviews;
mod venue_form;
mod venues;

pub use bookings::OwnerBookingsPage;
pub use inquiries::OwnerInquiriesPage;
pub use reserve::ReserveDatesPage;
pub use reviews::OwnerReviewsPage;
pub use venue_form::VenueFormPage;
pub use venues::OwnerVenuesPage;

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
fn OwnerTabs() -> impl IntoView {
    view! {
        <nav class="dashboard-tabs">
            <A href="/owner/venues">"Venues"</A>
            <A href="/owner/bookings">"Bookings"</A>
            <A href="/owner/inquiries">"Inquiries"</A>
            <A href="/owner/reviews">"Reviews"</A>
        </nav>
    }
}
