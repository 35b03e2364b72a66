//! Admin dashboard

mod approvals;
mod bookings;
mod inquiries;
mod logs;
mod reviews;
mod users;
mod venues;

pub use approvals::{PendingOwnersPage, PendingVenuesPage};
pub use bookings::AdminBookingsPage;
pub use inquiries::AdminInquiriesPage;
pub use logs::AdminLogsPage;
pub use reviews::AdminReviewsPage;
pub use users::AdminUsersPage;
pub use venues::AdminVenuesPage;

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
fn AdminTabs() -> impl IntoView {
    view! {
        <nav class="dashboard-tabs">
            <A href="/admin/venues">"Venues"</A>
            <A href="/admin/venues/pending">"Venue approvals"</A>
            <A href="/admin/owners/pending">"Owner approvals"</A>
            <A href="/admin/bookings">"Bookings"</A>
            <A href="/admin/users">"Users"</A>
            <A href="/admin/reviews">"Reviews"</A>
            <A href="/admin/inquiries">"Inquiries"</A>
            <A href="/admin/logs">"Logs"</A>
        </nav>
    }
}
