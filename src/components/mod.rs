//! UI Components
//!
//! Reusable Leptos components.

mod confirm_button;
mod favorite_button;
mod filter_bar;
mod listing_shell;
mod nav_bar;
mod pagination;
mod require_role;
mod toast_host;
mod venue_card;

pub use confirm_button::ConfirmButton;
pub use favorite_button::FavoriteButton;
pub use filter_bar::FilterBar;
pub use listing_shell::ListingShell;
pub use nav_bar::NavBar;
pub use pagination::Pagination;
pub use require_role::RequireRole;
pub use toast_host::ToastHost;
pub use venue_card::VenueCard;
