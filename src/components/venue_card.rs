//! Venue Card Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::FavoriteButton;
use crate::models::{format_price, Venue};

const PLACEHOLDER_IMAGE: &str = "/assets/venue-placeholder.jpg";

/// Summary card linking to the venue detail page
#[component]
pub fn VenueCard(venue: Venue) -> impl IntoView {
    let href = format!("/venue/{}", venue.id);
    let image = venue.cover_image().unwrap_or(PLACEHOLDER_IMAGE).to_string();
    let location = [venue.city.as_deref(), venue.venue_type.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    let rating = venue.rating.map(|r| format!("★ {:.1}", r));
    let alt = venue.name.clone();

    view! {
        <article class="venue-card">
            <A href=href.clone() attr:class="venue-card-link">
                <img class="venue-card-image" src=image alt=alt loading="lazy" />
            </A>
            <div class="venue-card-body">
                <div class="venue-card-title">
                    <A href=href>{venue.name.clone()}</A>
                    <FavoriteButton venue_id=venue.id.clone() />
                </div>
                <p class="venue-card-meta">{location}</p>
                <p class="venue-card-stats">
                    <span class="price">{format_price(venue.price)}</span>
                    <span class="capacity">{format!("Up to {} guests", venue.capacity)}</span>
                    {rating.map(|r| view! { <span class="rating">{r}</span> })}
                </p>
            </div>
        </article>
    }
}
