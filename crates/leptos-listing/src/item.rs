//! Listing Item Trait
//!
//! The contract every row type shown on a listing page must satisfy.

use std::fmt::Debug;
use std::hash::Hash;

/// A record rendered by a listing page.
///
/// The identifier must be unique within one collection snapshot; it is used
/// as the render key and for favorites lookups.
pub trait ListingItem: Clone + Send + Sync + 'static {
    /// The type of the item's unique identifier
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Returns the item's unique identifier
    fn id(&self) -> Self::Id;
}
