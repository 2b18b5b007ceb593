//! ListingView - Staged Listing Exploration
//!
//! Loads a short-term rental listing export once, then narrows it through
//! three filter stages (price and host status, room type and neighborhood,
//! single listing) and computes the tables a dashboard frontend draws at
//! each stage.

pub mod error;
pub mod listing;
pub mod table;
pub mod loader;
pub mod filter;
pub mod view;
pub mod aggregate;
pub mod select;
pub mod session;
pub mod messages;

pub use error::LoadError;
pub use listing::{Listing, Rate, ReviewCategory, ReviewScores, Superhost};
pub use table::{ListingTable, PriceBounds, Schema};
pub use loader::{load_listings, load_listings_from_reader, ExclusionReason, LoadReport, LoadedListings};
pub use filter::Predicate;
pub use view::{apply_stage1, apply_stage2, ListingView};
pub use aggregate::{price_distribution_by_room_type, summarize_by_neighborhood, NeighborhoodSummary, RoomTypePriceStats};
pub use select::{select_record, HostField, HostInfo, ReviewBreakdown, ReviewEntry, Selection};
pub use session::{DashboardSession, DashboardSnapshot, FilterState, StageOutput};

// WebSocket server modules - only when server feature is enabled
#[cfg(feature = "server")]
pub mod websocket;
#[cfg(feature = "server")]
pub mod server;

#[cfg(test)]
pub(crate) mod fixtures;
