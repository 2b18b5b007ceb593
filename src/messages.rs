/// WebSocket message types for dashboard sessions
use serde::{Deserialize, Serialize};

use crate::listing::Superhost;
use crate::session::DashboardSnapshot;

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Request the products for the current filter state
    Snapshot,

    /// Stage 1: price slider moved
    SetPriceRange { min: f64, max: f64 },

    /// Stage 1: superhost select box changed
    SetSuperhost { superhost: Superhost },

    /// Stage 2: room type chosen
    SelectRoomType { room_type: String },

    /// Stage 2: neighborhood chosen
    SelectNeighborhood { neighborhood: String },

    /// Stage 3: listing chosen
    SelectListing { listing_id: String },

    /// Back to the default filter state
    Reset,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Products recomputed for the session's filter state
    Dashboard { snapshot: Box<DashboardSnapshot> },

    /// Error occurred
    Error { message: String },
}
