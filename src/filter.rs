//! Listing predicates used by the filter stages.
//!
//! Predicates are small typed expressions evaluated against a [`Listing`].
//! They render as readable expressions for logging:
//!
//! - `price BETWEEN 50 AND 200`
//! - `superhost == 'Yes'`
//! - `room_type == 'Private room' AND neighborhood == 'Ballard'`

use crate::listing::{Listing, Superhost};
use std::fmt;

/// A predicate over listings.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Inclusive price range. Matches nothing when `min > max`.
    PriceBetween { min: f64, max: f64 },
    SuperhostIs(Superhost),
    RoomTypeIs(String),
    NeighborhoodIs(String),
    IdIs(String),
    /// Logical AND of two predicates
    And(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// Stage 1: price range and host status.
    pub fn price_and_superhost(min: f64, max: f64, superhost: Superhost) -> Predicate {
        Predicate::PriceBetween { min, max }.and(Predicate::SuperhostIs(superhost))
    }

    /// Stage 2: room type and neighborhood.
    pub fn room_and_neighborhood(room_type: &str, neighborhood: &str) -> Predicate {
        Predicate::RoomTypeIs(room_type.to_string())
            .and(Predicate::NeighborhoodIs(neighborhood.to_string()))
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Predicate::PriceBetween { min, max } => *min <= listing.price && listing.price <= *max,
            Predicate::SuperhostIs(flag) => listing.superhost == *flag,
            Predicate::RoomTypeIs(room_type) => listing.room_type == *room_type,
            Predicate::NeighborhoodIs(neighborhood) => listing.neighborhood == *neighborhood,
            Predicate::IdIs(id) => listing.id == *id,
            Predicate::And(left, right) => left.matches(listing) && right.matches(listing),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::PriceBetween { min, max } => write!(f, "price BETWEEN {} AND {}", min, max),
            Predicate::SuperhostIs(flag) => write!(f, "superhost == '{}'", flag),
            Predicate::RoomTypeIs(room_type) => write!(f, "room_type == '{}'", room_type),
            Predicate::NeighborhoodIs(n) => write!(f, "neighborhood == '{}'", n),
            Predicate::IdIs(id) => write!(f, "id == '{}'", id),
            Predicate::And(left, right) => write!(f, "{} AND {}", left, right),
        }
    }
}
