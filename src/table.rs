//! The cleaned listing table and the source schema it is loaded from.
//!
//! A [`ListingTable`] is built once and never mutated afterwards. It is shared
//! between sessions behind an `Arc`; every view is an index list into it.
//!
//! # Examples
//!
//! ```
//! use listingview::{ListingTable, Listing, ReviewScores, Rate, Superhost};
//!
//! let listing = Listing {
//!     id: "1".to_string(),
//!     price: 120.0,
//!     room_type: "Entire home/apt".to_string(),
//!     neighborhood: "Ballard".to_string(),
//!     superhost: Superhost::Yes,
//!     review_scores: ReviewScores::from_ordered([5.0; 6]),
//!     average_review_score: 5.0,
//!     picture_url: "https://example.com/1.jpg".to_string(),
//!     host_url: "https://example.com/host/1".to_string(),
//!     host_response_rate: Rate(100.0),
//!     host_name: Some("Ada".to_string()),
//!     host_acceptance_rate: None,
//! };
//!
//! let table = ListingTable::new("listings".to_string(), vec![listing]).unwrap();
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.price_bounds().min, 120.0);
//! ```

use crate::error::{LoadError, Result};
use crate::listing::{Listing, ReviewCategory};
use serde::Serialize;

/// Column layout of the raw listing source.
///
/// Each entry is `(column_name, required)`. Required columns must be present
/// in the source header; optional ones may be missing entirely.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<(String, bool)>,
}

impl Schema {
    pub fn new(columns: Vec<(String, bool)>) -> Self {
        Schema { columns }
    }

    /// The layout of an Inside Airbnb `listings.csv` export.
    pub fn listings() -> Self {
        let mut columns: Vec<(String, bool)> = vec![
            ("id".to_string(), true),
            ("price".to_string(), true),
            ("room_type".to_string(), true),
            ("neighbourhood_cleansed".to_string(), true),
            ("host_is_superhost".to_string(), true),
        ];
        columns.extend(
            ReviewCategory::ALL
                .iter()
                .map(|c| (c.column().to_string(), true)),
        );
        columns.extend([
            ("picture_url".to_string(), true),
            ("host_url".to_string(), true),
            ("host_response_rate".to_string(), true),
            ("host_name".to_string(), false),
            ("host_acceptance_rate".to_string(), false),
        ]);
        Schema { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|(_, required)| *required)
            .map(|(name, _)| name.as_str())
    }

    pub fn is_required(&self, name: &str) -> Option<bool> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, required)| *required)
    }

    /// Check a source header, returning the first required column it lacks.
    pub fn validate_header<'a, I>(&self, header: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        for column in self.required_columns() {
            if !header.clone().into_iter().any(|h| h.trim() == column) {
                return Err(LoadError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }
}

/// Slider bounds for the stage-1 price filter.
///
/// `min` is the floor of the cheapest price and `max` the ceiling of the most
/// expensive one, so the default range covers every listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// The immutable, cleaned listing set.
#[derive(Debug)]
pub struct ListingTable {
    name: String,
    listings: Vec<Listing>,
    price_bounds: PriceBounds,
}

impl ListingTable {
    /// Wrap cleaned listings. An empty set cannot drive a session and is
    /// rejected.
    pub fn new(name: String, listings: Vec<Listing>) -> Result<Self> {
        let price_bounds = compute_price_bounds(&listings).ok_or(LoadError::Empty)?;
        Ok(ListingTable {
            name,
            listings,
            price_bounds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Listing> {
        self.listings.get(index)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    pub fn price_bounds(&self) -> PriceBounds {
        self.price_bounds
    }
}

fn compute_price_bounds(listings: &[Listing]) -> Option<PriceBounds> {
    let mut prices = listings.iter().map(|l| l.price);
    let first = prices.next()?;
    let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    Some(PriceBounds {
        min: min.floor(),
        max: max.ceil(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::listing;

    #[test]
    fn test_schema_required_columns() {
        let schema = Schema::listings();
        assert_eq!(schema.len(), 16);
        assert_eq!(schema.required_columns().count(), 14);
        assert_eq!(schema.is_required("price"), Some(true));
        assert_eq!(schema.is_required("host_name"), Some(false));
        assert_eq!(schema.is_required("bathrooms"), None);
    }

    #[test]
    fn test_validate_header() {
        let schema = Schema::new(vec![
            ("id".to_string(), true),
            ("price".to_string(), true),
            ("host_name".to_string(), false),
        ]);

        assert!(schema.validate_header(["id", "price", "extra"]).is_ok());

        match schema.validate_header(["id", "host_name"]) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "price"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            ListingTable::new("empty".to_string(), Vec::new()),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn test_price_bounds_cover_all_listings() {
        let table = ListingTable::new(
            "t".to_string(),
            vec![
                listing("1", 45.5, "Private room", "Ballard"),
                listing("2", 310.25, "Entire home/apt", "Fremont"),
                listing("3", 99.0, "Shared room", "Ballard"),
            ],
        )
        .unwrap();

        assert_eq!(table.price_bounds(), PriceBounds { min: 45.0, max: 311.0 });
        assert!(table.iter().all(|l| {
            l.price >= table.price_bounds().min && l.price <= table.price_bounds().max
        }));
    }

    #[test]
    fn test_table_access() {
        let table = ListingTable::new(
            "t".to_string(),
            vec![listing("a", 10.0, "Private room", "Ballard")],
        )
        .unwrap();
        assert_eq!(table.name(), "t");
        assert!(!table.is_empty());
        assert_eq!(table.get(0).map(|l| l.id.as_str()), Some("a"));
        assert!(table.get(1).is_none());
    }
}
