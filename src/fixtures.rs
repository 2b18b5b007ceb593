//! Listing builders shared by unit tests.

use crate::listing::{Listing, Rate, ReviewScores, Superhost};
use crate::table::ListingTable;
use std::sync::Arc;

pub(crate) fn listing(id: &str, price: f64, room_type: &str, neighborhood: &str) -> Listing {
    let review_scores = ReviewScores::from_ordered([4.8, 4.7, 4.9, 5.0, 4.6, 4.5]);
    Listing {
        id: id.to_string(),
        price,
        room_type: room_type.to_string(),
        neighborhood: neighborhood.to_string(),
        superhost: Superhost::Yes,
        average_review_score: review_scores.average(),
        review_scores,
        picture_url: format!("https://example.com/pictures/{}.jpg", id),
        host_url: format!("https://example.com/hosts/{}", id),
        host_response_rate: Rate(100.0),
        host_name: Some(format!("Host {}", id)),
        host_acceptance_rate: Some(Rate(95.0)),
    }
}

pub(crate) fn hosted_by(mut listing: Listing, superhost: Superhost) -> Listing {
    listing.superhost = superhost;
    listing
}

/// Mixed table used by view, aggregate and session tests.
///
/// | id | price | room            | neighborhood | superhost |
/// |----|-------|-----------------|--------------|-----------|
/// | 1  | 100   | Entire home/apt | Ballard      | Yes       |
/// | 2  | 200   | Entire home/apt | Fremont      | Yes       |
/// | 3  | 50    | Private room    | Ballard      | Yes       |
/// | 4  | 300   | Entire home/apt | Ballard      | No        |
/// | 5  | 80    | Private room    | Capitol Hill | No        |
/// | 6  | 150   | Private room    | Fremont      | Yes       |
pub(crate) fn sample_table() -> Arc<ListingTable> {
    let listings = vec![
        listing("1", 100.0, "Entire home/apt", "Ballard"),
        listing("2", 200.0, "Entire home/apt", "Fremont"),
        listing("3", 50.0, "Private room", "Ballard"),
        hosted_by(listing("4", 300.0, "Entire home/apt", "Ballard"), Superhost::No),
        hosted_by(listing("5", 80.0, "Private room", "Capitol Hill"), Superhost::No),
        listing("6", 150.0, "Private room", "Fremont"),
    ];
    Arc::new(ListingTable::new("sample".to_string(), listings).expect("non-empty sample"))
}
