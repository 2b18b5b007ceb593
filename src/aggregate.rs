//! Aggregate tables computed from a view.
//!
//! Both aggregates group by a categorical field and return rows in a fixed
//! order, so repeated calls over the same view serialize identically.

use crate::view::ListingView;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Mean price of one neighborhood within a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodSummary {
    pub neighborhood: String,
    pub mean_price: f64,
    pub listing_count: usize,
}

/// Mean price per neighborhood, most expensive first.
///
/// Ties on mean price are ordered by neighborhood name ascending. An empty
/// view gives an empty summary.
pub fn summarize_by_neighborhood(view: &ListingView) -> Vec<NeighborhoodSummary> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for listing in view.iter() {
        let entry = groups.entry(listing.neighborhood.as_str()).or_insert((0.0, 0));
        entry.0 += listing.price;
        entry.1 += 1;
    }

    let mut summary: Vec<NeighborhoodSummary> = groups
        .into_iter()
        .map(|(neighborhood, (total, count))| NeighborhoodSummary {
            neighborhood: neighborhood.to_string(),
            mean_price: total / count as f64,
            listing_count: count,
        })
        .collect();

    summary.sort_by(|a, b| {
        b.mean_price
            .partial_cmp(&a.mean_price)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.neighborhood.cmp(&b.neighborhood))
    });
    summary
}

/// Five-number summary (plus mean) of prices for one room type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomTypePriceStats {
    pub room_type: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// Price distribution per room type, ordered by room type name.
pub fn price_distribution_by_room_type(view: &ListingView) -> Vec<RoomTypePriceStats> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for listing in view.iter() {
        groups
            .entry(listing.room_type.as_str())
            .or_default()
            .push(listing.price);
    }

    groups
        .into_iter()
        .map(|(room_type, mut prices)| {
            prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            let count = prices.len();
            RoomTypePriceStats {
                room_type: room_type.to_string(),
                count,
                min: prices[0],
                q1: quantile(&prices, 0.25),
                median: quantile(&prices, 0.5),
                q3: quantile(&prices, 0.75),
                max: prices[count - 1],
                mean: prices.iter().sum::<f64>() / count as f64,
            }
        })
        .collect()
}

/// Linear interpolation between closest ranks of a sorted, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
