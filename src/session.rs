//! Per-user dashboard state.
//!
//! A [`DashboardSession`] holds one user's filter choices and recomputes every
//! stage product from the shared table whenever a snapshot is requested.
//! Nothing is cached between snapshots.
//!
//! # Examples
//!
//! ```
//! use listingview::{load_listings_from_reader, DashboardSession, StageOutput, Superhost};
//! use std::sync::Arc;
//!
//! let csv = "id,price,room_type,neighbourhood_cleansed,host_is_superhost,\
//! review_scores_rating,review_scores_accuracy,review_scores_cleanliness,\
//! review_scores_checkin,review_scores_communication,review_scores_location,\
//! picture_url,host_url,host_response_rate\n\
//! 1,$120.00,Private room,Ballard,t,5,5,4,5,5,4,https://e.com/1.jpg,https://e.com/h/1,100%\n";
//!
//! let loaded = load_listings_from_reader("inline", csv.as_bytes()).unwrap();
//! let mut session = DashboardSession::new(Arc::new(loaded.table));
//! session.set_superhost(Superhost::Yes);
//!
//! let snapshot = session.snapshot();
//! assert!(matches!(snapshot.selection, StageOutput::Ready(_)));
//! ```

use crate::aggregate::{
    price_distribution_by_room_type, summarize_by_neighborhood, NeighborhoodSummary,
    RoomTypePriceStats,
};
use crate::listing::Superhost;
use crate::select::{select_record, Selection};
use crate::table::{ListingTable, PriceBounds};
use crate::view::{apply_stage1, apply_stage2, ListingView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Filter choices made by the user.
///
/// Unset price bounds mean the full price range. Unset room type,
/// neighborhood and listing mean "the first option offered". A value that is
/// set is kept as-is, even when it is no longer offered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub superhost: Superhost,
    pub room_type: Option<String>,
    pub neighborhood: Option<String>,
    pub listing_id: Option<String>,
}

/// The result of one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum StageOutput<T> {
    Ready(T),
    /// This stage's filter matched nothing.
    NoResults,
    /// An earlier stage matched nothing, so this stage was not evaluated.
    Unavailable,
}

impl<T> StageOutput<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            StageOutput::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, StageOutput::Ready(_))
    }
}

/// Stage-1 products.
#[derive(Debug, Clone, Serialize)]
pub struct BaseProducts {
    pub view: ListingView,
    pub room_type_prices: Vec<RoomTypePriceStats>,
    pub neighborhood_summary: Vec<NeighborhoodSummary>,
    pub room_type_options: Vec<String>,
    pub neighborhood_options: Vec<String>,
}

/// Stage-2 products.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredProducts {
    pub room_type: String,
    pub neighborhood: String,
    pub view: ListingView,
    pub listing_options: Vec<String>,
}

/// Every product for one filter state.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub price_bounds: PriceBounds,
    /// Filter state with defaults filled in.
    pub filters: FilterState,
    pub base: StageOutput<BaseProducts>,
    pub filtered: StageOutput<FilteredProducts>,
    pub selection: StageOutput<Selection>,
}

/// One user's view of the shared listing table.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    table: Arc<ListingTable>,
    state: FilterState,
}

impl DashboardSession {
    pub fn new(table: Arc<ListingTable>) -> Self {
        Self::with_state(table, FilterState::default())
    }

    pub fn with_state(table: Arc<ListingTable>, state: FilterState) -> Self {
        DashboardSession { table, state }
    }

    pub fn table(&self) -> &Arc<ListingTable> {
        &self.table
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.state.price_min = Some(min);
        self.state.price_max = Some(max);
    }

    pub fn set_superhost(&mut self, superhost: Superhost) {
        self.state.superhost = superhost;
    }

    pub fn select_room_type(&mut self, room_type: impl Into<String>) {
        self.state.room_type = Some(room_type.into());
    }

    pub fn select_neighborhood(&mut self, neighborhood: impl Into<String>) {
        self.state.neighborhood = Some(neighborhood.into());
    }

    pub fn select_listing(&mut self, listing_id: impl Into<String>) {
        self.state.listing_id = Some(listing_id.into());
    }

    pub fn reset(&mut self) {
        self.state = FilterState::default();
    }

    /// Recompute all stage products for the current filter state.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let price_bounds = self.table.price_bounds();
        let mut filters = self.state.clone();
        let price_min = *filters.price_min.get_or_insert(price_bounds.min);
        let price_max = *filters.price_max.get_or_insert(price_bounds.max);

        let base_view = apply_stage1(&self.table, price_min, price_max, filters.superhost);
        if base_view.is_empty() {
            log::trace!("snapshot: stage 1 matched nothing");
            return DashboardSnapshot {
                price_bounds,
                filters,
                base: StageOutput::NoResults,
                filtered: StageOutput::Unavailable,
                selection: StageOutput::Unavailable,
            };
        }

        let room_type_options = base_view.room_type_options();
        let neighborhood_options = base_view.neighborhood_options();
        let room_type = resolve(&mut filters.room_type, &room_type_options);
        let neighborhood = resolve(&mut filters.neighborhood, &neighborhood_options);

        let filtered_view = apply_stage2(&base_view, &room_type, &neighborhood);
        let base = StageOutput::Ready(BaseProducts {
            room_type_prices: price_distribution_by_room_type(&base_view),
            neighborhood_summary: summarize_by_neighborhood(&base_view),
            room_type_options,
            neighborhood_options,
            view: base_view,
        });

        if filtered_view.is_empty() {
            log::trace!("snapshot: stage 2 matched nothing");
            return DashboardSnapshot {
                price_bounds,
                filters,
                base,
                filtered: StageOutput::NoResults,
                selection: StageOutput::Unavailable,
            };
        }

        let listing_options = filtered_view.listing_ids();
        let listing_id = resolve(&mut filters.listing_id, &listing_options);
        let selection = match select_record(&filtered_view, &listing_id) {
            Some(selection) => StageOutput::Ready(selection),
            None => StageOutput::NoResults,
        };

        DashboardSnapshot {
            price_bounds,
            filters,
            base,
            filtered: StageOutput::Ready(FilteredProducts {
                room_type,
                neighborhood,
                view: filtered_view,
                listing_options,
            }),
            selection,
        }
    }
}

/// The chosen value if one was set, otherwise the first option.
///
/// `options` is never empty here because it comes from a non-empty view.
fn resolve(choice: &mut Option<String>, options: &[String]) -> String {
    choice
        .get_or_insert_with(|| options.first().cloned().unwrap_or_default())
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_table;

    fn base_ids(snapshot: &DashboardSnapshot) -> Vec<String> {
        snapshot
            .base
            .ready()
            .map(|b| b.view.iter().map(|l| l.id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_default_snapshot_picks_first_options() {
        let session = DashboardSession::new(sample_table());
        let snapshot = session.snapshot();

        assert_eq!(snapshot.price_bounds, PriceBounds { min: 50.0, max: 300.0 });
        assert_eq!(snapshot.filters.price_min, Some(50.0));
        assert_eq!(snapshot.filters.price_max, Some(300.0));
        assert_eq!(snapshot.filters.superhost, Superhost::Yes);
        assert_eq!(base_ids(&snapshot), vec!["1", "2", "3", "6"]);

        // First room type and neighborhood: Entire home/apt in Ballard -> listing 1
        let filtered = snapshot.filtered.ready().unwrap();
        assert_eq!(filtered.room_type, "Entire home/apt");
        assert_eq!(filtered.neighborhood, "Ballard");
        assert_eq!(filtered.listing_options, vec!["1"]);
        assert_eq!(snapshot.filters.listing_id.as_deref(), Some("1"));
        assert_eq!(snapshot.selection.ready().unwrap().listing.id, "1");
    }

    #[test]
    fn test_base_products() {
        let session = DashboardSession::new(sample_table());
        let snapshot = session.snapshot();
        let base = snapshot.base.ready().unwrap();

        assert_eq!(base.room_type_options, vec!["Entire home/apt", "Private room"]);
        assert_eq!(base.neighborhood_options, vec!["Ballard", "Fremont"]);
        assert_eq!(base.neighborhood_summary[0].neighborhood, "Fremont");
        assert_eq!(base.room_type_prices.len(), 2);
    }

    #[test]
    fn test_empty_stage1_marks_later_stages_unavailable() {
        let mut session = DashboardSession::new(sample_table());
        session.set_price_range(250.0, 100.0);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.base.ready().map(|b| b.view.len()), None);
        assert!(matches!(snapshot.base, StageOutput::NoResults));
        assert!(matches!(snapshot.filtered, StageOutput::Unavailable));
        assert!(matches!(snapshot.selection, StageOutput::Unavailable));
    }

    #[test]
    fn test_stage2_no_results() {
        let mut session = DashboardSession::new(sample_table());
        session.select_room_type("Entire home/apt");
        session.select_neighborhood("Capitol Hill");

        let snapshot = session.snapshot();
        assert!(snapshot.base.is_ready());
        assert!(matches!(snapshot.filtered, StageOutput::NoResults));
        assert!(matches!(snapshot.selection, StageOutput::Unavailable));
    }

    #[test]
    fn test_explicit_selection() {
        let mut session = DashboardSession::new(sample_table());
        session.select_room_type("Private room");
        session.select_neighborhood("Fremont");
        session.select_listing("6");

        let snapshot = session.snapshot();
        let selection = snapshot.selection.ready().unwrap();
        assert_eq!(selection.listing.id, "6");
        assert_eq!(selection.review_breakdown.entries().len(), 6);
    }

    #[test]
    fn test_stale_listing_selection_is_not_found() {
        let mut session = DashboardSession::new(sample_table());
        session.select_room_type("Private room");
        session.select_neighborhood("Ballard");
        session.select_listing("3");
        assert!(session.snapshot().selection.is_ready());

        // Listing 3 costs 50; raising the floor drops it from every view.
        // Listing 1 (Entire home/apt) keeps Ballard offered, so stage 2 still
        // runs and comes back empty.
        session.set_price_range(60.0, 300.0);
        let snapshot = session.snapshot();
        assert!(snapshot.base.is_ready());
        assert!(matches!(snapshot.filtered, StageOutput::NoResults));

        session.select_room_type("Entire home/apt");
        let snapshot = session.snapshot();
        assert!(snapshot.filtered.is_ready());
        assert!(matches!(snapshot.selection, StageOutput::NoResults));
        assert_eq!(snapshot.filters.listing_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_superhost_switch() {
        let mut session = DashboardSession::new(sample_table());
        session.set_superhost(Superhost::No);
        assert_eq!(base_ids(&session.snapshot()), vec!["4", "5"]);

        session.reset();
        assert_eq!(session.state(), &FilterState::default());
        assert_eq!(base_ids(&session.snapshot()), vec!["1", "2", "3", "6"]);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let table = sample_table();
        let mut a = DashboardSession::new(table.clone());
        let b = DashboardSession::new(table.clone());

        a.set_superhost(Superhost::No);
        assert_eq!(base_ids(&a.snapshot()), vec!["4", "5"]);
        assert_eq!(base_ids(&b.snapshot()), vec!["1", "2", "3", "6"]);
        assert!(Arc::ptr_eq(a.table(), b.table()));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut session = DashboardSession::new(sample_table());
        session.set_price_range(250.0, 100.0);
        let json = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(json["base"]["status"], "no_results");
        assert_eq!(json["filtered"]["status"], "unavailable");
        assert_eq!(json["price_bounds"]["max"], 300.0);

        let session = DashboardSession::new(sample_table());
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["base"]["status"], "ready");
        assert_eq!(json["base"]["data"]["view"].as_array().unwrap().len(), 4);
        assert_eq!(json["selection"]["data"]["listing"]["id"], "1");
    }

    #[test]
    fn test_filter_state_from_query_json() {
        let state: FilterState =
            serde_json::from_str(r#"{"superhost":"No","room_type":"Private room"}"#).unwrap();
        assert_eq!(state.superhost, Superhost::No);
        assert_eq!(state.room_type.as_deref(), Some("Private room"));
        assert_eq!(state.price_min, None);
    }
}
