//! Listing views and the two filter stages.
//!
//! A [`ListingView`] is a read-only subset of the shared [`ListingTable`],
//! stored as a mapping from view positions to table row indices in table
//! order. Views are never updated in place: narrowing a view builds a new one.

use crate::filter::Predicate;
use crate::listing::{Listing, Superhost};
use crate::table::ListingTable;
use serde::ser::{Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// A filtered subset of listings.
#[derive(Debug, Clone)]
pub struct ListingView {
    name: String,
    parent: Arc<ListingTable>,
    view_to_parent: Vec<usize>,
}

impl ListingView {
    /// A view over every listing in the table.
    pub fn all(name: String, parent: Arc<ListingTable>) -> Self {
        let view_to_parent = (0..parent.len()).collect();
        ListingView {
            name,
            parent,
            view_to_parent,
        }
    }

    /// Build a new view holding the rows of `self` that match `predicate`.
    pub fn filter(&self, name: String, predicate: &Predicate) -> ListingView {
        let view_to_parent = self
            .view_to_parent
            .iter()
            .copied()
            .filter(|&i| {
                self.parent
                    .get(i)
                    .map(|listing| predicate.matches(listing))
                    .unwrap_or(false)
            })
            .collect();

        ListingView {
            name,
            parent: Arc::clone(&self.parent),
            view_to_parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.view_to_parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_parent.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Listing> {
        let parent_index = *self.view_to_parent.get(index)?;
        self.parent.get(parent_index)
    }

    /// Returns the parent table row index for a given view position
    pub fn get_parent_index(&self, view_index: usize) -> Option<usize> {
        self.view_to_parent.get(view_index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listing> + '_ {
        self.view_to_parent
            .iter()
            .filter_map(move |&i| self.parent.get(i))
    }

    /// Distinct room types present in the view, ascending.
    pub fn room_type_options(&self) -> Vec<String> {
        distinct_sorted(self.iter().map(|l| l.room_type.as_str()))
    }

    /// Distinct neighborhoods present in the view, ascending.
    pub fn neighborhood_options(&self) -> Vec<String> {
        distinct_sorted(self.iter().map(|l| l.neighborhood.as_str()))
    }

    /// Distinct listing identifiers, in view order.
    pub fn listing_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.iter()
            .filter(|l| seen.insert(l.id.as_str()))
            .map(|l| l.id.clone())
            .collect()
    }
}

impl Serialize for ListingView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Stage 1: listings priced within `[price_min, price_max]` whose host status
/// equals `superhost`.
///
/// Out-of-order or out-of-range bounds are not an error; they produce an
/// empty view.
pub fn apply_stage1(
    table: &Arc<ListingTable>,
    price_min: f64,
    price_max: f64,
    superhost: Superhost,
) -> ListingView {
    let predicate = Predicate::price_and_superhost(price_min, price_max, superhost);
    let view = ListingView::all("listings".to_string(), Arc::clone(table))
        .filter("base_view".to_string(), &predicate);
    log::trace!("stage 1 [{}] kept {} of {}", predicate, view.len(), table.len());
    view
}

/// Stage 2: listings of `base_view` with exactly this room type and
/// neighborhood.
pub fn apply_stage2(base_view: &ListingView, room_type: &str, neighborhood: &str) -> ListingView {
    let predicate = Predicate::room_and_neighborhood(room_type, neighborhood);
    let view = base_view.filter("filtered_view".to_string(), &predicate);
    log::trace!("stage 2 [{}] kept {} of {}", predicate, view.len(), base_view.len());
    view
}
