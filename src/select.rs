//! Stage 3: single-listing selection and its per-record products.

use crate::filter::Predicate;
use crate::listing::{Listing, ReviewCategory};
use crate::view::ListingView;
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// One bar of the review breakdown chart.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReviewEntry {
    pub category: &'static str,
    pub score: f64,
}

/// Six review entries in [`ReviewCategory::ALL`] order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ReviewBreakdown(pub Vec<ReviewEntry>);

impl ReviewBreakdown {
    pub fn for_listing(listing: &Listing) -> Self {
        ReviewBreakdown(
            ReviewCategory::ALL
                .iter()
                .map(|category| ReviewEntry {
                    category: category.label(),
                    score: listing.review_scores.get(*category),
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[ReviewEntry] {
        &self.0
    }
}

/// A host detail that is either known or shown as "Not Available".
#[derive(Debug, Clone, PartialEq)]
pub enum HostField {
    Available(String),
    NotAvailable,
}

impl HostField {
    pub const NOT_AVAILABLE: &'static str = "Not Available";

    fn from_option<T: ToString>(value: Option<T>) -> Self {
        match value {
            Some(v) => HostField::Available(v.to_string()),
            None => HostField::NotAvailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, HostField::Available(_))
    }
}

impl fmt::Display for HostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostField::Available(value) => f.write_str(value),
            HostField::NotAvailable => f.write_str(Self::NOT_AVAILABLE),
        }
    }
}

impl Serialize for HostField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Host details of the selected listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HostInfo {
    pub host_name: HostField,
    pub host_response_rate: HostField,
    pub host_acceptance_rate: HostField,
}

impl HostInfo {
    pub fn for_listing(listing: &Listing) -> Self {
        HostInfo {
            host_name: HostField::from_option(listing.host_name.as_deref().filter(|n| !n.is_empty())),
            host_response_rate: HostField::from_option(Some(listing.host_response_rate)),
            host_acceptance_rate: HostField::from_option(listing.host_acceptance_rate),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, &HostField); 3] {
        [
            ("Host Name", &self.host_name),
            ("Host Response Rate", &self.host_response_rate),
            ("Host Acceptance Rate", &self.host_acceptance_rate),
        ]
    }
}

/// Everything shown for the selected listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Selection {
    pub listing: Listing,
    pub review_breakdown: ReviewBreakdown,
    pub host_info: HostInfo,
}

/// Look up `identifier` in `filtered_view`.
///
/// `None` means there is no current selection, for example when the
/// identifier was chosen before an upstream filter removed it.
pub fn select_record(filtered_view: &ListingView, identifier: &str) -> Option<Selection> {
    let predicate = Predicate::IdIs(identifier.to_string());
    let listing = filtered_view.iter().find(|l| predicate.matches(l))?;
    log::trace!("{}: selected {}", filtered_view.name(), predicate);
    Some(Selection {
        review_breakdown: ReviewBreakdown::for_listing(listing),
        host_info: HostInfo::for_listing(listing),
        listing: listing.clone(),
    })
}
