//! Listing record types.
//!
//! A [`Listing`] is one cleaned row of the source dataset. Every field the
//! pipeline depends on is present and typed; values that may legitimately be
//! absent (host name, acceptance rate) are `Option`s.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host status flag, surfaced to users as `Yes` / `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Superhost {
    #[default]
    Yes,
    No,
}

impl Superhost {
    /// Decode the source's `t` / `f` flag. Any other code is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "t" => Some(Superhost::Yes),
            "f" => Some(Superhost::No),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Superhost::Yes => "Yes",
            Superhost::No => "No",
        }
    }
}

impl fmt::Display for Superhost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A percentage such as a host response rate (`93%` is stored as `93.0`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(pub f64);

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The six review categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewCategory {
    Rating,
    Accuracy,
    Cleanliness,
    CheckIn,
    Communication,
    Location,
}

impl ReviewCategory {
    /// Fixed display order. Breakdown charts rely on this ordering.
    pub const ALL: [ReviewCategory; 6] = [
        ReviewCategory::Rating,
        ReviewCategory::Accuracy,
        ReviewCategory::Cleanliness,
        ReviewCategory::CheckIn,
        ReviewCategory::Communication,
        ReviewCategory::Location,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewCategory::Rating => "Rating",
            ReviewCategory::Accuracy => "Accuracy",
            ReviewCategory::Cleanliness => "Cleanliness",
            ReviewCategory::CheckIn => "Check-in",
            ReviewCategory::Communication => "Communication",
            ReviewCategory::Location => "Location",
        }
    }

    /// Source column holding this category's score.
    pub fn column(&self) -> &'static str {
        match self {
            ReviewCategory::Rating => "review_scores_rating",
            ReviewCategory::Accuracy => "review_scores_accuracy",
            ReviewCategory::Cleanliness => "review_scores_cleanliness",
            ReviewCategory::CheckIn => "review_scores_checkin",
            ReviewCategory::Communication => "review_scores_communication",
            ReviewCategory::Location => "review_scores_location",
        }
    }
}

impl fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// All six review sub-scores of a listing.
///
/// Only complete score sets exist after cleaning, so the average is always
/// defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewScores {
    pub rating: f64,
    pub accuracy: f64,
    pub cleanliness: f64,
    pub checkin: f64,
    pub communication: f64,
    pub location: f64,
}

impl ReviewScores {
    /// Build from scores given in [`ReviewCategory::ALL`] order.
    pub fn from_ordered(scores: [f64; 6]) -> Self {
        let [rating, accuracy, cleanliness, checkin, communication, location] = scores;
        ReviewScores {
            rating,
            accuracy,
            cleanliness,
            checkin,
            communication,
            location,
        }
    }

    pub fn get(&self, category: ReviewCategory) -> f64 {
        match category {
            ReviewCategory::Rating => self.rating,
            ReviewCategory::Accuracy => self.accuracy,
            ReviewCategory::Cleanliness => self.cleanliness,
            ReviewCategory::CheckIn => self.checkin,
            ReviewCategory::Communication => self.communication,
            ReviewCategory::Location => self.location,
        }
    }

    /// Arithmetic mean of the six sub-scores.
    pub fn average(&self) -> f64 {
        let sum: f64 = ReviewCategory::ALL.iter().map(|c| self.get(*c)).sum();
        sum / ReviewCategory::ALL.len() as f64
    }
}

/// One cleaned listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub price: f64,
    pub room_type: String,
    pub neighborhood: String,
    pub superhost: Superhost,
    pub review_scores: ReviewScores,
    /// Mean of `review_scores`, computed once at load time.
    pub average_review_score: f64,
    pub picture_url: String,
    pub host_url: String,
    pub host_response_rate: Rate,
    pub host_name: Option<String>,
    pub host_acceptance_rate: Option<Rate>,
}
