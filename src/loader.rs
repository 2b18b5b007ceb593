//! Loading and cleaning the raw listing source.
//!
//! The source is a CSV export with a header row. Each row is deserialized
//! loosely (every cell as optional text) and then cleaned into a typed
//! [`Listing`]. Rows that cannot be cleaned are dropped and counted by
//! [`ExclusionReason`]; only I/O failures and an empty or unusable source are
//! errors.

use crate::error::{LoadError, Result};
use crate::listing::{Listing, Rate, ReviewCategory, ReviewScores, Superhost};
use crate::table::{ListingTable, Schema};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Cell spellings treated as missing values.
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "#N/A", "#N/A N/A", "#NA", "<NA>", "NaN", "-NaN", "nan", "-nan",
    "null", "NULL", "None",
];

/// Why a source row was left out of the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    Malformed,
    MissingId,
    DuplicateId,
    InvalidPrice,
    MissingRoomType,
    MissingNeighborhood,
    InvalidSuperhost,
    MissingReviewScore,
    MissingPictureUrl,
    MissingHostUrl,
    MissingResponseRate,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExclusionReason::Malformed => "malformed row",
            ExclusionReason::MissingId => "missing id",
            ExclusionReason::DuplicateId => "duplicate id",
            ExclusionReason::InvalidPrice => "missing or invalid price",
            ExclusionReason::MissingRoomType => "missing room type",
            ExclusionReason::MissingNeighborhood => "missing neighborhood",
            ExclusionReason::InvalidSuperhost => "missing or unrecognized superhost flag",
            ExclusionReason::MissingReviewScore => "missing review sub-score",
            ExclusionReason::MissingPictureUrl => "missing picture url",
            ExclusionReason::MissingHostUrl => "missing host url",
            ExclusionReason::MissingResponseRate => "missing or invalid host response rate",
        };
        f.write_str(text)
    }
}

/// Summary of one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub source: String,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub exclusions: BTreeMap<ExclusionReason, usize>,
}

impl LoadReport {
    pub fn rows_excluded(&self) -> usize {
        self.exclusions.values().sum()
    }

    pub fn excluded(&self, reason: ExclusionReason) -> usize {
        self.exclusions.get(&reason).copied().unwrap_or(0)
    }

    fn exclude(&mut self, reason: ExclusionReason) {
        *self.exclusions.entry(reason).or_insert(0) += 1;
    }
}

/// A cleaned table together with the report of how it was built.
#[derive(Debug)]
pub struct LoadedListings {
    pub table: ListingTable,
    pub report: LoadReport,
}

/// One source row before cleaning.
#[derive(Debug, Deserialize)]
struct RawListing {
    id: Option<String>,
    price: Option<String>,
    room_type: Option<String>,
    #[serde(rename = "neighbourhood_cleansed")]
    neighborhood: Option<String>,
    host_is_superhost: Option<String>,
    review_scores_rating: Option<String>,
    review_scores_accuracy: Option<String>,
    review_scores_cleanliness: Option<String>,
    review_scores_checkin: Option<String>,
    review_scores_communication: Option<String>,
    review_scores_location: Option<String>,
    picture_url: Option<String>,
    host_url: Option<String>,
    host_response_rate: Option<String>,
    #[serde(default)]
    host_name: Option<String>,
    #[serde(default)]
    host_acceptance_rate: Option<String>,
}

/// Load and clean listings from a CSV file.
pub fn load_listings<P: AsRef<Path>>(path: P) -> Result<LoadedListings> {
    let path = path.as_ref();
    let file = File::open(path)?;
    load_listings_from_reader(&path.display().to_string(), file)
}

/// Load and clean listings from any CSV byte stream.
pub fn load_listings_from_reader<R: Read>(source: &str, reader: R) -> Result<LoadedListings> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(LoadError::Empty);
    }
    Schema::listings().validate_header(&headers)?;

    let mut report = LoadReport {
        source: source.to_string(),
        ..LoadReport::default()
    };
    let mut listings = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut record = csv::StringRecord::new();

    loop {
        match rdr.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                report.rows_read += 1;
                log::debug!("{}: excluding unreadable row: {}", source, e);
                report.exclude(ExclusionReason::Malformed);
                continue;
            }
        }
        report.rows_read += 1;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let cleaned = record
            .deserialize::<RawListing>(Some(&headers))
            .map_err(|e| {
                log::debug!("{}: line {}: {}", source, line, e);
                ExclusionReason::Malformed
            })
            .and_then(clean_listing)
            .and_then(|listing| {
                if seen_ids.insert(listing.id.clone()) {
                    Ok(listing)
                } else {
                    Err(ExclusionReason::DuplicateId)
                }
            });

        match cleaned {
            Ok(listing) => listings.push(listing),
            Err(reason) => {
                log::debug!("{}: line {}: excluded ({})", source, line, reason);
                report.exclude(reason);
            }
        }
    }

    if report.rows_read == 0 {
        return Err(LoadError::Empty);
    }
    if listings.is_empty() {
        return Err(LoadError::NoUsableRecords {
            rows_read: report.rows_read,
        });
    }

    report.rows_kept = listings.len();
    log::info!(
        "{}: kept {} of {} listings ({} excluded)",
        source,
        report.rows_kept,
        report.rows_read,
        report.rows_excluded()
    );
    for (reason, count) in &report.exclusions {
        log::info!("{}: {} rows excluded: {}", source, count, reason);
    }

    let table = ListingTable::new(source.to_string(), listings)?;
    Ok(LoadedListings { table, report })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !MISSING_MARKERS.contains(&v.trim()))
}

/// Parse a price such as `$1,250.00` into a non-negative number.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',') && !c.is_whitespace())
        .collect();
    let price: f64 = cleaned.parse().ok()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Parse a percentage such as `93%` (or a bare `93`) in `0..=100`.
pub fn parse_rate(raw: &str) -> Option<Rate> {
    let value: f64 = raw.trim().trim_end_matches('%').trim().parse().ok()?;
    (0.0..=100.0).contains(&value).then_some(Rate(value))
}

// Non-negative only; the upper end depends on the export's rating scale.
fn parse_score(raw: Option<String>) -> Option<f64> {
    let value: f64 = present(raw)?.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn clean_listing(raw: RawListing) -> std::result::Result<Listing, ExclusionReason> {
    let id = present(raw.id).ok_or(ExclusionReason::MissingId)?;
    let price = present(raw.price)
        .as_deref()
        .and_then(parse_price)
        .ok_or(ExclusionReason::InvalidPrice)?;
    let room_type = present(raw.room_type).ok_or(ExclusionReason::MissingRoomType)?;
    let neighborhood = present(raw.neighborhood).ok_or(ExclusionReason::MissingNeighborhood)?;
    let superhost = present(raw.host_is_superhost)
        .as_deref()
        .and_then(Superhost::from_code)
        .ok_or(ExclusionReason::InvalidSuperhost)?;

    let raw_scores = [
        raw.review_scores_rating,
        raw.review_scores_accuracy,
        raw.review_scores_cleanliness,
        raw.review_scores_checkin,
        raw.review_scores_communication,
        raw.review_scores_location,
    ];
    debug_assert_eq!(raw_scores.len(), ReviewCategory::ALL.len());
    let mut scores = [0.0; 6];
    for (slot, raw_score) in scores.iter_mut().zip(raw_scores) {
        *slot = parse_score(raw_score).ok_or(ExclusionReason::MissingReviewScore)?;
    }
    let review_scores = ReviewScores::from_ordered(scores);

    let picture_url = present(raw.picture_url).ok_or(ExclusionReason::MissingPictureUrl)?;
    let host_url = present(raw.host_url).ok_or(ExclusionReason::MissingHostUrl)?;
    let host_response_rate = present(raw.host_response_rate)
        .as_deref()
        .and_then(parse_rate)
        .ok_or(ExclusionReason::MissingResponseRate)?;

    Ok(Listing {
        id,
        price,
        room_type,
        neighborhood,
        superhost,
        average_review_score: review_scores.average(),
        review_scores,
        picture_url,
        host_url,
        host_response_rate,
        host_name: present(raw.host_name),
        host_acceptance_rate: present(raw.host_acceptance_rate).as_deref().and_then(parse_rate),
    })
}
