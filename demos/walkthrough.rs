/// Pipeline Walkthrough
///
/// This example demonstrates:
/// - Loading and cleaning a listings CSV
/// - Stage 1: price range and superhost filter
/// - Average price per neighborhood
/// - Stage 2: room type and neighborhood filter
/// - Stage 3: one listing's review breakdown and host info
///
/// Run with: cargo run --example walkthrough -- path/to/listings.csv

use listingview::*;
use std::sync::Arc;

fn main() {
    println!("=== ListingView Walkthrough ===\n");

    let path = std::env::args().nth(1).unwrap_or_else(|| "listings.csv".to_string());

    // 1. Load
    println!("1. Loading {}...", path);
    let loaded = match load_listings(&path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("   Cannot load listings: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "   Kept {} of {} rows",
        loaded.report.rows_kept, loaded.report.rows_read
    );
    for (reason, count) in &loaded.report.exclusions {
        println!("   - {} excluded: {}", count, reason);
    }
    let table = Arc::new(loaded.table);
    let bounds = table.price_bounds();
    println!("   Price range: {} - {}\n", bounds.min, bounds.max);

    // 2. Stage 1
    println!("2. Superhost listings across the full price range...");
    let base = apply_stage1(&table, bounds.min, bounds.max, Superhost::Yes);
    if base.is_empty() {
        println!("   No listings match your price and superhost filter.");
        return;
    }
    println!("   {} listings\n", base.len());

    // 3. Aggregates
    println!("3. Average price by neighborhood (top 5)...");
    for row in summarize_by_neighborhood(&base).iter().take(5) {
        println!(
            "   {:<30} {:>10.2}  ({} listings)",
            row.neighborhood, row.mean_price, row.listing_count
        );
    }
    println!();

    // 4. Stage 2, using the first offered options
    let room_type = base.room_type_options().remove(0);
    let neighborhood = base.neighborhood_options().remove(0);
    println!("4. {} in {}...", room_type, neighborhood);
    let filtered = apply_stage2(&base, &room_type, &neighborhood);
    if filtered.is_empty() {
        println!("   No listings match your selected room type and neighborhood.");
        return;
    }
    for listing in filtered.iter() {
        println!(
            "   {:<12} price {:>8.2}  avg review {:.2}",
            listing.id, listing.price, listing.average_review_score
        );
    }
    println!();

    // 5. Stage 3
    let ids = filtered.listing_ids();
    println!("5. Review breakdown for listing {}...", ids[0]);
    if let Some(selection) = select_record(&filtered, &ids[0]) {
        for entry in selection.review_breakdown.entries() {
            println!("   {:<14} {:.2}", entry.category, entry.score);
        }
        for (label, value) in selection.host_info.fields() {
            println!("   {}: {}", label, value);
        }
    }

    println!("\n=== Walkthrough Complete ===");
}
