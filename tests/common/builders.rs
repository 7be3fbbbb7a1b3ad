//! Builders for auction records and batches

use soldera_core::models::{AuctionRecord, AuctionResultSet, Technology};

pub fn record(
    region: &str,
    technology: Technology,
    volume_auctioned: f64,
    volume_sold: f64,
    average_price: f64,
    number_of_winners: i64,
) -> AuctionRecord {
    AuctionRecord {
        region: region.to_string(),
        technology,
        volume_auctioned,
        volume_sold,
        average_price,
        number_of_winners,
    }
}

pub fn batch(date: &str, records: Vec<AuctionRecord>) -> AuctionResultSet {
    AuctionResultSet {
        date: date.to_string(),
        number_of_participants: 10,
        content_hash: format!("hash-{date}-{}", records.len()),
        records,
    }
}

/// A batch with `count` solar records spread over distinct regions
pub fn batch_with(date: &str, count: usize) -> AuctionResultSet {
    let records = (0..count)
        .map(|i| {
            record(
                &format!("Region {i}"),
                Technology::Solar,
                100.0,
                80.0,
                0.5 + i as f64 * 0.1,
                2,
            )
        })
        .collect();
    batch(date, records)
}
