//! # Aggregation Engine
//!
//! Pure folds from a batch's auction records into the two summary tables shown to
//! users: totals per technology (with a volume-weighted running average price)
//! and volumes/prices per region.
//!
//! Nothing here holds state between calls and inputs are only borrowed, so
//! running the same fold twice over the same records yields identical output.

pub mod region;
pub mod technology;

pub use region::{aggregate_by_region, RegionSummary};
pub use technology::{aggregate_by_technology, TechnologySummary};

use crate::error::SolderaError;
use crate::models::{AuctionRecord, AuctionResultSet};
use serde::{Deserialize, Serialize};

/// Both summary tables for one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub date: String,
    pub number_of_participants: i64,
    pub record_count: usize,
    pub by_technology: Vec<TechnologySummary>,
    pub by_region: Vec<RegionSummary>,
}

/// Aggregate one batch into both summary tables
pub fn summarize(batch: &AuctionResultSet) -> BatchSummary {
    BatchSummary {
        date: batch.date.clone(),
        number_of_participants: batch.number_of_participants,
        record_count: batch.records.len(),
        by_technology: aggregate_by_technology(&batch.records),
        by_region: aggregate_by_region(&batch.records),
    }
}

/// Records outside the expected value domain
///
/// Aggregation still folds them as-is; this only reports them.
pub fn invalid_records(records: &[AuctionRecord]) -> Vec<SolderaError> {
    records
        .iter()
        .filter_map(|record| record.validate().err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Technology;

    fn batch() -> AuctionResultSet {
        AuctionResultSet {
            date: "2024-03-01".to_string(),
            number_of_participants: 7,
            content_hash: "f00".to_string(),
            records: vec![
                AuctionRecord {
                    region: "Normandie".to_string(),
                    technology: Technology::WindOnshore,
                    volume_auctioned: 50.0,
                    volume_sold: 45.0,
                    average_price: 0.72,
                    number_of_winners: 3,
                },
                AuctionRecord {
                    region: "Occitanie".to_string(),
                    technology: Technology::Solar,
                    volume_auctioned: -5.0,
                    volume_sold: 10.0,
                    average_price: 0.55,
                    number_of_winners: 1,
                },
            ],
        }
    }

    #[test]
    fn test_summarize_bundles_both_tables() {
        let summary = summarize(&batch());
        assert_eq!(summary.date, "2024-03-01");
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.by_technology.len(), 2);
        assert_eq!(summary.by_region.len(), 2);
    }

    #[test]
    fn test_invalid_records_are_reported_not_dropped() {
        let batch = batch();
        let problems = invalid_records(&batch.records);
        assert_eq!(problems.len(), 1);

        let summary = summarize(&batch);
        let solar = summary
            .by_technology
            .iter()
            .find(|s| s.technology == Technology::Solar)
            .unwrap();
        assert_eq!(solar.volume_auctioned, -5.0);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let batch = batch();
        let before = batch.clone();
        assert_eq!(summarize(&batch), summarize(&batch));
        assert_eq!(batch, before);
    }
}
