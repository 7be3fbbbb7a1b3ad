use crate::models::{AuctionRecord, Technology};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Totals for one technology across a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologySummary {
    pub technology: Technology,
    pub volume_auctioned: f64,
    pub volume_sold: f64,
    pub total_winners: i64,
    /// Running mean of `average_price` weighted by `volume_auctioned`, unrounded
    pub weighted_average_price: f64,
}

impl TechnologySummary {
    fn seed(record: &AuctionRecord) -> Self {
        Self {
            technology: record.technology.clone(),
            volume_auctioned: record.volume_auctioned,
            volume_sold: record.volume_sold,
            total_winners: record.number_of_winners,
            weighted_average_price: record.average_price,
        }
    }

    fn absorb(&mut self, record: &AuctionRecord) {
        let weight_before = self.volume_auctioned;
        let combined = weight_before + record.volume_auctioned;
        // A zero total weight has no mean; keep the running price
        if combined != 0.0 {
            self.weighted_average_price = (self.weighted_average_price * weight_before
                + record.average_price * record.volume_auctioned)
                / combined;
        }
        self.volume_auctioned = combined;
        self.volume_sold += record.volume_sold;
        self.total_winners += record.number_of_winners;
    }

    /// Price rounded to three decimals for display
    pub fn display_average_price(&self) -> f64 {
        round_to_millis(self.weighted_average_price)
    }
}

/// Round the exact binary value to three decimals, as fixed-point formatting does
fn round_to_millis(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

/// Group records by technology, in order of first appearance
pub fn aggregate_by_technology(records: &[AuctionRecord]) -> Vec<TechnologySummary> {
    let mut summaries: Vec<TechnologySummary> = Vec::new();
    let mut index: HashMap<&Technology, usize> = HashMap::new();

    for record in records {
        match index.get(&record.technology) {
            Some(&slot) => summaries[slot].absorb(record),
            None => {
                index.insert(&record.technology, summaries.len());
                summaries.push(TechnologySummary::seed(record));
            }
        }
    }

    summaries
}
