use crate::models::{AuctionRecord, Technology};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-region view of a batch
///
/// The per-technology fields hold the values of the last record seen for that
/// technology in the region; `total_volume_sold` sums every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region: String,
    pub volume_sold_by_technology: BTreeMap<Technology, f64>,
    pub average_price_by_technology: BTreeMap<Technology, f64>,
    pub total_volume_sold: f64,
}

impl RegionSummary {
    fn new(region: &str) -> Self {
        let zeroed = || {
            Technology::KNOWN
                .iter()
                .cloned()
                .map(|technology| (technology, 0.0))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            region: region.to_string(),
            volume_sold_by_technology: zeroed(),
            average_price_by_technology: zeroed(),
            total_volume_sold: 0.0,
        }
    }

    fn absorb(&mut self, record: &AuctionRecord) {
        if record.technology.is_known() {
            self.volume_sold_by_technology
                .insert(record.technology.clone(), record.volume_sold);
            self.average_price_by_technology
                .insert(record.technology.clone(), record.average_price);
        }
        self.total_volume_sold += record.volume_sold;
    }

    pub fn volume_sold(&self, technology: &Technology) -> f64 {
        self.volume_sold_by_technology
            .get(technology)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn average_price(&self, technology: &Technology) -> f64 {
        self.average_price_by_technology
            .get(technology)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Group records by region, in order of first appearance
pub fn aggregate_by_region(records: &[AuctionRecord]) -> Vec<RegionSummary> {
    let mut summaries: Vec<RegionSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.region.as_str()).or_insert_with(|| {
            summaries.push(RegionSummary::new(&record.region));
            summaries.len() - 1
        });
        summaries[slot].absorb(record);
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, technology: Technology, sold: f64, price: f64) -> AuctionRecord {
        AuctionRecord {
            region: region.to_string(),
            technology,
            volume_auctioned: sold * 2.0,
            volume_sold: sold,
            average_price: price,
            number_of_winners: 1,
        }
    }

    #[test]
    fn test_empty_input_yields_no_regions() {
        assert!(aggregate_by_region(&[]).is_empty());
    }

    #[test]
    fn test_duplicate_pair_is_last_write_wins() {
        // Duplicate (region, technology) pairs overwrite per-technology fields
        // while the region total keeps accumulating.
        let summaries = aggregate_by_region(&[
            record("Normandie", Technology::Solar, 100.0, 0.5),
            record("Normandie", Technology::Solar, 40.0, 0.9),
        ]);

        assert_eq!(summaries.len(), 1);
        let normandie = &summaries[0];
        assert_eq!(normandie.average_price(&Technology::Solar), 0.9);
        assert_eq!(normandie.volume_sold(&Technology::Solar), 40.0);
        assert_eq!(normandie.total_volume_sold, 140.0);
    }

    #[test]
    fn test_absent_technologies_default_to_zero() {
        let summaries = aggregate_by_region(&[record("Corse", Technology::Hydro, 10.0, 1.2)]);
        let corse = &summaries[0];

        assert_eq!(corse.volume_sold(&Technology::Hydro), 10.0);
        assert_eq!(corse.volume_sold(&Technology::Thermal), 0.0);
        assert_eq!(corse.average_price(&Technology::WindOnshore), 0.0);
        assert_eq!(corse.volume_sold_by_technology.len(), 4);
    }

    #[test]
    fn test_unknown_technology_only_counts_toward_total() {
        let biomass = Technology::Other("biomass".to_string());
        let summaries = aggregate_by_region(&[
            record("Bretagne", Technology::WindOnshore, 5.0, 0.3),
            record("Bretagne", biomass.clone(), 7.0, 0.8),
        ]);
        let bretagne = &summaries[0];

        assert_eq!(bretagne.total_volume_sold, 12.0);
        assert!(!bretagne.volume_sold_by_technology.contains_key(&biomass));
        assert_eq!(bretagne.average_price(&biomass), 0.0);
        assert_eq!(bretagne.volume_sold(&Technology::WindOnshore), 5.0);
    }

    #[test]
    fn test_regions_keep_first_appearance_order() {
        let summaries = aggregate_by_region(&[
            record("Occitanie", Technology::Solar, 1.0, 1.0),
            record("Alsace", Technology::Solar, 1.0, 1.0),
            record("Occitanie", Technology::Hydro, 1.0, 1.0),
        ]);
        let regions: Vec<&str> = summaries.iter().map(|s| s.region.as_str()).collect();
        assert_eq!(regions, vec!["Occitanie", "Alsace"]);
    }
}
