use proptest::prelude::*;
use soldera_core::models::{AuctionRecord, Technology};

/// Strategy for known technologies plus the occasional unexpected one
pub fn technology_strategy() -> impl Strategy<Value = Technology> {
    prop_oneof![
        4 => Just(Technology::WindOnshore),
        4 => Just(Technology::Hydro),
        4 => Just(Technology::Solar),
        4 => Just(Technology::Thermal),
        1 => "[a-z]{3,8}_[a-z]{3,8}".prop_map(Technology::from),
    ]
}

/// Strategy for region names drawn from a small pool so regions repeat
pub fn region_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Auvergne-Rhône-Alpes".to_string()),
        Just("Bretagne".to_string()),
        Just("Grand Est".to_string()),
        Just("Occitanie".to_string()),
        Just("Normandie".to_string()),
    ]
}

/// Strategy for well-formed records; volumes are at least 1 MWh
pub fn record_strategy() -> impl Strategy<Value = AuctionRecord> {
    (
        region_strategy(),
        technology_strategy(),
        1.0f64..50_000.0,
        1.0f64..50_000.0,
        0.01f64..20.0,
        0i64..200,
    )
        .prop_map(
            |(region, technology, volume_auctioned, volume_sold, average_price, number_of_winners)| {
                AuctionRecord {
                    region,
                    technology,
                    volume_auctioned,
                    volume_sold,
                    average_price,
                    number_of_winners,
                }
            },
        )
}

/// Strategy for a batch's record list
pub fn records_strategy() -> impl Strategy<Value = Vec<AuctionRecord>> {
    prop::collection::vec(record_strategy(), 0..60)
}
