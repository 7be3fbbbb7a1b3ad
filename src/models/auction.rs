use crate::error::{SolderaError, SolderaResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy technology of an auctioned lot
///
/// Values the backend may add later decode into `Other` so a batch never fails
/// to load because of a new technology.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Technology {
    WindOnshore,
    Hydro,
    Solar,
    Thermal,
    Other(String),
}

impl Technology {
    /// Technologies that have dedicated per-region fields
    pub const KNOWN: [Technology; 4] = [
        Technology::WindOnshore,
        Technology::Hydro,
        Technology::Solar,
        Technology::Thermal,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::WindOnshore => "wind_energy_onshore",
            Self::Hydro => "hydro",
            Self::Solar => "solar",
            Self::Thermal => "thermal",
            Self::Other(raw) => raw,
        }
    }

    /// Human-facing label
    pub fn label(&self) -> &str {
        match self {
            Self::WindOnshore => "Wind Energy Onshore",
            Self::Hydro => "Hydro",
            Self::Solar => "Solar",
            Self::Thermal => "Thermal",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Technology {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "wind_energy_onshore" => Self::WindOnshore,
            "hydro" => Self::Hydro,
            "solar" => Self::Solar,
            "thermal" => Self::Thermal,
            _ => Self::Other(raw),
        }
    }
}

impl From<Technology> for String {
    fn from(technology: Technology) -> Self {
        technology.as_str().to_string()
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One auctioned lot: a (region, technology) pair with its outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionRecord {
    pub region: String,
    pub technology: Technology,
    pub volume_auctioned: f64,
    pub volume_sold: f64,
    pub average_price: f64,
    pub number_of_winners: i64,
}

impl AuctionRecord {
    /// Check the record against the expected value domain
    ///
    /// Aggregation never calls this; invalid records flow through the arithmetic
    /// unchanged and callers decide whether to report them.
    pub fn validate(&self) -> SolderaResult<()> {
        let mut problems = Vec::new();
        if self.volume_auctioned < 0.0 {
            problems.push(format!("volume_auctioned={}", self.volume_auctioned));
        }
        if self.volume_sold < 0.0 {
            problems.push(format!("volume_sold={}", self.volume_sold));
        }
        if !self.average_price.is_finite() {
            problems.push(format!("average_price={}", self.average_price));
        }
        if self.number_of_winners < 0 {
            problems.push(format!("number_of_winners={}", self.number_of_winners));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SolderaError::AggregationInputInvalid(format!(
                "{} / {}: {}",
                self.region,
                self.technology,
                problems.join(", ")
            )))
        }
    }
}

/// All auction records published for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionResultSet {
    pub date: String,
    pub number_of_participants: i64,
    /// Content hash of the source file, the batch identity
    #[serde(rename = "md5_hash")]
    pub content_hash: String,
    #[serde(rename = "auctions", default)]
    pub records: Vec<AuctionRecord>,
}

impl AuctionResultSet {
    /// Dropdown label, e.g. `2024-01-01 (12 participants, 40 auctions)`
    pub fn describe(&self) -> String {
        format!(
            "{} ({} participants, {} auctions)",
            self.date,
            self.number_of_participants,
            self.records.len()
        )
    }

    /// First batch carrying `date`; later duplicates are shadowed
    pub fn find_by_date<'a>(batches: &'a [AuctionResultSet], date: &str) -> Option<&'a Self> {
        batches.iter().find(|batch| batch.date == date)
    }
}
