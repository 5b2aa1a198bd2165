use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearBand {
    Before2000,
    From2000To2002,
    From2003To2006,
    From2007To2017,
}

impl YearBand {
    /// Fixed column order of the band columns in the source table.
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Before2000,
            Self::From2000To2002,
            Self::From2003To2006,
            Self::From2007To2017,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Before2000 => "Before-2000",
            Self::From2000To2002 => "2000-2002",
            Self::From2003To2006 => "2003-2006",
            Self::From2007To2017 => "2007-2017",
        }
    }

    /// Accepts the canonical labels plus the raw `<2000` form used by the
    /// spreadsheet's column header, so that form never leaks past ingestion.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "<2000" | "Before-2000" => Some(Self::Before2000),
            "2000-2002" => Some(Self::From2000To2002),
            "2003-2006" => Some(Self::From2003To2006),
            "2007-2017" => Some(Self::From2007To2017),
            _ => None,
        }
    }
}

/// One flat incentive entry produced by normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncentiveRecord {
    pub category: String,
    pub current_fuel: String,
    pub replacement_fuel: String,
    pub year_band: YearBand,
    pub amount: f64,
}

/// Key fields a caller can ask the catalog to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorField {
    Category,
    CurrentFuel,
    ReplacementFuel,
    YearBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncentiveMatch {
    pub amount: f64,
    pub category: String,
    pub current_fuel: String,
    pub replacement_fuel: String,
    pub year_band: &'static str,
}

/// Outcome of a point query. `NotFound` is an expected result for most of
/// the selector space, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    Found(IncentiveMatch),
    NotFound,
}

impl LookupOutcome {
    pub fn found(&self) -> Option<&IncentiveMatch> {
        match self {
            LookupOutcome::Found(matched) => Some(matched),
            LookupOutcome::NotFound => None,
        }
    }
}

/// Failure while reading or reshaping the raw table. Fatal to that load
/// attempt; queries never see a partially normalized table.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read incentive source: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid incentive table: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("incentive table has no data rows")]
    EmptyTable,
}
