mod catalog;
pub mod domain;
mod normalizer;
mod parser;
pub mod router;

pub use catalog::{CatalogHandle, IncentiveCatalog, LoadStatus};
pub use domain::{
    DataLoadError, IncentiveMatch, IncentiveRecord, LookupOutcome, SelectorField, YearBand,
};
pub use router::incentive_router;
