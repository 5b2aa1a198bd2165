use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use super::domain::{
    DataLoadError, IncentiveMatch, IncentiveRecord, LookupOutcome, SelectorField, YearBand,
};
use super::{normalizer, parser};

/// Immutable, query-ready view over the normalized record sequence.
#[derive(Debug)]
pub struct IncentiveCatalog {
    records: Vec<IncentiveRecord>,
}

impl IncentiveCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let rows = parser::parse_rows(reader)?;
        let records = normalizer::normalize_rows(rows);
        Ok(Self { records })
    }

    pub fn records(&self) -> &[IncentiveRecord] {
        &self.records
    }

    /// Distinct values for one selector field. Identity fields sort
    /// lexically; year bands keep the fixed column order, dropping bands
    /// absent from the data.
    pub fn distinct_values(&self, field: SelectorField) -> Vec<String> {
        match field {
            SelectorField::Category => self.sorted_identity(|record| &record.category),
            SelectorField::CurrentFuel => self.sorted_identity(|record| &record.current_fuel),
            SelectorField::ReplacementFuel => {
                self.sorted_identity(|record| &record.replacement_fuel)
            }
            SelectorField::YearBand => YearBand::ordered()
                .into_iter()
                .filter(|band| self.records.iter().any(|record| record.year_band == *band))
                .map(|band| band.label().to_string())
                .collect(),
        }
    }

    /// Exact-match point query. The first matching record in ingestion
    /// order wins when the source carried duplicate keys. Arguments outside
    /// the domains reported by `distinct_values` degrade to `NotFound`.
    pub fn query(
        &self,
        category: &str,
        current_fuel: &str,
        replacement_fuel: &str,
        year_band: &str,
    ) -> LookupOutcome {
        let Some(band) = YearBand::from_label(year_band) else {
            return LookupOutcome::NotFound;
        };

        self.records
            .iter()
            .find(|record| {
                record.category == category
                    && record.current_fuel == current_fuel
                    && record.replacement_fuel == replacement_fuel
                    && record.year_band == band
            })
            .map(|record| {
                LookupOutcome::Found(IncentiveMatch {
                    amount: record.amount,
                    category: record.category.clone(),
                    current_fuel: record.current_fuel.clone(),
                    replacement_fuel: record.replacement_fuel.clone(),
                    year_band: record.year_band.label(),
                })
            })
            .unwrap_or(LookupOutcome::NotFound)
    }

    fn sorted_identity<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&IncentiveRecord) -> &String,
    {
        self.records
            .iter()
            .map(field)
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }
}

/// Result of the most recent load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Ready { records: usize },
    Failed { reason: String },
}

enum LoadState {
    Ready(Arc<IncentiveCatalog>),
    Failed(String),
}

enum CatalogSource {
    Path(PathBuf),
    Fixed,
}

/// Owns the current catalog and its load lifecycle. Callers share one
/// instance by reference; there is no process-wide state.
pub struct CatalogHandle {
    source: CatalogSource,
    state: RwLock<LoadState>,
}

impl CatalogHandle {
    /// Builds the catalog from a file path. A failed load is captured as
    /// status rather than returned as an error, so the caller can still
    /// serve selectors and queries in their degraded form.
    pub fn load<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let state = build_state(&path);
        Self {
            source: CatalogSource::Path(path),
            state: RwLock::new(state),
        }
    }

    /// Wraps an already-built catalog (in-memory table). `reload` keeps the
    /// current state for this source kind.
    pub fn new(catalog: IncentiveCatalog) -> Self {
        Self {
            source: CatalogSource::Fixed,
            state: RwLock::new(LoadState::Ready(Arc::new(catalog))),
        }
    }

    /// Rebuilds the whole record sequence from the source and swaps it in
    /// as a unit; concurrent queries see either the old or the new table,
    /// never a mix.
    pub fn reload(&self) -> LoadStatus {
        if let CatalogSource::Path(path) = &self.source {
            let state = build_state(path);
            *self.state.write().expect("catalog lock poisoned") = state;
        }
        self.status()
    }

    pub fn status(&self) -> LoadStatus {
        match &*self.state.read().expect("catalog lock poisoned") {
            LoadState::Ready(catalog) => LoadStatus::Ready {
                records: catalog.records().len(),
            },
            LoadState::Failed(reason) => LoadStatus::Failed {
                reason: reason.clone(),
            },
        }
    }

    /// The current immutable catalog, if the last load succeeded.
    pub fn snapshot(&self) -> Option<Arc<IncentiveCatalog>> {
        match &*self.state.read().expect("catalog lock poisoned") {
            LoadState::Ready(catalog) => Some(catalog.clone()),
            LoadState::Failed(_) => None,
        }
    }

    /// Empty while the catalog is in the failed state.
    pub fn distinct_values(&self, field: SelectorField) -> Vec<String> {
        self.snapshot()
            .map(|catalog| catalog.distinct_values(field))
            .unwrap_or_default()
    }

    /// `NotFound` while the catalog is in the failed state.
    pub fn query(
        &self,
        category: &str,
        current_fuel: &str,
        replacement_fuel: &str,
        year_band: &str,
    ) -> LookupOutcome {
        match self.snapshot() {
            Some(catalog) => catalog.query(category, current_fuel, replacement_fuel, year_band),
            None => LookupOutcome::NotFound,
        }
    }
}

fn build_state(path: &Path) -> LoadState {
    match IncentiveCatalog::from_path(path) {
        Ok(catalog) => {
            info!(
                records = catalog.records().len(),
                path = %path.display(),
                "incentive catalog loaded"
            );
            LoadState::Ready(Arc::new(catalog))
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "incentive catalog load failed");
            LoadState::Failed(err.to_string())
        }
    }
}
