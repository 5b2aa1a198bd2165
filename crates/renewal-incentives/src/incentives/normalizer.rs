use std::collections::HashSet;

use tracing::warn;

use super::domain::{IncentiveRecord, YearBand};
use super::parser::RawRow;

/// Literal that marks a repeated header row embedded in the data body.
const HEADER_ARTIFACT: &str = "Categoria";

/// Flattens the forward-filled wide rows into the ordered record sequence.
///
/// Fill runs before the artifact filter, so blank identity cells after a
/// repeated header row inherit the header literal and are dropped with it.
pub(crate) fn normalize_rows(rows: Vec<RawRow>) -> Vec<IncentiveRecord> {
    let mut records = Vec::new();
    let mut seen: HashSet<(String, String, String, YearBand)> = HashSet::new();

    let mut last_category: Option<String> = None;
    let mut last_current_fuel: Option<String> = None;
    let mut last_replacement_fuel: Option<String> = None;

    for row in rows {
        if row.category.is_some() {
            last_category = row.category;
        }
        if row.current_fuel.is_some() {
            last_current_fuel = row.current_fuel;
        }
        if row.replacement_fuel.is_some() {
            last_replacement_fuel = row.replacement_fuel;
        }

        // A row whose identity never completed (blank cells with no prior
        // value) cannot produce records.
        let (Some(category), Some(current_fuel), Some(replacement_fuel)) = (
            last_category.as_deref(),
            last_current_fuel.as_deref(),
            last_replacement_fuel.as_deref(),
        ) else {
            continue;
        };

        if category == HEADER_ARTIFACT {
            continue;
        }

        for (cell, band) in row.bands.iter().zip(YearBand::ordered()) {
            let Some(raw) = cell.as_deref() else {
                continue;
            };
            // Blank or non-numeric means "no incentive offered", not zero.
            let Some(amount) = parse_amount(raw) else {
                continue;
            };

            let key = (
                category.to_string(),
                current_fuel.to_string(),
                replacement_fuel.to_string(),
                band,
            );
            if !seen.insert(key) {
                warn!(
                    category,
                    current_fuel,
                    replacement_fuel,
                    year_band = band.label(),
                    "duplicate incentive key in source table; first occurrence wins"
                );
            }

            records.push(IncentiveRecord {
                category: category.to_string(),
                current_fuel: current_fuel.to_string(),
                replacement_fuel: replacement_fuel.to_string(),
                year_band: band,
                amount,
            });
        }
    }

    records
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
