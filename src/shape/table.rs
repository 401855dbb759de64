//! Country table and global totals

use serde::Serialize;

use crate::source::CountryRecord;

/// One row of the per-country table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRow {
    pub country: String,
    pub cases: u64,
    /// ISO3 code keying the map region; `None` when the upstream omits it
    pub iso_alpha: Option<String>,
}

impl CountryRow {
    pub fn new(country: impl Into<String>, cases: u64, iso_alpha: Option<&str>) -> Self {
        Self {
            country: country.into(),
            cases,
            iso_alpha: iso_alpha.map(str::to_string),
        }
    }
}

/// Per-country snapshot projected to the columns the map needs
///
/// Always exactly one row per input record, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryTable {
    rows: Vec<CountryRow>,
}

impl CountryTable {
    /// Project raw records into rows
    pub fn from_records(records: &[CountryRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| CountryRow {
                country: r.country.clone(),
                cases: r.cases_or_zero(),
                iso_alpha: r.iso3_code().map(str::to_string),
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows without an ISO3 code (not drawn on the map)
    pub fn unmapped(&self) -> impl Iterator<Item = &CountryRow> {
        self.rows.iter().filter(|r| r.iso_alpha.is_none())
    }
}

/// Worldwide cumulative counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GlobalTotals {
    pub cases: u64,
    pub deaths: u64,
    pub recovered: u64,
}

impl GlobalTotals {
    pub fn new(cases: u64, deaths: u64, recovered: u64) -> Self {
        Self {
            cases,
            deaths,
            recovered,
        }
    }

    /// Sum each count across the raw records (absent counts as 0)
    pub fn from_records(records: &[CountryRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| Self {
            cases: acc.cases.saturating_add(r.cases_or_zero()),
            deaths: acc.deaths.saturating_add(r.deaths_or_zero()),
            recovered: acc.recovered.saturating_add(r.recovered_or_zero()),
        })
    }
}
