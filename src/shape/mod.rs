//! Data Shaping
//!
//! Turns the two raw upstream payloads into the three artifacts the
//! presenter consumes:
//!
//! - [`CountryTable`]: one row per country with its ISO3 code
//! - [`HistoricalSeries`]: date-indexed global case counts
//! - [`GlobalTotals`]: cases, deaths and recoveries summed over countries
//!
//! Shaping is pure and never fails. Missing input yields the empty state.

mod series;
mod table;

pub use series::{parse_date, HistoricalSeries, SeriesPoint};
pub use table::{CountryRow, CountryTable, GlobalTotals};

use serde::Serialize;

use crate::source::{CountryRecord, HistoricalPayload, RawData};

/// Output of the shaping step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShapedData {
    pub countries: CountryTable,
    pub historical: HistoricalSeries,
    pub totals: GlobalTotals,
}

impl ShapedData {
    /// Fallback used when the upstream could not be fetched
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shape a successfully fetched pair of payloads
    pub fn from_raw(raw: &RawData) -> Self {
        shape(Some(raw.countries.as_slice()), Some(&raw.historical))
    }

    /// True when there is nothing to chart
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.historical.is_empty()
    }
}

/// Shape the raw payloads
///
/// If either input is absent the result is [`ShapedData::empty`]. Totals are
/// summed from `countries` directly, not from the projected table.
pub fn shape(
    countries: Option<&[CountryRecord]>,
    historical: Option<&HistoricalPayload>,
) -> ShapedData {
    let (Some(countries), Some(historical)) = (countries, historical) else {
        return ShapedData::empty();
    };

    ShapedData {
        countries: CountryTable::from_records(countries),
        historical: HistoricalSeries::from_payload(historical),
        totals: GlobalTotals::from_records(countries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CountryInfo;
    use chrono::NaiveDate;

    fn scenario_records() -> Vec<CountryRecord> {
        vec![
            CountryRecord::new("A", 10, 1, 5).iso3("AAA"),
            CountryRecord {
                country_info: Some(CountryInfo { iso3: None }),
                ..CountryRecord::new("B", 20, 2, 10)
            },
        ]
    }

    #[test]
    fn test_country_scenario() {
        let records = scenario_records();
        let payload = HistoricalPayload::default();

        let shaped = shape(Some(records.as_slice()), Some(&payload));

        assert_eq!(
            shaped.countries.rows(),
            [
                CountryRow::new("A", 10, Some("AAA")),
                CountryRow::new("B", 20, None),
            ]
        );
        assert_eq!(shaped.totals, GlobalTotals::new(30, 3, 15));
    }

    #[test]
    fn test_historical_scenario() {
        let payload: HistoricalPayload =
            serde_json::from_str(r#"{"cases": {"1/1/21": 100, "1/2/21": 150}}"#).unwrap();

        let shaped = shape(Some(&[][..]), Some(&payload));

        let points: Vec<(NaiveDate, u64)> = shaped
            .historical
            .points()
            .iter()
            .map(|p| (p.date, p.cases))
            .collect();
        assert_eq!(
            points,
            vec![
                (NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), 100),
                (NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(), 150),
            ]
        );
    }

    #[test]
    fn test_missing_input_falls_back_to_empty() {
        let records = scenario_records();
        let payload = HistoricalPayload::from_cases([("1/1/21", 100)]);

        for shaped in [
            shape(None, Some(&payload)),
            shape(Some(records.as_slice()), None),
            shape(None, None),
        ] {
            assert!(shaped.countries.is_empty());
            assert!(shaped.historical.is_empty());
            assert_eq!(shaped.totals, GlobalTotals::new(0, 0, 0));
            assert_eq!(shaped, ShapedData::empty());
        }
    }

    #[test]
    fn test_zero_records_zero_totals() {
        let shaped = shape(Some(&[][..]), Some(&HistoricalPayload::default()));
        assert_eq!(shaped.totals, GlobalTotals::default());
        assert!(shaped.is_empty());
    }

    #[test]
    fn test_from_raw() {
        let raw = RawData {
            countries: scenario_records(),
            historical: HistoricalPayload::from_cases([("1/1/21", 100)]),
        };
        let shaped = ShapedData::from_raw(&raw);
        assert_eq!(shaped.countries.len(), 2);
        assert_eq!(shaped.historical.len(), 1);
    }
}
