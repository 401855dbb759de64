//! Upstream payload types
//!
//! Deserialized straight from the disease.sh JSON bodies. Every field the
//! upstream may omit or null out is an `Option`, so decoding never depends
//! on fields the dashboard does not use.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the per-country snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// Country display name
    pub country: String,
    /// Cumulative confirmed cases
    #[serde(default, deserialize_with = "lenient_count")]
    pub cases: Option<u64>,
    /// Cumulative deaths
    #[serde(default, deserialize_with = "lenient_count")]
    pub deaths: Option<u64>,
    /// Cumulative recoveries (not reported by every country)
    #[serde(default, deserialize_with = "lenient_count")]
    pub recovered: Option<u64>,
    /// Nested country metadata
    #[serde(default)]
    pub country_info: Option<CountryInfo>,
}

/// A count that is not a non-negative integer is treated as missing
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()))
}

/// The `countryInfo` object of a country record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountryInfo {
    /// ISO 3166-1 alpha-3 code
    #[serde(default)]
    pub iso3: Option<String>,
}

impl CountryRecord {
    /// Create a record with the given name and counts
    pub fn new(country: impl Into<String>, cases: u64, deaths: u64, recovered: u64) -> Self {
        Self {
            country: country.into(),
            cases: Some(cases),
            deaths: Some(deaths),
            recovered: Some(recovered),
            country_info: None,
        }
    }

    /// Builder: attach an ISO3 code
    pub fn iso3(mut self, code: impl Into<String>) -> Self {
        self.country_info = Some(CountryInfo {
            iso3: Some(code.into()),
        });
        self
    }

    /// ISO3 code, if the upstream supplied one
    pub fn iso3_code(&self) -> Option<&str> {
        self.country_info.as_ref()?.iso3.as_deref()
    }

    pub fn cases_or_zero(&self) -> u64 {
        self.cases.unwrap_or(0)
    }

    pub fn deaths_or_zero(&self) -> u64 {
        self.deaths.unwrap_or(0)
    }

    pub fn recovered_or_zero(&self) -> u64 {
        self.recovered.unwrap_or(0)
    }
}

/// Global historical time series
///
/// Only the `cases` map is charted. It is keyed by the upstream date string
/// (e.g. `1/22/20`) and keeps the order of the JSON object. The `deaths` and
/// `recovered` maps are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoricalPayload {
    pub cases: IndexMap<String, u64>,
}

impl HistoricalPayload {
    /// Build a payload from `(date, cases)` pairs, keeping their order
    pub fn from_cases<I, K>(cases: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        Self {
            cases: cases.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Both decoded upstream bodies
#[derive(Debug, Clone, Default)]
pub struct RawData {
    pub countries: Vec<CountryRecord>,
    pub historical: HistoricalPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_record_missing_fields() {
        let json = r#"[
            {"country": "A", "cases": 10, "deaths": 1, "recovered": 5, "countryInfo": {"iso3": "AAA", "flag": "x"}},
            {"country": "B", "cases": 20, "deaths": 2, "countryInfo": {}},
            {"country": "C", "cases": null, "countryInfo": {"iso3": null}},
            {"country": "D"}
        ]"#;

        let records: Vec<CountryRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].iso3_code(), Some("AAA"));
        assert_eq!(records[1].iso3_code(), None);
        assert_eq!(records[1].recovered_or_zero(), 0);
        assert_eq!(records[2].cases_or_zero(), 0);
        assert_eq!(records[2].iso3_code(), None);
        assert_eq!(records[3].country_info, None);
        assert_eq!(records[3].deaths_or_zero(), 0);
    }

    #[test]
    fn test_historical_preserves_key_order() {
        let json = r#"{"cases": {"3/1/20": 3, "1/1/20": 1, "2/1/20": 2}}"#;
        let payload: HistoricalPayload = serde_json::from_str(json).unwrap();

        let keys: Vec<&str> = payload.cases.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["3/1/20", "1/1/20", "2/1/20"]);
    }

    #[test]
    fn test_country_record_bad_counts_are_missing() {
        let json = r#"[
            {"country": "A", "cases": 10, "deaths": 1, "recovered": -1},
            {"country": "B", "cases": "n/a", "deaths": 2.5, "recovered": 7}
        ]"#;

        let records: Vec<CountryRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].cases, Some(10));
        assert_eq!(records[0].recovered, None);
        assert_eq!(records[1].cases, None);
        assert_eq!(records[1].deaths, None);
        assert_eq!(records[1].recovered_or_zero(), 7);
    }

    #[test]
    fn test_historical_ignores_other_series() {
        let json = r#"{
            "cases": {"1/1/21": 1, "1/2/21": 3},
            "deaths": null,
            "recovered": {"1/1/21": -1}
        }"#;

        let payload: HistoricalPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload, HistoricalPayload::from_cases([("1/1/21", 1), ("1/2/21", 3)]));
    }

    #[test]
    fn test_historical_requires_cases() {
        let result: Result<HistoricalPayload, _> = serde_json::from_str(r#"{"deaths": {}}"#);
        assert!(result.is_err());
    }
}
