//! Global historical series

use chrono::NaiveDate;
use serde::Serialize;

use crate::source::HistoricalPayload;

/// Upstream date format, e.g. `1/22/20`
const UPSTREAM_DATE_FORMAT: &str = "%m/%d/%y";

/// One day of the global series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Cumulative confirmed cases on `date`
    pub cases: u64,
}

/// Date-indexed cumulative case counts
///
/// Points keep the key order of the upstream object. The upstream is
/// expected to list days chronologically; nothing here sorts them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoricalSeries {
    points: Vec<SeriesPoint>,
    #[serde(skip)]
    skipped: Vec<String>,
}

impl HistoricalSeries {
    /// Build the series from the payload's `cases` map
    ///
    /// Keys that are not dates are left out and kept in [`skipped`](Self::skipped).
    pub fn from_payload(payload: &HistoricalPayload) -> Self {
        let mut points = Vec::with_capacity(payload.cases.len());
        let mut skipped = Vec::new();

        for (key, &cases) in &payload.cases {
            match parse_date(key) {
                Some(date) => points.push(SeriesPoint { date, cases }),
                None => skipped.push(key.clone()),
            }
        }

        Self { points, skipped }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Keys dropped because they did not parse as dates
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether dates are strictly ascending
    pub fn is_chronological(&self) -> bool {
        self.points.windows(2).all(|w| w[0].date < w[1].date)
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }
}

/// Parse an upstream date key (`M/D/YY`), falling back to ISO `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, UPSTREAM_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}
