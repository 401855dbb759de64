//! Chart Specifications
//!
//! Plotly figure descriptions, serialized to the JSON shape `Plotly.newPlot`
//! accepts. The browser does the drawing; nothing here renders pixels.

use chrono::NaiveDate;
use serde::Serialize;

use crate::shape::{CountryTable, HistoricalSeries};

/// Plotly's sequential "Plasma" palette
const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";
const DARK_FONT: &str = "#f2f5fa";
const DARK_GRID: &str = "#283442";

/// A complete figure: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

impl Figure {
    /// Figure title text
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Total number of data points across traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::point_count).sum()
    }
}

/// One plotly trace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Choropleth(ChoroplethTrace),
    Scatter(ScatterTrace),
}

impl Trace {
    pub fn point_count(&self) -> usize {
        match self {
            Trace::Choropleth(t) => t.z.len(),
            Trace::Scatter(t) => t.y.len(),
        }
    }
}

/// Map regions coloured by a value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    /// ISO3 codes; `null` entries are not drawn
    pub locations: Vec<Option<String>>,
    pub z: Vec<u64>,
    /// Hover names, aligned with `locations`
    pub text: Vec<String>,
    pub locationmode: String,
    pub colorscale: Vec<(f64, String)>,
    pub colorbar: ColorBar,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

/// x/y line trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<NaiveDate>,
    pub y: Vec<u64>,
    pub mode: String,
    pub name: String,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub gridcolor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geo {
    pub bgcolor: String,
    pub showframe: bool,
    pub showcoastlines: bool,
}

/// Figure-level layout (dark theme, transparent background)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub title: Title,
    pub font: Font,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

impl FigureLayout {
    fn dark(title: &str) -> Self {
        Self {
            title: Title::new(title),
            font: Font {
                color: DARK_FONT.to_string(),
            },
            paper_bgcolor: TRANSPARENT.to_string(),
            plot_bgcolor: TRANSPARENT.to_string(),
            geo: None,
            xaxis: None,
            yaxis: None,
        }
    }
}

/// The Plasma palette as evenly spaced colour stops
pub fn plasma_scale() -> Vec<(f64, String)> {
    let last = (PLASMA.len() - 1) as f64;
    PLASMA
        .iter()
        .enumerate()
        .map(|(i, c)| (i as f64 / last, c.to_string()))
        .collect()
}

/// World map of cases per country, keyed by ISO3 code
pub fn choropleth_map(table: &CountryTable, title: &str) -> Figure {
    let rows = table.rows();

    let trace = ChoroplethTrace {
        locations: rows.iter().map(|r| r.iso_alpha.clone()).collect(),
        z: rows.iter().map(|r| r.cases).collect(),
        text: rows.iter().map(|r| r.country.clone()).collect(),
        locationmode: "ISO-3".to_string(),
        colorscale: plasma_scale(),
        colorbar: ColorBar {
            title: Title::new("cases"),
        },
        hovertemplate: "<b>%{text}</b><br>iso_alpha=%{location}<br>cases=%{z}<extra></extra>"
            .to_string(),
    };

    let mut layout = FigureLayout::dark(title);
    layout.geo = Some(Geo {
        bgcolor: TRANSPARENT.to_string(),
        showframe: false,
        showcoastlines: true,
    });

    Figure {
        data: vec![Trace::Choropleth(trace)],
        layout,
    }
}

/// Cumulative global cases over time, in series order
pub fn cases_line(series: &HistoricalSeries, title: &str) -> Figure {
    let points = series.points();

    let trace = ScatterTrace {
        x: points.iter().map(|p| p.date).collect(),
        y: points.iter().map(|p| p.cases).collect(),
        mode: "lines".to_string(),
        name: "Cases".to_string(),
        hovertemplate: "Date=%{x}<br>Cases=%{y}<extra></extra>".to_string(),
    };

    let mut layout = FigureLayout::dark(title);
    layout.xaxis = Some(Axis {
        title: Title::new("Date"),
        gridcolor: DARK_GRID.to_string(),
    });
    layout.yaxis = Some(Axis {
        title: Title::new("Cases"),
        gridcolor: DARK_GRID.to_string(),
    });

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout,
    }
}
