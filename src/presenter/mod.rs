//! Dashboard Presentation
//!
//! Builds the two chart specifications and assembles them, together with
//! the three formatted totals, into a fixed layout tree.
//!
//! ```text
//! Div (page)
//! ├── Heading
//! ├── Div.row
//! │   ├── Div.summary-card  Total Cases
//! │   ├── Div.summary-card  Total Deaths
//! │   └── Div.summary-card  Total Recovered
//! ├── Graph #world-map
//! └── Graph #time-series-chart
//! ```

mod chart;
mod format;
mod layout;

pub use chart::{
    cases_line, choropleth_map, plasma_scale, ChoroplethTrace, Figure, FigureLayout, ScatterTrace,
    Trace,
};
pub use format::format_count;
pub use layout::{escape_html, Counter, Layout, Node, Style, SUMMARY_CARD_CLASS};

use crate::shape::ShapedData;

/// Element id of the choropleth map
pub const MAP_GRAPH_ID: &str = "world-map";

/// Element id of the time-series chart
pub const LINE_GRAPH_ID: &str = "time-series-chart";

/// Titles used on the page
#[derive(Debug, Clone)]
pub struct PresentOptions {
    pub heading: String,
    pub map_title: String,
    pub line_title: String,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            heading: "COVID-19 Global Data Dashboard".to_string(),
            map_title: "Confirmed COVID-19 Cases by Country".to_string(),
            line_title: "Global Confirmed Cases Over Time".to_string(),
        }
    }
}

/// Assemble the dashboard layout from shaped data
///
/// Empty data yields the same tree with "0" counters and empty charts.
pub fn present(data: &ShapedData, options: &PresentOptions) -> Layout {
    let map = choropleth_map(&data.countries, &options.map_title);
    let line = cases_line(&data.historical, &options.line_title);

    let cards = vec![
        summary_card("Total Cases", data.totals.cases, "#f44336"),
        summary_card("Total Deaths", data.totals.deaths, "#9C27B0"),
        summary_card("Total Recovered", data.totals.recovered, "#4CAF50"),
    ];

    let root = Node::div(
        None,
        Style::new()
            .set("background-color", "#111111")
            .set("color", "#FFFFFF")
            .set("font-family", "sans-serif"),
        vec![
            Node::heading(
                1,
                options.heading.as_str(),
                Style::new()
                    .set("text-align", "center")
                    .set("padding", "20px"),
            ),
            Node::div(Some("row"), Style::new().set("text-align", "center"), cards),
            Node::graph(MAP_GRAPH_ID, map),
            Node::graph(LINE_GRAPH_ID, line),
        ],
    );

    Layout::new(options.heading.as_str(), root)
}

fn summary_card(label: &str, value: u64, color: &str) -> Node {
    Node::div(
        Some(SUMMARY_CARD_CLASS),
        Style::new()
            .set("width", "30%")
            .set("display", "inline-block")
            .set("padding", "10px"),
        vec![
            Node::heading(3, label, Style::new().set("text-align", "center")),
            Node::paragraph(
                format_count(value),
                Style::new()
                    .set("text-align", "center")
                    .set("font-size", "24px")
                    .set("color", color),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::shape;
    use crate::source::{CountryRecord, HistoricalPayload};

    fn sample() -> ShapedData {
        let records = vec![
            CountryRecord::new("A", 1_500_000, 20_000, 900_000).iso3("AAA"),
            CountryRecord::new("B", 2_500, 30, 0),
        ];
        let payload = HistoricalPayload::from_cases([("1/1/21", 100), ("1/2/21", 150)]);
        shape(Some(records.as_slice()), Some(&payload))
    }

    #[test]
    fn test_counters_are_grouped() {
        let layout = present(&sample(), &PresentOptions::default());
        let counters = layout.counters();

        let values: Vec<&str> = counters.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["1,502,500", "20,030", "900,000"]);

        let labels: Vec<&str> = counters.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Total Cases", "Total Deaths", "Total Recovered"]);
    }

    #[test]
    fn test_graphs_present_in_order() {
        let layout = present(&sample(), &PresentOptions::default());
        let ids: Vec<&str> = layout.graphs().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![MAP_GRAPH_ID, LINE_GRAPH_ID]);

        let map = layout.graph(MAP_GRAPH_ID).unwrap();
        assert_eq!(map.title(), "Confirmed COVID-19 Cases by Country");
        assert_eq!(map.point_count(), 2);

        let line = layout.graph(LINE_GRAPH_ID).unwrap();
        assert_eq!(line.title(), "Global Confirmed Cases Over Time");
        assert_eq!(line.point_count(), 2);
    }

    #[test]
    fn test_empty_data_layout() {
        let layout = present(&ShapedData::empty(), &PresentOptions::default());

        let counters = layout.counters();
        assert_eq!(counters.len(), 3);
        assert!(counters.iter().all(|c| c.value == "0"));

        let graphs = layout.graphs();
        assert_eq!(graphs.len(), 2);
        assert!(graphs.iter().all(|(_, figure)| figure.point_count() == 0));

        let html = layout.render_html("plotly.js").unwrap();
        assert!(html.contains("COVID-19 Global Data Dashboard"));
        assert!(html.contains("id=\"world-map\""));
        assert!(html.contains("id=\"time-series-chart\""));
    }

    #[test]
    fn test_layout_json_shape() {
        let layout = present(&ShapedData::empty(), &PresentOptions::default());
        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["title"], "COVID-19 Global Data Dashboard");
        assert_eq!(json["root"]["type"], "div");
        assert_eq!(json["root"]["style"]["background-color"], "#111111");
        assert_eq!(json["root"]["children"][0]["type"], "heading");
        assert_eq!(json["root"]["children"][2]["type"], "graph");
        assert_eq!(json["root"]["children"][2]["id"], MAP_GRAPH_ID);
    }
}
