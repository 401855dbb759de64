//! Layout Tree
//!
//! Static tree of display nodes. Serializes to JSON for API clients and
//! renders to a standalone HTML page for browsers.

use indexmap::IndexMap;
use serde::Serialize;

use super::chart::Figure;

/// Inline CSS declarations, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Style(IndexMap<String, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set one CSS property
    pub fn set(mut self, property: &str, value: &str) -> Self {
        self.0.insert(property.to_string(), value.to_string());
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    /// Render as a `style` attribute value
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One display node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Div {
        #[serde(skip_serializing_if = "Option::is_none")]
        class: Option<String>,
        style: Style,
        children: Vec<Node>,
    },
    Heading {
        level: u8,
        text: String,
        style: Style,
    },
    Paragraph {
        text: String,
        style: Style,
    },
    Graph {
        id: String,
        figure: Figure,
    },
}

impl Node {
    pub fn div(class: Option<&str>, style: Style, children: Vec<Node>) -> Self {
        Node::Div {
            class: class.map(str::to_string),
            style,
            children,
        }
    }

    pub fn heading(level: u8, text: impl Into<String>, style: Style) -> Self {
        Node::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
            style,
        }
    }

    pub fn paragraph(text: impl Into<String>, style: Style) -> Self {
        Node::Paragraph {
            text: text.into(),
            style,
        }
    }

    pub fn graph(id: impl Into<String>, figure: Figure) -> Self {
        Node::Graph {
            id: id.into(),
            figure,
        }
    }

    /// Depth-first walk over this node and its descendants
    fn walk<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        if let Node::Div { children, .. } = self {
            for child in children {
                child.walk(out);
            }
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            Node::Heading { text, .. } | Node::Paragraph { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Class marking a summary counter block
pub const SUMMARY_CARD_CLASS: &str = "summary-card";

/// A summary counter as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counter {
    pub label: String,
    pub value: String,
}

/// The assembled dashboard page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub root: Node,
}

impl Layout {
    pub fn new(title: impl Into<String>, root: Node) -> Self {
        Self {
            title: title.into(),
            root,
        }
    }

    fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.root.walk(&mut out);
        out
    }

    /// All embedded graphs, in document order
    pub fn graphs(&self) -> Vec<(&str, &Figure)> {
        self.nodes()
            .into_iter()
            .filter_map(|n| match n {
                Node::Graph { id, figure } => Some((id.as_str(), figure)),
                _ => None,
            })
            .collect()
    }

    /// Look up a graph by element id
    pub fn graph(&self, id: &str) -> Option<&Figure> {
        self.graphs()
            .into_iter()
            .find(|(graph_id, _)| *graph_id == id)
            .map(|(_, figure)| figure)
    }

    /// Summary counters: label from the card heading, value from its paragraph
    pub fn counters(&self) -> Vec<Counter> {
        self.nodes()
            .into_iter()
            .filter_map(|n| match n {
                Node::Div {
                    class: Some(class),
                    children,
                    ..
                } if class == SUMMARY_CARD_CLASS => {
                    let label = children.iter().find(|c| matches!(c, Node::Heading { .. }))?;
                    let value = children.iter().find(|c| matches!(c, Node::Paragraph { .. }))?;
                    Some(Counter {
                        label: label.text()?.to_string(),
                        value: value.text()?.to_string(),
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// Render a complete HTML document
    ///
    /// Graphs become empty `<div>`s filled in by plotly.js, loaded from
    /// `plotly_js_url`.
    pub fn render_html(&self, plotly_js_url: &str) -> serde_json::Result<String> {
        let mut body = String::new();
        let mut scripts = Vec::new();
        render_node(&self.root, &mut body, &mut scripts)?;

        let mut html = String::with_capacity(body.len() + 512);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.title)));
        html.push_str(&format!(
            "<script src=\"{}\" charset=\"utf-8\"></script>\n",
            escape_html(plotly_js_url)
        ));
        html.push_str("</head>\n<body style=\"margin: 0\">\n");
        html.push_str(&body);
        html.push_str("<script>\n");
        for script in scripts {
            html.push_str(&script);
            html.push('\n');
        }
        html.push_str("</script>\n</body>\n</html>\n");

        Ok(html)
    }
}

fn render_node(node: &Node, out: &mut String, scripts: &mut Vec<String>) -> serde_json::Result<()> {
    match node {
        Node::Div {
            class,
            style,
            children,
        } => {
            out.push_str("<div");
            if let Some(class) = class {
                out.push_str(&format!(" class=\"{}\"", escape_html(class)));
            }
            push_style(out, style);
            out.push_str(">\n");
            for child in children {
                render_node(child, out, scripts)?;
            }
            out.push_str("</div>\n");
        }
        Node::Heading { level, text, style } => {
            out.push_str(&format!("<h{}", level));
            push_style(out, style);
            out.push_str(&format!(">{}</h{}>\n", escape_html(text), level));
        }
        Node::Paragraph { text, style } => {
            out.push_str("<p");
            push_style(out, style);
            out.push_str(&format!(">{}</p>\n", escape_html(text)));
        }
        Node::Graph { id, figure } => {
            out.push_str(&format!(
                "<div id=\"{}\" class=\"dash-graph\"></div>\n",
                escape_html(id)
            ));
            let id_json = script_json(id)?;
            let figure_json = script_json(figure)?;
            scripts.push(format!(
                "(function () {{ var fig = {}; Plotly.newPlot({}, fig.data, fig.layout, {{\"responsive\": true}}); }})();",
                figure_json, id_json
            ));
        }
    }
    Ok(())
}

fn push_style(out: &mut String, style: &Style) {
    let css = style.to_css();
    if !css.is_empty() {
        out.push_str(&format!(" style=\"{}\"", escape_html(&css)));
    }
}

/// JSON that can sit inside a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::chart::cases_line;
    use crate::shape::HistoricalSeries;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Côte d'Ivoire"), "Côte d&#39;Ivoire");
        assert_eq!(escape_html("<b>&\"</b>"), "&lt;b&gt;&amp;&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_style_css() {
        let style = Style::new().set("text-align", "center").set("font-size", "24px");
        assert_eq!(style.to_css(), "text-align: center; font-size: 24px");
        assert_eq!(style.get("font-size"), Some("24px"));
        assert_eq!(Style::new().to_css(), "");
    }

    #[test]
    fn test_render_escapes_text_and_scripts() {
        let figure = cases_line(&HistoricalSeries::default(), "</script><script>alert(1)");
        let layout = Layout::new(
            "T",
            Node::div(
                None,
                Style::new(),
                vec![
                    Node::heading(1, "<i>hi</i>", Style::new()),
                    Node::graph("chart", figure),
                ],
            ),
        );

        let html = layout.render_html("https://cdn.example/plotly.js").unwrap();
        assert!(html.contains("<h1>&lt;i&gt;hi&lt;/i&gt;</h1>"));
        assert!(html.contains("<div id=\"chart\" class=\"dash-graph\"></div>"));
        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains("<\\/script>"));
        assert!(html.contains("Plotly.newPlot(\"chart\""));
    }

    #[test]
    fn test_counters_and_graph_lookup() {
        let card = |label: &str, value: &str| {
            Node::div(
                Some(SUMMARY_CARD_CLASS),
                Style::new(),
                vec![
                    Node::heading(3, label, Style::new()),
                    Node::paragraph(value, Style::new()),
                ],
            )
        };
        let layout = Layout::new(
            "T",
            Node::div(
                None,
                Style::new(),
                vec![
                    Node::div(Some("row"), Style::new(), vec![card("One", "1"), card("Two", "2")]),
                    Node::graph("g", cases_line(&HistoricalSeries::default(), "x")),
                ],
            ),
        );

        let counters = layout.counters();
        assert_eq!(counters.len(), 2);
        assert_eq!(counters[1].label, "Two");
        assert_eq!(counters[1].value, "2");
        assert!(layout.graph("g").is_some());
        assert!(layout.graph("missing").is_none());
    }

    #[test]
    fn test_heading_level_clamped() {
        assert!(matches!(Node::heading(9, "x", Style::new()), Node::Heading { level: 6, .. }));
    }
}
