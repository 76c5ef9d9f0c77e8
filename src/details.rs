//! Table details shared by audits
//!
//! Shapes follow the report format consumed by report renderers: a `table`
//! details object with typed headings and rows keyed by heading `key`.

use crate::trace_elements::{BoundingRect, NodeDetails};
use serde::{Deserialize, Serialize};

/// Presentation form of a DOM element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeItem {
    /// Always `"node"`
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lh_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_rect: Option<BoundingRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_label: Option<String>,
}

impl NodeItem {
    /// Short human label: node label, then selector, then snippet
    pub fn display_label(&self) -> &str {
        self.node_label
            .as_deref()
            .or(self.selector.as_deref())
            .or(self.snippet.as_deref())
            .unwrap_or("(unknown element)")
    }
}

/// Convert a gathered node descriptor into its presentation form
pub fn make_node_item(node: &NodeDetails) -> NodeItem {
    NodeItem {
        item_type: "node".to_string(),
        lh_id: node.lh_id.clone(),
        path: node.devtools_node_path.clone(),
        selector: node.selector.clone(),
        bounding_rect: node.bounding_rect,
        snippet: node.snippet.clone(),
        node_label: node.node_label.clone(),
    }
}

/// How a column's values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Node,
    Numeric,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableHeading {
    pub key: String,
    pub value_type: ValueType,
    pub label: String,
    /// Display rounding step for numeric columns (e.g. 0.001)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<f64>,
}

impl TableHeading {
    pub fn new(key: impl Into<String>, value_type: ValueType, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value_type,
            label: label.into(),
            granularity: None,
        }
    }

    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = Some(granularity);
        self
    }
}

/// One rendered cell value
#[derive(Debug, Clone, PartialEq)]
pub enum TableValue<'a> {
    Node(&'a NodeItem),
    Numeric(f64),
    Text(&'a str),
}

/// Row types that can be rendered as a table
pub trait TableItem {
    /// Value of the column named `key`, if the row has one
    fn cell(&self, key: &str) -> Option<TableValue<'_>>;
}

/// `table` details: headings plus ordered rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDetails<T> {
    /// Always `"table"`
    #[serde(rename = "type")]
    pub details_type: String,
    pub headings: Vec<TableHeading>,
    pub items: Vec<T>,
}

/// Build a table from headings and rows, keeping row order
pub fn make_table_details<T>(headings: Vec<TableHeading>, items: Vec<T>) -> TableDetails<T> {
    TableDetails {
        details_type: "table".to_string(),
        headings,
        items,
    }
}

impl<T: TableItem> TableDetails<T> {
    /// Render headings and rows as an aligned text table
    pub fn to_text(&self) -> String {
        let header: Vec<String> = self.headings.iter().map(|h| h.label.clone()).collect();
        let rows: Vec<Vec<String>> = self
            .items
            .iter()
            .map(|item| {
                self.headings
                    .iter()
                    .map(|h| match item.cell(&h.key) {
                        Some(TableValue::Node(node)) => node.display_label().to_string(),
                        Some(TableValue::Numeric(v)) => format_numeric(v, h.granularity),
                        Some(TableValue::Text(s)) => s.to_string(),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                rows.iter()
                    .map(|r| r[col].chars().count())
                    .chain(std::iter::once(header[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_row(&mut out, &header, &widths);
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"─".repeat(rule));
        out.push('\n');
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Format a numeric cell, rounding to `granularity` when one is set
///
/// # Example
/// ```
/// use shiftaudit::details::format_numeric;
///
/// assert_eq!(format_numeric(0.123456, Some(0.001)), "0.123");
/// assert_eq!(format_numeric(0.04, Some(0.001)), "0.040");
/// ```
pub fn format_numeric(value: f64, granularity: Option<f64>) -> String {
    match granularity {
        Some(step) if step > 0.0 && step.is_finite() => {
            let decimals = (-step.log10() - 1e-9).ceil().max(0.0) as usize;
            let rounded = (value / step).round() * step;
            format!("{:.*}", decimals, rounded)
        }
        _ => format!("{}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        node: NodeItem,
        score: f64,
    }

    impl TableItem for Row {
        fn cell(&self, key: &str) -> Option<TableValue<'_>> {
            match key {
                "node" => Some(TableValue::Node(&self.node)),
                "score" => Some(TableValue::Numeric(self.score)),
                _ => None,
            }
        }
    }

    fn node(selector: &str) -> NodeDetails {
        NodeDetails {
            selector: Some(selector.to_string()),
            devtools_node_path: Some("1,HTML,1,BODY,0,DIV".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_make_node_item_maps_fields() {
        let item = make_node_item(&node("div.banner"));
        assert_eq!(item.item_type, "node");
        assert_eq!(item.path.as_deref(), Some("1,HTML,1,BODY,0,DIV"));
        assert_eq!(item.selector.as_deref(), Some("div.banner"));
        assert_eq!(item.display_label(), "div.banner");
    }

    #[test]
    fn test_node_item_json_shape() {
        let json = serde_json::to_value(make_node_item(&node("div"))).unwrap();
        assert_eq!(json["type"], "node");
        assert_eq!(json["path"], "1,HTML,1,BODY,0,DIV");
        assert!(json.get("snippet").is_none());
    }

    #[test]
    fn test_format_numeric_granularity() {
        assert_eq!(format_numeric(0.123456, Some(0.001)), "0.123");
        assert_eq!(format_numeric(0.04, Some(0.001)), "0.040");
        assert_eq!(format_numeric(1.0, Some(0.001)), "1.000");
        assert_eq!(format_numeric(12.6, Some(1.0)), "13");
        assert_eq!(format_numeric(0.25, None), "0.25");
    }

    #[test]
    fn test_table_json_shape() {
        let headings = vec![
            TableHeading::new("node", ValueType::Node, "Element"),
            TableHeading::new("score", ValueType::Numeric, "CLS Contribution").with_granularity(0.001),
        ];
        let table: TableDetails<serde_json::Value> = make_table_details(headings, vec![]);
        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(json["type"], "table");
        assert_eq!(json["headings"][0]["valueType"], "node");
        assert_eq!(json["headings"][1]["granularity"], 0.001);
        assert!(json["headings"][0].get("granularity").is_none());
    }

    #[test]
    fn test_to_text_rounds_display_only() {
        let headings = vec![
            TableHeading::new("node", ValueType::Node, "Element"),
            TableHeading::new("score", ValueType::Numeric, "CLS Contribution").with_granularity(0.001),
        ];
        let rows = vec![
            Row { node: make_node_item(&node("img.hero")), score: 0.123456 },
            Row { node: make_node_item(&node("div.ad")), score: 0.04 },
        ];
        let table = make_table_details(headings, rows);

        let text = table.to_text();
        assert!(text.contains("Element"));
        assert!(text.contains("img.hero"));
        assert!(text.contains("0.123"));
        assert!(text.contains("0.040"));
        assert!(!text.contains("0.123456"));
        assert_eq!(table.items[0].score, 0.123456);
    }
}
