//! Grouping flat indicator rows into per-tab sections
//!
//! A pure transform over the stored row sequence: rows arrive ordered by
//! `(tab_id, id)`, each section-divider row opens a new section in its tab,
//! and data rows attach to the most recent section of their tab. Rows seen
//! before any divider land in a `(No Title)` section.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::FromRow;

/// One stored indicator row, typed for the grouping transform.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IndicatorRow {
    pub tab_id: f64,
    pub name: Option<String>,
    pub year_ago: Option<f64>,
    pub current: Option<f64>,
    pub change_percent: Option<f64>,
    pub is_section: bool,
}

/// Display name for a tab id.
pub fn tab_name(tab_id: f64) -> &'static str {
    match tab_id as i64 {
        1 => "Returns",
        2 => "Indices",
        3 => "Currencies",
        4 => "Commodities",
        _ => "Unknown",
    }
}

const KNOWN_TABS: [&str; 4] = ["Returns", "Indices", "Currencies", "Commodities"];

#[derive(Debug, Serialize)]
struct Section {
    title: String,
    rows: Vec<serde_json::Value>,
}

/// Group rows into `{tab: [{title, rows}]}`.
///
/// Every known tab appears in the output even when empty, so the frontend
/// can render all four panes unconditionally.
pub fn group_into_sections(rows: &[IndicatorRow]) -> serde_json::Value {
    let mut tabs: HashMap<&str, Vec<Section>> = HashMap::new();
    for tab in KNOWN_TABS {
        tabs.insert(tab, Vec::new());
    }

    for row in rows {
        let tab = tab_name(row.tab_id);
        let sections = tabs.entry(tab).or_default();

        if row.is_section {
            sections.push(Section {
                title: row.name.clone().unwrap_or_else(|| "(No Title)".to_string()),
                rows: Vec::new(),
            });
        } else {
            if sections.is_empty() {
                sections.push(Section {
                    title: "(No Title)".to_string(),
                    rows: Vec::new(),
                });
            }
            // last section of this tab is always present here
            if let Some(section) = sections.last_mut() {
                section.rows.push(serde_json::json!([
                    row.name,
                    row.year_ago,
                    row.current,
                    row.change_percent,
                ]));
            }
        }
    }

    let mut obj = serde_json::Map::new();
    for tab in KNOWN_TABS {
        if let Some(sections) = tabs.remove(tab) {
            obj.insert(tab.to_string(), serde_json::json!(sections));
        }
    }
    // Rows from unrecognized tab ids are still returned rather than dropped.
    if let Some(unknown) = tabs.remove("Unknown") {
        if !unknown.is_empty() {
            obj.insert("Unknown".to_string(), serde_json::json!(unknown));
        }
    }

    serde_json::Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_row(tab_id: f64, name: &str, current: f64) -> IndicatorRow {
        IndicatorRow {
            tab_id,
            name: Some(name.to_string()),
            year_ago: Some(1.0),
            current: Some(current),
            change_percent: Some(0.5),
            is_section: false,
        }
    }

    fn section_row(tab_id: f64, title: &str) -> IndicatorRow {
        IndicatorRow {
            tab_id,
            name: Some(title.to_string()),
            year_ago: Some(0.0),
            current: Some(0.0),
            change_percent: Some(0.0),
            is_section: true,
        }
    }

    #[test]
    fn test_rows_group_under_preceding_header() {
        let rows = vec![
            section_row(1.0, "India Stocks"),
            data_row(1.0, "Sensex", 80000.0),
            data_row(1.0, "Nifty", 24000.0),
            section_row(1.0, "Bullion"),
            data_row(1.0, "Gold", 72000.0),
        ];

        let grouped = group_into_sections(&rows);
        let returns = grouped["Returns"].as_array().unwrap();
        assert_eq!(returns.len(), 2);
        assert_eq!(returns[0]["title"], "India Stocks");
        assert_eq!(returns[0]["rows"].as_array().unwrap().len(), 2);
        assert_eq!(returns[1]["title"], "Bullion");
        assert_eq!(returns[1]["rows"][0][0], "Gold");
    }

    #[test]
    fn test_leading_rows_fall_into_untitled_section() {
        let rows = vec![data_row(2.0, "Hang Seng", 17000.0)];

        let grouped = group_into_sections(&rows);
        let indices = grouped["Indices"].as_array().unwrap();
        assert_eq!(indices[0]["title"], "(No Title)");
        assert_eq!(indices[0]["rows"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_all_known_tabs_always_present() {
        let grouped = group_into_sections(&[]);
        for tab in ["Returns", "Indices", "Currencies", "Commodities"] {
            assert!(grouped[tab].as_array().unwrap().is_empty());
        }
        assert!(grouped.get("Unknown").is_none());
    }

    #[test]
    fn test_unknown_tab_rows_are_kept() {
        let rows = vec![data_row(9.0, "Mystery", 1.0)];
        let grouped = group_into_sections(&rows);
        assert_eq!(grouped["Unknown"][0]["rows"][0][0], "Mystery");
    }

    #[test]
    fn test_sections_do_not_leak_across_tabs() {
        let rows = vec![
            section_row(1.0, "India Stocks"),
            data_row(1.0, "Sensex", 80000.0),
            data_row(2.0, "BRICS avg", 5.0),
        ];

        let grouped = group_into_sections(&rows);
        // The tab-2 row must not attach to tab 1's section.
        assert_eq!(grouped["Indices"][0]["title"], "(No Title)");
        assert_eq!(grouped["Returns"][0]["rows"].as_array().unwrap().len(), 1);
    }
}
