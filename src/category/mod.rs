//! Category index derived from the full report collection.
//!
//! Runs once, after every document has been processed. Each distinct
//! category name collects a lighter projection of every report that lists
//! it; the canonical (unstripped) reports live only in `reports.json`.

use rustc_hash::FxHashSet;
use serde::Serialize;
use serde_json::Value;

use crate::report::JsonMap;

/// Payload fields stripped from report projections inside categories.
pub const PAYLOAD_FIELDS: [&str; 4] = ["content", "overview", "configuration", "use_cases"];

/// One category entry in `categories.json`.
#[derive(Debug, Serialize)]
pub struct Category {
    pub category: String,
    /// Empty placeholder, reserved for manual curation.
    pub description: String,
    pub reports: Vec<JsonMap>,
}

/// Build the category index from the distinct-category set and the full
/// report collection.
///
/// Category order is set-derived (unordered); reports within a category
/// follow document-processing order.
pub fn build_categories(categories: &FxHashSet<String>, reports: &[JsonMap]) -> Vec<Category> {
    categories
        .iter()
        .map(|name| Category {
            category: name.clone(),
            description: String::new(),
            reports: reports
                .iter()
                .filter(|report| lists_category(report, name))
                .map(strip_payload)
                .collect(),
        })
        .collect()
}

/// Check whether a report's `report-categories` contains a name.
fn lists_category(report: &JsonMap, name: &str) -> bool {
    report
        .get("report-categories")
        .and_then(Value::as_array)
        .is_some_and(|list| list.iter().any(|entry| entry.as_str() == Some(name)))
}

/// Stripped projection: a report copy without the payload fields.
///
/// Uses `shift_remove` so the remaining keys keep their order.
fn strip_payload(report: &JsonMap) -> JsonMap {
    let mut stripped = report.clone();
    for field in PAYLOAD_FIELDS {
        stripped.shift_remove(field);
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(title: &str, categories: &[&str]) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("report-categories".to_string(), json!(categories));
        map.insert("title".to_string(), json!(title));
        map.insert("applications".to_string(), json!(["AppX"]));
        map.insert("content".to_string(), json!("aGVsbG8="));
        map
    }

    fn set_of(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_membership_follows_listed_categories() {
        let reports = vec![
            report("A", &["Security", "Networking"]),
            report("B", &["Security"]),
            report("C", &["Storage"]),
        ];
        let categories = build_categories(&set_of(&["Security", "Networking", "Storage"]), &reports);

        for category in &categories {
            for entry in &category.reports {
                assert!(lists_category(entry, &category.category));
            }
        }

        let security = categories
            .iter()
            .find(|c| c.category == "Security")
            .unwrap();
        let titles: Vec<&str> = security
            .reports
            .iter()
            .map(|r| r.get("title").unwrap().as_str().unwrap())
            .collect();
        // Processing order is preserved within a category
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_projection_strips_only_payload_fields() {
        let mut full = report("A", &["Security"]);
        full.insert("overview".to_string(), json!("b2s="));
        full.insert("custom-key".to_string(), json!("kept"));

        let stripped = strip_payload(&full);
        for field in PAYLOAD_FIELDS {
            assert!(!stripped.contains_key(field));
        }
        assert_eq!(stripped.get("custom-key"), Some(&json!("kept")));
        assert_eq!(stripped.get("applications"), Some(&json!(["AppX"])));

        // The canonical report is untouched
        assert!(full.contains_key("content"));
    }

    #[test]
    fn test_description_is_empty_placeholder() {
        let categories = build_categories(&set_of(&["Security"]), &[report("A", &["Security"])]);
        assert_eq!(categories[0].description, "");
    }

    #[test]
    fn test_serialized_shape() {
        let categories = build_categories(&set_of(&["Security"]), &[report("A", &["Security"])]);
        let value = serde_json::to_value(&categories).unwrap();
        assert_eq!(value[0]["category"], "Security");
        assert_eq!(value[0]["reports"][0]["title"], "A");
        assert!(value[0]["reports"][0].get("content").is_none());
    }
}
