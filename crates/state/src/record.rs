use serde::{Deserialize, Serialize};

/// Persisted record of the last observed update.
///
/// Only `last_update_date` takes part in change detection. The remaining
/// fields describe the first page of the most recent detected update and are
/// omitted from the JSON when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub last_update_date: String,

    /// Title of the update's first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_first_page: Option<String>,

    /// Description of the update's first page (shown in the notification).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_first_page_title: Option<String>,

    /// Link to the update's first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_first_page_url: Option<String>,

    /// Number of pages in the update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_page_count: Option<usize>,
}

impl UpdateRecord {
    /// A record carrying only the feed stamp.
    pub fn new(last_update_date: impl Into<String>) -> Self {
        Self {
            last_update_date: last_update_date.into(),
            last_update_first_page: None,
            last_update_first_page_title: None,
            last_update_first_page_url: None,
            last_update_page_count: None,
        }
    }

    /// Same first-page fields, new stamp.
    pub fn carry_over(&self, last_update_date: impl Into<String>) -> Self {
        Self {
            last_update_date: last_update_date.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> UpdateRecord {
        UpdateRecord {
            last_update_date: "2023-01-02".into(),
            last_update_first_page: Some("P1".into()),
            last_update_first_page_title: Some("A new beginning".into()),
            last_update_first_page_url: Some("https://example.com/story/1".into()),
            last_update_page_count: Some(2),
        }
    }

    #[test]
    fn date_only_record_serializes_one_key() {
        let json = serde_json::to_value(UpdateRecord::new("2023-01-02")).unwrap();
        assert_eq!(json, serde_json::json!({ "last_update_date": "2023-01-02" }));
    }

    #[test]
    fn full_record_uses_wire_names() {
        let json = serde_json::to_value(full_record()).unwrap();
        assert_eq!(json["last_update_first_page"], "P1");
        assert_eq!(json["last_update_first_page_title"], "A new beginning");
        assert_eq!(json["last_update_first_page_url"], "https://example.com/story/1");
        assert_eq!(json["last_update_page_count"], 2);
    }

    #[test]
    fn partial_json_fills_none() {
        let record: UpdateRecord =
            serde_json::from_str(r#"{"last_update_date":"2023-01-01"}"#).unwrap();
        assert_eq!(record, UpdateRecord::new("2023-01-01"));
        assert!(record.last_update_first_page_url.is_none());
    }

    #[test]
    fn missing_date_is_rejected() {
        let result = serde_json::from_str::<UpdateRecord>(r#"{"last_update_page_count":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn carry_over_keeps_page_fields() {
        let next = full_record().carry_over("2023-01-03");
        assert_eq!(next.last_update_date, "2023-01-03");
        assert_eq!(next.last_update_first_page.as_deref(), Some("P1"));
        assert_eq!(next.last_update_page_count, Some(2));
        assert_eq!(
            next.last_update_first_page_url.as_deref(),
            Some("https://example.com/story/1")
        );
    }
}
