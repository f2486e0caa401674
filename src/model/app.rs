use serde::{Deserialize, Serialize};

/// One listed application. Stored in the `apps` collection; the document
/// store permits partial documents, so optional fields default on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRecord {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub apk_url: Option<String>,
    pub icon_url: String,
    pub description: String,
    pub feature_highlights: String,
    pub created_at: i64,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub downloads: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
}

impl AppRecord {
    pub fn has_website(&self) -> bool {
        self.website_url.as_deref().map(|url| !url.is_empty()).unwrap_or(false)
    }

    pub fn has_apk(&self) -> bool {
        self.apk_url.as_deref().map(|url| !url.is_empty()).unwrap_or(false)
    }

    pub fn channel_label(&self) -> &'static str {
        match (self.has_website(), self.has_apk()) {
            (true, true) => "Website & APK",
            (true, false) => "Website",
            (false, true) => "APK",
            (false, false) => "App",
        }
    }
}

/// Stable partition: featured records first, relative order untouched within
/// each group. Input is expected to already be sorted by creation time.
pub fn partition_featured(apps: Vec<AppRecord>) -> Vec<AppRecord> {
    let (mut featured, rest): (Vec<AppRecord>, Vec<AppRecord>) =
        apps.into_iter().partition(|app| app.featured);

    featured.extend(rest);
    featured
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(uuid: &str, created_at: i64, featured: bool) -> AppRecord {
        AppRecord {
            uuid: uuid.to_string(),
            name: format!("App {}", uuid),
            website_url: Some("https://example.com".to_string()),
            apk_url: None,
            icon_url: "https://example.com/icon.png".to_string(),
            description: "A test app".to_string(),
            feature_highlights: "Test features".to_string(),
            created_at,
            version: None,
            downloads: 0,
            tags: Vec::new(),
            screenshots: Vec::new(),
            featured,
            meta_description: None,
            meta_keywords: None,
        }
    }

    #[test]
    fn featured_records_come_first_in_stable_order() {
        let apps = vec![
            record("a", 500, false),
            record("b", 400, true),
            record("c", 300, false),
            record("d", 200, true),
            record("e", 100, false),
        ];

        let ordered: Vec<String> = partition_featured(apps)
            .into_iter()
            .map(|app| app.uuid)
            .collect();

        assert_eq!(ordered, vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn partition_without_featured_keeps_creation_order() {
        let apps = vec![
            record("a", 300, false),
            record("b", 200, false),
            record("c", 100, false),
        ];

        let ordered: Vec<String> = partition_featured(apps)
            .into_iter()
            .map(|app| app.uuid)
            .collect();

        assert_eq!(ordered, vec!["a", "b", "c"]);
    }

    #[test]
    fn partial_document_deserializes_with_defaults() {
        let record: AppRecord = serde_json::from_str(
            r#"{
                "uuid": "u1",
                "name": "Orbit",
                "icon_url": "https://example.com/icon.png",
                "description": "A podcast player",
                "feature_highlights": "Offline sync",
                "created_at": 1700000000000
            }"#,
        )
        .unwrap();

        assert_eq!(record.downloads, 0);
        assert!(!record.featured);
        assert!(record.tags.is_empty());
        assert!(record.website_url.is_none());
        assert_eq!(record.channel_label(), "App");
    }

    #[test]
    fn channel_label_reflects_distribution() {
        let mut record = record("u1", 0, false);
        assert_eq!(record.channel_label(), "Website");

        record.apk_url = Some("https://cdn.example.com/app.apk".to_string());
        assert_eq!(record.channel_label(), "Website & APK");

        record.website_url = None;
        assert_eq!(record.channel_label(), "APK");
    }
}
