use serde::{Deserialize, Serialize};

/// Singleton site branding document. Every field is optional in the store;
/// readers substitute the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub login_enabled: Option<bool>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,

    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl SiteSettings {
    pub fn site_name(&self) -> &str {
        match self.site_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "App Showcase",
        }
    }

    pub fn tagline(&self) -> &str {
        match self.tagline.as_deref() {
            Some(tagline) if !tagline.is_empty() => tagline,
            _ => "Discover the latest and greatest apps and websites, curated just for you.",
        }
    }

    pub fn login_enabled(&self) -> bool {
        self.login_enabled.unwrap_or(true)
    }
}

/// Singleton ad configuration: one ad network key per public page slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdSettings {
    #[serde(default)]
    pub home_page_ad_key: Option<String>,
    #[serde(default)]
    pub app_detail_page_ad_key: Option<String>,

    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl AdSettings {
    pub fn home_page_ad_key(&self) -> Option<&str> {
        non_empty(self.home_page_ad_key.as_deref())
    }

    pub fn app_detail_page_ad_key(&self) -> Option<&str> {
        non_empty(self.app_detail_page_ad_key.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_reads_with_defaults() {
        let settings: SiteSettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings.site_name(), "App Showcase");
        assert!(settings.login_enabled());
        assert!(settings.icon_url.is_none());
    }

    #[test]
    fn stored_values_win_over_defaults() {
        let settings: SiteSettings = serde_json::from_str(
            r#"{ "site_name": "MyAppStore", "login_enabled": false }"#,
        )
        .unwrap();

        assert_eq!(settings.site_name(), "MyAppStore");
        assert!(!settings.login_enabled());
    }

    #[test]
    fn blank_ad_keys_read_as_absent() {
        let settings: AdSettings = serde_json::from_str(
            r#"{ "home_page_ad_key": "   ", "app_detail_page_ad_key": "abc123" }"#,
        )
        .unwrap();

        assert!(settings.home_page_ad_key().is_none());
        assert_eq!(settings.app_detail_page_ad_key(), Some("abc123"));
    }
}
