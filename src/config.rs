//! Page Configuration
//!
//! Optional JSON embedded by the server page:
//! `<script id="freya-config" type="application/json">{...}</script>`.
//! Every key falls back to its default.

use serde::Deserialize;

const CONFIG_ELEMENT_ID: &str = "freya-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for Freya endpoints (`{api_base}/api/ideas`)
    pub api_base: String,
    /// Prefix for Alice endpoints (`{alice_base}/api/characters`)
    pub alice_base: String,
    /// Items shown in each dashboard list
    pub dashboard_limit: usize,
    /// Notification lifetime
    pub notification_ms: u32,
    /// Description length on cards before truncation
    pub preview_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            alice_base: "/alice".to_string(),
            dashboard_limit: 5,
            notification_ms: 3000,
            preview_chars: 100,
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: AppConfig = serde_json::from_str(raw)?;
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        config.alice_base = config.alice_base.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Pages under the Alice prefix mount the story tool
    pub fn serves_alice(&self, path: &str) -> bool {
        if self.alice_base.is_empty() {
            return false;
        }
        path.strip_prefix(self.alice_base.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Read the page's config element; defaults when absent or invalid
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "invalid page config, using defaults");
                Self::default()
            }),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = AppConfig::from_json(r#"{"dashboard_limit": 8}"#).unwrap();
        assert_eq!(config.dashboard_limit, 8);
        assert_eq!(config.alice_base, "/alice");
        assert_eq!(config.notification_ms, 3000);
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = AppConfig::from_json(r#"{"api_base": "http://localhost:5000/", "alice_base": "/alice/"}"#).unwrap();
        assert_eq!(config.api_base, "http://localhost:5000");
        assert_eq!(config.alice_base, "/alice");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{not json").is_err());
    }

    #[test]
    fn alice_prefix_selects_story_tool() {
        let config = AppConfig::default();
        assert!(config.serves_alice("/alice"));
        assert!(config.serves_alice("/alice/characters"));
        assert!(!config.serves_alice("/"));
        assert!(!config.serves_alice("/tasks"));
        assert!(!config.serves_alice("/alicefoo"));
        assert!(!config.serves_alice("/alice-notes/x"));
    }
}
