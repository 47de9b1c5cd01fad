//! Overlay Configuration
//!
//! Every field has a default matching the stock page templates. A page may
//! override any subset through a JSON block:
//!
//! ```html
//! <script type="application/json" id="editor-overlay-config">
//!   {"api_base": "/cms/api"}
//! </script>
//! ```

use serde::Deserialize;

/// Id of the optional JSON config block
pub const CONFIG_SCRIPT_ID: &str = "editor-overlay-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Prefix of all element endpoints, without trailing slash
    pub api_base: String,
    /// Query parameter that must equal `"1"` for the overlay to engage
    pub edit_param: String,
    /// Class carried by every editable element
    pub marker_class: String,
    /// Name of the form field holding the anti-forgery token
    pub csrf_field: String,
    /// Request header the token is sent in
    pub csrf_header: String,
    pub notice_timeout_ms: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            api_base: "/landing/api".to_string(),
            edit_param: "edit".to_string(),
            marker_class: "editor-element".to_string(),
            csrf_field: "csrfmiddlewaretoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            notice_timeout_ms: 5000,
        }
    }
}

impl OverlayConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(text)?;
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Load from the page's config block, falling back to defaults
    pub fn from_block(text: Option<String>) -> Self {
        match text {
            Some(text) => Self::from_json(&text).unwrap_or_else(|err| {
                tracing::warn!(%err, "invalid overlay config block, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
