//! Element API Gateway
//!
//! The four remote calls the overlay makes against the content store.

mod http;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::OverlayResult;
use crate::models::{ConfigForm, ContentProbe, CsrfToken, ElementId, UpdateOutcome};

pub use http::HttpGateway;

/// Remote element operations
///
/// Every non-2xx answer is an error; callers never see a failed status as
/// success.
#[async_trait(?Send)]
pub trait Gateway: 'static {
    /// Check for and fetch the current editable text
    async fn fetch_has_content(&self, id: &ElementId) -> OverlayResult<ContentProbe>;

    async fn update_content(
        &self,
        id: &ElementId,
        content: &str,
        token: &CsrfToken,
    ) -> OverlayResult<UpdateOutcome>;

    /// Fetch the server-rendered configuration form
    async fn fetch_config(&self, id: &ElementId) -> OverlayResult<ConfigForm>;

    async fn delete_element(&self, id: &ElementId, token: &CsrfToken) -> OverlayResult<()>;
}

/// Endpoint paths under the API base
#[derive(Debug, Clone, PartialEq)]
pub struct Routes {
    base: String,
}

impl Routes {
    pub fn new(base: &str) -> Self {
        Self { base: base.trim_end_matches('/').to_string() }
    }

    pub fn has_content(&self, id: &ElementId) -> String {
        self.element(id, "has-content")
    }

    pub fn update_content(&self, id: &ElementId) -> String {
        self.element(id, "update-content")
    }

    pub fn config(&self, id: &ElementId) -> String {
        self.element(id, "config")
    }

    pub fn delete(&self, id: &ElementId) -> String {
        self.element(id, "delete")
    }

    fn element(&self, id: &ElementId, endpoint: &str) -> String {
        let segment = utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC);
        format!("{}/element/{}/{}/", self.base, segment, endpoint)
    }
}
