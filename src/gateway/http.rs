//! HTTP Gateway
//!
//! `Gateway` over the browser's fetch API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::{Gateway, Routes};
use crate::config::OverlayConfig;
use crate::error::{OverlayError, OverlayResult};
use crate::models::{ConfigForm, ContentProbe, CsrfToken, ElementId, UpdateOutcome};

#[derive(Serialize)]
struct UpdateContentBody<'a> {
    content: &'a str,
}

pub struct HttpGateway {
    routes: Routes,
    csrf_header: String,
}

impl HttpGateway {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            routes: Routes::new(&config.api_base),
            csrf_header: config.csrf_header.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> OverlayResult<T> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        let response = send(url, &opts).await?;
        read_json(&response).await
    }

    async fn post(
        &self,
        url: &str,
        body: Option<String>,
        token: &CsrfToken,
    ) -> OverlayResult<Response> {
        let headers = Headers::new().map_err(transport)?;
        headers
            .set(&self.csrf_header, token.as_str())
            .map_err(transport)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        if let Some(body) = body {
            headers
                .set("Content-Type", "application/json")
                .map_err(transport)?;
            opts.set_body(&JsValue::from_str(&body));
        }
        opts.set_headers(&headers);
        send(url, &opts).await
    }
}

fn transport(err: JsValue) -> OverlayError {
    OverlayError::Transport(format!("{:?}", err))
}

/// Issue the request and reject any non-2xx status
async fn send(url: &str, opts: &RequestInit) -> OverlayResult<Response> {
    let request = Request::new_with_str_and_init(url, opts).map_err(transport)?;
    let window = web_sys::window().ok_or_else(|| OverlayError::Transport("no window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| OverlayError::Decode("response is not a Response".to_string()))?;

    check_status(response.ok(), response.status())?;
    Ok(response)
}

/// Only a 2xx counts as success, whatever the body says
fn check_status(ok: bool, status: u16) -> OverlayResult<()> {
    if ok {
        Ok(())
    } else {
        Err(OverlayError::Status(status))
    }
}

async fn read_json<T: DeserializeOwned>(response: &Response) -> OverlayResult<T> {
    let promise = response
        .json()
        .map_err(|e| OverlayError::Decode(format!("{:?}", e)))?;
    let json = JsFuture::from(promise)
        .await
        .map_err(|e| OverlayError::Decode(format!("{:?}", e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| OverlayError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn fetch_has_content(&self, id: &ElementId) -> OverlayResult<ContentProbe> {
        self.get_json(&self.routes.has_content(id)).await
    }

    async fn update_content(
        &self,
        id: &ElementId,
        content: &str,
        token: &CsrfToken,
    ) -> OverlayResult<UpdateOutcome> {
        let body = serde_json::to_string(&UpdateContentBody { content })
            .map_err(|e| OverlayError::Decode(e.to_string()))?;
        let response = self.post(&self.routes.update_content(id), Some(body), token).await?;
        read_json(&response).await
    }

    async fn fetch_config(&self, id: &ElementId) -> OverlayResult<ConfigForm> {
        self.get_json(&self.routes.config(id)).await
    }

    async fn delete_element(&self, id: &ElementId, token: &CsrfToken) -> OverlayResult<()> {
        self.post(&self.routes.delete(id), None, token).await?;
        Ok(())
    }
}
