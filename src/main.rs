//! Editor Overlay Entry Point
//!
//! Loaded on every page; does nothing unless the URL carries `?edit=1`.

mod components;
mod config;
mod dom;
mod error;
mod gateway;
mod models;
mod overlay;

use std::rc::Rc;

use leptos::prelude::*;

use components::{NoticeBoard, NoticeStack};
use config::{OverlayConfig, CONFIG_SCRIPT_ID};
use dom::BrowserPage;
use gateway::HttpGateway;

fn config_block() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_SCRIPT_ID)?
        .text_content()
}

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    // The module runs after the document has been parsed
    let config = OverlayConfig::from_block(config_block());
    let board = NoticeBoard::new(config.notice_timeout_ms);
    let page = match BrowserPage::new(board) {
        Ok(page) => Rc::new(page),
        Err(err) => {
            tracing::error!(%err, "editor overlay unavailable");
            return;
        }
    };
    let gateway = Rc::new(HttpGateway::new(&config));

    if overlay::activate(page, gateway, config).is_some() {
        mount_to_body(move || view! { <NoticeStack board=board /> });
    }
}
