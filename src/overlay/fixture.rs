//! Shared setup for overlay tests.

use std::rc::Rc;

use super::{activate, Overlay};
use crate::dom::memory::{MemoryPage, NodeId};
use crate::dom::Page;
use crate::gateway::mock::MockGateway;

pub const TOKEN: &str = "tok-123";

pub struct Fixture {
    pub page: Rc<MemoryPage>,
    pub gateway: Rc<MockGateway>,
    pub overlay: Rc<Overlay<MemoryPage, MockGateway>>,
}

impl Fixture {
    pub fn activate(page: MemoryPage, gateway: MockGateway) -> Self {
        let page = Rc::new(page);
        let gateway = Rc::new(gateway);
        let overlay = activate(page.clone(), gateway.clone(), Default::default())
            .expect("edit mode should be active");
        Self { page, gateway, overlay }
    }
}

/// Page with `?edit=1` and an anti-forgery field
pub fn edit_page() -> MemoryPage {
    let page = MemoryPage::new().with_query("edit", "1");
    let body = page.body();
    let field = page.add(body, "input", &[("type", "hidden"), ("name", "csrfmiddlewaretoken")]);
    page.set_value(&field, TOKEN);
    page
}

pub fn leaf(page: &MemoryPage, id: &str) -> NodeId {
    let body = page.body();
    page.add(
        body,
        "p",
        &[("class", "editor-element"), ("data-element-id", id), ("data-has-children", "false")],
    )
}

pub fn container(page: &MemoryPage, id: &str) -> NodeId {
    let body = page.body();
    page.add(
        body,
        "section",
        &[("class", "editor-element"), ("data-element-id", id), ("data-has-children", "true")],
    )
}

/// The element's control for `action`
pub fn control(page: &MemoryPage, element: NodeId, action: &str) -> NodeId {
    page.find(&element, &format!("editor-{}", action))
        .expect("control should exist")
}
