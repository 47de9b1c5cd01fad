//! Overlay Decorator
//!
//! Appends a border and a controls cluster to each editable element. The
//! element itself is never replaced, so its id linkage survives decoration.

use std::rc::Rc;

use super::{is_disabled, Overlay};
use crate::dom::{self, Page, Propagation};
use crate::error::OverlayResult;
use crate::gateway::Gateway;
use crate::models::{Action, ElementId};

pub(super) const CONTROLS_CLASS: &str = "editor-controls";
pub(super) const CONTROL_CLASS: &str = "editor-control";

/// Editable element as marked up by the page template
#[derive(Debug, Clone)]
pub struct AnnotatedElement<N> {
    pub node: N,
    pub id: ElementId,
    /// Containers get configure and delete only
    pub has_children: bool,
}

impl<N: Clone> AnnotatedElement<N> {
    pub fn read<P: Page<Node = N>>(page: &P, node: N) -> OverlayResult<Self> {
        let id = ElementId::parse(page.attribute(&node, "data-element-id").as_deref())?;
        let has_children = page.attribute(&node, "data-has-children").as_deref() == Some("true");
        Ok(Self { node, id, has_children })
    }
}

impl<P: Page, G: Gateway> Overlay<P, G> {
    /// Returns how many elements were decorated
    pub(super) fn decorate_all(self: &Rc<Self>) -> usize {
        let nodes = self.page.elements_with_class(&self.config.marker_class);
        let mut decorated = 0;
        for (index, node) in nodes.into_iter().enumerate() {
            let element = match AnnotatedElement::read(&*self.page, node) {
                Ok(element) => element,
                Err(err) => {
                    tracing::warn!(index, %err, "skipping editable element");
                    continue;
                }
            };
            match self.decorate(index, &element) {
                Ok(()) => decorated += 1,
                Err(err) => tracing::warn!(index, element = %element.id, %err, "decoration failed"),
            }
        }
        decorated
    }

    fn decorate(self: &Rc<Self>, index: usize, element: &AnnotatedElement<P::Node>) -> OverlayResult<()> {
        let page = &*self.page;
        page.add_class(&element.node, &format!("editor-el-{}", index))?;

        let variant = if element.has_children { "non-leaf" } else { "leaf" };
        let border = dom::element(page, "div", &format!("editor-border {}", variant))?;
        page.append_child(&element.node, &border)?;

        let controls = dom::element(page, "div", CONTROLS_CLASS)?;
        for action in Action::for_element(element.has_children) {
            let class = format!("{} editor-{}", CONTROL_CLASS, action.as_str());
            let control = dom::element(page, "div", &class)?;
            page.set_attribute(&control, "title", action.title())?;
            page.set_attribute(&control, "data-action", action.as_str())?;
            page.set_attribute(&control, "data-id", element.id.as_str())?;
            page.set_text(&control, action.icon());
            page.append_child(&controls, &control)?;
        }

        // One handler for the whole cluster
        let overlay = Rc::clone(self);
        let node = element.node.clone();
        page.on_click(
            &controls,
            Rc::new(move |target| {
                overlay.on_control_click(&node, target);
                Propagation::Stop
            }),
        )?;
        page.append_child(&element.node, &controls)
    }

    fn on_control_click(self: &Rc<Self>, element: &P::Node, target: &P::Node) {
        let page = &*self.page;
        let Some(control) = page.closest(target, CONTROL_CLASS) else {
            return;
        };
        if is_disabled(page, &control) {
            tracing::debug!("control is disabled");
            return;
        }

        let raw = page.attribute(&control, "data-action").unwrap_or_default();
        let action = match raw.parse::<Action>() {
            Ok(action) => action,
            Err(err) => {
                tracing::warn!(%err, "ignoring control click");
                return;
            }
        };
        let id = match ElementId::parse(page.attribute(&control, "data-id").as_deref()) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(%err, "ignoring control click");
                return;
            }
        };
        self.dispatch(action, id, element.clone(), control);
    }
}
