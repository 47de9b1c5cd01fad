//! Editor Overlay
//!
//! Entry point of the editing tools. `activate` decorates every editable
//! element and wires its controls to one of three flows:
//! - inline text edit (`inline_edit`)
//! - configuration dialog (`config_dialog`)
//! - deletion (`deletion`)
//!
//! Each flow talks to the gateway on its own and handles its own errors.

mod config_dialog;
mod decorator;
mod deletion;
mod inline_edit;
mod sessions;

#[cfg(test)]
mod fixture;

use std::future::Future;
use std::rc::Rc;

use crate::config::OverlayConfig;
use crate::dom::Page;
use crate::error::{OverlayError, OverlayResult};
use crate::gateway::Gateway;
use crate::models::{Action, CsrfToken, ElementId, Notice};
use sessions::Sessions;

/// Live overlay state, shared by every control handler
pub struct Overlay<P: Page, G: Gateway> {
    page: Rc<P>,
    gateway: Rc<G>,
    config: OverlayConfig,
    sessions: Sessions<P::Node>,
}

/// The flag must be exactly `"1"`
pub fn edit_mode_requested(flag: Option<&str>) -> bool {
    flag == Some("1")
}

/// Decorate the page if edit mode was requested
///
/// Returns `None`, leaving the document untouched, when the flag is absent or
/// has any other value.
pub fn activate<P: Page, G: Gateway>(
    page: Rc<P>,
    gateway: Rc<G>,
    config: OverlayConfig,
) -> Option<Rc<Overlay<P, G>>> {
    let flag = page.query_param(&config.edit_param);
    if !edit_mode_requested(flag.as_deref()) {
        tracing::debug!(?flag, "edit mode not requested");
        return None;
    }

    let overlay = Rc::new(Overlay {
        page,
        gateway,
        config,
        sessions: Sessions::new(),
    });
    let decorated = overlay.decorate_all();
    tracing::info!(decorated, "editor overlay activated");
    Some(overlay)
}

impl<P: Page, G: Gateway> Overlay<P, G> {
    fn dispatch(self: &Rc<Self>, action: Action, id: ElementId, element: P::Node, control: P::Node) {
        tracing::debug!(action = action.as_str(), element = %id, "control clicked");
        match action {
            Action::Edit => self.begin_edit(id, element, control),
            Action::Config => self.open_config(id),
            Action::Delete => self.delete_element(id),
        }
    }

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        self.page.spawn(Box::pin(task));
    }

    /// Read fresh for every mutating call
    fn token(&self) -> OverlayResult<CsrfToken> {
        CsrfToken::parse(self.page.field_value(&self.config.csrf_field))
    }

    fn report(&self, context: &str, err: &OverlayError) {
        tracing::warn!(%err, "{}", context);
        self.page.notify(Notice::error(format!("{}: {}", context, err)));
    }

    fn set_disabled(&self, node: &P::Node, disabled: bool) {
        let page = &*self.page;
        if !disabled {
            page.remove_attribute(node, "aria-disabled");
            page.remove_attribute(node, "disabled");
            return;
        }
        let result = page
            .set_attribute(node, "aria-disabled", "true")
            .and_then(|_| page.set_attribute(node, "disabled", ""));
        if let Err(err) = result {
            tracing::warn!(%err, "could not disable control");
        }
    }
}

fn is_disabled<P: Page>(page: &P, node: &P::Node) -> bool {
    page.attribute(node, "aria-disabled").as_deref() == Some("true")
}
