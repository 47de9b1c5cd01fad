//! Deletion Flow
//!
//! Confirm, POST, and reload only once the server answered 2xx.

use std::rc::Rc;

use super::Overlay;
use crate::dom::Page;
use crate::gateway::Gateway;
use crate::models::ElementId;

pub(super) const DELETE_PROMPT: &str = "🗑️ Delete this element? This cannot be undone.";

impl<P: Page, G: Gateway> Overlay<P, G> {
    pub(super) fn delete_element(self: &Rc<Self>, id: ElementId) {
        if self.sessions.is_deleting(&id) {
            tracing::debug!(element = %id, "delete already in flight");
            return;
        }
        if !self.page.confirm(DELETE_PROMPT) {
            tracing::debug!(element = %id, "delete declined");
            return;
        }
        let token = match self.token() {
            Ok(token) => token,
            Err(err) => {
                self.report("Could not delete element", &err);
                return;
            }
        };
        self.sessions.begin_delete(&id);

        let this = Rc::clone(self);
        self.spawn(async move {
            match this.gateway.delete_element(&id, &token).await {
                Ok(()) => {
                    tracing::info!(element = %id, "element deleted, reloading");
                    this.page.reload();
                }
                Err(err) => {
                    this.sessions.end_delete(&id);
                    this.report("Could not delete element", &err);
                }
            }
        });
    }
}
