//! Inline Edit Session
//!
//! `Closed → Fetching → Open → Saving → (reload | Open)`. Cancel from `Open`
//! drops the session without any network call.

use std::rc::Rc;

use super::sessions::{EditorNodes, Ticket};
use super::Overlay;
use crate::dom::{self, Page, Propagation};
use crate::error::{OverlayError, OverlayResult};
use crate::gateway::Gateway;
use crate::models::{ContentProbe, ElementId};

pub(super) const INLINE_CLASS: &str = "editor-inline-edit";
const INPUT_CLASS: &str = "editor-inline-input";
const SAVE_CLASS: &str = "editor-inline-save";
const CANCEL_CLASS: &str = "editor-inline-cancel";

pub(super) const NO_CONTENT: &str = "No editable content found";

/// Covers the element it is appended to
const INLINE_STYLE: &str = "position: absolute; top: 0; left: 0; right: 0; bottom: 0; \
    background: white; z-index: 10002; display: flex; flex-direction: column; \
    padding: 12px; box-sizing: border-box;";

impl<P: Page, G: Gateway> Overlay<P, G> {
    pub(super) fn begin_edit(self: &Rc<Self>, id: ElementId, element: P::Node, control: P::Node) {
        let Some(ticket) = self.sessions.begin_inline(&id, control.clone()) else {
            tracing::debug!(element = %id, "inline edit already in progress");
            return;
        };
        self.set_disabled(&control, true);

        let this = Rc::clone(self);
        self.spawn(async move { this.load_editor(id, element, ticket).await });
    }

    async fn load_editor(self: Rc<Self>, id: ElementId, element: P::Node, ticket: Ticket) {
        let probe = self.gateway.fetch_has_content(&id).await;

        if !self.sessions.inline_is_current(&id, ticket) {
            tracing::debug!(element = %id, "discarding stale content fetch");
            return;
        }
        if !self.page.is_connected(&element) {
            tracing::debug!(element = %id, "element left the page before content arrived");
            self.end_edit(&id);
            return;
        }

        match probe {
            Ok(ContentProbe { has_content: true, content }) => {
                let content = content.unwrap_or_default();
                if let Err(err) = self.open_editor(&id, &element, ticket, &content) {
                    self.end_edit(&id);
                    self.report("Could not open the editor", &err);
                }
            }
            Ok(_) => {
                self.end_edit(&id);
                self.page.alert(NO_CONTENT);
            }
            Err(err) => {
                self.end_edit(&id);
                self.report("Could not load content", &err);
            }
        }
    }

    fn open_editor(
        self: &Rc<Self>,
        id: &ElementId,
        element: &P::Node,
        ticket: Ticket,
        content: &str,
    ) -> OverlayResult<()> {
        let page = &*self.page;

        let container = dom::element(page, "div", INLINE_CLASS)?;
        page.set_attribute(&container, "style", INLINE_STYLE)?;

        let input = dom::element(page, "textarea", INPUT_CLASS)?;
        page.set_attribute(&input, "placeholder", "Edit content...")?;
        page.set_value(&input, content);

        let buttons = dom::element(page, "div", "editor-inline-buttons")?;
        let save = dom::element(page, "button", SAVE_CLASS)?;
        page.set_attribute(&save, "type", "button")?;
        page.set_text(&save, "✅ Save");
        let cancel = dom::element(page, "button", CANCEL_CLASS)?;
        page.set_attribute(&cancel, "type", "button")?;
        page.set_text(&cancel, "❌ Cancel");

        page.append_child(&buttons, &save)?;
        page.append_child(&buttons, &cancel)?;
        page.append_child(&container, &input)?;
        page.append_child(&container, &buttons)?;

        // Nothing inside the editor may reach the element's own handlers
        let this = Rc::clone(self);
        let session_id = id.clone();
        page.on_click(
            &container,
            Rc::new(move |target| {
                if this.page.closest(target, SAVE_CLASS).is_some() {
                    this.save_edit(&session_id);
                } else if this.page.closest(target, CANCEL_CLASS).is_some() {
                    this.cancel_edit(&session_id);
                }
                Propagation::Stop
            }),
        )?;

        let nodes = EditorNodes { container: container.clone(), input: input.clone(), save };
        if !self.sessions.open_inline(id, ticket, nodes) {
            return Err(OverlayError::Dom("inline session is no longer live".to_string()));
        }
        page.append_child(element, &container)?;
        page.focus(&input);
        tracing::debug!(element = %id, "inline editor open");
        Ok(())
    }

    /// Persist the textarea value exactly as typed
    pub(super) fn save_edit(self: &Rc<Self>, id: &ElementId) {
        let token = match self.token() {
            Ok(token) => token,
            Err(err) => {
                self.report("Could not save content", &err);
                return;
            }
        };
        let Some((ticket, nodes)) = self.sessions.start_saving(id) else {
            tracing::debug!(element = %id, "save ignored, session not open");
            return;
        };
        let content = self.page.value(&nodes.input);
        self.set_disabled(&nodes.save, true);

        let this = Rc::clone(self);
        let id = id.clone();
        self.spawn(async move {
            let outcome = this
                .gateway
                .update_content(&id, &content, &token)
                .await
                .and_then(|outcome| if outcome.success { Ok(()) } else { Err(OverlayError::Rejected) });

            match outcome {
                Ok(()) => {
                    if this.sessions.inline_is_current(&id, ticket) {
                        this.end_edit(&id);
                    }
                    tracing::info!(element = %id, "content saved, reloading");
                    this.page.reload();
                }
                Err(err) => {
                    if let Some(nodes) = this.sessions.reopen_inline(&id, ticket) {
                        this.set_disabled(&nodes.save, false);
                        this.page.focus(&nodes.input);
                    }
                    this.report("Could not save content", &err);
                }
            }
        });
    }

    pub(super) fn cancel_edit(&self, id: &ElementId) {
        tracing::debug!(element = %id, "inline edit cancelled");
        self.end_edit(id);
    }

    /// Drop the session, remove its editor and re-enable the edit control
    fn end_edit(&self, id: &ElementId) {
        let Some(session) = self.sessions.end_inline(id) else {
            return;
        };
        if let Some(nodes) = session.nodes() {
            self.page.remove(&nodes.container);
        }
        self.set_disabled(&session.control, false);
    }
}
