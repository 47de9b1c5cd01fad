//! Configuration Dialog Session
//!
//! A page-scoped modal holding the server-rendered configuration form. The
//! form is not persisted yet: submitting logs the fields and closes.

use std::rc::Rc;

use super::sessions::Ticket;
use super::Overlay;
use crate::dom::{self, Page, Propagation};
use crate::error::OverlayResult;
use crate::gateway::Gateway;
use crate::models::{ConfigForm, ElementId, Notice};

pub(super) const MODAL_CLASS: &str = "editor-modal";
const CONTENT_CLASS: &str = "editor-modal-content";
/// Carried by the × and Cancel buttons
const DISMISS_CLASS: &str = "editor-modal-dismiss";

pub(super) const PLACEHOLDER: &str = "<p>Configuration coming soon...</p>";
pub(super) const NOT_SAVED: &str = "Configuration changes are not saved yet";

impl<P: Page, G: Gateway> Overlay<P, G> {
    pub(super) fn open_config(self: &Rc<Self>, id: ElementId) {
        let Some(ticket) = self.sessions.begin_dialog(&id) else {
            tracing::debug!(element = %id, "configuration dialog already open");
            return;
        };
        let this = Rc::clone(self);
        self.spawn(async move {
            let form = this.gateway.fetch_config(&id).await;
            if !this.sessions.dialog_is_current(ticket) {
                tracing::debug!(element = %id, "discarding stale configuration fetch");
                return;
            }
            if let Err(err) = form.and_then(|form| this.render_dialog(&id, ticket, &form)) {
                this.close_dialog();
                this.report("Could not load configuration", &err);
            }
        });
    }

    fn render_dialog(self: &Rc<Self>, id: &ElementId, ticket: Ticket, form: &ConfigForm) -> OverlayResult<()> {
        let page = &*self.page;

        let backdrop = dom::element(page, "div", MODAL_CLASS)?;
        let content = dom::element(page, "div", CONTENT_CLASS)?;

        let header = dom::element(page, "div", "editor-modal-header")?;
        let title = dom::element(page, "h3", "editor-modal-title")?;
        let heading = match &form.element_type {
            Some(kind) => format!("⚙️ Configure Element #{} ({})", id, kind),
            None => format!("⚙️ Configure Element #{}", id),
        };
        page.set_text(&title, &heading);
        let close = dom::element(page, "button", &format!("editor-modal-close {}", DISMISS_CLASS))?;
        page.set_attribute(&close, "type", "button")?;
        page.set_attribute(&close, "title", "Close")?;
        page.set_text(&close, "×");
        page.append_child(&header, &title)?;
        page.append_child(&header, &close)?;

        let form_node = dom::element(page, "form", "editor-config-form")?;
        page.set_attribute(&form_node, "id", &format!("config-form-{}", id))?;
        let body = dom::element(page, "div", "editor-modal-body")?;
        page.set_inner_html(&body, form.form_html.as_deref().unwrap_or(PLACEHOLDER));

        let footer = dom::element(page, "div", "editor-modal-footer")?;
        let cancel = dom::element(page, "button", &format!("editor-modal-cancel {}", DISMISS_CLASS))?;
        page.set_attribute(&cancel, "type", "button")?;
        page.set_text(&cancel, "Cancel");
        let save = dom::element(page, "button", "editor-modal-save")?;
        page.set_attribute(&save, "type", "submit")?;
        page.set_text(&save, "Save");
        page.append_child(&footer, &cancel)?;
        page.append_child(&footer, &save)?;

        page.append_child(&form_node, &body)?;
        page.append_child(&form_node, &footer)?;
        page.append_child(&content, &header)?;
        page.append_child(&content, &form_node)?;
        page.append_child(&backdrop, &content)?;

        let this = Rc::clone(self);
        page.on_click(
            &backdrop,
            Rc::new(move |_| {
                this.close_dialog();
                Propagation::Continue
            }),
        )?;

        // Content clicks never reach the backdrop
        let this = Rc::clone(self);
        page.on_click(
            &content,
            Rc::new(move |target| {
                if this.page.closest(target, DISMISS_CLASS).is_some() {
                    this.close_dialog();
                }
                Propagation::Stop
            }),
        )?;

        let this = Rc::clone(self);
        page.on_submit(&form_node, Rc::new(move |submitted| this.submit_config(submitted)))?;

        if self.sessions.open_dialog(ticket, backdrop.clone()) {
            page.append_child(&page.body(), &backdrop)?;
            tracing::debug!(element = %id, "configuration dialog open");
        }
        Ok(())
    }

    /// No persist endpoint exists for configuration; the submission is
    /// logged and dropped.
    fn submit_config(&self, form: &P::Node) {
        let fields = self.page.form_entries(form);
        let id = self.sessions.dialog_id();
        tracing::info!(element = ?id, ?fields, "configuration submitted, not persisted");
        self.page.notify(Notice::info(NOT_SAVED));
        self.close_dialog();
    }

    fn close_dialog(&self) {
        if let Some(backdrop) = self.sessions.close_dialog() {
            self.page.remove(&backdrop);
            tracing::debug!("configuration dialog closed");
        }
    }
}
