//! Page Abstraction
//!
//! The DOM is the only shared mutable resource of the overlay and it has a
//! single writer, the UI thread. Every component mutates it through this
//! trait, so the same session code drives the browser (`BrowserPage`) and the
//! in-memory fixture used by the unit tests.

mod browser;
mod listeners;
#[cfg(test)]
pub mod memory;

use std::fmt;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;

use crate::error::OverlayResult;
use crate::models::Notice;

pub use browser::BrowserPage;

/// Whether a click keeps bubbling after a handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Receives the original click target
pub type ClickHandler<N> = Rc<dyn Fn(&N) -> Propagation>;
/// Receives the submitted form; default navigation is always prevented
pub type SubmitHandler<N> = Rc<dyn Fn(&N)>;

pub trait Page: 'static {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    // ========================
    // Document
    // ========================

    fn query_param(&self, name: &str) -> Option<String>;
    fn body(&self) -> Self::Node;
    /// Elements carrying `class`, in document order
    fn elements_with_class(&self, class: &str) -> Vec<Self::Node>;
    /// Current value of the first form field named `name`
    fn field_value(&self, name: &str) -> Option<String>;

    // ========================
    // Tree
    // ========================

    fn create_element(&self, tag: &str) -> OverlayResult<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> OverlayResult<()>;
    fn remove(&self, node: &Self::Node);
    fn is_connected(&self, node: &Self::Node) -> bool;
    /// Nearest inclusive ancestor carrying `class`
    fn closest(&self, node: &Self::Node, class: &str) -> Option<Self::Node>;

    // ========================
    // Attributes & content
    // ========================

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> OverlayResult<()>;
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    fn add_class(&self, node: &Self::Node, class: &str) -> OverlayResult<()>;
    fn set_text(&self, node: &Self::Node, text: &str);
    /// Trusted server markup only
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    // ========================
    // Form controls
    // ========================

    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);
    fn focus(&self, node: &Self::Node);
    fn form_entries(&self, form: &Self::Node) -> Vec<(String, String)>;

    // ========================
    // Events
    // ========================

    fn on_click(&self, node: &Self::Node, handler: ClickHandler<Self::Node>) -> OverlayResult<()>;
    fn on_submit(&self, form: &Self::Node, handler: SubmitHandler<Self::Node>) -> OverlayResult<()>;

    // ========================
    // Window
    // ========================

    /// Blocking yes/no prompt
    fn confirm(&self, message: &str) -> bool;
    /// Blocking acknowledgement
    fn alert(&self, message: &str);
    /// Non-blocking notice
    fn notify(&self, notice: Notice);
    fn reload(&self);
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Create `<tag class="...">` in one step
pub fn element<P: Page + ?Sized>(page: &P, tag: &str, class: &str) -> OverlayResult<P::Node> {
    let node = page.create_element(tag)?;
    page.set_attribute(&node, "class", class)?;
    Ok(node)
}
