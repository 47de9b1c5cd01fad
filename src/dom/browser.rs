//! Browser Page
//!
//! `Page` over the live document through `web-sys`.

use std::cell::RefCell;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, FormData, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, UrlSearchParams, Window,
};

use super::listeners::Listeners;
use super::{ClickHandler, Page, Propagation, SubmitHandler};
use crate::components::NoticeBoard;
use crate::error::{OverlayError, OverlayResult};
use crate::models::Notice;

pub struct BrowserPage {
    window: Window,
    document: Document,
    body: Element,
    notices: NoticeBoard,
    listeners: Rc<RefCell<Listeners<Element, Closure<dyn Fn(Event)>>>>,
}

impl BrowserPage {
    pub fn new(notices: NoticeBoard) -> OverlayResult<Self> {
        let window = web_sys::window().ok_or_else(|| OverlayError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| OverlayError::Dom("no document".to_string()))?;
        let body: Element = document
            .body()
            .ok_or_else(|| OverlayError::Dom("no body".to_string()))?
            .into();
        Ok(Self {
            window,
            document,
            body,
            notices,
            listeners: Rc::default(),
        })
    }

    fn listen(&self, node: &Element, kind: &str, callback: Closure<dyn Fn(Event)>) -> OverlayResult<()> {
        node.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.listeners.borrow_mut().hold(node.clone(), callback);
        Ok(())
    }
}

fn js_err(err: JsValue) -> OverlayError {
    OverlayError::Dom(format!("{:?}", err))
}

fn class_selector(class: &str) -> String {
    format!(".{}", class)
}

impl Page for BrowserPage {
    type Node = Element;

    fn query_param(&self, name: &str) -> Option<String> {
        let search = self.window.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(name)
    }

    fn body(&self) -> Element {
        self.body.clone()
    }

    fn elements_with_class(&self, class: &str) -> Vec<Element> {
        // The collection is live; snapshot it before decorating
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length()).filter_map(|i| collection.item(i)).collect()
    }

    fn field_value(&self, name: &str) -> Option<String> {
        let field = self
            .document
            .query_selector(&format!("[name=\"{}\"]", name))
            .ok()
            .flatten()?;
        match field.dyn_ref::<HtmlInputElement>() {
            Some(input) => Some(input.value()),
            None => field.get_attribute("value"),
        }
    }

    fn create_element(&self, tag: &str) -> OverlayResult<Element> {
        self.document.create_element(tag).map_err(js_err)
    }

    fn append_child(&self, parent: &Element, child: &Element) -> OverlayResult<()> {
        parent.append_child(child).map(|_| ()).map_err(js_err)
    }

    fn remove(&self, node: &Element) {
        node.remove();
        // Deferred: the handler running right now may be one of the detached ones
        let listeners = Rc::clone(&self.listeners);
        leptos::task::spawn_local(async move {
            let released = listeners.borrow_mut().release_detached(|node| node.is_connected());
            tracing::trace!(released, "listeners released");
        });
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn closest(&self, node: &Element, class: &str) -> Option<Element> {
        node.closest(&class_selector(class)).ok().flatten()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> OverlayResult<()> {
        node.set_attribute(name, value).map_err(js_err)
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn add_class(&self, node: &Element, class: &str) -> OverlayResult<()> {
        node.class_list().add_1(class).map_err(js_err)
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn value(&self, node: &Element) -> String {
        if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else {
            node.text_content().unwrap_or_default()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else {
            node.set_text_content(Some(value));
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn form_entries(&self, form: &Element) -> Vec<(String, String)> {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return Vec::new();
        };
        let Ok(data) = FormData::new_with_form(form) else {
            return Vec::new();
        };
        // File entries have no string value and are left out
        data.entries()
            .into_iter()
            .filter_map(|entry| {
                let pair = js_sys::Array::from(&entry.ok()?);
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn on_click(&self, node: &Element, handler: ClickHandler<Element>) -> OverlayResult<()> {
        let callback = Closure::<dyn Fn(Event)>::new(move |ev: Event| {
            let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if handler(&target) == Propagation::Stop {
                ev.stop_propagation();
            }
        });
        self.listen(node, "click", callback)
    }

    fn on_submit(&self, form: &Element, handler: SubmitHandler<Element>) -> OverlayResult<()> {
        let submitted = form.clone();
        let callback = Closure::<dyn Fn(Event)>::new(move |ev: Event| {
            ev.prevent_default();
            handler(&submitted);
        });
        self.listen(form, "submit", callback)
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn notify(&self, notice: Notice) {
        self.notices.push(notice);
    }

    fn reload(&self) {
        if let Err(err) = self.window.location().reload() {
            tracing::warn!(?err, "page reload failed");
        }
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}
