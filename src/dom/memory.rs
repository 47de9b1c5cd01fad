//! In-Memory Page
//!
//! Test fixture implementing `Page` on a small node arena. Clicks bubble from
//! the target up to the document root, spawned tasks queue until `flush`.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use futures_util::future::LocalBoxFuture;

use super::{ClickHandler, Page, Propagation, SubmitHandler};
use crate::error::OverlayResult;
use crate::models::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<String, String>,
    text: String,
    value: String,
    inner_html: Option<String>,
    click: Vec<ClickHandler<NodeId>>,
    submit: Vec<SubmitHandler<NodeId>>,
}

pub struct MemoryPage {
    nodes: RefCell<Vec<NodeData>>,
    root: NodeId,
    body: NodeId,
    query: RefCell<HashMap<String, String>>,
    confirm_reply: Cell<bool>,
    prompts: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
    notices: RefCell<Vec<Notice>>,
    reloads: Cell<usize>,
    focused: Cell<Option<NodeId>>,
    tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        let root = NodeData { tag: "html".to_string(), ..Default::default() };
        let body = NodeData {
            tag: "body".to_string(),
            parent: Some(NodeId(0)),
            ..Default::default()
        };
        let page = Self {
            nodes: RefCell::new(vec![root, body]),
            root: NodeId(0),
            body: NodeId(1),
            query: RefCell::new(HashMap::new()),
            confirm_reply: Cell::new(true),
            prompts: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
            notices: RefCell::new(Vec::new()),
            reloads: Cell::new(0),
            focused: Cell::new(None),
            tasks: RefCell::new(Vec::new()),
        };
        page.nodes.borrow_mut()[0].children.push(page.body);
        page
    }

    pub fn with_query(self, name: &str, value: &str) -> Self {
        self.query.borrow_mut().insert(name.to_string(), value.to_string());
        self
    }

    pub fn set_confirm_reply(&self, reply: bool) {
        self.confirm_reply.set(reply);
    }

    /// Append `<tag attrs...>` under `parent`
    pub fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_node(tag);
        {
            let mut nodes = self.nodes.borrow_mut();
            for (name, value) in attrs {
                nodes[id.0].attrs.insert(name.to_string(), value.to_string());
            }
        }
        self.attach(parent, id);
        id
    }

    /// Dispatch a click on `target` and let it bubble
    pub fn click(&self, target: NodeId) {
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        for node in path {
            let handlers = self.nodes.borrow()[node.0].click.clone();
            let mut stopped = false;
            for handler in handlers {
                if handler(&target) == Propagation::Stop {
                    stopped = true;
                }
            }
            if stopped {
                break;
            }
        }
    }

    pub fn submit(&self, form: NodeId) {
        let handlers = self.nodes.borrow()[form.0].submit.clone();
        for handler in handlers {
            handler(&form);
        }
    }

    /// Run spawned tasks, including the ones they spawn, to completion
    pub async fn flush(&self) {
        loop {
            let pending: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            if pending.is_empty() {
                break;
            }
            for task in pending {
                task.await;
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0]
            .attrs
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// First descendant carrying `class`
    pub fn find(&self, root: &NodeId, class: &str) -> Option<NodeId> {
        self.descendants(*root)
            .into_iter()
            .find(|node| self.has_class(*node, class))
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    pub fn text(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    pub fn inner_html(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow()[node.0].inner_html.clone()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.get()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    fn create_node(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData { tag: tag.to_string(), ..Default::default() });
        NodeId(nodes.len() - 1)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    fn attach(&self, parent: NodeId, child: NodeId) {
        self.remove(&child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent);
        nodes[parent.0].children.push(child);
    }

    /// Descendants of `root` in document order, `root` excluded
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(nodes[node.0].children.iter().rev().copied());
        }
        out
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn query_param(&self, name: &str) -> Option<String> {
        self.query.borrow().get(name).cloned()
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|node| self.has_class(*node, class))
            .collect()
    }

    fn field_value(&self, name: &str) -> Option<String> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.attribute(node, "name").as_deref() == Some(name))
            .map(|node| self.value(&node))
    }

    fn create_element(&self, tag: &str) -> OverlayResult<NodeId> {
        Ok(self.create_node(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> OverlayResult<()> {
        self.attach(*parent, *child);
        Ok(())
    }

    fn remove(&self, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|child| child != node);
        }
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        let mut current = *node;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn closest(&self, node: &NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(*node);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> OverlayResult<()> {
        self.nodes.borrow_mut()[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.nodes.borrow_mut()[node.0].attrs.remove(name);
    }

    fn add_class(&self, node: &NodeId, class: &str) -> OverlayResult<()> {
        if self.has_class(*node, class) {
            return Ok(());
        }
        let mut nodes = self.nodes.borrow_mut();
        let classes = nodes[node.0].attrs.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        Ok(())
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.nodes.borrow_mut()[node.0].text = text.to_string();
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        self.nodes.borrow_mut()[node.0].inner_html = Some(html.to_string());
    }

    fn value(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].value.clone()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.nodes.borrow_mut()[node.0].value = value.to_string();
    }

    fn focus(&self, node: &NodeId) {
        self.focused.set(Some(*node));
    }

    fn form_entries(&self, form: &NodeId) -> Vec<(String, String)> {
        self.descendants(*form)
            .into_iter()
            .filter_map(|node| Some((self.attribute(&node, "name")?, self.value(&node))))
            .collect()
    }

    fn on_click(&self, node: &NodeId, handler: ClickHandler<NodeId>) -> OverlayResult<()> {
        self.nodes.borrow_mut()[node.0].click.push(handler);
        Ok(())
    }

    fn on_submit(&self, form: &NodeId, handler: SubmitHandler<NodeId>) -> OverlayResult<()> {
        self.nodes.borrow_mut()[form.0].submit.push(handler);
        Ok(())
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.confirm_reply.get()
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}
