//! Session Registry
//!
//! Explicit liveness for every in-progress interaction. Async continuations
//! hold a ticket and only touch the DOM while that ticket is still current.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use crate::models::ElementId;

pub(crate) type Ticket = u64;

/// Nodes of an open inline editor
#[derive(Debug, Clone)]
pub(crate) struct EditorNodes<N> {
    pub container: N,
    pub input: N,
    pub save: N,
}

#[derive(Debug)]
pub(crate) enum InlinePhase<N> {
    /// Content request in flight, nothing rendered yet
    Fetching,
    Open(EditorNodes<N>),
    Saving(EditorNodes<N>),
}

#[derive(Debug)]
pub(crate) struct InlineSession<N> {
    pub ticket: Ticket,
    /// The element's edit control, disabled while the session lives
    pub control: N,
    pub phase: InlinePhase<N>,
}

impl<N> InlineSession<N> {
    pub fn nodes(&self) -> Option<&EditorNodes<N>> {
        match &self.phase {
            InlinePhase::Fetching => None,
            InlinePhase::Open(nodes) | InlinePhase::Saving(nodes) => Some(nodes),
        }
    }
}

/// Page-scoped configuration dialog
#[derive(Debug)]
pub(crate) enum DialogState<N> {
    Closed,
    Fetching { ticket: Ticket, id: ElementId },
    Open { ticket: Ticket, id: ElementId, backdrop: N },
}

pub(crate) struct Sessions<N> {
    next_ticket: Cell<Ticket>,
    inline: RefCell<HashMap<ElementId, InlineSession<N>>>,
    dialog: RefCell<DialogState<N>>,
    deleting: RefCell<HashSet<ElementId>>,
}

impl<N: Clone> Sessions<N> {
    pub fn new() -> Self {
        Self {
            next_ticket: Cell::new(1),
            inline: RefCell::new(HashMap::new()),
            dialog: RefCell::new(DialogState::Closed),
            deleting: RefCell::new(HashSet::new()),
        }
    }

    fn ticket(&self) -> Ticket {
        let ticket = self.next_ticket.get();
        self.next_ticket.set(ticket + 1);
        ticket
    }

    // ========================
    // Inline edit
    // ========================

    /// `None` while the element already has a session
    pub fn begin_inline(&self, id: &ElementId, control: N) -> Option<Ticket> {
        let mut inline = self.inline.borrow_mut();
        if inline.contains_key(id) {
            return None;
        }
        let ticket = self.ticket();
        inline.insert(
            id.clone(),
            InlineSession { ticket, control, phase: InlinePhase::Fetching },
        );
        Some(ticket)
    }

    pub fn inline_is_current(&self, id: &ElementId, ticket: Ticket) -> bool {
        self.inline
            .borrow()
            .get(id)
            .is_some_and(|session| session.ticket == ticket)
    }

    /// Fetching → Open
    pub fn open_inline(&self, id: &ElementId, ticket: Ticket, nodes: EditorNodes<N>) -> bool {
        match self.inline.borrow_mut().get_mut(id) {
            Some(session)
                if session.ticket == ticket && matches!(session.phase, InlinePhase::Fetching) =>
            {
                session.phase = InlinePhase::Open(nodes);
                true
            }
            _ => false,
        }
    }

    /// Open → Saving; `None` unless the session is open
    pub fn start_saving(&self, id: &ElementId) -> Option<(Ticket, EditorNodes<N>)> {
        let mut inline = self.inline.borrow_mut();
        let session = inline.get_mut(id)?;
        let InlinePhase::Open(nodes) = &session.phase else {
            return None;
        };
        let nodes = nodes.clone();
        session.phase = InlinePhase::Saving(nodes.clone());
        Some((session.ticket, nodes))
    }

    /// Saving → Open after a failed save
    pub fn reopen_inline(&self, id: &ElementId, ticket: Ticket) -> Option<EditorNodes<N>> {
        let mut inline = self.inline.borrow_mut();
        let session = inline.get_mut(id).filter(|session| session.ticket == ticket)?;
        let InlinePhase::Saving(nodes) = &session.phase else {
            return None;
        };
        let nodes = nodes.clone();
        session.phase = InlinePhase::Open(nodes.clone());
        Some(nodes)
    }

    pub fn end_inline(&self, id: &ElementId) -> Option<InlineSession<N>> {
        self.inline.borrow_mut().remove(id)
    }

    #[cfg(test)]
    pub fn inline_count(&self) -> usize {
        self.inline.borrow().len()
    }

    // ========================
    // Configuration dialog
    // ========================

    /// `None` unless the dialog is closed
    pub fn begin_dialog(&self, id: &ElementId) -> Option<Ticket> {
        let mut dialog = self.dialog.borrow_mut();
        if !matches!(*dialog, DialogState::Closed) {
            return None;
        }
        let ticket = self.ticket();
        *dialog = DialogState::Fetching { ticket, id: id.clone() };
        Some(ticket)
    }

    pub fn dialog_is_current(&self, ticket: Ticket) -> bool {
        match &*self.dialog.borrow() {
            DialogState::Closed => false,
            DialogState::Fetching { ticket: current, .. }
            | DialogState::Open { ticket: current, .. } => *current == ticket,
        }
    }

    /// Fetching → Open
    pub fn open_dialog(&self, ticket: Ticket, backdrop: N) -> bool {
        let mut dialog = self.dialog.borrow_mut();
        match &*dialog {
            DialogState::Fetching { ticket: current, id } if *current == ticket => {
                let id = id.clone();
                *dialog = DialogState::Open { ticket, id, backdrop };
                true
            }
            _ => false,
        }
    }

    pub fn dialog_id(&self) -> Option<ElementId> {
        match &*self.dialog.borrow() {
            DialogState::Closed => None,
            DialogState::Fetching { id, .. } | DialogState::Open { id, .. } => Some(id.clone()),
        }
    }

    /// Back to Closed; returns the backdrop if one was rendered
    pub fn close_dialog(&self) -> Option<N> {
        match self.dialog.replace(DialogState::Closed) {
            DialogState::Open { backdrop, .. } => Some(backdrop),
            _ => None,
        }
    }

    // ========================
    // Deletion
    // ========================

    pub fn is_deleting(&self, id: &ElementId) -> bool {
        self.deleting.borrow().contains(id)
    }

    pub fn begin_delete(&self, id: &ElementId) -> bool {
        self.deleting.borrow_mut().insert(id.clone())
    }

    pub fn end_delete(&self, id: &ElementId) {
        self.deleting.borrow_mut().remove(id);
    }
}
