//! Notice Stack Component
//!
//! Non-blocking operator notices. Each one dismisses itself after a timeout
//! or when clicked.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::{Notice, NoticeLevel};

#[derive(Debug, Clone, PartialEq)]
pub struct PostedNotice {
    pub id: u32,
    pub notice: Notice,
}

/// Reactive list of visible notices
#[derive(Clone, Copy)]
pub struct NoticeBoard {
    notices: RwSignal<Vec<PostedNotice>>,
    next_id: StoredValue<u32>,
    timeout_ms: u32,
}

impl NoticeBoard {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            timeout_ms,
        }
    }

    pub fn push(&self, notice: Notice) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.notices.update(|list| list.push(PostedNotice { id, notice }));

        let board = *self;
        spawn_local(async move {
            TimeoutFuture::new(board.timeout_ms).await;
            board.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.notices.update(|list| list.retain(|posted| posted.id != id));
    }
}

const STACK_STYLE: &str = "position: fixed; top: 12px; right: 12px; z-index: 10003; \
    display: flex; flex-direction: column; gap: 8px; max-width: 360px;";

#[component]
pub fn NoticeStack(board: NoticeBoard) -> impl IntoView {
    view! {
        <div class="editor-notices" style=STACK_STYLE>
            <For
                each=move || board.notices.get()
                key=|posted| posted.id
                children=move |posted| {
                    let id = posted.id;
                    let class = match posted.notice.level {
                        NoticeLevel::Info => "editor-notice info",
                        NoticeLevel::Error => "editor-notice error",
                    };
                    view! {
                        <div class=class role="status" on:click=move |_| board.dismiss(id)>
                            {posted.notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
