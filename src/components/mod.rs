//! UI Components
//!
//! Leptos components rendered next to the decorated page.

mod notices;

pub use notices::{NoticeBoard, NoticeStack};
