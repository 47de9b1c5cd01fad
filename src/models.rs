//! Overlay Models
//!
//! Identifiers, control actions and the JSON shapes of the element API.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::OverlayError;

/// Opaque element identifier assigned by the page template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    /// Blank ids are rejected; anything else is kept exactly as written
    pub fn parse(raw: Option<&str>) -> Result<Self, OverlayError> {
        match raw {
            Some(id) if !id.trim().is_empty() => Ok(Self(id.to_string())),
            _ => Err(OverlayError::MissingElementId),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Control affordance, parsed from `data-action`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Config,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Edit => "edit",
            Action::Config => "config",
            Action::Delete => "delete",
        }
    }

    /// Affordances offered for an element; containers are not text-editable
    pub fn for_element(has_children: bool) -> &'static [Action] {
        if has_children {
            &[Action::Config, Action::Delete]
        } else {
            &[Action::Edit, Action::Config, Action::Delete]
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Action::Edit => "Edit content",
            Action::Config => "Configure",
            Action::Delete => "Delete",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Action::Edit => "📝",
            Action::Config => "⚙️",
            Action::Delete => "🗑️",
        }
    }
}

impl FromStr for Action {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit" => Ok(Action::Edit),
            "config" => Ok(Action::Config),
            "delete" => Ok(Action::Delete),
            other => Err(OverlayError::UnknownAction(other.to_string())),
        }
    }
}

/// Anti-forgery token, read from the page right before each mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn parse(raw: Option<String>) -> Result<Self, OverlayError> {
        match raw {
            Some(value) if !value.is_empty() => Ok(Self(value)),
            _ => Err(OverlayError::MissingToken),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ========================
// API Responses
// ========================

/// `GET element/{id}/has-content/`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentProbe {
    pub has_content: bool,
    #[serde(default)]
    pub content: Option<String>,
}

/// `POST element/{id}/update-content/`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UpdateOutcome {
    pub success: bool,
}

/// `GET element/{id}/config/`
///
/// The echoed `id` is not read; the dialog keys on the clicked element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigForm {
    #[serde(default, rename = "type")]
    pub element_type: Option<String>,
    #[serde(default)]
    pub form_html: Option<String>,
}

// ========================
// Notices
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}
