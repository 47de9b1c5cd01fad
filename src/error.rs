//! Overlay Errors
//!
//! One error type shared by the gateway, the page layer and the sessions.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// Marked element without a usable `data-element-id`
    #[error("editable element has no element id")]
    MissingElementId,

    #[error("unknown control action `{0}`")]
    UnknownAction(String),

    /// Anti-forgery form field absent or empty at call time
    #[error("anti-forgery token not found on the page")]
    MissingToken,

    #[error("network error: {0}")]
    Transport(String),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("unexpected response: {0}")]
    Decode(String),

    /// Server answered `{"success": false}`
    #[error("the server did not accept the change")]
    Rejected,

    #[error("DOM error: {0}")]
    Dom(String),
}

pub type OverlayResult<T> = Result<T, OverlayError>;
