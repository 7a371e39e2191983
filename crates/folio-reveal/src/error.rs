//! Error taxonomy for the reveal layer.
//!
//! None of these are fatal: registration records them on the session and
//! carries on, and parse failures fall back to defaults at the call site.

use thiserror::Error;

use crate::types::TargetId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RevealError {
    /// The entry's target was not attached to the page at registration time.
    #[error("reveal target `{target}` is not attached")]
    TargetMissing { target: TargetId },

    /// The shared trigger element for an entry could not be resolved.
    #[error("trigger element `{trigger}` for `{target}` is not attached")]
    TriggerMissing { trigger: TargetId, target: TargetId },

    #[error("unknown easing `{name}`")]
    UnknownEasing { name: String },

    #[error("invalid trigger position `{position}`")]
    InvalidTriggerPosition { position: String },

    #[error("invalid toggle actions `{actions}`")]
    InvalidToggleActions { actions: String },
}

impl RevealError {
    /// The element the error refers to, if any.
    pub fn target(&self) -> Option<&TargetId> {
        match self {
            Self::TargetMissing { target } | Self::TriggerMissing { target, .. } => Some(target),
            _ => None,
        }
    }
}
