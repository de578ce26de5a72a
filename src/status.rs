use std::borrow::Cow;

use crate::{
    capability::{CapabilityState, UnsupportedReason},
    session::{SessionFailure, SessionState},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Status {
    Unsupported(UnsupportedReason),
    ReadyToEnter,
    /// Also covers a pending entry (`SessionState::Requesting`), so the entry
    /// action stays hidden while the platform prompts the user.
    Searching,
    Anchored,
    SessionFailed(SessionFailure),
}

/// Precedence: a live (or pending) session decides first, then the last entry
/// failure, then the capability.
pub fn project(capability: CapabilityState, session: &SessionState, anchored: bool) -> Status {
    match session {
        SessionState::Active if anchored => Status::Anchored,
        SessionState::Active | SessionState::Requesting => Status::Searching,
        SessionState::Failed(failure) => Status::SessionFailed(failure.clone()),
        SessionState::Idle | SessionState::Ended => match capability {
            CapabilityState::Unsupported(reason) => Status::Unsupported(reason),
            CapabilityState::Unknown | CapabilityState::Supported => Status::ReadyToEnter,
        },
    }
}

impl Status {
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Self::Unsupported(UnsupportedReason::ApiUnavailable) => {
                "WebXR is not available in this browser.".into()
            }
            Self::Unsupported(UnsupportedReason::NotSupported) => {
                "WebXR AR is not supported on this device.".into()
            }
            Self::Unsupported(UnsupportedReason::CheckFailed) => {
                "Unable to check WebXR support.".into()
            }
            Self::ReadyToEnter => "Point at your painting".into(),
            Self::Searching => "Looking for painting...".into(),
            Self::Anchored => "Painting detected!".into(),
            Self::SessionFailed(failure) => {
                format!("Failed to enter AR: {}", failure.message).into()
            }
        }
    }

    /// Only a host without any AR API disables entry outright; a negative or
    /// failed support check still lets the user try.
    pub fn entry_enabled(&self) -> bool {
        match self {
            Self::Unsupported(reason) => *reason != UnsupportedReason::ApiUnavailable,
            Self::ReadyToEnter | Self::SessionFailed(_) => true,
            Self::Searching | Self::Anchored => false,
        }
    }

    pub fn in_session(&self) -> bool {
        matches!(self, Self::Searching | Self::Anchored)
    }
}
