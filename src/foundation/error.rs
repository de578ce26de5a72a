pub type ArResult<T> = Result<T, ArError>;

#[derive(thiserror::Error, Debug)]
pub enum ArError {
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("capability check failed: {0}")]
    CapabilityCheckFailed(String),

    #[error("session entry denied: {0}")]
    SessionEntryDenied(String),

    #[error("session entry unsupported: {0}")]
    SessionEntryUnsupported(String),

    #[error("session runtime error: {0}")]
    SessionRuntime(String),

    #[error("pose resolution failed: {0}")]
    PoseResolution(String),

    #[error("session busy: an AR session is already {0}")]
    SessionBusy(&'static str),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FailureKind {
    CapabilityUnavailable,
    CapabilityCheckFailed,
    SessionEntryDenied,
    SessionEntryUnsupported,
    SessionRuntimeError,
    PoseResolutionFailure,
}

impl ArError {
    pub fn capability_unavailable(msg: impl Into<String>) -> Self {
        Self::CapabilityUnavailable(msg.into())
    }

    pub fn capability_check_failed(msg: impl Into<String>) -> Self {
        Self::CapabilityCheckFailed(msg.into())
    }

    pub fn denied(msg: impl Into<String>) -> Self {
        Self::SessionEntryDenied(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::SessionEntryUnsupported(msg.into())
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::SessionRuntime(msg.into())
    }

    pub fn pose(msg: impl Into<String>) -> Self {
        Self::PoseResolution(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::CapabilityUnavailable(_) => FailureKind::CapabilityUnavailable,
            Self::CapabilityCheckFailed(_) => FailureKind::CapabilityCheckFailed,
            Self::SessionEntryDenied(_) => FailureKind::SessionEntryDenied,
            Self::SessionEntryUnsupported(_) => FailureKind::SessionEntryUnsupported,
            Self::PoseResolution(_) => FailureKind::PoseResolutionFailure,
            Self::SessionRuntime(_)
            | Self::SessionBusy(_)
            | Self::Validation(_)
            | Self::Other(_) => FailureKind::SessionRuntimeError,
        }
    }
}
