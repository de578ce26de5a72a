use std::cell::Cell;

use crate::{
    config::SessionMode,
    error::ArError,
    platform::XrSystem,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum CapabilityState {
    #[default]
    Unknown,
    Supported,
    Unsupported(UnsupportedReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum UnsupportedReason {
    ApiUnavailable,
    NotSupported,
    CheckFailed,
}

impl UnsupportedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApiUnavailable => "AR API unavailable",
            Self::NotSupported => "immersive AR not supported",
            Self::CheckFailed => "support check failed",
        }
    }

    pub fn to_error(self) -> ArError {
        match self {
            Self::ApiUnavailable => ArError::capability_unavailable(self.as_str()),
            Self::NotSupported => ArError::unsupported(self.as_str()),
            Self::CheckFailed => ArError::capability_check_failed(self.as_str()),
        }
    }
}

impl CapabilityState {
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Never retries; any doubt collapses to `Unsupported`.
#[tracing::instrument(skip(xr), fields(api_present = xr.is_some()))]
pub async fn probe<S: XrSystem>(xr: Option<&S>) -> CapabilityState {
    let Some(xr) = xr else {
        tracing::debug!("no AR API exposed by host");
        return CapabilityState::Unsupported(UnsupportedReason::ApiUnavailable);
    };

    match xr.is_session_supported(SessionMode::ImmersiveAr).await {
        Ok(true) => CapabilityState::Supported,
        Ok(false) => CapabilityState::Unsupported(UnsupportedReason::NotSupported),
        Err(err) => {
            tracing::debug!(error = %err, "AR support query failed");
            CapabilityState::Unsupported(UnsupportedReason::CheckFailed)
        }
    }
}

#[derive(Debug, Default)]
pub struct CapabilityProber {
    state: Cell<CapabilityState>,
}

impl CapabilityProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CapabilityState {
        self.state.get()
    }

    pub async fn probe<S: XrSystem>(&self, xr: Option<&S>) -> CapabilityState {
        if self.state.get().is_known() {
            return self.state.get();
        }
        let resolved = probe(xr).await;
        self.resolve(resolved)
    }

    pub fn resolve(&self, state: CapabilityState) -> CapabilityState {
        let current = self.state.get();
        if current.is_known() {
            if current != state {
                tracing::warn!(?current, ignored = ?state, "capability already resolved");
            }
            return current;
        }
        tracing::debug!(?state, "capability resolved");
        self.state.set(state);
        state
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        config::{ReferenceSpaceKind, SessionInit},
        error::ArResult,
        platform::{ReferenceSpace, XrSession},
    };

    struct NoSession;

    impl XrSession for NoSession {
        async fn request_reference_space(
            &mut self,
            _kind: ReferenceSpaceKind,
        ) -> ArResult<ReferenceSpace> {
            Err(ArError::runtime("unused"))
        }

        fn end(&mut self) {}
    }

    struct Query {
        answer: Option<bool>, // None rejects
        calls: Cell<u32>,
    }

    impl Query {
        fn new(answer: Option<bool>) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
            }
        }
    }

    impl XrSystem for Query {
        type Session = NoSession;

        async fn is_session_supported(&self, _mode: SessionMode) -> ArResult<bool> {
            self.calls.set(self.calls.get() + 1);
            self.answer
                .ok_or_else(|| ArError::Other(anyhow::anyhow!("SecurityError")))
        }

        async fn request_session(&self, _init: &SessionInit) -> ArResult<NoSession> {
            Err(ArError::runtime("unused"))
        }
    }

    #[test]
    fn missing_api_is_unsupported() {
        let state = pollster::block_on(probe::<Query>(None));
        assert_eq!(
            state,
            CapabilityState::Unsupported(UnsupportedReason::ApiUnavailable)
        );
        assert_eq!(UnsupportedReason::ApiUnavailable.as_str(), "AR API unavailable");
    }

    #[test]
    fn resolved_boolean_is_mirrored() {
        let yes = Query::new(Some(true));
        let no = Query::new(Some(false));
        assert_eq!(
            pollster::block_on(probe(Some(&yes))),
            CapabilityState::Supported
        );
        assert_eq!(
            pollster::block_on(probe(Some(&no))),
            CapabilityState::Unsupported(UnsupportedReason::NotSupported)
        );
    }

    #[test]
    fn rejected_query_collapses_to_unsupported() {
        let broken = Query::new(None);
        let state = pollster::block_on(probe(Some(&broken)));
        assert_eq!(
            state,
            CapabilityState::Unsupported(UnsupportedReason::CheckFailed)
        );
        assert_eq!(UnsupportedReason::CheckFailed.as_str(), "support check failed");
    }

    #[test]
    fn prober_does_not_requery() {
        let xr = Query::new(Some(true));
        let prober = CapabilityProber::new();
        assert_eq!(prober.state(), CapabilityState::Unknown);
        pollster::block_on(prober.probe(Some(&xr)));
        pollster::block_on(prober.probe(Some(&xr)));
        assert_eq!(xr.calls.get(), 1);
        assert_eq!(prober.state(), CapabilityState::Supported);
    }

    #[test]
    fn resolved_state_is_immutable() {
        let prober = CapabilityProber::new();
        prober.resolve(CapabilityState::Supported);
        let kept = prober.resolve(CapabilityState::Unsupported(UnsupportedReason::CheckFailed));
        assert_eq!(kept, CapabilityState::Supported);
        assert_eq!(prober.state(), CapabilityState::Supported);
    }
}
