use std::cell::RefCell;

use crate::{
    config::{ArConfig, ReferenceSpaceKind, SessionInit},
    error::{ArError, ArResult, FailureKind},
    platform::{ReferenceSpace, XrSession, XrSystem},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub enum SessionState {
    #[default]
    Idle,
    Requesting,
    Active,
    Failed(SessionFailure),
    Ended,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SessionFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&ArError> for SessionFailure {
    fn from(err: &ArError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndOrigin {
    User,
    /// The platform already ended the session; it must not be ended again.
    Platform,
}

struct Inner<T> {
    state: SessionState,
    session: Option<T>,
    reference: Option<ReferenceSpace>,
    // Bumped on every entry attempt and on every end, so a pending entry can
    // tell that it was cancelled while awaiting the platform.
    generation: u64,
}

// Resets a `Requesting` state whose entry future was dropped before completing.
struct PendingEntry<'a, T> {
    inner: &'a RefCell<Inner<T>>,
    generation: u64,
    armed: bool,
}

impl<T> Drop for PendingEntry<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            return;
        };
        if inner.generation != self.generation || inner.state != SessionState::Requesting {
            return;
        }
        inner.generation += 1;
        inner.state = SessionState::Failed(SessionFailure {
            kind: FailureKind::SessionRuntimeError,
            message: "session entry was abandoned before the platform answered".to_string(),
        });
        tracing::debug!("pending entry dropped");
    }
}

/// Owns the single AR session.
///
/// Every method takes `&self`: `enter` stays pending across a permission
/// prompt while the frame loop keeps ticking and may call `end` meanwhile.
pub struct SessionController<S: XrSystem> {
    init: SessionInit,
    reference_kind: ReferenceSpaceKind,
    inner: RefCell<Inner<S::Session>>,
}

impl<S: XrSystem> SessionController<S> {
    pub fn new(config: &ArConfig) -> Self {
        Self {
            init: config.session_init(),
            reference_kind: config.reference_space,
            inner: RefCell::new(Inner {
                state: SessionState::Idle,
                session: None,
                reference: None,
                generation: 0,
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.borrow().state.clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().state.is_active()
    }

    pub fn reference_space(&self) -> Option<ReferenceSpace> {
        let inner = self.inner.borrow();
        if inner.state.is_active() {
            inner.reference.clone()
        } else {
            None
        }
    }

    /// Starts an immersive AR session tracking the configured image.
    ///
    /// Rejected with [`ArError::SessionBusy`] while another entry is pending or a
    /// session is active. Failures land in `SessionState::Failed` and are also
    /// returned; nothing is retried.
    #[tracing::instrument(skip_all)]
    pub async fn enter(&self, xr: &S) -> ArResult<()> {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            match &inner.state {
                SessionState::Requesting => return Err(ArError::SessionBusy("requesting")),
                SessionState::Active => return Err(ArError::SessionBusy("active")),
                SessionState::Idle | SessionState::Failed(_) | SessionState::Ended => {}
            }
            inner.state = SessionState::Requesting;
            inner.generation += 1;
            tracing::debug!(generation = inner.generation, "session requesting");
            inner.generation
        };

        let mut guard = PendingEntry {
            inner: &self.inner,
            generation,
            armed: true,
        };
        let started = self.start(xr).await;
        guard.armed = false;

        let mut inner = self.inner.borrow_mut();
        if inner.generation != generation {
            match started {
                Ok((mut session, _)) => {
                    session.end();
                    tracing::debug!("entry completed after the session was ended; discarded");
                }
                Err(err) => {
                    tracing::debug!(error = %err, "entry failed after the session was ended");
                }
            }
            return Err(ArError::runtime("session ended before entry completed"));
        }

        match started {
            Ok((session, reference)) => {
                inner.session = Some(session);
                inner.reference = Some(reference);
                inner.state = SessionState::Active;
                tracing::debug!("session active");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to enter AR");
                inner.state = SessionState::Failed(SessionFailure::from(&err));
                Err(err)
            }
        }
    }

    async fn start(&self, xr: &S) -> ArResult<(S::Session, ReferenceSpace)> {
        let mut session = xr.request_session(&self.init).await?;
        match session.request_reference_space(self.reference_kind).await {
            Ok(reference) => Ok((session, reference)),
            Err(err) => {
                session.end();
                Err(ArError::runtime(format!(
                    "reference space {:?} unavailable: {err}",
                    self.reference_kind
                )))
            }
        }
    }

    /// Transitions to `Ended` and releases the session handle. Returns whether a
    /// session (active or pending) was actually ended.
    pub fn end(&self, origin: EndOrigin) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !matches!(inner.state, SessionState::Active | SessionState::Requesting) {
            return false;
        }
        // A pending entry holds no session yet; it discards its own once granted.
        if let Some(mut session) = inner.session.take()
            && origin == EndOrigin::User
        {
            session.end();
        }
        inner.reference = None;
        inner.generation += 1;
        inner.state = SessionState::Ended;
        tracing::debug!(?origin, "session ended");
        true
    }
}
