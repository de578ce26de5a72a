use crate::{
    anchor::{Anchor, AnchorSpawnController, SpawnState},
    capability::{CapabilityProber, CapabilityState, UnsupportedReason},
    config::ArConfig,
    error::{ArError, ArResult},
    platform::{TrackingFrame, XrSystem},
    session::{EndOrigin, SessionController, SessionState},
    status::{Status, project},
    tracking::FrameTrackingSampler,
};

/// Drive it from the host's render loop with [`ArExperience::tick`]; the async
/// operations run alongside the loop and are observed by the next tick.
pub struct ArExperience<S: XrSystem> {
    config: ArConfig,
    xr: Option<S>,
    capability: CapabilityProber,
    session: SessionController<S>,
    sampler: FrameTrackingSampler,
    anchor: AnchorSpawnController,
}

impl<S: XrSystem> ArExperience<S> {
    /// `xr` is `None` when the host exposes no AR API at all.
    pub fn new(config: ArConfig, xr: Option<S>) -> ArResult<Self> {
        config.validate()?;
        Ok(Self {
            session: SessionController::new(&config),
            sampler: FrameTrackingSampler::new(config.target.id.clone(), config.vertical_bias_m),
            capability: CapabilityProber::new(),
            anchor: AnchorSpawnController::new(),
            xr,
            config,
        })
    }

    pub fn config(&self) -> &ArConfig {
        &self.config
    }

    pub fn xr(&self) -> Option<&S> {
        self.xr.as_ref()
    }

    pub async fn probe_capability(&self) -> CapabilityState {
        self.capability.probe(self.xr.as_ref()).await
    }

    pub fn capability(&self) -> CapabilityState {
        self.capability.state()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub async fn enter(&self) -> ArResult<()> {
        if let CapabilityState::Unsupported(UnsupportedReason::ApiUnavailable) =
            self.capability.state()
        {
            return Err(UnsupportedReason::ApiUnavailable.to_error());
        }
        let Some(xr) = self.xr.as_ref() else {
            return Err(ArError::capability_unavailable(
                UnsupportedReason::ApiUnavailable.as_str(),
            ));
        };
        self.session.enter(xr).await
    }

    pub fn exit(&self) -> bool {
        self.end(EndOrigin::User)
    }

    pub fn on_session_ended(&self) -> bool {
        self.end(EndOrigin::Platform)
    }

    fn end(&self, origin: EndOrigin) -> bool {
        let ended = self.session.end(origin);
        // Same call as the transition: no frame may observe `Ended` with a stale anchor.
        self.anchor.reset();
        ended
    }

    #[tracing::instrument(skip_all, fields(frame = frame.index().0))]
    pub fn tick<F: TrackingFrame>(&self, frame: &F) -> Status {
        if let Some(space) = self.session.reference_space()
            && let Some(sample) = self.sampler.sample_target(frame, &space)
        {
            self.anchor.on_sample(&sample);
        }
        self.status()
    }

    pub fn status(&self) -> Status {
        project(
            self.capability.state(),
            &self.session.state(),
            self.anchor.current_anchor().is_some(),
        )
    }

    pub fn current_anchor(&self) -> Option<Anchor> {
        self.anchor.current_anchor()
    }

    pub fn spawn_state(&self) -> SpawnState {
        self.anchor.spawn_state(self.session.is_active())
    }
}
