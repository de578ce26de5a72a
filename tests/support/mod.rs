#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::Rc,
};

use painting_ar::{
    ArError, ArResult, FrameIndex, ImageId, ImageTrackingResult, ImageTrackingState, Pose,
    ReferenceSpace, ReferenceSpaceKind, SessionInit, SessionMode, TrackingFrame, Vec3, XrSession,
    XrSystem,
};

/// How the scripted platform answers the support query and entry requests.
#[derive(Clone, Debug)]
pub enum Support {
    Yes,
    No,
    QueryFails,
}

#[derive(Clone, Debug)]
pub enum Entry {
    Grant,
    Deny,
    Unsupported,
}

#[derive(Debug, Default)]
pub struct PlatformLog {
    pub support_queries: Cell<u32>,
    pub session_requests: Cell<u32>,
    pub sessions_ended: Cell<u32>,
    pub last_init: RefCell<Option<SessionInit>>,
}

/// In-memory stand-in for the device AR API.
pub struct ScriptedXr {
    pub support: Support,
    pub entry: RefCell<Entry>,
    pub log: Rc<PlatformLog>,
}

impl ScriptedXr {
    pub fn new(support: Support, entry: Entry) -> Self {
        Self {
            support,
            entry: RefCell::new(entry),
            log: Rc::new(PlatformLog::default()),
        }
    }

    pub fn granting() -> Self {
        Self::new(Support::Yes, Entry::Grant)
    }
}

pub struct ScriptedSession {
    log: Rc<PlatformLog>,
}

impl XrSession for ScriptedSession {
    async fn request_reference_space(
        &mut self,
        kind: ReferenceSpaceKind,
    ) -> ArResult<ReferenceSpace> {
        Ok(ReferenceSpace { kind, handle: 1 })
    }

    fn end(&mut self) {
        self.log.sessions_ended.set(self.log.sessions_ended.get() + 1);
    }
}

impl XrSystem for ScriptedXr {
    type Session = ScriptedSession;

    async fn is_session_supported(&self, mode: SessionMode) -> ArResult<bool> {
        assert_eq!(mode, SessionMode::ImmersiveAr);
        self.log
            .support_queries
            .set(self.log.support_queries.get() + 1);
        match self.support {
            Support::Yes => Ok(true),
            Support::No => Ok(false),
            Support::QueryFails => Err(ArError::Other(anyhow::anyhow!("SecurityError"))),
        }
    }

    async fn request_session(&self, init: &SessionInit) -> ArResult<ScriptedSession> {
        self.log
            .session_requests
            .set(self.log.session_requests.get() + 1);
        *self.log.last_init.borrow_mut() = Some(init.clone());
        match *self.entry.borrow() {
            Entry::Grant => Ok(ScriptedSession {
                log: self.log.clone(),
            }),
            Entry::Deny => Err(ArError::denied("NotAllowedError: user declined")),
            Entry::Unsupported => Err(ArError::unsupported("image-tracking not supported")),
        }
    }
}

/// One frame's worth of image-tracking results.
#[derive(Clone, Debug, Default)]
pub struct ScriptedFrame {
    pub index: FrameIndex,
    pub results: Vec<ImageTrackingResult>,
    pub poses: BTreeMap<u64, Vec3>,
}

impl ScriptedFrame {
    pub fn new(index: u64) -> Self {
        Self {
            index: FrameIndex(index),
            ..Self::default()
        }
    }

    pub fn tracked(self, image: &str, at: Vec3) -> Self {
        self.with(image, ImageTrackingState::Tracked, Some(at))
    }

    pub fn emulated(self, image: &str, at: Vec3) -> Self {
        self.with(image, ImageTrackingState::Emulated, Some(at))
    }

    /// Reported as tracked but its space cannot be located this frame.
    pub fn unlocatable(self, image: &str) -> Self {
        self.with(image, ImageTrackingState::Tracked, None)
    }

    fn with(mut self, image: &str, state: ImageTrackingState, at: Option<Vec3>) -> Self {
        let space = 100 + self.results.len() as u64;
        self.results.push(ImageTrackingResult {
            image: ImageId::new(image),
            state,
            measured_width_m: 0.5,
            space,
        });
        if let Some(at) = at {
            self.poses.insert(space, at);
        }
        self
    }
}

impl TrackingFrame for ScriptedFrame {
    fn index(&self) -> FrameIndex {
        self.index
    }

    fn image_tracking_results(&self) -> &[ImageTrackingResult] {
        &self.results
    }

    fn pose(
        &self,
        result: &ImageTrackingResult,
        _space: &ReferenceSpace,
    ) -> ArResult<Option<Pose>> {
        Ok(self.poses.get(&result.space).copied().map(Pose::from_position))
    }
}
