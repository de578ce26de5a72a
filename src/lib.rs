#![forbid(unsafe_code)]

mod foundation;

pub mod anchor;
pub mod capability;
pub mod config;
pub mod experience;
pub mod platform;
pub mod scene;
pub mod session;
pub mod status;
pub mod tracking;

pub use foundation::{core, error};

pub use anchor::{Anchor, AnchorSpawnController, SpawnState};
pub use capability::{CapabilityProber, CapabilityState, UnsupportedReason};
pub use config::{ArConfig, ReferenceSpaceKind, SessionInit, SessionMode, TargetImage};
pub use crate::core::{FrameIndex, ImageId, Pose, Vec3};
pub use crate::error::{ArError, ArResult, FailureKind};
pub use experience::ArExperience;
pub use platform::{
    ImageTrackingResult, ImageTrackingState, ReferenceSpace, TrackingFrame, XrSession, XrSystem,
};
pub use scene::{SpawnDriver, SpawnHost};
pub use session::{EndOrigin, SessionController, SessionFailure, SessionState};
pub use status::{Status, project};
pub use tracking::{FrameTrackingSampler, TrackingQuality, TrackingSample};
