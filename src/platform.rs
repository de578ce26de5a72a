use std::future::Future;

use crate::{
    config::{ReferenceSpaceKind, SessionInit, SessionMode},
    core::{FrameIndex, ImageId, Pose},
    error::ArResult,
};

pub trait XrSystem {
    type Session: XrSession;

    fn is_session_supported(&self, mode: SessionMode) -> impl Future<Output = ArResult<bool>>;

    // May wait on a user permission prompt.
    fn request_session(
        &self,
        init: &SessionInit,
    ) -> impl Future<Output = ArResult<Self::Session>>;
}

pub trait XrSession {
    fn request_reference_space(
        &mut self,
        kind: ReferenceSpaceKind,
    ) -> impl Future<Output = ArResult<ReferenceSpace>>;

    fn end(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceSpace {
    pub kind: ReferenceSpaceKind,
    pub handle: u64,
}

pub trait TrackingFrame {
    fn index(&self) -> FrameIndex;

    fn image_tracking_results(&self) -> &[ImageTrackingResult];

    /// `Ok(None)` when the image space cannot be located relative to `space` this frame.
    fn pose(&self, result: &ImageTrackingResult, space: &ReferenceSpace) -> ArResult<Option<Pose>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageTrackingState {
    Tracked,
    // pose extrapolated from an earlier sighting
    Emulated,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageTrackingResult {
    pub image: ImageId,
    pub state: ImageTrackingState,
    pub measured_width_m: f64,
    pub space: u64, // platform handle of the image space
}
