use std::cell::Cell;

use crate::{
    core::{FrameIndex, Vec3},
    tracking::TrackingSample,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Anchor {
    pub world_position: Vec3,
    pub captured_at: FrameIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SpawnState {
    Idle,
    Searching,
    Spawned,
}

/// Single-shot latch: the first sample wins and later samples never move it.
#[derive(Debug, Default)]
pub struct AnchorSpawnController {
    anchor: Cell<Option<Anchor>>,
}

impl AnchorSpawnController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the anchor only on the call that closes the latch.
    pub fn on_sample(&self, sample: &TrackingSample) -> Option<Anchor> {
        if self.anchor.get().is_some() {
            return None;
        }
        let anchor = Anchor {
            world_position: sample.world_position,
            captured_at: sample.frame,
        };
        self.anchor.set(Some(anchor));
        tracing::info!(
            image = %sample.image,
            position = %anchor.world_position,
            frame = anchor.captured_at.0,
            "anchor latched"
        );
        Some(anchor)
    }

    pub fn reset(&self) {
        if self.anchor.take().is_some() {
            tracing::debug!("anchor cleared");
        }
    }

    pub fn current_anchor(&self) -> Option<Anchor> {
        self.anchor.get()
    }

    pub fn spawn_state(&self, session_active: bool) -> SpawnState {
        match (self.anchor.get(), session_active) {
            (Some(_), _) => SpawnState::Spawned,
            (None, true) => SpawnState::Searching,
            (None, false) => SpawnState::Idle,
        }
    }
}
