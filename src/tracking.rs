use crate::{
    core::{FrameIndex, ImageId, Vec3},
    platform::{ImageTrackingState, ReferenceSpace, TrackingFrame},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TrackingQuality {
    Tracked,
    Limited,
    Lost,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TrackingSample {
    pub image: ImageId,
    pub quality: TrackingQuality,
    pub world_position: Vec3, // already raised by the vertical bias
    pub frame: FrameIndex,
}

#[derive(Clone, Debug)]
pub struct FrameTrackingSampler {
    target: ImageId,
    vertical_bias_m: f64,
}

impl FrameTrackingSampler {
    pub fn new(target: ImageId, vertical_bias_m: f64) -> Self {
        Self {
            target,
            vertical_bias_m,
        }
    }

    pub fn sample<F: TrackingFrame>(
        &self,
        frame: &F,
        space: &ReferenceSpace,
    ) -> Vec<TrackingSample> {
        let index = frame.index();
        frame
            .image_tracking_results()
            .iter()
            .filter_map(|result| {
                if result.state != ImageTrackingState::Tracked {
                    tracing::trace!(
                        image = %result.image,
                        frame = index.0,
                        "emulated result skipped"
                    );
                    return None;
                }
                let pose = match frame.pose(result, space) {
                    Ok(Some(pose)) => pose,
                    Ok(None) => {
                        tracing::trace!(image = %result.image, frame = index.0, "pose unavailable");
                        return None;
                    }
                    Err(err) => {
                        tracing::trace!(
                            image = %result.image,
                            frame = index.0,
                            error = %err,
                            "pose resolution failed"
                        );
                        return None;
                    }
                };
                if !pose.position.is_finite() {
                    tracing::trace!(
                        image = %result.image,
                        frame = index.0,
                        "non-finite pose skipped"
                    );
                    return None;
                }
                Some(TrackingSample {
                    image: result.image.clone(),
                    quality: TrackingQuality::Tracked,
                    world_position: pose.position.raised(self.vertical_bias_m),
                    frame: index,
                })
            })
            .collect()
    }

    pub fn sample_target<F: TrackingFrame>(
        &self,
        frame: &F,
        space: &ReferenceSpace,
    ) -> Option<TrackingSample> {
        self.sample(frame, space)
            .into_iter()
            .find(|s| s.image == self.target)
    }
}
