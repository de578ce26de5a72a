use crate::{
    core::ImageId,
    error::{ArError, ArResult},
};

pub const DEFAULT_VERTICAL_BIAS_M: f64 = 0.2;
pub const PAINTING_IMAGE_ID: &str = "butterfly-painting";
pub const PAINTING_IMAGE_SOURCE: &str = "/images/butterfly-painting.png";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArConfig {
    pub target: TargetImage,
    #[serde(default = "default_vertical_bias")]
    pub vertical_bias_m: f64, // spawn height above the painting
    #[serde(default)]
    pub reference_space: ReferenceSpaceKind,
    #[serde(default = "default_required_features")]
    pub required_features: Vec<String>,
    #[serde(default = "default_optional_features")]
    pub optional_features: Vec<String>,
}

/// `physical_width_m` must match the printed painting: the platform derives the
/// pose's distance from it, so a wrong width scales every tracked position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetImage {
    pub id: ImageId,
    pub source: String,
    pub physical_width_m: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceSpaceKind {
    Viewer,
    #[default]
    Local,
    LocalFloor,
    Unbounded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMode {
    ImmersiveAr,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SessionInit {
    pub mode: SessionMode,
    pub required_features: Vec<String>,
    pub optional_features: Vec<String>,
    pub tracked_images: Vec<TargetImage>,
}

fn default_vertical_bias() -> f64 {
    DEFAULT_VERTICAL_BIAS_M
}

fn default_required_features() -> Vec<String> {
    vec!["image-tracking".to_string()]
}

fn default_optional_features() -> Vec<String> {
    vec!["dom-overlay".to_string()]
}

impl ArConfig {
    pub fn new(target: TargetImage) -> Self {
        Self {
            target,
            vertical_bias_m: DEFAULT_VERTICAL_BIAS_M,
            reference_space: ReferenceSpaceKind::default(),
            required_features: default_required_features(),
            optional_features: default_optional_features(),
        }
    }

    pub fn painting(physical_width_m: f64) -> Self {
        Self::new(TargetImage {
            id: ImageId::new(PAINTING_IMAGE_ID),
            source: PAINTING_IMAGE_SOURCE.to_string(),
            physical_width_m,
        })
    }

    pub fn from_json_str(s: &str) -> ArResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ArError::validation(format!("parse AR config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ArResult<()> {
        if self.target.id.as_str().trim().is_empty() {
            return Err(ArError::validation("target image id must be non-empty"));
        }
        if self.target.source.trim().is_empty() {
            return Err(ArError::validation(format!(
                "target image '{}' must have a source",
                self.target.id
            )));
        }
        let w = self.target.physical_width_m;
        if !w.is_finite() || w <= 0.0 {
            return Err(ArError::validation(format!(
                "target image '{}' physical width must be a positive length in meters (got {w})",
                self.target.id
            )));
        }
        if !self.vertical_bias_m.is_finite() {
            return Err(ArError::validation("vertical bias must be finite"));
        }
        Ok(())
    }

    pub fn session_init(&self) -> SessionInit {
        SessionInit {
            mode: SessionMode::ImmersiveAr,
            required_features: self.required_features.clone(),
            optional_features: self.optional_features.clone(),
            tracked_images: vec![self.target.clone()],
        }
    }
}
