use crate::core::gesture::TouchFrame;
use crate::models::domain::{CandidateProfile, SubscriptionTier, ViewerTransform, ViewportRect};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Errors that can occur while reading engine input
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {context}: {source}")]
    Invalid {
        context: String,
        #[source]
        source: ValidationErrors,
    },
}

impl RequestError {
    fn invalid(context: impl Into<String>, source: ValidationErrors) -> Self {
        RequestError::Invalid {
            context: context.into(),
            source,
        }
    }
}

/// Read and deserialize a JSON document from disk
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, RequestError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Request to lay out a viewer's universe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseRequest {
    pub viewer: CandidateProfile,
    #[serde(default)]
    pub candidates: Vec<CandidateProfile>,
    #[serde(rename = "viewerTier", default)]
    pub viewer_tier: SubscriptionTier,
    pub viewport: ViewportRect,
    /// Current pan/zoom, used to report the on-screen subset
    #[serde(default)]
    pub transform: ViewerTransform,
}

impl UniverseRequest {
    pub fn from_path(path: &Path) -> Result<Self, RequestError> {
        let request: Self = load_json(path)?;
        if let Err(e) = request.check() {
            tracing::warn!("Rejected universe request {}: {}", path.display(), e);
            return Err(e);
        }
        Ok(request)
    }

    /// Validate every profile and the viewport
    pub fn check(&self) -> Result<(), RequestError> {
        self.viewport
            .validate()
            .map_err(|e| RequestError::invalid("viewport", e))?;

        for profile in std::iter::once(&self.viewer).chain(&self.candidates) {
            check_profile(profile)?;
        }

        Ok(())
    }
}

fn check_profile(profile: &CandidateProfile) -> Result<(), RequestError> {
    profile
        .validate()
        .map_err(|e| RequestError::invalid(format!("profile {:?}", profile.id), e))?;

    if let Some(location) = &profile.location {
        location
            .validate()
            .map_err(|e| RequestError::invalid(format!("location of {:?}", profile.id), e))?;
    }

    Ok(())
}

/// Recorded touch session to run through the recognizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureReplayRequest {
    #[serde(rename = "viewerTier", default)]
    pub viewer_tier: SubscriptionTier,
    pub viewport: ViewportRect,
    #[serde(default)]
    pub transform: ViewerTransform,
    pub frames: Vec<TouchFrame>,
}

impl GestureReplayRequest {
    pub fn from_path(path: &Path) -> Result<Self, RequestError> {
        let request: Self = load_json(path)?;
        if let Err(e) = request.viewport.validate() {
            tracing::warn!("Rejected replay request {}: {}", path.display(), e);
            return Err(RequestError::invalid("viewport", e));
        }
        Ok(request)
    }
}
