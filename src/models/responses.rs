use crate::core::{
    gesture::GestureEvent,
    presentation::StarAppearance,
    tier::TierPolicy,
};
use crate::models::domain::{PlacementRecord, ScoreBreakdown, ViewerTransform};
use serde::Serialize;

/// One placed candidate with its render hints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarView {
    #[serde(flatten)]
    pub placement: PlacementRecord,
    pub appearance: StarAppearance,
    pub on_screen: bool,
}

/// Response for a universe layout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseResponse {
    pub policy: TierPolicy,
    pub stars: Vec<StarView>,
    pub visible_count: usize,
    pub locked_count: usize,
    pub fallback_count: usize,
    pub on_screen_count: usize,
}

/// Scores of every candidate against the viewer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub candidate_id: String,
    pub breakdown: ScoreBreakdown,
}

/// Gestures recognized during a replay and the resulting transform
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureReplayResponse {
    pub events: Vec<GestureEvent>,
    pub transform: ViewerTransform,
}
