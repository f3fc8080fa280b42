// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateProfile, Coordinates, CoreValue, Fidelity, LifestyleRhythm, Objective, PlacementRecord, Point,
    Questionnaire, ScoreBreakdown, ScoredCandidate, ScoringWeights, SubscriptionTier, UnknownCategory,
    ViewerTransform, ViewportRect, WeekendStyle, ZodiacSign,
};
pub use requests::{GestureReplayRequest, RequestError, UniverseRequest};
pub use responses::{GestureReplayResponse, ScoreReport, StarView, UniverseResponse};
