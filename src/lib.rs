//! Astra Engine - affinity scoring and spatial presentation for the discovery universe
//!
//! Scores candidates against a viewer, truncates the ranking by subscription
//! tier, places every candidate as a star around the viewport center and keeps
//! the pan/zoom transform in step with recognized touch gestures.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{
    CompatibilityScorer, GestureEvent, GestureRecognizer, Matcher, SpatialPlacer, TierPolicy,
    ViewportCuller,
};
pub use models::{
    CandidateProfile, PlacementRecord, ScoredCandidate, ScoringWeights, SubscriptionTier,
    ViewerTransform, ViewportRect,
};
pub use services::{Engine, GestureSession};
