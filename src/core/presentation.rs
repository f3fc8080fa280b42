//! Render hints derived from a score and the candidate's own tier
//!
//! These are plain data for the rendering layer; nothing here affects scoring
//! or placement.

use crate::models::SubscriptionTier;
use serde::{Deserialize, Serialize};

/// Scores at or above this pulse
const PULSE_THRESHOLD: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityLabel {
    Perfect,
    Excellent,
    VeryGood,
    Good,
    Average,
    Low,
}

impl CompatibilityLabel {
    pub fn for_score(score: u8) -> Self {
        match score {
            90.. => CompatibilityLabel::Perfect,
            80..=89 => CompatibilityLabel::Excellent,
            70..=79 => CompatibilityLabel::VeryGood,
            60..=69 => CompatibilityLabel::Good,
            50..=59 => CompatibilityLabel::Average,
            _ => CompatibilityLabel::Low,
        }
    }
}

/// Brightness class of a star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Magnitude {
    Supernova,
    Bright,
    Medium,
    Dim,
    Distant,
}

impl Magnitude {
    pub fn for_score(score: u8) -> Self {
        match score {
            90.. => Magnitude::Supernova,
            75..=89 => Magnitude::Bright,
            60..=74 => Magnitude::Medium,
            45..=59 => Magnitude::Dim,
            _ => Magnitude::Distant,
        }
    }
}

/// Everything the renderer needs to draw one star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarAppearance {
    pub color: &'static str,
    pub magnitude: Magnitude,
    pub label: CompatibilityLabel,
    /// Glyph size in layout units, from the candidate's own tier
    pub size: u8,
    pub pulsing: bool,
}

impl StarAppearance {
    pub fn new(score: u8, candidate_tier: SubscriptionTier) -> Self {
        Self {
            color: star_color(score),
            magnitude: Magnitude::for_score(score),
            label: CompatibilityLabel::for_score(score),
            size: star_size(candidate_tier),
            pulsing: score >= PULSE_THRESHOLD,
        }
    }
}

pub fn star_color(score: u8) -> &'static str {
    match score {
        90.. => "#FFD700",
        75..=89 => "#FFA500",
        60..=74 => "#FBBF24",
        _ => "#9CA3AF",
    }
}

pub fn star_size(tier: SubscriptionTier) -> u8 {
    match tier {
        SubscriptionTier::Top => 18,
        SubscriptionTier::Plus => 14,
        SubscriptionTier::Base => 10,
    }
}
