use crate::core::{
    affinity::{answer_affinity, sign_affinity},
    distance::optional_distance,
};
use crate::models::{CandidateProfile, ScoreBreakdown, ScoredCandidate, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Flat bonuses for living close to each other
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalityBonus {
    /// Added when both profiles name the same city
    pub same_city: u8,
    /// Added when both have coordinates closer than `proximity_radius_km`
    pub proximity: u8,
    pub proximity_radius_km: f64,
}

impl Default for LocalityBonus {
    fn default() -> Self {
        Self {
            same_city: 5,
            proximity: 3,
            proximity_radius_km: 20.0,
        }
    }
}

/// Pairwise compatibility scorer
///
/// Scoring formula:
/// score = clamp(
///     sign_affinity * 0.25 +
///     objective_affinity * 0.35 +
///     core_value_affinity * 0.20 +
///     lifestyle_rhythm_affinity * 0.10 +
///     weekend_style_affinity * 0.10 +
///     same_city_bonus + proximity_bonus,
///     0, 100)
///
/// Missing signals resolve to a neutral category and still count with their
/// full weight; weights are never renormalized.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompatibilityScorer {
    weights: ScoringWeights,
    locality: LocalityBonus,
}

impl CompatibilityScorer {
    pub fn new(weights: ScoringWeights, locality: LocalityBonus) -> Self {
        Self { weights, locality }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score in `[0, 100]` for the ordered pair `(viewer, candidate)`
    #[inline]
    pub fn score(&self, viewer: &CandidateProfile, candidate: &CandidateProfile) -> u8 {
        self.score_breakdown(viewer, candidate).total
    }

    /// Per-dimension affinities, bonuses and the final score
    pub fn score_breakdown(
        &self,
        viewer: &CandidateProfile,
        candidate: &CandidateProfile,
    ) -> ScoreBreakdown {
        let mine = &viewer.questionnaire;
        let theirs = &candidate.questionnaire;

        let sign = sign_affinity(viewer.primary_sign, candidate.primary_sign);
        let objective = answer_affinity(mine.objective, theirs.objective);
        let core_value = answer_affinity(mine.core_value, theirs.core_value);
        let lifestyle_rhythm = answer_affinity(mine.lifestyle_rhythm, theirs.lifestyle_rhythm);
        let weekend_style = answer_affinity(mine.weekend_style, theirs.weekend_style);

        let w = &self.weights;
        let weighted = f64::from(sign) * w.sign
            + f64::from(objective) * w.objective
            + f64::from(core_value) * w.core_value
            + f64::from(lifestyle_rhythm) * w.lifestyle_rhythm
            + f64::from(weekend_style) * w.weekend_style;

        let same_city_bonus = if share_city(viewer, candidate) {
            self.locality.same_city
        } else {
            0
        };

        let distance_km = optional_distance(viewer.location.as_ref(), candidate.location.as_ref());
        let proximity_bonus = match distance_km {
            Some(d) if d < self.locality.proximity_radius_km => self.locality.proximity,
            _ => 0,
        };

        let raw = weighted + f64::from(same_city_bonus) + f64::from(proximity_bonus);
        let total = raw.clamp(0.0, 100.0).round() as u8;

        ScoreBreakdown {
            sign,
            objective,
            core_value,
            lifestyle_rhythm,
            weekend_style,
            same_city_bonus,
            proximity_bonus,
            distance_km,
            total,
        }
    }

    /// Score one candidate against the viewer
    pub fn score_candidate(
        &self,
        viewer: &CandidateProfile,
        candidate: CandidateProfile,
    ) -> ScoredCandidate {
        let breakdown = self.score_breakdown(viewer, &candidate);
        ScoredCandidate {
            score: breakdown.total,
            breakdown,
            profile: candidate,
        }
    }
}

/// Both profiles name the same, non-empty city
#[inline]
fn share_city(a: &CandidateProfile, b: &CandidateProfile) -> bool {
    match (a.city_name.as_deref(), b.city_name.as_deref()) {
        (Some(x), Some(y)) => {
            let x = x.trim();
            !x.is_empty() && x == y.trim()
        }
        _ => false,
    }
}

/// Ranking order: descending score, ties broken by ascending id
#[inline]
pub fn by_rank(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.profile.id.cmp(&b.profile.id))
}
