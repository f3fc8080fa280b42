//! Phyllotaxis placement with collision avoidance
//!
//! Candidates are laid out around an origin in rank order. Rank `i` starts at
//! `i * GOLDEN_ANGLE` on a radius that shrinks as the score grows, then walks
//! a bounded retry sequence until it clears every earlier placement by
//! `min_separation`. When the attempt budget runs out the candidate is put on
//! a deterministic fallback ring and flagged; separation is not guaranteed for
//! that entry.

use crate::models::{Fidelity, PlacementRecord, Point, ScoredCandidate};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// 137.5 degrees
pub const GOLDEN_ANGLE: f64 = 137.5 * PI / 180.0;

/// Turn applied on most failed attempts
const NARROW_TURN: f64 = PI / 9.0;

/// Turn applied every `wide_turn_every` failed attempts
const WIDE_TURN: f64 = PI / 3.0;

/// Extra angular offset per rank on the fallback ring
const FALLBACK_TWIST: f64 = PI / 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    pub min_separation: f64,
    pub max_attempts: u32,
    /// Radius of a perfect score
    pub min_distance: f64,
    /// Kept free between the outermost base radius and the viewport edge
    pub edge_padding: f64,
    pub spiral_step: f64,
    /// Push outwards one spiral step every this many failed attempts
    pub spiral_every: u32,
    pub wide_turn_every: u32,
    /// Ranks sharing one fallback ring
    pub fallback_ring_size: usize,
    pub fallback_ring_step: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            min_separation: 110.0,
            max_attempts: 60,
            min_distance: 100.0,
            edge_padding: 70.0,
            spiral_step: 35.0,
            spiral_every: 15,
            wide_turn_every: 5,
            fallback_ring_size: 8,
            fallback_ring_step: 40.0,
        }
    }
}

/// Result of one layout pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub placements: Vec<PlacementRecord>,
    pub fallback_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpatialPlacer {
    params: PlacementParams,
}

impl SpatialPlacer {
    pub fn new(params: PlacementParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PlacementParams {
        &self.params
    }

    /// Base radius range for a viewport whose smaller half extent is `half_extent`
    pub fn radial_bounds(&self, half_extent: f64) -> (f64, f64) {
        let min = self.params.min_distance;
        let max = (half_extent - self.params.edge_padding).max(min);
        (min, max)
    }

    /// Lay out rank-ordered candidates around `origin`
    ///
    /// Runs in `O(n * max_attempts * n)` worst case and always returns one
    /// record per candidate.
    pub fn place<'a, I>(&self, ranked: I, origin: Point, half_extent: f64) -> Layout
    where
        I: IntoIterator<Item = (&'a ScoredCandidate, Fidelity)>,
    {
        let p = &self.params;
        let (min_distance, max_distance) = self.radial_bounds(half_extent);
        let spiral_every = p.spiral_every.max(1);
        let wide_turn_every = p.wide_turn_every.max(1);
        let ring_size = p.fallback_ring_size.max(1);

        let mut layout = Layout::default();

        for (index, (candidate, fidelity)) in ranked.into_iter().enumerate() {
            let spread = f64::from(100 - candidate.score.min(100)) / 100.0;
            let base_distance = min_distance + spread * (max_distance - min_distance);
            let home_angle = index as f64 * GOLDEN_ANGLE;

            let mut angle = home_angle;
            let mut distance = base_distance;
            let mut spiral_level = 0u32;
            let mut found = None;

            for attempt in 1..=p.max_attempts {
                let position = polar(origin, angle, distance);
                if !collides(&position, &layout.placements, p.min_separation) {
                    found = Some((angle, distance, position));
                    break;
                }

                if attempt % spiral_every == 0 {
                    spiral_level += 1;
                    distance = base_distance + f64::from(spiral_level) * p.spiral_step;
                    angle = home_angle;
                } else if attempt % wide_turn_every == 0 {
                    angle += WIDE_TURN;
                } else {
                    angle += NARROW_TURN;
                }
            }

            let fallback = found.is_none();
            let (angle, distance, position) = found.unwrap_or_else(|| {
                let angle = home_angle + index as f64 * FALLBACK_TWIST;
                let distance =
                    base_distance + (index / ring_size) as f64 * p.fallback_ring_step;
                (angle, distance, polar(origin, angle, distance))
            });

            if fallback {
                layout.fallback_count += 1;
                tracing::debug!(
                    "Attempt budget exhausted for {} at rank {}, using fallback ring",
                    candidate.profile.id,
                    index
                );
            }

            layout.placements.push(PlacementRecord {
                candidate_id: candidate.profile.id.clone(),
                angle_radians: angle.rem_euclid(TAU),
                radial_distance: distance,
                x: position.x,
                y: position.y,
                score: candidate.score,
                fidelity,
                fallback,
            });
        }

        if layout.fallback_count > 0 {
            tracing::debug!(
                "Layout pass placed {} candidates, {} on fallback positions",
                layout.placements.len(),
                layout.fallback_count
            );
        }

        layout
    }
}

#[inline]
fn polar(origin: Point, angle: f64, distance: f64) -> Point {
    Point::new(
        origin.x + distance * angle.cos(),
        origin.y + distance * angle.sin(),
    )
}

#[inline]
fn collides(position: &Point, placed: &[PlacementRecord], min_separation: f64) -> bool {
    placed
        .iter()
        .any(|other| position.distance_to(&other.position()) < min_separation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateProfile, ScoreBreakdown};

    fn scored(id: &str, score: u8) -> ScoredCandidate {
        ScoredCandidate {
            profile: CandidateProfile::bare(id),
            score,
            breakdown: ScoreBreakdown {
                sign: 50,
                objective: 50,
                core_value: 50,
                lifestyle_rhythm: 50,
                weekend_style: 50,
                same_city_bonus: 0,
                proximity_bonus: 0,
                distance_km: None,
                total: score,
            },
        }
    }

    fn full(candidates: &[ScoredCandidate]) -> impl Iterator<Item = (&ScoredCandidate, Fidelity)> {
        candidates.iter().map(|c| (c, Fidelity::Full))
    }

    #[test]
    fn test_empty_list() {
        let layout = SpatialPlacer::default().place(full(&[]), Point::new(0.0, 0.0), 400.0);
        assert!(layout.placements.is_empty());
        assert_eq!(layout.fallback_count, 0);
    }

    #[test]
    fn test_first_candidate_sits_on_base_radius() {
        let placer = SpatialPlacer::default();
        let origin = Point::new(200.0, 350.0);
        let candidates = [scored("a", 100)];

        let layout = placer.place(full(&candidates), origin, 200.0);
        let record = &layout.placements[0];

        // Perfect score at angle 0 lands min_distance to the right of the origin
        assert!((record.radial_distance - 100.0).abs() < 1e-9);
        assert!((record.x - 300.0).abs() < 1e-9);
        assert!((record.y - 350.0).abs() < 1e-9);
        assert!(!record.fallback);
    }

    #[test]
    fn test_higher_score_starts_closer() {
        let placer = SpatialPlacer::default();
        let (min, max) = placer.radial_bounds(500.0);
        assert_eq!((min, max), (100.0, 430.0));

        let candidates = [scored("a", 90), scored("b", 20)];
        let layout = placer.place(full(&candidates), Point::default(), 500.0);

        assert!(layout.placements[0].radial_distance < layout.placements[1].radial_distance);
    }

    #[test]
    fn test_small_viewport_keeps_bounds_ordered() {
        let (min, max) = SpatialPlacer::default().radial_bounds(50.0);
        assert_eq!(min, 100.0);
        assert_eq!(max, 100.0);
    }

    #[test]
    fn test_zero_budget_always_falls_back() {
        let placer = SpatialPlacer::new(PlacementParams {
            max_attempts: 0,
            ..PlacementParams::default()
        });
        let candidates = [scored("a", 80), scored("b", 70)];

        let layout = placer.place(full(&candidates), Point::default(), 400.0);

        assert_eq!(layout.fallback_count, 2);
        assert!(layout.placements.iter().all(|p| p.fallback));
    }

    #[test]
    fn test_dense_input_terminates_and_places_everyone() {
        let placer = SpatialPlacer::default();
        let candidates: Vec<_> = (0..200).map(|i| scored(&format!("c{}", i), 95)).collect();

        let layout = placer.place(full(&candidates), Point::default(), 150.0);

        assert_eq!(layout.placements.len(), 200);
        assert!(layout.fallback_count > 0);
    }

    #[test]
    fn test_angles_are_normalized() {
        let candidates: Vec<_> = (0..30).map(|i| scored(&format!("c{}", i), 60)).collect();
        let layout = SpatialPlacer::default().place(full(&candidates), Point::default(), 600.0);

        for p in &layout.placements {
            assert!(p.angle_radians >= 0.0 && p.angle_radians < TAU);
        }
    }
}
