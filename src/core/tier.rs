use crate::models::{Fidelity, ScoredCandidate, SubscriptionTier};
use serde::{Deserialize, Serialize};

/// Maximum number of candidates exposed at full fidelity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibleLimit {
    Capped(usize),
    Unbounded,
}

impl VisibleLimit {
    #[inline]
    pub fn admits(&self, rank: usize) -> bool {
        match self {
            VisibleLimit::Capped(max) => rank < *max,
            VisibleLimit::Unbounded => true,
        }
    }
}

/// Zoom range allowed for a tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl ZoomBounds {
    #[inline]
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.max(self.min).min(self.max)
    }
}

/// What a viewer on a given tier gets to see
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPolicy {
    pub tier: SubscriptionTier,
    pub max_visible: VisibleLimit,
    pub zoom: ZoomBounds,
    /// Signals that can be sent per day, `None` when unlimited
    pub daily_signals: Option<u32>,
    pub super_nova: bool,
}

impl TierPolicy {
    /// Pure function of the tier
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Base => Self {
                tier,
                max_visible: VisibleLimit::Capped(15),
                zoom: ZoomBounds { min: 0.8, max: 1.3 },
                daily_signals: Some(10),
                super_nova: false,
            },
            SubscriptionTier::Plus => Self {
                tier,
                max_visible: VisibleLimit::Capped(50),
                zoom: ZoomBounds { min: 0.5, max: 2.0 },
                daily_signals: None,
                super_nova: true,
            },
            SubscriptionTier::Top => Self {
                tier,
                max_visible: VisibleLimit::Unbounded,
                zoom: ZoomBounds { min: 0.3, max: 3.0 },
                daily_signals: None,
                super_nova: true,
            },
        }
    }

    /// Render fidelity for the candidate at `rank` (0-based, best first)
    #[inline]
    pub fn fidelity(&self, rank: usize) -> Fidelity {
        if self.max_visible.admits(rank) {
            Fidelity::Full
        } else {
            Fidelity::Locked
        }
    }

    /// Split a rank-ordered list into interactive and locked partitions
    pub fn partition(&self, ranked: Vec<ScoredCandidate>) -> VisibilityWindow {
        let mut visible = ranked;
        let locked = match self.max_visible {
            VisibleLimit::Capped(max) if visible.len() > max => visible.split_off(max),
            _ => Vec::new(),
        };

        VisibilityWindow {
            effective_limit: self.max_visible,
            visible,
            locked,
        }
    }
}

impl From<SubscriptionTier> for TierPolicy {
    fn from(tier: SubscriptionTier) -> Self {
        Self::for_tier(tier)
    }
}

/// Ordered truncation of a ranked candidate list
#[derive(Debug, Clone)]
pub struct VisibilityWindow {
    pub effective_limit: VisibleLimit,
    pub visible: Vec<ScoredCandidate>,
    pub locked: Vec<ScoredCandidate>,
}

impl VisibilityWindow {
    pub fn len(&self) -> usize {
        self.visible.len() + self.locked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.locked.is_empty()
    }

    /// Every candidate in rank order, with its fidelity
    pub fn iter(&self) -> impl Iterator<Item = (&ScoredCandidate, Fidelity)> {
        self.visible
            .iter()
            .map(|c| (c, Fidelity::Full))
            .chain(self.locked.iter().map(|c| (c, Fidelity::Locked)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateProfile, ScoreBreakdown};

    fn ranked(n: usize) -> Vec<ScoredCandidate> {
        (0..n)
            .map(|i| {
                let score = (100 - i.min(100)) as u8;
                ScoredCandidate {
                    profile: CandidateProfile::bare(format!("c{:03}", i)),
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
            })
            .collect()
    }

    #[test]
    fn test_tier_limits() {
        let base = TierPolicy::for_tier(SubscriptionTier::Base);
        assert_eq!(base.max_visible, VisibleLimit::Capped(15));
        assert_eq!(base.zoom, ZoomBounds { min: 0.8, max: 1.3 });

        let plus = TierPolicy::for_tier(SubscriptionTier::Plus);
        assert_eq!(plus.max_visible, VisibleLimit::Capped(50));

        let top = TierPolicy::for_tier(SubscriptionTier::Top);
        assert_eq!(top.max_visible, VisibleLimit::Unbounded);
        assert_eq!(top.zoom.max, 3.0);
    }

    #[test]
    fn test_fidelity_boundary() {
        let base = TierPolicy::for_tier(SubscriptionTier::Base);
        assert_eq!(base.fidelity(14), Fidelity::Full);
        assert_eq!(base.fidelity(15), Fidelity::Locked);

        let top = TierPolicy::for_tier(SubscriptionTier::Top);
        assert_eq!(top.fidelity(10_000), Fidelity::Full);
    }

    #[test]
    fn test_partition_keeps_order() {
        let window = TierPolicy::for_tier(SubscriptionTier::Base).partition(ranked(20));

        assert_eq!(window.visible.len(), 15);
        assert_eq!(window.locked.len(), 5);
        assert_eq!(window.visible[14].profile.id, "c014");
        assert_eq!(window.locked[0].profile.id, "c015");
        assert!(window.visible.last().unwrap().score >= window.locked[0].score);
    }

    #[test]
    fn test_partition_short_list() {
        let window = TierPolicy::for_tier(SubscriptionTier::Plus).partition(ranked(3));
        assert_eq!(window.visible.len(), 3);
        assert!(window.locked.is_empty());

        let empty = TierPolicy::for_tier(SubscriptionTier::Top).partition(Vec::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_zoom_clamp() {
        let bounds = TierPolicy::for_tier(SubscriptionTier::Base).zoom;
        assert_eq!(bounds.clamp(5.0), 1.3);
        assert_eq!(bounds.clamp(0.1), 0.8);
        assert_eq!(bounds.clamp(1.0), 1.0);
    }
}
