use crate::core::{
    placement::{Layout, SpatialPlacer},
    scoring::{by_rank, CompatibilityScorer},
    tier::{TierPolicy, VisibilityWindow},
};
use crate::models::{CandidateProfile, Point, ScoredCandidate, SubscriptionTier, ViewportRect};

/// Output of one full pipeline pass
///
/// A new pass supersedes the previous one entirely; nothing is merged.
#[derive(Debug, Clone)]
pub struct UniverseLayout {
    pub policy: TierPolicy,
    pub window: VisibilityWindow,
    pub layout: Layout,
    pub origin: Point,
}

impl UniverseLayout {
    /// All candidates in rank order, visible first
    pub fn into_ranked(self) -> Vec<ScoredCandidate> {
        let mut ranked = self.window.visible;
        ranked.extend(self.window.locked);
        ranked
    }
}

/// Main pipeline orchestrator
///
/// # Pipeline Stages
/// 1. Pairwise scoring against the viewer
/// 2. Ranking (descending score, ties by id)
/// 3. Tier truncation into visible and locked partitions
/// 4. Spatial placement around the viewport center
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    scorer: CompatibilityScorer,
    placer: SpatialPlacer,
}

impl Matcher {
    pub fn new(scorer: CompatibilityScorer, placer: SpatialPlacer) -> Self {
        Self { scorer, placer }
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    pub fn placer(&self) -> &SpatialPlacer {
        &self.placer
    }

    /// Score and rank candidates for a viewer
    ///
    /// The viewer's own record is skipped if it appears in the list.
    pub fn rank(
        &self,
        viewer: &CandidateProfile,
        candidates: Vec<CandidateProfile>,
    ) -> Vec<ScoredCandidate> {
        let mut ranked: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != viewer.id)
            .map(|candidate| self.scorer.score_candidate(viewer, candidate))
            .collect();

        ranked.sort_by(by_rank);
        ranked
    }

    /// Apply a tier and lay out an already ranked list
    ///
    /// Used on its own when only the viewer's tier or the viewport changed.
    pub fn layout_ranked(
        &self,
        ranked: Vec<ScoredCandidate>,
        tier: SubscriptionTier,
        viewport: &ViewportRect,
    ) -> UniverseLayout {
        let policy = TierPolicy::for_tier(tier);
        let window = policy.partition(ranked);
        let origin = viewport.center();
        let layout = self.placer.place(window.iter(), origin, viewport.half_extent());

        tracing::debug!(
            "Universe laid out for tier {:?}: {} visible, {} locked, {} fallback",
            tier,
            window.visible.len(),
            window.locked.len(),
            layout.fallback_count
        );

        UniverseLayout {
            policy,
            window,
            layout,
            origin,
        }
    }

    /// Run the complete pipeline
    pub fn build_universe(
        &self,
        viewer: &CandidateProfile,
        candidates: Vec<CandidateProfile>,
        tier: SubscriptionTier,
        viewport: &ViewportRect,
    ) -> UniverseLayout {
        let ranked = self.rank(viewer, candidates);
        self.layout_ranked(ranked, tier, viewport)
    }
}
