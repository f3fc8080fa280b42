use crate::config::Settings;
use crate::core::{
    gesture::{GestureRecognizer, GestureTiming},
    placement::SpatialPlacer,
    presentation::StarAppearance,
    scoring::CompatibilityScorer,
    tier::TierPolicy,
    viewport::ViewportCuller,
    Matcher,
};
use crate::models::{
    GestureReplayRequest, GestureReplayResponse, ScoreReport, StarView, UniverseRequest,
    UniverseResponse,
};

/// Request handlers shared by the CLI and embedding hosts
#[derive(Debug, Clone)]
pub struct Engine {
    matcher: Matcher,
    cull_margin: f64,
    gesture: GestureTiming,
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Engine {
    pub fn new(matcher: Matcher, cull_margin: f64, gesture: GestureTiming) -> Self {
        Self {
            matcher,
            cull_margin,
            gesture,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let scorer = CompatibilityScorer::new(settings.scoring.weights, settings.scoring.locality);
        let placer = SpatialPlacer::new(settings.layout);

        Self::new(
            Matcher::new(scorer, placer),
            settings.viewport.margin,
            settings.gesture,
        )
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Score, rank, truncate, place and cull one universe
    pub fn universe(&self, request: UniverseRequest) -> UniverseResponse {
        let UniverseRequest {
            viewer,
            candidates,
            viewer_tier,
            viewport,
            mut transform,
        } = request;

        tracing::info!(
            "Building universe for {} with {} candidates (tier {:?})",
            viewer.id,
            candidates.len(),
            viewer_tier
        );

        let universe = self
            .matcher
            .build_universe(&viewer, candidates, viewer_tier, &viewport);
        let culler = ViewportCuller::new(viewport, self.cull_margin);
        transform.clamp_to(universe.policy.zoom);

        let stars: Vec<StarView> = universe
            .window
            .iter()
            .zip(&universe.layout.placements)
            .map(|((candidate, _), placement)| StarView {
                placement: placement.clone(),
                appearance: StarAppearance::new(candidate.score, candidate.profile.tier),
                on_screen: culler.is_visible(placement, &transform),
            })
            .collect();

        let on_screen_count = stars.iter().filter(|star| star.on_screen).count();

        UniverseResponse {
            policy: universe.policy,
            visible_count: universe.window.visible.len(),
            locked_count: universe.window.locked.len(),
            fallback_count: universe.layout.fallback_count,
            on_screen_count,
            stars,
        }
    }

    /// Ranked score breakdowns, without tier truncation
    pub fn scores(&self, request: UniverseRequest) -> Vec<ScoreReport> {
        self.matcher
            .rank(&request.viewer, request.candidates)
            .into_iter()
            .map(|scored| ScoreReport {
                candidate_id: scored.profile.id,
                breakdown: scored.breakdown,
            })
            .collect()
    }

    /// Run recorded frames through a fresh recognizer
    ///
    /// Timers only fire when a later frame arrives past their deadline.
    pub fn replay(&self, request: &GestureReplayRequest) -> GestureReplayResponse {
        let policy = TierPolicy::for_tier(request.viewer_tier);
        let origin = request.viewport.center();
        let mut recognizer = GestureRecognizer::new(self.gesture);
        let mut transform = request.transform;
        transform.clamp_to(policy.zoom);

        let mut events = Vec::new();
        for frame in &request.frames {
            for event in recognizer.handle(frame) {
                transform.apply(&event, origin, policy.zoom);
                events.push(event);
            }
        }

        tracing::info!(
            "Replayed {} frames into {} gestures",
            request.frames.len(),
            events.len()
        );

        GestureReplayResponse { events, transform }
    }
}
