// Core algorithm exports
pub mod affinity;
pub mod distance;
pub mod gesture;
pub mod matcher;
pub mod placement;
pub mod presentation;
pub mod scoring;
pub mod tier;
pub mod viewport;

pub use affinity::{answer_affinity, sign_affinity, Category};
pub use distance::{distance_between, haversine_distance};
pub use gesture::{GestureEvent, GestureRecognizer, GestureState, GestureTiming, TouchFrame, TouchPhase, TouchPoint};
pub use matcher::{Matcher, UniverseLayout};
pub use placement::{Layout, PlacementParams, SpatialPlacer, GOLDEN_ANGLE};
pub use presentation::{CompatibilityLabel, Magnitude, StarAppearance};
pub use scoring::{by_rank, CompatibilityScorer, LocalityBonus};
pub use tier::{TierPolicy, VisibilityWindow, VisibleLimit, ZoomBounds};
pub use viewport::ViewportCuller;
