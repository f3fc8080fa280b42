//! Multi-touch gesture recognizer
//!
//! Turns raw touch frames into pan, pinch, double-tap and long-press events.
//! The recognizer never reads a clock: every frame carries its timestamp and
//! the long-press timer is a deadline that the host checks with
//! [`GestureRecognizer::poll`] (or that the next frame expires).
//!
//! Raw deltas and ratios are reported as-is; clamping zoom to a tier's bounds
//! is the caller's job.

use crate::models::Point;
use serde::{Deserialize, Serialize};

/// One active touch as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Pointer event: the phase plus every touch still active after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchFrame {
    pub phase: TouchPhase,
    pub touches: Vec<TouchPoint>,
    #[serde(rename = "timestampMs")]
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureEvent {
    Pan {
        #[serde(rename = "deltaX")]
        delta_x: f64,
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
    Pinch {
        scale: f64,
        center: Point,
    },
    DoubleTap {
        x: f64,
        y: f64,
    },
    LongPress {
        x: f64,
        y: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTiming {
    /// Exclusive bound: a second tap counts only if it starts strictly less
    /// than this many ms after the first.
    pub double_tap_window_ms: u64,
    pub long_press_ms: u64,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            double_tap_window_ms: 300,
            long_press_ms: 500,
        }
    }
}

/// Coarse recognizer state, exposed for hosts and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Panning,
    Pinching,
    /// Three or more touches; moves are ignored until the count changes
    Holding,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tracking {
    Idle,
    Panning { id: u64, last: Point },
    Pinching { ids: (u64, u64), last_distance: f64 },
    Holding,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingLongPress {
    deadline_ms: u64,
    at: Point,
}

/// Session state for one pointer surface
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    timing: GestureTiming,
    tracking: Tracking,
    pending_long_press: Option<PendingLongPress>,
    /// Pans are swallowed for the rest of a gesture once a long press fired
    long_press_fired: bool,
    last_tap_ms: Option<u64>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureTiming::default())
    }
}

impl GestureRecognizer {
    pub fn new(timing: GestureTiming) -> Self {
        Self {
            timing,
            tracking: Tracking::Idle,
            pending_long_press: None,
            long_press_fired: false,
            last_tap_ms: None,
        }
    }

    pub fn timing(&self) -> &GestureTiming {
        &self.timing
    }

    pub fn state(&self) -> GestureState {
        match self.tracking {
            Tracking::Idle => GestureState::Idle,
            Tracking::Panning { .. } => GestureState::Panning,
            Tracking::Pinching { .. } => GestureState::Pinching,
            Tracking::Holding => GestureState::Holding,
        }
    }

    /// When the armed long-press timer expires, if any
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending_long_press.map(|p| p.deadline_ms)
    }

    /// Drop all session state, including the double-tap history
    pub fn reset(&mut self) {
        *self = Self::new(self.timing);
    }

    /// Fire the long-press timer if it has expired by `now_ms`
    pub fn poll(&mut self, now_ms: u64) -> Option<GestureEvent> {
        let pending = self.pending_long_press?;
        if now_ms < pending.deadline_ms {
            return None;
        }

        self.pending_long_press = None;
        self.long_press_fired = true;
        Some(GestureEvent::LongPress {
            x: pending.at.x,
            y: pending.at.y,
        })
    }

    /// Feed one touch frame, returning the gestures it completes
    pub fn handle(&mut self, frame: &TouchFrame) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if let Some(expired) = self.poll(frame.timestamp_ms) {
            events.push(expired);
        }

        match frame.phase {
            TouchPhase::Start => self.on_start(frame, &mut events),
            TouchPhase::Move => self.on_move(&frame.touches, &mut events),
            TouchPhase::End | TouchPhase::Cancel => self.on_release(&frame.touches),
        }

        events
    }

    fn on_start(&mut self, frame: &TouchFrame, events: &mut Vec<GestureEvent>) {
        let [touch] = frame.touches.as_slice() else {
            self.pending_long_press = None;
            self.rebaseline(&frame.touches);
            return;
        };

        let now = frame.timestamp_ms;
        let at = touch.position();
        self.long_press_fired = false;
        self.pending_long_press = None;

        let is_double_tap = self
            .last_tap_ms
            .is_some_and(|last| now.saturating_sub(last) < self.timing.double_tap_window_ms);

        if is_double_tap {
            self.last_tap_ms = None;
            events.push(GestureEvent::DoubleTap { x: at.x, y: at.y });
        } else {
            self.last_tap_ms = Some(now);
            self.pending_long_press = Some(PendingLongPress {
                deadline_ms: now.saturating_add(self.timing.long_press_ms),
                at,
            });
        }

        self.tracking = Tracking::Panning { id: touch.id, last: at };
    }

    fn on_move(&mut self, touches: &[TouchPoint], events: &mut Vec<GestureEvent>) {
        match (self.tracking, touches) {
            (Tracking::Panning { id, last }, [touch]) => {
                if touch.id != id {
                    return;
                }
                let delta_x = touch.x - last.x;
                let delta_y = touch.y - last.y;
                if delta_x == 0.0 && delta_y == 0.0 {
                    return;
                }

                self.pending_long_press = None;
                self.tracking = Tracking::Panning { id, last: touch.position() };
                if !self.long_press_fired {
                    events.push(GestureEvent::Pan { delta_x, delta_y });
                }
            }
            (Tracking::Pinching { ids, last_distance }, [first, second]) => {
                let Some((a, b)) = pair_by_ids(ids, first, second) else {
                    return;
                };
                self.pending_long_press = None;

                let distance = a.position().distance_to(&b.position());
                if last_distance > 0.0 && distance > 0.0 {
                    events.push(GestureEvent::Pinch {
                        scale: distance / last_distance,
                        center: midpoint(a, b),
                    });
                }
                self.tracking = Tracking::Pinching {
                    ids,
                    last_distance: distance,
                };
            }
            (Tracking::Idle, []) | (Tracking::Holding, _) => {}
            // Touch count drifted without a start/end frame
            _ => {
                self.pending_long_press = None;
                self.rebaseline(touches);
            }
        }
    }

    fn on_release(&mut self, remaining: &[TouchPoint]) {
        self.pending_long_press = None;
        if remaining.is_empty() {
            self.tracking = Tracking::Idle;
            self.long_press_fired = false;
        } else {
            self.rebaseline(remaining);
        }
    }

    /// Restart tracking from the current touches without emitting anything
    fn rebaseline(&mut self, touches: &[TouchPoint]) {
        self.tracking = match touches {
            [] => Tracking::Idle,
            [touch] => Tracking::Panning {
                id: touch.id,
                last: touch.position(),
            },
            [a, b] => Tracking::Pinching {
                ids: (a.id, b.id),
                last_distance: a.position().distance_to(&b.position()),
            },
            _ => Tracking::Holding,
        };
    }
}

fn pair_by_ids<'a>(
    ids: (u64, u64),
    first: &'a TouchPoint,
    second: &'a TouchPoint,
) -> Option<(&'a TouchPoint, &'a TouchPoint)> {
    if (first.id, second.id) == ids {
        Some((first, second))
    } else if (second.id, first.id) == ids {
        Some((second, first))
    } else {
        None
    }
}

fn midpoint(a: &TouchPoint, b: &TouchPoint) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
