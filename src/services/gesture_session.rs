use crate::core::{
    gesture::{GestureEvent, GestureRecognizer, GestureTiming, TouchFrame},
    tier::{TierPolicy, ZoomBounds},
};
use crate::models::{Point, ViewerTransform};
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Timer-driven gesture session for one pointer surface
///
/// Owns the recognizer and the view's transform. Touch frames come in over a
/// channel, the long-press timer is a scheduled wake-up that is dropped as
/// soon as the recognizer disarms it, and every gesture is applied to the
/// transform before the whole transform is published as one snapshot.
///
/// The snapshot is authoritative. Events are best effort: when the host
/// is not draining `events` they are dropped rather than holding up frames.
pub struct GestureSession {
    recognizer: GestureRecognizer,
    transform: ViewerTransform,
    bounds: ZoomBounds,
    origin: Point,
    transform_tx: watch::Sender<ViewerTransform>,
}

/// Host side of a spawned session
pub struct GestureSessionHandle {
    pub frames: mpsc::Sender<TouchFrame>,
    pub events: mpsc::Receiver<GestureEvent>,
    pub transform: watch::Receiver<ViewerTransform>,
    /// Resolves to the final transform once `frames` is dropped
    pub task: JoinHandle<ViewerTransform>,
}

impl GestureSession {
    pub fn new(
        timing: GestureTiming,
        policy: &TierPolicy,
        origin: Point,
        initial: ViewerTransform,
    ) -> (Self, watch::Receiver<ViewerTransform>) {
        let mut transform = initial;
        transform.clamp_to(policy.zoom);
        let (transform_tx, transform_rx) = watch::channel(transform);

        let session = Self {
            recognizer: GestureRecognizer::new(timing),
            transform,
            bounds: policy.zoom,
            origin,
            transform_tx,
        };
        (session, transform_rx)
    }

    /// Spawn the session on the current runtime
    pub fn spawn(
        timing: GestureTiming,
        policy: &TierPolicy,
        origin: Point,
        initial: ViewerTransform,
        capacity: usize,
    ) -> GestureSessionHandle {
        let (session, transform) = Self::new(timing, policy, origin, initial);
        let (frames_tx, frames_rx) = mpsc::channel(capacity);
        let (events_tx, events_rx) = mpsc::channel(capacity);

        let task = tokio::spawn(session.run(frames_rx, events_tx));

        GestureSessionHandle {
            frames: frames_tx,
            events: events_rx,
            transform,
            task,
        }
    }

    /// Process frames until the sender side closes
    pub async fn run(
        mut self,
        mut frames: mpsc::Receiver<TouchFrame>,
        events: mpsc::Sender<GestureEvent>,
    ) -> ViewerTransform {
        // Host timestamp of the last frame and when it arrived
        let mut clock: Option<(u64, Instant)> = None;

        loop {
            let wake = self
                .recognizer
                .next_deadline()
                .zip(clock)
                .map(|(deadline_ms, (seen_ms, seen_at))| {
                    let wait = Duration::from_millis(deadline_ms.saturating_sub(seen_ms));
                    (deadline_ms, seen_at + wait)
                });

            tokio::select! {
                frame = frames.recv() => {
                    let Some(frame) = frame else {
                        break;
                    };
                    clock = Some((frame.timestamp_ms, Instant::now()));
                    for event in self.recognizer.handle(&frame) {
                        self.dispatch(event, &events);
                    }
                }
                _ = sleep_until(wake.map(|(_, at)| at).unwrap_or_else(Instant::now)), if wake.is_some() => {
                    if let Some((deadline_ms, _)) = wake {
                        if let Some(event) = self.recognizer.poll(deadline_ms) {
                            self.dispatch(event, &events);
                        }
                    }
                }
            }
        }

        tracing::debug!("Gesture session closed with transform {:?}", self.transform);
        self.transform
    }

    fn dispatch(&mut self, event: GestureEvent, events: &mpsc::Sender<GestureEvent>) {
        if self.transform.apply(&event, self.origin, self.bounds) {
            self.transform_tx.send_replace(self.transform);
        }

        match events.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::trace!("Gesture event dropped, listener is behind: {:?}", event);
            }
            Err(TrySendError::Closed(event)) => {
                tracing::trace!("Gesture event dropped, no listener: {:?}", event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gesture::{TouchPhase, TouchPoint};
    use crate::models::SubscriptionTier;

    fn frame(phase: TouchPhase, t: u64, touches: &[(u64, f64, f64)]) -> TouchFrame {
        TouchFrame {
            phase,
            touches: touches.iter().map(|&(id, x, y)| TouchPoint { id, x, y }).collect(),
            timestamp_ms: t,
        }
    }

    fn spawn(tier: SubscriptionTier) -> GestureSessionHandle {
        spawn_with_capacity(tier, 16)
    }

    fn spawn_with_capacity(tier: SubscriptionTier, capacity: usize) -> GestureSessionHandle {
        GestureSession::spawn(
            GestureTiming::default(),
            &TierPolicy::for_tier(tier),
            Point::new(200.0, 400.0),
            ViewerTransform::default(),
            capacity,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_press_fires_after_delay() {
        let mut handle = spawn(SubscriptionTier::Base);

        handle.frames.send(frame(TouchPhase::Start, 0, &[(1, 30.0, 40.0)])).await.unwrap();

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(handle.events.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(
            handle.events.recv().await,
            Some(GestureEvent::LongPress { x: 30.0, y: 40.0 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_cancels_timer() {
        let mut handle = spawn(SubscriptionTier::Base);

        handle.frames.send(frame(TouchPhase::Start, 0, &[(1, 30.0, 40.0)])).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.frames.send(frame(TouchPhase::End, 100, &[])).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert!(handle.events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pan_updates_transform_snapshot() {
        let mut handle = spawn(SubscriptionTier::Plus);

        handle.frames.send(frame(TouchPhase::Start, 0, &[(1, 10.0, 10.0)])).await.unwrap();
        handle.frames.send(frame(TouchPhase::Move, 16, &[(1, 25.0, 5.0)])).await.unwrap();

        assert_eq!(
            handle.events.recv().await,
            Some(GestureEvent::Pan { delta_x: 15.0, delta_y: -5.0 })
        );
        assert_eq!(handle.transform.borrow().pan_offset, Point::new(15.0, -5.0));

        drop(handle.frames);
        let last = handle.task.await.unwrap();
        assert_eq!(last.pan_offset, Point::new(15.0, -5.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pinch_is_clamped_by_tier() {
        let mut handle = spawn(SubscriptionTier::Base);

        handle.frames.send(frame(TouchPhase::Start, 0, &[(1, 0.0, 0.0)])).await.unwrap();
        handle
            .frames
            .send(frame(TouchPhase::Start, 5, &[(1, 0.0, 0.0), (2, 100.0, 0.0)]))
            .await
            .unwrap();
        handle
            .frames
            .send(frame(TouchPhase::Move, 20, &[(1, 0.0, 0.0), (2, 300.0, 0.0)]))
            .await
            .unwrap();

        // Raw ratio is reported, the transform is clamped to the base tier's 1.3
        assert!(matches!(
            handle.events.recv().await,
            Some(GestureEvent::Pinch { scale, .. }) if scale == 3.0
        ));
        assert_eq!(handle.transform.borrow().zoom_scale, 1.3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_undrained_events_do_not_stall_frames() {
        let handle = spawn_with_capacity(SubscriptionTier::Plus, 4);

        handle.frames.send(frame(TouchPhase::Start, 0, &[(1, 0.0, 0.0)])).await.unwrap();
        for step in 1..=20u64 {
            let sent = tokio::time::timeout(
                Duration::from_secs(1),
                handle.frames.send(frame(TouchPhase::Move, step * 16, &[(1, step as f64, 0.0)])),
            )
            .await;
            assert!(matches!(sent, Ok(Ok(()))), "frame {} stalled", step);
        }

        // Let the session drain the frame queue
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(handle.transform.borrow().pan_offset, Point::new(20.0, 0.0));

        drop(handle.frames);
        let last = handle.task.await.unwrap();
        assert_eq!(last.pan_offset, Point::new(20.0, 0.0));

        // Only the first few events made it into the channel
        let mut events = handle.events;
        let mut received = 0;
        while events.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, 4);
    }
}
