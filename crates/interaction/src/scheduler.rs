//! Frame and timer scheduling capability.
//!
//! The controller never owns an event loop. It asks a [`Scheduler`] for a
//! frame callback or a one-shot timer and gets back a handle; the host later
//! delivers the fired handle to `SurfaceController::on_frame` /
//! `SurfaceController::on_timer`. A handle that was cancelled or replaced in
//! the meantime is simply ignored by the controller.

use std::time::Duration;

use serde::Serialize;
use tracing::trace;

/// Handle of a requested per-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FrameHandle(pub u64);

/// Handle of a one-shot delayed callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerHandle(pub u64);

/// Host scheduling primitives.
pub trait Scheduler {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a frame request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Ask for one callback after `delay`.
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a timer. Unknown or already-fired handles are ignored.
    fn cancel_timer(&mut self, handle: TimerHandle);
}

/// A fired callback, to be routed back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchedulerEvent {
    Timer(TimerHandle),
    Frame(FrameHandle),
}

/// Deterministic scheduler driven by a virtual clock.
///
/// Frames requested before a call to [`advance`](Self::advance) fire once
/// during it; timers fire when the clock reaches their due time.
#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    frames: Vec<FrameHandle>,
    timers: Vec<(Duration, TimerHandle)>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of a pending timer.
    pub fn timer_due(&self, handle: TimerHandle) -> Option<Duration> {
        self.timers
            .iter()
            .find(|(_, h)| *h == handle)
            .map(|(due, _)| *due)
    }

    /// Move the clock forward by `dt`.
    ///
    /// Returns the timers that came due (earliest first, ties in request
    /// order) followed by every frame requested before this call.
    pub fn advance(&mut self, dt: Duration) -> Vec<SchedulerEvent> {
        self.now += dt;
        let now = self.now;

        let mut due: Vec<(Duration, TimerHandle)> = Vec::new();
        self.timers.retain(|&(at, handle)| {
            if at <= now {
                due.push((at, handle));
                false
            } else {
                true
            }
        });
        due.sort();

        let mut events: Vec<SchedulerEvent> = due
            .into_iter()
            .map(|(_, handle)| SchedulerEvent::Timer(handle))
            .collect();
        events.extend(self.frames.drain(..).map(SchedulerEvent::Frame));

        if !events.is_empty() {
            trace!(now_ms = now.as_millis() as u64, events = events.len(), "Scheduler tick");
        }
        events
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for VirtualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }

    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.push((self.now + delay, handle));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.timers.retain(|(_, h)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_fire_once() {
        let mut s = VirtualScheduler::new();
        let f = s.request_frame();
        assert_eq!(s.advance(Duration::from_millis(16)), vec![SchedulerEvent::Frame(f)]);
        assert!(s.advance(Duration::from_millis(16)).is_empty());
    }

    #[test]
    fn test_timer_fires_at_due_time() {
        let mut s = VirtualScheduler::new();
        let t = s.schedule_after(Duration::from_millis(1000));
        assert!(s.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)), vec![SchedulerEvent::Timer(t)]);
    }

    #[test]
    fn test_timers_before_frames_and_in_due_order() {
        let mut s = VirtualScheduler::new();
        let late = s.schedule_after(Duration::from_millis(20));
        let early = s.schedule_after(Duration::from_millis(10));
        let f = s.request_frame();
        assert_eq!(
            s.advance(Duration::from_millis(50)),
            vec![
                SchedulerEvent::Timer(early),
                SchedulerEvent::Timer(late),
                SchedulerEvent::Frame(f)
            ]
        );
    }

    #[test]
    fn test_cancel() {
        let mut s = VirtualScheduler::new();
        let t = s.schedule_after(Duration::from_millis(5));
        let f = s.request_frame();
        s.cancel_timer(t);
        s.cancel_frame(f);
        assert!(s.advance(Duration::from_secs(1)).is_empty());
    }
}
