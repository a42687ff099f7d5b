//! Interaction state machine.
//!
//! [`SurfaceController`] turns pointer, wheel and scheduler events into model
//! mutations and re-renders. Every handler runs to completion; the only
//! asynchronous boundaries are the frame and timer callbacks the host routes
//! back through [`SurfaceController::on_frame`] and
//! [`SurfaceController::on_timer`].
//!
//! The state is not stored; it is derived from the session fields:
//!
//! | state           | condition                         |
//! |-----------------|-----------------------------------|
//! | `Dragging`      | a drag is active                  |
//! | `PendingResume` | a resume timer is pending         |
//! | `Autorotating`  | a frame callback is pending       |
//! | `Idle`          | none of the above                 |

use std::time::Duration;

use renderer::{PixmapSurface, RasterSurface};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::frame::FrameRenderer;
use crate::hover::Tooltip;
use crate::model::SurfaceModel;
use crate::scheduler::{FrameHandle, Scheduler, SchedulerEvent, TimerHandle, VirtualScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    Idle,
    Dragging,
    Autorotating,
    PendingResume,
}

/// Host input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Wheel { delta_y: f64 },
}

/// Pointer position and orientation captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragStart {
    x: f64,
    y: f64,
    azimuth: f64,
    elevation: f64,
}

pub struct SurfaceController<S: Scheduler, R: RasterSurface = PixmapSurface> {
    model: SurfaceModel,
    frames: FrameRenderer<R>,
    scheduler: S,
    drag: Option<DragStart>,
    resume_timer: Option<TimerHandle>,
    frame_handle: Option<FrameHandle>,
    tooltip: Option<Tooltip>,
    started: bool,
}

impl<S: Scheduler> SurfaceController<S, PixmapSurface> {
    /// Controller with pixmap surfaces sized from the model's options.
    pub fn with_pixmaps(model: SurfaceModel, scheduler: S) -> surface_common::SurfaceResult<Self> {
        let frames = FrameRenderer::for_options(model.options())?;
        Ok(Self::new(model, frames, scheduler))
    }
}

impl<S: Scheduler, R: RasterSurface> SurfaceController<S, R> {
    pub fn new(model: SurfaceModel, frames: FrameRenderer<R>, scheduler: S) -> Self {
        Self {
            model,
            frames,
            scheduler,
            drag: None,
            resume_timer: None,
            frame_handle: None,
            tooltip: None,
            started: false,
        }
    }

    pub fn model(&self) -> &SurfaceModel {
        &self.model
    }

    pub fn frames(&self) -> &FrameRenderer<R> {
        &self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn state(&self) -> InteractionState {
        if self.drag.is_some() {
            InteractionState::Dragging
        } else if self.resume_timer.is_some() {
            InteractionState::PendingResume
        } else if self.frame_handle.is_some() {
            InteractionState::Autorotating
        } else {
            InteractionState::Idle
        }
    }

    /// Render-start: paint the first frame and begin autorotation if it is
    /// configured.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.frames.mark_all_dirty();
        self.frames.flush(&mut self.model);
        info!(
            autorotate = self.model.options().autorotate,
            azimuth = self.model.view().azimuth(),
            elevation = self.model.view().elevation(),
            "Surface controller started"
        );
        if self.model.options().autorotate {
            self.start_autorotation();
        }
    }

    /// Apply model edits, then repaint whatever they invalidated.
    ///
    /// Use [`set_autorotate`](Self::set_autorotate) to toggle autorotation so
    /// the frame schedule follows.
    pub fn update<F: FnOnce(&mut SurfaceModel)>(&mut self, edit: F) {
        edit(&mut self.model);
        self.flush();
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.cancel_resume();
        self.stop_autorotation();
        self.tooltip = None;
        let view = self.model.view();
        self.drag = Some(DragStart {
            x,
            y,
            azimuth: view.azimuth(),
            elevation: view.elevation(),
        });
        debug!(x, y, "Drag started");
    }

    /// While dragging, rotate by the delta from the drag start. Otherwise
    /// update the hover tooltip if hover is enabled.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(start) = self.drag {
            let sensitivity = self.model.options().interaction.drag_sensitivity_deg_per_px;
            let dx = x - start.x;
            let dy = y - start.y;
            self.model.set_azimuth(start.azimuth - dx * sensitivity);
            self.model.set_elevation(start.elevation - dy * sensitivity);
            self.flush();
        } else if self.model.options().enable_hover {
            let canvas = self.frames.surface().size();
            self.tooltip = self
                .frames
                .hover(&self.model, x, y)
                .map(|value| Tooltip::at(x, y, value, canvas));
        }
    }

    /// End a drag. Does nothing when no drag is active.
    pub fn pointer_up(&mut self) {
        if self.drag.take().is_none() {
            return;
        }
        debug!("Drag ended");
        if self.model.options().autorotate {
            self.cancel_resume();
            let delay = Duration::from_millis(self.model.options().interaction.resume_delay_ms);
            self.resume_timer = Some(self.scheduler.schedule_after(delay));
            debug!(delay_ms = delay.as_millis() as u64, "Autorotation resume scheduled");
        }
    }

    /// Pointer left the canvas: hide the tooltip and end any drag.
    pub fn pointer_leave(&mut self) {
        self.tooltip = None;
        self.pointer_up();
    }

    /// Zoom one step per wheel notch; negative `delta_y` zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        let step = self.model.options().interaction.wheel_zoom_step;
        let zoom = self.model.view().zoom() - delta_y.signum() * step;
        self.model.set_zoom(zoom);
        self.flush();
    }

    pub fn set_autorotate(&mut self, on: bool) {
        self.model.set_autorotate(on);
        if on {
            if self.started && self.drag.is_none() && self.resume_timer.is_none() {
                self.start_autorotation();
            }
        } else {
            self.cancel_resume();
            self.stop_autorotation();
        }
    }

    /// Per-frame autorotation step. Stale handles are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.frame_handle != Some(handle) {
            return;
        }
        self.frame_handle = None;

        let options = self.model.options();
        if !options.autorotate || self.drag.is_some() {
            return;
        }
        let step = options.rotation_speed * options.interaction.autorotate_step_factor;
        let azimuth = self.model.view().azimuth() + step;
        self.model.set_azimuth(azimuth);
        self.flush();
        self.frame_handle = Some(self.scheduler.request_frame());
    }

    /// Resume timer fired. Stale handles are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.resume_timer != Some(handle) {
            return;
        }
        self.resume_timer = None;
        if self.model.options().autorotate && self.drag.is_none() {
            debug!("Autorotation resumed");
            self.start_autorotation();
        }
    }

    /// Route a fired scheduler callback.
    pub fn handle(&mut self, event: SchedulerEvent) {
        match event {
            SchedulerEvent::Frame(handle) => self.on_frame(handle),
            SchedulerEvent::Timer(handle) => self.on_timer(handle),
        }
    }

    pub fn dispatch(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(x, y),
            PointerEvent::Move { x, y } => self.pointer_move(x, y),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
            PointerEvent::Wheel { delta_y } => self.wheel(delta_y),
        }
    }

    /// Cancel every pending callback and reset the session.
    pub fn teardown(&mut self) {
        self.cancel_resume();
        self.stop_autorotation();
        self.drag = None;
        self.tooltip = None;
        self.started = false;
        info!("Surface controller torn down");
    }

    fn flush(&mut self) {
        self.frames.flush(&mut self.model);
    }

    fn start_autorotation(&mut self) {
        if self.frame_handle.is_none() {
            self.frame_handle = Some(self.scheduler.request_frame());
        }
    }

    fn stop_autorotation(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn cancel_resume(&mut self) {
        if let Some(handle) = self.resume_timer.take() {
            self.scheduler.cancel_timer(handle);
        }
    }
}

impl<R: RasterSurface> SurfaceController<VirtualScheduler, R> {
    /// Advance the virtual clock and deliver every callback that fired.
    /// Returns the number of callbacks delivered.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let events = self.scheduler.advance(dt);
        let count = events.len();
        for event in events {
            self.handle(event);
        }
        count
    }
}
