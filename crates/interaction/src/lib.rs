//! Interactive control of a rendered surface.
//!
//! Pointer drag rotates, the wheel zooms, and autorotation steps the azimuth
//! once per host frame, pausing while the user drags and resuming after a
//! delay. Hover reports the data value under the cursor.

pub mod controller;
pub mod frame;
pub mod hover;
pub mod model;
pub mod scheduler;

pub use controller::{InteractionState, PointerEvent, SurfaceController};
pub use frame::{FlushOutcome, FrameRenderer};
pub use hover::{hover_from_faces, hover_from_pixel, Tooltip};
pub use model::{Field, SurfaceModel};
pub use scheduler::{FrameHandle, Scheduler, SchedulerEvent, TimerHandle, VirtualScheduler};
