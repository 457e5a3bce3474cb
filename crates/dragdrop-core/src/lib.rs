#![forbid(unsafe_code)]

//! Core: pointer-driven drag controller.
//!
//! # Role
//! `dragdrop-core` decides, for every pointer event a host delivers, whether
//! a drag starts, continues, or ends, and where the dragged element goes
//! under its axis lock, snap grid, and bounding box.
//!
//! # Primary responsibilities
//! - **DragController**: the Idle/Dragging state machine and listener
//!   bookkeeping ([`controller`]).
//! - **Position math**: snap then clamp, per move ([`position`]).
//! - **Profiles**: per-element options, defaults, and callbacks
//!   ([`profile`], [`registry`]).
//!
//! # How it fits
//! The crate renders nothing and never touches a window system. Hosts
//! implement [`EventHost`] (listener attach/detach, default-action
//! suppression) and [`Surface`] (element lookup, boxes, position writes).
//! `dragdrop-harness` provides headless implementations of both for tests.
//!
//! # Example
//!
//! ```ignore
//! let mut controller = DragController::new(host, &surface);
//! controller.set(
//!     "palette",
//!     DragOptions::new()
//!         .with_mode(AxisMode::HorizontalOnly)
//!         .with_x_range(0, 640)
//!         .with_snap(8),
//!     &mut surface,
//! )?;
//! // in the host event loop:
//! controller.handle(&event, &mut surface);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod position;
pub mod profile;
pub mod registry;

pub use config::ControllerConfig;
pub use controller::{DragController, DragState, DragTransition, ElementRef};
pub use error::{DragError, Result};
pub use event::{
    ElementId, ListenerHandle, ListenerPhase, ListenerTarget, PointerEvent, PointerEventKind,
};
pub use geometry::{Point, Rect, Size};
pub use host::{EventHost, Surface};
pub use profile::{
    Axis, AxisMode, Bounds, DragCallback, DragOptions, DragPhase, DragSettings, DragTarget,
    ElementProfile,
};
