#![forbid(unsafe_code)]

//! Headless test harness for `dragdrop-core`.
//!
//! # Role
//! Stands in for a real window system so the drag controller can be driven
//! deterministically from tests, benches, and fuzz targets.
//!
//! # Pieces
//! - [`HeadlessSurface`]: in-memory elements with immediate or deferred
//!   layout.
//! - [`RecordingHost`]: records attach/detach/prevent calls and the live
//!   listener set.
//! - [`Harness`]: owns both plus the controller, and only delivers events
//!   that have a live listener.
//! - [`Scenario`]: JSON fixtures replayed through a [`Harness`].

pub mod harness;
pub mod host;
pub mod scenario;
pub mod surface;

pub use harness::{CallbackLog, CallbackRecord, Harness};
pub use host::{HostCall, Listener, RecordingHost};
pub use scenario::{Outcome, Scenario, ScenarioError, Step};
pub use surface::{HeadlessSurface, LayoutMode};
