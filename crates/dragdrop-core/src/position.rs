#![forbid(unsafe_code)]

//! Position computation for a single pointer-move.
//!
//! # Algorithm
//!
//! ```text
//! raw      = pointer - offset
//! snapped  = raw - (raw % snap)          truncated remainder, per axis
//! write snapped on every axis the mode enables
//! clamp, per enabled axis:
//!     raw <= min                    -> write min
//!     rendered.far_edge >= max      -> write max - rendered.size
//! ```
//!
//! # Invariants
//!
//! 1. Before clamping, every written coordinate is a multiple of the grid
//!    (`coord % snap == 0`). The remainder follows the sign of `raw`, so
//!    negative positions snap toward zero.
//! 2. The lower bound is tested against the raw pointer-relative value,
//!    not the snapped one.
//! 3. The upper bound is tested against the box read back from the surface
//!    after the snap and lower-bound writes. It is applied last, so an
//!    element wider than its range ends up pinned to `max - width`.
//! 4. A disabled axis is never written.

use crate::event::ElementId;
use crate::geometry::{Point, Rect};
use crate::host::Surface;
use crate::profile::DragSettings;

/// Round `raw` toward zero onto a multiple of `grid`.
///
/// `grid` must be positive; [`DragSettings::grid`] guarantees that.
#[inline]
#[must_use]
pub const fn snap_to_grid(raw: i32, grid: i32) -> i32 {
    raw - raw % grid
}

/// Which bounds forced a position during one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClampHits {
    pub min_x: bool,
    pub max_x: bool,
    pub min_y: bool,
    pub max_y: bool,
}

impl ClampHits {
    #[must_use]
    pub const fn any(&self) -> bool {
        self.min_x || self.max_x || self.min_y || self.max_y
    }
}

/// Summary of what a move wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Pointer position minus the captured offset.
    pub raw: Point,
    /// `raw` snapped onto the grid, before clamping.
    pub snapped: Point,
    /// Bounds that overrode the snapped value.
    pub clamped: ClampHits,
    /// Box reported by the surface after all writes.
    pub rect: Option<Rect>,
}

/// Apply one pointer-move to `element`.
///
/// Returns `None` without writing anything if the surface no longer knows
/// the element.
pub fn apply_move<S: Surface + ?Sized>(
    surface: &mut S,
    element: ElementId,
    pointer: Point,
    offset: Point,
    settings: &DragSettings,
) -> Option<MoveReport> {
    surface.element_box(element)?;

    let raw = pointer.saturating_sub(offset);
    let grid = settings.grid();
    let snapped = Point::new(snap_to_grid(raw.x, grid), snap_to_grid(raw.y, grid));
    let mode = settings.mode;
    let bounds = settings.bounds;

    if mode.moves_x() {
        surface.set_left(element, snapped.x);
    }
    if mode.moves_y() {
        surface.set_top(element, snapped.y);
    }

    let mut clamped = ClampHits::default();

    if mode.moves_x() {
        if raw.x <= bounds.min_x {
            surface.set_left(element, bounds.min_x);
            clamped.min_x = true;
        }
        if let Some(rect) = surface.element_box(element)
            && rect.right() >= bounds.max_x
        {
            surface.set_left(element, bounds.max_x.saturating_sub(rect.width));
            clamped.max_x = true;
        }
    }

    if mode.moves_y() {
        if raw.y <= bounds.min_y {
            surface.set_top(element, bounds.min_y);
            clamped.min_y = true;
        }
        if let Some(rect) = surface.element_box(element)
            && rect.bottom() >= bounds.max_y
        {
            surface.set_top(element, bounds.max_y.saturating_sub(rect.height));
            clamped.max_y = true;
        }
    }

    Some(MoveReport {
        raw,
        snapped,
        clamped,
        rect: surface.element_box(element),
    })
}
