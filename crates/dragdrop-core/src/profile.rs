#![forbid(unsafe_code)]

//! Per-element drag configuration and runtime state.
//!
//! A registered element owns one [`ElementProfile`]: the resolved
//! [`DragSettings`] (axis mode, bounds, snap), the user callbacks, and the
//! pointer offset captured when its current drag started.
//!
//! Callers describe a profile with [`DragOptions`], a record of optional
//! fields. Anything left unset falls back to a documented default when the
//! options are resolved against the controller's configuration:
//!
//! | field   | default                          |
//! |---------|----------------------------------|
//! | `mode`  | [`AxisMode::Both`]               |
//! | `min_x` | `0`                              |
//! | `max_x` | surface extent width             |
//! | `min_y` | `0`                              |
//! | `max_y` | surface extent height            |
//! | `snap`  | `1` (no snapping)                |
//! | callbacks | no-op                          |
//!
//! Only an unset (`None`) bound takes the default. An explicit `Some(0)` is a
//! real bound: `max_x = Some(0)` pins the element's right edge at 0.
//!
//! # Invariants
//!
//! 1. A resolved snap is always at least 1; `0` means "use the default".
//! 2. `offset` is only meaningful while the element is the active drag
//!    target. It is left stale afterwards.
//! 3. `min <= max` per axis is not enforced unless the controller runs with
//!    strict bounds (see [`ControllerConfig`](crate::config::ControllerConfig)).

use std::fmt;

use crate::config::ControllerConfig;
use crate::error::{DragError, Result};
use crate::event::ElementId;
use crate::geometry::{Point, Rect, Size};

// ---------------------------------------------------------------------------
// Axis / AxisMode
// ---------------------------------------------------------------------------

/// A single coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Which axes an element may move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AxisMode {
    /// Free movement in the plane.
    #[default]
    Both,
    /// Left changes, top stays put.
    #[cfg_attr(feature = "serde", serde(alias = "horizontal"))]
    HorizontalOnly,
    /// Top changes, left stays put.
    #[cfg_attr(feature = "serde", serde(alias = "vertical"))]
    VerticalOnly,
}

impl AxisMode {
    /// Whether the horizontal position is written.
    #[inline]
    #[must_use]
    pub const fn moves_x(self) -> bool {
        !matches!(self, Self::VerticalOnly)
    }

    /// Whether the vertical position is written.
    #[inline]
    #[must_use]
    pub const fn moves_y(self) -> bool {
        !matches!(self, Self::HorizontalOnly)
    }

    /// Legacy numeric code (0 = both, 1 = horizontal, 2 = vertical).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Both => 0,
            Self::HorizontalOnly => 1,
            Self::VerticalOnly => 2,
        }
    }
}

impl TryFrom<u8> for AxisMode {
    type Error = u8;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Both),
            1 => Ok(Self::HorizontalOnly),
            2 => Ok(Self::VerticalOnly),
            other => Err(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Bounds / DragSettings
// ---------------------------------------------------------------------------

/// Absolute bounding box in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    #[must_use]
    pub const fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Bounds covering `(0, 0)` to the given extent.
    #[must_use]
    pub const fn from_extent(extent: Size) -> Self {
        Self::new(0, extent.width, 0, extent.height)
    }

    /// Check `min <= max` on both axes.
    pub fn validate(&self) -> Result<()> {
        if self.min_x > self.max_x {
            return Err(DragError::InvalidBounds {
                axis: Axis::X,
                min: self.min_x,
                max: self.max_x,
            });
        }
        if self.min_y > self.max_y {
            return Err(DragError::InvalidBounds {
                axis: Axis::Y,
                min: self.min_y,
                max: self.max_y,
            });
        }
        Ok(())
    }
}

/// The geometric part of a profile. Callbacks may edit it mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSettings {
    pub mode: AxisMode,
    pub bounds: Bounds,
    /// Grid size in pixels. `0` is read as `1`.
    pub snap: u32,
}

impl DragSettings {
    /// Snap step as a signed divisor, never zero.
    #[inline]
    #[must_use]
    pub fn grid(&self) -> i32 {
        i32::try_from(self.snap.max(1)).unwrap_or(i32::MAX)
    }
}

// ---------------------------------------------------------------------------
// Callbacks
// ---------------------------------------------------------------------------

/// A drag lifecycle callback.
pub type DragCallback = Box<dyn FnMut(&mut DragTarget<'_>)>;

/// Point in the drag lifecycle at which a callback fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Start,
    Move,
    Stop,
}

/// The three optional lifecycle callbacks of a profile.
#[derive(Default)]
pub struct DragCallbacks {
    on_start: Option<DragCallback>,
    on_move: Option<DragCallback>,
    on_stop: Option<DragCallback>,
}

impl DragCallbacks {
    /// Invoke the callback registered for `phase`, if any.
    pub fn fire(&mut self, phase: DragPhase, target: &mut DragTarget<'_>) {
        let slot = match phase {
            DragPhase::Start => &mut self.on_start,
            DragPhase::Move => &mut self.on_move,
            DragPhase::Stop => &mut self.on_stop,
        };
        if let Some(callback) = slot {
            callback(target);
        }
    }

    #[must_use]
    pub fn is_set(&self, phase: DragPhase) -> bool {
        match phase {
            DragPhase::Start => self.on_start.is_some(),
            DragPhase::Move => self.on_move.is_some(),
            DragPhase::Stop => self.on_stop.is_some(),
        }
    }
}

impl fmt::Debug for DragCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_move", &self.on_move.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .finish()
    }
}

/// What a callback sees: the element, its captured offset, its current box,
/// and mutable access to its settings.
pub struct DragTarget<'a> {
    element: ElementId,
    offset: Point,
    rect: Option<Rect>,
    settings: &'a mut DragSettings,
}

impl<'a> DragTarget<'a> {
    pub(crate) fn new(
        element: ElementId,
        offset: Point,
        rect: Option<Rect>,
        settings: &'a mut DragSettings,
    ) -> Self {
        Self {
            element,
            offset,
            rect,
            settings,
        }
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Pointer-to-origin offset captured at drag start.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// The element's rendered box as the surface reported it just before
    /// the callback ran.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    #[must_use]
    pub fn settings(&self) -> &DragSettings {
        self.settings
    }

    pub fn settings_mut(&mut self) -> &mut DragSettings {
        self.settings
    }

    /// Replace the bounding box for the rest of the drag.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.settings.bounds = bounds;
    }
}

impl fmt::Debug for DragTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragTarget")
            .field("element", &self.element)
            .field("offset", &self.offset)
            .field("rect", &self.rect)
            .field("settings", &self.settings)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DragOptions
// ---------------------------------------------------------------------------

/// Registration options. Every field is optional; see the module docs for
/// the defaults.
#[derive(Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DragOptions {
    pub mode: Option<AxisMode>,
    pub min_x: Option<i32>,
    pub max_x: Option<i32>,
    pub min_y: Option<i32>,
    pub max_y: Option<i32>,
    pub snap: Option<u32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_start: Option<DragCallback>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_move: Option<DragCallback>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_stop: Option<DragCallback>,
}

impl DragOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: AxisMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Horizontal travel range for the element's left edge and right edge.
    #[must_use]
    pub fn with_x_range(mut self, min: i32, max: i32) -> Self {
        self.min_x = Some(min);
        self.max_x = Some(max);
        self
    }

    /// Vertical travel range for the element's top edge and bottom edge.
    #[must_use]
    pub fn with_y_range(mut self, min: i32, max: i32) -> Self {
        self.min_y = Some(min);
        self.max_y = Some(max);
        self
    }

    #[must_use]
    pub fn with_bounds(self, bounds: Bounds) -> Self {
        self.with_x_range(bounds.min_x, bounds.max_x)
            .with_y_range(bounds.min_y, bounds.max_y)
    }

    #[must_use]
    pub fn with_snap(mut self, snap: u32) -> Self {
        self.snap = Some(snap);
        self
    }

    #[must_use]
    pub fn on_start(mut self, callback: impl FnMut(&mut DragTarget<'_>) + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_move(mut self, callback: impl FnMut(&mut DragTarget<'_>) + 'static) -> Self {
        self.on_move = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_stop(mut self, callback: impl FnMut(&mut DragTarget<'_>) + 'static) -> Self {
        self.on_stop = Some(Box::new(callback));
        self
    }

    /// Fill unset fields from `config` and `extent`.
    ///
    /// With strict bounds enabled, an explicit snap of 0 or an inverted
    /// range is rejected. Otherwise snap 0 silently becomes the default and
    /// inverted ranges are kept as given.
    pub fn resolve(self, config: &ControllerConfig, extent: Size) -> Result<ElementProfile> {
        if config.strict_bounds && self.snap == Some(0) {
            return Err(DragError::InvalidSnap);
        }

        let defaults = Bounds::from_extent(extent);
        let settings = DragSettings {
            mode: self.mode.unwrap_or(config.default_mode),
            bounds: Bounds {
                min_x: self.min_x.unwrap_or(defaults.min_x),
                max_x: self.max_x.unwrap_or(defaults.max_x),
                min_y: self.min_y.unwrap_or(defaults.min_y),
                max_y: self.max_y.unwrap_or(defaults.max_y),
            },
            snap: self
                .snap
                .filter(|&snap| snap > 0)
                .unwrap_or(config.default_snap)
                .max(1),
        };

        if config.strict_bounds {
            settings.bounds.validate()?;
        }

        Ok(ElementProfile {
            settings,
            callbacks: DragCallbacks {
                on_start: self.on_start,
                on_move: self.on_move,
                on_stop: self.on_stop,
            },
            offset: Point::default(),
        })
    }
}

impl fmt::Debug for DragOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragOptions")
            .field("mode", &self.mode)
            .field("min_x", &self.min_x)
            .field("max_x", &self.max_x)
            .field("min_y", &self.min_y)
            .field("max_y", &self.max_y)
            .field("snap", &self.snap)
            .field("on_start", &self.on_start.is_some())
            .field("on_move", &self.on_move.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ElementProfile
// ---------------------------------------------------------------------------

/// Resolved configuration plus transient drag state for one element.
#[derive(Debug)]
pub struct ElementProfile {
    pub(crate) settings: DragSettings,
    pub(crate) callbacks: DragCallbacks,
    pub(crate) offset: Point,
}

impl ElementProfile {
    #[must_use]
    pub fn settings(&self) -> &DragSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut DragSettings {
        &mut self.settings
    }

    #[must_use]
    pub fn mode(&self) -> AxisMode {
        self.settings.mode
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.settings.bounds
    }

    #[must_use]
    pub fn snap(&self) -> u32 {
        self.settings.snap
    }

    /// Offset captured at the most recent drag start. Stale when idle.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    #[must_use]
    pub fn callbacks(&self) -> &DragCallbacks {
        &self.callbacks
    }

    /// Run the `phase` callback with a [`DragTarget`] view of this profile.
    pub(crate) fn fire(&mut self, phase: DragPhase, element: ElementId, rect: Option<Rect>) {
        let mut target = DragTarget::new(element, self.offset, rect, &mut self.settings);
        self.callbacks.fire(phase, &mut target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const EXTENT: Size = Size::new(1024, 768);

    fn resolve(options: DragOptions) -> ElementProfile {
        options
            .resolve(&ControllerConfig::default(), EXTENT)
            .expect("lenient resolve never fails")
    }

    #[test]
    fn defaults_cover_surface_extent() {
        let profile = resolve(DragOptions::new());
        assert_eq!(profile.mode(), AxisMode::Both);
        assert_eq!(profile.bounds(), Bounds::new(0, 1024, 0, 768));
        assert_eq!(profile.snap(), 1);
        assert!(!profile.callbacks().is_set(DragPhase::Start));
        assert!(!profile.callbacks().is_set(DragPhase::Move));
        assert!(!profile.callbacks().is_set(DragPhase::Stop));
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let profile = resolve(
            DragOptions::new()
                .with_mode(AxisMode::VerticalOnly)
                .with_x_range(10, 200)
                .with_y_range(-50, 50)
                .with_snap(8),
        );
        assert_eq!(profile.mode(), AxisMode::VerticalOnly);
        assert_eq!(profile.bounds(), Bounds::new(10, 200, -50, 50));
        assert_eq!(profile.snap(), 8);
    }

    #[test]
    fn partial_bounds_keep_remaining_defaults() {
        let mut options = DragOptions::new();
        options.max_y = Some(300);
        let profile = resolve(options);
        assert_eq!(profile.bounds(), Bounds::new(0, 1024, 0, 300));
    }

    #[test]
    fn explicit_zero_bound_is_kept() {
        let mut options = DragOptions::new();
        options.max_x = Some(0);
        let profile = resolve(options);
        assert_eq!(profile.bounds().max_x, 0);
        assert_eq!(profile.bounds().max_y, 768);
    }

    #[test]
    fn zero_snap_falls_back_to_default() {
        let profile = resolve(DragOptions::new().with_snap(0));
        assert_eq!(profile.snap(), 1);
    }

    #[test]
    fn config_default_snap_and_mode_apply() {
        let config = ControllerConfig::default()
            .with_default_snap(5)
            .with_default_mode(AxisMode::HorizontalOnly);
        let profile = DragOptions::new().resolve(&config, EXTENT).unwrap();
        assert_eq!(profile.snap(), 5);
        assert_eq!(profile.mode(), AxisMode::HorizontalOnly);
    }

    #[test]
    fn lenient_resolve_keeps_inverted_bounds() {
        let profile = resolve(DragOptions::new().with_x_range(300, 100));
        assert_eq!(profile.bounds().min_x, 300);
        assert_eq!(profile.bounds().max_x, 100);
    }

    #[test]
    fn strict_resolve_rejects_inverted_bounds() {
        let config = ControllerConfig::default().with_strict_bounds(true);
        let err = DragOptions::new()
            .with_y_range(10, 5)
            .resolve(&config, EXTENT)
            .unwrap_err();
        assert_eq!(
            err,
            DragError::InvalidBounds {
                axis: Axis::Y,
                min: 10,
                max: 5
            }
        );
    }

    #[test]
    fn strict_resolve_rejects_zero_snap() {
        let config = ControllerConfig::default().with_strict_bounds(true);
        let err = DragOptions::new()
            .with_snap(0)
            .resolve(&config, EXTENT)
            .unwrap_err();
        assert_eq!(err, DragError::InvalidSnap);
    }

    #[test]
    fn grid_is_never_zero() {
        let mut settings = resolve(DragOptions::new()).settings;
        settings.snap = 0;
        assert_eq!(settings.grid(), 1);
        settings.snap = u32::MAX;
        assert_eq!(settings.grid(), i32::MAX);
    }

    #[test]
    fn axis_mode_flags() {
        assert!(AxisMode::Both.moves_x() && AxisMode::Both.moves_y());
        assert!(AxisMode::HorizontalOnly.moves_x());
        assert!(!AxisMode::HorizontalOnly.moves_y());
        assert!(!AxisMode::VerticalOnly.moves_x());
        assert!(AxisMode::VerticalOnly.moves_y());
    }

    #[test]
    fn axis_mode_legacy_codes() {
        for mode in [AxisMode::Both, AxisMode::HorizontalOnly, AxisMode::VerticalOnly] {
            assert_eq!(AxisMode::try_from(mode.code()), Ok(mode));
        }
        assert_eq!(AxisMode::try_from(3), Err(3));
    }

    #[test]
    fn fire_runs_matching_callback_and_allows_settings_edit() {
        let starts = Rc::new(Cell::new(0));
        let seen = Rc::clone(&starts);
        let mut profile = resolve(DragOptions::new().on_start(move |target| {
            seen.set(seen.get() + 1);
            target.set_bounds(Bounds::new(0, 10, 0, 10));
        }));

        profile.fire(DragPhase::Move, ElementId::new(1), None);
        assert_eq!(starts.get(), 0);

        profile.fire(DragPhase::Start, ElementId::new(1), None);
        assert_eq!(starts.get(), 1);
        assert_eq!(profile.bounds(), Bounds::new(0, 10, 0, 10));
    }

    #[test]
    fn target_exposes_offset_and_rect() {
        let captured = Rc::new(Cell::new(None));
        let sink = Rc::clone(&captured);
        let mut profile = resolve(DragOptions::new().on_stop(move |target| {
            sink.set(Some((target.element(), target.offset(), target.rect())));
        }));
        profile.offset = Point::new(4, 6);

        let rect = Rect::new(1, 2, 3, 4);
        profile.fire(DragPhase::Stop, ElementId::new(3), Some(rect));
        assert_eq!(
            captured.get(),
            Some((ElementId::new(3), Point::new(4, 6), Some(rect)))
        );
    }

    #[test]
    fn debug_hides_closures() {
        let options = DragOptions::new().on_move(|_| {});
        let text = format!("{options:?}");
        assert!(text.contains("on_move: true"));
        assert!(text.contains("on_start: false"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_deserialize_with_defaults() {
        let options: DragOptions =
            serde_json::from_str(r#"{"mode":"horizontal","snap":10,"max_x":400}"#).unwrap();
        assert_eq!(options.mode, Some(AxisMode::HorizontalOnly));
        assert_eq!(options.snap, Some(10));
        assert_eq!(options.max_x, Some(400));
        assert_eq!(options.min_x, None);
        assert!(options.on_start.is_none());
    }
}
