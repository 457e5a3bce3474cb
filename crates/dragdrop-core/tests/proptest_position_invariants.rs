#![forbid(unsafe_code)]

//! Property-based invariant tests for per-move position computation.
//!
//! ## Invariants
//!
//! 1. The first write on each enabled axis is the snapped value, a multiple
//!    of the grid.
//! 2. A disabled axis is never written.
//! 3. Without any bound hit, the final box equals the snapped position.
//! 4. The lower clamp fires exactly when the raw value is at or below the
//!    minimum.
//!
//! Run:
//!   cargo test -p dragdrop-core --test proptest_position_invariants

use dragdrop_core::position::apply_move;
use dragdrop_core::{AxisMode, Bounds, DragSettings, ElementId, Point, Rect, Size, Surface};
use proptest::prelude::*;

/// One element; remembers every left/top write in order.
struct Tape {
    rect: Rect,
    lefts: Vec<i32>,
    tops: Vec<i32>,
}

impl Tape {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            lefts: Vec::new(),
            tops: Vec::new(),
        }
    }
}

impl Surface for Tape {
    fn resolve(&self, _name: &str) -> Option<ElementId> {
        None
    }
    fn element_box(&self, _id: ElementId) -> Option<Rect> {
        Some(self.rect)
    }
    fn set_left(&mut self, _id: ElementId, left: i32) {
        self.lefts.push(left);
        self.rect.x = left;
    }
    fn set_top(&mut self, _id: ElementId, top: i32) {
        self.tops.push(top);
        self.rect.y = top;
    }
    fn has_marker(&self, _id: ElementId, _marker: &str) -> bool {
        true
    }
    fn set_unselectable(&mut self, _id: ElementId) {}
    fn extent(&self) -> Size {
        Size::new(i32::MAX, i32::MAX)
    }
}

const ID: ElementId = ElementId::new(1);

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_mode() -> impl Strategy<Value = AxisMode> {
    prop_oneof![
        Just(AxisMode::Both),
        Just(AxisMode::HorizontalOnly),
        Just(AxisMode::VerticalOnly),
    ]
}

fn arb_bounds() -> impl Strategy<Value = Bounds> {
    (-2000i32..2000, 0i32..4000, -2000i32..2000, 0i32..4000)
        .prop_map(|(min_x, w, min_y, h)| Bounds::new(min_x, min_x + w, min_y, min_y + h))
}

fn arb_settings() -> impl Strategy<Value = DragSettings> {
    (arb_mode(), arb_bounds(), 1u32..=64).prop_map(|(mode, bounds, snap)| DragSettings {
        mode,
        bounds,
        snap,
    })
}

fn arb_point() -> impl Strategy<Value = Point> {
    (-5000i32..5000, -5000i32..5000).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn first_write_lands_on_grid(
        settings in arb_settings(),
        pointer in arb_point(),
        offset in arb_point(),
    ) {
        let mut surface = Tape::new(Rect::new(0, 0, 30, 30));
        apply_move(&mut surface, ID, pointer, offset, &settings).unwrap();
        let grid = settings.grid();
        if let Some(&left) = surface.lefts.first() {
            prop_assert_eq!(left % grid, 0);
        }
        if let Some(&top) = surface.tops.first() {
            prop_assert_eq!(top % grid, 0);
        }
    }

    #[test]
    fn disabled_axis_is_never_written(
        settings in arb_settings(),
        pointer in arb_point(),
        offset in arb_point(),
    ) {
        let mut surface = Tape::new(Rect::new(5, 7, 30, 30));
        apply_move(&mut surface, ID, pointer, offset, &settings).unwrap();
        prop_assert_eq!(surface.lefts.is_empty(), !settings.mode.moves_x());
        prop_assert_eq!(surface.tops.is_empty(), !settings.mode.moves_y());
        if !settings.mode.moves_x() {
            prop_assert_eq!(surface.rect.x, 5);
        }
        if !settings.mode.moves_y() {
            prop_assert_eq!(surface.rect.y, 7);
        }
    }

    #[test]
    fn unclamped_move_commits_snapped_position(
        settings in arb_settings(),
        pointer in arb_point(),
        offset in arb_point(),
    ) {
        let mut surface = Tape::new(Rect::new(0, 0, 30, 30));
        let report = apply_move(&mut surface, ID, pointer, offset, &settings).unwrap();
        let rect = report.rect.unwrap();
        if settings.mode.moves_x() && !report.clamped.min_x && !report.clamped.max_x {
            prop_assert_eq!(rect.x, report.snapped.x);
        }
        if settings.mode.moves_y() && !report.clamped.min_y && !report.clamped.max_y {
            prop_assert_eq!(rect.y, report.snapped.y);
        }
    }

    #[test]
    fn lower_clamp_tracks_raw_value(
        settings in arb_settings(),
        pointer in arb_point(),
        offset in arb_point(),
    ) {
        let mut surface = Tape::new(Rect::new(0, 0, 30, 30));
        let report = apply_move(&mut surface, ID, pointer, offset, &settings).unwrap();
        prop_assert_eq!(report.raw, pointer.saturating_sub(offset));
        let bounds = settings.bounds;
        prop_assert_eq!(
            report.clamped.min_x,
            settings.mode.moves_x() && report.raw.x <= bounds.min_x
        );
        prop_assert_eq!(
            report.clamped.min_y,
            settings.mode.moves_y() && report.raw.y <= bounds.min_y
        );
    }
}
