#![no_main]

use arbitrary::Arbitrary;
use dragdrop_core::{AxisMode, DragOptions, PointerEventKind, Rect, Size};
use dragdrop_harness::Harness;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Element {
    x: i16,
    y: i16,
    width: u8,
    height: u8,
    mode: u8,
    snap: u8,
    bounds: Option<(i16, i16, i16, i16)>,
    marked: bool,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Down { element: u8, x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Up { x: i16, y: i16 },
    Cancel,
    Remove { element: u8 },
    Unregister { element: u8 },
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    width: u16,
    height: u16,
    elements: Vec<Element>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    if input.elements.is_empty() || input.elements.len() > 16 || input.ops.len() > 512 {
        return;
    }

    let mut h = Harness::new(Size::new(
        i32::from(input.width.max(1)),
        i32::from(input.height.max(1)),
    ));

    let mut ids = Vec::with_capacity(input.elements.len());
    let mut tops = Vec::with_capacity(input.elements.len());
    let mut lefts = Vec::with_capacity(input.elements.len());
    for (n, spec) in input.elements.iter().enumerate() {
        let classes = if spec.marked { "draggable" } else { "" };
        let name = format!("e{n}");
        let rect = Rect::new(
            i32::from(spec.x),
            i32::from(spec.y),
            i32::from(spec.width),
            i32::from(spec.height),
        );
        let id = h.surface.spawn(Some(&name), classes, rect);
        let mode = AxisMode::try_from(spec.mode % 3).unwrap_or_default();
        let mut options = DragOptions::new()
            .with_mode(mode)
            .with_snap(u32::from(spec.snap));
        if let Some((min_x, max_x, min_y, max_y)) = spec.bounds {
            options = options
                .with_x_range(i32::from(min_x), i32::from(max_x))
                .with_y_range(i32::from(min_y), i32::from(max_y));
        }
        h.controller
            .set(id, options, &mut h.surface)
            .expect("spawned element registers");
        ids.push(id);
        tops.push((mode == AxisMode::HorizontalOnly).then_some(rect.y));
        lefts.push((mode == AxisMode::VerticalOnly).then_some(rect.x));
    }

    for op in input.ops {
        match op {
            Op::Down { element, x, y } => {
                let id = ids[usize::from(element) % ids.len()];
                h.press(i32::from(x), i32::from(y), id);
            }
            Op::Move { x, y } => {
                h.move_to(i32::from(x), i32::from(y));
            }
            Op::Up { x, y } => {
                h.release(i32::from(x), i32::from(y));
            }
            Op::Cancel => {
                h.controller.cancel();
            }
            Op::Remove { element } => {
                let id = ids[usize::from(element) % ids.len()];
                h.surface.remove(id);
            }
            Op::Unregister { element } => {
                let n = usize::from(element) % ids.len();
                h.controller.unregister(ids[n]);
                // A later press re-registers with default (unlocked) settings.
                tops[n] = None;
                lefts[n] = None;
            }
            Op::Resize { width, height } => {
                let size = Size::new(i32::from(width), i32::from(height));
                h.surface.resize(size, size);
                h.controller.resize_surface(size);
            }
        }

        // Post-conditions that must always hold:
        let moves = h.host().listener_count(PointerEventKind::Move);
        assert_eq!(moves, usize::from(h.controller.is_dragging()), "move listener leak");
        assert_eq!(h.host().stale_detaches(), 0, "detach of unattached listener");
        if let Some(active) = h.controller.active_element() {
            assert!(h.controller.profile(active).is_some(), "active without profile");
        }
        for (n, &id) in ids.iter().enumerate() {
            let Some(rect) = h.rect(id) else { continue };
            if let Some(top) = tops[n] {
                assert_eq!(rect.y, top, "horizontal-only element moved vertically");
            }
            if let Some(left) = lefts[n] {
                assert_eq!(rect.x, left, "vertical-only element moved horizontally");
            }
        }
    }
});
