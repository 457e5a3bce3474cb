#![forbid(unsafe_code)]

//! Event-loop stand-in that owns a controller and a headless surface.
//!
//! [`Harness::dispatch`] only forwards an event when the host has a live
//! listener for its kind, the way a browser or window system would. A move
//! sent while no drag is active therefore never reaches the controller.

use std::cell::RefCell;
use std::rc::Rc;

use dragdrop_core::{
    ControllerConfig, DragController, DragOptions, DragPhase, DragTransition, ElementId,
    PointerEvent, Rect, Size, Surface,
};

use crate::host::RecordingHost;
use crate::surface::HeadlessSurface;

/// One recorded callback invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackRecord {
    pub phase: DragPhase,
    pub element: ElementId,
    pub rect: Option<Rect>,
}

/// Shared log that callbacks append to.
#[derive(Debug, Clone, Default)]
pub struct CallbackLog {
    records: Rc<RefCell<Vec<CallbackRecord>>>,
}

impl CallbackLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire all three callbacks of `options` to this log.
    #[must_use]
    pub fn instrument(&self, options: DragOptions) -> DragOptions {
        let start = Rc::clone(&self.records);
        let moved = Rc::clone(&self.records);
        let stop = Rc::clone(&self.records);
        options
            .on_start(move |t| {
                start.borrow_mut().push(CallbackRecord {
                    phase: DragPhase::Start,
                    element: t.element(),
                    rect: t.rect(),
                });
            })
            .on_move(move |t| {
                moved.borrow_mut().push(CallbackRecord {
                    phase: DragPhase::Move,
                    element: t.element(),
                    rect: t.rect(),
                });
            })
            .on_stop(move |t| {
                stop.borrow_mut().push(CallbackRecord {
                    phase: DragPhase::Stop,
                    element: t.element(),
                    rect: t.rect(),
                });
            })
    }

    #[must_use]
    pub fn records(&self) -> Vec<CallbackRecord> {
        self.records.borrow().clone()
    }

    /// Phases only, in order.
    #[must_use]
    pub fn phases(&self) -> Vec<DragPhase> {
        self.records.borrow().iter().map(|r| r.phase).collect()
    }

    #[must_use]
    pub fn count(&self, phase: DragPhase) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.phase == phase)
            .count()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

/// Controller + surface + listener-aware dispatch.
#[derive(Debug)]
pub struct Harness {
    pub controller: DragController<RecordingHost>,
    pub surface: HeadlessSurface,
}

impl Harness {
    /// A harness over an empty surface of the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::from_surface(HeadlessSurface::new(size), ControllerConfig::default())
    }

    #[must_use]
    pub fn from_surface(surface: HeadlessSurface, config: ControllerConfig) -> Self {
        let controller = DragController::with_config(RecordingHost::new(), &surface, config);
        Self {
            controller,
            surface,
        }
    }

    #[must_use]
    pub fn host(&self) -> &RecordingHost {
        self.controller.host()
    }

    /// Deliver `event` if a listener for its kind is attached.
    pub fn dispatch(&mut self, event: PointerEvent) -> DragTransition {
        if !self.controller.host().is_listening(event.kind) {
            return DragTransition::Ignored;
        }
        self.controller.handle(&event, &mut self.surface)
    }

    pub fn press(&mut self, x: i32, y: i32, target: ElementId) -> DragTransition {
        self.dispatch(PointerEvent::down(x, y, target))
    }

    /// Pointer-down over empty surface.
    pub fn press_empty(&mut self, x: i32, y: i32) -> DragTransition {
        self.dispatch(PointerEvent::new(
            dragdrop_core::PointerEventKind::Down,
            x,
            y,
        ))
    }

    pub fn move_to(&mut self, x: i32, y: i32) -> DragTransition {
        self.dispatch(PointerEvent::moved(x, y))
    }

    pub fn release(&mut self, x: i32, y: i32) -> DragTransition {
        self.dispatch(PointerEvent::up(x, y))
    }

    /// Press on `target` at `from`, move through `path`, release at the
    /// last point (or at `from` if the path is empty).
    pub fn drag(
        &mut self,
        target: ElementId,
        from: (i32, i32),
        path: &[(i32, i32)],
    ) -> Vec<DragTransition> {
        let mut out = Vec::with_capacity(path.len() + 2);
        out.push(self.press(from.0, from.1, target));
        for &(x, y) in path {
            out.push(self.move_to(x, y));
        }
        let (ux, uy) = path.last().copied().unwrap_or(from);
        out.push(self.release(ux, uy));
        out
    }

    /// Current rendered box of `id`.
    #[must_use]
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.surface.element_box(id)
    }
}
