#![forbid(unsafe_code)]

//! Pointer events and listener bookkeeping types.
//!
//! The host's event loop translates its native input into [`PointerEvent`]s
//! and hands them to the controller. Listener registration goes through the
//! [`EventHost`](crate::host::EventHost) collaborator, which hands back an
//! opaque [`ListenerHandle`] per attached listener.
//!
//! # Design Notes
//!
//! - Coordinates are surface coordinates (see [`crate::geometry`]).
//! - Only a single pointer is modelled; there is no pointer id.
//! - `target` is the element the pointer was over when the event fired, if
//!   any. Move and up events usually carry it too, but the controller only
//!   reads it on pointer-down.

use crate::geometry::Point;

/// Stable identity of an element on the host surface.
///
/// Ids are handed out by the surface and never reused while the element is
/// alive. The controller stores ids, not references, so a removed element
/// simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of pointer signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}

impl PointerEventKind {
    /// Platform-neutral event name, as a host would spell it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Down => "pointerdown",
            Self::Move => "pointermove",
            Self::Up => "pointerup",
        }
    }
}

/// A single pointer event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Pointer position in surface coordinates.
    pub position: Point,

    /// Element under the pointer, if any.
    pub target: Option<ElementId>,
}

impl PointerEvent {
    /// Create a new pointer event without a target.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            target: None,
        }
    }

    /// Pointer-down at `(x, y)` over `target`.
    #[must_use]
    pub const fn down(x: i32, y: i32, target: ElementId) -> Self {
        Self::new(PointerEventKind::Down, x, y).with_target(target)
    }

    /// Pointer-move at `(x, y)`.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Pointer-up at `(x, y)`.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    /// Attach a target element.
    #[must_use]
    pub const fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The whole surface (document-level listener).
    Surface,
    /// A single element.
    Element(ElementId),
}

/// Dispatch phase of a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerPhase {
    /// Runs before element listeners (`useCapture = true`).
    Capture,
    /// Runs after element listeners (`useCapture = false`).
    Bubble,
}

/// Opaque handle to an attached listener, valid until it is detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}
