#![forbid(unsafe_code)]

//! Collaborator traits implemented by the embedding application.
//!
//! The controller never talks to a window system directly. Two traits stand
//! in for everything outside the drag logic:
//!
//! - [`EventHost`]: attaches and detaches low-level pointer listeners and
//!   suppresses default platform actions (text selection, native drag).
//! - [`Surface`]: resolves element identifiers, reports rendered boxes, and
//!   accepts position writes.
//!
//! # Surface write semantics
//!
//! After [`Surface::set_left`] / [`Surface::set_top`], [`Surface::element_box`]
//! reports whatever the host's layout currently says. A DOM-like surface
//! reflects writes immediately; a surface with deferred layout may keep
//! returning the previous frame's box until the next layout pass. The upper
//! bound clamp reads this box, so it catches overflow on the same event for
//! synchronous surfaces and one event later for deferred ones.

use crate::event::{
    ElementId, ListenerHandle, ListenerPhase, ListenerTarget, PointerEvent, PointerEventKind,
};
use crate::geometry::{Rect, Size};

/// Event-delivery collaborator.
pub trait EventHost {
    /// Attach a listener for `kind` events on `target`.
    fn attach(
        &mut self,
        kind: PointerEventKind,
        target: ListenerTarget,
        phase: ListenerPhase,
    ) -> ListenerHandle;

    /// Detach a listener previously returned by [`attach`](Self::attach).
    fn detach(&mut self, kind: PointerEventKind, target: ListenerTarget, handle: ListenerHandle);

    /// Suppress the platform's default action for `event`.
    fn prevent(&mut self, event: &PointerEvent);
}

/// Element lookup, geometry and style collaborator.
pub trait Surface {
    /// Resolve a string identifier to an element.
    fn resolve(&self, name: &str) -> Option<ElementId>;

    /// The element's rendered box, or `None` if it is not on the surface.
    fn element_box(&self, id: ElementId) -> Option<Rect>;

    /// Write the element's absolute left position.
    fn set_left(&mut self, id: ElementId, left: i32);

    /// Write the element's absolute top position.
    fn set_top(&mut self, id: ElementId, top: i32);

    /// Whether the element carries the draggable `marker` token.
    fn has_marker(&self, id: ElementId, marker: &str) -> bool;

    /// Opt the element out of text selection.
    fn set_unselectable(&mut self, id: ElementId);

    /// Size of the area elements may travel in.
    ///
    /// Hosts should report the larger of the scrollable content size and
    /// the client viewport size on each axis (see [`Size::max`]).
    fn extent(&self) -> Size;
}

/// Token membership test on a whitespace-separated class list.
///
/// `"panel draggable"` contains `draggable`; `"undraggable"` does not.
#[must_use]
pub fn class_list_contains(class_list: &str, marker: &str) -> bool {
    !marker.is_empty() && class_list.split_ascii_whitespace().any(|token| token == marker)
}

impl<H: EventHost + ?Sized> EventHost for &mut H {
    fn attach(
        &mut self,
        kind: PointerEventKind,
        target: ListenerTarget,
        phase: ListenerPhase,
    ) -> ListenerHandle {
        (**self).attach(kind, target, phase)
    }

    fn detach(&mut self, kind: PointerEventKind, target: ListenerTarget, handle: ListenerHandle) {
        (**self).detach(kind, target, handle);
    }

    fn prevent(&mut self, event: &PointerEvent) {
        (**self).prevent(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_token_match() {
        assert!(class_list_contains("draggable", "draggable"));
        assert!(class_list_contains("box draggable red", "draggable"));
        assert!(class_list_contains("  draggable\tbox ", "draggable"));
    }

    #[test]
    fn class_list_rejects_substrings() {
        assert!(!class_list_contains("undraggable", "draggable"));
        assert!(!class_list_contains("draggable-handle", "draggable"));
        assert!(!class_list_contains("", "draggable"));
    }

    #[test]
    fn empty_marker_never_matches() {
        assert!(!class_list_contains("a b c", ""));
        assert!(!class_list_contains("", ""));
    }
}
