#![forbid(unsafe_code)]

//! The drag state machine.
//!
//! [`DragController`] turns pointer-down / move / up signals into element
//! position writes and lifecycle callbacks.
//!
//! # State Machine
//!
//! ```text
//! Idle ──down on marked element──▶ Dragging ──move──▶ Dragging
//!   ▲                                  │
//!   └────────────up / cancel───────────┘
//! ```
//!
//! - **Idle → Dragging**: suppress the default action, capture the
//!   pointer-to-origin offset, lazily register a default profile, attach a
//!   capturing move listener, fire `on_start`.
//! - **Dragging → Dragging**: compute the new position
//!   (see [`crate::position`]), then fire `on_move`.
//! - **Dragging → Idle**: fire `on_stop`, detach the move listener.
//!
//! Everything else is a no-op reported as [`DragTransition::Ignored`].
//!
//! # Invariants
//!
//! 1. At most one element is active; a second pointer-down during a drag is
//!    ignored until pointer-up.
//! 2. A move listener is attached if and only if the state is `Dragging`.
//! 3. Every `on_start` is followed by exactly one `on_stop`, unless the drag
//!    is cancelled or its element unregistered. `on_move` never fires
//!    outside a start/stop pair.
//! 4. Callbacks receive a [`DragTarget`](crate::profile::DragTarget), not
//!    the controller, so they cannot re-enter it.
//!
//! # Failure Modes
//!
//! - A target without the marker, without a box, or with no target at all
//!   simply does not start a drag.
//! - If the active element disappears from the surface, moves are skipped
//!   until pointer-up. Unregistering it cancels the drag without `on_stop`.

use std::fmt;

use crate::config::ControllerConfig;
use crate::error::{DragError, Result};
use crate::event::{
    ElementId, ListenerHandle, ListenerPhase, ListenerTarget, PointerEvent, PointerEventKind,
};
use crate::geometry::Size;
use crate::host::{EventHost, Surface};
use crate::logging::{debug, trace, warn};
use crate::position;
use crate::profile::{DragOptions, DragPhase, ElementProfile};
use crate::registry::ProfileRegistry;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Element being dragged.
        element: ElementId,
        /// Move listener attached for this drag.
        move_listener: ListenerHandle,
    },
}

impl DragState {
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The active element, if dragging.
    #[must_use]
    pub const fn element(&self) -> Option<ElementId> {
        match self {
            Self::Dragging { element, .. } => Some(*element),
            Self::Idle => None,
        }
    }
}

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTransition {
    /// No state change.
    Ignored,
    Started(ElementId),
    Moved(ElementId),
    Stopped(ElementId),
    /// The drag ended without pointer-up; `on_stop` did not fire.
    Cancelled(ElementId),
}

/// An element given either by id or by a surface identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef<'a> {
    Id(ElementId),
    Name(&'a str),
}

impl From<ElementId> for ElementRef<'_> {
    fn from(id: ElementId) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a str> for ElementRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for ElementRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name.as_str())
    }
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// Drag controller for every draggable element on one surface.
///
/// Construction attaches surface-level pointer-down and pointer-up
/// listeners through the [`EventHost`]. The host's event loop then calls
/// [`handle`](Self::handle) (or the per-kind handlers) for each event it
/// delivers to those listeners, and for move events while the controller's
/// move listener is attached.
pub struct DragController<H: EventHost> {
    host: H,
    config: ControllerConfig,
    profiles: ProfileRegistry,
    state: DragState,
    extent: Size,
    down_listener: Option<ListenerHandle>,
    up_listener: Option<ListenerHandle>,
}

impl<H: EventHost> fmt::Debug for DragController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragController")
            .field("state", &self.state)
            .field("profiles", &self.profiles.len())
            .field("extent", &self.extent)
            .field("listening", &self.is_listening())
            .finish()
    }
}

impl<H: EventHost> DragController<H> {
    /// Create a controller with the default configuration.
    ///
    /// The surface extent is captured now and used as the default upper
    /// bounds of every later registration.
    pub fn new<S: Surface + ?Sized>(host: H, surface: &S) -> Self {
        Self::with_config(host, surface, ControllerConfig::default())
    }

    pub fn with_config<S: Surface + ?Sized>(
        mut host: H,
        surface: &S,
        config: ControllerConfig,
    ) -> Self {
        let down = host.attach(
            PointerEventKind::Down,
            ListenerTarget::Surface,
            ListenerPhase::Bubble,
        );
        let up = host.attach(
            PointerEventKind::Up,
            ListenerTarget::Surface,
            ListenerPhase::Bubble,
        );
        let extent = surface.extent();
        debug!(
            width = extent.width,
            height = extent.height,
            marker = %config.marker,
            "drag controller attached"
        );

        Self {
            host,
            config,
            profiles: ProfileRegistry::new(),
            state: DragState::Idle,
            extent,
            down_listener: Some(down),
            up_listener: Some(up),
        }
    }

    // -- Registration -------------------------------------------------------

    /// Register or reconfigure a draggable element.
    ///
    /// Resolves `element`, stores the resolved profile (replacing any
    /// previous one), rewrites the element's position as absolute left/top
    /// at its current rendered origin, and marks it non-selectable.
    ///
    /// If the element is being dragged, its captured offset survives the
    /// replacement.
    pub fn set<'a, S: Surface + ?Sized>(
        &mut self,
        element: impl Into<ElementRef<'a>>,
        options: DragOptions,
        surface: &mut S,
    ) -> Result<ElementId> {
        let id = match element.into() {
            ElementRef::Id(id) => id,
            ElementRef::Name(name) => surface.resolve(name).ok_or_else(|| {
                warn!(name, "cannot register unknown element");
                DragError::unknown(name)
            })?,
        };
        self.register(id, options, surface)?;
        Ok(id)
    }

    fn register<S: Surface + ?Sized>(
        &mut self,
        id: ElementId,
        options: DragOptions,
        surface: &mut S,
    ) -> Result<()> {
        let rect = surface
            .element_box(id)
            .ok_or(DragError::Detached { id })?;
        let mut profile = options.resolve(&self.config, self.extent)?;

        if self.state.element() == Some(id)
            && let Some(previous) = self.profiles.get(id)
        {
            profile.offset = previous.offset;
        }

        surface.set_left(id, rect.x);
        surface.set_top(id, rect.y);
        surface.set_unselectable(id);

        debug!(
            element = %id,
            mode = ?profile.settings.mode,
            bounds = ?profile.settings.bounds,
            snap = profile.settings.snap,
            "element registered"
        );
        self.profiles.insert(id, profile);
        Ok(())
    }

    /// Forget an element's profile, typically because it left the surface.
    ///
    /// If it was being dragged, the drag is cancelled without `on_stop`.
    pub fn unregister(&mut self, id: ElementId) -> Option<ElementProfile> {
        if self.state.element() == Some(id) {
            self.cancel();
        }
        self.profiles.remove(id)
    }

    // -- Event handling -----------------------------------------------------

    /// Dispatch `event` to the handler for its kind.
    pub fn handle<S: Surface + ?Sized>(
        &mut self,
        event: &PointerEvent,
        surface: &mut S,
    ) -> DragTransition {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event, surface),
            PointerEventKind::Move => self.pointer_move(event, surface),
            PointerEventKind::Up => self.pointer_up(event, surface),
        }
    }

    /// Start a drag if the event's target carries the draggable marker.
    pub fn pointer_down<S: Surface + ?Sized>(
        &mut self,
        event: &PointerEvent,
        surface: &mut S,
    ) -> DragTransition {
        if self.down_listener.is_none() || self.state.is_dragging() {
            return DragTransition::Ignored;
        }
        let Some(id) = event.target else {
            return DragTransition::Ignored;
        };
        if !surface.has_marker(id, &self.config.marker) {
            trace!(element = %id, "pointer-down on unmarked element");
            return DragTransition::Ignored;
        }
        let Some(rect) = surface.element_box(id) else {
            return DragTransition::Ignored;
        };

        self.host.prevent(event);
        let offset = event.position.saturating_sub(rect.origin());

        if !self.profiles.contains(id)
            && let Err(err) = self.register(id, DragOptions::default(), surface)
        {
            warn!(element = %id, error = %err, "lazy registration failed");
            return DragTransition::Ignored;
        }
        let Some(profile) = self.profiles.get_mut(id) else {
            return DragTransition::Ignored;
        };
        profile.offset = offset;

        let move_listener = self.host.attach(
            PointerEventKind::Move,
            ListenerTarget::Surface,
            ListenerPhase::Capture,
        );
        self.state = DragState::Dragging {
            element: id,
            move_listener,
        };

        debug!(
            element = %id,
            offset_x = offset.x,
            offset_y = offset.y,
            "drag started"
        );
        profile.fire(DragPhase::Start, id, surface.element_box(id));
        DragTransition::Started(id)
    }

    /// Move the active element towards the pointer.
    pub fn pointer_move<S: Surface + ?Sized>(
        &mut self,
        event: &PointerEvent,
        surface: &mut S,
    ) -> DragTransition {
        let DragState::Dragging { element, .. } = self.state else {
            return DragTransition::Ignored;
        };
        let Some(profile) = self.profiles.get_mut(element) else {
            return DragTransition::Ignored;
        };
        let Some(report) = position::apply_move(
            surface,
            element,
            event.position,
            profile.offset,
            &profile.settings,
        ) else {
            trace!(element = %element, "active element is not on the surface");
            return DragTransition::Ignored;
        };

        trace!(
            element = %element,
            raw = ?report.raw,
            snapped = ?report.snapped,
            clamped = report.clamped.any(),
            "drag move"
        );
        profile.fire(DragPhase::Move, element, report.rect);
        DragTransition::Moved(element)
    }

    /// Finish the active drag.
    pub fn pointer_up<S: Surface + ?Sized>(
        &mut self,
        _event: &PointerEvent,
        surface: &mut S,
    ) -> DragTransition {
        let DragState::Dragging {
            element,
            move_listener,
        } = self.state
        else {
            return DragTransition::Ignored;
        };

        if let Some(profile) = self.profiles.get_mut(element) {
            profile.fire(DragPhase::Stop, element, surface.element_box(element));
        }
        self.host.detach(
            PointerEventKind::Move,
            ListenerTarget::Surface,
            move_listener,
        );
        self.state = DragState::Idle;

        debug!(element = %element, "drag stopped");
        DragTransition::Stopped(element)
    }

    /// Abort the active drag without firing `on_stop`.
    ///
    /// For hosts that lose the pointer (focus loss, window hidden) and will
    /// never deliver the matching pointer-up.
    pub fn cancel(&mut self) -> DragTransition {
        let DragState::Dragging {
            element,
            move_listener,
        } = self.state
        else {
            return DragTransition::Ignored;
        };

        self.host.detach(
            PointerEventKind::Move,
            ListenerTarget::Surface,
            move_listener,
        );
        self.state = DragState::Idle;

        debug!(element = %element, "drag cancelled");
        DragTransition::Cancelled(element)
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Update the extent used as default bounds for later registrations.
    ///
    /// Existing profiles keep the bounds they were resolved with.
    pub fn resize_surface(&mut self, extent: Size) {
        self.extent = extent;
    }

    /// Cancel any drag and detach the surface-level listeners.
    ///
    /// Afterwards every event is ignored.
    pub fn shutdown(&mut self) {
        self.cancel();
        if let Some(handle) = self.down_listener.take() {
            self.host
                .detach(PointerEventKind::Down, ListenerTarget::Surface, handle);
        }
        if let Some(handle) = self.up_listener.take() {
            self.host
                .detach(PointerEventKind::Up, ListenerTarget::Surface, handle);
        }
        debug!("drag controller detached");
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    #[inline]
    #[must_use]
    pub fn active_element(&self) -> Option<ElementId> {
        self.state.element()
    }

    /// Whether the surface-level listeners are still attached.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.down_listener.is_some()
    }

    #[must_use]
    pub fn profile(&self, id: ElementId) -> Option<&ElementProfile> {
        self.profiles.get(id)
    }

    pub fn profile_mut(&mut self, id: ElementId) -> Option<&mut ElementProfile> {
        self.profiles.get_mut(id)
    }

    #[must_use]
    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn extent(&self) -> Size {
        self.extent
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
