#![forbid(unsafe_code)]

//! [`EventHost`] that records every call and tracks live listeners.

use dragdrop_core::{
    EventHost, ListenerHandle, ListenerPhase, ListenerTarget, Point, PointerEvent,
    PointerEventKind,
};

/// An attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub kind: PointerEventKind,
    pub target: ListenerTarget,
    pub phase: ListenerPhase,
    pub handle: ListenerHandle,
}

/// One call made by the controller into the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Attach(Listener),
    Detach {
        kind: PointerEventKind,
        handle: ListenerHandle,
    },
    Prevent {
        kind: PointerEventKind,
        position: Point,
    },
}

/// Recording event host.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next_handle: u64,
    live: Vec<Listener>,
    calls: Vec<HostCall>,
    stale_detaches: usize,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listeners currently attached, in attach order.
    #[must_use]
    pub fn live(&self) -> &[Listener] {
        &self.live
    }

    /// Every call, in order.
    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Whether at least one listener for `kind` is attached.
    #[must_use]
    pub fn is_listening(&self, kind: PointerEventKind) -> bool {
        self.live.iter().any(|l| l.kind == kind)
    }

    #[must_use]
    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.live.iter().filter(|l| l.kind == kind).count()
    }

    #[must_use]
    pub fn prevented(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Prevent { .. }))
            .count()
    }

    /// Detach calls whose handle was not attached.
    #[must_use]
    pub fn stale_detaches(&self) -> usize {
        self.stale_detaches
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl EventHost for RecordingHost {
    fn attach(
        &mut self,
        kind: PointerEventKind,
        target: ListenerTarget,
        phase: ListenerPhase,
    ) -> ListenerHandle {
        self.next_handle += 1;
        let listener = Listener {
            kind,
            target,
            phase,
            handle: ListenerHandle::new(self.next_handle),
        };
        self.live.push(listener);
        self.calls.push(HostCall::Attach(listener));
        listener.handle
    }

    fn detach(&mut self, kind: PointerEventKind, target: ListenerTarget, handle: ListenerHandle) {
        let before = self.live.len();
        self.live
            .retain(|l| !(l.handle == handle && l.kind == kind && l.target == target));
        if self.live.len() == before {
            tracing::warn!(event = kind.name(), handle = handle.get(), "detach of unknown listener");
            self.stale_detaches += 1;
        }
        self.calls.push(HostCall::Detach { kind, handle });
    }

    fn prevent(&mut self, event: &PointerEvent) {
        self.calls.push(HostCall::Prevent {
            kind: event.kind,
            position: event.position,
        });
    }
}
