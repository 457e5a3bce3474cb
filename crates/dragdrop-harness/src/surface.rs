#![forbid(unsafe_code)]

//! In-memory [`Surface`] for headless tests.
//!
//! Elements are plain records: a name, a class list, a box, and a
//! selectable flag. Position writes either land immediately (like a DOM
//! that reflows on read) or are queued until [`HeadlessSurface::flush_layout`]
//! (like a retained-mode UI that lays out once per frame).

use std::collections::BTreeMap;

use dragdrop_core::host::class_list_contains;
use dragdrop_core::{ElementId, Rect, Size, Surface};

/// When position writes become visible through [`Surface::element_box`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Writes are visible to the next read.
    #[default]
    Immediate,
    /// Writes are visible after `flush_layout`.
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    name: Option<String>,
    classes: String,
    rect: Rect,
    pending_left: Option<i32>,
    pending_top: Option<i32>,
    unselectable: bool,
}

/// Headless surface with synchronous or deferred layout.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    scroll: Size,
    client: Size,
    layout: LayoutMode,
    nodes: BTreeMap<ElementId, Node>,
    next_id: u64,
    writes: usize,
}

impl HeadlessSurface {
    /// A surface whose scrollable content and client viewport are both `size`.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::with_viewport(size, size)
    }

    /// A surface with distinct scroll and client sizes.
    #[must_use]
    pub fn with_viewport(scroll: Size, client: Size) -> Self {
        Self {
            scroll,
            client,
            layout: LayoutMode::Immediate,
            nodes: BTreeMap::new(),
            next_id: 1,
            writes: 0,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    /// Add an element and return its id.
    pub fn spawn(&mut self, name: Option<&str>, classes: &str, rect: Rect) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                name: name.map(str::to_owned),
                classes: classes.to_owned(),
                rect,
                pending_left: None,
                pending_top: None,
                unselectable: false,
            },
        );
        id
    }

    /// Add a named element carrying the default draggable marker.
    pub fn spawn_draggable(&mut self, name: &str, rect: Rect) -> ElementId {
        self.spawn(Some(name), dragdrop_core::config::DEFAULT_MARKER, rect)
    }

    /// Remove an element. Its id never comes back.
    pub fn remove(&mut self, id: ElementId) -> bool {
        self.nodes.remove(&id).is_some()
    }

    pub fn set_classes(&mut self, id: ElementId, classes: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.classes = classes.to_owned();
        }
    }

    /// Resize the scrollable content and client viewport.
    pub fn resize(&mut self, scroll: Size, client: Size) {
        self.scroll = scroll;
        self.client = client;
    }

    /// Apply queued writes in deferred layout mode.
    pub fn flush_layout(&mut self) {
        for node in self.nodes.values_mut() {
            if let Some(left) = node.pending_left.take() {
                node.rect.x = left;
            }
            if let Some(top) = node.pending_top.take() {
                node.rect.y = top;
            }
        }
    }

    /// Box as it will be after the next layout pass.
    #[must_use]
    pub fn styled_box(&self, id: ElementId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| {
            let mut rect = node.rect;
            if let Some(left) = node.pending_left {
                rect.x = left;
            }
            if let Some(top) = node.pending_top {
                rect.y = top;
            }
            rect
        })
    }

    #[must_use]
    pub fn is_unselectable(&self, id: ElementId) -> bool {
        self.nodes.get(&id).is_some_and(|node| node.unselectable)
    }

    #[must_use]
    pub fn name_of(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(&id).and_then(|node| node.name.as_deref())
    }

    /// Total number of position writes received.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn write(&mut self, id: ElementId, left: Option<i32>, top: Option<i32>) {
        let layout = self.layout;
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        self.writes += 1;
        match layout {
            LayoutMode::Immediate => {
                if let Some(left) = left {
                    node.rect.x = left;
                }
                if let Some(top) = top {
                    node.rect.y = top;
                }
            }
            LayoutMode::Deferred => {
                if left.is_some() {
                    node.pending_left = left;
                }
                if top.is_some() {
                    node.pending_top = top;
                }
            }
        }
    }
}

impl Surface for HeadlessSurface {
    fn resolve(&self, name: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name.as_deref() == Some(name))
            .map(|(id, _)| *id)
    }

    fn element_box(&self, id: ElementId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.rect)
    }

    fn set_left(&mut self, id: ElementId, left: i32) {
        self.write(id, Some(left), None);
    }

    fn set_top(&mut self, id: ElementId, top: i32) {
        self.write(id, None, Some(top));
    }

    fn has_marker(&self, id: ElementId, marker: &str) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| class_list_contains(&node.classes, marker))
    }

    fn set_unselectable(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.unselectable = true;
        }
    }

    fn extent(&self) -> Size {
        self.scroll.max(self.client)
    }
}
