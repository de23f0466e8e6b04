//! Viewport snapshots and the host scroll container.
//!
//! The host container owns the scroll position. Before each layout pass the
//! layout reads a [`ViewportSnapshot`] from it through the [`ScrollHost`]
//! trait; the snapshot is read-only for the duration of the pass.

use crate::types::{Rect, Size};

/// Scroll state of the host container for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSnapshot {
    /// The visible region in content coordinates.
    pub visible_rect: Rect,
    /// Vertical content offset. Negative while over-scrolled past the top.
    pub scroll_offset_y: f32,
    /// Top content inset of the container.
    pub content_inset_top: f32,
    /// Height of the container's bounds.
    pub bounds_height: f32,
}

impl ViewportSnapshot {
    /// Create a snapshot from its individual parts.
    pub fn new(visible_rect: Rect, scroll_offset_y: f32, content_inset_top: f32, bounds_height: f32) -> Self {
        Self {
            visible_rect,
            scroll_offset_y,
            content_inset_top,
            bounds_height,
        }
    }

    /// Create a snapshot from container bounds whose origin is the content offset.
    pub fn from_bounds(bounds: Rect, content_inset_top: f32) -> Self {
        Self {
            visible_rect: bounds,
            scroll_offset_y: bounds.top(),
            content_inset_top,
            bounds_height: bounds.height(),
        }
    }

    /// The content y that sits at the top edge of the visible area, below the inset.
    #[inline]
    pub fn visible_top(&self) -> f32 {
        self.scroll_offset_y + self.content_inset_top
    }

    /// The content y at which sticky section headers dock.
    #[inline]
    pub fn header_dock_y(&self) -> f32 {
        self.visible_rect.max_y() - self.bounds_height + self.content_inset_top
    }
}

/// The scroll container that hosts a parallax layout.
pub trait ScrollHost {
    /// Container bounds in content coordinates; the origin is the content offset.
    fn bounds(&self) -> Rect;

    /// Top content inset.
    fn content_inset_top(&self) -> f32 {
        0.0
    }

    /// Whether the container is attached to a visible hierarchy.
    ///
    /// A detached container reports a zero content size and gets no geometry.
    fn is_attached(&self) -> bool {
        true
    }

    /// Receive the total content size computed by the layout.
    fn set_content_size(&mut self, _size: Size) {}

    /// Take a snapshot of the current scroll state, or `None` when detached.
    fn snapshot(&self) -> Option<ViewportSnapshot> {
        self.is_attached()
            .then(|| ViewportSnapshot::from_bounds(self.bounds(), self.content_inset_top()))
    }
}

/// A plain [`ScrollHost`] that stores its state in fields.
///
/// Useful for headless hosts and tests, and as a reference for how a real
/// container maps onto the trait.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    /// Container bounds; the origin is the content offset.
    pub bounds: Rect,
    /// Top content inset.
    pub content_inset_top: f32,
    /// Whether the container is attached.
    pub attached: bool,
    /// Last content size pushed by the layout.
    pub content_size: Size,
}

impl ScrollState {
    /// Create an attached container of the given viewport size, scrolled to the top.
    pub fn new(viewport: Size) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, viewport.width, viewport.height),
            content_inset_top: 0.0,
            attached: true,
            content_size: Size::ZERO,
        }
    }

    /// Set the top content inset, builder style.
    pub fn with_content_inset_top(mut self, inset: f32) -> Self {
        self.content_inset_top = inset;
        self
    }

    /// Scroll so that the content offset is `y`.
    ///
    /// Negative values model an over-scroll past the top edge.
    pub fn scroll_to(&mut self, y: f32) {
        self.bounds.origin.y = y;
    }

    /// Current vertical content offset.
    #[inline]
    pub fn scroll_offset_y(&self) -> f32 {
        self.bounds.origin.y
    }
}

impl ScrollHost for ScrollState {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn content_inset_top(&self) -> f32 {
        self.content_inset_top
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }
}
