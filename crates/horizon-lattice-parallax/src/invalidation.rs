//! Layout invalidation tracking.
//!
//! The parallax layout has no incremental path: anything that can move the
//! banner or a sticky header invalidates the whole layout. The invalidator
//! only records *why* the layout is dirty so the next pass can decide whether
//! the base layout must be re-prepared as well.
//!
//! Changes mark the layout as dirty with an [`InvalidationReason`];
//! recalculation is deferred until the next prepare.

use crate::logging::targets;

/// Why a layout was invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidationReason {
    /// The banner configuration changed.
    ConfigurationChanged,
    /// The host's bounds changed (scroll or resize).
    BoundsChanged,
    /// The base layout's content changed.
    BaseLayoutChanged,
}

impl InvalidationReason {
    /// Whether this reason requires the base layout to recompute its geometry.
    ///
    /// Scrolling alone leaves the base geometry intact.
    #[inline]
    pub fn affects_base_layout(self) -> bool {
        !matches!(self, Self::BoundsChanged)
    }
}

/// Tracks whether a parallax layout needs recalculation.
#[derive(Debug, Default)]
pub struct LayoutInvalidator {
    /// Reasons recorded since the last [`clear`](Self::clear).
    pending: Vec<InvalidationReason>,
}

impl LayoutInvalidator {
    /// Create a new layout invalidator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the layout as needing recalculation.
    pub fn invalidate(&mut self, reason: InvalidationReason) {
        tracing::trace!(target: targets::INVALIDATION, ?reason, "invalidate");
        if !self.pending.contains(&reason) {
            self.pending.push(reason);
        }
    }

    /// Check if the layout needs recalculation.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Check if the base layout must be re-prepared.
    pub fn needs_base_recalculation(&self) -> bool {
        self.pending.iter().any(|reason| reason.affects_base_layout())
    }

    /// Get all pending reasons.
    pub fn pending(&self) -> impl Iterator<Item = &InvalidationReason> {
        self.pending.iter()
    }

    /// Clear all pending reasons.
    pub fn clear(&mut self) {
        if !self.pending.is_empty() {
            tracing::trace!(target: targets::INVALIDATION, pending = ?self.pending, "cleared");
        }
        self.pending.clear();
    }
}
