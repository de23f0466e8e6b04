//! Stateful parallax layout attached to a scroll host.
//!
//! [`ParallaxLayout`] is what a list view holds on to. It owns the base layout,
//! a handle to the banner configuration and an invalidation tracker, and
//! answers the host's layout queries by taking a viewport snapshot and
//! delegating to the pure functions in [`engine`](crate::engine).
//!
//! # Layout cycle
//!
//! 1. The host reports bounds changes through [`ParallaxLayout::bounds_changed`].
//!    Every bounds change invalidates the layout.
//! 2. Before drawing, the host calls [`ParallaxLayout::prepare`], which
//!    re-prepares the base layout if needed and pushes the content size.
//! 3. The host queries attributes for the visible region.
//!
//! # Example
//!
//! ```ignore
//! use horizon_lattice_parallax::*;
//!
//! let mut base = SectionedFlowLayout::new(vec![20, 20]);
//! base.set_header_height(44.0);
//!
//! let mut layout = ParallaxLayout::new(base);
//! layout.set_indicative_size(Some(Size::new(375.0, 240.0)));
//! layout.set_min_size(Size::new(375.0, 64.0));
//! layout.set_always_on_top(true);
//!
//! let mut host = ScrollState::new(Size::new(375.0, 667.0));
//! layout.prepare(&mut host);
//! let attributes = layout.layout_attributes_for_elements(host.bounds, &host);
//! ```

use crate::attributes::{LayoutAttributes, SupplementaryKind};
use crate::base::BaseLayout;
use crate::config::{ParallaxConfig, SharedParallaxConfig};
use crate::engine;
use crate::error::ParallaxResult;
use crate::invalidation::{InvalidationReason, LayoutInvalidator};
use crate::logging::targets;
use crate::types::{Rect, Size};
use crate::viewport::ScrollHost;

/// A base layout decorated with a parallax banner and sticky section headers.
#[derive(Debug)]
pub struct ParallaxLayout<B: BaseLayout> {
    base: B,
    config: SharedParallaxConfig,
    invalidator: LayoutInvalidator,
}

impl<B: BaseLayout> ParallaxLayout<B> {
    /// Wrap `base` with the banner disabled.
    pub fn new(base: B) -> Self {
        Self::with_config(base, SharedParallaxConfig::default())
    }

    /// Wrap `base` with an existing configuration or configuration handle.
    pub fn with_config(base: B, config: impl Into<SharedParallaxConfig>) -> Self {
        let mut invalidator = LayoutInvalidator::new();
        invalidator.invalidate(InvalidationReason::BaseLayoutChanged);
        Self {
            base,
            config: config.into(),
            invalidator,
        }
    }

    /// Wrap `base` with a configuration loaded from a TOML or JSON file.
    pub fn from_config_file(base: B, path: impl AsRef<std::path::Path>) -> ParallaxResult<Self> {
        let config = ParallaxConfig::load(path)?;
        Ok(Self::with_config(base, config))
    }

    /// The base layout.
    #[inline]
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Mutable access to the base layout.
    ///
    /// The base layout is assumed to change, so the layout is invalidated.
    pub fn base_mut(&mut self) -> &mut B {
        self.invalidator.invalidate(InvalidationReason::BaseLayoutChanged);
        &mut self.base
    }

    /// The configuration handle. Clones of it can be mutated from elsewhere;
    /// changes are picked up on the next [`prepare`](Self::prepare).
    #[inline]
    pub fn config(&self) -> &SharedParallaxConfig {
        &self.config
    }

    /// Copy of the current configuration.
    #[inline]
    pub fn config_snapshot(&self) -> ParallaxConfig {
        self.config.snapshot()
    }

    /// The banner's resting size, if the banner is enabled.
    pub fn indicative_size(&self) -> Option<Size> {
        self.config.snapshot().indicative_size
    }

    /// Set the banner's resting size. `None` disables the banner.
    pub fn set_indicative_size(&mut self, size: Option<Size>) {
        self.config.set_indicative_size(size);
        self.sync_config();
    }

    /// The collapsed banner size.
    pub fn min_size(&self) -> Size {
        self.config.snapshot().min_size
    }

    /// Set the collapsed banner size.
    pub fn set_min_size(&mut self, size: Size) {
        self.config.set_min_size(size);
        self.sync_config();
    }

    /// Whether the collapsed banner stays docked at the top.
    pub fn always_on_top(&self) -> bool {
        self.config.snapshot().always_on_top
    }

    /// Set whether the collapsed banner stays docked at the top.
    pub fn set_always_on_top(&mut self, always_on_top: bool) {
        self.config.set_always_on_top(always_on_top);
        self.sync_config();
    }

    /// Mark the layout as needing recalculation.
    pub fn invalidate(&mut self, reason: InvalidationReason) {
        self.invalidator.invalidate(reason);
    }

    /// Whether a bounds change requires a new layout pass.
    ///
    /// Banner stretch and header stickiness follow the scroll position
    /// continuously, so this is always `true`.
    #[inline]
    pub fn should_invalidate_for_bounds_change(&self, _new_bounds: Rect) -> bool {
        true
    }

    /// Notify the layout that the host's bounds changed.
    pub fn bounds_changed(&mut self, new_bounds: Rect) {
        if self.should_invalidate_for_bounds_change(new_bounds) {
            self.invalidator.invalidate(InvalidationReason::BoundsChanged);
        }
    }

    /// Whether the layout must be prepared before the next query.
    pub fn needs_layout(&self) -> bool {
        self.invalidator.is_dirty() || self.config.is_dirty()
    }

    /// Bring the layout up to date for `host` and push the content size.
    pub fn prepare<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        self.sync_config();

        if self.invalidator.needs_base_recalculation() {
            self.base.invalidate();
        }
        self.base.prepare(host.bounds().width());

        let size = self.content_size(host);
        host.set_content_size(size);

        tracing::debug!(
            target: targets::LAYOUT,
            pending = ?self.invalidator.pending().collect::<Vec<_>>(),
            content_height = size.height,
            "prepared parallax layout"
        );
        self.invalidator.clear();
    }

    /// Attributes of every element overlapping `rect`.
    ///
    /// Empty while the host is detached.
    pub fn layout_attributes_for_elements<H: ScrollHost + ?Sized>(
        &self,
        rect: Rect,
        host: &H,
    ) -> Vec<LayoutAttributes> {
        let Some(viewport) = host.snapshot() else {
            return Vec::new();
        };
        engine::compute_layout(rect, &viewport, &self.base, &self.config.snapshot())
    }

    /// Attributes of a single cell.
    pub fn layout_attributes_for_item(&self, section: usize, index: usize) -> Option<LayoutAttributes> {
        engine::attributes_for_item(section, index, &self.base, &self.config.snapshot())
    }

    /// Attributes of a supplementary element (a section header or the banner).
    pub fn layout_attributes_for_supplementary<H: ScrollHost + ?Sized>(
        &self,
        kind: SupplementaryKind,
        section: usize,
        host: &H,
    ) -> Option<LayoutAttributes> {
        let viewport = host.snapshot()?;
        engine::attributes_for_supplementary(kind, section, &viewport, &self.base, &self.config.snapshot())
    }

    /// Starting attributes of a supplementary element that is being inserted.
    pub fn initial_layout_attributes_for_appearing_supplementary<H: ScrollHost + ?Sized>(
        &self,
        kind: SupplementaryKind,
        section: usize,
        host: &H,
    ) -> Option<LayoutAttributes> {
        let viewport = host.snapshot()?;
        engine::initial_attributes_for_appearing_supplementary(
            kind,
            section,
            &viewport,
            &self.base,
            &self.config.snapshot(),
        )
    }

    /// Total content size, including the space reserved for the banner.
    ///
    /// Zero while the host is detached.
    pub fn content_size<H: ScrollHost + ?Sized>(&self, host: &H) -> Size {
        engine::content_size(&self.base, &self.config.snapshot(), host.is_attached())
    }

    /// Turn a raised configuration dirty flag into a pending invalidation.
    fn sync_config(&mut self) {
        if self.config.take_dirty() {
            self.invalidator.invalidate(InvalidationReason::ConfigurationChanged);
        }
    }
}
