//! The base layout consumed by the parallax engine.
//!
//! A base layout positions cells and section headers as if the banner did not
//! exist. The engine never mutates it; it only asks questions through this
//! trait and transforms the answers.

use crate::attributes::{LayoutAttributes, SupplementaryKind};
use crate::types::{Rect, Size};

/// Read access to an unshifted sectioned layout.
///
/// Implementations return fresh [`LayoutAttributes`] values; callers are free
/// to modify what they receive.
///
/// # Example
///
/// ```ignore
/// use horizon_lattice_parallax::{BaseLayout, LayoutAttributes, Rect, Size, SupplementaryKind};
///
/// struct SingleCell;
///
/// impl BaseLayout for SingleCell {
///     fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
///         let frame = Rect::new(0.0, 0.0, 320.0, 44.0);
///         if frame.intersects(&rect) {
///             vec![LayoutAttributes::cell(0, 0, frame)]
///         } else {
///             Vec::new()
///         }
///     }
///
///     fn attributes_for_item(&self, section: usize, index: usize) -> Option<LayoutAttributes> {
///         (section == 0 && index == 0)
///             .then(|| LayoutAttributes::cell(0, 0, Rect::new(0.0, 0.0, 320.0, 44.0)))
///     }
///
///     fn attributes_for_supplementary(&self, _: SupplementaryKind, _: usize) -> Option<LayoutAttributes> {
///         None
///     }
///
///     fn content_size(&self) -> Size {
///         Size::new(320.0, 44.0)
///     }
/// }
/// ```
pub trait BaseLayout {
    /// Attributes of every cell and section header intersecting `rect`.
    fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes>;

    /// Attributes of a single cell.
    fn attributes_for_item(&self, section: usize, index: usize) -> Option<LayoutAttributes>;

    /// Attributes of a supplementary element of `section`.
    ///
    /// Base layouts know nothing of the banner and return `None` for
    /// [`SupplementaryKind::Banner`].
    fn attributes_for_supplementary(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<LayoutAttributes>;

    /// Starting attributes of a supplementary element that is being inserted.
    fn initial_attributes_for_appearing_supplementary(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<LayoutAttributes> {
        self.attributes_for_supplementary(kind, section)
    }

    /// Total size of the unshifted content.
    fn content_size(&self) -> Size;

    /// Discard cached geometry so the next [`prepare`](Self::prepare) recomputes it.
    fn invalidate(&mut self) {}

    /// Recompute any cached geometry for a container of the given width.
    fn prepare(&mut self, _container_width: f32) {}
}
