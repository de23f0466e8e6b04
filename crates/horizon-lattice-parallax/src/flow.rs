//! Vertical sectioned flow layout.
//!
//! `SectionedFlowLayout` is the default [`BaseLayout`] for parallax lists.
//! Sections are stacked top to bottom. Each section starts with an optional
//! full-width header, followed by its cells flowed left to right in rows of
//! equally sized items, wrapping when the container width is exceeded.
//!
//! # Example
//!
//! ```ignore
//! use horizon_lattice_parallax::{SectionedFlowLayout, Size};
//!
//! let mut layout = SectionedFlowLayout::new(vec![12, 4, 30]);
//! layout.set_item_size(Size::new(100.0, 100.0));
//! layout.set_header_height(44.0);
//! layout.prepare(375.0);
//! ```

use crate::attributes::{LayoutAttributes, SupplementaryKind};
use crate::base::BaseLayout;
use crate::logging::targets;
use crate::types::{Rect, Size};

/// Default spacing between cells in a row and between rows.
pub const DEFAULT_SPACING: f32 = 8.0;

/// Default cell size.
pub const DEFAULT_ITEM_SIZE: Size = Size::new(50.0, 50.0);

/// Insets around the cells of each section (the header sits above them).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionInsets {
    /// Left inset.
    pub left: f32,
    /// Top inset, between the header and the first row.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset, after the last row.
    pub bottom: f32,
}

impl SectionInsets {
    /// Create new section insets.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create uniform insets (same value on all sides).
    pub fn uniform(inset: f32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Total horizontal inset (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Cached geometry of one section.
#[derive(Debug, Clone, Default)]
struct SectionGeometry {
    /// Bounding frame of the whole section, header included.
    frame: Rect,
    header: Option<Rect>,
    items: Vec<Rect>,
}

/// A vertical flow layout of sections, each with a header and a grid of cells.
#[derive(Debug, Clone)]
pub struct SectionedFlowLayout {
    /// Number of cells in each section.
    sections: Vec<usize>,
    item_size: Size,
    /// Header height; zero disables section headers.
    header_height: f32,
    /// Horizontal spacing between cells in a row.
    interitem_spacing: f32,
    /// Vertical spacing between rows.
    line_spacing: f32,
    section_insets: SectionInsets,

    /// Width the cache was computed for.
    container_width: f32,
    geometry: Vec<SectionGeometry>,
    content_height: f32,
    dirty: bool,
}

impl SectionedFlowLayout {
    /// Create a layout with the given number of cells per section.
    pub fn new(sections: Vec<usize>) -> Self {
        Self {
            sections,
            item_size: DEFAULT_ITEM_SIZE,
            header_height: 0.0,
            interitem_spacing: DEFAULT_SPACING,
            line_spacing: DEFAULT_SPACING,
            section_insets: SectionInsets::default(),
            container_width: 0.0,
            geometry: Vec::new(),
            content_height: 0.0,
            dirty: true,
        }
    }

    /// Number of sections.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of cells in `section`, or zero if it does not exist.
    #[inline]
    pub fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).copied().unwrap_or(0)
    }

    /// Replace the per-section cell counts.
    pub fn set_sections(&mut self, sections: Vec<usize>) {
        if self.sections != sections {
            self.sections = sections;
            self.invalidate();
        }
    }

    /// Get the cell size.
    #[inline]
    pub fn item_size(&self) -> Size {
        self.item_size
    }

    /// Set the cell size.
    pub fn set_item_size(&mut self, size: Size) {
        if self.item_size != size {
            self.item_size = size;
            self.invalidate();
        }
    }

    /// Get the section header height.
    #[inline]
    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    /// Set the section header height. Zero disables headers.
    pub fn set_header_height(&mut self, height: f32) {
        if (self.header_height - height).abs() > f32::EPSILON {
            self.header_height = height;
            self.invalidate();
        }
    }

    /// Get the horizontal spacing between cells.
    #[inline]
    pub fn interitem_spacing(&self) -> f32 {
        self.interitem_spacing
    }

    /// Set the horizontal spacing between cells.
    pub fn set_interitem_spacing(&mut self, spacing: f32) {
        if (self.interitem_spacing - spacing).abs() > f32::EPSILON {
            self.interitem_spacing = spacing;
            self.invalidate();
        }
    }

    /// Get the vertical spacing between rows.
    #[inline]
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    /// Set the vertical spacing between rows.
    pub fn set_line_spacing(&mut self, spacing: f32) {
        if (self.line_spacing - spacing).abs() > f32::EPSILON {
            self.line_spacing = spacing;
            self.invalidate();
        }
    }

    /// Get the section insets.
    #[inline]
    pub fn section_insets(&self) -> SectionInsets {
        self.section_insets
    }

    /// Set the section insets.
    pub fn set_section_insets(&mut self, insets: SectionInsets) {
        if self.section_insets != insets {
            self.section_insets = insets;
            self.invalidate();
        }
    }

    /// Check if the cached geometry needs recalculation.
    #[inline]
    pub fn needs_recalculation(&self) -> bool {
        self.dirty
    }

    /// Number of cells per row for the cached container width.
    pub fn columns(&self) -> usize {
        let available = self.container_width - self.section_insets.horizontal();
        let stride = self.item_size.width + self.interitem_spacing;
        if stride <= 0.0 {
            return 1;
        }
        (((available + self.interitem_spacing) / stride).floor() as usize).max(1)
    }

    fn calculate(&mut self) {
        let columns = self.columns();
        let width = self.container_width;
        let insets = self.section_insets;
        let mut y = 0.0;

        self.geometry.clear();
        for &count in &self.sections {
            let section_top = y;

            let header = (self.header_height > 0.0).then(|| {
                let frame = Rect::new(0.0, y, width, self.header_height);
                y += self.header_height;
                frame
            });

            y += insets.top;
            let items: Vec<Rect> = (0..count)
                .map(|index| {
                    let row = (index / columns) as f32;
                    let column = (index % columns) as f32;
                    Rect::new(
                        insets.left + column * (self.item_size.width + self.interitem_spacing),
                        y + row * (self.item_size.height + self.line_spacing),
                        self.item_size.width,
                        self.item_size.height,
                    )
                })
                .collect();

            let rows = count.div_ceil(columns);
            if rows > 0 {
                y += rows as f32 * self.item_size.height + (rows - 1) as f32 * self.line_spacing;
            }
            y += insets.bottom;

            self.geometry.push(SectionGeometry {
                frame: Rect::new(0.0, section_top, width, y - section_top),
                header,
                items,
            });
        }

        self.content_height = y;
        self.dirty = false;

        tracing::debug!(
            target: targets::FLOW,
            sections = self.sections.len(),
            columns,
            content_height = self.content_height,
            "recalculated sectioned flow layout"
        );
    }
}

impl Default for SectionedFlowLayout {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl BaseLayout for SectionedFlowLayout {
    fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes> {
        let mut result = Vec::new();
        for (section, geometry) in self.geometry.iter().enumerate() {
            if !geometry.frame.intersects(&rect) {
                continue;
            }
            if let Some(header) = geometry.header.filter(|frame| frame.intersects(&rect)) {
                result.push(LayoutAttributes::section_header(section, header));
            }
            result.extend(
                geometry
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(_, frame)| frame.intersects(&rect))
                    .map(|(index, frame)| LayoutAttributes::cell(section, index, *frame)),
            );
        }
        result
    }

    fn attributes_for_item(&self, section: usize, index: usize) -> Option<LayoutAttributes> {
        let frame = self.geometry.get(section)?.items.get(index)?;
        Some(LayoutAttributes::cell(section, index, *frame))
    }

    fn attributes_for_supplementary(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<LayoutAttributes> {
        match kind {
            SupplementaryKind::SectionHeader => {
                let header = self.geometry.get(section)?.header?;
                Some(LayoutAttributes::section_header(section, header))
            }
            SupplementaryKind::Banner => None,
        }
    }

    fn content_size(&self) -> Size {
        Size::new(self.container_width, self.content_height)
    }

    fn invalidate(&mut self) {
        self.dirty = true;
    }

    fn prepare(&mut self, container_width: f32) {
        if self.dirty || (self.container_width - container_width).abs() > f32::EPSILON {
            self.container_width = container_width;
            self.calculate();
        }
    }
}
