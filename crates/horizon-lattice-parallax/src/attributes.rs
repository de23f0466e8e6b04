//! Layout attributes produced for each element of a sectioned list.
//!
//! A layout pass hands back one [`LayoutAttributes`] record per element that
//! overlaps the queried region. The records are plain values: the caller owns
//! them and nothing in this crate keeps references across passes.

use std::fmt;

use crate::types::Rect;

/// Draw-order layers used by the parallax layout.
///
/// Higher values draw above lower values for overlapping frames.
pub struct ZLayer;

impl ZLayer {
    /// Resting banner, below all list content.
    pub const BANNER_REST: i32 = 0;
    /// Plain cells and non-sticky section headers.
    pub const MIN: i32 = 1;
    /// Sticky section headers: above cells, below a docked banner.
    pub const DEFAULT: i32 = 1024;
    /// Docked (collapsed, always-on-top) banner.
    pub const MAX: i32 = 2000;
}

/// Kinds of supplementary (non-cell) elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplementaryKind {
    /// A section's own header.
    SectionHeader,
    /// The parallax banner above the first section.
    Banner,
}

impl SupplementaryKind {
    /// Stable name used by hosts that address supplementary views by string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SectionHeader => "section-header",
            Self::Banner => "parallax-banner",
        }
    }

    /// Parse a kind from its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "section-header" => Some(Self::SectionHeader),
            "parallax-banner" => Some(Self::Banner),
            _ => None,
        }
    }
}

impl fmt::Display for SupplementaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies an element within a single layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementIdentity {
    /// A cell at `index` within `section`.
    Cell { section: usize, index: usize },
    /// The header of `section`.
    SectionHeader { section: usize },
    /// The banner. There is at most one per pass and it belongs to no section.
    Banner,
}

impl ElementIdentity {
    /// The section this element belongs to, if any.
    #[inline]
    pub fn section(&self) -> Option<usize> {
        match *self {
            Self::Cell { section, .. } | Self::SectionHeader { section } => Some(section),
            Self::Banner => None,
        }
    }

    /// The supplementary kind of this element, or `None` for cells.
    #[inline]
    pub fn supplementary_kind(&self) -> Option<SupplementaryKind> {
        match self {
            Self::Cell { .. } => None,
            Self::SectionHeader { .. } => Some(SupplementaryKind::SectionHeader),
            Self::Banner => Some(SupplementaryKind::Banner),
        }
    }
}

/// Geometry and ordering for a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutAttributes {
    /// Which element these attributes describe.
    pub identity: ElementIdentity,
    /// Frame in content coordinates.
    pub frame: Rect,
    /// Draw order; see [`ZLayer`].
    pub z_index: i32,
    /// Whether the element should be hidden.
    pub hidden: bool,
    /// How expanded the banner is. Only set for [`ElementIdentity::Banner`].
    ///
    /// `1.0` at the resting height, `0.0` at the collapsed height, above
    /// `1.0` while the list is over-scrolled.
    pub progressiveness: Option<f32>,
}

impl LayoutAttributes {
    /// Create attributes for an element with default ordering.
    pub fn new(identity: ElementIdentity, frame: Rect) -> Self {
        Self {
            identity,
            frame,
            z_index: 0,
            hidden: false,
            progressiveness: None,
        }
    }

    /// Create attributes for a cell.
    pub fn cell(section: usize, index: usize, frame: Rect) -> Self {
        Self::new(ElementIdentity::Cell { section, index }, frame)
    }

    /// Create attributes for a section header.
    pub fn section_header(section: usize, frame: Rect) -> Self {
        Self::new(ElementIdentity::SectionHeader { section }, frame)
    }

    /// Create attributes for the banner.
    pub fn banner(frame: Rect, progressiveness: f32) -> Self {
        Self {
            progressiveness: Some(progressiveness),
            ..Self::new(ElementIdentity::Banner, frame)
        }
    }

    /// Set the draw order, builder style.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// The section this element belongs to, if any.
    #[inline]
    pub fn section(&self) -> Option<usize> {
        self.identity.section()
    }

    #[inline]
    pub fn is_cell(&self) -> bool {
        matches!(self.identity, ElementIdentity::Cell { .. })
    }

    #[inline]
    pub fn is_section_header(&self) -> bool {
        matches!(self.identity, ElementIdentity::SectionHeader { .. })
    }

    #[inline]
    pub fn is_banner(&self) -> bool {
        matches!(self.identity, ElementIdentity::Banner)
    }

    /// Move the frame down by `dy` (up for negative values).
    #[inline]
    pub fn shift_down(&mut self, dy: f32) {
        self.frame.origin.y += dy;
    }
}
