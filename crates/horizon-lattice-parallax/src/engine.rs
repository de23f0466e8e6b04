//! The parallax layout engine.
//!
//! The engine turns a base layout into a parallax layout in a single pass:
//!
//! 1. **Shift**: every cell and section header moves down by the banner's
//!    resting height, reserving room for the banner above the first section.
//! 2. **Banner**: the banner stretches while the list is pulled past its top,
//!    shrinks while the list scrolls up, and optionally docks at the top of
//!    the viewport once collapsed.
//! 3. **Sticky headers**: each section header with visible cells is pinned to
//!    the top of the viewport (below a docked banner) without ever sliding
//!    past the last visible cell of its section.
//!
//! Every function here is pure: the result depends only on the arguments and
//! nothing is cached between calls. Hosts normally go through
//! [`ParallaxLayout`](crate::ParallaxLayout), which gathers the arguments.

use std::collections::BTreeMap;

use crate::attributes::{ElementIdentity, LayoutAttributes, SupplementaryKind, ZLayer};
use crate::base::BaseLayout;
use crate::config::ParallaxConfig;
use crate::logging::{PerfSpan, targets};
use crate::types::{Rect, Size};
use crate::viewport::ViewportSnapshot;

/// Horizontal position of the banner frame.
const BANNER_X: f32 = 0.0;

/// Compute the attributes of every element overlapping `query`.
///
/// Without an `indicative_size` the base attributes are returned unmodified.
pub fn compute_layout<B: BaseLayout + ?Sized>(
    query: Rect,
    viewport: &ViewportSnapshot,
    base: &B,
    config: &ParallaxConfig,
) -> Vec<LayoutAttributes> {
    let Some(indicative) = config.indicative_size else {
        return base.attributes_in_rect(query);
    };
    let _span = PerfSpan::new("parallax_layout");
    let reserved = indicative.height;

    // The base layout answers in unshifted coordinates.
    let mut items = base.attributes_in_rect(query.offset(0.0, -reserved));

    // Per-pass bookkeeping, keyed by section. Values are positions in `items`.
    let mut headers: BTreeMap<usize, usize> = BTreeMap::new();
    let mut last_cells: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    let mut first_cell_visible = false;

    for (position, attrs) in items.iter_mut().enumerate() {
        attrs.shift_down(reserved);
        attrs.z_index = ZLayer::MIN;

        match attrs.identity {
            ElementIdentity::SectionHeader { section } => {
                headers.insert(section, position);
            }
            ElementIdentity::Cell { section, index } => {
                last_cells
                    .entry(section)
                    .and_modify(|last| {
                        if index > last.0 {
                            *last = (index, position);
                        }
                    })
                    .or_insert((index, position));
                first_cell_visible |= section == 0 && index == 0;
            }
            ElementIdentity::Banner => {}
        }
    }

    let banner = is_banner_visible(query, indicative, config.always_on_top, first_cell_visible)
        .then(|| banner_attributes(viewport, config))
        .flatten();

    for (&section, &(_, cell_position)) in &last_cells {
        let last_cell = items[cell_position].frame;
        let header_position = match headers.get(&section) {
            Some(&position) => position,
            None => {
                let Some(mut header) =
                    base.attributes_for_supplementary(SupplementaryKind::SectionHeader, section)
                else {
                    continue;
                };
                header.shift_down(reserved);
                items.push(header);
                items.len() - 1
            }
        };
        stick_header(&mut items[header_position], last_cell, viewport, config);
    }

    tracing::trace!(
        target: targets::ENGINE,
        query_top = query.top(),
        scroll_offset_y = viewport.scroll_offset_y,
        elements = items.len(),
        sticky_sections = last_cells.len(),
        banner = banner.is_some(),
        "computed parallax layout"
    );

    items.extend(banner);
    items
}

/// Whether the banner belongs in a pass over `query`.
///
/// The banner shows while the query reaches the content origin, while it is
/// docked, or while the very first cell is on screen. A zero-size banner never
/// shows.
fn is_banner_visible(query: Rect, indicative: Size, always_on_top: bool, first_cell_visible: bool) -> bool {
    !indicative.is_zero() && (query.top() <= 0.0 || always_on_top || first_cell_visible)
}

/// Banner attributes for the given scroll state.
///
/// Returns `None` when the banner is disabled or has zero size. Both the bulk
/// pass and single-element lookups go through here, so they always agree.
pub fn banner_attributes(viewport: &ViewportSnapshot, config: &ParallaxConfig) -> Option<LayoutAttributes> {
    let indicative = config.indicative_size.filter(|size| !size.is_zero())?;
    let min_height = config.min_size.height;

    // Resting bottom edge of the banner at scroll offset zero.
    let max_y = indicative.height;
    let mut y = (max_y - min_height).min(viewport.visible_top());
    let height = (max_y - y).max(0.0);
    let progressiveness = progressiveness(height, indicative.height, min_height);

    let mut z_index = ZLayer::BANNER_REST;
    if config.always_on_top && height <= min_height {
        y = viewport.visible_top();
        z_index = ZLayer::MAX;
    }

    let frame = Rect::new(BANNER_X, y, indicative.width, height);
    Some(LayoutAttributes::banner(frame, progressiveness).with_z_index(z_index))
}

/// How expanded a banner of `height` is between the collapsed and resting heights.
///
/// Zero when the two heights coincide.
pub fn progressiveness(height: f32, indicative_height: f32, min_height: f32) -> f32 {
    let range = indicative_height - min_height;
    if range == 0.0 {
        return 0.0;
    }
    (height - min_height) / range
}

/// Pin a shifted section header between its natural position and the last
/// visible cell of its section.
pub fn stick_header(
    header: &mut LayoutAttributes,
    last_cell: Rect,
    viewport: &ViewportSnapshot,
    config: &ParallaxConfig,
) {
    let section_max_y = last_cell.max_y() - header.frame.height();

    let mut dock_y = viewport.header_dock_y();
    if config.always_on_top {
        dock_y += config.min_size.height;
    }

    header.frame.origin.y = dock_y.max(header.frame.top()).min(section_max_y);
    header.z_index = ZLayer::DEFAULT;
    header.hidden = false;
}

/// Attributes of a single cell.
pub fn attributes_for_item<B: BaseLayout + ?Sized>(
    section: usize,
    index: usize,
    base: &B,
    config: &ParallaxConfig,
) -> Option<LayoutAttributes> {
    let mut attrs = base.attributes_for_item(section, index)?;
    if let Some(indicative) = config.indicative_size {
        attrs.shift_down(indicative.height);
        attrs.z_index = ZLayer::MIN;
    }
    Some(attrs)
}

/// Attributes of a single section header, sticky adjustment included.
///
/// The header is pinned against the last cell of its section that is visible
/// in `viewport`, exactly as a bulk pass over the visible rectangle would.
pub fn attributes_for_section_header<B: BaseLayout + ?Sized>(
    section: usize,
    viewport: &ViewportSnapshot,
    base: &B,
    config: &ParallaxConfig,
) -> Option<LayoutAttributes> {
    let mut header = base.attributes_for_supplementary(SupplementaryKind::SectionHeader, section)?;
    let Some(indicative) = config.indicative_size else {
        return Some(header);
    };
    let reserved = indicative.height;
    header.shift_down(reserved);
    header.z_index = ZLayer::MIN;

    let last_cell = base
        .attributes_in_rect(viewport.visible_rect.offset(0.0, -reserved))
        .into_iter()
        .filter_map(|attrs| match attrs.identity {
            ElementIdentity::Cell { section: s, index } if s == section => Some((index, attrs.frame)),
            _ => None,
        })
        .max_by_key(|(index, _)| *index);

    if let Some((_, frame)) = last_cell {
        stick_header(&mut header, frame.offset(0.0, reserved), viewport, config);
    }
    Some(header)
}

/// Attributes of a supplementary element.
pub fn attributes_for_supplementary<B: BaseLayout + ?Sized>(
    kind: SupplementaryKind,
    section: usize,
    viewport: &ViewportSnapshot,
    base: &B,
    config: &ParallaxConfig,
) -> Option<LayoutAttributes> {
    match kind {
        SupplementaryKind::SectionHeader => attributes_for_section_header(section, viewport, base, config),
        SupplementaryKind::Banner => banner_attributes(viewport, config),
    }
}

/// Starting attributes of a supplementary element that is being inserted.
///
/// Section headers start from the base layout's insertion frame, shifted like
/// everything else. The banner starts where it currently is.
pub fn initial_attributes_for_appearing_supplementary<B: BaseLayout + ?Sized>(
    kind: SupplementaryKind,
    section: usize,
    viewport: &ViewportSnapshot,
    base: &B,
    config: &ParallaxConfig,
) -> Option<LayoutAttributes> {
    match kind {
        SupplementaryKind::SectionHeader => {
            let mut attrs = base.initial_attributes_for_appearing_supplementary(kind, section)?;
            attrs.shift_down(config.reserved_height());
            Some(attrs)
        }
        SupplementaryKind::Banner => banner_attributes(viewport, config),
    }
}

/// Total content size: the base content plus the space reserved for the banner.
///
/// A detached container has no content size.
pub fn content_size<B: BaseLayout + ?Sized>(base: &B, config: &ParallaxConfig, attached: bool) -> Size {
    if !attached {
        return Size::ZERO;
    }
    let size = base.content_size();
    Size::new(size.width, size.height + config.reserved_height())
}
