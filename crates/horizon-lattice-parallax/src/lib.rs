//! Parallax banner and sticky section header layout for Horizon Lattice.
//!
//! This crate decorates a sectioned list layout with two effects:
//!
//! - A **parallax banner** above the first section that stretches while the
//!   list is pulled down, shrinks while it scrolls up, and can dock at the top
//!   of the viewport once collapsed.
//! - **Sticky section headers** that stay pinned at the top of the viewport
//!   while their section scrolls underneath, and get pushed away by the end of
//!   the section.
//!
//! The geometry lives in the pure functions of [`engine`]. Hosts normally use
//! [`ParallaxLayout`], which owns a [`BaseLayout`] (such as
//! [`SectionedFlowLayout`]) and reads the scroll state from a [`ScrollHost`].
//!
//! # Getting Started
//!
//! ```
//! use horizon_lattice_parallax::{
//!     ParallaxLayout, ScrollHost, ScrollState, SectionedFlowLayout, Size, SupplementaryKind,
//! };
//!
//! let mut base = SectionedFlowLayout::new(vec![20, 20]);
//! base.set_item_size(Size::new(375.0, 44.0));
//! base.set_header_height(28.0);
//!
//! let mut layout = ParallaxLayout::new(base);
//! layout.set_indicative_size(Some(Size::new(375.0, 240.0)));
//! layout.set_min_size(Size::new(375.0, 64.0));
//!
//! let mut host = ScrollState::new(Size::new(375.0, 667.0));
//! layout.prepare(&mut host);
//!
//! host.scroll_to(100.0);
//! layout.bounds_changed(host.bounds());
//! layout.prepare(&mut host);
//!
//! let banner = layout
//!     .layout_attributes_for_supplementary(SupplementaryKind::Banner, 0, &host)
//!     .unwrap();
//! assert_eq!(banner.frame.height(), 140.0);
//! ```
//!
//! # Configuration Files
//!
//! The banner configuration can be loaded from TOML or JSON:
//!
//! ```
//! use horizon_lattice_parallax::ParallaxConfig;
//!
//! let config = ParallaxConfig::from_toml_str(
//!     r#"
//!     always_on_top = true
//!
//!     [indicative_size]
//!     width = 375.0
//!     height = 240.0
//!
//!     [min_size]
//!     width = 375.0
//!     height = 64.0
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.reserved_height(), 240.0);
//! ```

pub mod engine;

mod attributes;
mod base;
mod config;
mod error;
mod flow;
mod invalidation;
mod layout;
mod logging;
mod types;
mod viewport;

// Layout
pub use base::BaseLayout;
pub use flow::{DEFAULT_ITEM_SIZE, DEFAULT_SPACING, SectionInsets, SectionedFlowLayout};
pub use layout::ParallaxLayout;

// Elements
pub use attributes::{ElementIdentity, LayoutAttributes, SupplementaryKind, ZLayer};

// Host integration
pub use invalidation::InvalidationReason;
pub use viewport::{ScrollHost, ScrollState, ViewportSnapshot};

// Configuration
pub use config::{ParallaxConfig, SharedParallaxConfig};
pub use error::{ConfigError, ConfigResult, ParallaxError, ParallaxResult};

// Infrastructure
pub use logging::{PerfSpan, targets};
pub use types::{Point, Rect, Size};
