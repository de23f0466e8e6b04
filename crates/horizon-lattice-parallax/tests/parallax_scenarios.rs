//! End-to-end tests driving a parallax layout through a scroll host.

use horizon_lattice_parallax::{
    BaseLayout, ElementIdentity, LayoutAttributes, ParallaxConfig, ParallaxLayout, ScrollHost, ScrollState,
    SectionedFlowLayout, Size, SupplementaryKind, ZLayer,
};

const EPS: f32 = 1e-4;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Three sections of twelve 100x40 cells under 30pt headers, one column.
fn base() -> SectionedFlowLayout {
    let mut base = SectionedFlowLayout::new(vec![12, 12, 12]);
    base.set_item_size(Size::new(100.0, 40.0));
    base.set_header_height(30.0);
    base.set_interitem_spacing(0.0);
    base.set_line_spacing(0.0);
    base
}

fn banner_config() -> ParallaxConfig {
    ParallaxConfig::new(Size::new(100.0, 150.0)).with_min_size(Size::new(100.0, 50.0))
}

fn setup(config: ParallaxConfig) -> (ParallaxLayout<SectionedFlowLayout>, ScrollState) {
    init_tracing();
    let mut layout = ParallaxLayout::with_config(base(), config);
    let mut host = ScrollState::new(Size::new(100.0, 400.0));
    layout.prepare(&mut host);
    (layout, host)
}

fn scroll(layout: &mut ParallaxLayout<SectionedFlowLayout>, host: &mut ScrollState, y: f32) -> Vec<LayoutAttributes> {
    host.scroll_to(y);
    layout.bounds_changed(host.bounds());
    layout.prepare(host);
    layout.layout_attributes_for_elements(host.bounds(), &*host)
}

fn find_banner(items: &[LayoutAttributes]) -> Option<&LayoutAttributes> {
    items.iter().find(|a| a.is_banner())
}

fn find_header(items: &[LayoutAttributes], section: usize) -> Option<&LayoutAttributes> {
    items
        .iter()
        .find(|a| a.identity == ElementIdentity::SectionHeader { section })
}

#[test]
fn test_banner_at_rest() {
    let (mut layout, mut host) = setup(banner_config());
    let items = scroll(&mut layout, &mut host, 0.0);

    let banner = find_banner(&items).unwrap();
    assert_eq!(banner.frame.top(), 0.0);
    assert_eq!(banner.frame.height(), 150.0);
    assert_eq!(banner.progressiveness, Some(1.0));
}

#[test]
fn test_banner_collapses_while_scrolling_up() {
    let (mut layout, mut host) = setup(banner_config());
    let items = scroll(&mut layout, &mut host, 80.0);

    let banner = find_banner(&items).unwrap();
    assert_eq!(banner.frame.top(), 80.0);
    assert_eq!(banner.frame.height(), 70.0);
    assert!((banner.progressiveness.unwrap() - 0.2).abs() < EPS);

    // Fully collapsed once the offset reaches indicative - min
    let items = scroll(&mut layout, &mut host, 100.0);
    let banner = find_banner(&items).unwrap();
    assert_eq!(banner.frame.height(), 50.0);
    assert_eq!(banner.progressiveness, Some(0.0));
}

#[test]
fn test_banner_docks_when_always_on_top() {
    let (mut layout, mut host) = setup(banner_config().with_always_on_top(true));
    let items = scroll(&mut layout, &mut host, 200.0);

    let banner = find_banner(&items).unwrap();
    assert_eq!(banner.frame.top(), 200.0);
    assert_eq!(banner.frame.height(), 50.0);
    assert_eq!(banner.z_index, ZLayer::MAX);

    // Still docked far down the list
    let items = scroll(&mut layout, &mut host, 1200.0);
    let banner = find_banner(&items).unwrap();
    assert_eq!(banner.frame.top(), 1200.0);
    assert_eq!(banner.z_index, ZLayer::MAX);
}

#[test]
fn test_banner_stretches_on_over_scroll() {
    let (mut layout, mut host) = setup(banner_config());
    let items = scroll(&mut layout, &mut host, -30.0);

    let banner = find_banner(&items).unwrap();
    assert_eq!(banner.frame.top(), -30.0);
    assert_eq!(banner.frame.height(), 180.0);
    assert!((banner.progressiveness.unwrap() - 1.3).abs() < EPS);
}

#[test]
fn test_banner_omitted_after_scrolling_away() {
    let (mut layout, mut host) = setup(banner_config());
    let items = scroll(&mut layout, &mut host, 600.0);
    assert!(find_banner(&items).is_none());
}

#[test]
fn test_banner_geometry_holds_for_every_offset() {
    let (mut layout, mut host) = setup(banner_config().with_always_on_top(true));
    for step in -10..60 {
        let offset = step as f32 * 20.0;
        let items = scroll(&mut layout, &mut host, offset);
        let banner = find_banner(&items).unwrap();
        assert_eq!(banner.frame.width(), 100.0);
        assert!(banner.frame.height() >= 50.0, "offset {offset}");
    }
}

#[test]
fn test_without_banner_layout_is_base_layout() {
    let (mut layout, mut host) = setup(ParallaxConfig::default());
    let mut reference = base();
    reference.prepare(100.0);

    for offset in [-30.0, 0.0, 300.0, 900.0] {
        let items = scroll(&mut layout, &mut host, offset);
        assert_eq!(items, reference.attributes_in_rect(host.bounds()));
    }
    assert_eq!(host.content_size, reference.content_size());
}

#[test]
fn test_cells_shift_by_reserved_height() {
    let (mut layout, mut host) = setup(banner_config());
    let mut reference = base();
    reference.prepare(100.0);

    for offset in [-30.0, 0.0, 80.0, 450.0, 1000.0] {
        let items = scroll(&mut layout, &mut host, offset);
        for attrs in items.iter().filter(|a| a.is_cell()) {
            let ElementIdentity::Cell { section, index } = attrs.identity else {
                unreachable!();
            };
            let original = reference.attributes_for_item(section, index).unwrap();
            assert_eq!(attrs.frame.top(), original.frame.top() + 150.0);
        }
    }
}

#[test]
fn test_sticky_header_stays_within_section() {
    let (mut layout, mut host) = setup(banner_config().with_always_on_top(true));
    let mut reference = base();
    reference.prepare(100.0);

    for step in 0..80 {
        let offset = step as f32 * 15.0;
        let items = scroll(&mut layout, &mut host, offset);

        for section in 0..3 {
            let Some(header) = find_header(&items, section) else {
                continue;
            };
            let natural = reference
                .attributes_for_supplementary(SupplementaryKind::SectionHeader, section)
                .unwrap()
                .frame
                .top()
                + 150.0;
            let last_cell_max_y = items
                .iter()
                .filter(|a| a.is_cell() && a.section() == Some(section))
                .map(|a| a.frame.max_y())
                .fold(f32::MIN, f32::max);

            assert!(header.frame.top() >= natural, "offset {offset} section {section}");
            if last_cell_max_y > f32::MIN {
                assert!(
                    header.frame.top() <= last_cell_max_y - header.frame.height(),
                    "offset {offset} section {section}"
                );
                assert_eq!(header.z_index, ZLayer::DEFAULT);
            }
        }
    }
}

#[test]
fn test_sticky_header_sits_below_docked_banner() {
    let (mut layout, mut host) = setup(banner_config().with_always_on_top(true));
    // Section 0 spans 30 + 480 = 510 unshifted, 660 shifted
    let items = scroll(&mut layout, &mut host, 300.0);

    let banner = find_banner(&items).unwrap();
    let header = find_header(&items, 0).unwrap();
    assert_eq!(header.frame.top(), banner.frame.max_y());
    assert!(header.z_index < banner.z_index);
}

#[test]
fn test_single_element_queries_agree_with_bulk_pass() {
    let (mut layout, mut host) = setup(banner_config().with_always_on_top(true));
    for offset in [-30.0, 0.0, 120.0, 640.0, 1100.0] {
        let items = scroll(&mut layout, &mut host, offset);
        for attrs in &items {
            let single = match attrs.identity {
                ElementIdentity::Cell { section, index } => layout.layout_attributes_for_item(section, index),
                ElementIdentity::SectionHeader { section } => {
                    layout.layout_attributes_for_supplementary(SupplementaryKind::SectionHeader, section, &host)
                }
                ElementIdentity::Banner => {
                    layout.layout_attributes_for_supplementary(SupplementaryKind::Banner, 0, &host)
                }
            };
            assert_eq!(single.as_ref(), Some(attrs), "offset {offset}");
        }
    }
}

#[test]
fn test_content_inset_moves_banner() {
    init_tracing();
    let mut layout = ParallaxLayout::with_config(base(), banner_config());
    let mut host = ScrollState::new(Size::new(100.0, 400.0)).with_content_inset_top(64.0);
    layout.prepare(&mut host);

    // Resting position of an inset container
    let items = scroll(&mut layout, &mut host, -64.0);
    let banner = find_banner(&items).unwrap();
    assert_eq!(banner.frame.top(), 0.0);
    assert_eq!(banner.frame.height(), 150.0);
}

#[test]
fn test_disabling_banner_restores_base_layout() {
    let (mut layout, mut host) = setup(banner_config());
    assert_eq!(host.content_size.height, 3.0 * 510.0 + 150.0);

    layout.set_indicative_size(None);
    let items = scroll(&mut layout, &mut host, 0.0);
    assert!(find_banner(&items).is_none());
    assert_eq!(host.content_size.height, 3.0 * 510.0);

    let first = items
        .iter()
        .find(|a| a.identity == ElementIdentity::Cell { section: 0, index: 0 })
        .unwrap();
    assert_eq!(first.frame.top(), 30.0);
}

#[test]
fn test_config_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banner.toml");
    std::fs::write(
        &path,
        "always_on_top = true\n\n[indicative_size]\nwidth = 100.0\nheight = 150.0\n\n[min_size]\nwidth = 100.0\nheight = 50.0\n",
    )
    .unwrap();

    let mut layout = ParallaxLayout::from_config_file(base(), &path).unwrap();
    assert_eq!(layout.config_snapshot(), banner_config().with_always_on_top(true));

    let mut host = ScrollState::new(Size::new(100.0, 400.0));
    let items = scroll(&mut layout, &mut host, 200.0);
    assert_eq!(find_banner(&items).unwrap().z_index, ZLayer::MAX);
}
