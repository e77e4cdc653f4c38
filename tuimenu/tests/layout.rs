use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tuimenu::{
    Event, EventResult, Key, LayerLayout, LayerView, Menu, MenuConfig, MenuLayout, MenuOption,
    MenuRegistry, Modifiers, MouseButton, Origin, OverlaySurface, PointerTarget, Rect,
    RowRenderer, RowStatus, RowView,
};

// ============================================================================
// Test renderers
// ============================================================================

#[derive(Default)]
struct RecordingSurface {
    layers: Vec<LayerView>,
}

impl OverlaySurface for RecordingSurface {
    fn mount_layer(&mut self, layer: &LayerView) {
        self.layers.push(*layer);
    }
}

/// Rows as wide as their label plus two cells of padding.
#[derive(Default)]
struct FixedRows {
    drawn: Vec<(usize, usize, String, RowStatus)>,
}

impl RowRenderer for FixedRows {
    fn row_width(&self, option: &MenuOption) -> u16 {
        option.label.len() as u16 + 2
    }

    fn render_row(&mut self, row: &RowView<'_>) {
        self.drawn
            .push((row.level, row.index, row.option.id.clone(), row.status));
    }
}

fn tree() -> Vec<MenuOption> {
    vec![
        MenuOption::new("file", "File").children([
            MenuOption::new("new", "New"),
            MenuOption::new("recent", "Recent").children([
                MenuOption::new("doc1", "doc1"),
                MenuOption::new("doc2", "doc2"),
            ]),
            MenuOption::new("share", "Share").child(MenuOption::new("email", "Email")),
        ]),
        MenuOption::new("edit", "Edit").child(MenuOption::new("undo", "Undo")),
        MenuOption::new("quit", "Quit"),
    ]
}

const TRIGGER: Rect = Rect::new(2, 1, 10, 1);

fn mounted(registry: &MenuRegistry, config: MenuConfig) -> Menu {
    let mut menu = Menu::new(registry, tree(), config).unwrap();
    menu.set_trigger_rect(TRIGGER);
    menu
}

fn render(menu: &mut Menu) -> (RecordingSurface, FixedRows) {
    let mut surface = RecordingSurface::default();
    let mut rows = FixedRows::default();
    menu.render(&mut surface, &mut rows);
    (surface, rows)
}

fn click(x: u16, y: u16) -> Event {
    Event::Click {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn escape() -> Event {
    Event::Key {
        key: Key::Escape,
        modifiers: Modifiers::default(),
    }
}

// ============================================================================
// LayerLayout
// ============================================================================

#[test]
fn test_layer_is_as_wide_as_its_widest_row() {
    let layer = LayerLayout::compute(1, Origin::new(4, 10), [5, 9, 3], 0);

    assert_eq!(layer.area, Rect::new(10, 4, 11, 5));
    assert_eq!(layer.rows.len(), 3);
    assert_eq!(layer.rows[0], Rect::new(11, 5, 9, 1));
    assert_eq!(layer.rows[2], Rect::new(11, 7, 9, 1));
}

#[test]
fn test_layer_respects_minimum_width() {
    let layer = LayerLayout::compute(0, Origin::new(0, 0), [4], 12);
    assert_eq!(layer.area.width, 14);
    assert_eq!(layer.rows[0].width, 12);
}

#[test]
fn test_empty_layer_is_just_a_border() {
    let layer = LayerLayout::compute(0, Origin::new(3, 3), std::iter::empty(), 0);
    assert_eq!(layer.area, Rect::new(3, 3, 2, 2));
    assert!(layer.rows.is_empty());
}

// ============================================================================
// Hit testing
// ============================================================================

#[test]
fn test_hit_prefers_topmost_layer() {
    let mut layout = MenuLayout::new(TRIGGER, Some(Rect::new(11, 1, 1, 1)));
    layout
        .layers
        .push(LayerLayout::compute(0, Origin::new(2, 2), [8, 8, 8], 0));
    layout
        .layers
        .push(LayerLayout::compute(1, Origin::new(2, 11), [8, 8, 8], 0));

    // Layer 0's right border sits under layer 1's left border
    assert_eq!(layout.hit(11, 3), PointerTarget::Layer { level: 1 });
    assert_eq!(
        layout.hit(12, 4),
        PointerTarget::Row {
            level: 1,
            index: 1,
            anchor: Rect::new(12, 4, 8, 1),
        }
    );
    assert_eq!(layout.hit(2, 2), PointerTarget::Layer { level: 0 });
    assert_eq!(layout.hit(11, 1), PointerTarget::Clear);
    assert_eq!(layout.hit(5, 1), PointerTarget::Trigger);
    assert_eq!(layout.hit(50, 50), PointerTarget::Outside);
}

#[test]
fn test_row_lookup() {
    let mut layout = MenuLayout::default();
    layout
        .layers
        .push(LayerLayout::compute(0, Origin::new(2, 2), [6, 6], 0));

    assert_eq!(layout.row(0, 1), Some(Rect::new(3, 4, 6, 1)));
    assert_eq!(layout.row(0, 2), None);
    assert_eq!(layout.row(1, 0), None);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_closed_menu_mounts_nothing() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());

    let (surface, rows) = render(&mut menu);

    assert!(surface.layers.is_empty());
    assert!(rows.drawn.is_empty());
    assert!(menu.layout().layers.is_empty());
    assert_eq!(menu.layout().trigger, TRIGGER);
}

#[test]
fn test_open_menu_mounts_below_trigger() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());
    menu.open();

    let (surface, rows) = render(&mut menu);

    assert_eq!(surface.layers.len(), 1);
    assert_eq!(surface.layers[0].owner, menu.id());
    assert_eq!(surface.layers[0].area, Rect::new(2, 2, 10, 5));
    let ids: Vec<&str> = rows.drawn.iter().map(|(_, _, id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["file", "edit", "quit"]);
    assert!(rows.drawn[0].3.has_children);
    assert!(!rows.drawn[2].3.has_children);
}

#[test]
fn test_submenus_mount_after_their_parents() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());
    let now = Instant::now();
    menu.open();
    render(&mut menu);

    menu.handle_event(&click(4, 3), now);
    render(&mut menu);
    menu.handle_event(&click(13, 4), now);
    let (surface, rows) = render(&mut menu);

    let levels: Vec<usize> = surface.layers.iter().map(|layer| layer.level).collect();
    assert_eq!(levels, vec![0, 1, 2]);
    assert_eq!(surface.layers[1].area, Rect::new(11, 2, 10, 5));
    assert_eq!(surface.layers[2].area, Rect::new(20, 3, 8, 4));

    let expanded: Vec<(usize, usize)> = rows
        .drawn
        .iter()
        .filter(|(_, _, _, status)| status.expanded)
        .map(|(level, index, _, _)| (*level, *index))
        .collect();
    assert_eq!(expanded, vec![(0, 0), (1, 1)]);
}

#[derive(Default)]
struct Canvas {
    surface: RecordingSurface,
    rows: FixedRows,
}

impl OverlaySurface for Canvas {
    fn mount_layer(&mut self, layer: &LayerView) {
        self.surface.mount_layer(layer);
    }
}

impl RowRenderer for Canvas {
    fn row_width(&self, option: &MenuOption) -> u16 {
        self.rows.row_width(option)
    }

    fn render_row(&mut self, row: &RowView<'_>) {
        self.rows.render_row(row);
    }
}

#[test]
fn test_single_canvas_matches_split_render() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());
    menu.open();
    menu.click(
        PointerTarget::Row {
            level: 0,
            index: 1,
            anchor: Rect::new(3, 4, 8, 1),
        },
        Instant::now(),
    );

    let (surface, rows) = render(&mut menu);
    let split = menu.layout().clone();
    let mut canvas = Canvas::default();
    let joined = menu.render_on(&mut canvas).clone();

    assert_eq!(split, joined);
    assert_eq!(canvas.surface.layers, surface.layers);
    assert_eq!(canvas.rows.drawn.len(), rows.drawn.len());
    assert_eq!(joined.layers[1].area, Rect::new(11, 3, 8, 3));
}

#[test]
fn test_selected_and_hovered_rows_are_flagged() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());
    let now = Instant::now();
    menu.set_value(Some("quit")).unwrap();
    menu.open();
    render(&mut menu);

    menu.handle_event(&Event::MouseMove { x: 4, y: 4 }, now);
    let (_, rows) = render(&mut menu);

    let status: Vec<RowStatus> = rows.drawn.iter().map(|(_, _, _, status)| *status).collect();
    assert!(status[1].hovered);
    assert!(!status[0].hovered);
    assert!(status[2].selected);
    assert!(!status[1].selected);
}

#[test]
fn test_clear_affordance_follows_value() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new().clearable());
    assert_eq!(menu.layout().clear, None);

    menu.set_value(Some("quit")).unwrap();
    assert_eq!(menu.layout().clear, Some(Rect::new(11, 1, 1, 1)));

    assert_eq!(
        menu.handle_event(&click(11, 1), Instant::now()),
        EventResult::Consumed
    );
    assert_eq!(menu.value(), None);
    assert!(!menu.is_open());
    assert_eq!(menu.layout().clear, None);
}

// ============================================================================
// Event adapter
// ============================================================================

#[test]
fn test_click_through_three_levels_selects() {
    let registry = MenuRegistry::new();
    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&picked);
    let mut menu = mounted(&registry, MenuConfig::new())
        .on_change(move |id| sink.borrow_mut().push(id.to_string()));
    let now = Instant::now();

    assert_eq!(menu.handle_event(&click(5, 1), now), EventResult::Consumed);
    render(&mut menu);
    menu.handle_event(&click(4, 3), now);
    render(&mut menu);
    menu.handle_event(&click(13, 4), now);
    render(&mut menu);

    assert_eq!(menu.handle_event(&click(22, 4), now), EventResult::Consumed);
    assert_eq!(*picked.borrow(), vec!["doc1".to_string()]);
    assert!(!menu.is_open());
    assert!(menu.layout().layers.is_empty());
}

#[test]
fn test_hover_over_rendered_rows_spawns_submenus() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new().hover());
    let t0 = Instant::now();

    let moved = menu.handle_event(&Event::MouseMove { x: 5, y: 1 }, t0);
    assert_eq!(moved, EventResult::Ignored);
    assert!(menu.is_open());
    render(&mut menu);

    menu.handle_event(&Event::MouseMove { x: 4, y: 3 }, t0);
    render(&mut menu);
    menu.handle_event(&Event::MouseMove { x: 13, y: 4 }, t0);
    let (surface, _) = render(&mut menu);
    assert_eq!(surface.layers.len(), 3);

    menu.handle_event(&Event::MouseMove { x: 60, y: 20 }, t0);
    menu.tick(t0 + Duration::from_millis(150));
    assert!(!menu.is_open());
}

#[test]
fn test_outside_click_closes_and_propagates() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());
    menu.open();
    render(&mut menu);

    let result = menu.handle_event(&click(40, 10), Instant::now());

    assert_eq!(result, EventResult::Ignored);
    assert!(!menu.is_open());
}

#[test]
fn test_non_left_clicks_and_other_keys_are_ignored() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());
    let now = Instant::now();

    let right = Event::Click {
        x: 5,
        y: 1,
        button: MouseButton::Right,
    };
    assert_eq!(menu.handle_event(&right, now), EventResult::Ignored);
    let key = Event::Key {
        key: Key::Char('x'),
        modifiers: Modifiers::default(),
    };
    assert_eq!(menu.handle_event(&key, now), EventResult::Ignored);
    assert!(!menu.is_open());
}

#[test]
fn test_escape_event_closes() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());
    menu.open();
    render(&mut menu);

    assert_eq!(
        menu.handle_event(&escape(), Instant::now()),
        EventResult::Consumed
    );
    assert!(!menu.is_open());
    assert!(menu.layout().layers.is_empty());
}

#[test]
fn test_resize_closes_menu() {
    let registry = MenuRegistry::new();
    let mut menu = mounted(&registry, MenuConfig::new());
    let now = Instant::now();
    menu.open();
    render(&mut menu);
    menu.handle_event(&click(4, 3), now);

    let resize = Event::Resize {
        width: 80,
        height: 24,
    };
    assert_eq!(menu.handle_event(&resize, now), EventResult::Ignored);
    assert!(!menu.is_open());
    assert_eq!(menu.submenu_depth(), 0);
}

#[test]
fn test_menu_closed_by_sibling_drops_stale_layout() {
    let registry = MenuRegistry::new();
    let picked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&picked);
    let mut x = mounted(&registry, MenuConfig::new())
        .on_change(move |id| sink.borrow_mut().push(id.to_string()));
    let mut y = mounted(&registry, MenuConfig::new());
    x.open();
    render(&mut x);

    y.open();
    // Where x's "Quit" row used to be
    let result = x.handle_event(&click(4, 5), Instant::now());

    assert_eq!(result, EventResult::Ignored);
    assert!(picked.borrow().is_empty());
    assert!(x.layout().layers.is_empty());
    assert!(y.is_open());
}
