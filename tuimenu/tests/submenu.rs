use std::time::{Duration, Instant};

use tuimenu::{MenuConfig, MenuOption, Rect, SubmenuSpawner, SubmenuState};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn tree() -> Vec<MenuOption> {
    vec![
        MenuOption::new("file", "File").children([
            MenuOption::new("new", "New"),
            MenuOption::new("recent", "Recent").children([
                MenuOption::new("doc1", "doc1.txt"),
                MenuOption::new("doc2", "doc2.txt"),
            ]),
            MenuOption::new("share", "Share").child(MenuOption::new("email", "Email")),
        ]),
        MenuOption::new("edit", "Edit").child(MenuOption::new("undo", "Undo")),
        MenuOption::new("quit", "Quit"),
    ]
}

fn anchor(level: usize, index: usize) -> Rect {
    Rect::new(10 * level as u16 + 1, 2 + index as u16, 10, 1)
}

// ============================================================================
// SubmenuState
// ============================================================================

#[test]
fn test_leaf_spawns_nothing() {
    let quit = MenuOption::new("quit", "Quit");
    assert!(SubmenuState::spawn(&quit, 2, anchor(0, 2)).is_none());
}

#[test]
fn test_spawned_state_copies_children_and_derives_origin() {
    let options = tree();
    let state = SubmenuState::spawn(&options[0], 0, Rect::new(4, 7, 12, 1)).unwrap();

    assert_eq!(state.parent_option_id, "file");
    assert_eq!(state.parent_index, 0);
    assert_eq!(state.options.len(), 3);
    assert_eq!(state.origin.top, 6);
    assert_eq!(state.origin.left, 16);
    assert!(!state.has_pending_intent());
}

// ============================================================================
// Direct spawn/despawn
// ============================================================================

#[test]
fn test_spawn_replaces_the_layer_and_everything_below() {
    let options = tree();
    let mut spawner = SubmenuSpawner::new();
    spawner.spawn(0, &options[0], 0, anchor(0, 0));
    let recent = spawner.chain()[0].options[1].clone();
    spawner.spawn(1, &recent, 1, anchor(1, 1));
    assert_eq!(spawner.depth(), 2);

    spawner.spawn(0, &options[1], 1, anchor(0, 1));

    assert_eq!(spawner.depth(), 1);
    assert_eq!(spawner.child_of(0).unwrap().parent_option_id, "edit");
}

#[test]
fn test_spawn_beyond_chain_is_rejected() {
    let options = tree();
    let mut spawner = SubmenuSpawner::new();
    assert!(spawner.spawn(1, &options[0], 0, anchor(1, 0)).is_none());
    assert!(spawner.is_empty());
}

#[test]
fn test_spawning_a_leaf_truncates_without_pushing() {
    let options = tree();
    let mut spawner = SubmenuSpawner::new();
    spawner.spawn(0, &options[0], 0, anchor(0, 0));

    assert!(spawner.spawn(0, &options[2], 2, anchor(0, 2)).is_none());
    assert!(spawner.is_empty());
}

#[test]
fn test_despawn_truncates_and_tolerates_missing_layers() {
    let options = tree();
    let mut spawner = SubmenuSpawner::new();
    spawner.spawn(0, &options[0], 0, anchor(0, 0));
    let recent = spawner.chain()[0].options[1].clone();
    spawner.spawn(1, &recent, 1, anchor(1, 1));

    spawner.despawn(5);
    assert_eq!(spawner.depth(), 2);

    spawner.despawn(1);
    assert_eq!(spawner.depth(), 1);

    spawner.despawn(0);
    assert!(spawner.is_empty());
}

#[test]
fn test_layer_options_follow_the_chain() {
    let options = tree();
    let mut spawner = SubmenuSpawner::new();
    assert_eq!(spawner.layer_options(&options, 0).map(|o| o.len()), Some(3));
    assert!(spawner.layer_options(&options, 1).is_none());

    spawner.spawn(0, &options[1], 1, anchor(0, 1));
    let layer = spawner.layer_options(&options, 1).unwrap();
    assert_eq!(layer[0].id, "undo");
}

// ============================================================================
// Click toggling
// ============================================================================

#[test]
fn test_toggle_opens_then_closes_same_option() {
    let options = tree();
    let mut spawner = SubmenuSpawner::new();

    assert!(spawner.toggle(&options, 0, 0, anchor(0, 0)));
    assert!(spawner.shows(0, 0));

    assert!(spawner.toggle(&options, 0, 0, anchor(0, 0)));
    assert!(spawner.is_empty());
}

#[test]
fn test_toggle_ignores_leaves_and_unknown_rows() {
    let options = tree();
    let mut spawner = SubmenuSpawner::new();

    assert!(!spawner.toggle(&options, 0, 2, anchor(0, 2)));
    assert!(!spawner.toggle(&options, 0, 9, anchor(0, 9)));
    assert!(!spawner.toggle(&options, 3, 0, anchor(3, 0)));
    assert!(spawner.is_empty());
}

#[test]
fn test_toggle_parent_collapses_deeper_layers() {
    let options = tree();
    let mut spawner = SubmenuSpawner::new();
    spawner.toggle(&options, 0, 0, anchor(0, 0));
    spawner.toggle(&options, 1, 1, anchor(1, 1));
    assert_eq!(spawner.depth(), 2);

    spawner.toggle(&options, 0, 0, anchor(0, 0));
    assert!(spawner.is_empty());
}

// ============================================================================
// Hover intents
// ============================================================================

#[test]
fn test_hover_row_schedules_then_spawns() {
    let options = tree();
    let config = MenuConfig::new().hover().show_delay(ms(40));
    let mut spawner = SubmenuSpawner::new();
    let t0 = Instant::now();

    spawner.hover_row(&options, 0, 0, anchor(0, 0), &config, t0);
    assert!(spawner.is_empty());
    assert_eq!(spawner.next_deadline(), Some(t0 + ms(40)));

    assert!(!spawner.poll(&options, t0 + ms(39)));
    assert!(spawner.poll(&options, t0 + ms(40)));
    assert_eq!(spawner.child_of(0).unwrap().anchor, anchor(0, 0));
    assert_eq!(spawner.next_deadline(), None);
}

#[test]
fn test_last_hovered_sibling_wins() {
    let options = tree();
    let config = MenuConfig::new().hover().show_delay(ms(40));
    let mut spawner = SubmenuSpawner::new();
    let t0 = Instant::now();

    spawner.hover_row(&options, 0, 0, anchor(0, 0), &config, t0);
    spawner.hover_row(&options, 0, 1, anchor(0, 1), &config, t0 + ms(20));
    spawner.poll(&options, t0 + ms(40));
    assert!(spawner.is_empty());

    spawner.poll(&options, t0 + ms(60));
    assert_eq!(spawner.depth(), 1);
    assert_eq!(spawner.child_of(0).unwrap().parent_option_id, "edit");
}

#[test]
fn test_hover_layer_keeps_ancestors_alive() {
    let options = tree();
    let config = MenuConfig::new().hover();
    let mut spawner = SubmenuSpawner::new();
    let t0 = Instant::now();
    spawner.hover_row(&options, 0, 0, anchor(0, 0), &config, t0);
    spawner.poll(&options, t0);

    spawner.hover_trigger(&config, t0 + ms(10));
    assert_eq!(spawner.next_deadline(), Some(t0 + ms(160)));

    spawner.hover_layer(1);
    assert_eq!(spawner.next_deadline(), None);
    spawner.poll(&options, t0 + ms(500));
    assert_eq!(spawner.depth(), 1);
}

#[test]
fn test_each_layer_keeps_its_own_timer() {
    let options = tree();
    let config = MenuConfig::new().hover().show_delay(ms(40));
    let mut spawner = SubmenuSpawner::new();
    let t0 = Instant::now();
    spawner.toggle(&options, 0, 0, anchor(0, 0));

    spawner.hover_row(&options, 1, 1, anchor(1, 1), &config, t0);
    assert!(spawner.child_of(0).unwrap().has_pending_intent());

    spawner.poll(&options, t0 + ms(40));
    assert_eq!(spawner.depth(), 2);
    assert!(!spawner.child_of(0).unwrap().has_pending_intent());
}

#[test]
fn test_clear_drops_chain_and_timers() {
    let options = tree();
    let config = MenuConfig::new().hover().show_delay(ms(40));
    let mut spawner = SubmenuSpawner::new();
    let t0 = Instant::now();
    spawner.toggle(&options, 0, 0, anchor(0, 0));
    spawner.hover_row(&options, 0, 1, anchor(0, 1), &config, t0);

    spawner.clear();

    assert!(spawner.is_empty());
    assert_eq!(spawner.next_deadline(), None);
    assert!(!spawner.poll(&options, t0 + ms(100)));
}
