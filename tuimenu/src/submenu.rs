//! Recursive submenu spawning.
//!
//! Layers are numbered from the top-level menu (layer 0) outwards. The
//! submenu shown beside an option of layer `n` is layer `n + 1` and lives at
//! `chain[n]`. Each layer owns one hover-intent timer that governs its child
//! submenu, so only one submenu per layer can be pending or shown.

use std::time::{Duration, Instant};

use log::debug;

use crate::config::MenuConfig;
use crate::geometry::{submenu_origin, Origin, Rect};
use crate::intent::{HoverIntent, IntentKind};
use crate::option::MenuOption;

/// Transition a layer can schedule for its child submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmenuIntent {
    /// Show the submenu of the option at `index`, anchored to `anchor`.
    Spawn { index: usize, anchor: Rect },
    /// Remove the child submenu and everything below it.
    Despawn,
}

/// A shown submenu layer.
#[derive(Debug, Clone)]
pub struct SubmenuState {
    /// Id of the option this submenu belongs to.
    pub parent_option_id: String,
    /// Position of that option within its own layer.
    pub parent_index: usize,
    /// Rectangle of the parent option row, captured at spawn time.
    pub anchor: Rect,
    /// Where the layer is drawn.
    pub origin: Origin,
    /// Options shown in this layer.
    pub options: Vec<MenuOption>,
    /// Governs this layer's own child submenu.
    timer: HoverIntent<SubmenuIntent>,
}

impl SubmenuState {
    /// Build the submenu for `option`, or `None` if it is a leaf.
    pub fn spawn(option: &MenuOption, parent_index: usize, anchor: Rect) -> Option<Self> {
        if option.is_leaf() {
            return None;
        }
        Some(Self {
            parent_option_id: option.id.clone(),
            parent_index,
            anchor,
            origin: submenu_origin(anchor),
            options: option.children.clone(),
            timer: HoverIntent::new(),
        })
    }

    /// Whether this layer's own child has a pending transition.
    pub fn has_pending_intent(&self) -> bool {
        self.timer.is_pending()
    }
}

/// The chain of shown submenus belonging to one top-level menu.
#[derive(Debug, Clone, Default)]
pub struct SubmenuSpawner {
    /// Governs the top-level menu's child submenu.
    root_timer: HoverIntent<SubmenuIntent>,
    chain: Vec<SubmenuState>,
}

impl SubmenuSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of submenus currently shown.
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// All shown submenus, outermost first.
    pub fn chain(&self) -> &[SubmenuState] {
        &self.chain
    }

    /// The submenu shown beside layer `layer`.
    pub fn child_of(&self, layer: usize) -> Option<&SubmenuState> {
        self.chain.get(layer)
    }

    /// Whether layer `layer` currently shows the submenu of its option `index`.
    pub fn shows(&self, layer: usize, index: usize) -> bool {
        self.child_of(layer)
            .is_some_and(|child| child.parent_index == index)
    }

    /// Options displayed by layer `layer`.
    pub fn layer_options<'a>(
        &'a self,
        root: &'a [MenuOption],
        layer: usize,
    ) -> Option<&'a [MenuOption]> {
        if layer == 0 {
            Some(root)
        } else {
            self.chain.get(layer - 1).map(|s| s.options.as_slice())
        }
    }

    fn timer_mut(&mut self, layer: usize) -> Option<&mut HoverIntent<SubmenuIntent>> {
        if layer == 0 {
            Some(&mut self.root_timer)
        } else {
            self.chain.get_mut(layer - 1).map(|s| &mut s.timer)
        }
    }

    fn timer(&self, layer: usize) -> Option<&HoverIntent<SubmenuIntent>> {
        if layer == 0 {
            Some(&self.root_timer)
        } else {
            self.chain.get(layer - 1).map(|s| &s.timer)
        }
    }

    /// Show the submenu of `option` beside layer `layer`.
    ///
    /// Replaces whatever that layer was showing. Returns `None` (and leaves
    /// the layer without a child) when `option` is a leaf.
    pub fn spawn(
        &mut self,
        layer: usize,
        option: &MenuOption,
        index: usize,
        anchor: Rect,
    ) -> Option<&SubmenuState> {
        if layer > self.chain.len() {
            return None;
        }
        self.chain.truncate(layer);
        let state = SubmenuState::spawn(option, index, anchor)?;
        debug!(
            "submenu: spawned '{}' at layer {} ({} options)",
            state.parent_option_id,
            layer + 1,
            state.options.len()
        );
        self.chain.push(state);
        self.chain.last()
    }

    /// Remove the child of layer `layer` and every deeper submenu.
    pub fn despawn(&mut self, layer: usize) {
        if layer < self.chain.len() {
            debug!(
                "submenu: despawned {} layer(s) below layer {}",
                self.chain.len() - layer,
                layer
            );
            self.chain.truncate(layer);
        }
    }

    /// Remove every submenu and cancel every timer.
    pub fn clear(&mut self) {
        self.root_timer.cancel();
        self.despawn(0);
    }

    /// Click on option `index` of layer `layer`: toggle its submenu.
    ///
    /// Clicking the option whose submenu is already shown closes it; clicking
    /// a different option replaces it. Returns false for leaves.
    pub fn toggle(&mut self, root: &[MenuOption], layer: usize, index: usize, anchor: Rect) -> bool {
        let Some(option) = self.option_at(root, layer, index) else {
            return false;
        };
        if option.is_leaf() {
            return false;
        }
        if let Some(timer) = self.timer_mut(layer) {
            timer.cancel();
        }
        if self.shows(layer, index) {
            self.despawn(layer);
        } else {
            let _ = self.spawn(layer, &option, index, anchor);
        }
        true
    }

    /// Make sure the submenu of option `index` on layer `layer` is shown.
    pub fn reveal(&mut self, root: &[MenuOption], layer: usize, index: usize, anchor: Rect) -> bool {
        let Some(option) = self.option_at(root, layer, index) else {
            return false;
        };
        if option.is_leaf() {
            return false;
        }
        self.keep_ancestors(layer);
        if let Some(timer) = self.timer_mut(layer) {
            timer.cancel();
        }
        if !self.shows(layer, index) {
            let _ = self.spawn(layer, &option, index, anchor);
        }
        true
    }

    /// Pointer is over option `index` of layer `layer`.
    pub fn hover_row(
        &mut self,
        root: &[MenuOption],
        layer: usize,
        index: usize,
        anchor: Rect,
        config: &MenuConfig,
        now: Instant,
    ) {
        let Some(option) = self.option_at(root, layer, index) else {
            return;
        };
        self.keep_ancestors(layer);

        if option.has_children() {
            if self.shows(layer, index) {
                if let Some(timer) = self.timer_mut(layer) {
                    timer.cancel();
                }
                // The shown submenu's own child lost its parent row.
                self.release_layer(layer + 1, config.hide_delay, now);
            } else if let Some(timer) = self.timer_mut(layer) {
                let spawn = SubmenuIntent::Spawn { index, anchor };
                timer.ensure_show(config.show_delay, spawn, now);
            }
        } else {
            self.release_layer(layer, config.hide_delay, now);
        }
    }

    /// Pointer is over layer `layer` but not over one of its options.
    pub fn hover_layer(&mut self, layer: usize) {
        self.keep_ancestors(layer);
    }

    /// Pointer is over the trigger: no option of the top-level layer is hovered.
    pub fn hover_trigger(&mut self, config: &MenuConfig, now: Instant) {
        self.release_layer(0, config.hide_delay, now);
    }

    /// Cancel pending hides for every layer that encloses `layer`.
    fn keep_ancestors(&mut self, layer: usize) {
        for ancestor in 0..layer.min(self.chain.len() + 1) {
            if let Some(timer) = self.timer_mut(ancestor) {
                timer.cancel_kind(IntentKind::Hide);
                // A different sibling may have been about to spawn.
                timer.cancel_kind(IntentKind::Show);
            }
        }
    }

    /// Schedule removal of `layer`'s child, or drop a pending spawn if none is shown.
    fn release_layer(&mut self, layer: usize, hide_delay: Duration, now: Instant) {
        let has_child = self.chain.len() > layer;
        if let Some(timer) = self.timer_mut(layer) {
            if has_child {
                timer.ensure_hide(hide_delay, SubmenuIntent::Despawn, now);
            } else {
                timer.cancel_kind(IntentKind::Show);
            }
        }
    }

    fn option_at(&self, root: &[MenuOption], layer: usize, index: usize) -> Option<MenuOption> {
        self.layer_options(root, layer)
            .and_then(|options| options.get(index))
            .cloned()
    }

    /// Earliest pending deadline across all layers.
    pub fn next_deadline(&self) -> Option<Instant> {
        (0..=self.chain.len())
            .filter_map(|layer| self.timer(layer).and_then(|t| t.deadline()))
            .min()
    }

    /// Fire every due transition. Returns true if the chain changed.
    pub fn poll(&mut self, root: &[MenuOption], now: Instant) -> bool {
        let mut changed = false;
        let mut layer = 0;
        while layer <= self.chain.len() {
            let due = self.timer_mut(layer).and_then(|t| t.poll(now));
            match due {
                Some(SubmenuIntent::Spawn { index, anchor }) => {
                    if let Some(option) = self.option_at(root, layer, index) {
                        changed |= self.spawn(layer, &option, index, anchor).is_some();
                    }
                }
                Some(SubmenuIntent::Despawn) => {
                    changed |= self.chain.len() > layer;
                    self.despawn(layer);
                }
                None => {}
            }
            layer += 1;
        }
        changed
    }
}
