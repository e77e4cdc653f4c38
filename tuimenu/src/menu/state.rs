//! Menu transition table.
//!
//! Everything here is synchronous and free of callbacks: each transition
//! mutates the shared state and reports an [`Effect`] that the owning
//! [`Menu`](super::Menu) carries out once the state lock is released.

use std::time::Instant;

use log::trace;

use crate::config::{ActivationMode, MenuConfig};
use crate::intent::{HoverIntent, IntentKind};
use crate::layout::PointerTarget;
use crate::option::MenuOption;
use crate::submenu::SubmenuSpawner;

/// Open/closed state of a top-level menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Transition the trigger's hover intent can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TriggerIntent {
    Open,
    Close,
}

/// Work left for the owner after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Effect {
    None,
    /// Claim the open slot through the registry, then open.
    Open,
    /// Close and release the open slot.
    Close,
    /// A leaf was chosen: record it, notify, close.
    Select(String),
}

/// State shared between a menu and its registry close callback.
#[derive(Debug, Default)]
pub(crate) struct MenuInner {
    pub(crate) state: MenuState,
    pub(crate) options: Vec<MenuOption>,
    pub(crate) trigger_timer: HoverIntent<TriggerIntent>,
    pub(crate) spawner: SubmenuSpawner,
    /// Row under the pointer as `(level, index)`.
    pub(crate) hovered: Option<(usize, usize)>,
    pub(crate) dirty: bool,
}

impl MenuInner {
    pub(crate) fn new(options: Vec<MenuOption>) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Flip to open. The registry must already have been consulted.
    pub(crate) fn mark_open(&mut self) -> bool {
        self.trigger_timer.cancel();
        if self.is_open() {
            return false;
        }
        self.state = MenuState::Open;
        self.dirty = true;
        true
    }

    /// Close unconditionally, dropping every submenu and pending intent.
    ///
    /// Returns true if the menu was open.
    pub(crate) fn force_close(&mut self) -> bool {
        self.trigger_timer.cancel();
        self.spawner.clear();
        self.hovered = None;
        let was_open = self.is_open();
        if was_open {
            self.state = MenuState::Closed;
            self.dirty = true;
        }
        was_open
    }

    /// The pointer moved onto `target`.
    pub(crate) fn pointer_moved(
        &mut self,
        target: PointerTarget,
        config: &MenuConfig,
        now: Instant,
    ) -> Effect {
        let hovered = match target {
            PointerTarget::Row { level, index, .. } if self.is_open() => Some((level, index)),
            _ => None,
        };
        if hovered != self.hovered {
            self.hovered = hovered;
            self.dirty = true;
        }

        if config.mode == ActivationMode::Hover {
            self.hover_trigger(target, config, now);
            if self.is_open() {
                self.hover_submenus(target, config, now);
            }
        }

        self.poll(now)
    }

    fn hover_trigger(&mut self, target: PointerTarget, config: &MenuConfig, now: Instant) {
        match (self.is_open(), target.is_inside()) {
            (false, true) => {
                // The clear affordance sits inside the trigger but never opens it
                if target == PointerTarget::Trigger {
                    self.trigger_timer
                        .ensure_show(config.show_delay, TriggerIntent::Open, now);
                } else {
                    self.trigger_timer.cancel_kind(IntentKind::Show);
                }
            }
            (false, false) => self.trigger_timer.cancel_kind(IntentKind::Show),
            (true, true) => self.trigger_timer.cancel_kind(IntentKind::Hide),
            (true, false) => {
                self.trigger_timer
                    .ensure_hide(config.hide_delay, TriggerIntent::Close, now);
            }
        }
    }

    fn hover_submenus(&mut self, target: PointerTarget, config: &MenuConfig, now: Instant) {
        match target {
            PointerTarget::Row {
                level,
                index,
                anchor,
            } => {
                self.spawner
                    .hover_row(&self.options, level, index, anchor, config, now);
            }
            PointerTarget::Layer { level } => self.spawner.hover_layer(level),
            PointerTarget::Trigger | PointerTarget::Clear => {
                self.spawner.hover_trigger(config, now);
            }
            // Leaving the whole menu is handled by the trigger's hide intent
            PointerTarget::Outside => {}
        }
    }

    /// A click landed on `target`. The clear affordance is handled by the owner.
    pub(crate) fn click(&mut self, target: PointerTarget, mode: ActivationMode) -> Effect {
        match target {
            PointerTarget::Trigger => match (mode, self.is_open()) {
                (ActivationMode::Click, true) => Effect::Close,
                (_, false) => Effect::Open,
                (ActivationMode::Hover, true) => Effect::None,
            },
            PointerTarget::Row {
                level,
                index,
                anchor,
            } => {
                if !self.is_open() {
                    return Effect::None;
                }
                let Some(option) = self
                    .spawner
                    .layer_options(&self.options, level)
                    .and_then(|options| options.get(index))
                else {
                    return Effect::None;
                };
                if option.is_leaf() {
                    return Effect::Select(option.id.clone());
                }
                let changed = match mode {
                    ActivationMode::Click => {
                        self.spawner.toggle(&self.options, level, index, anchor)
                    }
                    ActivationMode::Hover => {
                        self.spawner.reveal(&self.options, level, index, anchor)
                    }
                };
                self.dirty |= changed;
                Effect::None
            }
            PointerTarget::Outside if self.is_open() => Effect::Close,
            PointerTarget::Clear | PointerTarget::Layer { .. } | PointerTarget::Outside => {
                Effect::None
            }
        }
    }

    pub(crate) fn escape(&self) -> Effect {
        if self.is_open() {
            Effect::Close
        } else {
            Effect::None
        }
    }

    /// Fire due hover intents.
    pub(crate) fn poll(&mut self, now: Instant) -> Effect {
        let effect = match self.trigger_timer.poll(now) {
            Some(TriggerIntent::Open) if !self.is_open() => Effect::Open,
            Some(TriggerIntent::Close) if self.is_open() => Effect::Close,
            Some(intent) => {
                trace!("menu: dropped stale {:?} intent", intent);
                Effect::None
            }
            None => Effect::None,
        };

        if effect == Effect::None && self.is_open() {
            self.dirty |= self.spawner.poll(&self.options, now);
        }
        effect
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        let trigger = self.trigger_timer.deadline();
        let submenus = if self.is_open() {
            self.spawner.next_deadline()
        } else {
            None
        };
        match (trigger, submenus) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
