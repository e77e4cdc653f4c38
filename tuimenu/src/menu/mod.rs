//! Top-level menu instance: trigger, open state and submenu chain.

mod events;
mod render;
mod state;

use std::sync::{Arc, RwLock};
use std::time::Instant;

use log::debug;

use crate::config::{ActivationMode, MenuConfig};
use crate::error::MenuError;
use crate::geometry::Rect;
use crate::layout::{MenuLayout, PointerTarget};
use crate::option::{find_option, validate_tree, MenuOption};
use crate::registry::{CloseFn, InstanceId, MenuRegistry};
use crate::submenu::SubmenuState;

pub use events::EventResult;
pub use state::MenuState;

use state::{Effect, MenuInner};

type ChangeFn = Box<dyn FnMut(&str)>;
type ClearFn = Box<dyn FnMut()>;

/// A mounted trigger with its dropdown menu.
///
/// Creating a `Menu` registers it with the given [`MenuRegistry`]; dropping
/// it unregisters it and discards every pending hover intent. Opening a menu
/// closes whichever other menu on the same registry was open.
///
/// # Example
///
/// ```ignore
/// let registry = MenuRegistry::new();
/// let mut menu = Menu::new(&registry, options, MenuConfig::new().hover())?
///     .on_change(|id| log::info!("picked {id}"));
/// menu.set_trigger_rect(Rect::new(2, 1, 12, 1));
///
/// loop {
///     menu.render(&mut surface, &mut rows);
///     for event in poll_events(menu.next_deadline()) {
///         menu.handle_event(&event, Instant::now());
///     }
///     menu.tick(Instant::now());
/// }
/// ```
pub struct Menu {
    id: InstanceId,
    config: MenuConfig,
    registry: MenuRegistry,
    inner: Arc<RwLock<MenuInner>>,
    value: Option<String>,
    trigger: Rect,
    layout: MenuLayout,
    on_change: Option<ChangeFn>,
    on_clear: Option<ClearFn>,
}

impl Menu {
    /// Mount a menu over `options` and register it with `registry`.
    pub fn new(
        registry: &MenuRegistry,
        options: Vec<MenuOption>,
        config: MenuConfig,
    ) -> Result<Self, MenuError> {
        validate_tree(&options)?;

        let id = InstanceId::new();
        let inner = Arc::new(RwLock::new(MenuInner::new(options)));

        let weak = Arc::downgrade(&inner);
        let close: CloseFn = Arc::new(move || {
            if let Some(inner) = weak.upgrade()
                && let Ok(mut guard) = inner.write()
                && guard.force_close()
            {
                debug!("menu {}: closed by sibling", id);
            }
        });
        registry.register(id, close);

        Ok(Self {
            id,
            config,
            registry: registry.clone(),
            inner,
            value: None,
            trigger: Rect::default(),
            layout: MenuLayout::default(),
            on_change: None,
            on_clear: None,
        })
    }

    /// Invoke `f` with the option id whenever a leaf option is selected.
    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Invoke `f` when the clear affordance is activated.
    ///
    /// Without this handler clearing reports `""` through `on_change`.
    pub fn on_clear(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_clear = Some(Box::new(f));
        self
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn mode(&self) -> ActivationMode {
        self.config.mode
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Id of the currently selected option.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Set the current value. `None` or `""` clears it without notifying.
    pub fn set_value(&mut self, value: Option<&str>) -> Result<(), MenuError> {
        match value {
            None | Some("") => self.value = None,
            Some(id) => {
                let known = self
                    .read(|inner| find_option(&inner.options, id).is_some())
                    .unwrap_or(false);
                if !known {
                    return Err(MenuError::UnknownOption(id.to_string()));
                }
                self.value = Some(id.to_string());
            }
        }
        self.mark_dirty();
        Ok(())
    }

    /// Replace the option tree. Closes the menu if it was open.
    pub fn set_options(&mut self, options: Vec<MenuOption>) -> Result<(), MenuError> {
        validate_tree(&options)?;
        self.close();
        if self
            .value
            .as_deref()
            .is_some_and(|value| find_option(&options, value).is_none())
        {
            self.value = None;
        }
        if let Ok(mut inner) = self.inner.write() {
            inner.options = options;
            inner.dirty = true;
        }
        Ok(())
    }

    /// Clear the value through the clear affordance.
    ///
    /// Only acts when the menu is clearable and a value is set. Never touches
    /// the open/closed state. Returns true if the value was cleared.
    pub fn clear(&mut self) -> bool {
        if !self.config.clearable || self.value.is_none() {
            return false;
        }
        self.value = None;
        if let Some(on_clear) = self.on_clear.as_mut() {
            on_clear();
        } else if let Some(on_change) = self.on_change.as_mut() {
            on_change("");
        }
        debug!("menu {}: value cleared", self.id);
        self.mark_dirty();
        true
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    pub fn state(&self) -> MenuState {
        self.read(|inner| inner.state).unwrap_or_default()
    }

    pub fn is_open(&self) -> bool {
        self.state() == MenuState::Open
    }

    /// Open the menu, closing any other open menu on the registry first.
    ///
    /// A menu whose registration was dropped (e.g. by
    /// [`MenuRegistry::clear`]) stays closed.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        if !self.registry.request_open(self.id) {
            debug!("menu {}: not registered, staying closed", self.id);
            return;
        }
        if let Ok(mut inner) = self.inner.write()
            && inner.mark_open()
        {
            debug!("menu {}: opened", self.id);
        }
    }

    /// Close the menu and its whole submenu chain. No-op when closed.
    pub fn close(&mut self) {
        let closed = match self.inner.write() {
            Ok(mut inner) if inner.is_open() => inner.force_close(),
            _ => false,
        };
        if closed {
            self.registry.request_close(self.id);
            self.layout.layers.clear();
            debug!("menu {}: closed", self.id);
        }
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// The pointer moved onto `target`.
    pub fn pointer_moved(&mut self, target: PointerTarget, now: Instant) {
        let effect = self
            .write(|inner| inner.pointer_moved(target, &self.config, now))
            .unwrap_or(Effect::None);
        self.apply(effect);
    }

    /// A click landed on `target`.
    pub fn click(&mut self, target: PointerTarget, now: Instant) -> EventResult {
        if target == PointerTarget::Clear {
            // The clear affordance never reaches the trigger
            self.clear();
            return EventResult::Consumed;
        }

        let mode = self.config.mode;
        let effect = self
            .write(|inner| inner.click(target, mode))
            .unwrap_or(Effect::None);
        self.apply(effect);
        self.tick(now);

        if target.is_inside() {
            EventResult::Consumed
        } else {
            // Outside clicks close this menu but stay available to siblings
            EventResult::Ignored
        }
    }

    /// Escape was pressed.
    pub fn escape(&mut self) -> EventResult {
        let effect = self.read(MenuInner::escape).unwrap_or(Effect::None);
        if effect == Effect::None {
            return EventResult::Ignored;
        }
        self.apply(effect);
        EventResult::Consumed
    }

    /// Fire every hover intent whose delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        let effect = self.write(|inner| inner.poll(now)).unwrap_or(Effect::None);
        self.apply(effect);
    }

    /// When the next hover intent is due, if any is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.read(MenuInner::next_deadline).unwrap_or(None)
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Open => self.open(),
            Effect::Close => self.close(),
            Effect::Select(id) => self.select(&id),
        }
    }

    fn select(&mut self, id: &str) {
        debug!("menu {}: selected '{}'", self.id, id);
        self.value = Some(id.to_string());
        self.mark_dirty();
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(id);
        }
        self.close();
    }

    // -------------------------------------------------------------------------
    // Submenus
    // -------------------------------------------------------------------------

    /// Number of submenus currently shown.
    pub fn submenu_depth(&self) -> usize {
        self.read(|inner| inner.spawner.depth()).unwrap_or(0)
    }

    /// Snapshot of the submenu drawn as layer `level` (1 for the first submenu).
    pub fn submenu(&self, level: usize) -> Option<SubmenuState> {
        let index = level.checked_sub(1)?;
        self.read(|inner| inner.spawner.child_of(index).cloned())
            .unwrap_or(None)
    }

    /// Snapshot of every shown submenu, outermost first.
    pub fn submenus(&self) -> Vec<SubmenuState> {
        self.read(|inner| inner.spawner.chain().to_vec())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Tell the menu where its trigger is drawn.
    pub fn set_trigger_rect(&mut self, rect: Rect) {
        self.trigger = rect;
        self.layout.trigger = rect;
        self.layout.clear = self.clear_rect();
    }

    pub fn trigger_rect(&self) -> Rect {
        self.trigger
    }

    /// Layout from the last render.
    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// The clear affordance: last cell of the trigger, while a value is set.
    fn clear_rect(&self) -> Option<Rect> {
        if !self.config.clearable || self.value.is_none() || self.trigger.is_empty() {
            return None;
        }
        Some(Rect::new(
            self.trigger.right() - 1,
            self.trigger.y,
            1,
            self.trigger.height,
        ))
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if anything visible changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.read(|inner| inner.dirty).unwrap_or(false)
    }

    pub fn clear_dirty(&self) {
        let _ = self.write(|inner| inner.dirty = false);
    }

    fn mark_dirty(&mut self) {
        self.layout.clear = self.clear_rect();
        let _ = self.write(|inner| inner.dirty = true);
    }

    fn read<T>(&self, f: impl FnOnce(&MenuInner) -> T) -> Option<T> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut MenuInner) -> T) -> Option<T> {
        self.inner.write().ok().map(|mut guard| f(&mut guard))
    }
}

impl Drop for Menu {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
        let _ = self.write(|inner| inner.force_close());
        debug!("menu {}: unmounted", self.id);
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("mode", &self.config.mode)
            .field("state", &self.state())
            .field("value", &self.value)
            .field("submenus", &self.submenu_depth())
            .finish()
    }
}
