//! Menu configuration types.

use std::time::Duration;

/// Default delay before a hover-intent hide takes effect.
///
/// Long enough for the pointer to cross the gap between an option and the
/// submenu it spawned.
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(150);

/// How a menu reacts to the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivationMode {
    /// Menus and submenus open and close on clicks.
    #[default]
    Click,
    /// Menus and submenus follow the pointer through hover intent.
    Hover,
}

/// Per-instance menu configuration.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    /// Activation mode for the trigger and every submenu level.
    pub mode: ActivationMode,

    /// Delay before a hover-intent show takes effect. Zero opens immediately.
    pub show_delay: Duration,

    /// Delay before a hover-intent hide takes effect.
    pub hide_delay: Duration,

    /// Whether the trigger shows a clear affordance while a value is set.
    pub clearable: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            mode: ActivationMode::Click,
            show_delay: Duration::ZERO,
            hide_delay: DEFAULT_HIDE_DELAY,
            clearable: false,
        }
    }
}

impl MenuConfig {
    /// Create a click-mode config with default delays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the activation mode.
    pub fn mode(mut self, mode: ActivationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for hover activation.
    pub fn hover(self) -> Self {
        self.mode(ActivationMode::Hover)
    }

    /// Set the hover-intent show delay.
    pub fn show_delay(mut self, delay: Duration) -> Self {
        self.show_delay = delay;
        self
    }

    /// Set the hover-intent hide delay.
    pub fn hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = delay;
        self
    }

    /// Show the clear affordance while a value is set.
    pub fn clearable(mut self) -> Self {
        self.clearable = true;
        self
    }
}
