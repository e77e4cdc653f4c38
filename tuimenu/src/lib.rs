pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod intent;
pub mod layout;
pub mod menu;
pub mod option;
pub mod overlay;
pub mod registry;
pub mod submenu;
pub mod terminal;

pub use config::{ActivationMode, MenuConfig, DEFAULT_HIDE_DELAY};
pub use error::MenuError;
pub use event::{Event, Key, Modifiers, MouseButton};
pub use geometry::{menu_origin, submenu_origin, Origin, Rect, SUBMENU_TOP_OFFSET};
pub use intent::{HoverIntent, IntentKind};
pub use layout::{LayerLayout, MenuLayout, PointerTarget};
pub use menu::{EventResult, Menu, MenuState};
pub use option::{find_option, validate_tree, MenuOption};
pub use overlay::{LayerView, OverlaySurface, RowRenderer, RowStatus, RowView};
pub use registry::{CloseFn, InstanceId, MenuRegistry};
pub use submenu::{SubmenuIntent, SubmenuSpawner, SubmenuState};
pub use terminal::Terminal;
