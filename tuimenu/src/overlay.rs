//! Rendering boundary.
//!
//! The menu core never draws anything itself. It hands each visible layer to
//! an [`OverlaySurface`] and each option row to a [`RowRenderer`]; both are
//! supplied by the surrounding UI.

use crate::geometry::Rect;
use crate::option::MenuOption;
use crate::registry::InstanceId;

/// Display flags for one option row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStatus {
    /// The pointer is over this row.
    pub hovered: bool,
    /// This row is the menu's current value.
    pub selected: bool,
    /// This row's submenu is currently shown.
    pub expanded: bool,
    /// This row carries a submenu.
    pub has_children: bool,
}

/// A floating layer to mount above normal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerView {
    /// Menu instance owning the layer.
    pub owner: InstanceId,
    /// 0 for the top-level menu, then one per submenu.
    pub level: usize,
    /// Outer area of the layer, border included.
    pub area: Rect,
}

/// One option row to draw inside a mounted layer.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub level: usize,
    pub index: usize,
    pub option: &'a MenuOption,
    pub area: Rect,
    pub status: RowStatus,
}

/// Renders floating layers outside the normal layout flow.
pub trait OverlaySurface {
    fn mount_layer(&mut self, layer: &LayerView);
}

/// Measures and draws option rows.
pub trait RowRenderer {
    /// Width in cells the row needs for `option`.
    fn row_width(&self, option: &MenuOption) -> u16;

    fn render_row(&mut self, row: &RowView<'_>);
}
