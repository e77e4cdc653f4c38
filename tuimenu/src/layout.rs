//! Screen layout of an open menu and pointer hit testing.

use crate::geometry::{Origin, Rect};

/// What the pointer is over, from one menu's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The always-visible trigger control.
    Trigger,
    /// The clear affordance inside the trigger.
    Clear,
    /// A layer's border or padding, not one of its rows.
    Layer { level: usize },
    /// An option row. `anchor` is the row's rectangle.
    Row {
        level: usize,
        index: usize,
        anchor: Rect,
    },
    /// Anything that does not belong to this menu.
    Outside,
}

impl PointerTarget {
    /// Whether the target is part of this menu (trigger or any layer).
    pub fn is_inside(&self) -> bool {
        !matches!(self, PointerTarget::Outside)
    }
}

/// Geometry of one mounted layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerLayout {
    pub level: usize,
    pub area: Rect,
    pub rows: Vec<Rect>,
}

impl LayerLayout {
    /// Lay out a bordered layer at `origin` with one single-line row per width.
    ///
    /// The layer is as wide as its widest row, but never narrower than
    /// `min_inner_width`.
    pub fn compute(
        level: usize,
        origin: Origin,
        widths: impl IntoIterator<Item = u16>,
        min_inner_width: u16,
    ) -> Self {
        let widths: Vec<u16> = widths.into_iter().collect();
        let inner_width = widths
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .max(min_inner_width);
        let row_count = u16::try_from(widths.len()).unwrap_or(u16::MAX);

        let area = Rect::new(
            origin.left,
            origin.top,
            inner_width.saturating_add(2),
            row_count.saturating_add(2),
        );
        let rows = (0..row_count)
            .map(|i| {
                Rect::new(
                    area.x.saturating_add(1),
                    area.y.saturating_add(1).saturating_add(i),
                    inner_width,
                    1,
                )
            })
            .collect();

        Self { level, area, rows }
    }
}

/// Layout of a menu as of its last render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuLayout {
    pub trigger: Rect,
    pub clear: Option<Rect>,
    /// Mounted layers, top-level first. Empty while closed.
    pub layers: Vec<LayerLayout>,
}

impl MenuLayout {
    pub fn new(trigger: Rect, clear: Option<Rect>) -> Self {
        Self {
            trigger,
            clear,
            layers: Vec::new(),
        }
    }

    pub fn layer(&self, level: usize) -> Option<&LayerLayout> {
        self.layers.iter().find(|layer| layer.level == level)
    }

    /// Rectangle of option `index` on layer `level`.
    pub fn row(&self, level: usize, index: usize) -> Option<Rect> {
        self.layer(level).and_then(|layer| layer.rows.get(index).copied())
    }

    /// Resolve a point to the part of the menu under it.
    pub fn hit(&self, x: u16, y: u16) -> PointerTarget {
        // Deeper layers are drawn last, so they are on top
        for layer in self.layers.iter().rev() {
            if !layer.area.contains(x, y) {
                continue;
            }
            if let Some(index) = layer.rows.iter().position(|row| row.contains(x, y)) {
                return PointerTarget::Row {
                    level: layer.level,
                    index,
                    anchor: layer.rows[index],
                };
            }
            return PointerTarget::Layer { level: layer.level };
        }

        if self.clear.is_some_and(|clear| clear.contains(x, y)) {
            return PointerTarget::Clear;
        }
        if self.trigger.contains(x, y) {
            return PointerTarget::Trigger;
        }
        PointerTarget::Outside
    }
}
