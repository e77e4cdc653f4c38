/// Screen-space rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Top-left corner of a floating menu layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {
    pub top: u16,
    pub left: u16,
}

impl Origin {
    pub const fn new(top: u16, left: u16) -> Self {
        Self { top, left }
    }
}

/// Vertical offset applied to a submenu's top edge, in cells.
///
/// Submenu layers draw a one-cell border, so shifting the layer up by one
/// puts its first row on the same line as the option that spawned it.
pub const SUBMENU_TOP_OFFSET: i16 = -1;

/// Derive a submenu's origin from the rectangle of its parent option row.
///
/// The submenu's top edge sits on the anchor's top (shifted by
/// [`SUBMENU_TOP_OFFSET`]) and its left edge touches the anchor's right edge.
/// There is no flip to the left side: a submenu may overflow the right edge
/// of the screen.
pub fn submenu_origin(anchor: Rect) -> Origin {
    Origin {
        top: anchor.y.saturating_add_signed(SUBMENU_TOP_OFFSET),
        left: anchor.right(),
    }
}

/// Origin of the top-level menu layer: directly below its trigger.
pub fn menu_origin(trigger: Rect) -> Origin {
    Origin {
        top: trigger.bottom(),
        left: trigger.x,
    }
}
