//! Layer layout and mounting through the overlay surface.

use crate::geometry::menu_origin;
use crate::layout::{LayerLayout, MenuLayout};
use crate::option::MenuOption;
use crate::overlay::{LayerView, OverlaySurface, RowRenderer, RowStatus, RowView};

use super::Menu;

/// Where a render pass goes: a surface and a row renderer, either separate
/// or one value doing both.
trait Canvas {
    fn row_width(&self, option: &MenuOption) -> u16;
    fn mount_layer(&mut self, layer: &LayerView);
    fn render_row(&mut self, row: &RowView<'_>);
}

struct Split<'a> {
    surface: &'a mut dyn OverlaySurface,
    rows: &'a mut dyn RowRenderer,
}

impl Canvas for Split<'_> {
    fn row_width(&self, option: &MenuOption) -> u16 {
        self.rows.row_width(option)
    }

    fn mount_layer(&mut self, layer: &LayerView) {
        self.surface.mount_layer(layer);
    }

    fn render_row(&mut self, row: &RowView<'_>) {
        self.rows.render_row(row);
    }
}

struct Joined<'a, T>(&'a mut T);

impl<T: OverlaySurface + RowRenderer> Canvas for Joined<'_, T> {
    fn row_width(&self, option: &MenuOption) -> u16 {
        self.0.row_width(option)
    }

    fn mount_layer(&mut self, layer: &LayerView) {
        self.0.mount_layer(layer);
    }

    fn render_row(&mut self, row: &RowView<'_>) {
        self.0.render_row(row);
    }
}

impl Menu {
    /// Lay out and mount every visible layer.
    ///
    /// Nothing is mounted while the menu is closed. While open, the
    /// top-level layer is mounted first and each submenu after its parent,
    /// so deeper layers end up on top. The resulting layout is kept for hit
    /// testing by [`Menu::handle_event`].
    pub fn render(
        &mut self,
        surface: &mut dyn OverlaySurface,
        rows: &mut dyn RowRenderer,
    ) -> &MenuLayout {
        self.render_into(&mut Split { surface, rows })
    }

    /// Same as [`Menu::render`], for a target that mounts layers and draws
    /// rows itself, such as [`Terminal`](crate::terminal::Terminal).
    pub fn render_on<T>(&mut self, canvas: &mut T) -> &MenuLayout
    where
        T: OverlaySurface + RowRenderer,
    {
        self.render_into(&mut Joined(canvas))
    }

    fn render_into(&mut self, canvas: &mut dyn Canvas) -> &MenuLayout {
        let mut layout = MenuLayout::new(self.trigger, self.clear_rect());

        if let Ok(inner) = self.inner.read()
            && inner.is_open()
        {
            let min_width = self.trigger.width.saturating_sub(2);
            layout.layers.push(LayerLayout::compute(
                0,
                menu_origin(self.trigger),
                inner.options.iter().map(|option| canvas.row_width(option)),
                min_width,
            ));
            for (i, submenu) in inner.spawner.chain().iter().enumerate() {
                layout.layers.push(LayerLayout::compute(
                    i + 1,
                    submenu.origin,
                    submenu.options.iter().map(|option| canvas.row_width(option)),
                    0,
                ));
            }

            for layer in &layout.layers {
                canvas.mount_layer(&LayerView {
                    owner: self.id,
                    level: layer.level,
                    area: layer.area,
                });

                let options = inner
                    .spawner
                    .layer_options(&inner.options, layer.level)
                    .unwrap_or_default();
                for (index, (option, area)) in options.iter().zip(&layer.rows).enumerate() {
                    let status = RowStatus {
                        hovered: inner.hovered == Some((layer.level, index)),
                        selected: self.value.as_deref() == Some(option.id.as_str()),
                        expanded: inner.spawner.shows(layer.level, index),
                        has_children: option.has_children(),
                    };
                    canvas.render_row(&RowView {
                        level: layer.level,
                        index,
                        option,
                        area: *area,
                        status,
                    });
                }
            }
        }

        self.layout = layout;
        &self.layout
    }
}
