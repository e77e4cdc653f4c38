//! Crossterm-backed overlay surface and row renderer.
//!
//! Draws menu layers straight to the terminal. Errors raised while drawing
//! are held until the next [`Terminal::flush`], since the rendering traits
//! cannot return them.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};
use unicode_width::UnicodeWidthStr;

use crate::geometry::Rect;
use crate::option::MenuOption;
use crate::overlay::{LayerView, OverlaySurface, RowRenderer, RowView};

const SUBMENU_MARKER: &str = "▸";
const SELECTED_MARKER: &str = "✓";

pub struct Terminal {
    stdout: io::Stdout,
    error: Option<io::Error>,
}

impl Terminal {
    /// Enter raw mode and the alternate screen with mouse capture.
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self {
            stdout,
            error: None,
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for input, then drain everything pending.
    /// `None` blocks until an event arrives.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Clear the whole screen.
    pub fn clear(&mut self) {
        let result = queue!(self.stdout, terminal::Clear(terminal::ClearType::All));
        self.record(result);
    }

    /// Draw `text` at `(x, y)`, optionally in reverse video.
    pub fn text(&mut self, x: u16, y: u16, text: &str, reversed: bool) {
        let result = if reversed {
            queue!(
                self.stdout,
                cursor::MoveTo(x, y),
                SetAttribute(Attribute::Reverse),
                Print(text),
                SetAttribute(Attribute::Reset)
            )
        } else {
            queue!(self.stdout, cursor::MoveTo(x, y), Print(text))
        };
        self.record(result);
    }

    /// Write queued output, reporting the first error raised since the last flush.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.stdout.flush()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result
            && self.error.is_none()
        {
            log::warn!("terminal: draw failed: {}", err);
            self.error = Some(err);
        }
    }

    fn draw_box(&mut self, area: Rect) {
        for (x, y, line) in box_lines(area) {
            self.text(x, y, &line, false);
        }
    }
}

/// Lines of a bordered box filling `area`, as `(x, y, text)`.
fn box_lines(area: Rect) -> Vec<(u16, u16, String)> {
    if area.width < 2 || area.height < 2 {
        return Vec::new();
    }
    let inner = usize::from(area.width - 2);
    let horizontal = "─".repeat(inner);
    let blank = " ".repeat(inner);
    let last = area.bottom().saturating_sub(1);

    let mut lines = vec![(area.x, area.y, format!("┌{}┐", horizontal))];
    for y in area.y.saturating_add(1)..last {
        lines.push((area.x, y, format!("│{}│", blank)));
    }
    if last > area.y {
        lines.push((area.x, last, format!("└{}┘", horizontal)));
    }
    lines
}

impl OverlaySurface for Terminal {
    fn mount_layer(&mut self, layer: &LayerView) {
        self.draw_box(layer.area);
    }
}

impl RowRenderer for Terminal {
    fn row_width(&self, option: &MenuOption) -> u16 {
        // Leading selection marker, trailing submenu marker, one space each side
        let width = row_text(option).width() + 4;
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    fn render_row(&mut self, row: &RowView<'_>) {
        let lead = if row.status.selected {
            SELECTED_MARKER
        } else {
            " "
        };
        let tail = if row.status.has_children {
            SUBMENU_MARKER
        } else {
            " "
        };

        let body = row_text(row.option);
        let fill = usize::from(row.area.width).saturating_sub(body.width() + 4);
        let line = format!("{} {}{} {}", lead, body, " ".repeat(fill), tail);

        let highlighted = row.status.hovered || row.status.expanded;
        self.text(row.area.x, row.area.y, &line, highlighted);
    }
}

fn row_text(option: &MenuOption) -> String {
    let mut text = String::new();
    if let Some(icon) = &option.icon {
        text.push_str(icon);
        text.push(' ');
    }
    text.push_str(&option.label);
    if let Some(description) = &option.description {
        text.push_str("  ");
        text.push_str(description);
    }
    text
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
