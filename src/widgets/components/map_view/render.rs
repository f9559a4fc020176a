use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::{Color, Style};

use super::MapView;

const COLUMN_GAP: usize = 2;

impl MapView {
    /// Toolbar row, then one row per entry with columns padded to a common
    /// width.
    pub fn draw(&self) -> Vec<SpanLine> {
        let focus = self.focus.as_deref();
        let mut lines = Vec::new();
        if !self.toolbar.is_empty() {
            lines.push(self.toolbar.draw(focus));
        }
        if let Some(err) = &self.grid_error {
            lines.push(vec![Span::styled(
                err.to_string(),
                Style::new().color(Color::Red),
            )]);
        }

        let rows: Vec<Vec<SpanLine>> = self
            .grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|node| node.draw(focus == Some(node.name())))
                    .collect()
            })
            .collect();
        if rows.is_empty() && self.grid_error.is_none() {
            lines.push(vec![Span::styled(
                "  (empty)",
                Style::new().color(Color::DarkGrey),
            )]);
        }

        let mut widths = vec![0; self.grid.columns()];
        for row in &rows {
            for (col, cell) in row.iter().enumerate() {
                widths[col] = widths[col].max(line_width(cell));
            }
        }
        for row in rows {
            let last = row.len().saturating_sub(1);
            let mut line = SpanLine::new();
            for (col, cell) in row.into_iter().enumerate() {
                let width = line_width(&cell);
                line.extend(cell);
                if col < last {
                    line.push(Span::new(" ".repeat(widths[col] - width + COLUMN_GAP)));
                }
            }
            lines.push(line);
        }
        lines
    }

    /// Tooltip of the focused button, if any.
    pub fn focused_tooltip(&self) -> Option<&str> {
        let name = self.focus.as_deref()?;
        let button = match self.toolbar.entry(name) {
            Some(entry) => &entry.button,
            None => {
                let node = self.grid.children().iter().find(|node| node.name() == name)?;
                node.as_action()?
            }
        };
        Some(button.tooltip()).filter(|tip| !tip.is_empty())
    }
}
