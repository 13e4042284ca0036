//! Draws a property sheet into a ratatui buffer

use super::theme::Theme;
use super::toolkit::{TuiHandle, TuiText, TuiToolkit};
use crate::sheet::{Editor, MIN_COLUMN_WIDTH, PropertySheet};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Widget;
use std::rc::Rc;

const DROPDOWN_MARKER: &str = " ▾";
const ERROR_MARKER: &str = "✗ ";

/// Renders the grid of a [`PropertySheet`] followed by its validation messages
#[derive(Clone, Copy)]
pub struct SheetView<'a> {
    sheet: &'a PropertySheet,
    theme: &'a Theme,
    toolkit: Option<&'a TuiToolkit>,
}

impl<'a> SheetView<'a> {
    pub fn new(sheet: &'a PropertySheet, theme: &'a Theme) -> Self {
        Self { sheet, theme, toolkit: None }
    }

    /// Show cursors and open dropdowns of widgets created by `toolkit`
    pub fn toolkit(mut self, toolkit: &'a TuiToolkit) -> Self {
        self.toolkit = Some(toolkit);
        self
    }

    /// Width of the label column; zero when no row is labeled
    pub fn label_width(&self) -> u16 {
        let pane = self.sheet.pane();
        (0..pane.row_count())
            .filter_map(|row| pane.label_at(row))
            .map(|label| Line::from(label.text.as_str()).width() as u16)
            .max()
            .unwrap_or(0)
    }

    /// Rows needed to draw everything, padding included
    pub fn required_height(&self) -> u16 {
        let pane = self.sheet.pane();
        let padding = pane.padding();
        let rows = pane.row_count() as u16;
        let grid = rows + rows.saturating_sub(1) * pane.vgap();
        let errors = self.sheet.validation_errors().len() as u16;
        let messages = if errors > 0 { errors + 1 } else { 0 };
        padding.top + grid + messages + padding.bottom
    }

    fn editor_x(&self, inner: Rect) -> u16 {
        let label_width = self.label_width();
        if label_width == 0 {
            inner.x
        } else {
            inner.x + label_width + self.sheet.pane().hgap()
        }
    }

    fn editor_style(&self, editor: &Editor) -> Style {
        let pane = self.sheet.pane();
        if pane.is_editor_disabled(editor) {
            return self.theme.disabled_style();
        }
        let mut style = self.theme.editor_style();
        if editor.has_focus() {
            style = style.patch(self.theme.focused_style());
        }
        if !editor.is_valid() {
            style = style.patch(self.theme.error_style());
        }
        style
    }

    fn editor_text(editor: &Editor) -> String {
        match editor {
            Editor::Choice(_) => format!("{}{}", editor.display_value(), DROPDOWN_MARKER),
            _ => editor.display_value(),
        }
    }

    fn text_handle(&self, editor: &Editor) -> Option<Rc<TuiText>> {
        let Editor::Text(widget) = editor else {
            return None;
        };
        match self.toolkit?.handle(widget.id())? {
            TuiHandle::Text(text) => Some(text),
            _ => None,
        }
    }

    /// First visible character of a text editor drawn `width` cells wide
    fn scroll_offset(&self, editor: &Editor, width: u16) -> usize {
        self.text_handle(editor)
            .map_or(0, |text| text.scroll_to_fit(width as usize))
    }

    fn render_cursor(&self, editor: &Editor, x: u16, y: u16, width: u16, scroll: usize, buf: &mut Buffer) {
        if !editor.has_focus() {
            return;
        }
        let Some(text) = self.text_handle(editor) else {
            return;
        };
        let offset = text.cursor_pos().saturating_sub(scroll) as u16;
        if offset < width {
            if let Some(cell) = buf.cell_mut((x + offset, y)) {
                cell.set_style(self.theme.cursor_style());
            }
        }
    }

    fn render_dropdown(&self, editor: &Editor, x: u16, y: u16, area: Rect, buf: &mut Buffer) {
        let Editor::Choice(widget) = editor else {
            return;
        };
        let Some(TuiHandle::Choice(choice)) = self.toolkit.and_then(|t| t.handle(widget.id())) else {
            return;
        };
        if !choice.is_open() {
            return;
        }

        let items = widget.items();
        let width = items
            .iter()
            .map(|item| Line::from(item.as_str()).width() as u16 + 2)
            .max()
            .unwrap_or(0)
            .min(area.right().saturating_sub(x));
        for (i, item) in items.iter().enumerate() {
            let row_y = y + 1 + i as u16;
            if row_y >= area.bottom() {
                break;
            }
            let style = if i == choice.highlighted() {
                self.theme.highlight_style()
            } else {
                self.theme.dropdown_style()
            };
            buf.set_style(Rect::new(x, row_y, width, 1), style);
            buf.set_stringn(x + 1, row_y, item, width.saturating_sub(1) as usize, style);
        }
    }
}

impl Widget for SheetView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pane = self.sheet.pane();
        let padding = pane.padding();
        let inner = Rect::new(
            area.x + padding.left,
            area.y + padding.top,
            area.width.saturating_sub(padding.left + padding.right),
            area.height.saturating_sub(padding.top + padding.bottom),
        );
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let editor_x = self.editor_x(inner);
        let editor_width = inner.right().saturating_sub(editor_x).max(MIN_COLUMN_WIDTH);
        let mut y = inner.y;
        let mut open_dropdown = None;

        for row in 0..pane.row_count() {
            if y >= inner.bottom() {
                break;
            }

            let editor = pane.editor_at(row);
            if let Some(label) = pane.label_at(row) {
                let mut style = self.theme.label_style();
                if editor.is_some_and(|e| e.has_focus()) {
                    style = style.patch(self.theme.focused_style());
                }
                buf.set_stringn(inner.x, y, &label.text, self.label_width() as usize, style);
            }

            if let Some(editor) = editor {
                let width = editor_width.min(area.right().saturating_sub(editor_x));
                let style = self.editor_style(editor);
                let scroll = self.scroll_offset(editor, width);
                let text: String = Self::editor_text(editor).chars().skip(scroll).collect();
                buf.set_stringn(editor_x, y, text, width as usize, style);
                self.render_cursor(editor, editor_x, y, width, scroll, buf);
                if editor.has_focus() {
                    open_dropdown = Some((editor.clone(), y));
                }
            }

            y += 1 + pane.vgap();
        }

        let errors = self.sheet.validation_errors().snapshot();
        if !errors.is_empty() {
            y += 1;
            for (id, message) in &errors {
                if y >= inner.bottom() {
                    break;
                }
                let name = self
                    .sheet
                    .rows()
                    .iter()
                    .find(|r| r.option.id() == id)
                    .and_then(|r| r.label.clone())
                    .unwrap_or_else(|| id.to_string());
                let text = format!("{}{}: {}", ERROR_MARKER, name, message);
                buf.set_stringn(inner.x, y, text, inner.width as usize, self.theme.message_style());
                y += 1;
            }
        }

        // Drawn last so it overlaps the rows below
        if let Some((editor, row_y)) = open_dropdown {
            self.render_dropdown(&editor, editor_x, row_y, inner, buf);
        }
    }
}

/// Render `sheet` at `width` columns as plain text lines, trailing blanks trimmed
pub fn render_to_string(sheet: &PropertySheet, theme: &Theme, width: u16) -> String {
    let view = SheetView::new(sheet, theme);
    let area = Rect::new(0, 0, width, view.required_height());
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf);
    buffer_lines(&buf).join("\n")
}

/// Text content of each buffer row, trailing blanks trimmed
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}
