//! Date/time editor page.
//!
//! Shows the RTC date as `DD.MM.YYYY` and the time as `HH:MM:SS`, with a
//! two-pixel underline below the field the cursor selects.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::clock::DateTime;
use crate::navigation::{Column, CursorState, EditorRow};
use crate::pages::page::Page;
use crate::ui::text::{CHAR_HEIGHT_PX, CHAR_WIDTH_PX, draw_line, draw_text, format_field};
use crate::ui::{DISPLAY_WIDTH_PX, PageEvent, PageId};

const TEXT_X: i32 = 8;
const DATE_Y: i32 = 2;
const TIME_Y: i32 = 18;

/// Gap between the bottom of a text line and its underline.
const UNDERLINE_GAP_PX: i32 = 1;

/// Each field is two characters plus a one-character separator.
const FIELD_STRIDE_PX: i32 = 3 * CHAR_WIDTH_PX;

fn row_y(row: EditorRow) -> i32 {
    match row {
        EditorRow::Date => DATE_Y,
        EditorRow::Time => TIME_Y,
    }
}

fn underline_y(row: EditorRow) -> i32 {
    row_y(row) + CHAR_HEIGHT_PX + UNDERLINE_GAP_PX
}

/// Horizontal span `(first, last)` of the underline for the selected field.
fn underline_span(cursor: CursorState) -> (i32, i32) {
    let digits = match (cursor.row, cursor.column) {
        (EditorRow::Date, Column::Right) => 4,
        _ => 2,
    };
    let start = TEXT_X + cursor.column.index() as i32 * FIELD_STRIDE_PX;
    (start, start + digits * CHAR_WIDTH_PX - 1)
}

pub struct ClockEditorPage {
    datetime: Option<DateTime>,
    cursor: CursorState,
    erase_underline: bool,
    dirty: bool,
}

impl Default for ClockEditorPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockEditorPage {
    pub fn new() -> Self {
        Self {
            datetime: None,
            cursor: CursorState::default(),
            erase_underline: false,
            dirty: true,
        }
    }

    /// Blank both underline bands across the full display width.
    fn erase_underlines<D: DrawTarget<Color = BinaryColor>>(
        display: &mut D,
    ) -> Result<(), D::Error> {
        let right = DISPLAY_WIDTH_PX as i32 - 1;
        for row in [EditorRow::Date, EditorRow::Time] {
            let y = underline_y(row);
            for dy in 0..2 {
                draw_line(
                    display,
                    Point::new(0, y + dy),
                    Point::new(right, y + dy),
                    BinaryColor::Off,
                )?;
            }
        }
        Ok(())
    }

    fn draw_underline<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let (first, last) = underline_span(self.cursor);
        let y = underline_y(self.cursor.row);
        for dy in 0..2 {
            draw_line(
                display,
                Point::new(first, y + dy),
                Point::new(last, y + dy),
                BinaryColor::On,
            )?;
        }
        Ok(())
    }
}

impl Page for ClockEditorPage {
    fn id(&self) -> PageId {
        PageId::ClockEditor
    }

    fn title(&self) -> &str {
        "Clock"
    }

    fn on_activate(&mut self) {
        self.dirty = true;
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match *event {
            PageEvent::ClockUpdate(datetime) if self.datetime != Some(datetime) => {
                self.datetime = Some(datetime);
                self.dirty = true;
                true
            }
            PageEvent::CursorMoved { to, .. } => {
                self.cursor = to;
                self.erase_underline = true;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    fn draw_page<D: DrawTarget<Color = BinaryColor>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let (date, time) = match self.datetime {
            Some(dt) => (
                format_field(format_args!(
                    "{:02}.{:02}.{:04}",
                    dt.day, dt.month, dt.year
                )),
                format_field(format_args!(
                    "{:02}:{:02}:{:02}",
                    dt.hour, dt.minute, dt.second
                )),
            ),
            None => (
                format_field(format_args!("--.--.----")),
                format_field(format_args!("--:--:--")),
            ),
        };

        draw_text(display, TEXT_X, DATE_Y, &date)?;
        draw_text(display, TEXT_X, TIME_Y, &time)?;

        if self.erase_underline {
            Self::erase_underlines(display)?;
            self.erase_underline = false;
        }
        self.draw_underline(display)
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
