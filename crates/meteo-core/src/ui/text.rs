//! Text, line and pixel primitives shared by the pages.
//!
//! All text uses the 6×9 mono font, drawn on an opaque background so a
//! fixed-width field fully overwrites whatever it showed before.

use core::fmt::{self, Write};

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X9;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text, TextStyleBuilder};
use heapless::String;

/// Horizontal advance of one character.
pub const CHAR_WIDTH_PX: i32 = 6;

/// Vertical extent of one text line.
pub const CHAR_HEIGHT_PX: i32 = 9;

/// Longest single field any page draws.
pub type FieldText = String<16>;

pub fn draw_text<D>(display: &mut D, x: i32, y: i32, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut character_style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);
    character_style.background_color = Some(BinaryColor::Off);
    let text_style = TextStyleBuilder::new().baseline(Baseline::Top).build();

    Text::with_text_style(text, Point::new(x, y), character_style, text_style).draw(display)?;
    Ok(())
}

pub fn draw_line<D>(
    display: &mut D,
    start: Point,
    end: Point,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Line::new(start, end)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
}

pub fn draw_pixel<D>(display: &mut D, x: i32, y: i32, color: BinaryColor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Pixel(Point::new(x, y), color).draw(display)
}

/// Format into a fixed-capacity field.
///
/// Output that does not fit is cut off; every field on the 96 px wide
/// display is far shorter than the buffer.
pub fn format_field(args: fmt::Arguments<'_>) -> FieldText {
    let mut text = FieldText::new();
    text.write_fmt(args).ok();
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    #[test]
    fn test_format_field() {
        assert_eq!(format_field(format_args!("{:>4}", 1038)).as_str(), "1038");
        assert_eq!(format_field(format_args!("{:>4}", 998)).as_str(), " 998");
        assert_eq!(format_field(format_args!("{:02}", 7)).as_str(), "07");
    }

    #[test]
    fn test_text_background_erases_previous_glyphs() {
        let mut frame = FrameBuffer::new();

        draw_text(&mut frame, 0, 0, "8").unwrap();
        assert!(frame.lit_pixels() > 0);

        draw_text(&mut frame, 0, 0, " ").unwrap();
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_line_and_pixel() {
        let mut frame = FrameBuffer::new();

        draw_line(&mut frame, Point::new(2, 5), Point::new(6, 5), BinaryColor::On).unwrap();
        draw_pixel(&mut frame, 10, 10, BinaryColor::On).unwrap();

        assert_eq!(frame.lit_pixels(), 6);
        assert_eq!(frame.pixel(2, 5), BinaryColor::On);
        assert_eq!(frame.pixel(6, 5), BinaryColor::On);
        assert_eq!(frame.pixel(7, 5), BinaryColor::Off);
    }
}
