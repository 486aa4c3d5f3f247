//! Drawing helpers over any embedded-graphics target.
//!
//! Widgets describe what they paint in terms of a transform origin, a
//! [`Bounds`] relative to that origin, and palette indices. These helpers turn
//! that into embedded-graphics primitives.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment};
use embedded_graphics::text::{Baseline, Text};

use crate::geometry::{Bounds, Vec2};
use crate::ui::styling::colors::{ColorIndex, TRANSPARENT, indexed};

/// Fill `bounds` placed at `origin`. Transparent fills draw nothing.
pub fn fill_bounds<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    origin: Vec2,
    bounds: Bounds,
    color: ColorIndex,
) -> Result<(), D::Error> {
    if color == TRANSPARENT || bounds.is_empty() {
        return Ok(());
    }
    bounds
        .to_rectangle(origin)
        .into_styled(PrimitiveStyle::with_fill(indexed(color)))
        .draw(display)
}

/// Outline `bounds` placed at `origin`, drawing the stroke inside the edges.
pub fn outline_bounds<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    origin: Vec2,
    bounds: Bounds,
    thickness: u32,
    color: ColorIndex,
) -> Result<(), D::Error> {
    if color == TRANSPARENT || thickness == 0 || bounds.is_empty() {
        return Ok(());
    }
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(indexed(color))
        .stroke_width(thickness)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    bounds.to_rectangle(origin).into_styled(style).draw(display)
}

/// Print `text` with its top-left corner at `position`.
pub fn print<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
    position: Vec2,
    color: ColorIndex,
    font: &MonoFont<'_>,
) -> Result<(), D::Error> {
    let style = MonoTextStyle::new(font, indexed(color));
    Text::with_baseline(text, position, style, Baseline::Top).draw(display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::colors::{RED, WHITE};
    use embedded_graphics::mock_display::MockDisplay;

    #[test]
    fn test_fill_bounds_covers_translated_rect() {
        let mut display = MockDisplay::<Rgb565>::new();
        fill_bounds(&mut display, Point::new(10, 10), Bounds::new(-2, -2, 4, 4), WHITE).unwrap();

        assert_eq!(display.get_pixel(Point::new(8, 8)), Some(indexed(WHITE)));
        assert_eq!(display.get_pixel(Point::new(11, 11)), Some(indexed(WHITE)));
        assert_eq!(display.get_pixel(Point::new(12, 12)), None);
    }

    #[test]
    fn test_transparent_fill_draws_nothing() {
        let mut display = MockDisplay::<Rgb565>::new();
        fill_bounds(&mut display, Point::zero(), Bounds::new(0, 0, 4, 4), TRANSPARENT).unwrap();
        assert_eq!(display, MockDisplay::new());
    }

    #[test]
    fn test_outline_stays_inside_bounds() {
        let mut display = MockDisplay::<Rgb565>::new();
        outline_bounds(&mut display, Point::zero(), Bounds::new(0, 0, 5, 5), 1, RED).unwrap();

        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(indexed(RED)));
        assert_eq!(display.get_pixel(Point::new(4, 4)), Some(indexed(RED)));
        assert_eq!(display.get_pixel(Point::new(2, 2)), None);
        assert_eq!(display.get_pixel(Point::new(5, 5)), None);
    }
}
