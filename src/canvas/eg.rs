/*
 *  canvas/eg.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Canvas over any embedded-graphics draw target
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::{
    mono_font::{
        ascii::{
            FONT_10X20, FONT_4X6, FONT_5X8, FONT_6X10, FONT_6X13, FONT_7X13, FONT_8X13,
            FONT_9X15, FONT_9X18,
        },
        MonoFont, MonoTextStyle,
    },
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{
        Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
        StrokeAlignment,
    },
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use super::{Canvas, Cap, FontMetrics, Paint, PaintStyle, PointF, RectF, TextAlign, TransformStack};

/// Built-in fonts, smallest first.
const MONO_FONTS: [&MonoFont<'static>; 9] = [
    &FONT_4X6,
    &FONT_5X8,
    &FONT_6X10,
    &FONT_6X13,
    &FONT_7X13,
    &FONT_8X13,
    &FONT_9X15,
    &FONT_9X18,
    &FONT_10X20,
];

/// Largest built-in font whose cell fits in `text_size` pixels.
pub fn mono_font_for(text_size: f32) -> &'static MonoFont<'static> {
    MONO_FONTS
        .iter()
        .rev()
        .find(|f| f.character_size.height as f32 <= text_size)
        .copied()
        .unwrap_or(MONO_FONTS[0])
}

pub fn mono_font_metrics(font: &MonoFont<'_>) -> FontMetrics {
    let h = font.character_size.height as f32;
    let baseline = font.baseline as f32;
    FontMetrics {
        ascent: -baseline,
        descent: h - 1.0 - baseline,
    }
}

/// [`Canvas`] drawing through embedded-graphics primitives.
///
/// Lines, circles and text anchors follow the full transform. Rectangles are
/// drawn axis aligned; under a rotation they cover the rotated corners'
/// bounding box.
pub struct EgCanvas<'a, D> {
    target: &'a mut D,
    transform: TransformStack,
}

impl<'a, D, C> EgCanvas<'a, D>
where
    D: DrawTarget<Color = C>,
    C: PixelColor + From<Rgb888>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self { target, transform: TransformStack::default() }
    }

    fn shape_style(paint: &Paint) -> PrimitiveStyle<C> {
        match paint.style {
            PaintStyle::Fill => PrimitiveStyle::with_fill(C::from(paint.color)),
            PaintStyle::Stroke => PrimitiveStyleBuilder::new()
                .stroke_color(C::from(paint.color))
                .stroke_width(stroke_px(paint.stroke_width))
                .stroke_alignment(StrokeAlignment::Center)
                .build(),
        }
    }
}

fn stroke_px(width: f32) -> u32 {
    width.round().max(1.0) as u32
}

impl<'a, D, C> Canvas for EgCanvas<'a, D>
where
    D: DrawTarget<Color = C>,
    C: PixelColor + From<Rgb888>,
{
    type Error = D::Error;

    fn save(&mut self) {
        self.transform.save();
    }

    fn restore(&mut self) {
        self.transform.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f32) {
        self.transform.rotate(degrees);
    }

    fn draw_circle(&mut self, center: PointF, radius: f32, paint: &Paint) -> Result<(), Self::Error> {
        let center = self.transform.map(center).round();
        let diameter = (radius * 2.0).round().max(1.0) as u32;
        Circle::with_center(center, diameter)
            .into_styled(Self::shape_style(paint))
            .draw(&mut *self.target)
    }

    fn draw_round_rect(&mut self, rect: RectF, corner: f32, paint: &Paint) -> Result<(), Self::Error> {
        let corners = [
            PointF::new(rect.left, rect.top),
            PointF::new(rect.left + rect.width, rect.top),
            PointF::new(rect.left, rect.top + rect.height),
            PointF::new(rect.left + rect.width, rect.top + rect.height),
        ]
        .map(|p| self.transform.map(p));

        let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for p in corners {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }

        let top_left = PointF::new(x0, y0).round();
        let size = Size::new((x1 - x0).round().max(0.0) as u32, (y1 - y0).round().max(0.0) as u32);
        let r = corner.round().max(0.0) as u32;
        RoundedRectangle::with_equal_corners(Rectangle::new(top_left, size), Size::new(r, r))
            .into_styled(Self::shape_style(paint))
            .draw(&mut *self.target)
    }

    fn draw_line(&mut self, from: PointF, to: PointF, paint: &Paint) -> Result<(), Self::Error> {
        let p0 = self.transform.map(from).round();
        let p1 = self.transform.map(to).round();
        let width = stroke_px(paint.stroke_width);
        let color = C::from(paint.color);

        Line::new(p0, p1)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(&mut *self.target)?;

        // embedded-graphics only does butt ends
        if paint.cap == Cap::Round && width > 2 {
            let cap = PrimitiveStyle::with_fill(color);
            Circle::with_center(p0, width).into_styled(cap).draw(&mut *self.target)?;
            Circle::with_center(p1, width).into_styled(cap).draw(&mut *self.target)?;
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: PointF, paint: &Paint) -> Result<(), Self::Error> {
        let font = mono_font_for(paint.text_size);
        let character_style = MonoTextStyle::new(font, C::from(paint.color));
        let alignment = match paint.text_align {
            TextAlign::Left => Alignment::Left,
            TextAlign::Center => Alignment::Center,
            TextAlign::Right => Alignment::Right,
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Alphabetic)
            .build();

        let position = self.transform.map(origin).round();
        Text::with_text_style(text, position, character_style, text_style)
            .draw(&mut *self.target)?;
        Ok(())
    }

    fn font_metrics(&self, paint: &Paint) -> FontMetrics {
        mono_font_metrics(mono_font_for(paint.text_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::VarFrameBuf;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_font_selection() {
        assert_eq!(mono_font_for(1.0).character_size, FONT_4X6.character_size);
        assert_eq!(mono_font_for(10.5).character_size, FONT_6X10.character_size);
        assert_eq!(mono_font_for(18.0).character_size, FONT_9X18.character_size);
        assert_eq!(mono_font_for(64.0).character_size, FONT_10X20.character_size);
    }

    #[test]
    fn test_font_metrics_span_the_cell() {
        let m = mono_font_metrics(&FONT_6X10);
        assert!(m.ascent < 0.0);
        assert!(m.descent >= 0.0);
        assert_eq!(m.descent - m.ascent, 9.0);
    }

    #[test]
    fn test_filled_circle() {
        let mut fb = VarFrameBuf::new(21, 21, Rgb888::BLACK);
        let mut canvas = EgCanvas::new(&mut fb);
        canvas
            .draw_circle(PointF::new(10.0, 10.0), 5.0, &Paint::fill(Rgb888::WHITE))
            .unwrap();
        assert_eq!(fb.pixel(10, 10), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(0, 0), Some(Rgb888::BLACK));
        assert_eq!(fb.pixel(10, 17), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_rotated_line_lands_right_of_center() {
        let mut fb = VarFrameBuf::new(41, 41, Rgb888::BLACK);
        let mut canvas = EgCanvas::new(&mut fb);
        canvas.save();
        canvas.translate(20.0, 20.0);
        canvas.rotate(90.0);
        canvas
            .draw_line(PointF::new(0.0, 0.0), PointF::new(0.0, -15.0), &Paint::stroke(Rgb888::RED, 1.0))
            .unwrap();
        canvas.restore();
        assert_eq!(fb.pixel(35, 20), Some(Rgb888::RED));
        assert_eq!(fb.pixel(20, 5), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_wide_line_round_cap_extends_past_end() {
        let draw = |cap: Cap| {
            let mut fb = VarFrameBuf::new(24, 17, Rgb888::BLACK);
            let mut canvas = EgCanvas::new(&mut fb);
            canvas
                .draw_line(
                    PointF::new(5.0, 8.0),
                    PointF::new(15.0, 8.0),
                    &Paint::stroke(Rgb888::RED, 5.0).with_cap(cap),
                )
                .unwrap();
            fb
        };

        let round = draw(Cap::Round);
        assert_eq!(round.pixel(10, 8), Some(Rgb888::RED));
        assert_eq!(round.pixel(16, 8), Some(Rgb888::RED));
        assert_eq!(round.pixel(4, 8), Some(Rgb888::RED));

        let butt = draw(Cap::Butt);
        assert_eq!(butt.pixel(10, 8), Some(Rgb888::RED));
        assert_eq!(butt.pixel(16, 8), Some(Rgb888::BLACK));
        assert_eq!(butt.pixel(4, 8), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_round_rect_fills_inside() {
        let mut fb = VarFrameBuf::new(40, 40, Rgb888::BLACK);
        let mut canvas = EgCanvas::new(&mut fb);
        canvas
            .draw_round_rect(RectF::new(0.0, 0.0, 40.0, 40.0), 5.0, &Paint::fill(Rgb888::BLUE))
            .unwrap();
        assert_eq!(fb.pixel(20, 20), Some(Rgb888::BLUE));
        assert_eq!(fb.pixel(20, 0), Some(Rgb888::BLUE));
        // rounded away
        assert_eq!(fb.pixel(0, 0), Some(Rgb888::BLACK));
    }
}
