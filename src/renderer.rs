//! Terminal implementation of [`Surface`].
//!
//! The game draws in world pixels; this surface scales them onto the cells
//! of a ratatui buffer. Sprites keep their ASCII size and are anchored to
//! the bottom centre of their destination box, so a sprite stands on the
//! same ground line at any terminal size.

use ratatui::{
    buffer::Buffer,
    layout::Rect as CellRect,
    style::{Color, Modifier, Style},
};

use crate::sprites::SpriteSheet;
use crate::surface::{AlphaStack, Point, Rect, Rgb, Surface, TextAlign};

/// Below this alpha nothing is drawn at all
const MIN_VISIBLE_ALPHA: f64 = 0.05;

pub struct TerminalSurface<'a> {
    buffer: &'a mut Buffer,
    area: CellRect,
    scale_x: f64,
    scale_y: f64,
    alpha: AlphaStack,
}

impl<'a> TerminalSurface<'a> {
    /// Surface mapping a `world_width` x `world_height` world onto `area`
    pub fn new(buffer: &'a mut Buffer, area: CellRect, world_width: f64, world_height: f64) -> Self {
        Self {
            buffer,
            area,
            scale_x: f64::from(area.width) / world_width,
            scale_y: f64::from(area.height) / world_height,
            alpha: AlphaStack::default(),
        }
    }

    fn column(&self, x: f64) -> i32 {
        (x * self.scale_x).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.scale_y).floor() as i32
    }

    fn is_visible(&self) -> bool {
        self.alpha.current() >= MIN_VISIBLE_ALPHA
    }

    fn style(&self, color: Rgb) -> Style {
        let Rgb(r, g, b) = color.faded(self.alpha.current());
        Style::default().fg(Color::Rgb(r, g, b))
    }

    /// Writes one glyph, clipped to the area. Spaces are transparent.
    fn put(&mut self, column: i32, row: i32, glyph: char, style: Style) {
        if glyph == ' ' || column < 0 || row < 0 {
            return;
        }
        let (Ok(column), Ok(row)) = (u16::try_from(column), u16::try_from(row)) else {
            return;
        };
        if column >= self.area.width || row >= self.area.height {
            return;
        }
        if let Some(cell) = self
            .buffer
            .cell_mut((self.area.x + column, self.area.y + row))
        {
            cell.set_char(glyph).set_style(style);
        }
    }

    fn put_str(&mut self, column: i32, row: i32, text: &str, style: Style) {
        for (offset, glyph) in text.chars().enumerate() {
            self.put(column + offset as i32, row, glyph, style);
        }
    }
}

impl Surface for TerminalSurface<'_> {
    fn clear(&mut self) {
        let area = self.area.intersection(self.buffer.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
    }

    fn save(&mut self) {
        self.alpha.save();
    }

    fn restore(&mut self) {
        self.alpha.restore();
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha.set(alpha);
    }

    fn alpha(&self) -> f64 {
        self.alpha.current()
    }

    fn draw_sprite(&mut self, sheet: &SpriteSheet, frame_x: usize, frame_y: usize, dest: Rect) {
        let Some(frame) = sheet.frame(frame_x, frame_y) else {
            return;
        };
        if !self.is_visible() {
            return;
        }

        let art_width = frame.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i32;
        let art_height = frame.len() as i32;
        let left = self.column(dest.center().x) - art_width / 2;
        let top = self.row(dest.bottom()) - art_height;

        let style = self.style(sheet.color).add_modifier(Modifier::BOLD);
        for (line_index, line) in frame.iter().enumerate() {
            self.put_str(left, top + line_index as i32, line, style);
        }
    }

    fn draw_strip(&mut self, pattern: &str, y: f64, offset_x: f64, color: Rgb) {
        let glyphs: Vec<char> = pattern.chars().collect();
        if glyphs.is_empty() || !self.is_visible() {
            return;
        }

        let row = self.row(y);
        let shift = (offset_x * self.scale_x).round() as i64;
        let style = self.style(color);
        for column in 0..i64::from(self.area.width) {
            let index = (column - shift).rem_euclid(glyphs.len() as i64) as usize;
            self.put(column as i32, row, glyphs[index], style);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        if !self.is_visible() {
            return;
        }
        let style = self.style(color);
        let (left, right) = (self.column(rect.x), self.column(rect.right()));
        let (top, bottom) = (self.row(rect.y), self.row(rect.bottom()));

        for column in left..=right {
            self.put(column, top, '-', style);
            self.put(column, bottom, '-', style);
        }
        for row in top..=bottom {
            self.put(left, row, '|', style);
            self.put(right, row, '|', style);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        if !self.is_visible() {
            return;
        }
        let style = self.style(color);
        let (x0, y0) = (self.column(from.x), self.row(from.y));
        let (x1, y1) = (self.column(to.x), self.row(to.y));
        let steps = (x1 - x0).abs().max((y1 - y0).abs());
        let glyph = if (y1 - y0).abs() >= (x1 - x0).abs() { '|' } else { '-' };

        if steps == 0 {
            self.put(x0, y0, glyph, style);
            return;
        }
        for step in 0..=steps {
            let t = f64::from(step) / f64::from(steps);
            let column = x0 + (f64::from(x1 - x0) * t).round() as i32;
            let row = y0 + (f64::from(y1 - y0) * t).round() as i32;
            self.put(column, row, glyph, style);
        }
    }

    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, color: Rgb) {
        if !self.is_visible() {
            return;
        }
        let width = text.chars().count() as i32;
        let column = match align {
            TextAlign::Left => self.column(at.x),
            TextAlign::Center => self.column(at.x) - width / 2,
        };
        let style = self.style(color).add_modifier(Modifier::BOLD);
        self.put_str(column, self.row(at.y), text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::LIVES;

    /// 90 x 25 cells over a 900 x 500 world: 10 px per column, 20 px per row
    fn buffer() -> Buffer {
        Buffer::empty(CellRect::new(0, 0, 90, 25))
    }

    fn row_text(buffer: &Buffer, row: u16) -> String {
        (0..buffer.area.width)
            .map(|column| buffer[(column, row)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_text_scaled_to_cells() {
        let mut buffer = buffer();
        let area = buffer.area;
        let mut surface = TerminalSurface::new(&mut buffer, area, 900.0, 500.0);
        surface.fill_text("Score: 3", Point::new(20.0, 20.0), TextAlign::Left, Rgb::WHITE);
        assert!(row_text(&buffer, 1).starts_with("  Score: 3"));
    }

    #[test]
    fn test_centered_text() {
        let mut buffer = buffer();
        let area = buffer.area;
        let mut surface = TerminalSurface::new(&mut buffer, area, 900.0, 500.0);
        surface.fill_text("abcd", Point::new(450.0, 0.0), TextAlign::Center, Rgb::WHITE);
        assert_eq!(buffer[(43, 0)].symbol(), "a");
        assert_eq!(buffer[(46, 0)].symbol(), "d");
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut buffer = buffer();
        let area = buffer.area;
        let mut surface = TerminalSurface::new(&mut buffer, area, 900.0, 500.0);
        surface.fill_text("far away", Point::new(2000.0, 900.0), TextAlign::Left, Rgb::WHITE);
        surface.fill_text("left", Point::new(-100.0, 0.0), TextAlign::Left, Rgb::WHITE);
        surface.draw_sprite(&LIVES, 0, 0, Rect::new(-500.0, -500.0, 25.0, 25.0));
        assert_eq!(buffer, self::buffer());
    }

    #[test]
    fn test_transparent_alpha_draws_nothing() {
        let mut buffer = buffer();
        let area = buffer.area;
        let mut surface = TerminalSurface::new(&mut buffer, area, 900.0, 500.0);
        surface.save();
        surface.set_alpha(0.0);
        surface.fill_text("ghost", Point::new(0.0, 0.0), TextAlign::Left, Rgb::WHITE);
        surface.restore();
        assert_eq!(surface.alpha(), 1.0);
        assert_eq!(buffer, self::buffer());
    }

    #[test]
    fn test_strip_tiles_whole_row() {
        let mut buffer = buffer();
        let area = buffer.area;
        let mut surface = TerminalSurface::new(&mut buffer, area, 900.0, 500.0);
        surface.draw_strip("=-", 0.0, 0.0, Rgb::WHITE);
        assert_eq!(row_text(&buffer, 0), "=-".repeat(45));

        let mut surface = TerminalSurface::new(&mut buffer, area, 900.0, 500.0);
        surface.draw_strip("=-", 0.0, -10.0, Rgb::WHITE);
        assert_eq!(row_text(&buffer, 0), "-=".repeat(45));
    }

    #[test]
    fn test_clear_wipes_area() {
        let mut buffer = buffer();
        let area = buffer.area;
        let mut surface = TerminalSurface::new(&mut buffer, area, 900.0, 500.0);
        surface.fill_text("junk", Point::new(0.0, 0.0), TextAlign::Left, Rgb::WHITE);
        surface.clear();
        assert_eq!(buffer, self::buffer());
    }
}
