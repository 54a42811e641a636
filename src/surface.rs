//! Drawing surface shared by every drawable part of the game.
//!
//! All coordinates are world pixels (the playfield is 900 x 500 by default).
//! A surface keeps a stack of saved alpha values so a draw call that fades
//! itself can put the global alpha back before its siblings draw.

use crate::sprites::SpriteSheet;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const RED: Rgb = Rgb(220, 50, 47);
    pub const YELLOW: Rgb = Rgb(250, 200, 40);

    /// Darkens the colour towards black as `alpha` approaches zero
    pub fn faded(self, alpha: f64) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let scale = |channel: u8| (f64::from(channel) * alpha).round() as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Opaque 2D drawing context handed to every `draw` call.
///
/// Draw calls must not read anything back from the surface; they only issue
/// commands. Any `set_alpha` has to be bracketed by `save` / `restore`.
pub trait Surface {
    /// Wipes the whole surface at the start of a frame
    fn clear(&mut self);

    fn save(&mut self);

    fn restore(&mut self);

    fn set_alpha(&mut self, alpha: f64);

    fn alpha(&self) -> f64;

    /// Blits column `frame_x` of row `frame_y` of a sheet into `dest`
    fn draw_sprite(&mut self, sheet: &SpriteSheet, frame_x: usize, frame_y: usize, dest: Rect);

    /// Draws a horizontally repeating pattern across the surface, scrolled by `offset_x`
    fn draw_strip(&mut self, pattern: &str, y: f64, offset_x: f64, color: Rgb);

    fn stroke_rect(&mut self, rect: Rect, color: Rgb);

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb);

    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, color: Rgb);
}

/// Global alpha plus the values pushed by `save`
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaStack {
    current: f64,
    saved: Vec<f64>,
}

impl Default for AlphaStack {
    fn default() -> Self {
        Self {
            current: 1.0,
            saved: Vec::new(),
        }
    }
}

impl AlphaStack {
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn set(&mut self, alpha: f64) {
        self.current = alpha.clamp(0.0, 1.0);
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pops the last saved value; an unmatched restore is ignored
    pub fn restore(&mut self) {
        if let Some(alpha) = self.saved.pop() {
            self.current = alpha;
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// A single command captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sheet: &'static str,
        frame_x: usize,
        frame_y: usize,
        dest: Rect,
        alpha: f64,
    },
    Strip {
        pattern: String,
        y: f64,
        offset_x: f64,
    },
    StrokeRect {
        rect: Rect,
    },
    Line {
        from: Point,
        to: Point,
    },
    Text {
        text: String,
        at: Point,
        align: TextAlign,
        alpha: f64,
    },
}

/// Headless surface that records what was drawn during the current frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    alpha: AlphaStack,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn save_depth(&self) -> usize {
        self.alpha.depth()
    }

    /// Sprite commands drawn from the sheet called `name`, in draw order
    pub fn sprites_from(&self, name: &str) -> Vec<&DrawCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Sprite { sheet, .. } if *sheet == name))
            .collect()
    }

    /// Every text string drawn this frame
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
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
        self.commands.push(DrawCommand::Sprite {
            sheet: sheet.name,
            frame_x,
            frame_y,
            dest,
            alpha: self.alpha.current(),
        });
    }

    fn draw_strip(&mut self, pattern: &str, y: f64, offset_x: f64, _color: Rgb) {
        self.commands.push(DrawCommand::Strip {
            pattern: pattern.to_string(),
            y,
            offset_x,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, _color: Rgb) {
        self.commands.push(DrawCommand::StrokeRect { rect });
    }

    fn draw_line(&mut self, from: Point, to: Point, _color: Rgb) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn fill_text(&mut self, text: &str, at: Point, align: TextAlign, _color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            align,
            alpha: self.alpha.current(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_alpha_stack_save_restore() {
        let mut stack = AlphaStack::default();
        stack.save();
        stack.set(0.25);
        assert_eq!(stack.current(), 0.25);
        assert_eq!(stack.depth(), 1);
        stack.restore();
        assert_eq!(stack.current(), 1.0);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_alpha_clamped_and_unmatched_restore_ignored() {
        let mut stack = AlphaStack::default();
        stack.set(-0.5);
        assert_eq!(stack.current(), 0.0);
        stack.restore();
        assert_eq!(stack.current(), 0.0);
        stack.set(3.0);
        assert_eq!(stack.current(), 1.0);
    }

    #[test]
    fn test_faded_colour() {
        assert_eq!(Rgb(200, 100, 50).faded(0.5), Rgb(100, 50, 25));
        assert_eq!(Rgb::WHITE.faded(0.0), Rgb(0, 0, 0));
        assert_eq!(Rgb::WHITE.faded(2.0), Rgb::WHITE);
    }

    #[test]
    fn test_recording_surface_clear_drops_commands() {
        let mut surface = RecordingSurface::new();
        surface.fill_text("hi", Point::default(), TextAlign::Left, Rgb::WHITE);
        assert_eq!(surface.texts(), vec!["hi"]);
        surface.clear();
        assert!(surface.commands().is_empty());
    }
}
