use super::{Entity, WorldView};
use crate::surface::{Point, Rgb, Surface, TextAlign};

/// Fraction of the remaining distance covered per update
const GLIDE: f64 = 0.03;
const LIFETIME_UPDATES: u32 = 100;

/// Text that glides from where something happened towards a HUD readout
#[derive(Debug, Clone)]
pub struct FloatingMessage {
    pub value: String,
    pub x: f64,
    pub y: f64,
    pub target: Point,
    timer: u32,
    marked_for_deletion: bool,
}

impl FloatingMessage {
    pub fn new(value: impl Into<String>, from: Point, target: Point) -> Self {
        Self {
            value: value.into(),
            x: from.x,
            y: from.y,
            target,
            timer: 0,
            marked_for_deletion: false,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Entity for FloatingMessage {
    fn update(&mut self, _delta_ms: f64, _world: &WorldView) {
        self.x += (self.target.x - self.x) * GLIDE;
        self.y += (self.target.y - self.y) * GLIDE;
        self.timer += 1;
        if self.timer > LIFETIME_UPDATES {
            self.marked_for_deletion = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_text(&self.value, self.position(), TextAlign::Left, Rgb::WHITE);
    }

    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }
}
