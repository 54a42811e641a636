use rand::Rng;

use super::{Entity, WorldView};
use crate::sprites::BOOM;
use crate::surface::{Point, Rect, Surface};
use crate::timer::IntervalTimer;

const SPRITE_WIDTH: f64 = 100.0;
const SPRITE_HEIGHT: f64 = 90.0;
const MAX_FRAME: usize = 4;
const FADE_SPEED: f64 = 0.01;

/// Burst played where the player hit an enemy.
///
/// Ends when it runs out of frames or fades out, whichever comes first.
#[derive(Debug, Clone)]
pub struct CollisionAnimation {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    frame_x: usize,
    frame_timer: IntervalTimer,
    alpha: f64,
    marked_for_deletion: bool,
}

impl CollisionAnimation {
    /// Centres a burst of random size (0.5x to 1.5x) and speed (5 to 15 fps) on `origin`
    pub fn new(origin: Point, rng: &mut impl Rng) -> Self {
        let size_modifier = rng.random_range(0.5..1.5);
        let fps = rng.random_range(5.0..15.0);
        Self::with_params(origin, size_modifier, fps)
    }

    pub fn with_params(origin: Point, size_modifier: f64, fps: f64) -> Self {
        let width = SPRITE_WIDTH * size_modifier;
        let height = SPRITE_HEIGHT * size_modifier;

        Self {
            x: origin.x - width * 0.5,
            y: origin.y - height * 0.5,
            width,
            height,
            frame_x: 0,
            frame_timer: IntervalTimer::from_fps(fps),
            alpha: 1.0,
            marked_for_deletion: false,
        }
    }

    pub fn frame_x(&self) -> usize {
        self.frame_x
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn frame_interval(&self) -> f64 {
        self.frame_timer.interval()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Entity for CollisionAnimation {
    fn update(&mut self, delta_ms: f64, world: &WorldView) {
        self.x -= world.speed;

        if self.frame_timer.tick(delta_ms) {
            self.frame_x += 1;
        }

        if self.alpha > 0.0 {
            self.alpha -= FADE_SPEED;
        }

        if self.frame_x > MAX_FRAME || self.alpha <= 0.0 {
            self.marked_for_deletion = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.set_alpha(self.alpha);
        surface.draw_sprite(&BOOM, self.frame_x, 0, self.bounds());
        surface.restore();
    }

    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }

    fn hitbox(&self) -> Option<Rect> {
        Some(self.bounds())
    }
}
