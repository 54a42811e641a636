use rand::Rng;

use super::{Entity, WorldView};
use crate::sprites::{CLIMBING_ENEMY, FLYING_ENEMY, GROUND_ENEMY, SpriteSheet};
use crate::surface::{Point, Rect, Rgb, Surface};
use crate::timer::IntervalTimer;

const ENEMY_FPS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Flying,
    Climbing,
    Ground,
}

/// Per-kind movement on top of the shared drift
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// Bobs on a sine wave while drifting left
    Bob { angle: f64, angular_velocity: f64 },
    /// Hangs from a thread, bouncing between the ground line and the sky
    Climb,
    /// Rooted to the ground; only the world scroll moves it
    Planted,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub movement: Movement,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub frame_x: usize,
    pub max_frame: usize,
    frame_timer: IntervalTimer,
    marked_for_deletion: bool,
}

impl Enemy {
    fn with_kind(kind: EnemyKind, movement: Movement, bounds: Rect, max_frame: usize) -> Self {
        Self {
            kind,
            movement,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            speed_x: 0.0,
            speed_y: 0.0,
            frame_x: 0,
            max_frame,
            frame_timer: IntervalTimer::from_fps(ENEMY_FPS),
            marked_for_deletion: false,
        }
    }

    /// Enters somewhere past the right edge in the upper half of the sky
    pub fn flying(world: &WorldView, rng: &mut impl Rng) -> Self {
        let (width, height) = (60.0, 44.0);
        let x = world.width + rng.random::<f64>() * world.width * 0.5;
        let y = rng.random::<f64>() * world.height * 0.5;
        let movement = Movement::Bob {
            angle: 0.0,
            angular_velocity: rng.random_range(0.1..0.2),
        };

        let mut enemy = Self::with_kind(
            EnemyKind::Flying,
            movement,
            Rect::new(x, y, width, height),
            5,
        );
        enemy.speed_x = rng.random_range(1.0..2.0);
        enemy
    }

    /// Stands on the ground at the right edge
    pub fn ground(world: &WorldView) -> Self {
        let (width, height) = (60.0, 87.0);
        let y = world.ground_y() - height;
        Self::with_kind(
            EnemyKind::Ground,
            Movement::Planted,
            Rect::new(world.width, y, width, height),
            1,
        )
    }

    /// Drops in at the right edge, heading up or down at random
    pub fn climbing(world: &WorldView, rng: &mut impl Rng) -> Self {
        let (width, height) = (120.0, 144.0);
        let y = rng.random::<f64>() * world.height * 0.5;

        let mut enemy = Self::with_kind(
            EnemyKind::Climbing,
            Movement::Climb,
            Rect::new(world.width, y, width, height),
            5,
        );
        enemy.speed_y = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        enemy
    }

    pub fn spawn(kind: EnemyKind, world: &WorldView, rng: &mut impl Rng) -> Self {
        match kind {
            EnemyKind::Flying => Self::flying(world, rng),
            EnemyKind::Climbing => Self::climbing(world, rng),
            EnemyKind::Ground => Self::ground(world),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    fn sprite(&self) -> &'static SpriteSheet {
        match self.kind {
            EnemyKind::Flying => &FLYING_ENEMY,
            EnemyKind::Climbing => &CLIMBING_ENEMY,
            EnemyKind::Ground => &GROUND_ENEMY,
        }
    }
}

impl Entity for Enemy {
    fn update(&mut self, delta_ms: f64, world: &WorldView) {
        self.x -= self.speed_x + world.speed;
        self.y += self.speed_y;

        if self.frame_timer.tick(delta_ms) {
            self.frame_x = if self.frame_x < self.max_frame {
                self.frame_x + 1
            } else {
                0
            };
        }

        match &mut self.movement {
            Movement::Bob {
                angle,
                angular_velocity,
            } => {
                *angle += *angular_velocity;
                self.y += angle.sin();
            }
            Movement::Climb => {
                if self.y > world.ground_y() - self.height {
                    self.speed_y *= -1.0;
                }
                if self.y < -self.height {
                    self.marked_for_deletion = true;
                }
            }
            Movement::Planted => {}
        }

        // Off screen to the left
        if self.x + self.width < 0.0 {
            self.marked_for_deletion = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.movement == Movement::Climb {
            let thread_x = self.x + self.width * 0.5;
            surface.draw_line(
                Point::new(thread_x, 0.0),
                Point::new(thread_x, self.y + 50.0),
                Rgb::GRAY,
            );
        }

        let sheet = self.sprite();
        let column = sheet.looping_column(self.frame_x, 0);
        surface.draw_sprite(sheet, column, 0, self.bounds());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world(speed: f64) -> WorldView {
        WorldView {
            speed,
            width: 900.0,
            height: 500.0,
            ground_margin: 80.0,
        }
    }

    #[test]
    fn test_flying_spawns_off_screen_in_upper_half() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let enemy = Enemy::flying(&world(0.0), &mut rng);
            assert_eq!(enemy.kind, EnemyKind::Flying);
            assert!(enemy.x >= 900.0 && enemy.x < 1350.0);
            assert!(enemy.y >= 0.0 && enemy.y < 250.0);
            assert!(enemy.speed_x >= 1.0 && enemy.speed_x < 2.0);
        }
    }

    #[test]
    fn test_ground_enemy_stands_on_ground() {
        let enemy = Enemy::ground(&world(0.0));
        assert_eq!(enemy.x, 900.0);
        assert_eq!(enemy.bounds().bottom(), 420.0);
        assert_eq!(enemy.movement, Movement::Planted);
    }

    #[test]
    fn test_ground_enemy_moves_only_with_world() {
        let mut enemy = Enemy::ground(&world(0.0));
        enemy.update(16.0, &world(0.0));
        assert_eq!(enemy.x, 900.0);
        enemy.update(16.0, &world(3.0));
        assert_eq!(enemy.x, 897.0);
        assert_eq!(enemy.y, 333.0);
    }

    #[test]
    fn test_climbing_enemy_bounces_off_ground() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::climbing(&world(0.0), &mut rng);
        enemy.y = 420.0 - 144.0;
        enemy.speed_y = 1.0;
        enemy.update(16.0, &world(0.0));
        assert_eq!(enemy.speed_y, -1.0);
    }

    #[test]
    fn test_climbing_enemy_marked_above_screen() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::climbing(&world(0.0), &mut rng);
        enemy.y = -144.0;
        enemy.speed_y = -1.0;
        enemy.update(16.0, &world(0.0));
        assert!(enemy.is_marked_for_deletion());
    }

    #[test]
    fn test_marked_once_past_left_edge() {
        let mut enemy = Enemy::ground(&world(0.0));
        enemy.x = -59.0;
        enemy.update(16.0, &world(0.0));
        assert!(!enemy.is_marked_for_deletion());
        enemy.update(16.0, &world(2.0));
        assert!(enemy.is_marked_for_deletion());
    }

    #[test]
    fn test_animation_wraps_after_max_frame() {
        let mut enemy = Enemy::ground(&world(0.0));
        // 20 fps: fires every other update with a 60ms delta
        let mut frames = Vec::new();
        for _ in 0..8 {
            enemy.update(60.0, &world(0.0));
            frames.push(enemy.frame_x);
        }
        assert_eq!(frames, vec![0, 1, 1, 0, 0, 1, 1, 0]);
    }

    #[test]
    fn test_climbing_enemy_draws_thread() {
        let mut rng = Pcg32::seed_from_u64(9);
        let enemy = Enemy::climbing(&world(0.0), &mut rng);
        let mut surface = RecordingSurface::new();
        enemy.draw(&mut surface);
        assert!(matches!(surface.commands()[0], DrawCommand::Line { .. }));
        assert_eq!(surface.sprites_from("spider").len(), 1);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_flying_enemy_always_drifts_left(
                seed in any::<u64>(),
                speed in 0.0f64..6.0,
                updates in 1usize..100
            ) {
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut enemy = Enemy::flying(&world(speed), &mut rng);
                let start_x = enemy.x;
                for _ in 0..updates {
                    enemy.update(16.0, &world(speed));
                }
                prop_assert!(enemy.x < start_x);
            }
        }
    }
}
