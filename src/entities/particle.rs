use rand::Rng;

use super::{Entity, WorldView};
use crate::sprites::PARTICLES;
use crate::surface::{Rect, Surface};

const SHRINK: f64 = 0.95;
const MIN_SIZE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Kicked up while running
    Dust,
    /// Trail left while rolling or diving
    Fire,
    /// Thrown up when a dive hits the ground
    Splash,
}

impl ParticleKind {
    fn sprite_row(self) -> usize {
        match self {
            ParticleKind::Dust => 0,
            ParticleKind::Fire => 1,
            ParticleKind::Splash => 2,
        }
    }
}

/// Short-lived visual debris. Shrinks every update until it vanishes.
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub angle: f64,
    pub angular_velocity: f64,
    pub gravity: f64,
    marked_for_deletion: bool,
}

impl Particle {
    fn base(kind: ParticleKind, x: f64, y: f64, size: f64) -> Self {
        Self {
            kind,
            x,
            y,
            size,
            speed_x: 0.0,
            speed_y: 0.0,
            angle: 0.0,
            angular_velocity: 0.0,
            gravity: 0.0,
            marked_for_deletion: false,
        }
    }

    pub fn dust(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        let mut particle = Self::base(ParticleKind::Dust, x, y, rng.random_range(10.0..20.0));
        particle.speed_x = rng.random();
        particle.speed_y = rng.random();
        particle
    }

    pub fn fire(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        let mut particle = Self::base(ParticleKind::Fire, x, y, rng.random_range(100.0..200.0));
        particle.speed_x = 1.0;
        particle.speed_y = 1.0;
        particle.angular_velocity = rng.random_range(-0.1..0.1);
        particle
    }

    pub fn splash(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        let size = rng.random_range(100.0..200.0);
        let mut particle = Self::base(ParticleKind::Splash, x - size * 0.4, y - size * 0.5, size);
        particle.speed_x = rng.random_range(-4.0..2.0);
        particle.speed_y = rng.random_range(2.0..4.0);
        particle
    }

    /// Box the particle is drawn into, centred on its position
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.size * 0.5,
            self.y - self.size * 0.5,
            self.size,
            self.size,
        )
    }

    fn sprite_column(&self) -> usize {
        let column = match self.kind {
            ParticleKind::Dust if self.size < 8.0 => 0,
            ParticleKind::Dust => 1,
            _ if self.size < 20.0 => 0,
            _ if self.size < 80.0 => 1,
            _ => 2,
        };
        PARTICLES.looping_column(column, self.kind.sprite_row())
    }
}

impl Entity for Particle {
    /// Particles age per update rather than per millisecond
    fn update(&mut self, _delta_ms: f64, world: &WorldView) {
        self.x -= self.speed_x + world.speed;
        self.y -= self.speed_y;
        self.size *= SHRINK;
        if self.size < MIN_SIZE {
            self.marked_for_deletion = true;
        }

        match self.kind {
            ParticleKind::Dust => {}
            ParticleKind::Fire => {
                self.angle += self.angular_velocity;
                self.x += (self.angle * 5.0).sin();
            }
            ParticleKind::Splash => {
                self.gravity += 0.1;
                self.y += self.gravity;
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_sprite(
            &PARTICLES,
            self.sprite_column(),
            self.kind.sprite_row(),
            self.bounds(),
        );
    }

    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_dust_new() {
        let mut rng = Pcg32::seed_from_u64(11);
        let particle = Particle::dust(10.0, 20.0, &mut rng);
        assert_eq!(particle.kind, ParticleKind::Dust);
        assert_eq!(particle.x, 10.0);
        assert_eq!(particle.y, 20.0);
        assert!(particle.size >= 10.0 && particle.size < 20.0);
        assert!(particle.speed_x >= 0.0 && particle.speed_x < 1.0);
    }

    #[test]
    fn test_splash_offsets_spawn_point() {
        let mut rng = Pcg32::seed_from_u64(11);
        let particle = Particle::splash(100.0, 100.0, &mut rng);
        assert!((particle.x - (100.0 - particle.size * 0.4)).abs() < 1e-9);
        assert!((particle.y - (100.0 - particle.size * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_particle_update_position() {
        let mut particle = Particle::base(ParticleKind::Dust, 10.0, 10.0, 10.0);
        particle.speed_x = 2.0;
        particle.speed_y = 1.0;
        particle.update(16.0, &world(3.0));
        assert_eq!(particle.x, 5.0);
        assert_eq!(particle.y, 9.0);
        assert!((particle.size - 9.5).abs() < 1e-9);
    }

    #[test]
    fn test_splash_falls_faster_each_update() {
        let mut particle = Particle::base(ParticleKind::Splash, 0.0, 0.0, 150.0);
        particle.update(16.0, &world(0.0));
        particle.update(16.0, &world(0.0));
        assert!((particle.gravity - 0.2).abs() < 1e-9);
        assert!((particle.y - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_particle_lifetime_expires() {
        let mut particle = Particle::base(ParticleKind::Dust, 0.0, 0.0, 0.55);
        assert!(!particle.is_marked_for_deletion());
        particle.update(16.0, &world(0.0));
        assert!(!particle.is_marked_for_deletion());
        particle.update(16.0, &world(0.0));
        assert!(particle.is_marked_for_deletion());
    }

    #[test]
    fn test_fire_eventually_burns_out() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particle = Particle::fire(0.0, 0.0, &mut rng);
        let mut updates = 0;
        while !particle.is_marked_for_deletion() {
            particle.update(16.0, &world(0.0));
            updates += 1;
        }
        // 200 * 0.95^n < 0.5 within 117 updates
        assert!(updates <= 117);
    }
}
