mod collision_animation;
mod enemy;
mod floating_message;
mod particle;
mod player;

// Re-export all public types
pub use collision_animation::CollisionAnimation;
pub use enemy::{Enemy, EnemyKind, Movement};
pub use floating_message::FloatingMessage;
pub use particle::{Particle, ParticleKind};
pub use player::{Player, PlayerContext, PlayerState};

use crate::surface::{Rect, Surface};

/// Read-only snapshot of the world handed to every entity update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldView {
    /// Horizontal scroll applied to everything per update
    pub speed: f64,
    pub width: f64,
    pub height: f64,
    pub ground_margin: f64,
}

impl WorldView {
    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f64 {
        self.height - self.ground_margin
    }
}

/// Anything living in an entity pool.
///
/// `update` is the only place an entity mutates itself. Once marked for
/// deletion an entity stays marked.
pub trait Entity {
    fn update(&mut self, delta_ms: f64, world: &WorldView);

    fn draw(&self, surface: &mut dyn Surface);

    fn is_marked_for_deletion(&self) -> bool;

    fn mark_for_deletion(&mut self);

    /// Box outlined by the debug overlay
    fn hitbox(&self) -> Option<Rect> {
        None
    }
}
