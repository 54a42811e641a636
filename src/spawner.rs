use log::debug;
use rand::Rng;

use crate::entities::{Enemy, EnemyKind, WorldView};
use crate::timer::IntervalTimer;

/// Decides when a wave of enemies arrives and what it contains
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    timer: IntervalTimer,
}

impl SpawnScheduler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            timer: IntervalTimer::new(interval_ms),
        }
    }

    /// Advances the schedule, returning true when a wave is due
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        self.timer.tick(delta_ms)
    }

    /// One wave: a ground or climbing enemy only while the world is moving,
    /// then always a flying one
    pub fn spawn_wave(&self, world: &WorldView, rng: &mut impl Rng) -> Vec<Enemy> {
        let mut wave = Vec::with_capacity(2);

        if world.speed > 0.0 {
            let kind = if rng.random_bool(0.5) {
                EnemyKind::Ground
            } else {
                EnemyKind::Climbing
            };
            wave.push(Enemy::spawn(kind, world, rng));
        }
        wave.push(Enemy::spawn(EnemyKind::Flying, world, rng));

        debug!(
            "Spawned wave: {:?}",
            wave.iter().map(|enemy| enemy.kind).collect::<Vec<_>>()
        );
        wave
    }
}
