//! Player versus enemy contact.
//!
//! Runs once per tick before the player moves. Every enemy the player
//! touches is marked and leaves a collision animation behind; whether the
//! touch scores or hurts depends on the player's state at that moment.

use log::debug;
use rand::Rng;

use crate::entities::{CollisionAnimation, Enemy, Entity, FloatingMessage, Player, PlayerState, WorldView};
use crate::game::GameEvent;
use crate::pool::EntityPool;
use crate::session::SessionState;
use crate::surface::Point;

/// Where "+1" messages fly to: next to the score readout
pub const SCORE_TARGET: Point = Point { x: 150.0, y: 50.0 };

/// Collections collision resolution may append to or mark
pub struct CollisionContext<'a, R: Rng> {
    pub enemies: &'a mut EntityPool<Enemy>,
    pub collisions: &'a mut EntityPool<CollisionAnimation>,
    pub messages: &'a mut EntityPool<FloatingMessage>,
    pub session: &'a mut SessionState,
    pub rng: &'a mut R,
}

/// Resolves every overlap between the player and a live enemy
pub fn resolve_collisions<R: Rng>(
    player: &mut Player,
    world: &WorldView,
    ctx: &mut CollisionContext<'_, R>,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let player_box = player.bounds();

    for index in 0..ctx.enemies.len() {
        let Some(enemy) = ctx.enemies.get(index) else {
            continue;
        };
        if enemy.is_marked_for_deletion() || !enemy.bounds().overlaps(&player_box) {
            continue;
        }

        let kind = enemy.kind;
        let at = enemy.center();
        let origin = Point::new(enemy.x, enemy.y);
        ctx.enemies.mark(index);
        ctx.collisions.push(CollisionAnimation::new(at, ctx.rng));

        if player.state().is_attacking() {
            ctx.session.add_score(1);
            ctx.messages
                .push(FloatingMessage::new("+1", origin, SCORE_TARGET));
            debug!("Defeated {kind:?} at ({:.0}, {:.0})", at.x, at.y);
            events.push(GameEvent::EnemyDefeated { kind, at });
        } else {
            player.set_state(PlayerState::Hit, world, ctx.session);
            ctx.session.lose_life();
            debug!("Hit by {kind:?}, {} lives left", ctx.session.lives);
            events.push(GameEvent::PlayerHit {
                lives_left: ctx.session.lives,
            });
        }
    }

    events
}
