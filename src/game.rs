//! The aggregate game state and its per-tick update and draw passes.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::background::Background;
use crate::collision::{CollisionContext, resolve_collisions};
use crate::entities::{
    CollisionAnimation, Enemy, EnemyKind, Entity, FloatingMessage, Particle, Player, PlayerContext,
    WorldView,
};
use crate::hud::Hud;
use crate::input::InputKeys;
use crate::pool::EntityPool;
use crate::session::{Outcome, SessionState};
use crate::settings::Settings;
use crate::spawner::SpawnScheduler;
use crate::surface::{Point, Rgb, Surface};

/// Random source shared by every randomized constructor
pub type GameRng = Pcg32;

/// Something worth telling the host about, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { kind: EnemyKind },
    EnemyDefeated { kind: EnemyKind, at: Point },
    PlayerHit { lives_left: u32 },
    GameOver { outcome: Outcome },
}

pub struct Game {
    width: f64,
    height: f64,
    ground_margin: f64,
    session: SessionState,
    background: Background,
    player: Player,
    enemies: EntityPool<Enemy>,
    particles: EntityPool<Particle>,
    collisions: EntityPool<CollisionAnimation>,
    messages: EntityPool<FloatingMessage>,
    spawner: SpawnScheduler,
    hud: Hud,
    rng: GameRng,
    debug: bool,
    events: Vec<GameEvent>,
    game_over_reported: bool,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        info!("Starting game with seed {seed}");
        Self::with_rng(settings, GameRng::seed_from_u64(seed))
    }

    pub fn with_rng(settings: &Settings, rng: GameRng) -> Self {
        let session = SessionState::new(settings);
        let world = WorldView {
            speed: session.speed,
            width: settings.width,
            height: settings.height,
            ground_margin: settings.ground_margin,
        };

        Self {
            width: settings.width,
            height: settings.height,
            ground_margin: settings.ground_margin,
            player: Player::new(&world, settings.player_max_speed),
            session,
            background: Background::new(),
            enemies: EntityPool::new(),
            particles: EntityPool::with_cap(settings.max_particles),
            collisions: EntityPool::new(),
            messages: EntityPool::new(),
            spawner: SpawnScheduler::new(settings.enemy_interval),
            hud: Hud,
            rng,
            debug: settings.debug,
            events: Vec::new(),
            game_over_reported: false,
        }
    }

    /// Snapshot of the world at the current scroll speed
    pub fn world(&self) -> WorldView {
        WorldView {
            speed: self.session.speed,
            width: self.width,
            height: self.height,
            ground_margin: self.ground_margin,
        }
    }

    /// One full update pass. Nothing is removed from a pool until every
    /// pool has been updated.
    pub fn update(&mut self, delta_ms: f64, keys: &InputKeys) {
        self.session.advance_clock(delta_ms);
        self.background.update(self.session.speed);

        let world = self.world();
        let mut collision_ctx = CollisionContext {
            enemies: &mut self.enemies,
            collisions: &mut self.collisions,
            messages: &mut self.messages,
            session: &mut self.session,
            rng: &mut self.rng,
        };
        let hits = resolve_collisions(&mut self.player, &world, &mut collision_ctx);
        self.events.extend(hits);

        let mut player_ctx = PlayerContext {
            session: &mut self.session,
            particles: &mut self.particles,
            rng: &mut self.rng,
        };
        self.player.update(keys, delta_ms, &world, &mut player_ctx);

        // Player state may have changed the scroll speed
        let world = self.world();

        if self.spawner.tick(delta_ms) {
            for enemy in self.spawner.spawn_wave(&world, &mut self.rng) {
                self.events.push(GameEvent::EnemySpawned { kind: enemy.kind });
                self.enemies.push(enemy);
            }
        }

        self.enemies.update_all(delta_ms, &world);
        self.messages.update_all(delta_ms, &world);
        self.particles.update_all(delta_ms, &world);
        self.particles.enforce_cap();
        self.collisions.update_all(delta_ms, &world);

        self.enemies.compact();
        self.messages.compact();
        self.particles.compact();
        self.collisions.compact();

        if !self.game_over_reported {
            if let Some(outcome) = self.session.outcome() {
                self.game_over_reported = true;
                info!("Run finished: {outcome:?} with score {}", self.session.score);
                self.events.push(GameEvent::GameOver { outcome });
            }
        }
    }

    /// Back to front: background, player, enemies, particles, collision
    /// effects, floating messages, then the HUD
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.background.draw(surface);
        self.player.draw(surface);
        self.enemies.draw_all(surface);
        self.particles.draw_all(surface);
        self.collisions.draw_all(surface);
        self.messages.draw_all(surface);

        if self.debug {
            self.draw_hitboxes(surface);
        }

        self.hud
            .draw(&self.session, self.debug, self.width, self.height, surface);
    }

    fn draw_hitboxes(&self, surface: &mut dyn Surface) {
        surface.stroke_rect(self.player.bounds(), Rgb::WHITE);
        let hitboxes = self
            .enemies
            .iter()
            .filter_map(Entity::hitbox)
            .chain(self.collisions.iter().filter_map(Entity::hitbox));
        for hitbox in hitboxes {
            surface.stroke_rect(hitbox, Rgb::RED);
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        debug!("Debug overlay {}", if self.debug { "on" } else { "off" });
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &EntityPool<Enemy> {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut EntityPool<Enemy> {
        &mut self.enemies
    }

    pub fn particles(&self) -> &EntityPool<Particle> {
        &self.particles
    }

    pub fn collisions(&self) -> &EntityPool<CollisionAnimation> {
        &self.collisions
    }

    pub fn messages(&self) -> &EntityPool<FloatingMessage> {
        &self.messages
    }
}
