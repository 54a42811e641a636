use rand::Rng;

use super::{Particle, WorldView};
use crate::input::InputKeys;
use crate::pool::EntityPool;
use crate::session::SessionState;
use crate::sprites::PLAYER;
use crate::surface::{Rect, Surface};
use crate::timer::IntervalTimer;

pub const PLAYER_WIDTH: f64 = 100.0;
pub const PLAYER_HEIGHT: f64 = 91.3;
const PLAYER_FPS: f64 = 20.0;
const WEIGHT: f64 = 1.0;
const JUMP_IMPULSE: f64 = 27.0;
const DIVE_SPEED: f64 = 15.0;
const SPLASH_COUNT: usize = 30;
/// Last frame of the hit animation; the player recovers once it shows
const HIT_RECOVERY_FRAME: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Sitting,
    Running,
    Jumping,
    Falling,
    Rolling,
    Diving,
    Hit,
}

impl PlayerState {
    /// Multiple of the max world speed applied on entering the state
    pub fn speed_factor(self) -> f64 {
        match self {
            PlayerState::Sitting | PlayerState::Diving | PlayerState::Hit => 0.0,
            PlayerState::Running | PlayerState::Jumping | PlayerState::Falling => 1.0,
            PlayerState::Rolling => 2.0,
        }
    }

    /// Rolling and diving defeat enemies on contact
    pub fn is_attacking(self) -> bool {
        matches!(self, PlayerState::Rolling | PlayerState::Diving)
    }

    fn sprite_row(self) -> usize {
        match self {
            PlayerState::Jumping => 1,
            PlayerState::Falling => 2,
            PlayerState::Running => 3,
            PlayerState::Hit => 4,
            PlayerState::Sitting => 5,
            PlayerState::Rolling | PlayerState::Diving => 6,
        }
    }

    fn max_frame(self) -> usize {
        match self {
            PlayerState::Sitting => 4,
            PlayerState::Running => 8,
            PlayerState::Hit => HIT_RECOVERY_FRAME,
            _ => 6,
        }
    }
}

/// What the player writes into while updating.
///
/// The player owns none of this; the game lends it out for one update.
pub struct PlayerContext<'a, R: Rng> {
    pub session: &'a mut SessionState,
    pub particles: &'a mut EntityPool<Particle>,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity, positive is down
    pub vy: f64,
    /// Horizontal velocity
    pub speed: f64,
    pub max_speed: f64,
    pub frame_x: usize,
    state: PlayerState,
    frame_timer: IntervalTimer,
}

impl Player {
    /// Player sitting on the ground at the left edge
    pub fn new(world: &WorldView, max_speed: f64) -> Self {
        Self {
            x: 0.0,
            y: world.ground_y() - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            vy: 0.0,
            speed: 0.0,
            max_speed,
            frame_x: 0,
            state: PlayerState::Sitting,
            frame_timer: IntervalTimer::from_fps(PLAYER_FPS),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn on_ground(&self, world: &WorldView) -> bool {
        self.y >= world.ground_y() - self.height
    }

    /// Switches state and sets the world scroll speed to match it
    pub fn set_state(&mut self, state: PlayerState, world: &WorldView, session: &mut SessionState) {
        self.state = state;
        session.speed = session.max_speed * state.speed_factor();
        self.frame_x = 0;

        match state {
            PlayerState::Jumping if self.on_ground(world) => self.vy -= JUMP_IMPULSE,
            PlayerState::Diving => self.vy = DIVE_SPEED,
            _ => {}
        }
    }

    pub fn update<R: Rng>(
        &mut self,
        keys: &InputKeys,
        delta_ms: f64,
        world: &WorldView,
        ctx: &mut PlayerContext<'_, R>,
    ) {
        self.handle_input(keys, world, ctx);

        // Horizontal: last frame's speed applies before this frame's input
        self.x += self.speed;
        self.speed = if keys.right && self.state != PlayerState::Hit {
            self.max_speed
        } else if keys.left && self.state != PlayerState::Hit {
            -self.max_speed
        } else {
            0.0
        };
        self.x = self.x.clamp(0.0, (world.width - self.width).max(0.0));

        // Vertical
        self.y += self.vy;
        if self.on_ground(world) {
            self.vy = 0.0;
        } else {
            self.vy += WEIGHT;
        }
        let floor = world.ground_y() - self.height;
        if self.y > floor {
            self.y = floor;
        }

        if self.frame_timer.tick(delta_ms) {
            self.frame_x = if self.frame_x < self.state.max_frame() {
                self.frame_x + 1
            } else {
                0
            };
        }
    }

    fn handle_input<R: Rng>(
        &mut self,
        keys: &InputKeys,
        world: &WorldView,
        ctx: &mut PlayerContext<'_, R>,
    ) {
        let on_ground = self.on_ground(world);

        match self.state {
            PlayerState::Sitting => {
                if keys.left || keys.right {
                    self.set_state(PlayerState::Running, world, ctx.session);
                } else if keys.roll {
                    self.set_state(PlayerState::Rolling, world, ctx.session);
                }
            }
            PlayerState::Running => {
                ctx.particles.push(Particle::dust(
                    self.x + self.width * 0.6,
                    self.y + self.height,
                    &mut *ctx.rng,
                ));
                if keys.down {
                    self.set_state(PlayerState::Sitting, world, ctx.session);
                } else if keys.up {
                    self.set_state(PlayerState::Jumping, world, ctx.session);
                } else if keys.roll {
                    self.set_state(PlayerState::Rolling, world, ctx.session);
                }
            }
            PlayerState::Jumping => {
                if self.vy > WEIGHT {
                    self.set_state(PlayerState::Falling, world, ctx.session);
                } else if keys.roll {
                    self.set_state(PlayerState::Rolling, world, ctx.session);
                } else if keys.down {
                    self.set_state(PlayerState::Diving, world, ctx.session);
                }
            }
            PlayerState::Falling => {
                if on_ground {
                    self.set_state(PlayerState::Running, world, ctx.session);
                } else if keys.down {
                    self.set_state(PlayerState::Diving, world, ctx.session);
                }
            }
            PlayerState::Rolling => {
                self.emit_fire(ctx);
                if !keys.roll && on_ground {
                    self.set_state(PlayerState::Running, world, ctx.session);
                } else if !keys.roll && !on_ground {
                    self.set_state(PlayerState::Falling, world, ctx.session);
                } else if keys.roll && keys.up && on_ground {
                    self.vy -= JUMP_IMPULSE;
                } else if keys.down && !on_ground {
                    self.set_state(PlayerState::Diving, world, ctx.session);
                }
            }
            PlayerState::Diving => {
                self.emit_fire(ctx);
                if on_ground {
                    self.set_state(PlayerState::Running, world, ctx.session);
                    for _ in 0..SPLASH_COUNT {
                        ctx.particles.push(Particle::splash(
                            self.x + self.width * 0.5,
                            self.y + self.height,
                            &mut *ctx.rng,
                        ));
                    }
                }
            }
            PlayerState::Hit => {
                if self.frame_x >= HIT_RECOVERY_FRAME {
                    let next = if on_ground {
                        PlayerState::Running
                    } else {
                        PlayerState::Falling
                    };
                    self.set_state(next, world, ctx.session);
                }
            }
        }
    }

    fn emit_fire<R: Rng>(&self, ctx: &mut PlayerContext<'_, R>) {
        ctx.particles.push(Particle::fire(
            self.x + self.width * 0.5,
            self.y + self.height * 0.5,
            &mut *ctx.rng,
        ));
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let row = self.state.sprite_row();
        let column = PLAYER.looping_column(self.frame_x, row);
        surface.draw_sprite(&PLAYER, column, row, self.bounds());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Entity, ParticleKind};
    use crate::settings::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Harness {
        world: WorldView,
        session: SessionState,
        particles: EntityPool<Particle>,
        rng: Pcg32,
        player: Player,
    }

    impl Harness {
        fn new() -> Self {
            let world = WorldView {
                speed: 0.0,
                width: 900.0,
                height: 500.0,
                ground_margin: 80.0,
            };
            Self {
                world,
                session: SessionState::new(&Settings::default()),
                particles: EntityPool::new(),
                rng: Pcg32::seed_from_u64(1),
                player: Player::new(&world, 10.0),
            }
        }

        fn step(&mut self, keys: InputKeys) {
            let mut ctx = PlayerContext {
                session: &mut self.session,
                particles: &mut self.particles,
                rng: &mut self.rng,
            };
            self.player.update(&keys, 16.0, &self.world, &mut ctx);
        }
    }

    fn keys() -> InputKeys {
        InputKeys::default()
    }

    #[test]
    fn test_player_starts_sitting_on_ground() {
        let harness = Harness::new();
        assert_eq!(harness.player.state(), PlayerState::Sitting);
        assert!(harness.player.on_ground(&harness.world));
        assert_eq!(harness.session.speed, 0.0);
    }

    #[test]
    fn test_moving_starts_running_and_scrolls_world() {
        let mut harness = Harness::new();
        harness.step(InputKeys {
            right: true,
            ..keys()
        });
        assert_eq!(harness.player.state(), PlayerState::Running);
        assert_eq!(harness.session.speed, 3.0);
        assert_eq!(harness.player.speed, 10.0);
    }

    #[test]
    fn test_running_kicks_up_dust() {
        let mut harness = Harness::new();
        harness.step(InputKeys {
            right: true,
            ..keys()
        });
        harness.step(InputKeys {
            right: true,
            ..keys()
        });
        assert_eq!(harness.particles.len(), 1);
        assert!(harness.particles.iter().all(|p| p.kind == ParticleKind::Dust));
    }

    #[test]
    fn test_rolling_doubles_world_speed() {
        let mut harness = Harness::new();
        harness.step(InputKeys {
            roll: true,
            ..keys()
        });
        assert_eq!(harness.player.state(), PlayerState::Rolling);
        assert!(harness.player.state().is_attacking());
        assert_eq!(harness.session.speed, 6.0);
    }

    #[test]
    fn test_jump_leaves_ground_and_falls_back() {
        let mut harness = Harness::new();
        harness.step(InputKeys {
            right: true,
            ..keys()
        });
        harness.step(InputKeys { up: true, ..keys() });
        assert_eq!(harness.player.state(), PlayerState::Jumping);
        assert!(!harness.player.on_ground(&harness.world));

        let mut saw_falling = false;
        for _ in 0..120 {
            harness.step(keys());
            saw_falling |= harness.player.state() == PlayerState::Falling;
            if harness.player.state() == PlayerState::Running {
                break;
            }
        }
        assert!(saw_falling);
        assert_eq!(harness.player.state(), PlayerState::Running);
        assert!(harness.player.on_ground(&harness.world));
    }

    #[test]
    fn test_dive_landing_splashes() {
        let mut harness = Harness::new();
        harness.step(InputKeys {
            right: true,
            ..keys()
        });
        harness.step(InputKeys { up: true, ..keys() });
        harness.step(InputKeys {
            down: true,
            ..keys()
        });
        assert_eq!(harness.player.state(), PlayerState::Diving);
        assert_eq!(harness.session.speed, 0.0);

        for _ in 0..60 {
            harness.step(keys());
            if harness.player.state() != PlayerState::Diving {
                break;
            }
        }
        assert_eq!(harness.player.state(), PlayerState::Running);
        let splashes = harness
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Splash)
            .count();
        assert_eq!(splashes, SPLASH_COUNT);
    }

    #[test]
    fn test_hit_blocks_movement_until_recovered() {
        let mut harness = Harness::new();
        let world = harness.world;
        harness
            .player
            .set_state(PlayerState::Hit, &world, &mut harness.session);
        harness.step(InputKeys {
            right: true,
            ..keys()
        });
        assert_eq!(harness.player.speed, 0.0);

        for _ in 0..200 {
            harness.step(keys());
            if harness.player.state() != PlayerState::Hit {
                break;
            }
        }
        assert_eq!(harness.player.state(), PlayerState::Running);
    }

    #[test]
    fn test_player_stays_on_screen() {
        let mut harness = Harness::new();
        for _ in 0..10 {
            harness.step(InputKeys {
                left: true,
                ..keys()
            });
        }
        assert_eq!(harness.player.x, 0.0);

        for _ in 0..200 {
            harness.step(InputKeys {
                right: true,
                ..keys()
            });
        }
        assert_eq!(harness.player.x, 800.0);
    }

    #[test]
    fn test_rolling_trails_fire() {
        let mut harness = Harness::new();
        harness.step(InputKeys {
            roll: true,
            ..keys()
        });
        harness.step(InputKeys {
            roll: true,
            ..keys()
        });
        assert_eq!(harness.particles.len(), 1);
        assert!(harness.particles.iter().all(|p| p.kind == ParticleKind::Fire));
        assert!(!harness.particles.iter().any(|p| p.is_marked_for_deletion()));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_never_leaves_playfield(
                inputs in prop::collection::vec(
                    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                    1..300
                )
            ) {
                let mut harness = Harness::new();
                for (up, down, left, right, roll) in inputs {
                    harness.step(InputKeys { up, down, left, right, roll });
                    let bounds = harness.player.bounds();
                    prop_assert!(bounds.x >= 0.0);
                    prop_assert!(bounds.right() <= 900.0);
                    prop_assert!(bounds.bottom() <= 420.0 + 1e-9);
                }
            }
        }
    }
}
