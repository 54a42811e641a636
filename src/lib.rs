// Library exports for testing
pub use entities::{
    CollisionAnimation, Enemy, EnemyKind, Entity, FloatingMessage, Movement, Particle,
    ParticleKind, Player, PlayerState, WorldView,
};
pub use game::{Game, GameEvent};
pub use game_loop::{GameLoop, LoopControl};
pub use input::InputKeys;
pub use pool::EntityPool;
pub use session::{Outcome, SessionState};
pub use settings::Settings;
pub use spawner::SpawnScheduler;
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use timer::IntervalTimer;

pub mod app;
pub mod audio;
pub mod background;
pub mod collision;
pub mod entities;
pub mod game;
pub mod game_loop;
pub mod hud;
pub mod input;
pub mod pool;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod spawner;
pub mod sprites;
pub mod surface;
pub mod timer;
