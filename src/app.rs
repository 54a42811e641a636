use color_eyre::Result;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::{self, AudioManager};
use crate::game::{Game, GameEvent};
use crate::game_loop::{GameLoop, LoopControl};
use crate::input::{InputAction, InputManager};
use crate::renderer::TerminalSurface;
use crate::settings::Settings;
use crate::surface::Surface;

/// The main application: owns the game and everything that talks to the
/// outside world.
pub struct App {
    running: bool,
    /// Set once the loop has stopped; the last frame stays up until quit
    finished: bool,
    world_width: f64,
    world_height: f64,
    frame_sleep: Duration,
    /// Start of the frame clock, taken at the first frame
    epoch: Option<Instant>,
    game: Game,
    game_loop: GameLoop,
    input_manager: InputManager,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: &Settings, reports_key_release: bool) -> Self {
        Self {
            running: true,
            finished: false,
            world_width: settings.width,
            world_height: settings.height,
            frame_sleep: Duration::from_millis(settings.frame_sleep_ms),
            epoch: None,
            game: Game::new(settings),
            game_loop: GameLoop::new(settings.max_frame_delta),
            input_manager: InputManager::new(reports_key_release),
            audio_manager: audio::from_settings(settings.sound),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            self.input_manager.poll_events()?;
            self.process_actions();
            if !self.running {
                break;
            }

            let now = Instant::now();
            if self.finished {
                self.redraw(terminal)?;
            } else {
                self.tick(terminal, now)?;
            }

            for event in self.game.drain_events() {
                self.handle_event(&event);
            }

            std::thread::sleep(self.frame_sleep);
        }
        Ok(())
    }

    fn process_actions(&mut self) {
        for action in self.input_manager.actions().to_vec() {
            match action {
                InputAction::Quit => {
                    info!("Quit requested");
                    self.running = false;
                }
                InputAction::ToggleDebug => self.game.toggle_debug(),
            }
        }
        self.input_manager.clear_actions();
    }

    /// Milliseconds since the first frame; the first frame is at 0
    fn timestamp(&mut self, now: Instant) -> f64 {
        let epoch = *self.epoch.get_or_insert(now);
        now.duration_since(epoch).as_secs_f64() * 1000.0
    }

    fn tick(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, now: Instant) -> Result<()> {
        let timestamp = self.timestamp(now);
        let keys = self.input_manager.keys_at(now);
        let (width, height) = (self.world_width, self.world_height);
        let game_loop = &mut self.game_loop;
        let game = &mut self.game;

        let mut control = LoopControl::Continue;
        terminal.draw(|frame| {
            let area = frame.area();
            let mut surface = TerminalSurface::new(frame.buffer_mut(), area, width, height);
            control = game_loop.animate(timestamp, &keys, game, &mut surface);
        })?;

        if control == LoopControl::Stop {
            info!("Game loop stopped, waiting for quit");
            self.finished = true;
        }
        Ok(())
    }

    /// Draws the current state without advancing it
    fn redraw(&self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            let mut surface = TerminalSurface::new(frame.buffer_mut(), area, self.world_width, self.world_height);
            surface.clear();
            self.game.draw(&mut surface);
        })?;
        Ok(())
    }

    fn handle_event(&self, event: &GameEvent) {
        debug!("{event:?}");
        self.audio_manager.play_for(event);
    }
}
