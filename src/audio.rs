use log::{info, warn};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::time::Duration;

use crate::game::GameEvent;

/// Short synthesized sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Player defeated an enemy
    Pop,
    /// Player got hit
    Thud,
}

impl Cue {
    fn frequency(self) -> f32 {
        match self {
            Cue::Pop => 880.0,
            Cue::Thud => 110.0,
        }
    }

    fn duration(self) -> Duration {
        match self {
            Cue::Pop => Duration::from_millis(60),
            Cue::Thud => Duration::from_millis(150),
        }
    }

    /// Sound for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::EnemyDefeated { .. } => Some(Cue::Pop),
            GameEvent::PlayerHit { .. } => Some(Cue::Thud),
            GameEvent::EnemySpawned { .. } | GameEvent::GameOver { .. } => None,
        }
    }
}

/// Plays cues on the default output device, or nothing when there is none
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    volume: f32,
}

impl AudioManager {
    /// Opens the default output device
    pub fn new() -> Result<Self, rodio::StreamError> {
        let output = OutputStream::try_default()?;
        Ok(Self {
            output: Some(output),
            volume: 0.05,
        })
    }

    /// Manager that never plays anything
    pub fn silent() -> Self {
        Self {
            output: None,
            volume: 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn play(&self, cue: Cue) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        // Playback errors are not worth stopping the game for
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(self.volume);
            sink.append(SineWave::new(cue.frequency()).take_duration(cue.duration()));
            sink.detach();
        }
    }

    pub fn play_for(&self, event: &GameEvent) {
        if let Some(cue) = Cue::for_event(event) {
            self.play(cue);
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|err| {
            warn!("Failed to initialize audio: {err}, continuing without sound");
            Self::silent()
        })
    }
}

/// Audio as configured: silent when sound is turned off
pub fn from_settings(sound: bool) -> AudioManager {
    if sound {
        AudioManager::default()
    } else {
        info!("Sound disabled in settings");
        AudioManager::silent()
    }
}
