use log::info;

use crate::settings::Settings;

/// How a finished run is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

/// Score, lives, countdown and world speed for one run.
///
/// `game_over` is a latch: any number of triggers may set it, nothing
/// clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub score: u32,
    pub lives: u32,
    /// Remaining time in milliseconds, may dip below zero on the last tick
    pub time: f64,
    pub max_time: f64,
    pub winning_score: u32,
    /// Current world scroll speed, set by the player's state
    pub speed: f64,
    pub max_speed: f64,
    game_over: bool,
}

impl SessionState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            score: 0,
            lives: settings.lives,
            time: settings.max_time,
            max_time: settings.max_time,
            winning_score: settings.winning_score,
            speed: 0.0,
            max_speed: settings.max_speed,
            game_over: false,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Latches the end of the run
    pub fn end(&mut self) {
        if !self.game_over {
            self.game_over = true;
            info!(
                "Game over: score {} lives {} time left {:.1}s",
                self.score,
                self.lives,
                self.remaining_seconds()
            );
        }
    }

    /// Counts the clock down; the run ends the moment it reaches zero
    pub fn advance_clock(&mut self, delta_ms: f64) {
        if self.time > 0.0 {
            self.time -= delta_ms;
        }
        if self.time <= 0.0 {
            self.end();
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Takes one life; losing the last one ends the run
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.end();
        }
    }

    /// Remaining time for display, never negative
    pub fn remaining_seconds(&self) -> f64 {
        (self.time * 0.001).max(0.0)
    }

    /// Win or lose once the run is over
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.game_over {
            None
        } else if self.score > self.winning_score {
            Some(Outcome::Win)
        } else {
            Some(Outcome::Lose)
        }
    }
}
