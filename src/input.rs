use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, trace};
use std::time::{Duration, Instant};

/// Without release events a key counts as held this long after its last press
const HOLD_WINDOW: Duration = Duration::from_millis(500);

/// Keys the player state machine reads each frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub roll: bool,
}

/// One-shot actions handled by the app rather than the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    ToggleDebug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameKey {
    Up,
    Down,
    Left,
    Right,
    Roll,
}

impl GameKey {
    const ALL: [GameKey; 5] = [
        GameKey::Up,
        GameKey::Down,
        GameKey::Left,
        GameKey::Right,
        GameKey::Roll,
    ];

    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(GameKey::Up),
            KeyCode::Down => Some(GameKey::Down),
            KeyCode::Left => Some(GameKey::Left),
            KeyCode::Right => Some(GameKey::Right),
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameKey::Roll),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Turns raw key events into held keys and one-shot actions.
///
/// Terminals that report releases give exact hold state. Others only send
/// presses and auto-repeats, so a key stays held for [`HOLD_WINDOW`] after
/// the last one.
pub struct InputManager {
    pressed_at: [Option<Instant>; 5],
    reports_release: bool,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            pressed_at: [None; 5],
            reports_release,
            oneshot_actions: Vec::new(),
        }
    }

    /// Drains every pending terminal event without blocking
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, Instant::now());
            }
        }

        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        trace!("Key event: {:?} kind: {:?}", key_event.code, key_event.kind);

        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, now),
            KeyEventKind::Repeat => {
                if let Some(key) = GameKey::from_code(key_event.code) {
                    self.pressed_at[key.index()] = Some(now);
                }
            }
            KeyEventKind::Release => {
                if let Some(key) = GameKey::from_code(key_event.code) {
                    self.pressed_at[key.index()] = None;
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, now: Instant) {
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        if matches!(key_event.code, KeyCode::Char('d') | KeyCode::Char('D')) {
            debug!("Toggling debug overlay");
            self.oneshot_actions.push(InputAction::ToggleDebug);
            return;
        }

        if let Some(key) = GameKey::from_code(key_event.code) {
            self.pressed_at[key.index()] = Some(now);
        }
    }

    /// One-shot actions seen since the last poll
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    pub fn clear_actions(&mut self) {
        self.oneshot_actions.clear();
    }

    fn is_held(&self, key: GameKey, now: Instant) -> bool {
        match self.pressed_at[key.index()] {
            Some(_) if self.reports_release => true,
            Some(pressed) => now.saturating_duration_since(pressed) < HOLD_WINDOW,
            None => false,
        }
    }

    /// Held keys as of `now`
    pub fn keys_at(&self, now: Instant) -> InputKeys {
        let [up, down, left, right, roll] = GameKey::ALL.map(|key| self.is_held(key, now));
        InputKeys {
            up,
            down,
            left,
            right,
            roll,
        }
    }
}
