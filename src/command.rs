use crate::engine::{Direction, Intent, LifecycleState, Snapshot};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Pause,
    R,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (KeyModifiers::NONE, KeyCode::Char('p' | ' ') | KeyCode::Esc) => Some(Command::Pause),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::R),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            _ => None,
        }
    }

    /// Translate the command into the intent it stands for in the game's
    /// current state.  Returns `None` for commands with no meaning there
    /// (including the quit commands, which the caller handles itself).
    pub(crate) fn to_intent(self, snapshot: &Snapshot<'_>) -> Option<Intent> {
        use LifecycleState::{GameOver, LevelComplete, NotStarted, Playing};
        match (self, snapshot.state) {
            (Command::Up, _) => Some(Intent::SetDirection(Direction::Up)),
            (Command::Down, _) => Some(Intent::SetDirection(Direction::Down)),
            (Command::Left, _) => Some(Intent::SetDirection(Direction::Left)),
            (Command::Right, _) => Some(Intent::SetDirection(Direction::Right)),
            (Command::Enter, NotStarted) => Some(Intent::Start),
            (Command::Enter | Command::R, GameOver) => Some(Intent::Restart),
            (Command::Enter, LevelComplete) => Some(Intent::Continue),
            (Command::Enter, Playing) if snapshot.paused => Some(Intent::TogglePause),
            (Command::Pause, Playing) => Some(Intent::TogglePause),
            (Command::R, Playing) => Some(Intent::Reset),
            _ => None,
        }
    }
}
