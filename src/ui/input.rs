/// Keyboard input: one command per turn.
///
/// The game is strictly turn-based, so input is a single blocking read:
/// wait for a key event, map it, and hand exactly one command back to the
/// loop. Keys with no mapping are swallowed without consuming a turn —
/// the read just continues.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::entity::{Dir, TurnCommand};

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESET: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Map one key event to a command. None = unrecognized, keep waiting.
pub fn command_for(key: KeyEvent) -> Option<TurnCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && (key.code == KeyCode::Char('c') || key.code == KeyCode::Char('C'))
    {
        return Some(TurnCommand::Quit);
    }
    let code = key.code;
    if KEYS_UP.contains(&code) {
        Some(TurnCommand::Move(Dir::Up))
    } else if KEYS_DOWN.contains(&code) {
        Some(TurnCommand::Move(Dir::Down))
    } else if KEYS_LEFT.contains(&code) {
        Some(TurnCommand::Move(Dir::Left))
    } else if KEYS_RIGHT.contains(&code) {
        Some(TurnCommand::Move(Dir::Right))
    } else if KEYS_RESET.contains(&code) {
        Some(TurnCommand::Reset)
    } else if KEYS_QUIT.contains(&code) {
        Some(TurnCommand::Quit)
    } else {
        None
    }
}

/// Block until the next recognized keypress.
pub fn read_command() -> io::Result<TurnCommand> {
    loop {
        if let Event::Key(key) = event::read()? {
            // Enhanced-keyboard terminals report releases too; a turn is
            // taken on press only.
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if let Some(cmd) = command_for(key) {
                return Ok(cmd);
            }
        }
    }
}

/// Block until any keypress at all. Used on the final screen.
pub fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}
