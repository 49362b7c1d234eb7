/// Events emitted during a turn.
/// The presentation layer consumes these for status messages.

#[derive(Clone, Copy, Debug)]
pub enum GameEvent {
    BoxCaptured { score: u32, total: u32 },
    LevelReset,
    LevelComplete { index: usize },
    GameComplete,
}
