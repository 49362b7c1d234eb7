/// The turn function: applies one command to the world.
///
/// Processing order:
///   1. Apply the command (move or reset) to the current board
///   2. Check completion: score == target → level cleared
///   3. Last level cleared → terminal phase; otherwise advance
///
/// A blocked move is not an error: the board is unchanged and no event
/// is emitted for it. Quit never reaches here — the loop handles it.

use crate::domain::board::PLAYER;
use crate::domain::entity::TurnCommand;
use super::event::GameEvent;
use super::world::{GameState, Phase};

pub fn step(world: &mut GameState, command: TurnCommand) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let mut events: Vec<GameEvent> = Vec::new();

    match command {
        TurnCommand::Move(dir) => {
            let score_before = world.board().score;
            if world.board_mut().move_entity(PLAYER, dir) && world.board().score > score_before {
                events.push(GameEvent::BoxCaptured {
                    score: world.board().score,
                    total: world.board().target_score,
                });
            }
        }
        TurnCommand::Reset => {
            world.board_mut().reset();
            events.push(GameEvent::LevelReset);
        }
        TurnCommand::Quit => {}
    }

    if world.board().is_complete() {
        events.push(GameEvent::LevelComplete { index: world.level_index() });
        if world.on_last_level() {
            world.phase = Phase::GameComplete;
            events.push(GameEvent::GameComplete);
        } else {
            world.advance();
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Board;
    use crate::domain::entity::{Dir, Entity, Pos};

    /// 4×4 board with one box one step below the player and the target
    /// below that: a single push down completes it.
    fn push_line_board() -> Board {
        Board::new(
            4,
            4,
            vec![
                Entity::player(Pos::new(2, 3)),
                Entity::target(Pos::new(2, 1)),
                Entity::pushable_box(Pos::new(2, 2)),
            ],
        )
    }

    #[test]
    fn two_pushes_down_complete_a_single_level_game() {
        let mut w = GameState::new(vec![push_line_board()]);

        let events = step(&mut w, TurnCommand::Move(Dir::Down));
        // First push drives the box onto the target: capture + clear.
        assert!(matches!(events[0], GameEvent::BoxCaptured { score: 1, total: 1 }));
        assert!(matches!(events[1], GameEvent::LevelComplete { index: 0 }));
        assert!(matches!(events[2], GameEvent::GameComplete));
        assert_eq!(w.board().score, 1);
        assert_eq!(w.phase, Phase::GameComplete);

        // Further input is inert in the terminal phase.
        let events = step(&mut w, TurnCommand::Move(Dir::Down));
        assert!(events.is_empty());
        assert_eq!(w.board().score, 1);
    }

    #[test]
    fn clearing_a_level_advances_to_a_fresh_board() {
        let mut w = GameState::new(vec![push_line_board(), push_line_board()]);

        let events = step(&mut w, TurnCommand::Move(Dir::Down));
        assert!(matches!(events.last(), Some(GameEvent::LevelComplete { index: 0 })));
        assert_eq!(w.phase, Phase::Playing);
        assert_eq!(w.level_index(), 1);
        // The next board starts untouched.
        assert_eq!(w.board().score, 0);
        assert_eq!(w.board().player().pos, Pos::new(2, 3));
    }

    #[test]
    fn blocked_move_emits_nothing_and_changes_nothing() {
        let mut w = GameState::new(vec![push_line_board()]);
        // Right edge: x = width is a wall no matter the board contents.
        w.board_mut().entities[PLAYER].pos = Pos::new(3, 3);
        let events = step(&mut w, TurnCommand::Move(Dir::Right));
        assert!(events.is_empty());
        assert_eq!(w.board().player().pos, Pos::new(3, 3));
    }

    #[test]
    fn reset_mid_level_restores_the_starting_layout() {
        let mut w = GameState::new(vec![push_line_board(), push_line_board()]);
        step(&mut w, TurnCommand::Move(Dir::Left));

        let events = step(&mut w, TurnCommand::Reset);
        assert!(matches!(events[0], GameEvent::LevelReset));
        assert_eq!(w.board().player().pos, Pos::new(2, 3));
        assert_eq!(w.board().score, 0);
        assert_eq!(w.level_index(), 0);
    }
}
