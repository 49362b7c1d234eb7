/// Presentation layer: status line + bordered glyph grid.
///
/// The game redraws once per keypress, so there is no frame pacing and
/// no diffing — every turn the full frame is queued with `queue!` and
/// flushed in one write. Grid composition is a pure function of board
/// state and the glyph table; the crossterm layer only positions lines.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::GlyphConfig;
use crate::domain::board::Board;
use crate::domain::entity::{Kind, Pos};
use crate::sim::world::{GameState, Phase};

/// Vertical offsets
const STATUS_ROW: u16 = 0;
const GRID_ROW: u16 = 2;

/// Padding between grid columns, matching the board's visual aspect.
const CELL_GAP: &str = "  ";

// ── Grid composition (pure) ──

/// Glyph for one cell: the visible occupant with the highest draw order,
/// or the background glyph for empty cells and cells whose only occupants
/// are hidden.
fn cell_glyph<'a>(board: &Board, pos: Pos, glyphs: &'a GlyphConfig) -> &'a str {
    board
        .entities
        .iter()
        .filter(|e| e.visible && e.pos == pos)
        .max_by_key(|e| e.draw_order)
        .map(|e| match e.kind {
            Kind::Player => glyphs.player.as_str(),
            Kind::Box => glyphs.box_.as_str(),
            Kind::CapturedBox => glyphs.captured.as_str(),
            Kind::Target => glyphs.target.as_str(),
            Kind::Decoration => glyphs.background.as_str(),
        })
        .unwrap_or(glyphs.background.as_str())
}

/// Render the board to text lines: wall border all around, rows from
/// `height` down to 1 so that increasing y points up the screen.
pub fn compose_grid(board: &Board, glyphs: &GlyphConfig) -> Vec<String> {
    let border: String = vec![glyphs.wall.as_str(); board.width as usize + 2].join(CELL_GAP);

    let mut lines = Vec::with_capacity(board.height as usize + 2);
    lines.push(border.clone());
    for y in (1..=board.height).rev() {
        let mut cells = Vec::with_capacity(board.width as usize + 2);
        cells.push(glyphs.wall.as_str());
        for x in 0..board.width {
            cells.push(cell_glyph(board, Pos::new(x, y), glyphs));
        }
        cells.push(glyphs.wall.as_str());
        lines.push(cells.join(CELL_GAP));
    }
    lines.push(border);
    lines
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    /// Level rendered last frame; boards differ in size, so a level
    /// change wipes the screen before the new grid is laid down.
    last_level: Option<usize>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            last_level: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &GameState, glyphs: &GlyphConfig) -> io::Result<()> {
        let board = world.board();

        if self.last_level != Some(world.level_index()) {
            queue!(self.writer, Clear(ClearType::All))?;
            self.last_level = Some(world.level_index());
        }

        self.draw_status(world)?;

        let grid = compose_grid(board, glyphs);
        for (i, line) in grid.iter().enumerate() {
            queue!(
                self.writer,
                MoveTo(0, GRID_ROW + i as u16),
                Clear(ClearType::UntilNewLine),
                SetForegroundColor(Color::White),
                Print(line)
            )?;
        }

        let message_row = GRID_ROW + grid.len() as u16 + 1;
        queue!(
            self.writer,
            MoveTo(0, message_row),
            Clear(ClearType::UntilNewLine),
            SetForegroundColor(Color::Yellow),
            Print(&world.message)
        )?;

        let help = match world.phase {
            Phase::Playing => " move: wasd / arrows   reset: r   quit: q",
            Phase::GameComplete => " press any key to exit",
        };
        queue!(
            self.writer,
            MoveTo(0, message_row + 1),
            Clear(ClearType::UntilNewLine),
            SetForegroundColor(Color::DarkGrey),
            Print(help)
        )?;

        self.writer.flush()
    }

    fn draw_status(&mut self, world: &GameState) -> io::Result<()> {
        let board = world.board();
        let player = board.player();
        // Red score until the first capture, green after.
        let score_color = if board.score == 0 { Color::Red } else { Color::Green };

        queue!(
            self.writer,
            MoveTo(0, STATUS_ROW),
            Clear(ClearType::UntilNewLine),
            SetForegroundColor(Color::DarkGrey),
            Print(" Score: "),
            SetForegroundColor(score_color),
            Print(format!("{}/{}", board.score, board.target_score)),
            SetForegroundColor(Color::DarkGrey),
            Print("   Level: "),
            SetForegroundColor(Color::DarkYellow),
            Print(format!("{}/{}", world.level_index() + 1, world.level_count())),
            SetForegroundColor(Color::DarkGrey),
            Print("   Player: "),
            SetForegroundColor(Color::White),
            Print(format!("({}, {})", player.pos.x, player.pos.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::PLAYER;
    use crate::domain::entity::{Dir, Entity};

    fn glyphs() -> GlyphConfig {
        GlyphConfig {
            player: "@".into(),
            box_: "o".into(),
            captured: "v".into(),
            target: "x".into(),
            background: ".".into(),
            wall: "#".into(),
        }
    }

    fn sample_board() -> Board {
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
    fn grid_has_border_rows_and_top_down_body() {
        let lines = compose_grid(&sample_board(), &glyphs());
        assert_eq!(lines.len(), 6); // height + 2 borders
        assert_eq!(lines[0], "#  #  #  #  #  #");
        assert_eq!(lines[5], lines[0]);
        // y = 4 (empty) is the first body row, y = 3 holds the player.
        assert_eq!(lines[1], "#  .  .  .  .  #");
        assert_eq!(lines[2], "#  .  .  @  .  #");
        assert_eq!(lines[3], "#  .  .  o  .  #");
        assert_eq!(lines[4], "#  .  .  x  .  #");
    }

    #[test]
    fn captured_target_stops_rendering() {
        let mut board = sample_board();
        assert!(board.move_entity(PLAYER, Dir::Down));
        let lines = compose_grid(&board, &glyphs());
        // Box (now the captured glyph) sits where the target was.
        assert_eq!(lines[4], "#  .  .  v  .  #");
        assert_eq!(lines[3], "#  .  .  @  .  #");
        assert!(!lines.iter().any(|l| l.contains('x')));
    }

    #[test]
    fn player_shadows_the_target_it_stands_on() {
        let mut board = Board::new(
            4,
            4,
            vec![Entity::player(Pos::new(1, 2)), Entity::target(Pos::new(2, 2))],
        );
        assert!(board.move_entity(PLAYER, Dir::Right));
        let lines = compose_grid(&board, &glyphs());
        assert_eq!(lines[3], "#  .  .  @  .  #");
        // Step off: the target renders again.
        assert!(board.move_entity(PLAYER, Dir::Right));
        let lines = compose_grid(&board, &glyphs());
        assert_eq!(lines[3], "#  .  .  x  @  #");
    }

    #[test]
    fn decoration_renders_as_background() {
        let board = Board::new(
            4,
            4,
            vec![Entity::player(Pos::new(1, 2)), Entity::decoration(Pos::new(2, 2))],
        );
        let lines = compose_grid(&board, &glyphs());
        assert_eq!(lines[3], "#  .  @  .  .  #");
    }
}
