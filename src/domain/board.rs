/// Board: the per-level grid state and its move/push resolution.
///
/// One flat entity list, player at index 0. Coordinates are
/// `x ∈ [0, width)`, `y ∈ [1, height]`, y growing upward. There is no
/// tile layer: walls exist only as the border, everything else is an
/// entity found by linear scan.
///
/// ## Push resolution
///
/// A move walks the straight line of pushable occupants in front of the
/// mover (an explicit loop — a chain longer than `max(width, height)`
/// cannot occur on a well-formed board and fails the move instead of
/// recursing away). The walk ends at:
///   - an empty or background cell → the whole chain advances
///   - a target → capture if the chain head is a box, then advance
///   - a wall, an obstructing entity, or the border → nothing moves
///
/// Failure is a bare `bool`: false always means "state unchanged".

use log::debug;

use super::entity::{Dir, Entity, Pos};

#[derive(Clone, Debug)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    /// Index 0 is the player.
    pub entities: Vec<Entity>,
    /// Captures completed on this board.
    pub score: u32,
    /// Captures needed to complete the board.
    pub target_score: u32,
    /// Entity list as constructed, restored on reset.
    initial: Vec<Entity>,
}

/// Conventional index of the player entity.
pub const PLAYER: usize = 0;

impl Board {
    /// Build a board from an already-placed entity list (index 0 = player).
    /// The capture total is the number of targets present.
    pub fn new(width: i32, height: i32, entities: Vec<Entity>) -> Self {
        let target_score = entities.iter().filter(|e| e.is_target).count() as u32;
        Board {
            width,
            height,
            initial: entities.clone(),
            entities,
            score: 0,
            target_score,
        }
    }

    pub fn player(&self) -> &Entity {
        &self.entities[PLAYER]
    }

    pub fn is_complete(&self) -> bool {
        self.score == self.target_score
    }

    /// Out-of-board parking spot for removed entities. Far enough out
    /// that no in-bounds query ever matches it.
    fn sentinel(&self) -> Pos {
        Pos::new(self.width * 4, self.height * 4)
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 1 && pos.y <= self.height
    }

    // ── Spatial query ──

    /// First entity at `pos`, in list order. List order matters: the
    /// player (index 0) shadows a target it is standing on. Linear scan;
    /// entity counts are board-area / 10, an index isn't worth carrying.
    pub fn find(&self, pos: Pos) -> Option<usize> {
        self.entities.iter().position(|e| e.pos == pos)
    }

    // ── Move / push resolution ──

    /// Move `entities[idx]` one step in `dir`, pushing whatever pushable
    /// chain sits in front of it. Returns false with no mutation if the
    /// move is blocked.
    pub fn move_entity(&mut self, idx: usize, dir: Dir) -> bool {
        let max_chain = self.width.max(self.height) as usize;
        let mut chain: Vec<usize> = vec![idx];
        // (box, target) pair when the chain head lands on a target
        let mut capture: Option<(usize, usize)> = None;

        loop {
            let head = *chain.last().unwrap();
            let dest = self.entities[head].pos.step(dir);
            if !self.in_bounds(dest) {
                return false;
            }
            let occupant = match self.find(dest) {
                None => break,
                Some(i) => i,
            };
            let occ = &self.entities[occupant];
            if occ.obstructs {
                return false;
            }
            if occ.is_background {
                break;
            }
            if occ.is_target {
                if self.entities[head].is_box {
                    capture = Some((head, occupant));
                }
                // A non-box mover steps onto the target without capturing.
                break;
            }
            // Pushable occupant: it must move for the chain to move.
            if chain.len() >= max_chain {
                return false;
            }
            chain.push(occupant);
        }

        if let Some((box_idx, target_idx)) = capture {
            self.score += 1;
            self.entities[box_idx].mark_captured();
            let sentinel = self.sentinel();
            self.entities[target_idx].remove_to(sentinel);
            debug!(
                "capture at {:?}: score {}/{}",
                self.entities[box_idx].pos.step(dir),
                self.score,
                self.target_score
            );
        }

        let (dx, dy) = dir.delta();
        for &i in &chain {
            self.entities[i].pos.x += dx;
            self.entities[i].pos.y += dy;
        }
        true
    }

    // ── Reset ──

    /// Restore the board to its constructed state and zero the score.
    pub fn reset(&mut self) {
        self.entities = self.initial.clone();
        self.score = 0;
    }
}
