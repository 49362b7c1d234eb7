/// Random level construction.
///
/// A level of `width × height` gets `max(area / 10, 1)` target/box pairs.
/// The player is placed first, then the targets, then the boxes, each by
/// rejection sampling: draw a uniform interior cell, retry while it is
/// taken. Interior means at least one cell off every border, which keeps
/// freshly spawned boxes pushable in all four directions.
///
/// Retries are bounded. A board too small for its entity count fails
/// construction with an error instead of spinning on a full grid.

use log::debug;
use rand::Rng;

use crate::domain::board::Board;
use crate::domain::entity::{Entity, Pos};

/// Placement attempts per entity, as a multiple of the interior cell count.
const TRIES_PER_CELL: i64 = 16;

/// Number of target/box pairs for a board of the given size.
pub fn pair_count(width: i32, height: i32) -> u32 {
    ((width * height) / 10).max(1) as u32
}

/// Build one level. `Err` means the dimensions cannot host the layout.
pub fn generate<R: Rng>(width: i32, height: i32, rng: &mut R) -> Result<Board, String> {
    let interior_w = width - 2;
    let interior_h = height - 2;
    if interior_w < 1 || interior_h < 1 {
        return Err(format!(
            "board {}x{} has no interior to place pieces in",
            width, height
        ));
    }

    let pairs = pair_count(width, height);
    let needed = 1 + 2 * pairs as i64;
    let interior_cells = interior_w as i64 * interior_h as i64;
    if needed > interior_cells {
        return Err(format!(
            "board {}x{} cannot fit {} pieces in {} interior cells",
            width, height, needed, interior_cells
        ));
    }

    let mut entities = vec![Entity::player(place(width, height, &[], rng)?)];
    for _ in 0..pairs {
        let pos = place(width, height, &positions(&entities), rng)?;
        entities.push(Entity::target(pos));
    }
    for _ in 0..pairs {
        let pos = place(width, height, &positions(&entities), rng)?;
        entities.push(Entity::pushable_box(pos));
    }

    debug!(
        "generated {}x{} level: {} pairs, {} entities",
        width,
        height,
        pairs,
        entities.len()
    );
    Ok(Board::new(width, height, entities))
}

fn positions(entities: &[Entity]) -> Vec<Pos> {
    entities.iter().map(|e| e.pos).collect()
}

/// One bounded rejection-sampled interior cell not in `taken`.
fn place<R: Rng>(width: i32, height: i32, taken: &[Pos], rng: &mut R) -> Result<Pos, String> {
    let interior_cells = (width - 2) as i64 * (height - 2) as i64;
    let tries = interior_cells * TRIES_PER_CELL;
    for _ in 0..tries {
        // x ∈ [1, width-2], y ∈ [2, height-1]: one cell clear of each wall
        let pos = Pos::new(rng.gen_range(1..width - 1), rng.gen_range(2..height));
        if !taken.contains(&pos) {
            return Ok(pos);
        }
    }
    Err(format!(
        "gave up placing a piece after {} tries on a {}x{} board",
        tries, width, height
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn generated_board_has_player_and_pairs() {
        let b = generate(10, 10, &mut rng(1)).unwrap();
        let pairs = pair_count(10, 10) as usize;
        assert_eq!(pairs, 10);
        assert_eq!(b.entities.len(), 1 + 2 * pairs);
        assert!(!b.entities[0].is_box && !b.entities[0].is_target);
        assert_eq!(b.entities.iter().filter(|e| e.is_target).count(), pairs);
        assert_eq!(b.entities.iter().filter(|e| e.is_box).count(), pairs);
        assert_eq!(b.target_score, pairs as u32);
    }

    #[test]
    fn no_two_entities_share_a_cell() {
        for seed in 0..20 {
            let b = generate(8, 8, &mut rng(seed)).unwrap();
            for (i, a) in b.entities.iter().enumerate() {
                for other in &b.entities[i + 1..] {
                    assert_ne!(a.pos, other.pos, "seed {} placed an overlap", seed);
                }
            }
        }
    }

    #[test]
    fn placement_stays_clear_of_the_border() {
        for seed in 0..20 {
            let b = generate(6, 9, &mut rng(seed)).unwrap();
            for e in &b.entities {
                assert!(e.pos.x >= 1 && e.pos.x <= 4, "x on border: {:?}", e.pos);
                assert!(e.pos.y >= 2 && e.pos.y <= 8, "y on border: {:?}", e.pos);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_board() {
        let a = generate(10, 12, &mut rng(42)).unwrap();
        let b = generate(10, 12, &mut rng(42)).unwrap();
        assert_eq!(a.entities, b.entities);
    }

    #[test]
    fn minimum_board_still_generates() {
        let b = generate(4, 4, &mut rng(3)).unwrap();
        assert_eq!(b.target_score, 1);
        assert_eq!(b.entities.len(), 3);
    }

    #[test]
    fn degenerate_boards_fail_instead_of_hanging() {
        assert!(generate(3, 3, &mut rng(0)).is_err());
        assert!(generate(2, 10, &mut rng(0)).is_err());
        // Interior too small for the derived entity count.
        assert!(generate(4, 3, &mut rng(0)).is_err());
    }
}
