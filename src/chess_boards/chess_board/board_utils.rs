//! Coordinate helpers shared by move generation and the board.
//!
//! Tiles are numbered 0..63 row-major starting at a8, so row 0 is Black's back
//! rank and row 7 is White's. The file/rank masks and the algebraic table are
//! built once on first use and are read-only afterwards.

use lazy_static::lazy_static;
use std::collections::HashMap;

pub const NUM_TILES: usize = 64;
pub const NUM_TILES_PER_ROW: usize = 8;

pub const FIRST_FILE: usize = 0;
pub const SECOND_FILE: usize = 1;
pub const SEVENTH_FILE: usize = 6;
pub const EIGHTH_FILE: usize = 7;

// Ranks are indexed by board row, so the eighth rank comes first.
pub const EIGHTH_RANK: usize = 0;
pub const SEVENTH_RANK: usize = 1;
pub const SECOND_RANK: usize = 6;
pub const FIRST_RANK: usize = 7;

lazy_static! {
    pub static ref FILES: [[bool; NUM_TILES]; NUM_TILES_PER_ROW] = std::array::from_fn(init_file);
    pub static ref RANKS: [[bool; NUM_TILES]; NUM_TILES_PER_ROW] = std::array::from_fn(init_rank);
    pub static ref ALGEBRAIC_NOTATION: Vec<String> = init_algebraic_notation();
    static ref POSITION_TO_COORDINATE: HashMap<String, usize> = init_position_to_coordinate();
}

fn init_file(file: usize) -> [bool; NUM_TILES] {
    let mut mask = [false; NUM_TILES];
    for coordinate in (file..NUM_TILES).step_by(NUM_TILES_PER_ROW) {
        mask[coordinate] = true;
    }
    mask
}

fn init_rank(rank: usize) -> [bool; NUM_TILES] {
    let mut mask = [false; NUM_TILES];
    let start = rank * NUM_TILES_PER_ROW;
    for coordinate in start..start + NUM_TILES_PER_ROW {
        mask[coordinate] = true;
    }
    mask
}

fn init_algebraic_notation() -> Vec<String> {
    (0..NUM_TILES)
        .map(|coordinate| {
            let file = (b'a' + (coordinate % NUM_TILES_PER_ROW) as u8) as char;
            let rank = NUM_TILES_PER_ROW - coordinate / NUM_TILES_PER_ROW;
            format!("{}{}", file, rank)
        })
        .collect()
}

fn init_position_to_coordinate() -> HashMap<String, usize> {
    ALGEBRAIC_NOTATION
        .iter()
        .enumerate()
        .map(|(coordinate, position)| (position.clone(), coordinate))
        .collect()
}

pub fn is_on_file(file: usize, coordinate: usize) -> bool {
    FILES[file][coordinate]
}

pub fn is_on_rank(rank: usize, coordinate: usize) -> bool {
    RANKS[rank][coordinate]
}

pub fn is_valid_tile_coordinate(coordinate: i32) -> bool {
    (0..NUM_TILES as i32).contains(&coordinate)
}

/// Applies a linear offset, returning `None` when the result leaves the board.
/// File wrap-around is not detected here; callers apply their exclusion masks first.
pub fn offset_coordinate(coordinate: usize, offset: i32) -> Option<usize> {
    let candidate = coordinate as i32 + offset;
    if is_valid_tile_coordinate(candidate) {
        Some(candidate as usize)
    } else {
        None
    }
}

pub fn coordinate_at_position(position: &str) -> Option<usize> {
    POSITION_TO_COORDINATE.get(position).copied()
}

pub fn position_at_coordinate(coordinate: usize) -> &'static str {
    ALGEBRAIC_NOTATION
        .get(coordinate)
        .map(String::as_str)
        .unwrap_or("??")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_masks() {
        assert!(is_on_file(FIRST_FILE, 0));
        assert!(is_on_file(FIRST_FILE, 56));
        assert!(!is_on_file(FIRST_FILE, 1));
        assert!(is_on_file(EIGHTH_FILE, 7));
        assert!(is_on_file(EIGHTH_FILE, 63));
        assert_eq!(FILES[SECOND_FILE].iter().filter(|&&b| b).count(), 8);
    }

    #[test]
    fn test_rank_masks() {
        assert!(is_on_rank(EIGHTH_RANK, 0));
        assert!(is_on_rank(EIGHTH_RANK, 7));
        assert!(!is_on_rank(EIGHTH_RANK, 8));
        assert!(is_on_rank(SECOND_RANK, 48));
        assert!(is_on_rank(SECOND_RANK, 55));
        assert!(is_on_rank(FIRST_RANK, 63));
        assert!(is_on_rank(SEVENTH_RANK, 12));
    }

    #[test]
    fn test_algebraic_conversion() {
        assert_eq!(position_at_coordinate(0), "a8");
        assert_eq!(position_at_coordinate(63), "h1");
        assert_eq!(position_at_coordinate(36), "e4");
        assert_eq!(coordinate_at_position("e2"), Some(52));
        assert_eq!(coordinate_at_position("d8"), Some(3));
        assert_eq!(coordinate_at_position("z9"), None);
        assert_eq!(position_at_coordinate(64), "??");
    }

    #[test]
    fn test_offset_coordinate() {
        assert_eq!(offset_coordinate(0, -1), None);
        assert_eq!(offset_coordinate(63, 1), None);
        assert_eq!(offset_coordinate(52, -16), Some(36));
    }
}
