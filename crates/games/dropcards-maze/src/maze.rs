use dropcards_core::game_trait::Direction;

/// Maze width in cells.
pub const COLS: usize = 17;
/// Maze height in cells.
pub const ROWS: usize = 13;
/// Agent spawn cell.
pub const START: (i32, i32) = (1, 1);

/// Wall layout, `1` = wall, `0` = path. Row-major, y grows downward.
const LAYOUT: [[u8; COLS]; ROWS] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Whether `(x, y)` is an open path cell. Out-of-bounds counts as wall.
pub fn is_path(x: i32, y: i32) -> bool {
    if x < 0 || y < 0 || x >= COLS as i32 || y >= ROWS as i32 {
        return false;
    }
    LAYOUT[y as usize][x as usize] == 0
}

/// Cell one step from `(x, y)` in `dir`.
pub fn neighbor(x: i32, y: i32, dir: Direction) -> (i32, i32) {
    let (dx, dy) = dir.offset();
    (x + dx, y + dy)
}

/// Whether the agent at `(x, y)` may step in `dir`.
pub fn can_move(x: i32, y: i32, dir: Direction) -> bool {
    let (nx, ny) = neighbor(x, y, dir);
    is_path(nx, ny)
}

/// Every open cell except the spawn, in row-major order.
pub fn dot_cells() -> Vec<(i32, i32)> {
    (0..ROWS as i32)
        .flat_map(|y| (0..COLS as i32).map(move |x| (x, y)))
        .filter(|&(x, y)| is_path(x, y) && (x, y) != START)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    #[test]
    fn border_is_solid() {
        for x in 0..COLS as i32 {
            assert!(!is_path(x, 0));
            assert!(!is_path(x, ROWS as i32 - 1));
        }
        for y in 0..ROWS as i32 {
            assert!(!is_path(0, y));
            assert!(!is_path(COLS as i32 - 1, y));
        }
        assert!(!is_path(-1, 5));
        assert!(!is_path(5, 99));
    }

    #[test]
    fn start_is_open() {
        assert!(is_path(START.0, START.1));
        assert!(!dot_cells().contains(&START));
    }

    #[test]
    fn every_path_cell_is_reachable_from_start() {
        let mut seen = HashSet::from([START]);
        let mut queue = VecDeque::from([START]);
        while let Some((x, y)) = queue.pop_front() {
            for dir in [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right,
            ] {
                let next = neighbor(x, y, dir);
                if is_path(next.0, next.1) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        for cell in dot_cells() {
            assert!(seen.contains(&cell), "unreachable cell {cell:?}");
        }
    }
}
