// connectivity.rs - Reachability queries and start/end repair for generated mazes
//
// Everything here is synchronous and runs to completion; none of it yields.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use crate::error::RepairError;
use crate::grid::{Cell, Grid, Position};

/// True when a 4-connected run of passages joins `start` to `end`.
///
/// Traversal only steps onto passages, so a walled `start` is reachable from
/// nowhere but itself.
pub fn reachable(grid: &Grid, start: Position, end: Position) -> bool {
    if start == end {
        return true;
    }
    if !grid.is_passage(start) || !grid.is_passage(end) {
        return false;
    }

    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for next in grid.neighbors(current) {
            if !grid.is_passage(next) || !visited.insert(next) {
                continue;
            }
            if next == end {
                return true;
            }
            queue.push_back(next);
        }
    }
    false
}

/// Closest passage to `origin` by hop count, walking through walls.
///
/// Ties go to whichever cell the right, down, left, up expansion meets first.
/// `None` means the grid holds no passage at all.
pub fn nearest_open(grid: &Grid, origin: Position) -> Option<Position> {
    if grid.is_passage(origin) {
        return Some(origin);
    }

    let mut visited = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    while let Some(current) = queue.pop_front() {
        for next in grid.neighbors(current) {
            if !visited.insert(next) {
                continue;
            }
            if grid.is_passage(next) {
                return Some(next);
            }
            queue.push_back(next);
        }
    }
    None
}

/// Opens an L-shaped corridor: along `from.row` to `to.col`, then down or up
/// column `to.col` to `to.row`. Cells off that L are untouched.
pub fn carve(grid: &mut Grid, from: Position, to: Position) {
    let mut current = from;
    grid.set(current, Cell::Passage);

    while current.col != to.col {
        current.col = if current.col < to.col {
            current.col + 1
        } else {
            current.col - 1
        };
        grid.set(current, Cell::Passage);
    }
    while current.row != to.row {
        current.row = if current.row < to.row {
            current.row + 1
        } else {
            current.row - 1
        };
        grid.set(current, Cell::Passage);
    }
}

/// Forces the preferred start `(0, 1)` and end `(rows - 1, cols - 2)` open and
/// carves a corridor between them when the maze leaves them disconnected.
///
/// The grid is patched in place. Errors only when those coordinates do not
/// fit inside the grid.
pub fn ensure_solvable(grid: &mut Grid) -> Result<(Position, Position), RepairError> {
    let start = grid.default_start();
    let end = grid.default_end();
    if !grid.contains(start) || !grid.contains(end) {
        return Err(RepairError::TooSmall {
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }

    for (label, pos) in [("start", start), ("end", end)] {
        if !grid.is_passage(pos) {
            debug!(%pos, label, "forcing walled endpoint open");
            grid.set(pos, Cell::Passage);
        }
    }

    if !reachable(grid, start, end) {
        info!(%start, %end, "endpoints disconnected, carving corridor");
        carve(grid, start, end);
    }

    Ok((start, end))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    StartBlocked,
    EndBlocked,
    Unreachable,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }

    pub fn message(self) -> &'static str {
        match self {
            Validity::Valid => "Maze is valid! A path exists between start and end.",
            Validity::StartBlocked => "Start position is blocked by a wall!",
            Validity::EndBlocked => "End position is blocked by a wall!",
            Validity::Unreachable => "No path exists between start and end!",
        }
    }
}

/// On-demand check of the current board, no animation involved.
pub fn validity_report(grid: &Grid, start: Position, end: Position) -> Validity {
    if !grid.is_passage(start) {
        Validity::StartBlocked
    } else if !grid.is_passage(end) {
        Validity::EndBlocked
    } else if !reachable(grid, start, end) {
        Validity::Unreachable
    } else {
        Validity::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn reachable_follows_passages_only() {
        let grid = Grid::parse(
            "
            ..#..
            #.#.#
            #...#
            ",
        )
        .unwrap();
        assert!(reachable(&grid, pos(0, 0), pos(0, 4)));
        assert!(!reachable(&grid, pos(0, 0), pos(1, 4)));
    }

    #[test]
    fn walled_start_only_reaches_itself() {
        let grid = Grid::parse("#..").unwrap();
        assert!(!reachable(&grid, pos(0, 0), pos(0, 2)));
        assert!(reachable(&grid, pos(0, 0), pos(0, 0)));
    }

    #[test]
    fn nearest_open_returns_origin_when_already_open() {
        let grid = Grid::parse("##\n#.").unwrap();
        assert_eq!(nearest_open(&grid, pos(1, 1)), Some(pos(1, 1)));
    }

    #[test]
    fn nearest_open_breaks_ties_right_before_down() {
        let grid = Grid::parse(
            "
            ###
            ##.
            #.#
            ",
        )
        .unwrap();
        // (1, 2) and (2, 1) are both one hop away; right is expanded first.
        assert_eq!(nearest_open(&grid, pos(1, 1)), Some(pos(1, 2)));
    }

    #[test]
    fn nearest_open_walks_through_walls() {
        let grid = Grid::parse(
            "
            ####
            ####
            ###.
            ",
        )
        .unwrap();
        assert_eq!(nearest_open(&grid, pos(0, 0)), Some(pos(2, 3)));
    }

    #[test]
    fn nearest_open_on_all_wall_grid_is_none() {
        let grid = Grid::new(3, 3, Cell::Wall).unwrap();
        assert_eq!(nearest_open(&grid, pos(1, 1)), None);
    }

    #[test]
    fn carve_opens_exactly_the_l() {
        let mut grid = Grid::new(4, 5, Cell::Wall).unwrap();
        carve(&mut grid, pos(0, 4), pos(3, 1));

        let expected = Grid::parse(
            "
            #....
            #.###
            #.###
            #.###
            ",
        )
        .unwrap();
        assert_eq!(grid, expected);
        assert!(reachable(&grid, pos(0, 4), pos(3, 1)));
    }

    #[test]
    fn repair_carves_isolated_endpoints() {
        let mut grid = Grid::parse(
            "
            #.###
            #####
            #####
            #####
            ###.#
            ",
        )
        .unwrap();
        assert!(!reachable(&grid, pos(0, 1), pos(4, 3)));

        let (start, end) = ensure_solvable(&mut grid).unwrap();

        assert_eq!((start, end), (pos(0, 1), pos(4, 3)));
        assert!(grid.is_passage(start) && grid.is_passage(end));
        assert!(reachable(&grid, start, end));
        assert_eq!(validity_report(&grid, start, end), Validity::Valid);
    }

    #[test]
    fn repair_forces_walled_preferred_cells_open() {
        let mut grid = Grid::parse(
            "
            .#...
            .....
            ...#.
            ",
        )
        .unwrap();
        let (start, end) = ensure_solvable(&mut grid).unwrap();
        assert_eq!((start, end), (pos(0, 1), pos(2, 3)));
        assert!(grid.is_passage(start) && grid.is_passage(end));
        // nothing else needed carving
        assert_eq!(grid.passage_count(), 15);
    }

    #[test]
    fn repair_rejects_grids_too_narrow_for_the_endpoints() {
        let mut grid = Grid::new(5, 1, Cell::Wall).unwrap();
        assert_eq!(
            ensure_solvable(&mut grid),
            Err(RepairError::TooSmall { rows: 5, cols: 1 })
        );
    }

    #[test]
    fn validity_report_distinguishes_failures() {
        let grid = Grid::parse(
            "
            #.#
            ###
            #.#
            ",
        )
        .unwrap();
        assert_eq!(validity_report(&grid, pos(0, 0), pos(2, 1)), Validity::StartBlocked);
        assert_eq!(validity_report(&grid, pos(0, 1), pos(1, 1)), Validity::EndBlocked);
        assert_eq!(validity_report(&grid, pos(0, 1), pos(2, 1)), Validity::Unreachable);
    }
}
