// grid.rs - Grid types for maze and path-finding boards

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Preferred start column offset; the generators keep column 0 as border.
pub const START_COL: usize = 1;

/// A single board cell. On the wire a passage is `0` and a wall is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Passage,
    Wall,
}

impl Cell {
    pub fn is_passage(self) -> bool {
        self == Cell::Passage
    }

    fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Passage),
            1 => Some(Cell::Wall),
            _ => None,
        }
    }

    fn to_wire(self) -> u8 {
        match self {
            Cell::Passage => 0,
            Cell::Wall => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Neighbor offsets in expansion order: right, down, left, up.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Rectangular board stored row-major.
///
/// Rows always share one length; construction rejects ragged input so the
/// search routines never have to re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A `rows` x `cols` board with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: Cell) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        })
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Parses a picture where `#` is a wall and anything else a passage.
    pub fn parse(picture: &str) -> Result<Self, GridError> {
        let rows = picture
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|ch| if ch == '#' { Cell::Wall } else { Cell::Passage })
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.contains(pos)
            .then(|| self.cells[pos.row * self.cols + pos.col])
    }

    /// Out-of-bounds positions read as walls.
    pub fn is_passage(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_passage)
    }

    /// Writes `cell` at `pos`; returns false when `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.cells[pos.row * self.cols + pos.col] = cell;
        true
    }

    /// In-bounds 4-neighbors of `pos`, right, down, left, up.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let row = pos.row.checked_add_signed(dr)?;
            let col = pos.col.checked_add_signed(dc)?;
            let next = Position::new(row, col);
            self.contains(next).then_some(next)
        })
    }

    pub fn passage_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_passage()).count()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    /// Preferred start: row 0, column 1.
    pub fn default_start(&self) -> Position {
        Position::new(0, START_COL)
    }

    /// Preferred end: last row, second to last column.
    pub fn default_end(&self) -> Position {
        Position::new(self.rows - 1, self.cols.saturating_sub(2))
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridError;

    fn try_from(raw: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let rows = raw
            .into_iter()
            .enumerate()
            .map(|(row, values)| {
                values
                    .into_iter()
                    .enumerate()
                    .map(|(col, value)| {
                        Cell::from_wire(value).ok_or(GridError::BadCell { row, col, value })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.iter_rows()
            .map(|row| row.iter().map(|cell| cell.to_wire()).collect())
            .collect()
    }
}
