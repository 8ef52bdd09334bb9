// board.rs - What the grid painter shows, shared between the UI thread and sessions

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use pathviz_core::{Cell, Grid, GridError, Position, Presenter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub success: bool,
}

impl StatusLine {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Passage,
    Wall,
    Visited,
    Path,
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct Board {
    pub maze: Grid,
    pub start: Position,
    pub end: Position,
    visited: HashSet<Position>,
    path: HashSet<Position>,
    pub status: Option<StatusLine>,
}

impl Board {
    /// All-passage board with the default endpoints.
    pub fn empty(rows: usize, cols: usize) -> Result<Self, GridError> {
        let maze = Grid::new(rows, cols, Cell::Passage)?;
        Ok(Self {
            start: maze.default_start(),
            end: maze.default_end(),
            maze,
            visited: HashSet::new(),
            path: HashSet::new(),
            status: None,
        })
    }

    pub fn paint(&self, pos: Position) -> Paint {
        if pos == self.start {
            Paint::Start
        } else if pos == self.end {
            Paint::End
        } else if self.path.contains(&pos) {
            Paint::Path
        } else if self.visited.contains(&pos) {
            Paint::Visited
        } else if self.maze.is_passage(pos) {
            Paint::Passage
        } else {
            Paint::Wall
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn path_count(&self) -> usize {
        self.path.len()
    }
}

impl Presenter for Board {
    fn show_maze(&mut self, grid: &Grid) {
        self.maze.clone_from(grid);
    }

    fn show_endpoints(&mut self, start: Position, end: Position) {
        self.start = start;
        self.end = end;
    }

    fn show_visited(&mut self, visited: &[Position]) {
        self.visited.clear();
        self.visited.extend(visited.iter().copied());
    }

    fn show_path(&mut self, path: &[Position]) {
        self.path.clear();
        self.path.extend(path.iter().copied());
    }
}

/// Cloneable handle to the board that wakes the UI after every write.
#[derive(Clone)]
pub struct SharedBoard {
    board: Arc<Mutex<Board>>,
    ctx: Arc<OnceLock<egui::Context>>,
}

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            ctx: Arc::new(OnceLock::new()),
        }
    }

    /// Hooks up repaint requests once the UI context exists.
    pub fn attach(&self, ctx: &egui::Context) {
        let _ = self.ctx.set(ctx.clone());
    }

    pub fn lock(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update<R>(&self, write: impl FnOnce(&mut Board) -> R) -> R {
        let result = write(&mut self.lock());
        if let Some(ctx) = self.ctx.get() {
            ctx.request_repaint();
        }
        result
    }

    pub fn set_status(&self, status: StatusLine) {
        self.update(|board| board.status = Some(status));
    }

    /// Empty maze, default endpoints, no overlays.
    pub fn reset(&self) {
        self.update(|board| {
            let (rows, cols) = (board.maze.rows(), board.maze.cols());
            if let Ok(fresh) = Board::empty(rows, cols) {
                *board = fresh;
            }
        });
    }
}

impl Presenter for SharedBoard {
    fn show_maze(&mut self, grid: &Grid) {
        self.update(|board| board.show_maze(grid));
    }

    fn show_endpoints(&mut self, start: Position, end: Position) {
        self.update(|board| board.show_endpoints(start, end));
    }

    fn show_visited(&mut self, visited: &[Position]) {
        self.update(|board| board.show_visited(visited));
    }

    fn show_path(&mut self, path: &[Position]) {
        self.update(|board| board.show_path(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlays_paint_over_cells_and_endpoints_over_everything() {
        let mut board = Board::empty(5, 5).unwrap();
        board.show_maze(&Grid::parse("#....\n.....\n.....\n.....\n....#").unwrap());
        board.show_visited(&[Position::new(1, 1), Position::new(0, 1)]);
        board.show_path(&[Position::new(1, 1)]);

        assert_eq!(board.paint(Position::new(0, 0)), Paint::Wall);
        assert_eq!(board.paint(Position::new(0, 1)), Paint::Start);
        assert_eq!(board.paint(Position::new(1, 1)), Paint::Path);
        assert_eq!(board.paint(Position::new(2, 2)), Paint::Passage);
        assert_eq!(board.paint(Position::new(4, 3)), Paint::End);
    }

    #[test]
    fn reset_restores_the_empty_board() {
        let shared = SharedBoard::new(Board::empty(6, 7).unwrap());
        let mut writer = shared.clone();
        writer.show_maze(&Grid::new(6, 7, Cell::Wall).unwrap());
        writer.show_visited(&[Position::new(2, 2)]);
        shared.set_status(StatusLine::error("boom"));

        shared.reset();

        let board = shared.lock();
        assert_eq!(board.maze.passage_count(), 42);
        assert_eq!(board.visited_count(), 0);
        assert_eq!((board.start, board.end), (Position::new(0, 1), Position::new(5, 5)));
        assert!(board.status.is_none());
    }
}
