#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pathviz_core::{
    AlgorithmService, Grid, MazeRequest, MazeResponse, PathRequest, PathResponse, Position,
    Presenter, ServiceError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Maze(Grid),
    Endpoints(Position, Position),
    Visited(Vec<Position>),
    Path(Vec<Position>),
}

/// Presenter that appends every write to a shared log.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for Recorder {
    fn show_maze(&mut self, grid: &Grid) {
        self.push(Event::Maze(grid.clone()));
    }

    fn show_endpoints(&mut self, start: Position, end: Position) {
        self.push(Event::Endpoints(start, end));
    }

    fn show_visited(&mut self, visited: &[Position]) {
        self.push(Event::Visited(visited.to_vec()));
    }

    fn show_path(&mut self, path: &[Position]) {
        self.push(Event::Path(path.to_vec()));
    }
}

/// Canned service: answers are handed out in order, after `latency`.
#[derive(Default)]
pub struct ScriptedService {
    mazes: Mutex<VecDeque<Result<MazeResponse, ServiceError>>>,
    paths: Mutex<VecDeque<Result<PathResponse, ServiceError>>>,
    latency: Duration,
    calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn push_maze(self, response: Result<MazeResponse, ServiceError>) -> Self {
        self.mazes.lock().unwrap().push_back(response);
        self
    }

    pub fn push_path(self, response: Result<PathResponse, ServiceError>) -> Self {
        self.paths.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AlgorithmService for ScriptedService {
    async fn generate_maze(&self, _request: MazeRequest) -> Result<MazeResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.mazes.lock().unwrap().pop_front();
        tokio::time::sleep(self.latency).await;
        next.unwrap_or_else(|| Err(ServiceError::request("no scripted maze")))
    }

    async fn find_path(&self, _request: PathRequest) -> Result<PathResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.paths.lock().unwrap().pop_front();
        tokio::time::sleep(self.latency).await;
        next.unwrap_or_else(|| Err(ServiceError::request("no scripted path")))
    }
}

pub fn row_cells(row: usize, cols: std::ops::Range<usize>) -> Vec<Position> {
    cols.map(|col| Position::new(row, col)).collect()
}
