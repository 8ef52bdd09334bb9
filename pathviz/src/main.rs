// main.rs - Maze & path-finding visualizer
// Sessions run on a tokio runtime and draw into a shared board; ui.rs paints it.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eframe::egui;
use pathviz_core::{
    MazeAlgorithm, MazeGenerator, MazeRequest, MazeType, PathAlgorithm, PathRequest,
    PathfindingController, Position, Presenter, SessionKind, SessionOutcome, SessionSlot,
    nearest_open, validity_report,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod board;
mod client;
mod config;
mod error;
mod ui;

use board::{Board, SharedBoard, StatusLine};
use client::HttpService;
use config::{Cli, Config};
use error::AppError;

type Service = Arc<HttpService>;

fn main() -> Result<(), AppError> {
    let config = Config::from(Cli::parse());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    let service = Arc::new(HttpService::new(&config.api_url)?);
    let app = MazeVisualizer::new(config, service, runtime)?;
    info!(api = %app.config.api_url, "starting visualizer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Maze & Path Finding Visualizer",
        options,
        Box::new(move |cc| {
            app.board.attach(&cc.egui_ctx);
            Box::new(app)
        }),
    )?;
    Ok(())
}

pub struct MazeVisualizer {
    config: Config,
    pub board: SharedBoard,
    slot: SessionSlot<SharedBoard>,
    generator: Arc<MazeGenerator<Service, SharedBoard>>,
    pathfinder: Arc<PathfindingController<Service, SharedBoard>>,
    runtime: tokio::runtime::Runtime,

    pub speed_ms: u64,
    pub maze_algorithm: MazeAlgorithm,
    pub maze_type: MazeType,
    pub path_algorithm: PathAlgorithm,
    pub cell_size: f32,
}

impl MazeVisualizer {
    fn new(
        config: Config,
        service: Service,
        runtime: tokio::runtime::Runtime,
    ) -> Result<Self, AppError> {
        let board = SharedBoard::new(Board::empty(config.rows, config.cols)?);
        let slot = SessionSlot::new(board.clone());
        let generator = Arc::new(MazeGenerator::new(service.clone(), slot.clone()));
        let pathfinder = Arc::new(PathfindingController::new(service, slot.clone()));

        Ok(Self {
            speed_ms: config.speed_ms,
            cell_size: config.cell_size,
            maze_algorithm: MazeAlgorithm::default(),
            maze_type: MazeType::default(),
            path_algorithm: PathAlgorithm::default(),
            config,
            board,
            slot,
            generator,
            pathfinder,
            runtime,
        })
    }

    fn pace(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn is_busy(&self) -> bool {
        self.slot.is_running()
    }

    pub fn busy_kind(&self) -> Option<SessionKind> {
        self.slot.active_kind()
    }

    pub fn generate_maze(&mut self) {
        self.slot.reset(|board| board.reset());

        let request = match MazeRequest::new(
            self.config.rows,
            self.config.cols,
            self.maze_algorithm,
            self.maze_type,
        ) {
            Ok(request) => request,
            Err(err) => {
                self.board.set_status(StatusLine::error(err.to_string()));
                return;
            }
        };

        let generator = Arc::clone(&self.generator);
        let board = self.board.clone();
        let pace = self.pace();
        self.runtime.spawn(async move {
            match generator.generate(request, pace).await {
                Ok(SessionOutcome::Completed(maze)) => board.set_status(StatusLine::ok(format!(
                    "Maze generated: start {}, end {}",
                    maze.start, maze.end
                ))),
                Ok(SessionOutcome::Canceled) => {}
                Err(err) => {
                    error!(%err, "maze generation failed");
                    board.set_status(StatusLine::error(format!("Error generating maze: {err}")));
                }
            }
        });
    }

    pub fn find_path(&mut self) {
        let request = {
            let board = self.board.lock();
            PathRequest {
                maze: board.maze.clone(),
                start: board.start,
                end: board.end,
                algorithm: self.path_algorithm,
            }
        };

        let pathfinder = Arc::clone(&self.pathfinder);
        let board = self.board.clone();
        let pace = self.pace();
        self.runtime.spawn(async move {
            match pathfinder.find_path(request, pace).await {
                Ok(SessionOutcome::Completed(summary)) => {
                    board.set_status(StatusLine::ok(format!(
                        "Path found: {} steps, {} cells explored",
                        summary.path, summary.visited
                    )))
                }
                Ok(SessionOutcome::Canceled) => {}
                Err(err) => {
                    error!(%err, "path search failed");
                    board.set_status(StatusLine::error(err.to_string()));
                }
            }
        });
    }

    pub fn reset_board(&mut self) {
        self.slot.reset(|board| board.reset());
    }

    pub fn check_validity(&mut self) {
        let verdict = {
            let board = self.board.lock();
            validity_report(&board.maze, board.start, board.end)
        };
        let status = if verdict.is_valid() {
            StatusLine::ok(verdict.message())
        } else {
            StatusLine::error(verdict.message())
        };
        self.board.set_status(status);
    }

    /// Moves the end node to the clicked cell, or the nearest passage when a
    /// wall was clicked. Visited and path overlays are left as they are.
    pub fn handle_cell_click(&mut self, pos: Position) {
        if self.is_busy() {
            return;
        }
        let (start, end) = {
            let board = self.board.lock();
            let target = if board.maze.is_passage(pos) {
                Some(pos)
            } else {
                nearest_open(&board.maze, pos)
            };
            match target {
                Some(target) if target != board.start && target != board.end => {
                    (board.start, target)
                }
                _ => return,
            }
        };
        self.slot.present_idle(|board| board.show_endpoints(start, end));
    }
}
