// error.rs - Startup failures for the visualizer binary

use pathviz_core::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("window error: {0}")]
    Ui(#[from] eframe::Error),
    #[error("failed to build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid board size: {0}")]
    Board(#[from] GridError),
}
