// lib.rs - Maze repair, paced step playback and single-flight animation sessions

pub mod cancel;
pub mod connectivity;
pub mod error;
pub mod generation;
pub mod grid;
pub mod playback;
pub mod service;
pub mod session;

pub use cancel::CancelHandle;
pub use connectivity::{Validity, carve, ensure_solvable, nearest_open, reachable, validity_report};
pub use error::{GridError, RepairError, Result, ServiceError, SessionError, ValidationError};
pub use generation::{GeneratedMaze, MazeGenerator};
pub use grid::{Cell, Grid, Position};
pub use playback::{Pacing, Playback, play_frames, play_growing};
pub use service::{
    AlgorithmService, MazeAlgorithm, MazeRequest, MazeResponse, MazeType, PathAlgorithm,
    PathRequest, PathResponse,
};
pub use session::{
    PathSummary, PathfindingController, Presenter, SessionKind, SessionOutcome, SessionSlot,
    SessionState, Ticket,
};
