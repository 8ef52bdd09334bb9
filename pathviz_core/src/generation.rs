use std::time::Duration;

use tracing::{info, warn};

use crate::connectivity::ensure_solvable;
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::playback::{Pacing, play_frames};
use crate::service::{AlgorithmService, MazeRequest};
use crate::session::{Presenter, SessionKind, SessionOutcome, SessionSlot};

/// A repaired maze with start and end guaranteed open and connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMaze {
    pub grid: Grid,
    pub start: Position,
    pub end: Position,
}

pub struct MazeGenerator<S, P> {
    service: S,
    slot: SessionSlot<P>,
}

impl<S: AlgorithmService, P: Presenter> MazeGenerator<S, P> {
    pub fn new(service: S, slot: SessionSlot<P>) -> Self {
        Self { service, slot }
    }

    /// Fetches a maze, replays its carving steps, then repairs the finished
    /// maze and presents it with its endpoints.
    ///
    /// Shares the slot with path-finding, so starting a generation stops any
    /// running search animation.
    pub async fn generate(
        &self,
        request: MazeRequest,
        pace: Duration,
    ) -> Result<SessionOutcome<GeneratedMaze>> {
        let ticket = self.slot.begin(SessionKind::Generation);
        self.slot.emit(&ticket, |p| p.clear_search());
        info!(
            session = ticket.id(),
            rows = request.rows,
            cols = request.cols,
            algorithm = ?request.algorithm,
            maze_type = ?request.maze_type,
            "maze requested"
        );

        let response = self.service.generate_maze(request).await;
        if ticket.is_canceled() {
            return Ok(SessionOutcome::Canceled);
        }
        let response = match response {
            Ok(response) => response,
            Err(error) => {
                warn!(session = ticket.id(), %error, "maze generation failed");
                self.slot.finish(&ticket);
                return Err(error.into());
            }
        };

        let steps = &response.steps;
        let played = play_frames(
            steps,
            Pacing::frames(steps.len(), pace),
            ticket.cancel_handle(),
            |frame| {
                self.slot.emit(&ticket, |p| p.show_maze(frame));
            },
        )
        .await;
        if played.is_canceled() {
            return Ok(SessionOutcome::Canceled);
        }

        let mut grid = response.maze;
        let (start, end) = match ensure_solvable(&mut grid) {
            Ok(endpoints) => endpoints,
            Err(error) => {
                warn!(session = ticket.id(), %error, "maze could not be repaired");
                self.slot.finish(&ticket);
                return Err(error.into());
            }
        };

        let committed = self.slot.emit(&ticket, |p| {
            p.show_maze(&grid);
            p.show_endpoints(start, end);
        });
        if !committed || !self.slot.finish(&ticket) {
            return Ok(SessionOutcome::Canceled);
        }

        info!(session = ticket.id(), steps = steps.len(), %start, %end, "maze ready");
        Ok(SessionOutcome::Completed(GeneratedMaze { grid, start, end }))
    }
}
