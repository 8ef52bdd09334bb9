// session.rs - Single-flight animation sessions and the path-finding controller
//
// A `SessionSlot` owns the presentation target and the identity of the one
// session allowed to write to it. Starting a session revokes the previous
// one's rights under the same lock that guards every write, so two sessions
// can never interleave their output.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cancel::CancelHandle;
use crate::error::{Result, SessionError, ValidationError};
use crate::grid::{Grid, Position};
use crate::playback::{Pacing, play_growing};
use crate::service::{AlgorithmService, PathRequest};

/// Where replayed states end up.
pub trait Presenter: Send {
    fn show_maze(&mut self, grid: &Grid);
    fn show_endpoints(&mut self, start: Position, end: Position);
    fn show_visited(&mut self, visited: &[Position]);
    fn show_path(&mut self, path: &[Position]);

    fn clear_search(&mut self) {
        self.show_visited(&[]);
        self.show_path(&[]);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Generation,
    Pathfinding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome<T> {
    Completed(T),
    Canceled,
}

impl<T> SessionOutcome<T> {
    pub fn is_canceled(&self) -> bool {
        matches!(self, SessionOutcome::Canceled)
    }
}

/// Emission rights for one session.
#[derive(Debug)]
pub struct Ticket {
    id: u64,
    kind: SessionKind,
    cancel: CancelHandle,
}

impl Ticket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn cancel_handle(&self) -> &CancelHandle {
        &self.cancel
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }
}

struct Live {
    id: u64,
    kind: SessionKind,
    cancel: CancelHandle,
}

struct SlotInner<P> {
    presenter: P,
    live: Option<Live>,
    next_id: u64,
    state: SessionState,
}

impl<P> SlotInner<P> {
    fn holds(&self, ticket: &Ticket) -> bool {
        self.live.as_ref().is_some_and(|live| live.id == ticket.id)
    }

    fn start(&mut self, kind: SessionKind) -> Ticket {
        self.cancel_live();

        let id = self.next_id;
        self.next_id += 1;
        let cancel = CancelHandle::new();
        self.live = Some(Live {
            id,
            kind,
            cancel: cancel.clone(),
        });
        self.state = SessionState::Running;
        debug!(session = id, ?kind, "session started");
        Ticket { id, kind, cancel }
    }

    fn cancel_live(&mut self) -> bool {
        match self.live.take() {
            Some(live) => {
                live.cancel.cancel();
                self.state = SessionState::Canceled;
                debug!(session = live.id, kind = ?live.kind, "session canceled");
                true
            }
            None => false,
        }
    }
}

/// The single live-session handle. Clones share the same slot.
pub struct SessionSlot<P> {
    inner: Arc<Mutex<SlotInner<P>>>,
}

impl<P> Clone for SessionSlot<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Presenter> SessionSlot<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotInner {
                presenter,
                live: None,
                next_id: 1,
                state: SessionState::Idle,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner<P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Supersedes whatever is live and hands out fresh rights.
    pub fn begin(&self, kind: SessionKind) -> Ticket {
        self.lock().start(kind)
    }

    /// Like [`SessionSlot::begin`], but refuses while a `blocker` session is
    /// live. The check and the takeover happen under one lock.
    pub fn begin_unless(&self, kind: SessionKind, blocker: SessionKind) -> Option<Ticket> {
        let mut inner = self.lock();
        if inner.live.as_ref().is_some_and(|live| live.kind == blocker) {
            debug!(?kind, ?blocker, "session refused");
            return None;
        }
        Some(inner.start(kind))
    }

    /// Runs `write` against the presenter if `ticket` is still live.
    pub fn emit(&self, ticket: &Ticket, write: impl FnOnce(&mut P)) -> bool {
        let mut inner = self.lock();
        if !inner.holds(ticket) {
            return false;
        }
        write(&mut inner.presenter);
        true
    }

    /// Natural completion. Does nothing for a session that lost its rights.
    pub fn finish(&self, ticket: &Ticket) -> bool {
        let mut inner = self.lock();
        if !inner.holds(ticket) {
            return false;
        }
        inner.live = None;
        inner.state = SessionState::Idle;
        debug!(session = ticket.id, "session finished");
        true
    }

    /// Cancels the live session, if any. Safe to call repeatedly.
    pub fn cancel(&self) -> bool {
        self.lock().cancel_live()
    }

    /// Cancels the live session and then rewrites the presenter.
    pub fn reset(&self, write: impl FnOnce(&mut P)) {
        let mut inner = self.lock();
        inner.cancel_live();
        write(&mut inner.presenter);
    }

    /// Writes to the presenter only while no session holds it.
    pub fn present_idle(&self, write: impl FnOnce(&mut P)) -> bool {
        let mut inner = self.lock();
        if inner.live.is_some() {
            return false;
        }
        write(&mut inner.presenter);
        true
    }

    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    pub fn active_kind(&self) -> Option<SessionKind> {
        self.lock().live.as_ref().map(|live| live.kind)
    }

    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSummary {
    pub visited: usize,
    pub path: usize,
}

/// Drives one path-finding animation at a time.
pub struct PathfindingController<S, P> {
    service: S,
    slot: SessionSlot<P>,
}

impl<S: AlgorithmService, P: Presenter> PathfindingController<S, P> {
    pub fn new(service: S, slot: SessionSlot<P>) -> Self {
        Self { service, slot }
    }

    pub fn slot(&self) -> &SessionSlot<P> {
        &self.slot
    }

    /// Asks the service for a search and animates visited cells, then the
    /// path at twice the speed.
    ///
    /// Blocked endpoints fail before anything else happens, and so does a
    /// request made while a maze is still being generated. A session that is
    /// superseded or canceled returns `Canceled` and writes nothing further.
    pub async fn find_path(
        &self,
        request: PathRequest,
        pace: Duration,
    ) -> Result<SessionOutcome<PathSummary>> {
        validate_endpoints(&request.maze, request.start, request.end)?;

        let ticket = self
            .slot
            .begin_unless(SessionKind::Pathfinding, SessionKind::Generation)
            .ok_or(ValidationError::GenerationRunning)?;
        self.slot.emit(&ticket, |p| p.clear_search());
        info!(
            session = ticket.id(),
            algorithm = ?request.algorithm,
            start = %request.start,
            end = %request.end,
            "path search requested"
        );

        let response = self.service.find_path(request).await;
        if ticket.is_canceled() {
            return Ok(SessionOutcome::Canceled);
        }
        let response = match response {
            Ok(response) => response,
            Err(error) => {
                warn!(session = ticket.id(), %error, "path search failed");
                self.slot.finish(&ticket);
                return Err(error.into());
            }
        };

        let visited = &response.visited;
        let played = play_growing(
            visited,
            Pacing::visited(visited.len(), pace),
            ticket.cancel_handle(),
            |shown| {
                self.slot.emit(&ticket, |p| p.show_visited(shown));
            },
        )
        .await;
        if played.is_canceled() {
            return Ok(SessionOutcome::Canceled);
        }

        let path = &response.path;
        if path.is_empty() {
            info!(session = ticket.id(), visited = visited.len(), "no path found");
            return if self.slot.finish(&ticket) {
                Err(SessionError::Unreachable)
            } else {
                Ok(SessionOutcome::Canceled)
            };
        }

        let played = play_growing(
            path,
            Pacing::path(path.len(), pace / 2),
            ticket.cancel_handle(),
            |shown| {
                self.slot.emit(&ticket, |p| p.show_path(shown));
            },
        )
        .await;
        if played.is_canceled() || !self.slot.finish(&ticket) {
            return Ok(SessionOutcome::Canceled);
        }

        info!(
            session = ticket.id(),
            visited = visited.len(),
            path = path.len(),
            "path animation finished"
        );
        Ok(SessionOutcome::Completed(PathSummary {
            visited: visited.len(),
            path: path.len(),
        }))
    }

    /// Stops the running animation, leaving whatever it already showed.
    pub fn cancel(&self) -> bool {
        self.slot.cancel()
    }

    pub fn state(&self) -> SessionState {
        self.slot.state()
    }
}

fn validate_endpoints(grid: &Grid, start: Position, end: Position) -> Result<(), ValidationError> {
    if !grid.is_passage(start) {
        return Err(ValidationError::StartBlocked(start));
    }
    if !grid.is_passage(end) {
        return Err(ValidationError::EndBlocked(end));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        visited: Vec<usize>,
    }

    impl Presenter for Counter {
        fn show_maze(&mut self, _grid: &Grid) {}
        fn show_endpoints(&mut self, _start: Position, _end: Position) {}
        fn show_visited(&mut self, visited: &[Position]) {
            self.visited.push(visited.len());
        }
        fn show_path(&mut self, _path: &[Position]) {}
    }

    fn visited_log(slot: &SessionSlot<Counter>) -> Vec<usize> {
        slot.lock().presenter.visited.clone()
    }

    #[test]
    fn begin_revokes_the_previous_ticket() {
        let slot = SessionSlot::new(Counter::default());
        let first = slot.begin(SessionKind::Pathfinding);
        let second = slot.begin(SessionKind::Pathfinding);

        assert!(first.is_canceled());
        assert!(!second.is_canceled());
        assert!(!slot.emit(&first, |p| p.show_visited(&[])));
        assert!(slot.emit(&second, |p| p.show_visited(&[])));
        assert_eq!(visited_log(&slot), vec![0]);
        assert_eq!(slot.state(), SessionState::Running);
    }

    #[test]
    fn begin_unless_leaves_a_blocking_session_alone() {
        let slot = SessionSlot::new(Counter::default());
        let generation = slot.begin(SessionKind::Generation);

        let refused = slot.begin_unless(SessionKind::Pathfinding, SessionKind::Generation);
        assert!(refused.is_none());
        assert!(!generation.is_canceled());
        assert_eq!(slot.active_kind(), Some(SessionKind::Generation));

        let search = slot.begin(SessionKind::Pathfinding);
        let next = slot.begin_unless(SessionKind::Pathfinding, SessionKind::Generation);
        assert!(search.is_canceled());
        assert!(next.is_some_and(|ticket| !ticket.is_canceled()));
    }

    #[test]
    fn finish_after_cancel_leaves_state_canceled() {
        let slot = SessionSlot::new(Counter::default());
        let ticket = slot.begin(SessionKind::Generation);
        assert_eq!(slot.active_kind(), Some(SessionKind::Generation));

        assert!(slot.cancel());
        assert!(!slot.cancel());
        assert!(!slot.finish(&ticket));
        assert_eq!(slot.state(), SessionState::Canceled);
        assert_eq!(slot.active_kind(), None);
    }

    #[test]
    fn natural_completion_returns_to_idle() {
        let slot = SessionSlot::new(Counter::default());
        let ticket = slot.begin(SessionKind::Pathfinding);
        assert!(slot.finish(&ticket));
        assert_eq!(slot.state(), SessionState::Idle);
        assert!(!slot.cancel());
        assert_eq!(slot.state(), SessionState::Idle);
    }

    #[test]
    fn reset_cancels_then_writes() {
        let slot = SessionSlot::new(Counter::default());
        let ticket = slot.begin(SessionKind::Pathfinding);
        slot.reset(|p| p.clear_search());
        assert!(ticket.is_canceled());
        assert_eq!(visited_log(&slot), vec![0]);
    }

    #[test]
    fn idle_writes_wait_for_the_live_session() {
        let slot = SessionSlot::new(Counter::default());
        let ticket = slot.begin(SessionKind::Pathfinding);
        assert!(!slot.present_idle(|p| p.clear_search()));

        slot.finish(&ticket);
        assert!(slot.present_idle(|p| p.clear_search()));
        assert_eq!(visited_log(&slot), vec![0]);
    }

    #[test]
    fn walled_endpoints_fail_validation() {
        let grid = Grid::parse("#..\n..#").unwrap();
        assert_eq!(
            validate_endpoints(&grid, Position::new(0, 0), Position::new(1, 0)),
            Err(ValidationError::StartBlocked(Position::new(0, 0)))
        );
        assert_eq!(
            validate_endpoints(&grid, Position::new(0, 1), Position::new(1, 2)),
            Err(ValidationError::EndBlocked(Position::new(1, 2)))
        );
        assert!(validate_endpoints(&grid, Position::new(0, 1), Position::new(1, 1)).is_ok());
    }
}
