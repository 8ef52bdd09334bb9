// playback.rs - Paced replay of precomputed step sequences
//
// Each chunk boundary yields to the runtime (a frame) and then sleeps for the
// chunk delay. Cancellation is only observed at those boundaries.

use std::time::Duration;

use tracing::debug;

use crate::cancel::CancelHandle;

/// How many elements one emitted update covers and how long to wait after it.
///
/// `chunk` is never zero; every constructor goes through [`Pacing::fixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    chunk: usize,
    delay: Duration,
}

impl Pacing {
    pub fn fixed(chunk: usize, delay: Duration) -> Self {
        Self {
            chunk: chunk.max(1),
            delay,
        }
    }

    pub fn chunk(self) -> usize {
        self.chunk
    }

    pub fn delay(self) -> Duration {
        self.delay
    }

    /// Maze snapshots: long runs sample every 2nd or 3rd frame and speed up.
    pub fn frames(len: usize, base: Duration) -> Self {
        let chunk = match len {
            201.. => 3,
            101.. => 2,
            _ => 1,
        };
        let delay = if len > 100 {
            (base / 3).max(Duration::from_millis(10))
        } else {
            base
        };
        Self::fixed(chunk, delay)
    }

    /// Visited cells: large searches reveal 5 or 10 cells per update.
    pub fn visited(len: usize, base: Duration) -> Self {
        match len {
            501.. => Self::fixed(10, (base / 10).max(Duration::from_millis(5))),
            201.. => Self::fixed(5, (base / 5).max(Duration::from_millis(10))),
            _ => Self::fixed(1, base),
        }
    }

    /// Path cells, at whatever pace the caller picked for the path phase.
    pub fn path(len: usize, pace: Duration) -> Self {
        Self::fixed(if len > 100 { 3 } else { 1 }, pace)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Completed,
    Canceled,
}

impl Playback {
    pub fn is_canceled(self) -> bool {
        self == Playback::Canceled
    }
}

/// Replays whole snapshots in order, showing every `chunk`-th one.
///
/// The last snapshot is always shown on completion even when sampling would
/// skip it.
pub async fn play_frames<T>(
    frames: &[T],
    pacing: Pacing,
    cancel: &CancelHandle,
    mut emit: impl FnMut(&T),
) -> Playback {
    let marks = (0..frames.len()).step_by(pacing.chunk);
    replay(marks, frames.len(), pacing, cancel, |index| emit(&frames[index])).await
}

/// Reveals `items` as a growing prefix, `chunk` items per update.
///
/// `emit` always receives everything delivered so far, so the shown set only
/// grows. The final update is the full sequence.
pub async fn play_growing<T>(
    items: &[T],
    pacing: Pacing,
    cancel: &CancelHandle,
    mut emit: impl FnMut(&[T]),
) -> Playback {
    let marks = (pacing.chunk - 1..items.len()).step_by(pacing.chunk);
    replay(marks, items.len(), pacing, cancel, |index| emit(&items[..=index])).await
}

async fn replay(
    marks: impl Iterator<Item = usize>,
    len: usize,
    pacing: Pacing,
    cancel: &CancelHandle,
    mut show: impl FnMut(usize),
) -> Playback {
    let Some(last) = len.checked_sub(1) else {
        return Playback::Completed;
    };

    let mut shown = None;
    for index in marks {
        tokio::task::yield_now().await;
        if cancel.is_canceled() {
            debug!(index, len, "playback canceled");
            return Playback::Canceled;
        }
        show(index);
        shown = Some(index);
        tokio::time::sleep(pacing.delay).await;
    }

    if cancel.is_canceled() {
        debug!(len, "playback canceled before final state");
        return Playback::Canceled;
    }
    if shown != Some(last) {
        show(last);
    }
    Playback::Completed
}
