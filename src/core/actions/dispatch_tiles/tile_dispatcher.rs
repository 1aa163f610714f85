use crossbeam::queue::SegQueue;
use log::{debug, info, trace, warn};
use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

use crate::core::actions::cancellation::CancelToken;
use crate::core::data::tile::Tile;
use crate::core::util::worker_count::workers_for_units;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Dispatching,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    AlreadyDispatched { state: DispatchState },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDispatched { state } => {
                write!(f, "tile set has already been dispatched (state: {:?})", state)
            }
        }
    }
}

impl Error for DispatchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFailure<E> {
    pub tile: Tile,
    pub error: E,
}

/// Outcome of one dispatch run. Cancellation is reported here, not as an error.
#[derive(Debug)]
pub struct DispatchReport<E> {
    state: DispatchState,
    tiles_total: usize,
    tiles_attempted: usize,
    failures: Vec<TileFailure<E>>,
}

impl<E> DispatchReport<E> {
    /// `Completed` or `Cancelled`.
    #[must_use]
    pub fn state(&self) -> DispatchState {
        self.state
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state == DispatchState::Cancelled
    }

    #[must_use]
    pub fn tiles_total(&self) -> usize {
        self.tiles_total
    }

    /// Tiles handed to the render action, whether it succeeded or not.
    #[must_use]
    pub fn tiles_attempted(&self) -> usize {
        self.tiles_attempted
    }

    #[must_use]
    pub fn failures(&self) -> &[TileFailure<E>] {
        &self.failures
    }

    #[must_use]
    pub fn into_failures(self) -> Vec<TileFailure<E>> {
        self.failures
    }
}

struct WorkerOutcome<E> {
    attempted: usize,
    failures: Vec<TileFailure<E>>,
    saw_cancel: bool,
}

/// Hands a fixed tile set to a pool of workers pulling from a shared queue.
///
/// Tiles enter the queue in the order given, which is the order they are first
/// pulled in; completion order depends on how long each tile takes. Every tile
/// is popped by exactly one worker and attempted once. Workers poll the cancel
/// token before each pop, so a tile that has started always runs to the end.
///
/// A dispatcher runs once: `Idle -> Dispatching -> Completed | Cancelled`.
/// A panic in the render action is re-raised once every worker has stopped,
/// leaving the dispatcher `Cancelled`.
#[derive(Debug)]
pub struct TileDispatcher {
    tiles: Vec<Tile>,
    state: DispatchState,
}

impl TileDispatcher {
    #[must_use]
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            state: DispatchState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> DispatchState {
        self.state
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn dispatch<F, E, C>(
        &mut self,
        worker_count: NonZeroUsize,
        render_action: F,
        cancel: &C,
    ) -> Result<DispatchReport<E>, DispatchError>
    where
        F: Fn(&Tile) -> Result<(), E> + Sync,
        E: fmt::Display + Send,
        C: CancelToken + ?Sized,
    {
        if self.state != DispatchState::Idle {
            return Err(DispatchError::AlreadyDispatched { state: self.state });
        }

        self.state = DispatchState::Dispatching;

        let tiles = std::mem::take(&mut self.tiles);
        let tiles_total = tiles.len();
        let num_workers = workers_for_units(worker_count, tiles_total).get();
        let start = Instant::now();

        debug!("dispatching {} tiles across {} workers", tiles_total, num_workers);

        let queue = SegQueue::new();
        for tile in tiles {
            queue.push(tile);
        }

        let joined: Vec<thread::Result<WorkerOutcome<E>>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..num_workers)
                .map(|worker| {
                    let queue = &queue;
                    let render_action = &render_action;

                    scope.spawn(move || run_worker(worker, queue, render_action, cancel))
                })
                .collect();

            handles.into_iter().map(|handle| handle.join()).collect()
        });

        let mut outcomes = Vec::with_capacity(joined.len());

        for result in joined {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(payload) => {
                    // The run ended early; the other workers have already stopped.
                    self.state = DispatchState::Cancelled;
                    warn!("tile worker panicked, dispatch abandoned");
                    std::panic::resume_unwind(payload);
                }
            }
        }

        let mut tiles_attempted = 0;
        let mut saw_cancel = false;
        let mut failures = Vec::new();

        for outcome in outcomes {
            tiles_attempted += outcome.attempted;
            saw_cancel |= outcome.saw_cancel;
            failures.extend(outcome.failures);
        }

        self.state = if saw_cancel && tiles_attempted < tiles_total {
            info!(
                "tile dispatch cancelled after {} of {} tiles",
                tiles_attempted, tiles_total
            );
            DispatchState::Cancelled
        } else {
            DispatchState::Completed
        };

        debug!(
            "tile dispatch finished in {:?}: {} attempted, {} failed",
            start.elapsed(),
            tiles_attempted,
            failures.len()
        );

        Ok(DispatchReport {
            state: self.state,
            tiles_total,
            tiles_attempted,
            failures,
        })
    }
}

fn run_worker<F, E, C>(worker: usize, queue: &SegQueue<Tile>, render_action: &F, cancel: &C) -> WorkerOutcome<E>
where
    F: Fn(&Tile) -> Result<(), E>,
    E: fmt::Display,
    C: CancelToken + ?Sized,
{
    let mut outcome = WorkerOutcome {
        attempted: 0,
        failures: Vec::new(),
        saw_cancel: false,
    };

    loop {
        if cancel.is_cancelled() {
            outcome.saw_cancel = true;
            break;
        }

        let Some(tile) = queue.pop() else {
            break;
        };

        trace!("worker {} rendering tile at {:?}", worker, tile.top_left());
        outcome.attempted += 1;

        if let Err(error) = render_action(&tile) {
            warn!("tile at {:?} failed to render: {}", tile.top_left(), error);
            outcome.failures.push(TileFailure { tile, error });
        }
    }

    outcome
}
