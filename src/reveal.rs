//! Staggered reveal of newly solved words.
//!
//! Purely presentational. The game state has already changed by the time a
//! sequence starts; the animator only tracks which positions a view has
//! finished revealing and emits one event per position at a fixed interval.
//! Cancelling (on reset or a new day) drops the pending positions and clears
//! the revealed set without touching the game.

use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    /// Position finished its reveal.
    Revealed(usize),
    /// Nothing left to reveal.
    Finished,
    /// Sequence abandoned and the revealed set cleared.
    Cancelled,
}

#[derive(Debug, Default)]
struct Progress {
    pending: VecDeque<usize>,
    revealed: BTreeSet<usize>,
    running: bool,
    generation: u64,
}

/// Runs reveal sequences as a background task.
///
/// Must be driven from inside a Tokio runtime.
#[derive(Debug)]
pub struct RevealAnimator {
    delay: Duration,
    progress: Arc<Mutex<Progress>>,
    task: Option<JoinHandle<()>>,
    events: Option<mpsc::UnboundedSender<RevealEvent>>,
}

fn lock(progress: &Mutex<Progress>) -> MutexGuard<'_, Progress> {
    // Poisoning only means a view panicked mid-update; the set is still usable.
    progress.lock().unwrap_or_else(|e| e.into_inner())
}

impl RevealAnimator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            progress: Arc::new(Mutex::new(Progress::default())),
            task: None,
            events: None,
        }
    }

    /// Receive reveal events from now on. Replaces any earlier receiver.
    pub fn events(&mut self) -> mpsc::UnboundedReceiver<RevealEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    /// Queue `indices` for reveal, starting the sequence if it is idle.
    pub fn start(&mut self, indices: impl IntoIterator<Item = usize>) {
        let mut progress = lock(&self.progress);
        progress.pending.extend(indices);
        if progress.running || progress.pending.is_empty() {
            return;
        }
        progress.running = true;
        let generation = progress.generation;
        drop(progress);

        let shared = Arc::clone(&self.progress);
        let events = self.events.clone();
        let delay = self.delay;
        self.task = Some(tokio::spawn(async move {
            loop {
                let next = {
                    let mut progress = lock(&shared);
                    if progress.generation != generation {
                        return;
                    }
                    match progress.pending.pop_front() {
                        Some(index) => {
                            progress.revealed.insert(index);
                            index
                        }
                        None => {
                            progress.running = false;
                            break;
                        }
                    }
                };
                if let Some(tx) = &events {
                    let _ = tx.send(RevealEvent::Revealed(next));
                }
                tokio::time::sleep(delay).await;
            }
            if let Some(tx) = &events {
                let _ = tx.send(RevealEvent::Finished);
            }
        }));
    }

    /// Abandon the running sequence and clear the revealed set.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        {
            let mut progress = lock(&self.progress);
            progress.generation += 1;
            progress.pending.clear();
            progress.revealed.clear();
            progress.running = false;
        }
        if let Some(tx) = &self.events {
            let _ = tx.send(RevealEvent::Cancelled);
        }
    }

    /// Positions already revealed by the current sequence.
    pub fn revealed(&self) -> BTreeSet<usize> {
        lock(&self.progress).revealed.clone()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.progress).running
    }
}

impl Drop for RevealAnimator {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
