//! The crawl frontier
//!
//! A FIFO of pending URLs shared by all workers. Besides the queue itself the
//! frontier counts how many popped entries are still being processed, which is
//! what lets an idle worker tell "momentarily empty" apart from "done":
//!
//! - queue non-empty: hand out the next entry
//! - queue empty, entries in flight: wait, a sibling may still push links
//! - queue empty, nothing in flight: the crawl has drained
//!
//! No uniqueness is enforced; the same URL may be queued many times.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;

/// A URL waiting to be fetched, with its distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    /// The entry a crawl starts from
    pub fn seed(url: impl Into<String>) -> Self {
        Self::new(url, 0)
    }
}

/// Result of a non-blocking pop
#[derive(Debug)]
pub enum Pop<'a> {
    /// An entry, claimed until the returned [`Claim`] is dropped
    Entry(Claim<'a>),
    /// Queue is empty but other entries are still being processed
    Idle,
    /// Queue is empty and nothing is in flight
    Drained,
}

#[derive(Debug, Default)]
struct Queue {
    entries: VecDeque<FrontierEntry>,
    in_flight: usize,
}

/// Shared work queue with quiescence tracking
#[derive(Debug, Default)]
pub struct Frontier {
    queue: Mutex<Queue>,
    notify: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        // Nothing in the queue can be left half-updated by a panic
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Appends an entry; never blocks
    pub fn push(&self, entry: FrontierEntry) {
        tracing::trace!("Queued {} at depth {}", entry.url, entry.depth);
        self.lock().entries.push_back(entry);
        self.notify.notify_waiters();
    }

    /// Pops the next entry without waiting
    pub fn pop(&self) -> Pop<'_> {
        let mut queue = self.lock();
        match queue.entries.pop_front() {
            Some(entry) => {
                queue.in_flight += 1;
                Pop::Entry(Claim {
                    frontier: self,
                    entry,
                })
            }
            None if queue.in_flight == 0 => Pop::Drained,
            None => Pop::Idle,
        }
    }

    /// Waits for the next entry
    ///
    /// Returns `None` once the frontier has drained or `stop` reports true.
    /// `stop` is re-evaluated every time the frontier is woken, so callers must
    /// call [`Frontier::wake_all`] after changing whatever it observes.
    pub async fn next_entry(&self, stop: impl Fn() -> bool) -> Option<Claim<'_>> {
        loop {
            // Register for wake-ups before looking, so a push or completion
            // between the check and the await is not missed
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if stop() {
                return None;
            }

            match self.pop() {
                Pop::Entry(claim) => return Some(claim),
                Pop::Drained => return None,
                Pop::Idle => notified.await,
            }
        }
    }

    /// Wakes every worker waiting in [`Frontier::next_entry`]
    pub fn wake_all(&self) {
        self.notify.notify_waiters();
    }

    fn complete(&self) {
        {
            let mut queue = self.lock();
            queue.in_flight = queue.in_flight.saturating_sub(1);
        }
        self.notify.notify_waiters();
    }

    /// Number of entries waiting to be popped
    pub fn queued(&self) -> usize {
        self.lock().entries.len()
    }

    /// Number of popped entries still being processed
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }
}

/// A popped entry that counts as in flight until dropped
///
/// Dropping the claim (including during a panic) marks the entry complete and
/// wakes waiting workers.
#[derive(Debug)]
pub struct Claim<'a> {
    frontier: &'a Frontier,
    entry: FrontierEntry,
}

impl Claim<'_> {
    pub fn entry(&self) -> &FrontierEntry {
        &self.entry
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.frontier.complete();
    }
}
