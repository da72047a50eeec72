//! Single-flight token refresh.
//!
//! `Idle` until the first unauthorized response; the request that observes
//! it becomes the leader and performs the refresh, every later one queues
//! behind it. Completing the lease returns the gate to `Idle` and resolves
//! the queue in FIFO order with the same outcome.

use std::collections::VecDeque;
use std::sync::Mutex;

use futures::channel::oneshot;

use super::error::ApiError;

/// New access token, or the reason the refresh failed
pub type RefreshOutcome = Result<String, ApiError>;

enum RefreshState {
    Idle,
    Refreshing {
        waiters: VecDeque<oneshot::Sender<RefreshOutcome>>,
    },
}

pub struct RefreshGate {
    state: Mutex<RefreshState>,
}

/// What a caller must do after an unauthorized response
pub enum Ticket<'a> {
    /// Run the refresh, then complete the lease
    Leader(RefreshLease<'a>),
    /// Wait for the leader's outcome
    Follower(oneshot::Receiver<RefreshOutcome>),
}

/// Held by the leader for the duration of the refresh call.
///
/// Dropping it without `complete` (e.g. the leader future was dropped)
/// rejects the queue with `RefreshAborted` so nobody waits forever.
pub struct RefreshLease<'a> {
    gate: &'a RefreshGate,
    done: bool,
}

impl RefreshLease<'_> {
    /// Publish the outcome; returns how many queued requests were resolved
    pub fn complete(mut self, outcome: RefreshOutcome) -> usize {
        self.done = true;
        self.gate.finish(outcome)
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.gate.finish(Err(ApiError::RefreshAborted));
        }
    }
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RefreshState::Idle),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RefreshState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(*self.lock(), RefreshState::Refreshing { .. })
    }

    /// Requests currently parked behind the in-flight refresh
    pub fn queued(&self) -> usize {
        match &*self.lock() {
            RefreshState::Idle => 0,
            RefreshState::Refreshing { waiters } => waiters.len(),
        }
    }

    /// Idle -> Refreshing hands out the lease; Refreshing enqueues.
    pub fn join(&self) -> Ticket<'_> {
        let mut state = self.lock();
        if let RefreshState::Refreshing { waiters } = &mut *state {
            let (tx, rx) = oneshot::channel();
            waiters.push_back(tx);
            return Ticket::Follower(rx);
        }
        *state = RefreshState::Refreshing {
            waiters: VecDeque::new(),
        };
        Ticket::Leader(RefreshLease { gate: self, done: false })
    }

    fn finish(&self, outcome: RefreshOutcome) -> usize {
        let previous = std::mem::replace(&mut *self.lock(), RefreshState::Idle);
        let RefreshState::Refreshing { waiters } = previous else {
            return 0;
        };
        let count = waiters.len();
        for waiter in waiters {
            // A receiver that went away just means that request was dropped
            let _ = waiter.send(outcome.clone());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_follower(ticket: Ticket<'_>) -> oneshot::Receiver<RefreshOutcome> {
        match ticket {
            Ticket::Follower(rx) => rx,
            Ticket::Leader(_) => panic!("expected to queue behind the leader"),
        }
    }

    fn expect_leader(ticket: Ticket<'_>) -> RefreshLease<'_> {
        match ticket {
            Ticket::Leader(lease) => lease,
            Ticket::Follower(_) => panic!("expected to lead the refresh"),
        }
    }

    #[test]
    fn test_first_caller_leads_rest_queue() {
        let gate = RefreshGate::new();
        assert!(!gate.is_refreshing());

        let lease = expect_leader(gate.join());
        assert!(gate.is_refreshing());

        let mut first = expect_follower(gate.join());
        let mut second = expect_follower(gate.join());
        assert_eq!(gate.queued(), 2);

        assert_eq!(lease.complete(Ok("new".to_string())), 2);
        assert!(!gate.is_refreshing());
        assert_eq!(gate.queued(), 0);

        assert_eq!(first.try_recv().unwrap(), Some(Ok("new".to_string())));
        assert_eq!(second.try_recv().unwrap(), Some(Ok("new".to_string())));
    }

    #[test]
    fn test_failure_rejects_queue() {
        let gate = RefreshGate::new();
        let lease = expect_leader(gate.join());
        let mut waiter = expect_follower(gate.join());

        lease.complete(Err(ApiError::RefreshFailed("expired".to_string())));

        assert_eq!(
            waiter.try_recv().unwrap(),
            Some(Err(ApiError::RefreshFailed("expired".to_string())))
        );
    }

    #[test]
    fn test_dropped_lease_aborts_queue() {
        let gate = RefreshGate::new();
        let lease = expect_leader(gate.join());
        let mut waiter = expect_follower(gate.join());

        drop(lease);

        assert!(!gate.is_refreshing());
        assert_eq!(waiter.try_recv().unwrap(), Some(Err(ApiError::RefreshAborted)));
    }

    #[test]
    fn test_gate_reusable_after_completion() {
        let gate = RefreshGate::new();
        expect_leader(gate.join()).complete(Ok("one".to_string()));
        let lease = expect_leader(gate.join());
        assert_eq!(lease.complete(Ok("two".to_string())), 0);
    }
}
