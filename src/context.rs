// src/context.rs

//! Caller-supplied cancellation for `RateLimiter::wait`.
//!
//! A [`Context`] carries an optional deadline and an optional cancel signal.
//! The limiter never owns a timeout itself; callers decide how long they are
//! willing to wait by passing a context.
//!
//! ```rust
//! use std::time::Duration;
//! use token_limiter::Context;
//!
//! let ctx = Context::with_timeout(Duration::from_millis(500));
//! let (ctx, handle) = ctx.with_cancel();
//! assert!(ctx.err().is_none());
//!
//! handle.cancel();
//! assert!(ctx.err().is_some());
//! ```

// dependencies
use crate::errors::WaitError;
use parking_lot::Mutex;
use std::future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{Instant, sleep_until};

/// Shared flag flipped by a `CancelHandle`. Cancelling a signal cancels every
/// signal derived from it.
#[derive(Debug, Default)]
struct Signal {
    cancelled: AtomicBool,
    notify: Notify,
    children: Mutex<Vec<Weak<Signal>>>,
}

impl Signal {
    fn child_of(parent: Option<&Arc<Signal>>) -> Arc<Signal> {
        let child = Arc::new(Signal::default());
        if let Some(parent) = parent {
            let mut children = parent.children.lock();
            children.retain(|c| c.strong_count() > 0);
            children.push(Arc::downgrade(&child));
            drop(children);
            // the parent may have been cancelled before the push landed
            if parent.is_cancelled() {
                child.cancel();
            }
        }
        child
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        self.notify.notify_waiters();
        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }

    async fn cancelled(&self) {
        loop {
            // registered before the flag check so a concurrent cancel is not missed
            let notified = self.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Cancellation context passed to `wait`. Cheap to clone; clones observe the
/// same deadline and cancel signal.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    signal: Option<Arc<Signal>>,
}

impl Context {
    /// A context that never fires.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that fires with `DeadlineExceeded` after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::background(),
        }
    }

    /// A context that fires with `DeadlineExceeded` at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            signal: None,
        }
    }

    /// Derive a context that additionally fires with `Cancelled` once the
    /// returned handle is used. The deadline is kept, and cancelling the
    /// parent also cancels the derived context.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let signal = Signal::child_of(self.signal.as_ref());
        let ctx = Self {
            deadline: self.deadline,
            signal: Some(Arc::clone(&signal)),
        };
        (ctx, CancelHandle { signal })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Non-blocking probe: the error `done` would resolve to, if the context
    /// has already fired.
    pub fn err(&self) -> Option<WaitError> {
        if self.signal.as_ref().is_some_and(|s| s.is_cancelled()) {
            return Some(WaitError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(WaitError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context fires. Pending forever for `background()`.
    pub async fn done(&self) -> WaitError {
        let cancelled = async {
            match &self.signal {
                Some(signal) => signal.cancelled().await,
                None => future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => WaitError::Cancelled,
            _ = expired => WaitError::DeadlineExceeded,
        }
    }
}

/// Handle that cancels the context it was created with (and all its clones).
#[derive(Debug, Clone)]
pub struct CancelHandle {
    signal: Arc<Signal>,
}

impl CancelHandle {
    /// Cancel the associated context. Calling this more than once is a no-op.
    pub fn cancel(&self) {
        self.signal.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }
}
