//! Trailing-edge debounce for the keystroke stream.
//!
//! [`RateLimiter::observe`] stores the latest value and re-arms a single
//! timer `window` into the future. Only when the timer fires without being
//! re-armed is the stored value handed to the subscribed handler. Values
//! overwritten during a burst are dropped, never queued.
//!
//! There is at most one pending timer at any time. Each re-arm bumps a
//! generation counter, and a timer that wakes up with a stale generation
//! does nothing, so an aborted timer that already woke cannot emit.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

type Handler = Box<dyn FnMut(String) + Send>;

#[derive(Default)]
struct Inner {
    handler: Option<Handler>,
    pending: Option<String>,
    timer: Option<JoinHandle<()>>,
    generation: u64,
    /// Identifies the current subscription so a stale handle cannot
    /// detach a newer one.
    subscription: u64,
}

impl Inner {
    fn disarm(&mut self) {
        self.generation += 1;
        self.pending = None;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Debounces a stream of text values into settled values.
///
/// Clones share the same timer and handler.
#[derive(Clone)]
pub struct RateLimiter {
    window: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records `value` as the latest input and restarts the quiet window.
    ///
    /// A no-op while nothing is subscribed. Empty strings are debounced
    /// like any other value.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime while a handler is subscribed.
    pub fn observe(&self, value: impl Into<String>) {
        let mut inner = self.inner.lock();
        if inner.handler.is_none() {
            return;
        }

        inner.disarm();
        inner.pending = Some(value.into());
        let generation = inner.generation;
        let shared = Arc::downgrade(&self.inner);
        let window = self.window;
        inner.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            fire(&shared, generation);
        }));
    }

    /// Drops the pending value and cancels the timer without detaching the
    /// handler.
    pub fn discard_pending(&self) {
        self.inner.lock().disarm();
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    /// Registers `handler` to receive settled values, replacing any previous
    /// handler and discarding anything pending for it.
    ///
    /// The handler runs on the timer task with the limiter locked; it must
    /// not call back into this limiter.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(String) + Send + 'static,
    {
        let mut inner = self.inner.lock();
        inner.disarm();
        inner.handler = Some(Box::new(handler));
        inner.subscription += 1;
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id: inner.subscription,
            active: true,
        }
    }
}

fn fire(shared: &Weak<Mutex<Inner>>, generation: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let mut inner = shared.lock();
    if inner.generation != generation {
        return;
    }
    inner.timer = None;
    let Some(value) = inner.pending.take() else {
        return;
    };
    if let Some(handler) = inner.handler.as_mut() {
        tracing::debug!(term = %value, "keystroke stream settled");
        handler(value);
    }
}

/// Handle returned by [`RateLimiter::subscribe`].
///
/// Cancelling (or dropping) it cancels the pending timer and detaches the
/// handler; later [`RateLimiter::observe`] calls are ignored until the next
/// subscribe. Once `cancel` returns, the handler is never invoked again.
pub struct Subscription {
    inner: Weak<Mutex<Inner>>,
    id: u64,
    active: bool,
}

impl Subscription {
    pub fn cancel(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let Some(shared) = self.inner.upgrade() else {
            return;
        };
        let mut inner = shared.lock();
        if inner.subscription != self.id {
            return;
        }
        inner.disarm();
        inner.handler = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
