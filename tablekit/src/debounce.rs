//! Debounced delivery of free-text input.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, trace};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type Callback<V> = Arc<dyn Fn(V) + Send + Sync>;

struct Inner<V> {
    draft: Option<V>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// Delays a callback until input has been quiet for an interval.
///
/// Every [`push`](Self::push) stores the value as the visible draft and
/// restarts the timer; the callback sees only the latest value. A zero
/// interval, or a push made outside a tokio runtime, fires immediately.
/// Dropping the debouncer cancels any pending delivery.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
/// use tablekit::debounce::Debouncer;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let search = Debouncer::new(Duration::ZERO, move |v: String| sink.lock().unwrap().push(v));
/// search.push("an".to_string());
/// assert_eq!(*seen.lock().unwrap(), vec!["an".to_string()]);
/// ```
pub struct Debouncer<V> {
    delay: Duration,
    callback: Callback<V>,
    inner: Arc<Mutex<Inner<V>>>,
}

impl<V> std::fmt::Debug for Debouncer<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &lock(&self.inner).pending.is_some())
            .finish()
    }
}

fn lock<V>(inner: &Mutex<Inner<V>>) -> MutexGuard<'_, Inner<V>> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<V: Clone + Send + 'static> Debouncer<V> {
    pub fn new(delay: Duration, callback: impl Fn(V) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            callback: Arc::new(callback),
            inner: Arc::new(Mutex::new(Inner {
                draft: None,
                generation: 0,
                pending: None,
            })),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The most recently pushed value.
    pub fn draft(&self) -> Option<V> {
        lock(&self.inner).draft.clone()
    }

    /// Check if a delivery is scheduled.
    pub fn is_pending(&self) -> bool {
        lock(&self.inner).pending.is_some()
    }

    /// Records `value` and (re)starts the timer.
    pub fn push(&self, value: V) {
        let handle = if self.delay.is_zero() {
            None
        } else {
            Handle::try_current().ok()
        };

        let mut guard = lock(&self.inner);
        guard.draft = Some(value.clone());
        guard.generation += 1;
        if let Some(previous) = guard.pending.take() {
            previous.abort();
        }

        let Some(handle) = handle else {
            drop(guard);
            if !self.delay.is_zero() {
                debug!("No tokio runtime, delivering debounced value immediately");
            }
            (self.callback)(value);
            return;
        };

        let generation = guard.generation;
        let delay = self.delay;
        let inner = Arc::clone(&self.inner);
        let callback = Arc::clone(&self.callback);
        guard.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut guard = lock(&inner);
                if guard.generation != generation {
                    return;
                }
                guard.pending = None;
            }
            trace!("Debounce interval elapsed");
            callback(value);
        }));
    }

    /// Delivers the draft now if a delivery was pending.
    pub fn flush(&self) -> bool {
        let value = {
            let mut guard = lock(&self.inner);
            let Some(pending) = guard.pending.take() else {
                return false;
            };
            pending.abort();
            guard.generation += 1;
            guard.draft.clone()
        };
        match value {
            Some(value) => {
                (self.callback)(value);
                true
            }
            None => false,
        }
    }

    /// Drops a pending delivery. The draft is kept.
    pub fn cancel(&self) -> bool {
        let mut guard = lock(&self.inner);
        guard.generation += 1;
        match guard.pending.take() {
            Some(pending) => {
                pending.abort();
                true
            }
            None => false,
        }
    }
}

impl<V> Drop for Debouncer<V> {
    fn drop(&mut self) {
        let mut guard = lock(&self.inner);
        guard.generation += 1;
        if let Some(pending) = guard.pending.take() {
            pending.abort();
        }
    }
}
