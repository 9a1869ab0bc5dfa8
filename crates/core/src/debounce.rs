use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::submission::BoxFuture;

/// Quiescence window applied to prompt submissions.
pub const DEFAULT_SUBMIT_DEBOUNCE: Duration = Duration::from_millis(2_000);

type Callback<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Trailing-edge debouncer owned by a view's lifecycle.
///
/// Each `call` restarts the window and replaces the pending value. When the
/// window elapses the callback is spawned with the most recent value; an
/// invocation that already started is never aborted by later calls.
pub struct Debouncer<T> {
    runtime: Handle,
    window: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    pub fn new<F>(runtime: Handle, window: Duration, callback: F) -> Self
    where
        F: Fn(T) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self {
            runtime,
            window,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn call(&self, value: T) {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let callback = Arc::clone(&self.callback);
        let window = self.window;
        let runtime = self.runtime.clone();
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(window).await;
            // Detach so a newer call cannot abort a submission already in flight.
            runtime.spawn(callback(value));
        }));
    }

    /// Drops the pending invocation, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                was_waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn recording_debouncer(
        window: Duration,
    ) -> (Debouncer<String>, Arc<Mutex<Vec<String>>>, Arc<AtomicUsize>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let debouncer = {
            let seen = Arc::clone(&seen);
            let calls = Arc::clone(&calls);
            Debouncer::new(Handle::current(), window, move |value: String| {
                let seen = Arc::clone(&seen);
                let calls = Arc::clone(&calls);
                Box::pin(async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    seen.lock().push(value);
                }) as BoxFuture<'static, ()>
            })
        };
        (debouncer, seen, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_calls_fires_once_with_last_value() {
        let (debouncer, seen, calls) = recording_debouncer(DEFAULT_SUBMIT_DEBOUNCE);

        for index in 0..5 {
            debouncer.call(format!("value-{index}"));
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2_500)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock(), vec!["value-4".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_outside_the_window_fire_separately() {
        let (debouncer, seen, _) = recording_debouncer(Duration::from_millis(100));

        debouncer.call("first".to_string());
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.call("second".to_string());
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*seen.lock(), vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_pending_invocation() {
        let (debouncer, _, calls) = recording_debouncer(DEFAULT_SUBMIT_DEBOUNCE);

        debouncer.call("never".to_string());
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_debouncer_cancels_it() {
        let (debouncer, _, calls) = recording_debouncer(DEFAULT_SUBMIT_DEBOUNCE);

        debouncer.call("teardown".to_string());
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
