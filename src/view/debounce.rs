/// Trailing-edge debounce
///
/// Values pushed through a [`Debouncer`] are coalesced: only the last value of a
/// burst is delivered, once `delay` has passed without a newer call. Superseded values
/// are dropped, not queued.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

enum Command<T> {
    Call(T),
    Cancel,
}

/// Equality test deciding whether a settled value repeats the previous one
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Command<T>>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + 'static,
{
    /// Spawns the debounce task on the current tokio runtime
    ///
    /// `on_settle` runs once per burst with the last value, unless `same` reports it
    /// equal to the value delivered last time.
    pub fn spawn<F>(delay: Duration, same: Comparator<T>, on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(Self::run(rx, delay, same, on_settle));
        Self { tx, task }
    }

    /// Schedules `value`, replacing any pending value and restarting the window
    pub fn call(&self, value: T) {
        if self.tx.send(Command::Call(value)).is_err() {
            tracing::warn!("Debounce task has stopped, dropping value");
        }
    }

    /// Discards the pending value, if any
    pub fn cancel(&self) {
        if self.tx.send(Command::Cancel).is_err() {
            tracing::warn!("Debounce task has stopped, nothing to cancel");
        }
    }

    async fn run<F>(
        mut rx: mpsc::UnboundedReceiver<Command<T>>,
        delay: Duration,
        same: Comparator<T>,
        mut on_settle: F,
    ) where
        F: FnMut(T),
    {
        let mut pending: Option<T> = None;
        let mut last: Option<T> = None;

        loop {
            let Some(value) = pending.take() else {
                match rx.recv().await {
                    Some(Command::Call(value)) => pending = Some(value),
                    Some(Command::Cancel) => {}
                    None => break,
                }
                continue;
            };

            tokio::select! {
                command = rx.recv() => match command {
                    Some(Command::Call(next)) => pending = Some(next),
                    Some(Command::Cancel) => {}
                    None => break,
                },
                () = tokio::time::sleep(delay) => {
                    if last.as_ref().is_some_and(|prev| same(prev, &value)) {
                        tracing::trace!("Debounced value repeats the previous one, skipping");
                        continue;
                    }
                    last = Some(value.clone());
                    on_settle(value);
                }
            }
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl FnMut(u32) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v| sink.lock().unwrap().push(v))
    }

    fn eq() -> Comparator<u32> {
        Arc::new(|a, b| a == b)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_delivers_only_last_value() {
        let (seen, sink) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(300), eq(), sink);

        debouncer.call(1);
        debouncer.call(2);
        debouncer.call(3);
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets_on_each_call() {
        let (seen, sink) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(300), eq(), sink);

        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_deliver() {
        let (seen, sink) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(300), eq(), sink);

        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_value_is_not_redelivered() {
        let (seen, sink) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(300), eq(), sink);

        debouncer.call(7);
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.call(7);
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending() {
        let (seen, sink) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(300), eq(), sink);

        debouncer.call(1);
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(seen.lock().unwrap().is_empty());
    }
}
