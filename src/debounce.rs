//! Latest-wins debouncing on the tokio timer

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delivers a value on a channel once no newer value has been scheduled for
/// `window`
///
/// Scheduling aborts the previous timer, so at most one value is pending.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    sender: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, sender: UnboundedSender<T>) -> Self {
        Self {
            window,
            sender,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace whatever is pending with `value`
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let window = self.window;
        let sender = self.sender.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Receiver gone means the UI is shutting down
            let _ = sender.send(value);
        }));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
