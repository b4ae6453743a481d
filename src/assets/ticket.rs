//! Background loading
//!
//! Parsing runs on a worker thread and the finished document is handed back
//! over a channel. The frame thread polls the ticket once per frame and
//! runs the continuation (scene insertion) itself, so scene data is never
//! shared across threads.

use crate::errors::{PlayerError, Result};

/// Outcome of polling a [`LoadTicket`].
#[derive(Debug)]
pub enum LoadStatus<T> {
    Pending,
    Ready(T),
    Failed(PlayerError),
}

/// Receiving end of a background load.
#[derive(Debug)]
pub struct LoadTicket<T> {
    label: String,
    receiver: flume::Receiver<Result<T>>,
}

impl<T: Send + 'static> LoadTicket<T> {
    /// Runs `job` on a named worker thread.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn<F>(label: impl Into<String>, job: F) -> Result<Self>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let label = label.into();
        let (sender, receiver) = flume::bounded(1);

        std::thread::Builder::new()
            .name(format!("asset-loader:{label}"))
            .spawn(move || {
                // The ticket may have been dropped; nobody is waiting then.
                let _ = sender.send(job());
            })?;

        log::debug!("Started background load of {label}");
        Ok(Self { label, receiver })
    }

    /// A ticket whose result is already known (synchronous platforms).
    pub fn ready(label: impl Into<String>, result: Result<T>) -> Self {
        let (sender, receiver) = flume::bounded(1);
        let _ = sender.send(result);
        Self {
            label: label.into(),
            receiver,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Non-blocking check for the result.
    pub fn poll(&self) -> LoadStatus<T> {
        match self.receiver.try_recv() {
            Ok(Ok(value)) => LoadStatus::Ready(value),
            Ok(Err(e)) => LoadStatus::Failed(e),
            Err(flume::TryRecvError::Empty) => LoadStatus::Pending,
            Err(flume::TryRecvError::Disconnected) => LoadStatus::Failed(PlayerError::LoadChannelClosed),
        }
    }

    /// Blocks until the load finishes.
    pub fn wait(self) -> Result<T> {
        self.receiver
            .recv()
            .map_err(|_| PlayerError::LoadChannelClosed)?
    }
}
