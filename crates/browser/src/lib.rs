//! Default-browser launcher.
//!
//! URLs are queued to a single dispatch task which opens them one at a time
//! on the blocking pool, so neither the caller nor the runtime's async
//! workers wait on the browser. Results are logged, never returned.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Requests that can wait in the queue before new ones are dropped.
pub const QUEUE_CAPACITY: usize = 8;

/// Function that hands a URL to the OS.
pub type OpenFn = Arc<dyn Fn(&str) -> std::io::Result<()> + Send + Sync + 'static>;

/// Errors from queueing a URL.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("launch queue is full")]
    QueueFull,

    #[error("launcher is shut down")]
    Closed,
}

/// Handle to the dispatch task.
pub struct Launcher {
    tx: mpsc::Sender<String>,
    task: JoinHandle<()>,
}

impl Launcher {
    /// Spawns a launcher that opens URLs in the system default browser.
    pub fn spawn() -> Self {
        Self::with_opener(Arc::new(|url: &str| open::that(url)))
    }

    /// Spawns a launcher using a custom open function.
    pub fn with_opener(opener: OpenFn) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let task = tokio::spawn(dispatch_loop(rx, opener));
        Self { tx, task }
    }

    /// Queues `url` for opening. Returns immediately.
    pub fn open(&self, url: impl Into<String>) -> Result<(), LaunchError> {
        self.tx.try_send(url.into()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => LaunchError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => LaunchError::Closed,
        })
    }

    /// Stops accepting URLs and waits for queued ones to be handed off.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            tracing::error!("browser dispatch task failed: {e}");
        }
    }
}

async fn dispatch_loop(mut rx: mpsc::Receiver<String>, opener: OpenFn) {
    while let Some(url) = rx.recv().await {
        let opener = Arc::clone(&opener);
        let target = url.clone();
        match tokio::task::spawn_blocking(move || opener(&target)).await {
            Ok(Ok(())) => tracing::info!(%url, "opened in browser"),
            Ok(Err(e)) => tracing::warn!(%url, "failed to open browser: {e}"),
            Err(e) => tracing::error!(%url, "browser open task panicked: {e}"),
        }
    }
    tracing::debug!("browser dispatch loop finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    fn recording() -> (OpenFn, Arc<Mutex<Vec<String>>>) {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&opened);
        let opener: OpenFn = Arc::new(move |url: &str| {
            sink.lock().unwrap().push(url.to_string());
            Ok(())
        });
        (opener, opened)
    }

    #[tokio::test]
    async fn opens_in_order() {
        let (opener, opened) = recording();
        let launcher = Launcher::with_opener(opener);

        launcher.open("https://example.com/1").unwrap();
        launcher.open("https://example.com/2").unwrap();
        launcher.shutdown().await;

        assert_eq!(
            *opened.lock().unwrap(),
            vec!["https://example.com/1", "https://example.com/2"]
        );
    }

    #[tokio::test]
    async fn open_failure_is_swallowed() {
        let opener: OpenFn = Arc::new(|_url: &str| Err(std::io::Error::other("no browser")));
        let launcher = Launcher::with_opener(opener);

        launcher.open("https://example.com/").unwrap();
        launcher.open("https://example.com/again").unwrap();
        launcher.shutdown().await;
    }

    #[tokio::test]
    async fn full_queue_rejects() {
        let gate = Arc::new(std::sync::Barrier::new(2));
        let blocker = Arc::clone(&gate);
        let opener: OpenFn = Arc::new(move |_url: &str| {
            blocker.wait();
            Ok(())
        });
        let launcher = Launcher::with_opener(opener);

        // First request is taken by the dispatch task and parks on the barrier.
        launcher.open("https://example.com/0").unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        for i in 0..QUEUE_CAPACITY {
            launcher.open(format!("https://example.com/{}", i + 1)).unwrap();
        }
        assert!(matches!(
            launcher.open("https://example.com/overflow"),
            Err(LaunchError::QueueFull)
        ));

        // Release the parked request and every queued one.
        for _ in 0..=QUEUE_CAPACITY {
            let gate = Arc::clone(&gate);
            tokio::task::spawn_blocking(move || gate.wait()).await.unwrap();
        }
        launcher.shutdown().await;
    }
}
