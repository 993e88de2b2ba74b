//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast handle every long-running task subscribes to.
///
/// Cloning shares the same channel, so a signal watcher and the server can
/// each hold one.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify every subscriber. Returns how many were listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_clones() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        let other = shutdown.clone();

        assert_eq!(other.trigger(), 1);
        assert!(rx.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_without_subscribers() {
        assert_eq!(Shutdown::new().trigger(), 0);
    }
}
