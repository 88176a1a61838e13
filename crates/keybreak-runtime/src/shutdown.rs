//! Cooperative shutdown
//!
//! A watch-based cancellation token shared by every pipeline task. Tasks
//! never poll: they race their blocking receives against `wait()`, so a
//! shutdown request is observed at the next await point rather than on the
//! next trip around a spin loop.

use tokio::sync::watch;

// ----------------------------------------------------------------------------
// Shutdown Handle and Token
// ----------------------------------------------------------------------------

/// Owning side of the shutdown signal, held by the pipeline supervisor.
#[derive(Debug)]
pub struct ShutdownHandle {
    sender: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Request shutdown of every task holding a token.
    pub fn shutdown(&self) {
        // Receivers treat a dropped sender as shutdown too, so a failed
        // send only means every task already exited.
        let _ = self.sender.send(true);
    }

    /// Create another token observing this handle.
    pub fn token(&self) -> ShutdownToken {
        ShutdownToken {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Per-task view of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownToken {
    receiver: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Whether shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once shutdown is requested. A dropped handle counts as a
    /// shutdown request.
    pub async fn wait(&mut self) {
        loop {
            if *self.receiver.borrow_and_update() {
                return;
            }
            if self.receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Create a shutdown handle and its first token.
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownToken) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownHandle { sender }, ShutdownToken { receiver })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn token_resolves_after_shutdown() {
        let (handle, mut token) = shutdown_channel();
        assert!(!token.is_shutdown());

        handle.shutdown();
        timeout(Duration::from_secs(1), token.wait())
            .await
            .expect("token should resolve");
        assert!(token.is_shutdown());
    }

    #[tokio::test]
    async fn token_resolves_when_handle_dropped() {
        let (handle, mut token) = shutdown_channel();
        drop(handle);
        timeout(Duration::from_secs(1), token.wait())
            .await
            .expect("dropped handle counts as shutdown");
    }

    #[tokio::test]
    async fn late_subscribers_see_prior_shutdown() {
        let (handle, _token) = shutdown_channel();
        handle.shutdown();

        let mut late = handle.token();
        assert!(late.is_shutdown());
        timeout(Duration::from_secs(1), late.wait())
            .await
            .expect("late token should resolve immediately");
    }
}
