//! Reporter/Validator rendezvous
//!
//! The two terminal tasks finish each round together: the validator must not
//! accept a key whose report has not yet been presented, and the reporter
//! must not present a round the validator has already rejected the search
//! after. `arrive` exchanges a halt flag both ways, so each side learns in
//! the same call whether its peer is stopping.
//!
//! Built from a crossed pair of capacity-1 channels rather than a barrier
//! primitive: the ownership of each endpoint pins the protocol to exactly
//! two parties, and a dropped peer is observable as a closed channel.

use keybreak_core::{KeybreakError, Result};
use tokio::sync::mpsc;

// ----------------------------------------------------------------------------
// Rendezvous
// ----------------------------------------------------------------------------

/// One side of a two-party rendezvous.
#[derive(Debug)]
pub struct Rendezvous {
    to_peer: mpsc::Sender<bool>,
    from_peer: mpsc::Receiver<bool>,
}

impl Rendezvous {
    /// Meet the peer, offering our halt flag and returning theirs.
    ///
    /// Resolves only once both sides have arrived. Errors when the peer has
    /// dropped its side, which callers treat as the peer having exited.
    pub async fn arrive(&mut self, stop: bool) -> Result<bool> {
        self.to_peer
            .send(stop)
            .await
            .map_err(|_| KeybreakError::channel_error("rendezvous peer dropped"))?;
        self.from_peer
            .recv()
            .await
            .ok_or_else(|| KeybreakError::channel_error("rendezvous peer dropped"))
    }
}

/// Create both sides of a rendezvous.
pub fn rendezvous_pair() -> (Rendezvous, Rendezvous) {
    let (left_tx, left_rx) = mpsc::channel(1);
    let (right_tx, right_rx) = mpsc::channel(1);
    (
        Rendezvous {
            to_peer: left_tx,
            from_peer: right_rx,
        },
        Rendezvous {
            to_peer: right_tx,
            from_peer: left_rx,
        },
    )
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
    async fn both_sides_see_each_others_flag() {
        let (mut left, mut right) = rendezvous_pair();

        let left_task = tokio::spawn(async move { left.arrive(false).await });
        let right_task = tokio::spawn(async move { right.arrive(true).await });

        let left_saw = left_task.await.unwrap().unwrap();
        let right_saw = right_task.await.unwrap().unwrap();
        assert!(left_saw);
        assert!(!right_saw);
    }

    #[tokio::test]
    async fn arrive_blocks_until_peer_arrives() {
        let (mut left, mut right) = rendezvous_pair();

        let early = timeout(Duration::from_millis(50), left.arrive(false)).await;
        assert!(early.is_err());

        // The timed-out arrive already parked our flag in the slot, so the
        // peer can complete and we only need to collect their flag.
        let right_task = tokio::spawn(async move { right.arrive(false).await });
        let left_saw = timeout(Duration::from_secs(1), left.from_peer.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(!left_saw);
        assert!(!right_task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn dropped_peer_is_an_error() {
        let (mut left, right) = rendezvous_pair();
        drop(right);
        assert!(left.arrive(false).await.is_err());
    }
}
