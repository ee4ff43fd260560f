//! Interruption signal shared between a batch and whoever started it.
//!
//! Raising the signal makes every unit still in its delay step give up.
//! The processor only ever reads the signal; it stays raised until the
//! owner calls [`Interrupt::clear`].

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct Interrupt {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl Interrupt {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn raise(&self) {
        self.tx.send_replace(true);
    }

    pub fn clear(&self) {
        self.tx.send_replace(false);
    }

    pub fn is_raised(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the signal is raised (immediately if it already is).
    pub async fn raised(&self) {
        let mut rx = self.tx.subscribe();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender dropped: the signal can no longer be raised.
                std::future::pending::<()>().await;
            }
        }
    }
}
