//! Per-item simulated work.

use std::time::Duration;

use async_trait::async_trait;

use crate::item::ItemId;

/// Hook awaited by each unit of work before its read-modify-write.
///
/// Must not block the thread: the batch keeps scheduling other units while
/// a unit is paused here.
#[async_trait]
pub trait WorkDelay: Send + Sync {
    async fn pause(&self, id: ItemId);
}

/// No simulated work.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl WorkDelay for NoDelay {
    async fn pause(&self, _id: ItemId) {}
}

/// Sleep for the same duration on every item.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

#[async_trait]
impl WorkDelay for FixedDelay {
    async fn pause(&self, _id: ItemId) {
        tokio::time::sleep(self.0).await;
    }
}
