use tokio::task::JoinHandle;

use super::error::ProcessError;
use super::report::BatchReport;
use crate::item::Item;

/// Handle to a batch running in the background.
///
/// Returned immediately by [`BatchProcessor::spawn`](super::BatchProcessor::spawn);
/// resolves once every unit of the batch has finished.
#[derive(Debug)]
pub struct BatchHandle {
    inner: JoinHandle<Result<BatchReport, ProcessError>>,
}

impl BatchHandle {
    pub(crate) fn new(inner: JoinHandle<Result<BatchReport, ProcessError>>) -> Self {
        Self { inner }
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Stop waiting on the batch. Units already scheduled run to completion
    /// on their own; the handle then resolves to [`ProcessError::Aborted`].
    pub fn abort(&self) {
        self.inner.abort();
    }

    /// Wait for the batch and return its report.
    pub async fn wait(self) -> Result<BatchReport, ProcessError> {
        match self.inner.await {
            Ok(result) => result,
            Err(e) => Err(ProcessError::Aborted(e.to_string())),
        }
    }

    /// Wait for the batch and return only the processed items.
    pub async fn items(self) -> Result<Vec<Item>, ProcessError> {
        Ok(self.wait().await?.into_items())
    }
}
