use serde::Serialize;

use super::error::TaskError;
use crate::item::{Item, ItemId};

/// Terminal state of one unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Found, marked processed and persisted. Holds the persisted item.
    Processed(Item),
    /// The id was in the snapshot but no longer in the store.
    Missing,
    /// Read, write or delay step failed.
    Failed(TaskError),
}

/// Summary of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Number of identifiers in the snapshot.
    pub requested: usize,
    /// Persisted items, in snapshot order.
    pub processed: Vec<Item>,
    pub missing: Vec<ItemId>,
    #[serde(serialize_with = "serialize_failures")]
    pub failed: Vec<(ItemId, TaskError)>,
    /// Whether the interruption signal was raised when the batch finished.
    pub interrupted: bool,
}

impl BatchReport {
    /// Fold per-unit outcomes, in snapshot order, into a report.
    pub(crate) fn collect(
        outcomes: impl IntoIterator<Item = (ItemId, TaskOutcome)>,
        interrupted: bool,
    ) -> Self {
        let mut report = BatchReport {
            interrupted,
            ..Default::default()
        };

        for (id, outcome) in outcomes {
            report.requested += 1;
            match outcome {
                TaskOutcome::Processed(item) => report.processed.push(item),
                TaskOutcome::Missing => report.missing.push(id),
                TaskOutcome::Failed(err) => report.failed.push((id, err)),
            }
        }

        report
    }

    pub fn succeeded(&self) -> usize {
        self.processed.len()
    }

    /// True when every requested id ended up processed.
    pub fn is_complete(&self) -> bool {
        self.processed.len() == self.requested
    }

    pub fn into_items(self) -> Vec<Item> {
        self.processed
    }
}

fn serialize_failures<S>(failed: &[(ItemId, TaskError)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    let mut seq = serializer.serialize_seq(Some(failed.len()))?;
    for (id, err) in failed {
        seq.serialize_element(&serde_json::json!({ "id": id, "error": err.to_string() }))?;
    }
    seq.end()
}
