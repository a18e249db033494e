//! Per-item pipeline outcomes.

use serde::{Deserialize, Serialize};

use crate::classify::RejectReason;

/// What the pipeline did for one work item.
///
/// Failures are not a variant here: item-level errors travel as the `Err`
/// side of the processing result and are matched once, at the orchestrator
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemOutcome {
    /// Downloaded as needed, transcoded, and uploaded.
    Completed,
    /// Remote artifact already existed; nothing to do.
    AlreadyUploaded,
    /// Rejected by classification before any disk or store work.
    Skipped(RejectReason),
}

impl ItemOutcome {
    /// Whether the item ended with the remote artifact in place.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Completed | Self::AlreadyUploaded)
    }
}
