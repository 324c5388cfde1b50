use crate::relay_client::models::{DeviceStatus, SyncSnapshot};

/// Result of one status fetch, stripped of error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Success(DeviceStatus),
    Failure,
}

/// Fold a poll outcome into the previous snapshot.
///
/// Success replaces everything. Failure only drops connectivity and keeps the
/// last observed relay states.
pub fn reduce(previous: &SyncSnapshot, outcome: &PollOutcome) -> SyncSnapshot {
    match outcome {
        PollOutcome::Success(status) => SyncSnapshot::from_status(*status),
        PollOutcome::Failure => previous.disconnected(),
    }
}
