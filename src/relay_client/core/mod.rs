mod dispatcher;
mod reducer;
mod scheduler;
mod synchronizer;

#[cfg(test)]
mod fake;

pub use dispatcher::CommandDispatcher;
pub use reducer::{reduce, PollOutcome};
pub use scheduler::RepeatingTask;
pub use synchronizer::{PollHandle, Synchronizer, DEFAULT_POLL_INTERVAL};
