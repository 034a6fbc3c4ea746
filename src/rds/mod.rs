mod client;
mod model;
mod provider;
mod signature;

pub use client::{RdsClient, RdsError};
pub use model::SlowLogRecord;
pub use provider::{SlowLogBatch, SlowLogSource};

#[cfg(test)]
pub(crate) use provider::MockSlowLogSource;
