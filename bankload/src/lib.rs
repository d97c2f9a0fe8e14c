#![doc = include_str!("../README.md")]

mod atomics;
pub mod error;
mod measurement;
pub mod scenario;
pub mod task_set;
pub mod transaction;

pub use bankload_core as core;
pub use error::ScenarioError;
pub use scenario::{ConfigurableScenario, Scenario};
pub use task_set::TaskSet;
pub use transaction::transaction_hook;

pub mod prelude {
    pub use crate::scenario::{ConfigurableScenario, Scenario};
    pub use crate::task_set::TaskSet;
    pub use crate::transaction::transaction_hook;
    pub use bankload_core::{RunStatistics, TaskOrder, TransactionStatistics, WaitTime};
}
