use rand::distributions::WeightedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Task set declares no tasks")]
    NoTasks,

    #[error("Task weights are invalid: {0}")]
    InvalidWeights(#[from] WeightedError),

    #[error("Spawn rate must be positive, got {0}")]
    InvalidSpawnRate(f64),
}
