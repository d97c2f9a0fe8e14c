//! Per-user task definitions
use crate::error::ScenarioError;
use bankload_core::TaskOrder;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::fmt;
use std::future::Future;

/// Behaviour of one virtual user.
///
/// A fresh value is built by [`TaskSet::on_start`] for every virtual user; it
/// then keeps running tasks picked from [`TaskSet::TASKS`] until the scenario
/// stops.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy, Debug)]
/// enum Task {
///     CreateUser,
///     GetAccounts,
/// }
///
/// impl TaskSet for GetAccounts {
///     type Context = Gateway;
///     type Task = Task;
///     type Error = Infallible;
///
///     const TASKS: &'static [(Task, u32)] = &[(Task::CreateUser, 1), (Task::GetAccounts, 4)];
///
///     async fn on_start(gateway: &Gateway) -> Result<Self, Infallible> {
///         Ok(GetAccounts { gateway: gateway.clone(), user: None })
///     }
///
///     async fn run(&mut self, task: Task) {
///         // ...
///     }
/// }
/// ```
pub trait TaskSet: Sized + Send + 'static {
    /// Shared state handed to every virtual user, e.g. clients and seed data.
    type Context: Clone + Send + Sync + 'static;
    type Task: Copy + fmt::Debug + Send + Sync + 'static;
    type Error: fmt::Display + Send;

    /// Tasks with their relative weights.
    const TASKS: &'static [(Self::Task, u32)];
    const ORDER: TaskOrder = TaskOrder::Weighted;

    fn on_start(context: &Self::Context) -> impl Future<Output = Result<Self, Self::Error>> + Send;

    fn run(&mut self, task: Self::Task) -> impl Future<Output = ()> + Send;

    /// Called when a user finishes its iterations. Not called for users that are
    /// still running when the scenario duration elapses.
    fn on_stop(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }
}

#[derive(Clone, Debug)]
pub(crate) enum TaskPicker<T> {
    Weighted {
        tasks: Vec<T>,
        index: WeightedIndex<u32>,
    },
    Sequential {
        tasks: Vec<T>,
        next: usize,
    },
}

impl<T: Copy> TaskPicker<T> {
    pub fn new(tasks: &[(T, u32)], order: TaskOrder) -> Result<Self, ScenarioError> {
        if tasks.is_empty() {
            return Err(ScenarioError::NoTasks);
        }

        let picker = match order {
            TaskOrder::Weighted => TaskPicker::Weighted {
                tasks: tasks.iter().map(|(task, _)| *task).collect(),
                index: WeightedIndex::new(tasks.iter().map(|(_, weight)| *weight))?,
            },
            TaskOrder::Sequential => TaskPicker::Sequential {
                tasks: tasks.iter().map(|(task, _)| *task).collect(),
                next: 0,
            },
        };
        Ok(picker)
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> T {
        match self {
            TaskPicker::Weighted { tasks, index } => tasks[index.sample(rng)],
            TaskPicker::Sequential { tasks, next } => {
                let task = tasks[*next];
                *next = (*next + 1) % tasks.len();
                task
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn rejects_empty_task_list() {
        let res = TaskPicker::<u8>::new(&[], TaskOrder::Weighted);
        assert!(matches!(res, Err(ScenarioError::NoTasks)));
    }

    #[test]
    fn rejects_zero_weights() {
        let res = TaskPicker::new(&[('a', 0), ('b', 0)], TaskOrder::Weighted);
        assert!(matches!(res, Err(ScenarioError::InvalidWeights(_))));
    }

    #[test]
    fn sequential_wraps_around() {
        let mut picker = TaskPicker::new(&[('a', 0), ('b', 5), ('c', 1)], TaskOrder::Sequential).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let picked: String = (0..7).map(|_| picker.next(&mut rng)).collect();
        assert_eq!(picked, "abcabca");
    }

    #[test]
    fn weighted_follows_weights() {
        let mut picker = TaskPicker::new(&[('a', 2), ('b', 2), ('c', 6), ('d', 0)], TaskOrder::Weighted).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            counts[(picker.next(&mut rng) as u8 - b'a') as usize] += 1;
        }
        assert_eq!(counts[3], 0);
        assert!(counts[2] > 5_500 && counts[2] < 6_500, "{counts:?}");
        assert!(counts[0] > 1_600 && counts[0] < 2_400, "{counts:?}");
    }
}
