//! Scenario logic
use crate::atomics::{rate_limiter, TransactionAtomics};
use crate::error::ScenarioError;
use crate::task_set::{TaskPicker, TaskSet};
use crate::transaction::{TransactionData, TRANSACTION_HOOK};
use bankload_core::{RunStatistics, ScenarioConfig, WaitTime};
use rand::{rngs::SmallRng, SeedableRng};
use std::{
    future::Future,
    num::{NonZeroU32, NonZeroUsize},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};
use tokio::{task::JoinSet, time::Instant};
use tracing::{debug, error, info, info_span, instrument, trace, warn, Instrument};

/// Load test scenario structure
///
/// Runs the virtual users of a [`TaskSet`] when awaited and resolves to the
/// statistics of every transaction they made.
pub struct Scenario<T: TaskSet> {
    context: T::Context,
    config: ScenarioConfig,
    runner_fut: Option<Pin<Box<dyn Future<Output = Result<RunStatistics, ScenarioError>> + Send>>>,
}

impl<T: TaskSet> Scenario<T> {
    pub fn new(name: &str, context: T::Context) -> Self {
        Self {
            context,
            config: ScenarioConfig::new(name),
            runner_fut: None,
        }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }
}

// The context is only cloned out of the struct, never pinned in place.
impl<T: TaskSet> Unpin for Scenario<T> {}

impl<T: TaskSet> Future for Scenario<T> {
    type Output = Result<RunStatistics, ScenarioError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.runner_fut.is_none() {
            let context = this.context.clone();
            let config = this.config.clone();
            this.runner_fut = Some(Box::pin(run_scenario::<T>(context, config)));
        }

        if let Some(runner) = &mut this.runner_fut {
            runner.as_mut().poll(cx)
        } else {
            unreachable!()
        }
    }
}

pub trait ConfigurableScenario: Future + Sized + Send {
    fn users(self, users: NonZeroUsize) -> Self;
    fn spawn_rate(self, users_per_second: f64) -> Self;
    fn duration(self, duration: Duration) -> Self;
    fn iterations(self, iterations: u64) -> Self;
    fn wait_time(self, wait_time: WaitTime) -> Self;
    fn tps(self, tps: NonZeroU32) -> Self;
}

impl<T: TaskSet> ConfigurableScenario for Scenario<T> {
    /// Number of concurrent virtual users (default `1`).
    fn users(mut self, users: NonZeroUsize) -> Self {
        self.config.users = users;
        self
    }

    /// How many users are started per second while ramping up (default `1`).
    /// `f64::INFINITY` starts every user at once.
    fn spawn_rate(mut self, users_per_second: f64) -> Self {
        self.config.spawn_rate = users_per_second;
        self
    }

    /// Run the scenario for the given duration.
    ///
    /// Without `.duration()` or `.iterations()` the scenario runs until Ctrl-C.
    ///
    /// # Example
    /// ```ignore
    /// use bankload::prelude::*;
    /// use std::time::Duration;
    ///
    /// let stats = Scenario::<MyTaskSet>::new("my_scenario", context)
    ///     .duration(Duration::from_secs(120))
    ///     .await?;
    /// ```
    fn duration(mut self, duration: Duration) -> Self {
        self.config.duration = Some(duration);
        self
    }

    /// Stop each virtual user after it has run `iterations` tasks.
    fn iterations(mut self, iterations: u64) -> Self {
        self.config.iterations = Some(iterations);
        self
    }

    /// Wait between two tasks of the same user (default between 1s and 3s).
    fn wait_time(mut self, wait_time: WaitTime) -> Self {
        self.config.wait_time = wait_time;
        self
    }

    /// Cap the transactions per second across all users.
    fn tps(mut self, tps: NonZeroU32) -> Self {
        self.config.max_tps = Some(tps);
        self
    }
}

enum UserOutcome {
    Finished,
    SetupFailed,
}

struct UserPlan {
    delay: Duration,
    wait_time: WaitTime,
    iterations: Option<u64>,
}

#[instrument(name="scenario", skip_all, fields(name=config.name))]
pub(crate) async fn run_scenario<T: TaskSet>(
    context: T::Context,
    config: ScenarioConfig,
) -> Result<RunStatistics, ScenarioError> {
    if config.spawn_rate.is_nan() || config.spawn_rate <= 0. {
        return Err(ScenarioError::InvalidSpawnRate(config.spawn_rate));
    }
    let picker = TaskPicker::new(T::TASKS, T::ORDER)?;

    info!("Running {} with config {:?}", config.name, &config);
    if !config.has_stop_condition() {
        warn!("No duration or iteration limit set, running until Ctrl-C.");
    }

    let atomics = Arc::new(TransactionAtomics::new());
    let limiter = config.max_tps.map(|tps| Arc::new(rate_limiter(tps)));

    let start = Instant::now();
    let mut users = JoinSet::new();
    for index in 0..config.users.get() {
        let data = TransactionData {
            limiter: limiter.clone(),
            atomics: atomics.clone(),
        };
        let delay = config
            .spawn_delay(index)
            .ok_or(ScenarioError::InvalidSpawnRate(config.spawn_rate))?;
        let plan = UserPlan {
            delay,
            wait_time: config.wait_time,
            iterations: config.iterations,
        };
        let user = run_user::<T>(context.clone(), picker.clone(), plan);
        users.spawn(
            TRANSACTION_HOOK
                .scope(data, user)
                .instrument(info_span!("user", index)),
        );
    }

    let shutdown = shutdown_signal(
        config.duration.map(|duration| start + duration),
        config.iterations.is_some(),
    );
    tokio::pin!(shutdown);

    let mut failed_users = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping virtual users");
                users.abort_all();
                break;
            }
            joined = users.join_next() => match joined {
                Some(Ok(UserOutcome::SetupFailed)) => failed_users += 1,
                Some(Ok(UserOutcome::Finished)) => {}
                Some(Err(err)) if err.is_panic() => error!("Virtual user panicked: {err}"),
                Some(Err(_)) => {}
                None => break,
            }
        }
    }
    while let Some(joined) = users.join_next().await {
        if let Ok(UserOutcome::SetupFailed) = joined {
            failed_users += 1;
        }
    }

    let stats = atomics.statistics(&config, failed_users, start.elapsed());
    info!("Scenario complete");
    Ok(stats)
}

async fn run_user<T: TaskSet>(
    context: T::Context,
    mut picker: TaskPicker<T::Task>,
    plan: UserPlan,
) -> UserOutcome {
    tokio::time::sleep(plan.delay).await;

    let mut user = match T::on_start(&context).await {
        Ok(user) => user,
        Err(err) => {
            warn!("Virtual user setup failed: {err}");
            return UserOutcome::SetupFailed;
        }
    };
    debug!("Virtual user started");

    let mut rng = SmallRng::from_entropy();
    let mut completed = 0u64;
    loop {
        let task = picker.next(&mut rng);
        trace!(?task, "Running task");
        user.run(task).await;
        completed += 1;

        if plan.iterations.is_some_and(|max| completed >= max) {
            break;
        }
        tokio::time::sleep(plan.wait_time.sample(&mut rng)).await;
    }

    user.on_stop().await;
    UserOutcome::Finished
}

async fn shutdown_signal(deadline: Option<Instant>, bounded: bool) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None if bounded => std::future::pending().await,
        None => {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Unable to listen for Ctrl-C: {err}");
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::transaction_hook;
    use bankload_core::TaskOrder;

    #[derive(Clone, Copy, Debug)]
    enum MockTask {
        Succeed,
        Fail,
    }

    struct SequentialUser;

    impl TaskSet for SequentialUser {
        type Context = bool;
        type Task = MockTask;
        type Error = String;

        const TASKS: &'static [(MockTask, u32)] = &[
            (MockTask::Succeed, 1),
            (MockTask::Succeed, 1),
            (MockTask::Fail, 1),
        ];
        const ORDER: TaskOrder = TaskOrder::Sequential;

        async fn on_start(fail_setup: &bool) -> Result<Self, String> {
            if *fail_setup {
                Err("setup refused".to_string())
            } else {
                Ok(SequentialUser)
            }
        }

        async fn run(&mut self, task: MockTask) {
            let _ = transaction_hook("mock", async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                match task {
                    MockTask::Succeed => Ok(()),
                    MockTask::Fail => Err(()),
                }
            })
            .await;
        }
    }

    struct Forever;

    impl TaskSet for Forever {
        type Context = ();
        type Task = ();
        type Error = std::convert::Infallible;

        const TASKS: &'static [((), u32)] = &[((), 1)];

        async fn on_start(_: &()) -> Result<Self, Self::Error> {
            Ok(Forever)
        }

        async fn run(&mut self, _: ()) {
            let _ = transaction_hook("tick", async { Ok::<_, ()>(()) }).await;
        }
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn iterations_bound_each_user() {
        let stats = Scenario::<SequentialUser>::new("sequential", false)
            .users(NonZeroUsize::new(2).unwrap())
            .spawn_rate(f64::INFINITY)
            .wait_time(WaitTime::constant(Duration::ZERO))
            .iterations(6)
            .await
            .unwrap();

        assert_eq!(stats.success, 8);
        assert_eq!(stats.error, 4);
        assert_eq!(stats.failed_users, 0);
        let mock = stats.transaction("mock").unwrap();
        assert!((mock.error_rate - 1. / 3.).abs() < 1e-9);
        assert!(mock.latency_p50 >= Duration::from_millis(1));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn failed_setup_is_counted() {
        let stats = Scenario::<SequentialUser>::new("setup", true)
            .users(NonZeroUsize::new(3).unwrap())
            .spawn_rate(f64::INFINITY)
            .iterations(1)
            .await
            .unwrap();

        assert_eq!(stats.failed_users, 3);
        assert_eq!(stats.total(), 0);
        assert!(logs_contain("Virtual user setup failed"));
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn duration_stops_unbounded_users() {
        let stats = Scenario::<Forever>::new("forever", ())
            .users(NonZeroUsize::new(2).unwrap())
            .spawn_rate(100.)
            .wait_time(WaitTime::constant(Duration::from_millis(10)))
            .duration(Duration::from_millis(200))
            .await
            .unwrap();

        assert!(stats.success > 2);
        assert!(stats.elapsed >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn rejects_invalid_spawn_rate() {
        let res = Scenario::<Forever>::new("spawn", ())
            .spawn_rate(0.)
            .iterations(1)
            .await;
        assert!(matches!(res, Err(ScenarioError::InvalidSpawnRate(_))));
    }

    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn rejects_spawn_rate_too_low_to_schedule() {
        let res = Scenario::<Forever>::new("tiny", ())
            .users(NonZeroUsize::new(2).unwrap())
            .spawn_rate(1e-20)
            .duration(Duration::from_millis(50))
            .await;
        assert!(matches!(res, Err(ScenarioError::InvalidSpawnRate(rate)) if rate == 1e-20));
    }

    #[tokio::test]
    #[ntest::timeout(5_000)]
    async fn tps_limit_throttles() {
        let stats = Scenario::<Forever>::new("limited", ())
            .spawn_rate(f64::INFINITY)
            .wait_time(WaitTime::constant(Duration::ZERO))
            .tps(NonZeroU32::new(20).unwrap())
            .duration(Duration::from_millis(500))
            .await
            .unwrap();

        assert!(stats.success <= 15, "{}", stats.success);
    }
}
