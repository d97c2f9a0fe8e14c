use crate::atomics::TransactionAtomics;
use governor::DefaultDirectRateLimiter;
use std::{future::Future, sync::Arc};
use tokio::time::Instant;

/// Measures a single remote call under `label`.
///
/// Inside a running [`Scenario`](crate::Scenario) the outcome and latency are
/// recorded and the scenario's TPS limit is applied. Outside of one the
/// future is simply awaited.
pub async fn transaction_hook<T, R, E>(label: &str, func: T) -> T::Output
where
    T: Future<Output = Result<R, E>>,
{
    if let Ok(hook) = TRANSACTION_HOOK.try_with(|v| v.clone()) {
        if let Some(limiter) = &hook.limiter {
            limiter.until_ready().await;
        }

        let start = Instant::now();
        let res = func.await;
        let elapsed = start.elapsed();

        hook.atomics.record(label, elapsed, res.is_ok());

        #[cfg(feature = "metrics")]
        {
            let transaction = label.to_owned();
            metrics::histogram!("bankload_transaction_latency_seconds", "transaction" => transaction.clone())
                .record(elapsed.as_secs_f64());
            if res.is_ok() {
                metrics::counter!("bankload_transaction_success_total", "transaction" => transaction)
                    .increment(1);
            } else {
                metrics::counter!("bankload_transaction_error_total", "transaction" => transaction)
                    .increment(1);
            }
        }

        res
    } else {
        tracing::trace!(label, "No hook available.");
        func.await
    }
}

#[derive(Clone)]
pub(crate) struct TransactionData {
    pub limiter: Option<Arc<DefaultDirectRateLimiter>>,
    pub atomics: Arc<TransactionAtomics>,
}

tokio::task_local! {
    pub(crate) static TRANSACTION_HOOK: TransactionData;
}
