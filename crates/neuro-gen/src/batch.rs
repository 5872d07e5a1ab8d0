use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::error::GenerateError;
use crate::types::{BookSpec, TestSpec};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Requests issued concurrently within one batch.
    pub batch_size: usize,
    /// Fixed pause between batches; a window throttle, not a backoff.
    pub delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 1,
            delay: Duration::from_secs(3),
        }
    }
}

pub trait BatchItem {
    fn label(&self) -> &str;
}

impl BatchItem for TestSpec {
    fn label(&self) -> &str {
        &self.title
    }
}

impl BatchItem for BookSpec {
    fn label(&self) -> &str {
        &self.title
    }
}

/// Drive `op` over `specs` in fixed-size batches.
///
/// Items inside a batch run concurrently; the driver sleeps between batches
/// to respect the provider's rate limits. A failed item is logged and
/// dropped from the output; the run itself never fails and nothing is
/// retried.
pub async fn run_batch<S, A, F, Fut>(specs: Vec<S>, options: &BatchOptions, op: F) -> Vec<A>
where
    S: BatchItem,
    F: Fn(S) -> Fut,
    Fut: Future<Output = Result<A, GenerateError>>,
{
    let requested = specs.len();
    let batch_size = options.batch_size.max(1);
    let total_batches = requested.div_ceil(batch_size);

    let mut artifacts = Vec::with_capacity(requested);
    let mut specs = specs.into_iter().peekable();
    let mut batch_index = 0usize;

    while specs.peek().is_some() {
        batch_index += 1;
        let batch: Vec<S> = specs.by_ref().take(batch_size).collect();
        info!(
            batch = batch_index,
            total_batches,
            items = batch.len(),
            "processing batch"
        );

        let results = join_all(batch.into_iter().map(|spec| {
            let label = spec.label().to_string();
            let fut = op(spec);
            async move { (label, fut.await) }
        }))
        .await;

        for (label, result) in results {
            match result {
                Ok(artifact) => artifacts.push(artifact),
                Err(error) => warn!(item = %label, %error, "item failed, skipping"),
            }
        }

        if specs.peek().is_some() {
            info!(delay_secs = options.delay.as_secs(), "waiting before next batch");
            tokio::time::sleep(options.delay).await;
        }
    }

    info!(
        generated = artifacts.len(),
        requested, "batch run complete"
    );
    artifacts
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn spec(title: &str) -> TestSpec {
        TestSpec {
            id: title.to_string(),
            title: title.to_string(),
            domain: "Attention".to_string(),
            description: String::new(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn failures_are_skipped_without_aborting_the_run() {
        let specs = vec![spec("one"), spec("two"), spec("three")];
        let options = BatchOptions {
            batch_size: 3,
            delay: Duration::from_millis(0),
        };

        let out = run_batch(specs, &options, |s| async move {
            if s.title == "two" {
                Err(GenerateError::MalformedResponse("boom".to_string()))
            } else {
                Ok(s.title)
            }
        })
        .await;

        assert_eq!(out, ["one", "three"]);
    }

    #[tokio::test]
    async fn batches_are_chunked_by_size() {
        let calls = AtomicUsize::new(0);
        let specs: Vec<TestSpec> = (0..5).map(|i| spec(&format!("t{i}"))).collect();
        let options = BatchOptions {
            batch_size: 2,
            delay: Duration::from_millis(0),
        };

        let out = run_batch(specs, &options, |s| {
            calls.fetch_add(1, Ordering::Relaxed);
            async move { Ok::<_, GenerateError>(s.title) }
        })
        .await;

        assert_eq!(out.len(), 5);
        assert_eq!(calls.load(Ordering::Relaxed), 5);
    }
}
