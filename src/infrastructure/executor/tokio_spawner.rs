//! Tokio-backed job spawner

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};

use crate::application::ports::{Job, JobSpawner};

/// Runs each job as its own tokio task and keeps track of them so the
/// server can wait for in-flight work on shutdown.
///
/// Must be used from within a tokio runtime.
#[derive(Default)]
pub struct TokioJobSpawner {
    jobs: Mutex<JoinSet<()>>,
}

impl TokioJobSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs that have not finished yet
    pub fn in_flight(&self) -> usize {
        let mut jobs = self.lock();
        Self::reap(&mut jobs);
        jobs.len()
    }

    /// Wait up to `grace` for every running job. Jobs still running after
    /// that are aborted; their count is returned.
    pub async fn drain(&self, grace: Duration) -> usize {
        let mut jobs = std::mem::take(&mut *self.lock());
        if jobs.is_empty() {
            return 0;
        }

        tracing::info!(in_flight = jobs.len(), "Waiting for background jobs");
        let finished = tokio::time::timeout(grace, async {
            while let Some(result) = jobs.join_next().await {
                Self::log_outcome(result);
            }
        })
        .await;

        match finished {
            Ok(()) => 0,
            Err(_) => {
                let remaining = jobs.len();
                tracing::warn!(remaining, "Aborting background jobs after grace period");
                jobs.shutdown().await;
                remaining
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, JoinSet<()>> {
        // A panic while holding the lock cannot leave the set inconsistent
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reap(jobs: &mut JoinSet<()>) {
        while let Some(result) = jobs.try_join_next() {
            Self::log_outcome(result);
        }
    }

    fn log_outcome(result: Result<(), JoinError>) {
        if let Err(e) = result {
            if e.is_panic() {
                tracing::error!(error = %e, "Background job panicked");
            }
        }
    }
}

impl JobSpawner for TokioJobSpawner {
    fn spawn(&self, job: Job) {
        let mut jobs = self.lock();
        Self::reap(&mut jobs);
        jobs.spawn(job);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn spawned_jobs_run_and_drain() {
        let spawner = TokioJobSpawner::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let counter = Arc::clone(&counter);
            spawner.spawn(Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        assert_eq!(spawner.drain(Duration::from_secs(5)).await, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 5);
        assert_eq!(spawner.in_flight(), 0);
    }

    #[tokio::test]
    async fn spawn_does_not_wait_for_the_job() {
        let spawner = TokioJobSpawner::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        spawner.spawn(Box::pin(async move {
            let _ = rx.await;
        }));
        assert_eq!(spawner.in_flight(), 1);

        tx.send(()).unwrap();
        assert_eq!(spawner.drain(Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn drain_aborts_stuck_jobs() {
        let spawner = TokioJobSpawner::new();
        spawner.spawn(Box::pin(std::future::pending::<()>()));

        let remaining = spawner.drain(Duration::from_millis(20)).await;
        assert_eq!(remaining, 1);
        assert_eq!(spawner.in_flight(), 0);
    }
}
