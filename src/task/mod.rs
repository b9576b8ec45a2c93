// warm-rs: Git-backed firmware library package manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded worker pool for blocking jobs.
//!
//! ```text
//! TaskPool::new(workers)
//!   .with_cancel_token()
//!   .run(items, job).await
//!       one task per item, JoinSet
//!       semaphore(workers) --> spawn_blocking(job(item))
//!       result slotted at its submission index
//! ```
//!
//! A job never sees another job's failure. Cancellation stops jobs that
//! haven't acquired a worker yet; running jobs finish.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;


/// Why a slot holds no job result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskFailure {
    /// Cancellation arrived before the job got a worker.
    #[error("interrupted before start")]
    Interrupted,

    /// The job panicked.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task vanished without reporting back.
    #[error("no result produced")]
    NoResult,
}

/// Runs blocking jobs with a fixed degree of parallelism.
pub struct TaskPool {
    workers: usize,
    semaphore: Arc<Semaphore>,
    cancel_token: CancellationToken,
}

impl TaskPool {
    /// Creates a pool running at most `workers` jobs at once (minimum 1).
    #[must_use]
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            workers,
            semaphore: Arc::new(Semaphore::new(workers)),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Shares an externally owned cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Stops jobs that haven't started yet.
    pub fn interrupt_all(&self) {
        tracing::info!("interrupting pending tasks");
        self.cancel_token.cancel();
    }

    /// Runs `job` once per item and returns the results in submission order.
    ///
    /// The returned vector always has one slot per item.
    pub async fn run<I, T, F>(&self, items: Vec<I>, job: F) -> Vec<Result<T, TaskFailure>>
    where
        I: Send + 'static,
        T: Send + 'static,
        F: Fn(I) -> T + Send + Sync + 'static,
    {
        let mut slots: Vec<Result<T, TaskFailure>> =
            std::iter::repeat_with(|| Err(TaskFailure::NoResult))
                .take(items.len())
                .collect();
        if items.is_empty() {
            return slots;
        }

        tracing::debug!(tasks = items.len(), workers = self.workers, "starting tasks");

        let job = Arc::new(job);
        let mut set = JoinSet::new();
        for (index, item) in items.into_iter().enumerate() {
            let semaphore = Arc::clone(&self.semaphore);
            let token = self.cancel_token.clone();
            let job = Arc::clone(&job);
            set.spawn(async move {
                let permit = tokio::select! {
                    biased;
                    () = token.cancelled() => return (index, Err(TaskFailure::Interrupted)),
                    permit = semaphore.acquire_owned() => permit,
                };
                let Ok(_permit) = permit else {
                    return (index, Err(TaskFailure::Interrupted));
                };
                if token.is_cancelled() {
                    return (index, Err(TaskFailure::Interrupted));
                }
                let result = tokio::task::spawn_blocking(move || job(item))
                    .await
                    .map_err(|e| TaskFailure::Panicked(e.to_string()));
                (index, result)
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = result;
                    }
                }
                Err(e) => tracing::error!(error = %e, "task failed to report"),
            }
        }
        slots
    }
}
