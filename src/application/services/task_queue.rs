//! Named serial task queues backed by dedicated threads.
//!
//! Each queue owns one OS thread driving a current-thread tokio runtime.
//! Jobs submitted to the same queue run one at a time, in submission order.
//! Jobs on different queues run in parallel.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread::JoinHandle;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

/// Name of the queue running network reads.
pub const NETWORK_QUEUE: &str = "network";

/// Name of the queue running filesystem work.
pub const DISK_QUEUE: &str = "disk";

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Task queue errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum QueueError {
    #[error("failed to start {queue} queue: {message}")]
    Spawn { queue: String, message: String },

    #[error("{queue} queue is closed")]
    Closed { queue: String },

    #[error("job on {queue} queue was dropped before completing")]
    Cancelled { queue: String },
}

impl QueueError {
    /// Returns the name of the queue the error refers to.
    #[must_use]
    pub fn queue(&self) -> &str {
        match self {
            Self::Spawn { queue, .. } | Self::Closed { queue } | Self::Cancelled { queue } => {
                queue
            }
        }
    }
}

/// A serial execution context with its own thread.
pub struct TaskQueue {
    name: String,
    job_tx: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TaskQueue {
    /// Starts a queue whose worker thread is called `name`.
    ///
    /// # Errors
    /// Returns error if the runtime or the thread cannot be created.
    pub fn new(name: impl Into<String>) -> Result<Self, QueueError> {
        let name = name.into();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| QueueError::Spawn {
                queue: name.clone(),
                message: e.to_string(),
            })?;

        let (job_tx, job_rx) = mpsc::unbounded_channel();
        let worker_name = name.clone();

        let worker = std::thread::Builder::new()
            .name(name.clone())
            .spawn(move || runtime.block_on(Self::run_worker_loop(worker_name, job_rx)))
            .map_err(|e| QueueError::Spawn {
                queue: name.clone(),
                message: e.to_string(),
            })?;

        debug!(queue = %name, "Task queue started");

        Ok(Self {
            name,
            job_tx,
            worker,
        })
    }

    async fn run_worker_loop(name: String, mut job_rx: mpsc::UnboundedReceiver<Job>) {
        while let Some(job) = job_rx.recv().await {
            // A panicking job only loses itself.
            if let Err(e) = tokio::spawn(job).await {
                error!(queue = %name, error = %e, "Queued job panicked");
            }
        }
        debug!(queue = %name, "Task queue drained");
    }

    /// Returns the queue name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueues `task`. Await the returned handle for its output.
    pub fn submit<F, T>(&self, task: F) -> TaskHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let _ = result_tx.send(task.await);
        });

        let result_rx = if self.job_tx.send(job).is_ok() {
            Some(result_rx)
        } else {
            warn!(queue = %self.name, "Submitted to a closed task queue");
            None
        };

        TaskHandle {
            queue: self.name.clone(),
            result_rx,
        }
    }

    /// Stops accepting jobs and waits for queued ones to finish.
    pub fn shutdown(self) {
        let Self {
            name,
            job_tx,
            worker,
        } = self;
        drop(job_tx);
        if worker.join().is_err() {
            error!(queue = %name, "Task queue thread panicked");
        }
    }
}

/// Output of a submitted job.
#[derive(Debug)]
pub struct TaskHandle<T> {
    queue: String,
    result_rx: Option<oneshot::Receiver<T>>,
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, QueueError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let queue = self.queue.clone();
        let Some(result_rx) = self.result_rx.as_mut() else {
            return Poll::Ready(Err(QueueError::Closed { queue }));
        };
        Pin::new(result_rx)
            .poll(cx)
            .map(|result| result.map_err(|_| QueueError::Cancelled { queue }))
    }
}

/// The two execution contexts used by the download workflow.
#[derive(Debug)]
pub struct Executors {
    network: TaskQueue,
    disk: TaskQueue,
}

impl Executors {
    /// Starts the `network` and `disk` queues.
    ///
    /// # Errors
    /// Returns error if either queue cannot be started.
    pub fn new() -> Result<Self, QueueError> {
        Ok(Self {
            network: TaskQueue::new(NETWORK_QUEUE)?,
            disk: TaskQueue::new(DISK_QUEUE)?,
        })
    }

    /// Queue for network reads.
    #[must_use]
    pub const fn network(&self) -> &TaskQueue {
        &self.network
    }

    /// Queue for filesystem reads and writes.
    #[must_use]
    pub const fn disk(&self) -> &TaskQueue {
        &self.disk
    }
}
