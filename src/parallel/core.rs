use anyhow::Result;
use crossbeam::channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed-size pool of worker threads fed through a bounded channel.
///
/// Every item handed to [`WorkerPool::execute`] is processed exactly once and
/// the call only returns after all workers have drained the queue.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    max_workers: usize,
}

/// Per-worker state, kept in one struct to avoid long parameter lists
struct WorkerContext<'a, T, R, F, P> {
    worker_id: usize,
    work_rx: Receiver<T>,
    result_tx: Sender<R>,
    completed: &'a AtomicUsize,
    total_items: usize,
    processor: &'a F,
    progress_reporter: Option<&'a P>,
}

impl WorkerPool {
    /// A pool running at most `max_workers` items at once (values below 1 are treated as 1)
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// Pool size from a configured worker count, where 0 means one worker per CPU core
    pub fn from_config(configured_workers: usize) -> Self {
        if configured_workers == 0 {
            Self::new(num_cpus::get())
        } else {
            Self::new(configured_workers)
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Threads actually spawned for `work_count` items
    pub fn effective_workers(&self, work_count: usize) -> usize {
        std::cmp::min(self.max_workers, work_count)
    }

    /// Process all items and return one result per item, in completion order.
    ///
    /// `processor` receives the item and the id of the worker running it.
    /// `progress_reporter` is called with `(completed, total, worker_id)` after each item.
    pub fn execute<T, R, F, P>(
        &self,
        work_items: Vec<T>,
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(&T, usize) -> R + Sync,
        P: Fn(usize, usize, usize) + Sync,
    {
        if work_items.is_empty() {
            return Ok(Vec::new());
        }

        let total_items = work_items.len();
        let actual_workers = self.effective_workers(total_items);
        let buffer_size = actual_workers * 2;

        let (work_tx, work_rx): (Sender<T>, Receiver<T>) = bounded(buffer_size);
        let (result_tx, result_rx): (Sender<R>, Receiver<R>) = bounded(buffer_size);
        let completed = AtomicUsize::new(0);

        tracing::debug!(workers = actual_workers, items = total_items, "starting worker pool");

        crossbeam::thread::scope(|s| {
            for worker_id in 0..actual_workers {
                let ctx = WorkerContext {
                    worker_id,
                    work_rx: work_rx.clone(),
                    result_tx: result_tx.clone(),
                    completed: &completed,
                    total_items,
                    processor: &processor,
                    progress_reporter: progress_reporter.as_ref(),
                };

                s.spawn(move |_| worker_thread(ctx));
            }

            // Producer thread: feed the bounded queue
            s.spawn(move |_| {
                for work_item in work_items {
                    if work_tx.send(work_item).is_err() {
                        break; // Workers dropped
                    }
                }
            });

            // Drop our copies so the collector ends once every worker is done
            drop(work_rx);
            drop(result_tx);

            collect_results(result_rx, total_items)
        })
        .map_err(|_| anyhow::anyhow!("Thread panic occurred during parallel execution"))
    }
}

fn worker_thread<T, R, F, P>(ctx: WorkerContext<'_, T, R, F, P>)
where
    F: Fn(&T, usize) -> R,
    P: Fn(usize, usize, usize),
{
    while let Ok(work_item) = ctx.work_rx.recv() {
        let result = (ctx.processor)(&work_item, ctx.worker_id);

        if ctx.result_tx.send(result).is_err() {
            break; // Collector dropped
        }

        let current = ctx.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(reporter) = ctx.progress_reporter {
            reporter(current, ctx.total_items, ctx.worker_id);
        }
    }
}

fn collect_results<R>(result_rx: Receiver<R>, total_items: usize) -> Vec<R> {
    let mut results = Vec::with_capacity(total_items);

    // Ends when every worker has exited and dropped its sender
    while let Ok(result) = result_rx.recv() {
        results.push(result);
    }

    results
}
