//! Bounded worker pool stage
//!
//! Each stage pre-loads a closed task queue, spawns a fixed number of named
//! worker threads inside a `std::thread::scope`, and drains a rendezvous result
//! channel on the calling thread while the workers run. Every worker owns a
//! clone of the result sender, so the channel closes exactly when the last
//! worker exits; the scope is the stage's join barrier.

use crate::error::{Error, Result};

use crossbeam_channel::{bounded, Sender};
use indicatif::ProgressBar;
use std::thread;

/// Default number of workers per stage
pub const DEFAULT_WORKERS: usize = 50;

/// Upper bound accepted for the worker count
pub const MAX_WORKERS: usize = 1024;

/// Handle a worker uses to publish results
pub struct Emitter<'a, O> {
    results: &'a Sender<O>,
}

impl<O> Emitter<'_, O> {
    /// Send one result; returns false once the consumer has gone away
    #[inline]
    pub fn emit(&self, item: O) -> bool {
        self.results.send(item).is_ok()
    }
}

/// Run `work` over every input on a pool of `workers` threads
///
/// Results are returned in the order they arrived, which depends on
/// scheduling. `on_result` sees every result on the calling thread as it is
/// received, before it is collected.
pub fn run_stage<I, O, W, R>(
    stage: &'static str,
    inputs: Vec<I>,
    workers: usize,
    progress: &ProgressBar,
    work: W,
    mut on_result: R,
) -> Result<Vec<O>>
where
    I: Send,
    O: Send,
    W: Fn(I, &Emitter<'_, O>) + Sync,
    R: FnMut(&O),
{
    if inputs.is_empty() {
        return Ok(Vec::new());
    }

    let workers = workers.clamp(1, inputs.len());
    log::debug!("{}: {} tasks on {} workers", stage, inputs.len(), workers);

    let (task_tx, task_rx) = bounded(inputs.len());
    for input in inputs {
        // Capacity equals the input count and the receiver is alive
        if task_tx.send(input).is_err() {
            unreachable!("task queue closed before workers started");
        }
    }
    drop(task_tx);

    let (result_tx, result_rx) = bounded::<O>(0);
    let work = &work;

    thread::scope(move |scope| -> Result<Vec<O>> {
        for id in 0..workers {
            let tasks = task_rx.clone();
            let results = result_tx.clone();
            let progress = progress.clone();

            let spawned = thread::Builder::new()
                .name(format!("{stage}-worker-{id}"))
                .spawn_scoped(scope, move || {
                    let emitter = Emitter { results: &results };
                    for task in tasks.iter() {
                        work(task, &emitter);
                        progress.inc(1);
                    }
                });

            if let Err(source) = spawned {
                // Workers already running must not block on a receiver nobody drains
                drop(result_rx);
                return Err(Error::WorkerSpawn { stage, source });
            }
        }

        // Only workers hold senders now; the loop ends when the last one exits
        drop(result_tx);

        let mut collected = Vec::new();
        for item in result_rx.iter() {
            on_result(&item);
            collected.push(item);
        }
        Ok(collected)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn run_doubling(inputs: Vec<u32>, workers: usize) -> Vec<u32> {
        let pb = ProgressBar::hidden();
        run_stage("test", inputs, workers, &pb, |n, out| {
            out.emit(n);
            out.emit(n * 2);
        }, |_| {})
        .unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(run_doubling(Vec::new(), 4).is_empty());
    }

    #[test]
    fn test_no_lost_results() {
        let inputs: Vec<u32> = (0..500).collect();
        let mut single = run_doubling(inputs.clone(), 1);
        let mut many = run_doubling(inputs, DEFAULT_WORKERS);

        single.sort_unstable();
        many.sort_unstable();
        assert_eq!(single.len(), 1000);
        assert_eq!(single, many);
    }

    #[test]
    fn test_more_workers_than_tasks() {
        let mut out = run_doubling(vec![1, 2], 100);
        out.sort_unstable();
        assert_eq!(out, vec![1, 2, 2, 4]);
    }

    #[test]
    fn test_every_task_processed_once() {
        let processed = AtomicUsize::new(0);
        let pb = ProgressBar::hidden();
        let mut seen = 0;

        let out = run_stage("count", (0..64).collect::<Vec<u32>>(), 8, &pb, |_, out: &Emitter<'_, ()>| {
            processed.fetch_add(1, Ordering::SeqCst);
            out.emit(());
        }, |_| seen += 1)
        .unwrap();

        assert_eq!(processed.load(Ordering::SeqCst), 64);
        assert_eq!(out.len(), 64);
        assert_eq!(seen, 64);
        assert_eq!(pb.position(), 64);
    }

    #[test]
    fn test_worker_without_output() {
        let pb = ProgressBar::hidden();
        let out: Vec<String> = run_stage("silent", vec!["a", "b"], 2, &pb, |_, _| {}, |_| {}).unwrap();
        assert!(out.is_empty());
    }
}
