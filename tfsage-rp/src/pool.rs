//! A bounded worker pool that runs indexed tasks against a shared context.
//!
//! Every task result is tagged with the index of its task and written to a
//! pre-allocated slot, so output order is input order no matter which task
//! finishes first. The first failure raises an abort flag: tasks that have not
//! started yet are skipped and the whole run returns that error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use indicatif::ProgressBar;
use rayon::ThreadPoolBuilder;

use crate::errors::{Result, RpError};

/// Number of workers to use when the caller gives no bound.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

///
/// Run `f(ctx, task)` for every task on a pool of at most `workers` threads
/// and return the results in task order.
///
/// # Arguments
/// - ctx: state shared read-only by all workers, handed to every task
/// - tasks: task inputs; a task's position is its index
/// - workers: pool size bound, `None` for the platform default
/// - progress: ticked once per finished task
/// - label: names a task in error messages
/// - f: the task body
pub fn run_indexed<C, T, R, F, L>(
    ctx: &C,
    tasks: &[T],
    workers: Option<usize>,
    progress: &ProgressBar,
    label: L,
    f: F,
) -> Result<Vec<R>>
where
    C: Sync,
    T: Sync,
    R: Send,
    F: Fn(&C, &T) -> Result<R> + Sync,
    L: Fn(&T) -> String,
{
    let workers = match workers {
        Some(0) => return Err(RpError::InvalidWorkerCount),
        Some(n) => n,
        None => default_workers(),
    };
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.min(tasks.len()))
        .thread_name(|i| format!("tfsage-worker-{i}"))
        .build()?;

    let abort = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<(usize, Result<R>)>();

    pool.scope(|s| {
        for (index, task) in tasks.iter().enumerate() {
            let tx = tx.clone();
            let abort = &abort;
            let f = &f;
            s.spawn(move |_| {
                if abort.load(Ordering::Acquire) {
                    return;
                }
                let result = f(ctx, task);
                if result.is_err() {
                    abort.store(true, Ordering::Release);
                }
                progress.inc(1);
                // the receiver outlives the scope
                let _ = tx.send((index, result));
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<R>> = (0..tasks.len()).map(|_| None).collect();
    let mut failure: Option<(usize, RpError)> = None;

    for (index, result) in rx {
        match result {
            Ok(value) => slots[index] = Some(value),
            Err(e) => {
                // keep the lowest failing index for a stable error message
                if failure.as_ref().is_none_or(|(i, _)| index < *i) {
                    failure = Some((index, e));
                }
            }
        }
    }

    if let Some((index, source)) = failure {
        return Err(RpError::TaskFailed {
            index,
            label: label(&tasks[index]),
            source: Box::new(source),
        });
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.ok_or(RpError::MissingResult(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::Rng;
    use rstest::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct Ctx {
        offset: usize,
        calls: AtomicUsize,
    }

    #[rstest]
    #[case(Some(1))]
    #[case(Some(4))]
    #[case(None)]
    fn test_order_survives_random_completion(#[case] workers: Option<usize>) {
        let ctx = Ctx {
            offset: 1000,
            calls: AtomicUsize::new(0),
        };
        let tasks: Vec<usize> = (0..32).collect();

        let out = run_indexed(
            &ctx,
            &tasks,
            workers,
            &ProgressBar::hidden(),
            |t| t.to_string(),
            |ctx, t| {
                let delay = rand::rng().random_range(0..15);
                std::thread::sleep(Duration::from_millis(delay));
                ctx.calls.fetch_add(1, Ordering::SeqCst);
                Ok(ctx.offset + t)
            },
        )
        .unwrap();

        assert_eq!(out, (1000..1032).collect::<Vec<usize>>());
        assert_eq!(ctx.calls.load(Ordering::SeqCst), 32);
    }

    #[rstest]
    fn test_failure_fails_the_batch() {
        let tasks: Vec<usize> = (0..16).collect();
        let result = run_indexed(
            &(),
            &tasks,
            Some(3),
            &ProgressBar::hidden(),
            |t| format!("task-{t}"),
            |_, t| match *t {
                7 => Err(RpError::InvalidDecay(-1.0)),
                _ => Ok(*t),
            },
        );

        match result {
            Err(RpError::TaskFailed { index, label, source }) => {
                assert_eq!(index, 7);
                assert_eq!(label, "task-7");
                assert!(matches!(*source, RpError::InvalidDecay(_)));
            }
            other => panic!("expected a task failure, got {:?}", other.map(|v| v.len())),
        }
    }

    #[rstest]
    fn test_zero_workers_rejected() {
        let result = run_indexed(
            &(),
            &[1usize],
            Some(0),
            &ProgressBar::hidden(),
            |t| t.to_string(),
            |_, t| Ok(*t),
        );
        assert!(matches!(result, Err(RpError::InvalidWorkerCount)));
    }

    #[rstest]
    fn test_no_tasks() {
        let tasks: Vec<usize> = Vec::new();
        let out = run_indexed(
            &(),
            &tasks,
            None,
            &ProgressBar::hidden(),
            |t| t.to_string(),
            |_, t| Ok(*t),
        )
        .unwrap();
        assert!(out.is_empty());
    }
}
