//! Bounded parallel execution of generation jobs
//!
//! Runs a set of blocking jobs on a small worker pool and collects the
//! outcomes in completion order. One job failing (or panicking) never
//! affects its siblings.

use crate::error::{MediagenError, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

/// Upper bound on concurrent jobs regardless of batch size
pub const MAX_WORKERS: usize = 4;

/// The outcome of a single job within a batch
#[derive(Debug)]
pub struct BatchOutcome<T> {
    /// Position of the job in the submitted batch
    pub index: usize,
    /// Caller-supplied label, used in summaries and logs
    pub label: String,
    pub result: Result<T>,
}

/// Run labelled jobs on a pool of `min(jobs, MAX_WORKERS)` threads.
///
/// Outcomes come back in completion order; use `index` to correlate with
/// the submitted batch.
pub fn run_parallel<T, F>(jobs: Vec<(String, F)>) -> Vec<BatchOutcome<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let total = jobs.len();
    if total == 0 {
        return Vec::new();
    }

    let (job_tx, job_rx) = mpsc::channel::<(usize, String, F)>();
    let job_rx = Arc::new(Mutex::new(job_rx));
    let (out_tx, out_rx) = mpsc::channel::<BatchOutcome<T>>();

    for (index, (label, job)) in jobs.into_iter().enumerate() {
        // send into an open channel with a live receiver cannot fail
        let _ = job_tx.send((index, label, job));
    }
    drop(job_tx);

    let workers = total.min(MAX_WORKERS);
    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let job_rx = Arc::clone(&job_rx);
        let out_tx = out_tx.clone();
        handles.push(thread::spawn(move || loop {
            let next = match job_rx.lock() {
                Ok(rx) => rx.recv(),
                Err(_) => break,
            };
            let (index, label, job) = match next {
                Ok(job) => job,
                Err(_) => break,
            };
            let result = match catch_unwind(AssertUnwindSafe(job)) {
                Ok(result) => result,
                Err(_) => Err(MediagenError::RemoteInvocation(format!(
                    "job '{}' panicked",
                    label
                ))),
            };
            let _ = out_tx.send(BatchOutcome {
                index,
                label,
                result,
            });
        }));
    }
    drop(out_tx);

    let outcomes: Vec<_> = out_rx.into_iter().collect();
    for handle in handles {
        let _ = handle.join();
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediagenError;
    use std::time::Duration;

    #[test]
    fn test_empty_batch() {
        let outcomes = run_parallel::<u32, fn() -> Result<u32>>(Vec::new());
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_all_jobs_complete() {
        let jobs: Vec<(String, Box<dyn FnOnce() -> Result<usize> + Send>)> = (0..10)
            .map(|i| {
                let label = format!("job-{}", i);
                let f: Box<dyn FnOnce() -> Result<usize> + Send> = Box::new(move || Ok(i * 2));
                (label, f)
            })
            .collect();

        let mut outcomes = run_parallel(jobs);
        assert_eq!(outcomes.len(), 10);
        outcomes.sort_by_key(|o| o.index);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.index, i);
            assert_eq!(*outcome.result.as_ref().unwrap(), i * 2);
        }
    }

    #[test]
    fn test_failures_are_isolated() {
        let jobs: Vec<(String, Box<dyn FnOnce() -> Result<&'static str> + Send>)> = vec![
            ("ok-1".to_string(), Box::new(|| Ok("first"))),
            (
                "bad".to_string(),
                Box::new(|| Err(MediagenError::Validation("boom".to_string()))),
            ),
            ("ok-2".to_string(), Box::new(|| Ok("third"))),
        ];

        let outcomes = run_parallel(jobs);
        assert_eq!(outcomes.len(), 3);
        let failures = outcomes.iter().filter(|o| o.result.is_err()).count();
        assert_eq!(failures, 1);
        let failed = outcomes.iter().find(|o| o.result.is_err()).unwrap();
        assert_eq!(failed.label, "bad");
    }

    #[test]
    fn test_panicking_job_becomes_failure() {
        let jobs: Vec<(String, Box<dyn FnOnce() -> Result<u32> + Send>)> = vec![
            ("steady".to_string(), Box::new(|| Ok(1))),
            ("wild".to_string(), Box::new(|| panic!("exploded"))),
        ];

        let outcomes = run_parallel(jobs);
        assert_eq!(outcomes.len(), 2);
        let failed = outcomes.iter().find(|o| o.label == "wild").unwrap();
        match &failed.result {
            Err(MediagenError::RemoteInvocation(msg)) => assert!(msg.contains("panicked")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_completion_order_not_submission_order() {
        let jobs: Vec<(String, Box<dyn FnOnce() -> Result<u32> + Send>)> = vec![
            (
                "slow".to_string(),
                Box::new(|| {
                    thread::sleep(Duration::from_millis(150));
                    Ok(0)
                }),
            ),
            ("fast".to_string(), Box::new(|| Ok(1))),
        ];

        let outcomes = run_parallel(jobs);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].label, "fast");
        assert_eq!(outcomes[1].label, "slow");
    }
}
