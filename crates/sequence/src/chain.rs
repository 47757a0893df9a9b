//! Continuation-driven step chains
//!
//! A [`Chain`] holds an ordered sequence of steps, each a callable that
//! receives an [`Advance`] handle. Running the chain invokes the first
//! step; every subsequent step runs only when its predecessor invokes the
//! handle it was given, possibly from another thread and after unbounded
//! delay. Exactly one step is in flight at a time.
//!
//! [`Advance::advance`] consumes the handle and the handle is not `Clone`,
//! so a step cannot advance the chain twice. A step that drops its handle
//! without calling it stalls the chain permanently; that is a documented
//! liveness dependency on well-behaved steps, not a detected condition.
//!
//! Steps that advance synchronously are driven by a trampoline rather than
//! recursion, so arbitrarily long synchronous chains run in constant stack
//! space.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// A single unit of work in a chain
pub type ChainStep = Box<dyn FnOnce(Advance) + Send + 'static>;

/// Observable position of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStatus {
    /// Not yet run
    Idle,
    /// Step `index` is in flight or awaiting its advance
    Running(usize),
    /// The final step advanced past the end of the sequence
    Done,
}

/// An ordered sequence of continuation-accepting steps
pub struct Chain {
    inner: Arc<Inner>,
}

/// Handle a step invokes to trigger its successor
pub struct Advance {
    inner: Arc<Inner>,
}

struct Inner {
    steps: Mutex<VecDeque<ChainStep>>,
    status: Mutex<ChainStatus>,
    // Trampoline state: `pending` records an advance that has not been
    // consumed yet, `driving` marks the frame that owns the work loop.
    pending: AtomicBool,
    driving: AtomicBool,
}

impl Chain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                steps: Mutex::new(VecDeque::new()),
                status: Mutex::new(ChainStatus::Idle),
                pending: AtomicBool::new(false),
                driving: AtomicBool::new(false),
            }),
        }
    }

    /// Append a step to the sequence
    #[must_use]
    pub fn step(self, f: impl FnOnce(Advance) + Send + 'static) -> Self {
        self.inner.steps.lock().push_back(Box::new(f));
        self
    }

    /// Start the chain by invoking the first step.
    ///
    /// An empty chain transitions straight to [`ChainStatus::Done`]. Calling
    /// `run` on a chain that has already started is ignored.
    pub fn run(&self) {
        if *self.inner.status.lock() != ChainStatus::Idle {
            debug!("chain already started, ignoring run");
            return;
        }
        self.inner.pending.store(true, Ordering::SeqCst);
        Inner::drive(&self.inner);
    }

    /// Current position of the chain
    pub fn status(&self) -> ChainStatus {
        *self.inner.status.lock()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Advance {
    /// Signal that the current step is done, triggering the next one.
    ///
    /// Consumes the handle; the chain can only be advanced once per step.
    pub fn advance(self) {
        self.inner.pending.store(true, Ordering::SeqCst);
        Inner::drive(&self.inner);
    }
}

impl Inner {
    /// Run queued steps until no advance is pending.
    ///
    /// Reentrant calls (a step advancing synchronously) and racing calls
    /// (a step advancing from another thread) both funnel into whichever
    /// frame currently holds the `driving` flag, so step bodies never nest
    /// on the stack.
    fn drive(inner: &Arc<Inner>) {
        loop {
            if inner.driving.swap(true, Ordering::SeqCst) {
                // Another frame owns the loop and will observe `pending`.
                return;
            }
            while inner.pending.swap(false, Ordering::SeqCst) {
                let step = inner.steps.lock().pop_front();
                match step {
                    Some(step) => {
                        let index = {
                            let mut status = inner.status.lock();
                            let index = match *status {
                                ChainStatus::Running(i) => i + 1,
                                ChainStatus::Idle | ChainStatus::Done => 0,
                            };
                            *status = ChainStatus::Running(index);
                            index
                        };
                        trace!(index, "running chain step");
                        step(Advance {
                            inner: Arc::clone(inner),
                        });
                    }
                    None => {
                        *inner.status.lock() = ChainStatus::Done;
                        debug!("chain complete");
                    }
                }
            }
            inner.driving.store(false, Ordering::SeqCst);
            if !inner.pending.load(Ordering::SeqCst) {
                return;
            }
            // An advance raced the release of `driving`; reclaim the loop.
        }
    }
}

/// Build a chain from boxed steps and start it immediately
pub fn chain_async(steps: impl IntoIterator<Item = ChainStep>) -> Chain {
    let chain = steps
        .into_iter()
        .fold(Chain::new(), |chain, step| chain.step(step));
    chain.run();
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    fn recording_step(log: Arc<Mutex<Vec<usize>>>, id: usize) -> impl FnOnce(Advance) + Send + 'static {
        move |advance: Advance| {
            log.lock().push(id);
            advance.advance();
        }
    }

    #[test]
    fn test_steps_run_in_order_exactly_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = Chain::new()
            .step(recording_step(Arc::clone(&log), 0))
            .step(recording_step(Arc::clone(&log), 1))
            .step(recording_step(Arc::clone(&log), 2));

        assert_eq!(chain.status(), ChainStatus::Idle);
        chain.run();

        assert_eq!(*log.lock(), vec![0, 1, 2]);
        assert_eq!(chain.status(), ChainStatus::Done);
    }

    #[test]
    fn test_empty_chain_is_immediately_done() {
        let chain = Chain::new();
        chain.run();
        assert_eq!(chain.status(), ChainStatus::Done);
    }

    #[test]
    fn test_step_that_never_advances_stalls_the_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = Chain::new()
            .step(recording_step(Arc::clone(&log), 0))
            .step(|advance: Advance| drop(advance))
            .step(recording_step(Arc::clone(&log), 2));

        chain.run();

        assert_eq!(*log.lock(), vec![0]);
        assert_eq!(chain.status(), ChainStatus::Running(1));
    }

    #[test]
    fn test_deep_synchronous_chain_runs_in_constant_stack() {
        let mut chain = Chain::new();
        for _ in 0..50_000 {
            chain = chain.step(|advance: Advance| advance.advance());
        }
        chain.run();
        assert_eq!(chain.status(), ChainStatus::Done);
    }

    #[test]
    fn test_advance_from_another_thread() {
        let (tx, rx) = mpsc::channel();
        let chain = Chain::new()
            .step(|advance: Advance| {
                std::thread::spawn(move || {
                    std::thread::sleep(Duration::from_millis(50));
                    advance.advance();
                });
            })
            .step(move |advance: Advance| {
                tx.send(()).unwrap();
                advance.advance();
            });

        chain.run();
        assert_eq!(chain.status(), ChainStatus::Running(0));

        rx.recv_timeout(Duration::from_secs(1)).unwrap();
    }

    #[test]
    fn test_rerunning_a_started_chain_is_ignored() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = Chain::new().step(recording_step(Arc::clone(&log), 0));
        chain.run();
        chain.run();
        assert_eq!(*log.lock(), vec![0]);
    }

    #[test]
    fn test_chain_async_starts_immediately() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let steps: Vec<ChainStep> = vec![
            Box::new(recording_step(Arc::clone(&log), 0)),
            Box::new(recording_step(Arc::clone(&log), 1)),
        ];
        let chain = chain_async(steps);
        assert_eq!(*log.lock(), vec![0, 1]);
        assert_eq!(chain.status(), ChainStatus::Done);
    }
}
