//! Concurrent command invocation.
//!
//! An invocation always validates first; a rejected argument list never
//! reaches the handler. In interactive mode the handler then runs on its
//! own worker thread while the calling thread polls a [`CancelWatch`] with
//! a short bound, so a blocking handler never stops the user from ending
//! the shell. Exactly one worker exists at a time; the next command is not
//! accepted until the previous worker is joined.
//!
//! Cancellation is cooperative: when the watch reports end-of-stream or the
//! cancel byte, the executor sets its [`CancelToken`] and gives the handler
//! a bounded grace period to finish before reporting
//! [`InvokeOutcome::Cancelled`]. The decision to actually exit the process
//! belongs to the caller (the repl), which keeps this layer testable.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::cancel::{CancelSignal, CancelToken, CancelWatch};
use crate::registry::{CommandRegistration, Handler};

/// How often the finished flag is re-checked during the grace period.
const FINISH_POLL: Duration = Duration::from_millis(10);

/// Result of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// Validation passed and the handler returned without failure.
    Completed,
    /// The validator rejected the arguments; the handler never ran.
    Rejected(String),
    /// The handler ran and failed (error return or panic).
    Failed(String),
    /// A cancel signal arrived while the handler was in flight. The caller
    /// should terminate the shell; the handler may still be running if the
    /// grace period expired.
    Cancelled,
}

/// Runs registered handlers with validation-first sequencing and an
/// input-stream watch for interactive invocations.
///
/// The `command_running` flag is set for the whole handler lifetime and is
/// readable by the signal-notice collaborator to suppress its prompt notice
/// while a command is active.
#[derive(Debug)]
pub struct Executor {
    command_running: Arc<AtomicBool>,
    cancel: CancelToken,
    watch_timeout: Duration,
    grace_period: Duration,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_millis(2000))
    }
}

impl Executor {
    /// Creates an executor with the given watch poll bound and cancel grace
    /// period.
    pub fn new(watch_timeout: Duration, grace_period: Duration) -> Self {
        Self {
            command_running: Arc::new(AtomicBool::new(false)),
            cancel: CancelToken::new(),
            watch_timeout,
            grace_period,
        }
    }

    /// Shared flag that is true while a handler is running.
    pub fn command_running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.command_running)
    }

    /// True while a handler is running.
    pub fn is_command_running(&self) -> bool {
        self.command_running.load(Ordering::SeqCst)
    }

    /// Token handlers can capture to observe cancellation requests.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// One-shot invocation: validate, then run the handler synchronously on
    /// the calling thread. No input watching occurs.
    pub fn invoke(&self, registration: &CommandRegistration, args: &[String]) -> InvokeOutcome {
        if let Some(rejection) = self.validate(registration, args) {
            return rejection;
        }

        self.command_running.store(true, Ordering::SeqCst);
        let failure = run_captured(&registration.handler, args);
        self.command_running.store(false, Ordering::SeqCst);

        match failure {
            Some(message) => InvokeOutcome::Failed(message),
            None => InvokeOutcome::Completed,
        }
    }

    /// Interactive invocation: validate, run the handler on a worker
    /// thread, and poll `watch` until the handler finishes or a cancel
    /// signal arrives.
    pub fn invoke_monitored(
        &self,
        registration: &CommandRegistration,
        args: &[String],
        watch: &mut dyn CancelWatch,
    ) -> InvokeOutcome {
        if let Some(rejection) = self.validate(registration, args) {
            return rejection;
        }

        let finished = Arc::new(AtomicBool::new(false));
        let failure: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        self.command_running.store(true, Ordering::SeqCst);

        let worker = {
            let handler = Arc::clone(&registration.handler);
            let args = args.to_vec();
            let finished = Arc::clone(&finished);
            let failure = Arc::clone(&failure);
            thread::spawn(move || {
                let result = run_captured(&handler, &args);
                if let Some(message) = result {
                    // Written exactly once, read only after the join.
                    *failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(message);
                }
                finished.store(true, Ordering::SeqCst);
            })
        };

        while !finished.load(Ordering::SeqCst) {
            match watch.poll(self.watch_timeout) {
                CancelSignal::Idle => continue,
                CancelSignal::Cancel => {
                    debug!("cancel signal received while a handler is in flight");
                    self.cancel.cancel();

                    let deadline = Instant::now() + self.grace_period;
                    while !finished.load(Ordering::SeqCst) && Instant::now() < deadline {
                        thread::sleep(FINISH_POLL);
                    }
                    if finished.load(Ordering::SeqCst) {
                        let _ = worker.join();
                    } else {
                        // Grace period expired; the worker is abandoned and
                        // the process is about to exit.
                        warn!("handler did not acknowledge cancellation in time");
                    }
                    self.command_running.store(false, Ordering::SeqCst);
                    return InvokeOutcome::Cancelled;
                }
            }
        }

        // The worker set `finished` as its last action before returning, so
        // this join is quick.
        let _ = worker.join();
        self.command_running.store(false, Ordering::SeqCst);

        let message = failure.lock().unwrap_or_else(|e| e.into_inner()).take();
        match message {
            Some(message) => InvokeOutcome::Failed(message),
            None => InvokeOutcome::Completed,
        }
    }

    fn validate(
        &self,
        registration: &CommandRegistration,
        args: &[String],
    ) -> Option<InvokeOutcome> {
        let validator = registration.validator.as_ref()?;
        match validator(args) {
            Ok(()) => None,
            Err(error) => {
                debug!(command = %registration.name, %error, "arguments rejected");
                Some(InvokeOutcome::Rejected(error.to_string()))
            }
        }
    }
}

/// Runs a handler, converting an `Err` return or a panic into the message
/// the user will see.
fn run_captured(handler: &Handler, args: &[String]) -> Option<String> {
    match catch_unwind(AssertUnwindSafe(|| handler(args))) {
        Ok(Ok(())) => None,
        Ok(Err(error)) => Some(error.to_string()),
        Err(payload) => Some(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
