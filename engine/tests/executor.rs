//! Integration tests for the concurrent invocation model.
//!
//! The input stream is replaced by a scripted watch so cancel delivery is
//! deterministic; the executor itself never exits the process, which keeps
//! the hard-stop decision observable as an outcome value.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use argshell_core::{SchemaBuilder, schema_engines};
use argshell_engine::{
    CancelSignal, CancelWatch, CommandRegistration, Executor, InvokeOutcome,
};

/// Feeds a fixed signal sequence to the executor, one per poll; runs of the
/// end are idle. Each poll consumes a sliver of the timeout so loops make
/// wall-clock progress.
struct ScriptedWatch {
    signals: Vec<CancelSignal>,
    next: usize,
}

impl ScriptedWatch {
    fn idle() -> Self {
        Self {
            signals: Vec::new(),
            next: 0,
        }
    }

    fn cancel_after(idle_polls: usize) -> Self {
        let mut signals = vec![CancelSignal::Idle; idle_polls];
        signals.push(CancelSignal::Cancel);
        Self { signals, next: 0 }
    }
}

impl CancelWatch for ScriptedWatch {
    fn poll(&mut self, timeout: Duration) -> CancelSignal {
        thread::sleep(timeout.min(Duration::from_millis(5)));
        let signal = self
            .signals
            .get(self.next)
            .copied()
            .unwrap_or(CancelSignal::Idle);
        self.next += 1;
        signal
    }
}

fn executor() -> Executor {
    // Short intervals keep the tests fast; ratios match production.
    Executor::new(Duration::from_millis(5), Duration::from_millis(250))
}

fn tokens(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_sleeping_handler_completes_without_incident() {
    let exec = executor();
    let reg = CommandRegistration::new(
        "slow",
        "",
        Arc::new(|_args| {
            thread::sleep(Duration::from_millis(40));
            Ok(())
        }),
    );

    let outcome = exec.invoke_monitored(&reg, &tokens(&["slow"]), &mut ScriptedWatch::idle());
    assert_eq!(outcome, InvokeOutcome::Completed);
    assert!(!exec.is_command_running());
}

#[test]
fn test_cancel_interrupts_cooperative_handler() {
    let exec = executor();
    let token = exec.cancel_token();
    let handler_token = token.clone();
    let reg = CommandRegistration::new(
        "wait",
        "",
        Arc::new(move |_args| {
            while !handler_token.is_cancelled() {
                thread::sleep(Duration::from_millis(5));
            }
            Ok(())
        }),
    );

    let started = Instant::now();
    let outcome = exec.invoke_monitored(&reg, &tokens(&["wait"]), &mut ScriptedWatch::cancel_after(2));
    assert_eq!(outcome, InvokeOutcome::Cancelled);
    assert!(token.is_cancelled());
    // Handler acknowledged well inside the grace period.
    assert!(started.elapsed() < Duration::from_millis(250));
}

#[test]
fn test_cancel_returns_before_blocking_handler_would_finish() {
    let exec = executor();
    let reg = CommandRegistration::new(
        "block",
        "",
        Arc::new(|_args| {
            thread::sleep(Duration::from_secs(30));
            Ok(())
        }),
    );

    let started = Instant::now();
    let outcome =
        exec.invoke_monitored(&reg, &tokens(&["block"]), &mut ScriptedWatch::cancel_after(0));
    assert_eq!(outcome, InvokeOutcome::Cancelled);
    // Bounded by the grace period, nowhere near the handler's sleep.
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(!exec.is_command_running());
}

#[test]
fn test_validation_rejection_short_circuits_handler() {
    let exec = executor();
    let ran = Arc::new(AtomicBool::new(false));
    let ran_in_handler = Arc::clone(&ran);
    let (completer, validator) = schema_engines(
        SchemaBuilder::new()
            .root(["timeout"])
            .numeric(["timeout"], 1, 600)
            .build(),
    );
    let reg = CommandRegistration::new(
        "set",
        "",
        Arc::new(move |_args| {
            ran_in_handler.store(true, Ordering::SeqCst);
            Ok(())
        }),
    )
    .with_engines(completer, validator);

    let outcome = exec.invoke_monitored(
        &reg,
        &tokens(&["set", "timeout", "601"]),
        &mut ScriptedWatch::idle(),
    );
    assert_eq!(
        outcome,
        InvokeOutcome::Rejected(
            "number out of range at position 2: expected 1 to 600".to_string()
        )
    );
    assert!(!ran.load(Ordering::SeqCst));
}

#[test]
fn test_handler_failure_message_crosses_the_join() {
    let exec = executor();
    let reg = CommandRegistration::new(
        "fail",
        "",
        Arc::new(|_args| Err("service endpoint unreachable".into())),
    );

    let outcome = exec.invoke_monitored(&reg, &tokens(&["fail"]), &mut ScriptedWatch::idle());
    assert_eq!(
        outcome,
        InvokeOutcome::Failed("service endpoint unreachable".to_string())
    );
}

#[test]
fn test_handler_panic_is_captured() {
    let exec = executor();
    let reg = CommandRegistration::new("boom", "", Arc::new(|_args| panic!("wires crossed")));

    let outcome = exec.invoke_monitored(&reg, &tokens(&["boom"]), &mut ScriptedWatch::idle());
    assert_eq!(outcome, InvokeOutcome::Failed("wires crossed".to_string()));
    assert!(!exec.is_command_running());
}

#[test]
fn test_command_running_flag_tracks_handler_lifetime() {
    let exec = executor();
    let flag = exec.command_running_flag();
    let observed_during = Arc::new(AtomicBool::new(false));

    let flag_in_handler = Arc::clone(&flag);
    let observed = Arc::clone(&observed_during);
    let reg = CommandRegistration::new(
        "probe",
        "",
        Arc::new(move |_args| {
            observed.store(flag_in_handler.load(Ordering::SeqCst), Ordering::SeqCst);
            Ok(())
        }),
    );

    assert!(!flag.load(Ordering::SeqCst));
    let outcome = exec.invoke_monitored(&reg, &tokens(&["probe"]), &mut ScriptedWatch::idle());
    assert_eq!(outcome, InvokeOutcome::Completed);
    assert!(observed_during.load(Ordering::SeqCst));
    assert!(!flag.load(Ordering::SeqCst));
}

#[test]
fn test_one_shot_invocation_runs_on_the_calling_thread() {
    let exec = executor();
    let caller = thread::current().id();
    let same_thread = Arc::new(AtomicBool::new(false));

    let same = Arc::clone(&same_thread);
    let reg = CommandRegistration::new(
        "sync",
        "",
        Arc::new(move |_args| {
            same.store(thread::current().id() == caller, Ordering::SeqCst);
            Ok(())
        }),
    );

    assert_eq!(exec.invoke(&reg, &tokens(&["sync"])), InvokeOutcome::Completed);
    assert!(same_thread.load(Ordering::SeqCst));
}

#[test]
fn test_one_shot_invocation_validates_first() {
    let exec = executor();
    let (completer, validator) = schema_engines(SchemaBuilder::new().root(["on", "off"]).build());
    let reg = CommandRegistration::new("power", "", Arc::new(|_args| Ok(())))
        .with_engines(completer, validator);

    match exec.invoke(&reg, &tokens(&["power", "standby"])) {
        InvokeOutcome::Rejected(message) => {
            assert!(message.contains("position 1"));
            assert!(message.contains("on, off"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}
