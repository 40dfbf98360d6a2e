//! Cancellation signaling for in-flight commands.
//!
//! Two pieces: [`CancelToken`], the cooperative flag a running handler can
//! check, and [`CancelWatch`], the executor's view of the input stream. The
//! standard watch polls stdin with a bounded timeout and reports a cancel
//! when the stream ends or the designated control byte arrives; tests
//! substitute a scripted watch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Control byte that requests shell termination mid-command (Ctrl+D).
pub const CANCEL_BYTE: u8 = 0x04;

/// Shared cooperative-cancellation flag.
///
/// The executor sets the token when the input stream signals cancel while a
/// handler is still running; long-running handlers that capture a clone at
/// registration time can observe it and return early, letting the shell
/// exit inside the grace period instead of abandoning the worker.
///
/// # Examples
///
/// ```
/// use argshell_engine::CancelToken;
///
/// let token = CancelToken::new();
/// let seen_by_handler = token.clone();
/// assert!(!seen_by_handler.is_cancelled());
/// token.cancel();
/// assert!(seen_by_handler.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// What one bounded poll of the input stream observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelSignal {
    /// Nothing of interest; keep waiting on the handler.
    Idle,
    /// End-of-stream or the cancel byte: the shell should wind down.
    Cancel,
}

/// The executor's bounded view of the controlling input stream.
///
/// `poll` must return within roughly `timeout`; the executor calls it in a
/// loop while the handler thread runs.
pub trait CancelWatch: Send {
    fn poll(&mut self, timeout: Duration) -> CancelSignal;
}

/// Watches the process's stdin with `poll(2)`.
///
/// Only used while a command is in flight; the line editor is inactive
/// then, so draining stray bytes here cannot corrupt an edit in progress.
/// End-of-stream and [`CANCEL_BYTE`] both report [`CancelSignal::Cancel`];
/// any other input is discarded.
#[derive(Debug, Default)]
pub struct StdinWatch;

impl StdinWatch {
    pub fn new() -> Self {
        Self
    }
}

impl CancelWatch for StdinWatch {
    fn poll(&mut self, timeout: Duration) -> CancelSignal {
        let mut pfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN | libc::POLLHUP | libc::POLLERR,
            revents: 0,
        };

        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
        let ready = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
        if ready <= 0 {
            return CancelSignal::Idle;
        }

        if pfd.revents & (libc::POLLIN | libc::POLLHUP) != 0 {
            let mut buffer = [0u8; 64];
            let n = unsafe {
                libc::read(
                    libc::STDIN_FILENO,
                    buffer.as_mut_ptr() as *mut libc::c_void,
                    buffer.len(),
                )
            };
            if n == 0 {
                return CancelSignal::Cancel;
            }
            if n > 0 && buffer[..n as usize].contains(&CANCEL_BYTE) {
                return CancelSignal::Cancel;
            }
        }

        CancelSignal::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_clear_and_latches() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }
}
