//! Embeddable shell engine: registry, concurrent executor, interactive loop.
//!
//! This crate turns the schema primitives from [`argshell_core`] into a
//! working shell:
//!
//! - [`CommandRegistry`] / [`CommandRegistration`] — the flat name-to-handler
//!   table with optional completion and validation engines per command.
//! - [`Executor`] — runs a handler on its own thread while the controlling
//!   thread polls the input stream, so a blocking handler never prevents the
//!   user from ending the shell. Validation always runs first; handler
//!   failures are captured across the join and reported once.
//! - [`CancelToken`] / [`CancelWatch`] — cooperative cancellation with a
//!   bounded grace period, driven by end-of-stream or the Ctrl+D byte.
//! - [`Shell`] — the rustyline prompt loop, builtins, tab completion, and
//!   one-shot command mode.
//!
//! # Example
//!
//! ```no_run
//! use argshell_core::SchemaBuilder;
//! use argshell_engine::Shell;
//!
//! let shell = Shell::new();
//! shell.register("status", "Show service status", |_args| {
//!     println!("all services nominal");
//!     Ok(())
//! });
//! shell.register_with_schema(
//!     "set",
//!     "Set configuration",
//!     SchemaBuilder::new()
//!         .root(["timeout"])
//!         .numeric(["timeout"], 1, 600)
//!         .build(),
//!     |args| {
//!         println!("timeout set to {}", args[2]);
//!         Ok(())
//!     },
//! );
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! shell.run(&args).unwrap();
//! ```

mod cancel;
pub mod color;
mod config;
mod error;
mod executor;
mod helper;
mod registry;
mod repl;

pub use cancel::{CANCEL_BYTE, CancelSignal, CancelToken, CancelWatch, StdinWatch};
pub use config::ShellOptions;
pub use error::{Result, ShellError};
pub use executor::{Executor, InvokeOutcome};
pub use helper::ShellHelper;
pub use registry::{CommandRegistration, CommandRegistry, Handler, HandlerError};
pub use repl::Shell;
