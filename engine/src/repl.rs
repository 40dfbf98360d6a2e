//! The interactive shell: registration surface, prompt loop, dispatch.
//!
//! A [`Shell`] owns the command registry and the executor. Applications
//! register commands (optionally with a schema tree for completion and
//! validation), then call [`Shell::run`] with the process arguments:
//! non-empty arguments run a single command and return, no arguments enter
//! the interactive prompt loop.

use std::io::Write;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing::debug;

use argshell_core::{SchemaNode, schema_engines};

use crate::cancel::{CancelToken, StdinWatch};
use crate::color;
use crate::config::ShellOptions;
use crate::error::Result;
use crate::executor::{Executor, InvokeOutcome};
use crate::helper::ShellHelper;
use crate::registry::{CommandRegistration, CommandRegistry, HandlerError};

/// An embeddable interactive shell.
///
/// # Examples
///
/// ```no_run
/// use argshell_core::SchemaBuilder;
/// use argshell_engine::Shell;
///
/// let shell = Shell::new();
/// shell.register_with_schema(
///     "set",
///     "Set configuration",
///     SchemaBuilder::new()
///         .root(["device1", "timeout"])
///         .path(["device1"], ["light", "sound"])
///         .numeric(["timeout"], 1, 600)
///         .build(),
///     |args| {
///         println!("set {:?}", &args[1..]);
///         Ok(())
///     },
/// );
///
/// let args: Vec<String> = std::env::args().skip(1).collect();
/// shell.run(&args).unwrap();
/// ```
pub struct Shell {
    registry: Arc<RwLock<CommandRegistry>>,
    options: ShellOptions,
    executor: Arc<Executor>,
    running: Arc<AtomicBool>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Creates a shell with default options and the builtin commands
    /// (`help`, `exit`, `quit`, `clear`) registered.
    pub fn new() -> Self {
        Self::with_options(ShellOptions::default())
    }

    /// Creates a shell with explicit options.
    pub fn with_options(options: ShellOptions) -> Self {
        let executor = Arc::new(Executor::new(
            options.watch_timeout(),
            options.grace_period(),
        ));
        let shell = Self {
            registry: Arc::new(RwLock::new(CommandRegistry::new())),
            options,
            executor,
            running: Arc::new(AtomicBool::new(true)),
        };
        shell.register_builtins();
        shell
    }

    /// Registers a command without completion or validation engines.
    ///
    /// Re-registering a name silently replaces the earlier command.
    pub fn register<F>(&self, name: &str, description: &str, handler: F)
    where
        F: Fn(&[String]) -> std::result::Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.register_entry(CommandRegistration::new(
            name,
            description,
            Arc::new(handler),
        ));
    }

    /// Registers a command whose arguments are described by a schema tree.
    ///
    /// The tree is wrapped in a shared completion/validation engine pair;
    /// the handler only runs for argument lists the validator accepts.
    pub fn register_with_schema<F>(
        &self,
        name: &str,
        description: &str,
        schema: SchemaNode,
        handler: F,
    ) where
        F: Fn(&[String]) -> std::result::Result<(), HandlerError> + Send + Sync + 'static,
    {
        let (completer, validator) = schema_engines(schema);
        self.register_entry(
            CommandRegistration::new(name, description, Arc::new(handler))
                .with_engines(completer, validator),
        );
    }

    /// Registers a pre-built registration (custom engine combinations).
    pub fn register_entry(&self, registration: CommandRegistration) {
        self.registry
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .register(registration);
    }

    /// Token a long-running handler can capture to observe cancellation.
    pub fn cancel_token(&self) -> CancelToken {
        self.executor.cancel_token()
    }

    /// True while a command handler is running.
    pub fn is_command_running(&self) -> bool {
        self.executor.is_command_running()
    }

    /// Runs the shell: a single command when `args` is non-empty (command
    /// name at index 0), otherwise the interactive prompt loop.
    ///
    /// In single-command mode the return is `Ok` regardless of command
    /// outcome; command-level errors are printed, not raised.
    pub fn run(&self, args: &[String]) -> Result<()> {
        if args.is_empty() {
            self.run_interactive()
        } else {
            self.run_single(args);
            Ok(())
        }
    }

    /// Executes one command synchronously, printing its outcome.
    pub fn run_single(&self, tokens: &[String]) {
        let Some(name) = tokens.first() else {
            return;
        };
        let Some(registration) = self.lookup(name) else {
            self.print_unknown(name);
            return;
        };
        let outcome = self.executor.invoke(&registration, tokens);
        self.report(outcome);
    }

    fn run_interactive(&self) -> Result<()> {
        self.print_banner();

        // Ctrl+C at the prompt is handled by the line editor below; this
        // handler covers the window while a command handler owns the
        // terminal, matching the running-flag suppression contract.
        let running_flag = self.executor.command_running_flag();
        ctrlc::set_handler(move || {
            if running_flag.load(Ordering::SeqCst) {
                return;
            }
            println!(
                "\n{}Use 'exit' or Ctrl+D to quit{}",
                color::YELLOW,
                color::RESET
            );
        })?;

        let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellHelper::new(Arc::clone(&self.registry))));

        while self.running.load(Ordering::SeqCst) {
            match editor.readline(&self.options.prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line);
                    let tokens: Vec<String> =
                        line.split_whitespace().map(str::to_string).collect();
                    self.dispatch(&tokens);
                }
                Err(ReadlineError::Interrupted) => {
                    println!(
                        "{}Use 'exit' or Ctrl+D to quit{}",
                        color::YELLOW,
                        color::RESET
                    );
                }
                Err(ReadlineError::Eof) => {
                    println!("{}Goodbye!{}", color::CYAN, color::RESET);
                    break;
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(())
    }

    fn dispatch(&self, tokens: &[String]) {
        let Some(registration) = self.lookup(&tokens[0]) else {
            self.print_unknown(&tokens[0]);
            return;
        };
        debug!(command = %registration.name, "dispatching");

        let mut watch = StdinWatch::new();
        match self
            .executor
            .invoke_monitored(&registration, tokens, &mut watch)
        {
            InvokeOutcome::Cancelled => {
                println!("\n{}Goodbye!{}", color::CYAN, color::RESET);
                let _ = std::io::stdout().flush();
                process::exit(0);
            }
            outcome => self.report(outcome),
        }
    }

    fn lookup(&self, name: &str) -> Option<CommandRegistration> {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    fn report(&self, outcome: InvokeOutcome) {
        match outcome {
            InvokeOutcome::Completed => {}
            InvokeOutcome::Rejected(message) => {
                println!("{}{message}{}", color::RED, color::RESET);
            }
            InvokeOutcome::Failed(message) => {
                println!("{}Error: {message}{}", color::RED, color::RESET);
            }
            // Only produced by monitored invocations; dispatch handles it.
            InvokeOutcome::Cancelled => {}
        }
    }

    fn print_banner(&self) {
        match &self.options.banner {
            Some(banner) => println!("{}{}{}{}", color::CYAN, color::BOLD, banner, color::RESET),
            None => println!(
                "{}{}argshell {} - type 'help' for available commands{}",
                color::CYAN,
                color::BOLD,
                env!("CARGO_PKG_VERSION"),
                color::RESET
            ),
        }
    }

    fn print_unknown(&self, name: &str) {
        println!(
            "{}Unknown command: {name}. Type 'help' for available commands.{}",
            color::RED,
            color::RESET
        );
    }

    fn register_builtins(&self) {
        let registry = Arc::clone(&self.registry);
        self.register("help", "Show available commands", move |_args| {
            let registry = registry.read().unwrap_or_else(|e| e.into_inner());
            println!(
                "\n{}{}Available Commands:{}",
                color::CYAN,
                color::BOLD,
                color::RESET
            );
            println!("{}", "-".repeat(50));
            for reg in registry.iter() {
                println!(
                    "  {}{:<15}{} {}",
                    color::YELLOW,
                    reg.name,
                    color::RESET,
                    reg.description
                );
            }
            println!();
            Ok(())
        });

        let running = Arc::clone(&self.running);
        let exit = move |_args: &[String]| -> std::result::Result<(), HandlerError> {
            println!("{}Goodbye!{}", color::CYAN, color::RESET);
            running.store(false, Ordering::SeqCst);
            Ok(())
        };
        self.register("exit", "Exit the shell", exit.clone());
        self.register("quit", "Exit the shell (alias for exit)", exit);

        self.register("clear", "Clear the screen", |_args| {
            print!("{}", color::CLEAR_SCREEN);
            std::io::stdout().flush()?;
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_registered() {
        let shell = Shell::new();
        let registry = shell.registry.read().unwrap();
        assert_eq!(registry.names(), vec!["clear", "exit", "help", "quit"]);
    }

    #[test]
    fn test_user_registration_replaces_builtin() {
        let shell = Shell::new();
        shell.register("clear", "Custom clear", |_args| Ok(()));
        let registry = shell.registry.read().unwrap();
        assert_eq!(registry.get("clear").unwrap().description, "Custom clear");
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_exit_builtin_stops_the_loop_flag() {
        let shell = Shell::new();
        let tokens = vec!["exit".to_string()];
        shell.run_single(&tokens);
        assert!(!shell.running.load(Ordering::SeqCst));
    }

    #[test]
    fn test_schema_registration_attaches_engines() {
        let shell = Shell::new();
        shell.register_with_schema(
            "set",
            "Set configuration",
            argshell_core::SchemaBuilder::new().root(["a"]).build(),
            |_args| Ok(()),
        );
        let registry = shell.registry.read().unwrap();
        let reg = registry.get("set").unwrap();
        assert!(reg.completer.is_some());
        assert!(reg.validator.is_some());
    }
}
