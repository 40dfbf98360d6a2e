//! Service-control demo shell.
//!
//! A small application showing how the engine is embedded: a handful of
//! commands with tree-schema completion and validation, a long-running
//! command that cooperates with cancellation, and the one-shot vs
//! interactive split driven by trailing process arguments.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;

use argshell_core::SchemaBuilder;
use argshell_engine::{Shell, ShellOptions};

const MANAGED_SERVICES: [&str; 3] = ["media", "network", "diagnostics"];

#[derive(Debug, Parser)]
#[command(name = "argshell")]
#[command(about = "Service control shell built on the argshell engine")]
struct Cli {
    /// Optional YAML options file (prompt, banner, cancel timing).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Command to run one-shot; interactive mode when omitted.
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() -> argshell_engine::Result<()> {
    let cli = Cli::parse();

    let options = match &cli.config {
        Some(path) => ShellOptions::load(path)?,
        None => {
            let mut options = ShellOptions::default();
            options.prompt = "svc> ".into();
            options.banner =
                Some("Service Control Shell - type 'help' for available commands".into());
            options
        }
    };

    let shell = Shell::with_options(options);
    register_commands(&shell);
    shell.run(&cli.command)
}

fn register_commands(shell: &Shell) {
    shell.register("status", "Show service status", |_args| {
        for service in MANAGED_SERVICES {
            println!("{service:<14} running");
        }
        Ok(())
    });

    shell.register_with_schema(
        "service",
        "Start, stop, or restart a managed service",
        SchemaBuilder::new()
            .root(["start", "stop", "restart"])
            .path(["start"], MANAGED_SERVICES)
            .path(["stop"], MANAGED_SERVICES)
            .path(["restart"], MANAGED_SERVICES)
            .build(),
        |args| {
            println!("{} requested for {}", args[1], args[2]);
            Ok(())
        },
    );

    shell.register_with_schema(
        "set",
        "Set a device level or the service timeout",
        SchemaBuilder::new()
            .root(["device1", "device2", "timeout"])
            .path(["device1"], ["light", "sound"])
            .path(["device1", "light"], ["0", "1", "2"])
            .path(["device1", "sound"], ["on", "off"])
            .path(["device2"], ["light"])
            .path(["device2", "light"], ["0", "1"])
            .numeric(["timeout"], 1, 600)
            .build(),
        |args| {
            println!("set {}", args[1..].join(" "));
            Ok(())
        },
    );

    // Long-running command; checks the shared token so Ctrl+D mid-sleep
    // lets the shell exit inside the grace period.
    let cancel = shell.cancel_token();
    shell.register_with_schema(
        "sleep",
        "Sleep for N seconds (cancellable with Ctrl+D)",
        SchemaBuilder::new()
            .numeric(Vec::<&str>::new(), 1, 120)
            .build(),
        move |args| {
            let seconds: u64 = args[1].parse().unwrap_or(0);
            let mut remaining = Duration::from_secs(seconds);
            while !remaining.is_zero() {
                if cancel.is_cancelled() {
                    return Ok(());
                }
                let step = remaining.min(Duration::from_millis(100));
                thread::sleep(step);
                remaining -= step;
            }
            println!("slept {seconds}s");
            Ok(())
        },
    );
}
