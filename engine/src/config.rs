//! Shell options, loadable from a YAML file.
//!
//! Applications embedding the shell usually configure it in code via
//! [`ShellOptions::default()`] and field edits; a YAML file is supported for
//! deployments that want the prompt or cancel timing adjustable without a
//! rebuild.
//!
//! # Example YAML
//!
//! ```yaml
//! prompt: "carlink> "
//! banner: "CarLink Service Control"
//! grace_period_ms: 2000
//! watch_timeout_ms: 100
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

fn default_prompt() -> String {
    "argshell> ".to_string()
}

fn default_grace_period_ms() -> u64 {
    2000
}

fn default_watch_timeout_ms() -> u64 {
    100
}

/// Tunable settings for an interactive shell.
///
/// # Examples
///
/// ```
/// use argshell_engine::ShellOptions;
///
/// let options = ShellOptions::default();
/// assert_eq!(options.prompt, "argshell> ");
/// assert_eq!(options.grace_period_ms, 2000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellOptions {
    /// Prompt string printed before each input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Welcome banner printed when the interactive loop starts.
    /// `None` prints a minimal default.
    pub banner: Option<String>,
    /// How long to wait for a handler to acknowledge cancellation before
    /// the shell exits anyway (milliseconds).
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
    /// Bound on each input-stream poll while a handler runs (milliseconds).
    #[serde(default = "default_watch_timeout_ms")]
    pub watch_timeout_ms: u64,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            banner: None,
            grace_period_ms: default_grace_period_ms(),
            watch_timeout_ms: default_watch_timeout_ms(),
        }
    }
}

impl ShellOptions {
    /// Loads options from a YAML file.
    ///
    /// Missing fields take their defaults, so a file may set only the keys
    /// it cares about.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Writes options to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Grace period as a [`Duration`].
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    /// Watch poll bound as a [`Duration`].
    pub fn watch_timeout(&self) -> Duration {
        Duration::from_millis(self.watch_timeout_ms)
    }
}
