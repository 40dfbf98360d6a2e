//! rustyline integration: tab completion backed by the registry.
//!
//! At the start of the line the helper completes command names; past the
//! first word it defers to the matched command's tree completer. The helper
//! owns a shared handle to the registry, so no global state is involved in
//! reaching back from the editor callback.

use std::sync::{Arc, RwLock};

use rustyline::Context;
use rustyline::completion::{Completer, Pair};

use crate::registry::CommandRegistry;

/// Line-editor helper holding the completion state.
pub struct ShellHelper {
    registry: Arc<RwLock<CommandRegistry>>,
}

impl ShellHelper {
    pub fn new(registry: Arc<RwLock<CommandRegistry>>) -> Self {
        Self { registry }
    }
}

impl rustyline::Helper for ShellHelper {}

impl rustyline::hint::Hinter for ShellHelper {
    type Hint = String;
}

impl rustyline::highlight::Highlighter for ShellHelper {}

impl rustyline::validate::Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let registry = self.registry.read().unwrap_or_else(|e| e.into_inner());
        Ok(complete_line(&registry, line, pos))
    }
}

/// Computes completions for the word ending at `pos`.
///
/// Returns the byte offset the replacement starts at and the candidate
/// pairs, rustyline-style.
pub(crate) fn complete_line(
    registry: &CommandRegistry,
    line: &str,
    pos: usize,
) -> (usize, Vec<Pair>) {
    let before = &line[..pos];
    let start = before.rfind(' ').map(|i| i + 1).unwrap_or(0);
    let word = &before[start..];

    // First word: complete command names. Commands that take arguments get
    // a trailing space so the user can keep typing.
    if start == 0 {
        let pairs = registry
            .iter()
            .filter(|reg| reg.name.starts_with(word))
            .map(|reg| {
                let takes_arguments = reg.completer.is_some() || reg.validator.is_some();
                let replacement = if takes_arguments {
                    format!("{} ", reg.name)
                } else {
                    reg.name.clone()
                };
                Pair {
                    display: reg.name.clone(),
                    replacement,
                }
            })
            .collect();
        return (start, pairs);
    }

    let tokens: Vec<String> = before.split_whitespace().map(str::to_string).collect();
    let Some(command) = tokens.first() else {
        return (start, Vec::new());
    };
    let Some(completer) = registry.get(command).and_then(|reg| reg.completer.clone()) else {
        return (start, Vec::new());
    };

    // With the cursor just past a space the partial word is empty and the
    // position being completed is one past the tokens already typed.
    let param_index = if word.is_empty() {
        tokens.len()
    } else {
        tokens.len() - 1
    };

    let pairs = completer(&tokens, param_index, word)
        .into_iter()
        .map(|candidate| Pair {
            display: candidate.clone(),
            replacement: candidate,
        })
        .collect();
    (start, pairs)
}
