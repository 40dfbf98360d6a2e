//! Shared-ownership completion/validation engine pair.
//!
//! A schema tree is built once at registration time and then captured,
//! read-only, by the two engine closures the shell hands to its line-editing
//! and dispatch collaborators. Both closures hold the same
//! [`Arc`]`<`[`SchemaNode`]`>`; the tree lives as long as either engine and
//! is never mutated after construction, so no locking is needed.

use std::sync::Arc;

use crate::complete::complete_at;
use crate::types::SchemaNode;
use crate::validate::{ArgError, validate_args};

/// Completion engine: `(all_tokens, param_index, current_input)` to the
/// prefix-filtered candidates at that position, in declared order.
pub type Completer = Arc<dyn Fn(&[String], usize, &str) -> Vec<String> + Send + Sync>;

/// Validation engine: full args (command name at index 0) to `Ok(())` or
/// the first violation found.
pub type Validator = Arc<dyn Fn(&[String]) -> Result<(), ArgError> + Send + Sync>;

/// Wraps a finished tree in a completer/validator pair sharing one
/// reference-counted copy of the graph.
///
/// # Examples
///
/// ```
/// use argshell_core::{SchemaBuilder, schema_engines};
///
/// let (complete, validate) = schema_engines(
///     SchemaBuilder::new()
///         .root(["device1", "timeout"])
///         .path(["device1"], ["light", "sound"])
///         .numeric(["timeout"], 1, 600)
///         .build(),
/// );
///
/// let tokens = vec!["set".to_string(), "device1".to_string()];
/// assert_eq!(complete(&tokens, 2, "li"), vec!["light"]);
///
/// let args: Vec<String> = ["set", "timeout", "300"]
///     .iter().map(|s| s.to_string()).collect();
/// assert!(validate(&args).is_ok());
/// ```
pub fn schema_engines(root: SchemaNode) -> (Completer, Validator) {
    let tree = Arc::new(root);
    let completion_tree = Arc::clone(&tree);
    let completer: Completer = Arc::new(move |tokens: &[String], param_index: usize, input: &str| {
        complete_at(&completion_tree, tokens, param_index, input)
    });
    let validator: Validator = Arc::new(move |args: &[String]| validate_args(&tree, args));
    (completer, validator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SchemaBuilder;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_engines_share_one_tree() {
        let (complete, validate) = schema_engines(
            SchemaBuilder::new()
                .root(["A"])
                .path(["A"], ["x"])
                .build(),
        );

        // Both views observe the same graph.
        assert_eq!(complete(&args(&["cmd", "A"]), 2, ""), vec!["x"]);
        assert!(validate(&args(&["cmd", "A", "x"])).is_ok());
    }

    #[test]
    fn test_either_engine_keeps_tree_alive() {
        let (complete, validate) = schema_engines(SchemaBuilder::new().root(["A"]).build());
        drop(validate);
        assert_eq!(complete(&args(&["cmd"]), 1, ""), vec!["A"]);
    }

    #[test]
    fn test_repeated_calls_yield_identical_results() {
        let (complete, validate) = schema_engines(
            SchemaBuilder::new()
                .root(["A", "B"])
                .path(["A"], ["x", "y"])
                .build(),
        );
        let tokens = args(&["cmd", "A"]);
        assert_eq!(complete(&tokens, 2, ""), complete(&tokens, 2, ""));
        let bad = args(&["cmd", "Q"]);
        assert_eq!(validate(&bad), validate(&bad));
    }
}
