//! Context-sensitive completion over a schema tree.
//!
//! Given the tokens typed so far and the 1-based position being completed,
//! the walk follows the literal path already typed and prefix-filters the
//! candidates of the node it reaches. Completion is pure: it reads the tree
//! and allocates the result, nothing else.

use crate::types::SchemaNode;

/// Returns the candidates at `param_index` whose text starts with
/// `current_input`, in declared order.
///
/// `tokens` is the full token sequence with the command name at index 0;
/// `param_index` is 1-based. Walking positions `1..param_index-1` follows
/// exact child lookups; if the typed path does not correspond to a valid
/// schema trace, no completions are offered. Numeric nodes have no literal
/// candidates, so free-form numeric positions naturally complete to
/// nothing.
///
/// # Examples
///
/// ```
/// use argshell_core::{SchemaBuilder, complete_at};
///
/// let tree = SchemaBuilder::new()
///     .root(["A", "B"])
///     .path(["A"], ["x", "y"])
///     .build();
///
/// let tokens = vec!["cmd".to_string(), "A".to_string()];
/// assert_eq!(complete_at(&tree, &tokens, 2, ""), vec!["x", "y"]);
/// assert_eq!(complete_at(&tree, &tokens, 2, "x"), vec!["x"]);
/// assert!(complete_at(&tree, &tokens, 0, "").is_empty());
/// ```
pub fn complete_at(
    root: &SchemaNode,
    tokens: &[String],
    param_index: usize,
    current_input: &str,
) -> Vec<String> {
    // Completion is only ever requested at or after the first argument.
    if param_index < 1 {
        return Vec::new();
    }

    let mut current = root;
    for i in 1..param_index {
        let Some(token) = tokens.get(i) else {
            return Vec::new();
        };
        match current.child(token) {
            Some(child) => current = child,
            // The path typed so far is not a valid trace.
            None => return Vec::new(),
        }
    }

    current
        .candidates
        .iter()
        .filter(|candidate| candidate.starts_with(current_input))
        .cloned()
        .collect()
}
