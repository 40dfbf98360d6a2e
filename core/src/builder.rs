//! Fluent construction of schema trees.
//!
//! [`SchemaBuilder`] materializes a [`SchemaNode`] graph from path-addressed
//! declarations. A path is a concrete trace of literal values through the
//! tree; any intermediate node missing along the way is created with empty
//! candidates. Declarations may arrive in any order, and a later call to the
//! same path overwrites that node's candidate/numeric setting without
//! removing children that were already declared underneath it.

use crate::types::SchemaNode;

/// Builds a [`SchemaNode`] tree from path-addressed declarations.
///
/// # Examples
///
/// ```
/// use argshell_core::SchemaBuilder;
///
/// let tree = SchemaBuilder::new()
///     .root(["device1", "device2", "timeout"])
///     .path(["device1"], ["light", "sound"])
///     .path(["device1", "light"], ["0", "1", "2"])
///     .numeric(["timeout"], 1, 600)
///     .build();
///
/// assert_eq!(tree.candidates, vec!["device1", "device2", "timeout"]);
/// assert!(tree.child("timeout").unwrap().is_numeric());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    root: SchemaNode,
}

impl SchemaBuilder {
    /// Starts an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the legal values for position 1 (the first argument after the
    /// command name).
    pub fn root<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root.candidates = candidates.into_iter().map(Into::into).collect();
        self.root.numeric = None;
        self
    }

    /// Declares the candidates of the node reached by walking `path`.
    ///
    /// Missing intermediates are created with empty candidates; a numeric
    /// range previously set on the reached node is cleared, so a node is
    /// never both enumerated and numeric.
    pub fn path<P, I, S>(mut self, path: P, candidates: I) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let node = walk_or_create(&mut self.root, path);
        node.candidates = candidates.into_iter().map(Into::into).collect();
        node.numeric = None;
        self
    }

    /// Declares the node reached by `path` as numeric with the inclusive
    /// range `min..=max`, clearing any candidates set earlier.
    pub fn numeric<P>(mut self, path: P, min: i64, max: i64) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let node = walk_or_create(&mut self.root, path);
        node.candidates.clear();
        node.numeric = Some(crate::NumericRange::new(min, max));
        self
    }

    /// Finishes construction and returns the immutable tree.
    pub fn build(self) -> SchemaNode {
        self.root
    }
}

fn walk_or_create<P>(root: &mut SchemaNode, path: P) -> &mut SchemaNode
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    let mut current = root;
    for key in path {
        current = current.child_or_insert(key.as_ref());
    }
    current
}
