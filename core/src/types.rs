//! Schema type definitions for argument tree modeling.
//!
//! This module defines the core data model used to describe the legal
//! argument shapes of a shell command. A [`SchemaNode`] describes one
//! argument position: either a fixed enumeration of literal values or an
//! inclusive numeric range, plus the nodes that follow each literal choice.
//! The types are designed for serialization with [`serde`] and round-trip
//! through JSON.

use serde::{Deserialize, Serialize};

/// Inclusive integer range accepted at a numeric argument position.
///
/// # Examples
///
/// ```
/// use argshell_core::NumericRange;
///
/// let range = NumericRange::new(1, 600);
/// assert!(range.contains(1));
/// assert!(range.contains(600));
/// assert!(!range.contains(601));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    /// Smallest accepted value.
    pub min: i64,
    /// Largest accepted value.
    pub max: i64,
}

impl NumericRange {
    /// Creates an inclusive range.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Checks whether `value` falls inside the range.
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One argument position in a command's schema tree.
///
/// A node is either *enumerated* (`candidates` non-empty, `numeric`
/// ignored) or *numeric* (`candidates` empty, `numeric` set). A node with
/// neither is a bare intermediate created by the builder and accepts
/// nothing until configured. Children are keyed by the literal value chosen
/// at this position and describe the next position; declaration order is
/// preserved because it surfaces in completion results and error listings.
///
/// The root node of a tree represents argument position 1, the first token
/// after the command name.
///
/// # Examples
///
/// ```
/// use argshell_core::SchemaNode;
///
/// let mut root = SchemaNode::enumerated(["start", "stop"]);
/// root.insert_child("start", SchemaNode::enumerated(["fast", "slow"]));
///
/// assert_eq!(root.candidates, vec!["start", "stop"]);
/// assert!(root.child("start").is_some());
/// assert!(root.child("restart").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Legal literal values at this position, in declared order.
    /// Empty means the position is numeric (or a bare intermediate).
    pub candidates: Vec<String>,
    /// Numeric constraint; meaningful only when `candidates` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericRange>,
    /// Next-position nodes keyed by the literal chosen here.
    /// Insertion-ordered; keys are exact strings, no normalization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<(String, SchemaNode)>,
}

impl SchemaNode {
    /// Creates an enumerated node from literal candidates.
    ///
    /// # Examples
    ///
    /// ```
    /// use argshell_core::SchemaNode;
    ///
    /// let node = SchemaNode::enumerated(["on", "off"]);
    /// assert!(node.is_enumerated());
    /// assert!(!node.is_numeric());
    /// ```
    pub fn enumerated<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            numeric: None,
            children: Vec::new(),
        }
    }

    /// Creates a numeric node accepting `min..=max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argshell_core::SchemaNode;
    ///
    /// let node = SchemaNode::numeric(1, 600);
    /// assert!(node.is_numeric());
    /// assert!(node.candidates.is_empty());
    /// ```
    pub fn numeric(min: i64, max: i64) -> Self {
        Self {
            candidates: Vec::new(),
            numeric: Some(NumericRange::new(min, max)),
            children: Vec::new(),
        }
    }

    /// True when this position is a fixed enumeration.
    pub fn is_enumerated(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// True when this position accepts a numeric value.
    ///
    /// An enumerated node is never numeric, even if a stale range is
    /// present; `candidates` wins.
    pub fn is_numeric(&self) -> bool {
        self.candidates.is_empty() && self.numeric.is_some()
    }

    /// Looks up the child for a literal value (exact match).
    pub fn child(&self, key: &str) -> Option<&SchemaNode> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Mutable child lookup.
    pub fn child_mut(&mut self, key: &str) -> Option<&mut SchemaNode> {
        self.children
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Inserts a child, replacing any existing node under the same key.
    ///
    /// Insertion order of distinct keys is preserved.
    pub fn insert_child(&mut self, key: impl Into<String>, node: SchemaNode) {
        let key = key.into();
        match self.child_mut(&key) {
            Some(existing) => *existing = node,
            None => self.children.push((key, node)),
        }
    }

    /// Returns the child under `key`, creating an empty node if absent.
    pub fn child_or_insert(&mut self, key: &str) -> &mut SchemaNode {
        if self.child(key).is_none() {
            self.children.push((key.to_string(), SchemaNode::default()));
        }
        // Present by now, either found or just pushed.
        self.child_mut(key).expect("child just ensured")
    }

    /// Child keys in insertion order.
    pub fn child_keys(&self) -> Vec<&str> {
        self.children.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// True when nothing further is expected after this position.
    pub fn is_leaf(&self) -> bool {
        self.candidates.is_empty() && self.numeric.is_none() && self.children.is_empty()
    }
}
