//! Tree-structured argument schemas for embeddable shells.
//!
//! This crate defines the shared data structure and the two engines that
//! read it:
//!
//! - [`SchemaNode`] — a recursive node graph describing, at each argument
//!   position, which literal values or numeric range are legal and what
//!   follows each literal choice.
//! - [`SchemaBuilder`] — fluent, path-addressed construction of a tree.
//! - [`complete_at`] — context-sensitive completion: the candidates at a
//!   position, conditioned on the literal path already typed.
//! - [`validate_args`] — left-to-right validation producing positional
//!   [`ArgError`] values for the first violation found.
//! - [`schema_engines`] — wraps a finished tree in an [`Arc`]-sharing
//!   completer/validator closure pair for registration with a shell.
//!
//! One tree drives both completion and validation; it is immutable after
//! construction and safely shared without locking.
//!
//! # Example
//!
//! ```
//! use argshell_core::*;
//!
//! let tree = SchemaBuilder::new()
//!     .root(["device1", "device2", "timeout"])
//!     .path(["device1"], ["light", "sound"])
//!     .path(["device1", "light"], ["0", "1", "2"])
//!     .numeric(["timeout"], 1, 600)
//!     .build();
//!
//! let tokens: Vec<String> = ["set", "device1"].iter().map(|s| s.to_string()).collect();
//! assert_eq!(complete_at(&tree, &tokens, 2, ""), vec!["light", "sound"]);
//!
//! let args: Vec<String> = ["set", "device1", "light", "2"]
//!     .iter().map(|s| s.to_string()).collect();
//! assert!(validate_args(&tree, &args).is_ok());
//! ```
//!
//! [`Arc`]: std::sync::Arc

mod builder;
mod complete;
mod engines;
mod types;
mod validate;

pub use builder::SchemaBuilder;
pub use complete::complete_at;
pub use engines::{Completer, Validator, schema_engines};
pub use types::{NumericRange, SchemaNode};
pub use validate::{ArgError, validate_args};
