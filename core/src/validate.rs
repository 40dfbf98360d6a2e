//! Argument validation over a schema tree.
//!
//! The walk consumes one argument per tree level, left to right, and stops
//! at the first violation. Errors are data, not control flow: they carry
//! the 1-based position and the expected values so the shell can print a
//! positional message and return to the prompt.
//!
//! # Examples
//!
//! ```
//! use argshell_core::{SchemaBuilder, validate_args, ArgError};
//!
//! let tree = SchemaBuilder::new()
//!     .root(["A", "B"])
//!     .path(["A"], ["x", "y"])
//!     .build();
//!
//! let ok: Vec<String> = ["cmd", "A", "x"].iter().map(|s| s.to_string()).collect();
//! assert!(validate_args(&tree, &ok).is_ok());
//!
//! let bad: Vec<String> = ["cmd", "A", "z"].iter().map(|s| s.to_string()).collect();
//! assert!(matches!(
//!     validate_args(&tree, &bad),
//!     Err(ArgError::InvalidValue { position: 2, .. })
//! ));
//! ```

use thiserror::Error;

use crate::types::SchemaNode;

/// Argument validation errors.
///
/// The `Display` impl is the user-facing message printed at the prompt.
/// Positions are 1-based and exclude the command name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// Nothing beyond the command name was supplied.
    #[error("missing arguments")]
    MissingArguments,
    /// A numeric position received text that does not parse as a base-10
    /// integer (empty, non-numeric, trailing garbage, or overflow).
    #[error("invalid number '{value}' at position {position}")]
    InvalidNumber { value: String, position: usize },
    /// A numeric position parsed but fell outside the declared range.
    #[error("number out of range at position {position}: expected {min} to {max}")]
    OutOfRange { position: usize, min: i64, max: i64 },
    /// An enumerated position received a value not in its candidate list.
    #[error("invalid value '{value}' at position {position}: valid values: {expected}")]
    InvalidValue {
        value: String,
        position: usize,
        expected: String,
    },
    /// Arguments continued past a terminal value.
    #[error("too many arguments after '{after}'")]
    TooManyArguments { after: String },
    /// Arguments ran out while the schema still expected more.
    #[error("missing argument: expected one of {expected}")]
    MissingArgument { expected: String },
}

/// Validates `args` (command name at index 0) against the tree.
///
/// Consumption starts at argument index 1 and descends one tree level per
/// argument. Enumerated positions require exact membership; numeric
/// positions require an in-range base-10 integer and are always terminal.
/// Validation succeeds when the walk ends on a terminal value; ending early
/// on a node that still expects input is a missing-argument error listing
/// the expected values in declared order.
pub fn validate_args(root: &SchemaNode, args: &[String]) -> Result<(), ArgError> {
    if args.len() < 2 {
        return Err(ArgError::MissingArguments);
    }

    let mut current = root;
    for (i, value) in args.iter().enumerate().skip(1) {
        let value = value.as_str();
        let last = i == args.len() - 1;

        if current.is_enumerated() {
            if !current.candidates.iter().any(|c| c == value) {
                return Err(ArgError::InvalidValue {
                    value: value.to_string(),
                    position: i,
                    expected: current.candidates.join(", "),
                });
            }
            match current.child(value) {
                Some(child) => current = child,
                // Matched a candidate with no continuation: terminal.
                None => return finish_terminal(value, last),
            }
        } else if let Some(range) = current.numeric {
            let parsed: i64 = value.parse().map_err(|_| ArgError::InvalidNumber {
                value: value.to_string(),
                position: i,
            })?;
            if !range.contains(parsed) {
                return Err(ArgError::OutOfRange {
                    position: i,
                    min: range.min,
                    max: range.max,
                });
            }
            // Numeric positions are always terminal; numeric-keyed children
            // are never descended into.
            return finish_terminal(value, last);
        } else {
            // Bare intermediate: an exact child key branches, any other
            // value is accepted as terminal.
            match current.child(value) {
                Some(child) => current = child,
                None => return finish_terminal(value, last),
            }
        }
    }

    // Arguments exhausted while the walk sat on a node that still
    // describes a position.
    if current.is_enumerated() {
        Err(ArgError::MissingArgument {
            expected: current.candidates.join(", "),
        })
    } else if !current.children.is_empty() {
        Err(ArgError::MissingArgument {
            expected: current.child_keys().join(", "),
        })
    } else {
        Ok(())
    }
}

fn finish_terminal(value: &str, last: bool) -> Result<(), ArgError> {
    if last {
        Ok(())
    } else {
        Err(ArgError::TooManyArguments {
            after: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SchemaBuilder;

    fn letters() -> SchemaNode {
        SchemaBuilder::new()
            .root(["A", "B"])
            .path(["A"], ["x", "y"])
            .build()
    }

    fn timeout() -> SchemaNode {
        SchemaBuilder::new()
            .root(["timeout"])
            .numeric(["timeout"], 1, 600)
            .build()
    }

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_trace_succeeds() {
        assert!(validate_args(&letters(), &args(&["cmd", "A", "x"])).is_ok());
    }

    #[test]
    fn test_command_name_alone_is_missing_arguments() {
        assert_eq!(
            validate_args(&letters(), &args(&["cmd"])),
            Err(ArgError::MissingArguments)
        );
    }

    #[test]
    fn test_invalid_value_names_position_and_candidates() {
        let err = validate_args(&letters(), &args(&["cmd", "A", "z"])).unwrap_err();
        assert_eq!(
            err,
            ArgError::InvalidValue {
                value: "z".into(),
                position: 2,
                expected: "x, y".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid value 'z' at position 2: valid values: x, y"
        );
    }

    #[test]
    fn test_invalid_first_value_names_position_one() {
        let err = validate_args(&letters(), &args(&["cmd", "C"])).unwrap_err();
        assert!(matches!(err, ArgError::InvalidValue { position: 1, .. }));
    }

    #[test]
    fn test_missing_argument_lists_expected_values() {
        let err = validate_args(&letters(), &args(&["cmd", "A"])).unwrap_err();
        assert_eq!(
            err,
            ArgError::MissingArgument {
                expected: "x, y".into(),
            }
        );
    }

    #[test]
    fn test_numeric_in_range_succeeds() {
        assert!(validate_args(&timeout(), &args(&["cmd", "timeout", "300"])).is_ok());
        assert!(validate_args(&timeout(), &args(&["cmd", "timeout", "1"])).is_ok());
        assert!(validate_args(&timeout(), &args(&["cmd", "timeout", "600"])).is_ok());
    }

    #[test]
    fn test_numeric_out_of_range_names_bounds() {
        for bad in ["0", "601", "-5"] {
            let err = validate_args(&timeout(), &args(&["cmd", "timeout", bad])).unwrap_err();
            assert_eq!(
                err,
                ArgError::OutOfRange {
                    position: 2,
                    min: 1,
                    max: 600,
                }
            );
        }
    }

    #[test]
    fn test_numeric_parse_failures() {
        for bad in ["abc", "", "12x", "1.5", "99999999999999999999999999"] {
            let err = validate_args(&timeout(), &args(&["cmd", "timeout", bad])).unwrap_err();
            assert_eq!(
                err,
                ArgError::InvalidNumber {
                    value: bad.into(),
                    position: 2,
                }
            );
        }
    }

    #[test]
    fn test_trailing_args_after_enumerated_leaf() {
        let err = validate_args(&letters(), &args(&["cmd", "A", "x", "extra"])).unwrap_err();
        assert_eq!(
            err,
            ArgError::TooManyArguments { after: "x".into() }
        );
    }

    #[test]
    fn test_trailing_args_after_numeric_leaf() {
        let err =
            validate_args(&timeout(), &args(&["cmd", "timeout", "300", "extra"])).unwrap_err();
        assert_eq!(
            err,
            ArgError::TooManyArguments {
                after: "300".into()
            }
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Both position 1 and position 2 are wrong; only position 1 reports.
        let err = validate_args(&letters(), &args(&["cmd", "C", "z"])).unwrap_err();
        assert!(matches!(err, ArgError::InvalidValue { position: 1, .. }));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let tree = letters();
        let a = args(&["cmd", "A", "z"]);
        assert_eq!(validate_args(&tree, &a), validate_args(&tree, &a));
    }

    #[test]
    fn test_signed_values_parse_at_numeric_positions() {
        let tree = SchemaBuilder::new()
            .root(["offset"])
            .numeric(["offset"], -10, 10)
            .build();
        assert!(validate_args(&tree, &args(&["cmd", "offset", "-3"])).is_ok());
    }
}
