use std::error::Error as StdError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// StructTypeError
///
/// Construction and lookup failures for struct type descriptors.
/// All variants are local, synchronous, and non-retryable.
///

#[derive(Debug, Eq, ThisError, PartialEq)]
pub enum StructTypeError {
    #[error("field type count {types} does not match field name count {names}")]
    FieldCountMismatch { names: usize, types: usize },

    #[error("field name not found: {name}")]
    NoSuchField { name: String },
}

/// Boxed failure raised by one work unit on one node.
pub type ExecutionCause = Box<dyn StdError + Send + Sync>;

///
/// ExecutionError
///
/// Aggregates failures raised during distributed execution of
/// user-supplied work units across nodes. Causes are re-exposed in the
/// order they were added. Single-writer-then-freeze by convention.
///

#[derive(Debug, Default)]
pub struct ExecutionError {
    message: Option<String>,
    root_cause: Option<ExecutionCause>,
    causes: Vec<ExecutionCause>,
}

impl ExecutionError {
    /// Construct with a message and no root cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            root_cause: None,
            causes: Vec::new(),
        }
    }

    /// Construct from a root cause; the message is derived from it.
    #[must_use]
    pub fn from_cause(cause: impl Into<ExecutionCause>) -> Self {
        let cause = cause.into();

        Self {
            message: Some(cause.to_string()),
            root_cause: Some(cause),
            causes: Vec::new(),
        }
    }

    /// Construct with an explicit message and a root cause.
    #[must_use]
    pub fn with_cause(message: impl Into<String>, cause: impl Into<ExecutionCause>) -> Self {
        Self {
            message: Some(message.into()),
            root_cause: Some(cause.into()),
            causes: Vec::new(),
        }
    }

    /// Append one per-node failure.
    pub fn add_cause(&mut self, cause: impl Into<ExecutionCause>) {
        self.causes.push(cause.into());
    }

    /// Append per-node failures in iteration order.
    pub fn add_causes<I>(&mut self, causes: I)
    where
        I: IntoIterator,
        I::Item: Into<ExecutionCause>,
    {
        for cause in causes {
            self.causes.push(cause.into());
        }
    }

    /// Per-node failures, in the order they were added.
    #[must_use]
    pub fn causes(&self) -> &[ExecutionCause] {
        &self.causes
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => f.write_str("execution failed"),
        }
    }
}

impl StdError for ExecutionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.root_cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn StdError + 'static))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{ExecutionError, StructTypeError};
    use std::error::Error as StdError;

    fn io_err(msg: &str) -> std::io::Error {
        std::io::Error::other(msg.to_string())
    }

    #[test]
    fn struct_type_errors_render_stable_messages() {
        let err = StructTypeError::FieldCountMismatch { names: 2, types: 3 };
        assert_eq!(
            err.to_string(),
            "field type count 3 does not match field name count 2"
        );

        let err = StructTypeError::NoSuchField {
            name: "z".to_string(),
        };
        assert_eq!(err.to_string(), "field name not found: z");
    }

    #[test]
    fn execution_error_preserves_cause_order() {
        let mut err = ExecutionError::new("3 nodes failed");
        err.add_cause(io_err("node-a down"));
        err.add_causes(vec![io_err("node-b down"), io_err("node-c down")]);

        let rendered: Vec<String> = err.causes().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["node-a down", "node-b down", "node-c down"]);
    }

    #[test]
    fn execution_error_wires_the_root_cause_as_source() {
        let err = ExecutionError::from_cause(io_err("projection blew up"));
        assert_eq!(err.to_string(), "projection blew up");

        let source = err.source().expect("root cause should be the source");
        assert_eq!(source.to_string(), "projection blew up");

        let err = ExecutionError::new("no root cause");
        assert!(err.source().is_none());
        assert!(err.causes().is_empty());
    }

    #[test]
    fn execution_error_with_cause_keeps_its_own_message() {
        let err = ExecutionError::with_cause("wrapper", io_err("inner"));
        assert_eq!(err.to_string(), "wrapper");
        assert_eq!(
            err.source().expect("source should be set").to_string(),
            "inner"
        );
    }
}
