//! Error types for the algoviz crate

use thiserror::Error;

/// Main error type for the algoviz crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("node '{node}' is not declared{context}")]
    UnknownNode { node: String, context: String },

    #[error("node '{node}' is declared more than once")]
    DuplicateNode { node: String },

    #[error("edge {from} -> {to} has invalid cost {cost} (must be non-negative and finite)")]
    InvalidCost { from: String, to: String, cost: f64 },

    #[error("heuristic for '{node}' is {value} (must be non-negative and finite)")]
    InvalidHeuristic { node: String, value: f64 },

    #[error("game tree has no root node (a node whose parent is 'null')")]
    MissingRoot,

    #[error("game tree has more than one root: {roots}")]
    MultipleRoots { roots: String },

    #[error("game tree node '{node}' is not reachable from root '{root}'")]
    UnreachableNode { node: String, root: String },

    #[error("node '{node}' has kind '{kind}' (expected MAX, MIN or a numeric leaf value)")]
    InvalidNodeKind { node: String, kind: String },

    #[error("leaf '{node}' cannot have children")]
    LeafWithChildren { node: String },

    #[error("{kind} node '{node}' has no children")]
    ChildlessInternalNode { node: String, kind: String },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("row {row} has {got} values but the header declares {expected} columns")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("header needs at least one feature column and a class column, got {columns} column(s)")]
    InvalidHeader { columns: usize },

    #[error("feature '{feature}' is not part of the training data")]
    UnknownFeature { feature: String },

    #[error("need at least {required} data points, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("k = {k} is invalid for {points} point(s)")]
    InvalidClusterCount { k: usize, points: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("all x values are equal; the regression slope is undefined")]
    ZeroVariance,

    #[error("every class scored zero; probabilities cannot be normalized")]
    DegenerateScores,

    #[error("entity '{entity}' does not exist in the knowledge base")]
    UnknownEntity { entity: String },

    #[error("knowledge base needs at least one {what}")]
    EmptyKnowledgeBase { what: String },

    #[error("line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    #[error("'{input}' is not a number")]
    InvalidNumber { input: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Unknown node error naming where the reference came from.
    pub(crate) fn unknown_node_in(node: impl Into<String>, context: impl AsRef<str>) -> Self {
        Error::UnknownNode {
            node: node.into(),
            context: format!(" ({})", context.as_ref()),
        }
    }

    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Error::MalformedLine {
            line,
            message: message.into(),
        }
    }
}
