use crate::conic::definition::{Kind, ParentType};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConicError {
    #[error("Unrecognized {kind} parents {parents:?}; accepted: {accepted:?}")]
    UnrecognizedParents {
        kind: Kind,
        parents: Vec<ParentType>,
        accepted: Vec<&'static str>,
    },

    #[error("Expected at least 2 samples, got {0}")]
    InvalidSampleCount(usize),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}
