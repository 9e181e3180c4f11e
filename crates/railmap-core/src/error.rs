use crate::id::ElementId;
use thiserror::Error;

/// Validation failures from graph store mutations.
///
/// These are ordinary values, not panics: a failed mutation leaves the
/// store exactly as it was, and callers are free to ignore the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("element id {0} already exists")]
    DuplicateId(ElementId),
    #[error("line endpoint {0} does not exist")]
    MissingEndpoint(ElementId),
    #[error("line would connect {0} to itself")]
    SelfLoop(ElementId),
    #[error("no element with id {0}")]
    UnknownId(ElementId),
}
