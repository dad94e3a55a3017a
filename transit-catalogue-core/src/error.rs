use thiserror::Error;

/// Contract violations of the load and configuration phase.
///
/// Structural absence (unknown bus or stop in a query, no route between two
/// known stops) is reported as `None` by the query methods, never through
/// this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("stop `{0}` is already registered")]
    DuplicateStop(String),
    #[error("bus `{0}` is already registered")]
    DuplicateBus(String),
    #[error("unknown stop: `{0}`")]
    UnknownStop(String),
    #[error("stop id {0} is out of range")]
    UnknownStopId(usize),
    #[error("entity name must not be empty")]
    EmptyName,
    #[error("invalid routing settings: {0}")]
    InvalidSettings(String),
}
