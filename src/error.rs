//! Error taxonomy for the simulation core
//!
//! Nothing here is user-visible during play: game over is a normal terminal
//! state, and a missing optional entity simply skips its branch.

use std::fmt;

use crate::sim::EntityId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// An operation needed an entity that is no longer live
    EntityNotFound(EntityId),
    /// Rejected at construction (e.g. non-positive field dimensions)
    InvalidConfiguration(String),
    /// Internal bookkeeping disagrees with the model (duplicate ship, ...)
    InvariantViolation(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntityNotFound(id) => write!(f, "entity not found: {id}"),
            Self::InvalidConfiguration(reason) => write!(f, "invalid configuration: {reason}"),
            Self::InvariantViolation(reason) => write!(f, "invariant violation: {reason}"),
        }
    }
}

impl std::error::Error for SimError {}

pub type SimResult<T> = Result<T, SimError>;
