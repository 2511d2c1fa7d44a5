//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Capability registry misconfigured: {0}")]
    RegistryMismatch(String),
}
