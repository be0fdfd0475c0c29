//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task with ID '{0}' not found.")]
    TaskNotFound(String),

    #[error("Invalid UUID format provided: '{0}'.")]
    InvalidIdentifier(String),

    #[error("Invalid status value provided: '{0}'. Allowed values are: todo, in_progress, done")]
    InvalidStatus(String),

    #[error("{0}")]
    InvalidTransition(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),
}
