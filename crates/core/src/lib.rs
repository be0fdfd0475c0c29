//! Core library for the task tracker
//!
//! This crate contains the core business logic, including:
//! - Typed task/user identifiers
//! - The task entity and its transition rules
//! - Task storage and the task service

pub mod error;
pub mod id;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
