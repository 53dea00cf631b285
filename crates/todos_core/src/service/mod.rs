//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and reminder calls into use-case level APIs.
//! - Keep UI layers decoupled from persistence and notification details.

pub mod todo_service;
