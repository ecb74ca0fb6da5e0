//! Infrastructure layer for external integrations.
//!
//! Implements the repository interfaces defined by the domain layer on top
//! of PostgreSQL.

pub mod persistence;
