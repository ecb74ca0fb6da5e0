//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Short code generation and format checks
//! - [`url_validator`] - Destination URL validation
//! - [`client_info`] - Client IP and header extraction

pub mod client_info;
pub mod code_generator;
pub mod url_validator;
