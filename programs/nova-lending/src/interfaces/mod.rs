//! Interfaces for external integrations (price oracle)

pub mod oracle;

pub use oracle::*;
