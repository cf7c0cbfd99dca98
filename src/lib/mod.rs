//! Shared library modules providing error types, environment capture, and telemetry initialization.

pub mod env;
pub mod errors;
pub mod fs;
pub mod telemetry;
