//! Library crate root for the report-to-spreadsheet pusher.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod config;
pub mod report;
pub mod runtime;
pub mod sheets;
pub mod source;
