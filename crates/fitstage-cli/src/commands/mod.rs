//! CLI command handlers

pub mod train;

pub use train::run_train;
