// Public library interface for pledgemap-rs
// This allows the debug CLI tool to use the core modules

pub mod app;
pub mod cli;
pub mod error;
pub mod layout;
pub mod render;
pub mod source;
pub mod tree;
pub mod ui;
