//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check_index;
pub mod demo;
pub mod select;
