//! medproto-cli
//!
//! Host application for the norm engine: configuration, the command
//! handlers behind the `medproto` binary, and logging setup.

pub mod commands;
pub mod config;
