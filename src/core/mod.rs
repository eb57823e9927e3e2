//! Core module for Menugate
//!
//! Configuration and error types shared by the gate, the menu renderers
//! and the CLI.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{GateError, GateResult};
