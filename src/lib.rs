//! orange console - submit SQL batches to an orange query server.
//!
//! This library exposes the core modules for use by the binary and
//! integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod output;
pub mod router;
pub mod session;
pub mod state;
