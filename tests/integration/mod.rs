//! Integration test modules.

mod cli_test;
mod exec_test;
