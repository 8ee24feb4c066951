// Library root: re-exports all modules so integration tests and the binary
// share the same code paths.

pub mod cli;
pub mod config;
pub mod handler;
pub mod protocol;
pub mod ws_server;
