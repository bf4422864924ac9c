//! Reference adapters for the terminal's ports.
//!
//! These keep everything in process memory. They back the CLI and the test
//! suite; a deployment plugs its own auth, sales and pricing services into
//! the same ports.

pub mod flash;
pub mod in_memory;
pub mod rates;
pub mod redirect;
