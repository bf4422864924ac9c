//! Script input and response output for the `pos-terminal` binary.

pub mod csv;
pub mod json;
