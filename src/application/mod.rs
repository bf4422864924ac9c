//! Application layer: the kiosk terminal flow.
//!
//! `PosTerminal` receives one request at a time, resolves who is standing at
//! the kiosk through a request-scoped `RequestContext`, forwards the step's
//! input to the domain ports and returns the variables the page template
//! renders.

pub mod action;
pub mod context;
pub mod page;
pub mod request;
pub mod terminal;
