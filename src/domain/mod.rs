//! Domain layer: kiosk entities, display rules and the ports the terminal
//! talks to.

pub mod amount;
pub mod ports;
pub mod sale;
pub mod slide;
pub mod user;
pub mod wallet;
