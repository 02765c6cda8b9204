//! `floorcraft-cli` — the terminal front end for the order ledgers.
//!
//! The core never parses raw console input: [`io::UserIo`] supplies
//! already-validated dates, numbers and constrained strings, and the
//! [`controller`] drives the menu loop against the order service.

pub mod controller;
pub mod io;
pub mod telemetry;
pub mod view;

pub use controller::Controller;
pub use io::{ConsoleIo, UserIo};
