//! Core types for rezept-termine.
//!
//! This crate holds everything that does not touch the network:
//! - `extract` turns prescription text into `Appointment`s
//! - `config` loads the persisted settings document
//! - `event` and `ics` build calendar events and `.ics` files
//! - `dedup` decides which events still need to be sent to a remote calendar

pub mod appointment;
pub mod config;
pub mod dedup;
pub mod error;
pub mod event;
pub mod extract;
pub mod ics;

pub use appointment::Appointment;
pub use config::Config;
pub use error::{TermineError, TermineResult};
pub use event::{CalendarEvent, EventStatus};
pub use extract::{ScanOutcome, extract, scan};
