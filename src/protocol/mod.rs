//! Transport-boundary formats.
//!
//! JSON decoding of player actions, the notification envelopes the engine
//! returns, and the line-oriented command parser for the engine binary.

pub mod envelope;
pub mod parser;
pub mod wire;

pub use envelope::{Content, Envelope, Event, Recipient, Response};
pub use parser::{parse_command, Command};
pub use wire::{parse_action, RawAction, WireError};
