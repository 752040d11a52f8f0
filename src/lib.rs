//! Orbital rules engine library.
//!
//! Exposes the board representation, the action resolver, the economy
//! calculator, move generation, and the protocol modules for use by the
//! binaries, integration tests, and benchmarks.

pub mod board;
pub mod config;
pub mod economy;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
