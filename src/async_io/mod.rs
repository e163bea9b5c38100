//! Async loading of the market and geo sources
//! Runs the blocking delimited reads on tokio's blocking pool

pub mod loader;

pub use loader::*;
