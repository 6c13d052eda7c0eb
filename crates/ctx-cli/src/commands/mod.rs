//! Command implementations

mod replay;

pub use replay::run_replay;
