//! Dashboard state types.
//!
//! - `refresh_state`: the polled snapshot, loading flag and last fetch failure.
//! - `selection`: which symbol the detail panel follows.
pub mod refresh_state;
pub mod selection;
