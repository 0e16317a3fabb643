//! Blockdrop (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockdrop::{core,input,term,types}` and
//! adds the pieces the terminal binary wires together: configuration, persisted
//! settings, the optional event log and the [`session::Session`] driver.

pub use blockdrop_core as core;
pub use blockdrop_input as input;
pub use blockdrop_term as term;
pub use blockdrop_types as types;

pub mod config;
pub mod event_log;
pub mod session;
pub mod settings;
