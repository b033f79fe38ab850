//! Battlezone (workspace facade crate).
//!
//! Re-exports the `battlezone::{core,input,term,types}` public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use battlezone_core as core;
pub use battlezone_input as input;
pub use battlezone_term as term;
pub use battlezone_types as types;
