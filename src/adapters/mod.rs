//! Adapter implementations for port traits.
//!
//! - `fs` — Local filesystem reads and atomic writes
//! - `memory` — In-memory storage for deterministic tests and embedding

pub mod fs;
pub mod memory;
