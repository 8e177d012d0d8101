//! One-way export of rendered frames.

/// PNG encoding.
pub mod png;
