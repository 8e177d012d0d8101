//! Pointer and keyboard interaction: hit-testing and drag/resize proposals.

/// Hit-test and gesture state machine.
pub mod controller;
/// Client-to-canvas pointer mapping and arrow keys.
pub mod pointer;
