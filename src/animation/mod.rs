//! Animated channels and the per-kind timeline programs built from them.

pub mod channel;
pub mod program;
