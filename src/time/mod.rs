//! Time base and timer facility.

pub mod clock;
pub mod timer;
