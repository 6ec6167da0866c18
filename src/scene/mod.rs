//! What gets drawn: live entities, their registry and the static backdrop.

pub mod backdrop;
pub mod entity;
pub mod registry;
