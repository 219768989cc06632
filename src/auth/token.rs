//! Session token values and the generators that mint them.

pub mod generator;
pub mod secret;
