//! Event and message types exchanged between the physics core and game code.
//!
//! Submodules:
//! - [`contact`] – contact records emitted by the target-position solver
pub mod contact;
