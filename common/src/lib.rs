//! Shared types for arpsweep: the local network identity, the subnet range
//! it implies, discovered devices and the setup errors that end a run.

pub mod config;
pub mod error;
pub mod network;
