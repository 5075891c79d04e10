//! The ARP probe engine: a raw link-layer channel, the sequential
//! send/wait/match loop, and the glue that runs one sweep.

pub mod discovery;
pub mod error;
pub mod network;
pub mod scanner;
