use std::io;

use thiserror::Error;

/// Fatal errors raised before or while acquiring network state.
///
/// Any of these ends the run with a non-zero exit status and no output.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no suitable interface found")]
    NoSuitableInterface,

    #[error("could not read the hardware address of {interface}")]
    NoHardwareAddress { interface: String },

    #[error("opening raw channel on {interface}")]
    ChannelOpen {
        interface: String,
        #[source]
        source: io::Error,
    },

    #[error("non-ethernet channel for {interface}")]
    UnsupportedChannel { interface: String },
}
