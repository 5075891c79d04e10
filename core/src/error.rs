use arpsweep_common::error::SetupError;
use arpsweep_protocols::PacketError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("building ARP request: {0}")]
    Frame(#[from] PacketError),
}
