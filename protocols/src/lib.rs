//! Frame layouts spoken on the wire: an Ethernet header carrying one ARP
//! message, built and inspected through pnet's packet views.

use thiserror::Error;

pub mod arp;
pub mod ethernet;

pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;
/// Ethernet header plus ARP message, no padding.
pub const ARP_FRAME_LEN: usize = ETH_HDR_LEN + ARP_LEN;
/// Minimum Ethernet frame without FCS. Replies are read up to this size.
pub const MAX_REPLY_LEN: usize = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    #[error("buffer too small for an ethernet header")]
    EthernetBuffer,
    #[error("buffer too small for an ARP message")]
    ArpBuffer,
}
