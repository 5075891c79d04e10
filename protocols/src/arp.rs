//! ARP request template and reply matching.
//!
//! Byte layout of the 42-byte frame:
//!
//! | offset | len | field                        |
//! |--------|-----|------------------------------|
//! | 0      | 6   | ethernet destination         |
//! | 6      | 6   | ethernet source              |
//! | 12     | 2   | ethertype (0x0806)           |
//! | 14     | 2   | hardware type                |
//! | 16     | 2   | protocol type                |
//! | 18     | 1   | hardware length              |
//! | 19     | 1   | protocol length              |
//! | 20     | 2   | operation                    |
//! | 22     | 6   | sender hardware address      |
//! | 28     | 4   | sender protocol address      |
//! | 32     | 6   | target hardware address      |
//! | 38     | 4   | target protocol address      |

use std::net::Ipv4Addr;

use arpsweep_common::network::interface::NetworkIdentity;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::EtherTypes;
use pnet::util::MacAddr;

use crate::{ARP_FRAME_LEN, ARP_LEN, ETH_HDR_LEN, PacketError, ethernet};

const TARGET_PROTO_ADDR: usize = ETH_HDR_LEN + 24;

/// A reusable broadcast ARP request. Only the target protocol address
/// changes between probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpFrameTemplate {
    buffer: [u8; ARP_FRAME_LEN],
}

impl ArpFrameTemplate {
    pub fn new(identity: &NetworkIdentity) -> Result<Self, PacketError> {
        Self::from_parts(identity.hardware_address, identity.local_address)
    }

    pub fn from_parts(src_mac: MacAddr, src_addr: Ipv4Addr) -> Result<Self, PacketError> {
        let mut buffer = [0u8; ARP_FRAME_LEN];
        ethernet::make_header(&mut buffer, src_mac, MacAddr::broadcast(), EtherTypes::Arp)?;
        request_payload(&mut buffer, src_mac, src_addr, Ipv4Addr::UNSPECIFIED)?;
        Ok(Self { buffer })
    }

    /// Rewrites the target protocol address in network byte order.
    pub fn set_target(&mut self, target: Ipv4Addr) {
        self.buffer[TARGET_PROTO_ADDR..TARGET_PROTO_ADDR + 4].copy_from_slice(&target.octets());
    }

    pub fn target(&self) -> Ipv4Addr {
        let mut octets = [0u8; 4];
        octets.copy_from_slice(&self.buffer[TARGET_PROTO_ADDR..TARGET_PROTO_ADDR + 4]);
        Ipv4Addr::from(octets)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }
}

fn request_payload(
    buffer: &mut [u8],
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    target_addr: Ipv4Addr,
) -> Result<(), PacketError> {
    if ETH_HDR_LEN + ARP_LEN > buffer.len() {
        return Err(PacketError::ArpBuffer);
    }
    let mut arp = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .ok_or(PacketError::ArpBuffer)?;
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Request);
    arp.set_sender_hw_addr(src_mac);
    arp.set_sender_proto_addr(src_addr);
    arp.set_target_hw_addr(MacAddr::zero());
    arp.set_target_proto_addr(target_addr);
    Ok(())
}

/// Sender fields of an accepted reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpReply {
    pub sender_addr: Ipv4Addr,
    pub sender_mac: MacAddr,
}

/// Accepts `frame` only if it is at least 42 bytes, carries an ARP REPLY,
/// and its sender protocol address is exactly `target`.
pub fn match_reply(frame: &[u8], target: Ipv4Addr) -> Option<ArpReply> {
    if frame.len() < ARP_FRAME_LEN {
        return None;
    }
    let arp = ArpPacket::new(&frame[ETH_HDR_LEN..])?;
    if arp.get_operation() != ArpOperations::Reply {
        return None;
    }
    let sender_addr: Ipv4Addr = arp.get_sender_proto_addr();
    if sender_addr != target {
        return None;
    }
    Some(ArpReply {
        sender_addr,
        sender_mac: arp.get_sender_hw_addr(),
    })
}

/// Builds the reply a host at `addr` would send to `requester`. Used by
/// simulated responders.
pub fn build_reply(
    addr: Ipv4Addr,
    mac: MacAddr,
    requester_addr: Ipv4Addr,
    requester_mac: MacAddr,
) -> Result<Vec<u8>, PacketError> {
    let mut buffer = vec![0u8; ARP_FRAME_LEN];
    ethernet::make_header(&mut buffer, mac, requester_mac, EtherTypes::Arp)?;
    let mut arp = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..]).ok_or(PacketError::ArpBuffer)?;
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Reply);
    arp.set_sender_hw_addr(mac);
    arp.set_sender_proto_addr(addr);
    arp.set_target_hw_addr(requester_mac);
    arp.set_target_proto_addr(requester_addr);
    Ok(buffer)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
