#![cfg(test)]
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::net::Ipv4Addr;
use std::time::Duration;

use arpsweep_common::network::interface::NetworkIdentity;
use arpsweep_core::network::channel::LinkChannel;
use arpsweep_protocols::arp;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;
use pnet::packet::arp::ArpPacket;
use pnet::packet::ethernet::EthernetPacket;
use pnet::packet::Packet;
use pnet::util::MacAddr;

pub const OWN_MAC: MacAddr = MacAddr(0x02, 0x00, 0x5e, 0x10, 0x00, 0x0a);

pub fn ni(name: &str, mac: Option<MacAddr>, ips: &[&str], flags: u32) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index: 2,
        mac,
        ips: ips.iter().map(|s| s.parse::<IpNetwork>().unwrap()).collect(),
        flags,
    }
}

pub fn identity(cidr: &str) -> NetworkIdentity {
    NetworkIdentity::try_from(&ni("eth0", Some(OWN_MAC), &[cidr], 1)).unwrap()
}

/// A broadcast segment with a handful of hosts that answer ARP requests.
///
/// Replies are queued and read back one per `recv`, like frames piling up
/// on a real socket. Hosts marked slow answer only after the next request
/// has gone out.
pub struct SimulatedLan {
    requester: (Ipv4Addr, MacAddr),
    hosts: BTreeMap<Ipv4Addr, MacAddr>,
    slow: BTreeSet<Ipv4Addr>,
    broken_sends: BTreeSet<Ipv4Addr>,
    queue: VecDeque<Vec<u8>>,
    late: Option<Vec<u8>>,
    pub sent: Vec<Vec<u8>>,
}

impl SimulatedLan {
    pub fn new(identity: &NetworkIdentity) -> Self {
        Self {
            requester: (identity.local_address, identity.hardware_address),
            hosts: BTreeMap::new(),
            slow: BTreeSet::new(),
            broken_sends: BTreeSet::new(),
            queue: VecDeque::new(),
            late: None,
            sent: Vec::new(),
        }
    }

    pub fn with_host(mut self, addr: [u8; 4], mac: MacAddr) -> Self {
        self.hosts.insert(Ipv4Addr::from(addr), mac);
        self
    }

    pub fn with_slow_host(mut self, addr: [u8; 4], mac: MacAddr) -> Self {
        self.slow.insert(Ipv4Addr::from(addr));
        self.with_host(addr, mac)
    }

    pub fn with_broken_send(mut self, addr: [u8; 4]) -> Self {
        self.broken_sends.insert(Ipv4Addr::from(addr));
        self
    }

    /// Targets of every request that made it onto the wire, in order.
    pub fn probed(&self) -> Vec<Ipv4Addr> {
        self.sent
            .iter()
            .filter_map(|frame| {
                let eth = EthernetPacket::new(frame)?;
                let arp = ArpPacket::new(eth.payload())?;
                Some(arp.get_target_proto_addr())
            })
            .collect()
    }
}

impl LinkChannel for SimulatedLan {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        let target: Ipv4Addr = EthernetPacket::new(frame)
            .and_then(|eth| ArpPacket::new(eth.payload()).map(|arp| arp.get_target_proto_addr()))
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "not an ARP frame"))?;

        if self.broken_sends.contains(&target) {
            return Err(io::Error::other("transmit queue full"));
        }
        self.sent.push(frame.to_vec());

        if let Some(stale) = self.late.take() {
            self.queue.push_back(stale);
        }

        if let Some(mac) = self.hosts.get(&target) {
            let (requester_addr, requester_mac) = self.requester;
            let reply = arp::build_reply(target, *mac, requester_addr, requester_mac)
                .map_err(io::Error::other)?;
            if self.slow.contains(&target) {
                self.late = Some(reply);
            } else {
                self.queue.push_back(reply);
            }
        }
        Ok(())
    }

    fn recv(&mut self, _timeout: Duration) -> io::Result<Option<Vec<u8>>> {
        Ok(self.queue.pop_front())
    }
}
