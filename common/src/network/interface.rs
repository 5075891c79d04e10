//! Picks the interface to sweep and captures its identity.
//!
//! The first interface that is up, is not loopback and carries an IPv4
//! network wins. There is no ranking beyond enumeration order.

use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;
use tracing::debug;

use crate::error::SetupError;
use crate::network::range::SubnetRange;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Rejection {
    /// The interface is operationally down.
    IsDown,
    /// Loopback never reaches other hosts.
    IsLoopback,
    /// No IPv4 address is assigned.
    NoIpv4,
}

/// Local address, netmask and link-layer address of the selected interface.
///
/// Captured once at startup and never modified.
#[derive(Debug, Clone)]
pub struct NetworkIdentity {
    pub local_address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub hardware_address: MacAddr,
    pub interface: NetworkInterface,
}

impl NetworkIdentity {
    /// Enumerates the host's interfaces and captures the first suitable one.
    pub fn detect() -> Result<Self, SetupError> {
        let interfaces: Vec<NetworkInterface> = pnet::datalink::interfaces();
        debug!("Identified {} network interface(s)", interfaces.len());
        let interface = select_interface(&interfaces)?;
        Self::try_from(interface)
    }

    pub fn interface_name(&self) -> &str {
        &self.interface.name
    }

    pub fn ipv4_network(&self) -> Option<Ipv4Network> {
        Ipv4Network::with_netmask(self.local_address, self.netmask).ok()
    }

    pub fn subnet_range(&self) -> SubnetRange {
        SubnetRange::new(self.local_address, self.netmask)
    }
}

impl TryFrom<&NetworkInterface> for NetworkIdentity {
    type Error = SetupError;

    fn try_from(interface: &NetworkInterface) -> Result<Self, Self::Error> {
        let net: Ipv4Network = first_ipv4_net(interface).ok_or(SetupError::NoSuitableInterface)?;

        let hardware_address: MacAddr = match interface.mac {
            Some(mac) if mac != MacAddr::zero() => mac,
            _ => {
                return Err(SetupError::NoHardwareAddress {
                    interface: interface.name.clone(),
                });
            }
        };

        Ok(Self {
            local_address: net.ip(),
            netmask: net.mask(),
            hardware_address,
            interface: interface.clone(),
        })
    }
}

/// Returns the first interface that passes [`check_candidate`].
pub fn select_interface(interfaces: &[NetworkInterface]) -> Result<&NetworkInterface, SetupError> {
    interfaces
        .iter()
        .find(|interface| match check_candidate(interface) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Skipping {}: {:?}", interface.name, reason);
                false
            }
        })
        .ok_or(SetupError::NoSuitableInterface)
}

fn check_candidate(interface: &NetworkInterface) -> Result<(), Rejection> {
    if !interface.is_up() {
        return Err(Rejection::IsDown);
    }
    if interface.is_loopback() {
        return Err(Rejection::IsLoopback);
    }
    if first_ipv4_net(interface).is_none() {
        return Err(Rejection::NoIpv4);
    }
    Ok(())
}

fn first_ipv4_net(interface: &NetworkInterface) -> Option<Ipv4Network> {
    interface.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) => Some(*v4),
        IpNetwork::V6(_) => None,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
