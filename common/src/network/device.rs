use std::net::Ipv4Addr;

use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};

/// Upper bound on recorded devices per sweep.
pub const MAX_DEVICES: usize = 256;

/// A host that answered an ARP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Dotted-decimal IPv4 address.
    #[serde(rename = "ip")]
    pub address: String,
    /// Lowercase, colon separated hardware address.
    #[serde(rename = "mac")]
    pub hardware_address: String,
}

impl Device {
    pub fn new(address: Ipv4Addr, hardware_address: MacAddr) -> Self {
        Self {
            address: address.to_string(),
            hardware_address: format_mac(hardware_address),
        }
    }
}

/// `aa:bb:cc:dd:ee:ff`, always two digits per octet.
pub fn format_mac(mac: MacAddr) -> String {
    let MacAddr(a, b, c, d, e, f) = mac;
    format!("{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{f:02x}")
}

/// Discovered devices in scan order, capped at a fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceList {
    devices: Vec<Device>,
    cap: usize,
}

impl DeviceList {
    pub fn new() -> Self {
        Self::with_cap(MAX_DEVICES)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            devices: Vec::new(),
            cap,
        }
    }

    /// Appends `device` unless the cap is reached. Returns whether it was kept.
    pub fn push(&mut self, device: Device) -> bool {
        if self.is_full() {
            return false;
        }
        self.devices.push(device);
        true
    }

    pub fn is_full(&self) -> bool {
        self.devices.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn as_slice(&self) -> &[Device] {
        &self.devices
    }

    pub fn into_vec(self) -> Vec<Device> {
        self.devices
    }
}

impl Default for DeviceList {
    fn default() -> Self {
        Self::new()
    }
}
