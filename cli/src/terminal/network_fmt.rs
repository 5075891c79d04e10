use arpsweep_common::network::device::{Device, format_mac};
use arpsweep_common::network::interface::NetworkIdentity;
use colored::*;

use crate::terminal::{colors, print};

pub fn identity_to_key_value_pair(identity: &NetworkIdentity) -> Vec<(String, ColoredString)> {
    let mut pairs: Vec<(String, ColoredString)> = Vec::new();

    let address: ColoredString = identity.local_address.to_string().color(colors::IPV4_ADDR);
    let value: ColoredString = match identity.ipv4_network() {
        Some(net) => {
            let prefix: ColoredString = net.prefix().to_string().color(colors::IPV4_PREFIX);
            format!("{address}/{prefix}").color(colors::SEPARATOR)
        }
        None => address,
    };
    pairs.push(("IPv4".to_string(), value));

    pairs.push((
        "Mask".to_string(),
        identity.netmask.to_string().color(colors::IPV4_PREFIX),
    ));
    pairs.push((
        "MAC".to_string(),
        format_mac(identity.hardware_address).color(colors::MAC_ADDR),
    ));

    let range = identity.subnet_range();
    pairs.push((
        "Probes".to_string(),
        range.len().to_string().color(colors::TEXT_DEFAULT),
    ));
    pairs
}

pub fn device_to_key_value_pair(device: &Device) -> Vec<(String, ColoredString)> {
    vec![
        ("IPv4".to_string(), device.address.color(colors::IPV4_ADDR)),
        ("MAC".to_string(), device.hardware_address.color(colors::MAC_ADDR)),
    ]
}

pub fn print_identity(identity: &NetworkIdentity, q_level: u8) {
    if q_level > 0 {
        return;
    }
    print::tree_head(0, identity.interface_name());
    print::as_tree_one_level(identity_to_key_value_pair(identity));
}

pub fn print_device(device: &Device, idx: usize) {
    print::tree_head(idx, &device.address);
    print::as_tree_one_level(device_to_key_value_pair(device));
}
