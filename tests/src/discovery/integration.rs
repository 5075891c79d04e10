#![cfg(test)]
use std::cell::Cell;
use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::Result;
use arpsweep_common::error::SetupError;
use arpsweep_common::network::device::Device;
use arpsweep_common::network::interface::{NetworkIdentity, select_interface};
use arpsweep_core::discovery::sweep;
use arpsweep_core::error::DiscoveryError;
use arpsweep_core::scanner::{ArpScanner, ProbeOutcome};
use pnet::util::MacAddr;

use crate::utils::{OWN_MAC, SimulatedLan, identity, ni};

const PEER_MAC: MacAddr = MacAddr(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);

/// Sweeps `id` on `lan`, leaving it inspectable afterwards.
fn run(id: &NetworkIdentity, lan: &mut SimulatedLan) -> Result<Vec<Device>, DiscoveryError> {
    sweep(id, move |_| Ok(lan), None)
}

fn addresses(devices: &[Device]) -> Vec<&str> {
    devices.iter().map(|d| d.address.as_str()).collect()
}

#[test]
fn single_responder_on_slash_24() -> Result<()> {
    let id = identity("192.168.1.10/24");
    let mut lan = SimulatedLan::new(&id).with_host([192, 168, 1, 50], PEER_MAC);

    let devices = run(&id, &mut lan)?;

    assert_eq!(
        devices,
        vec![Device {
            address: "192.168.1.50".into(),
            hardware_address: "aa:bb:cc:dd:ee:ff".into(),
        }]
    );
    assert_eq!(lan.sent.len(), 253);
    Ok(())
}

#[test]
fn every_address_probed_once_in_order_skipping_local() -> Result<()> {
    let id = identity("10.1.2.3/28");
    let mut lan = SimulatedLan::new(&id);

    run(&id, &mut lan)?;

    let expected: Vec<Ipv4Addr> = (1..=14u8)
        .filter(|last| *last != 3)
        .map(|last| Ipv4Addr::new(10, 1, 2, last))
        .collect();
    assert_eq!(lan.probed(), expected);
    Ok(())
}

#[test]
fn requests_differ_only_in_target_address() -> Result<()> {
    let id = identity("172.16.0.1/29");
    let mut lan = SimulatedLan::new(&id);

    run(&id, &mut lan)?;

    let first = &lan.sent[0];
    for frame in &lan.sent {
        assert_eq!(frame.len(), 42);
        assert_eq!(&frame[..38], &first[..38]);
    }
    assert_eq!(&first[..6], &[0xff; 6]);
    assert_eq!(&first[6..12], &[0x02, 0x00, 0x5e, 0x10, 0x00, 0x0a]);
    Ok(())
}

#[test]
fn silent_network_yields_no_devices() -> Result<()> {
    let id = identity("192.168.50.7/24");
    let mut lan = SimulatedLan::new(&id);

    let devices = run(&id, &mut lan)?;

    assert!(devices.is_empty());
    assert_eq!(lan.sent.len(), 253);
    Ok(())
}

#[test]
fn late_reply_is_not_credited_to_next_target() -> Result<()> {
    let id = identity("192.168.1.10/24");
    let mut lan = SimulatedLan::new(&id)
        .with_slow_host([192, 168, 1, 50], PEER_MAC)
        .with_host([192, 168, 1, 60], MacAddr(0x10, 0x20, 0x30, 0x40, 0x50, 0x60));

    let devices = run(&id, &mut lan)?;

    // .50 answers during the .51 probe and is discarded there
    assert_eq!(addresses(&devices), ["192.168.1.60"]);
    assert_eq!(devices[0].hardware_address, "10:20:30:40:50:60");
    Ok(())
}

#[test]
fn failed_send_skips_only_that_address() -> Result<()> {
    let id = identity("192.168.1.10/24");
    let mut lan = SimulatedLan::new(&id)
        .with_host([192, 168, 1, 20], PEER_MAC)
        .with_host([192, 168, 1, 21], PEER_MAC)
        .with_broken_send([192, 168, 1, 20]);

    let devices = run(&id, &mut lan)?;

    assert_eq!(addresses(&devices), ["192.168.1.21"]);
    assert!(!lan.probed().contains(&Ipv4Addr::new(192, 168, 1, 20)));
    Ok(())
}

#[test]
fn devices_come_back_in_scan_order() -> Result<()> {
    let id = identity("192.168.1.10/24");
    let mut lan = SimulatedLan::new(&id)
        .with_host([192, 168, 1, 200], MacAddr(0, 0, 0, 0, 0, 3))
        .with_host([192, 168, 1, 1], MacAddr(0, 0, 0, 0, 0, 1))
        .with_host([192, 168, 1, 99], MacAddr(0, 0, 0, 0, 0, 2));

    let devices = run(&id, &mut lan)?;

    assert_eq!(addresses(&devices), ["192.168.1.1", "192.168.1.99", "192.168.1.200"]);
    Ok(())
}

#[test]
fn local_address_is_never_reported() -> Result<()> {
    let id = identity("192.168.1.10/24");
    let mut lan = SimulatedLan::new(&id).with_host([192, 168, 1, 10], OWN_MAC);

    let devices = run(&id, &mut lan)?;

    assert!(devices.is_empty());
    assert!(!lan.probed().contains(&Ipv4Addr::new(192, 168, 1, 10)));
    Ok(())
}

#[test]
fn scanner_probe_reports_each_outcome() -> Result<()> {
    let id = identity("192.168.1.10/24");
    let lan = SimulatedLan::new(&id)
        .with_host([192, 168, 1, 50], PEER_MAC)
        .with_broken_send([192, 168, 1, 51]);
    let mut scanner = ArpScanner::new(lan, &id)?.with_timeout(Duration::from_millis(5));

    assert!(matches!(
        scanner.probe(Ipv4Addr::new(192, 168, 1, 50)),
        ProbeOutcome::Found(ref d) if d.address == "192.168.1.50"
    ));
    assert!(matches!(scanner.probe(Ipv4Addr::new(192, 168, 1, 51)), ProbeOutcome::SendFailed));
    assert!(matches!(scanner.probe(Ipv4Addr::new(192, 168, 1, 52)), ProbeOutcome::NoReply));
    Ok(())
}

#[test]
fn no_usable_interface_aborts_before_opening_a_channel() {
    const IFF_UP: u32 = 1;
    const IFF_LOOPBACK: u32 = 1 << 3;
    let interfaces = vec![
        ni("lo", None, &["127.0.0.1/8"], IFF_UP | IFF_LOOPBACK),
        ni("eth1", Some(PEER_MAC), &["10.0.0.2/24"], 0),
        ni("wg0", None, &["fe80::1/64"], IFF_UP),
    ];
    let opened = Cell::new(false);

    let outcome = select_interface(&interfaces)
        .and_then(NetworkIdentity::try_from)
        .map_err(DiscoveryError::from)
        .and_then(|id| {
            sweep(
                &id,
                |id| {
                    opened.set(true);
                    Ok(SimulatedLan::new(id))
                },
                None,
            )
        });

    assert!(matches!(
        outcome,
        Err(DiscoveryError::Setup(SetupError::NoSuitableInterface))
    ));
    assert!(!opened.get());
}

#[test]
fn interface_without_mac_is_rejected() {
    let interfaces = vec![ni("tun0", None, &["10.8.0.2/24"], 1)];
    let chosen = select_interface(&interfaces).expect("tun0 is a candidate");
    let err = NetworkIdentity::try_from(chosen).unwrap_err();
    assert!(matches!(err, SetupError::NoHardwareAddress { ref interface } if interface == "tun0"));
}
