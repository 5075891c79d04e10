//! Raw layer 2 channel used for both sending requests and reading replies.
//!
//! pnet's Linux backend binds to every ethertype and also loops back our
//! own outgoing frames. [`EthernetChannel::recv`] hides both so that a
//! receive yields what an ARP-only packet socket would.

use std::io;
use std::time::{Duration, Instant};

use arpsweep_common::error::SetupError;
use arpsweep_common::network::interface::NetworkIdentity;
use arpsweep_protocols::MAX_REPLY_LEN;
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::util::MacAddr;
use tracing::debug;

/// Slice of the probe timeout spent in a single blocking read.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A link-layer handle the probe loop can transmit on and wait for replies.
pub trait LinkChannel {
    /// Transmits one complete frame.
    fn send(&mut self, frame: &[u8]) -> io::Result<()>;

    /// Waits for one frame. `Ok(None)` means nothing arrived.
    ///
    /// The deadline is checked between reads, so a wait may overrun
    /// `timeout` by up to one poll interval.
    fn recv(&mut self, timeout: Duration) -> io::Result<Option<Vec<u8>>>;
}

impl<C: LinkChannel + ?Sized> LinkChannel for &mut C {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).send(frame)
    }

    fn recv(&mut self, timeout: Duration) -> io::Result<Option<Vec<u8>>> {
        (**self).recv(timeout)
    }
}

pub struct EthernetChannel {
    tx: Box<dyn DataLinkSender>,
    rx: Box<dyn DataLinkReceiver>,
    own_mac: MacAddr,
}

impl EthernetChannel {
    pub fn open(identity: &NetworkIdentity) -> Result<Self, SetupError> {
        open_eth_channel(identity, &get_config(), datalink::channel)
    }

    pub fn from_parts(
        tx: Box<dyn DataLinkSender>,
        rx: Box<dyn DataLinkReceiver>,
        own_mac: MacAddr,
    ) -> Self {
        Self { tx, rx, own_mac }
    }
}

impl LinkChannel for EthernetChannel {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        match self.tx.send_to(frame, None) {
            Some(result) => result,
            None => Err(io::Error::other("no room in the send buffer")),
        }
    }

    fn recv(&mut self, timeout: Duration) -> io::Result<Option<Vec<u8>>> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            match self.rx.next() {
                Ok(frame) => {
                    if is_inbound_arp(frame, self.own_mac) {
                        let len = frame.len().min(MAX_REPLY_LEN);
                        return Ok(Some(frame[..len].to_vec()));
                    }
                }
                Err(e) if is_timeout(&e) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}

fn open_eth_channel<F>(
    identity: &NetworkIdentity,
    cfg: &Config,
    channel_opener: F,
) -> Result<EthernetChannel, SetupError>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    let intf: &NetworkInterface = &identity.interface;
    let ch: Channel = channel_opener(intf, *cfg).map_err(|source| SetupError::ChannelOpen {
        interface: intf.name.clone(),
        source,
    })?;
    match ch {
        Channel::Ethernet(tx, rx) => {
            debug!("Raw channel open on {}", intf.name);
            Ok(EthernetChannel::from_parts(tx, rx, identity.hardware_address))
        }
        _ => Err(SetupError::UnsupportedChannel {
            interface: intf.name.clone(),
        }),
    }
}

fn get_config() -> Config {
    Config {
        read_timeout: Some(POLL_INTERVAL),
        promiscuous: false,
        ..Default::default()
    }
}

fn is_inbound_arp(frame: &[u8], own_mac: MacAddr) -> bool {
    match EthernetPacket::new(frame) {
        Some(eth) => eth.get_ethertype() == EtherTypes::Arp && eth.get_source() != own_mac,
        None => false,
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
