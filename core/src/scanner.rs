//! The sequential ARP probe loop.
//!
//! One request goes out, the loop waits for at most one frame, checks it
//! against the address just probed, and moves on. Only a single reply is
//! ever expected at a time, so no correlation state is kept.

use std::net::Ipv4Addr;
use std::time::Duration;

use arpsweep_common::network::device::{Device, DeviceList};
use arpsweep_common::network::interface::NetworkIdentity;
use arpsweep_common::network::range::SubnetRange;
use arpsweep_protocols::PacketError;
use arpsweep_protocols::arp::{self, ArpFrameTemplate};
use tracing::{debug, info, trace, warn};

use crate::network::channel::LinkChannel;

/// How long each probe waits for its reply.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(200);

/// Snapshot handed to the progress callback after every probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    pub target: Ipv4Addr,
    pub probed: usize,
    pub total: usize,
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found(Device),
    NoReply,
    SendFailed,
}

pub struct ArpScanner<C: LinkChannel> {
    channel: C,
    template: ArpFrameTemplate,
    range: SubnetRange,
    devices: DeviceList,
    timeout: Duration,
}

impl<C: LinkChannel> ArpScanner<C> {
    pub fn new(channel: C, identity: &NetworkIdentity) -> Result<Self, PacketError> {
        Ok(Self {
            channel,
            template: ArpFrameTemplate::new(identity)?,
            range: identity.subnet_range(),
            devices: DeviceList::new(),
            timeout: PROBE_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_device_cap(mut self, cap: usize) -> Self {
        self.devices = DeviceList::with_cap(cap);
        self
    }

    pub fn range(&self) -> SubnetRange {
        self.range
    }

    /// Probes every address of the subnet in ascending order.
    ///
    /// Consumes the scanner, so the channel is released when the sweep ends.
    pub fn run(mut self, on_progress: Option<&dyn Fn(ScanProgress)>) -> DeviceList {
        let total: usize = self.range.len();

        for (idx, target) in self.range.to_iter().enumerate() {
            if self.devices.is_full() {
                info!("Device cap of {} reached, stopping early", self.devices.len());
                break;
            }

            if let ProbeOutcome::Found(device) = self.probe(target) {
                debug!("{} is at {}", device.address, device.hardware_address);
                self.devices.push(device);
            }

            if let Some(report) = on_progress {
                report(ScanProgress {
                    target,
                    probed: idx + 1,
                    total,
                    found: self.devices.len(),
                });
            }
        }

        self.devices
    }

    /// Sends one request for `target` and judges the single frame that follows.
    pub fn probe(&mut self, target: Ipv4Addr) -> ProbeOutcome {
        self.template.set_target(target);

        if let Err(e) = self.channel.send(self.template.bytes()) {
            warn!("send {target} failed: {e}");
            return ProbeOutcome::SendFailed;
        }

        let frame: Vec<u8> = match self.channel.recv(self.timeout) {
            Ok(Some(frame)) => frame,
            Ok(None) => return ProbeOutcome::NoReply,
            Err(e) => {
                debug!("receive after probing {target} failed: {e}");
                return ProbeOutcome::NoReply;
            }
        };

        match arp::match_reply(&frame, target) {
            Some(reply) => ProbeOutcome::Found(Device::new(reply.sender_addr, reply.sender_mac)),
            None => {
                trace!("discarding {} byte frame while probing {target}", frame.len());
                ProbeOutcome::NoReply
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
