//! # Sweep orchestration
//!
//! Opens the raw channel for an already selected [`NetworkIdentity`], runs
//! the probe loop over its subnet, and releases the channel again.

use arpsweep_common::error::SetupError;
use arpsweep_common::network::device::Device;
use arpsweep_common::network::interface::NetworkIdentity;
use tracing::{info, warn};

use crate::error::DiscoveryError;
use crate::network::channel::LinkChannel;
use crate::scanner::{ArpScanner, ScanProgress};

/// Sweeps the subnet of `identity` on the channel produced by `open`.
///
/// `open` is only called once; its channel lives exactly as long as the
/// probe loop.
pub fn sweep<C, F>(
    identity: &NetworkIdentity,
    open: F,
    on_progress: Option<&dyn Fn(ScanProgress)>,
) -> Result<Vec<Device>, DiscoveryError>
where
    C: LinkChannel,
    F: FnOnce(&NetworkIdentity) -> Result<C, SetupError>,
{
    if !is_root::is_root() {
        warn!("Not running as root, opening a raw channel will likely fail");
    }

    let channel: C = open(identity)?;
    let scanner = ArpScanner::new(channel, identity)?;

    let range = scanner.range();
    info!(
        "Probing {} address(es) between {} and {} on {}",
        range.len(),
        range.base,
        range.broadcast,
        identity.interface_name()
    );

    let devices: Vec<Device> = scanner.run(on_progress).into_vec();
    info!("Sweep complete, {} device(s) answered", devices.len());
    Ok(devices)
}
