//! Writes the discovered devices to disk as a JSON array.

use std::fs;
use std::path::Path;

use anyhow::Context;
use arpsweep_common::network::device::Device;

pub fn write_devices(path: &Path, devices: &[Device]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let mut json: String = serde_json::to_string_pretty(devices).context("serializing devices")?;
    json.push('\n');

    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
