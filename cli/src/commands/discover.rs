use std::time::{Duration, Instant};

use arpsweep_common::config::Config;
use arpsweep_common::network::device::Device;
use arpsweep_common::network::interface::NetworkIdentity;
use arpsweep_core::discovery;
use arpsweep_core::network::channel::EthernetChannel;
use arpsweep_core::scanner::ScanProgress;
use colored::*;

use crate::mprint;
use crate::sink;
use crate::terminal::{colors, network_fmt, print, progress};

pub fn discover(cfg: &Config) -> anyhow::Result<()> {
    print::header("selecting interface", cfg.quiet);
    let identity: NetworkIdentity = NetworkIdentity::detect()?;
    network_fmt::print_identity(&identity, cfg.quiet);

    print::header("sweeping subnet", cfg.quiet);
    progress::start(identity.subnet_range().len() as u64, cfg);

    let start_time: Instant = Instant::now();
    let on_progress: &dyn Fn(ScanProgress) = &progress::report_probe;
    let result = discovery::sweep(&identity, EthernetChannel::open, Some(on_progress));
    progress::finish();
    let devices: Vec<Device> = result?;

    discovery_ends(&devices, cfg);

    sink::write_devices(&cfg.output, &devices)?;
    print_summary(devices.len(), start_time.elapsed(), cfg);
    Ok(())
}

fn discovery_ends(devices: &[Device], cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    if devices.is_empty() {
        print::header("zero hosts detected", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("arp discovery", cfg.quiet);
    for (idx, device) in devices.iter().enumerate() {
        network_fmt::print_device(device, idx);
        if idx + 1 != devices.len() {
            mprint!();
        }
    }
}

fn print_summary(found: usize, total_time: Duration, cfg: &Config) {
    let count: ColoredString = format!("Found {found} device(s).").bold().green();
    let location: ColoredString = cfg.output.display().to_string().bold().yellow();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).color(colors::SEPARATOR);

    if cfg.quiet == 0 {
        print::fat_separator();
    }
    print::print_status(format!("{count} Results written to {location} ({elapsed})"));
    if cfg.quiet == 0 {
        print::end_of_program();
    }
}
