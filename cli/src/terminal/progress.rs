use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use arpsweep_common::config::Config;
use arpsweep_core::scanner::ScanProgress;
use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

static PROGRESS: OnceLock<ProgressBar> = OnceLock::new();

/// Creates the sweep's progress bar. Hidden when quiet or `--no-progress`.
///
/// Only the first call creates a bar; later calls keep it.
pub fn start(total: u64, cfg: &Config) {
    let mut created = false;
    PROGRESS.get_or_init(|| {
        created = true;
        new_bar(total, cfg)
    });
    if !created {
        debug!("Progress bar already running, keeping it");
    }
}

fn new_bar(total: u64, cfg: &Config) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if cfg.no_progress || cfg.quiet > 0 {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    let style = ProgressStyle::with_template("{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
        .tick_strings(&["▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁"]);

    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn report_probe(progress: ScanProgress) {
    if let Some(pb) = PROGRESS.get() {
        pb.set_position(progress.probed as u64);
        pb.set_message(format!(
            "{} found, last probed {}",
            progress.found.to_string().green().bold(),
            progress.target
        ));
    }
}

pub fn finish() {
    if let Some(pb) = PROGRESS.get() {
        pb.finish_and_clear();
    }
}

/// Log sink that keeps output from tearing the progress bar.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match PROGRESS.get() {
            Some(pb) => pb.suspend(|| io::stderr().write_all(buf))?,
            None => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
