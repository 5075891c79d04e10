use std::path::PathBuf;

/// Where results land when no `--output` is given.
pub const DEFAULT_OUTPUT: &str = "scanner/devices.json";

/// Front-end settings. Never consulted by the probe engine itself.
pub struct Config {
    /// Destination of the JSON device list, relative to the working directory.
    pub output: PathBuf,
    /// 0 = normal, 1 = warnings and summary only.
    pub quiet: u8,
    /// Raises the default log filter to `debug`.
    pub verbose: bool,
    /// Hides the progress bar.
    pub no_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            quiet: 0,
            verbose: false,
            no_progress: false,
        }
    }
}
