//! Command-line arguments for the demo viewer.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_PIXELS_PER_HOUR;

/// Substance journal effect-timeline viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Journal JSON file (a list of experiences with their ingestions)
    #[arg(value_name = "JOURNAL")]
    pub journal: PathBuf,

    /// Reference substances JSON file (durations and dose bands)
    #[arg(short = 's', long = "substances", value_name = "FILE")]
    pub substances: PathBuf,

    /// Index of the experience to chart (0-based)
    #[arg(short = 'e', long = "experience", default_value = "0")]
    pub experience: usize,

    /// Horizontal zoom in pixels per hour
    #[arg(short = 'z', long = "zoom", default_value_t = DEFAULT_PIXELS_PER_HOUR)]
    pub pixels_per_hour: f64,

    /// Normalize each substance to its own maximum instead of chart-wide
    #[arg(short = 'i', long = "independent-heights")]
    pub independent_heights: bool,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Map `-v` count onto a log level filter.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
