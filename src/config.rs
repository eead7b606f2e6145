use std::path::PathBuf;

use clap::Parser;

use crate::aggregate::UnknownModePolicy;

#[derive(Parser, Debug)]
#[command(name = "ladybug-dashboard")]
#[command(about = "Commute dashboard comparing ladybug rides and walking trips", long_about = None)]
pub struct Config {
    /// Commute CSV to load
    #[arg(value_name = "CSV", env = "LADYBUG_CSV", default_value = "data/ladybug_final.csv")]
    pub csv: PathBuf,

    /// How trips with a mode outside the catalog are handled in averages
    #[arg(long, value_enum, default_value_t = UnknownModePolicy::Skip)]
    pub unknown_modes: UnknownModePolicy,

    /// Write the dashboard description as JSON to this file and exit
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}
