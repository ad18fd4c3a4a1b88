use crate::{output::Output, serial::SerialConf};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lists connected serial devices
    List,
    /// Captures spectra from the device
    Watch(WatchConf),
    /// Sets integration time on the device
    SetIntegrationTime(SetIntegrationTimeConf),
}

#[derive(Args)]
pub struct WatchConf {
    /// Amount of spectra captured
    #[clap(value_parser, default_value = "1")]
    pub count: usize,

    #[clap(flatten)]
    pub output: Output,

    #[clap(flatten)]
    pub serial: SerialConf,
}

#[derive(Args)]
pub struct SetIntegrationTimeConf {
    /// New integration time in device units. Passed to the device as-is,
    /// the firmware documents no accepted range.
    #[clap(value_parser, allow_hyphen_values = true)]
    pub integration_time: i32,

    #[clap(flatten)]
    pub serial: SerialConf,
}
