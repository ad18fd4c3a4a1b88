mod cli;
mod output;
mod serial;

use clap::Parser;
use simple_eyre::Result;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use cli::*;
use spek_c12880::SPECTRUM_PIXEL_COUNT;

fn main() -> Result<()> {
    simple_eyre::install()?;
    let cli = Cli::parse();
    env_logger::init();

    match &cli.command {
        Commands::List => list_serial(),
        Commands::Watch(conf) => watch(conf),
        Commands::SetIntegrationTime(conf) => set_integration_time(conf),
    }
}

/// Returns std::io::Write stream with coloring enabled if program is run interactively
fn get_stdout() -> StandardStream {
    StandardStream::stdout(if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    })
}

fn list_serial() -> Result<()> {
    let mut stdout = get_stdout();
    let paths = serialport::available_ports()?;
    if paths.is_empty() {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(&mut stdout, "No connected serial ports found.")?;
    } else {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(&mut stdout, "Connected serial ports:")?;
    }
    stdout.reset()?;
    paths.iter().for_each(|p| println!("{}", p.port_name));

    Ok(())
}

fn watch(conf: &WatchConf) -> Result<()> {
    let mut dev = conf.serial.open_spectrometer()?;
    if conf.count == 1 {
        let spectrum = dev.read_spectrum()?;
        conf.output.write_spectrum(&spectrum)?;
    } else {
        let mut spectra = vec![[0u16; SPECTRUM_PIXEL_COUNT]; conf.count];
        dev.read_spectra(&mut spectra)?;
        conf.output.write_spectra(&spectra)?;
    }
    Ok(())
}

fn set_integration_time(conf: &SetIntegrationTimeConf) -> Result<()> {
    let mut dev = conf.serial.open_spectrometer()?;
    dev.set_integration_time(conf.integration_time)?;
    Ok(())
}
