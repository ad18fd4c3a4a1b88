use clap::{ArgEnum, Args};
use plotters::prelude::*;
use simple_eyre::{eyre::eyre, Result};
use spek_c12880::Spectrum;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

#[derive(Args)]
pub struct Output {
    /// Path to a file where captured spectra should be stored
    #[clap(short, long, value_parser = unique_path_parser, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// File format for captured spectra
    #[clap(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

fn unique_path_parser(p: &str) -> Result<PathBuf> {
    let p = Path::new(p);
    if p.try_exists()? {
        Err(eyre!("Path {p:?} already exists"))
    } else {
        Ok(p.to_path_buf())
    }
}

#[derive(ArgEnum, Clone, Default)]
pub enum OutputFormat {
    #[default]
    Chart,
    Csv,
}

fn spectrum_to_csv(spectrum: &Spectrum) -> String {
    log::trace!("Formatting spectrum as CSV");
    spectrum
        .iter()
        .map(|pixel| pixel.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn spectra_to_csv(spectra: &[Spectrum]) -> String {
    log::trace!("Formatting spectra as CSV");
    spectra
        .iter()
        .map(spectrum_to_csv)
        .collect::<Vec<_>>()
        .join("\n")
}

struct ChartData<'a> {
    spectrum: &'a Spectrum,
    idx: usize,
    timestamp: OffsetDateTime,
}

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

fn draw_spectrum<'a, DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    data: ChartData<'a>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    log::trace!("Drawing chart axes");
    let mut chart = ChartBuilder::on(root)
        .caption(
            format!(
                "Spectrum #{} taken at {}",
                data.idx,
                data.timestamp.format(TIMESTAMP_FORMAT)?
            ),
            ("sans-serif", (5).percent()),
        )
        .set_label_area_size(LabelAreaPosition::Left, (8).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (5).percent())
        .build_cartesian_2d(0..data.spectrum.len(), 0u32..65536u32)?;

    log::trace!("Writing chart axes labels");
    chart
        .configure_mesh()
        .x_desc("Pixel #")
        .y_desc("Intensity")
        .draw()?;

    log::trace!("Drawing spectrum as a line chart");
    chart.draw_series(LineSeries::new(
        data.spectrum.iter().enumerate().map(|(x, y)| (x, *y as u32)),
        BLACK,
    ))?;

    log::trace!("Pushing spectrum chart to rendering backend");
    root.present()?;

    Ok(())
}

impl Output {
    pub fn write_spectrum(&self, spectrum: &Spectrum) -> Result<()> {
        log::debug!("Saving spectrum to {:?}", self.output);
        match self.format {
            OutputFormat::Chart => {
                let root =
                    BitMapBackend::new(self.output.as_path(), (1280, 720)).into_drawing_area();
                draw_spectrum(
                    &root,
                    ChartData {
                        spectrum,
                        idx: 1,
                        timestamp: OffsetDateTime::now_local()?,
                    },
                )?;
            }
            OutputFormat::Csv => {
                let mut out = File::create(self.output.as_path())?;
                let data = spectrum_to_csv(spectrum);
                out.write_all(data.as_bytes())?;
            }
        };
        Ok(())
    }

    pub fn write_spectra(&self, spectra: &[Spectrum]) -> Result<()> {
        log::debug!("Saving spectra to {:?}", self.output);
        match self.format {
            OutputFormat::Chart => {
                let root = BitMapBackend::gif(self.output.as_path(), (1280, 720), 500)?
                    .into_drawing_area();
                let timestamp = OffsetDateTime::now_local()?;
                for (idx, spectrum) in spectra.iter().enumerate() {
                    draw_spectrum(
                        &root,
                        ChartData {
                            spectrum,
                            idx: idx + 1,
                            timestamp,
                        },
                    )?;
                }
            }
            OutputFormat::Csv => {
                let mut out = File::create(self.output.as_path())?;
                let data = spectra_to_csv(spectra);
                out.write_all(data.as_bytes())?;
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spek_c12880::SPECTRUM_PIXEL_COUNT;

    #[test]
    fn convert_spectrum_to_csv() {
        let spectrum: Spectrum = [1000; SPECTRUM_PIXEL_COUNT];
        let csv = spectrum_to_csv(&spectrum);
        let csv_fields: Vec<_> = csv.split(",").collect();
        assert_eq!(csv_fields.len(), SPECTRUM_PIXEL_COUNT);
        assert_eq!(csv_fields[0], "1000");
    }

    #[test]
    fn convert_spectra_to_csv() {
        let spectra = [[513; SPECTRUM_PIXEL_COUNT], [514; SPECTRUM_PIXEL_COUNT]];
        let csv = spectra_to_csv(&spectra);
        let csv_lines: Vec<_> = csv.split("\n").collect();
        assert_eq!(csv_lines.len(), 2);
        assert!(csv_lines[1].starts_with("514,"));
    }
}
