use crate::core::format::{format_date, format_magnitude, format_time, split_location, SeverityBucket};
use crate::domain::model::{Earthquake, LoadState};
use crate::domain::ports::Presenter;
use crate::utils::error::{QuakeError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

pub const EMPTY_MESSAGE: &str = "No earthquakes found.";
pub const NO_NETWORK_MESSAGE: &str = "No internet connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Display fields of one list row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub magnitude: String,
    pub severity: SeverityBucket,
    pub location_offset: String,
    pub primary_location: String,
    pub date: String,
    pub time: String,
    pub url: String,
}

impl From<&Earthquake> for ListItem {
    fn from(earthquake: &Earthquake) -> Self {
        let location = split_location(earthquake.place());
        Self {
            magnitude: format_magnitude(earthquake.magnitude()),
            severity: SeverityBucket::from_magnitude(earthquake.magnitude()),
            location_offset: location.offset,
            primary_location: location.primary,
            date: format_date(earthquake.time_ms()),
            time: format_time(earthquake.time_ms()),
            url: earthquake.url().to_string(),
        }
    }
}

pub struct TerminalPresenter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_table(&mut self, records: &[Earthquake]) -> Result<()> {
        for record in records {
            let item = ListItem::from(record);
            writeln!(
                self.out,
                "{:>5}  [{:>3}]  {:<20} {:<40} {:<13} {:<8}  {}",
                item.magnitude,
                item.severity,
                item.location_offset,
                item.primary_location,
                item.date,
                item.time,
                item.url
            )?;
        }
        Ok(())
    }

    fn render_json(&mut self, records: &[Earthquake]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, records).map_err(|e| {
            if e.classify() == serde_json::error::Category::Io {
                QuakeError::IoError(e.into())
            } else {
                QuakeError::JsonError(e)
            }
        })?;
        writeln!(self.out)?;
        Ok(())
    }

    fn render_csv(&mut self, records: &[Earthquake]) -> Result<()> {
        let mut writer = csv::Writer::from_writer(&mut self.out);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, state: &LoadState) -> Result<()> {
        match state {
            LoadState::Loading => {
                return Err(QuakeError::PresentationError {
                    message: "Cannot render a load that has not finished".to_string(),
                })
            }
            LoadState::Empty => writeln!(self.out, "{}", EMPTY_MESSAGE)?,
            LoadState::NoNetwork => writeln!(self.out, "{}", NO_NETWORK_MESSAGE)?,
            LoadState::Loaded(records) => match self.format {
                OutputFormat::Table => self.render_table(records)?,
                OutputFormat::Json => self.render_json(records)?,
                OutputFormat::Csv => self.render_csv(records)?,
            },
        }
        self.out.flush()?;
        Ok(())
    }
}
