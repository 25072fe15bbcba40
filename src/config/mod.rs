pub mod settings;

pub use settings::Settings;

#[cfg(feature = "cli")]
use crate::adapters::presenter::OutputFormat;
#[cfg(feature = "cli")]
use crate::domain::model::OrderBy;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "quake-report")]
#[command(about = "List recent earthquakes from the USGS feed")]
pub struct CliConfig {
    /// Settings file; flags given on the command line take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the FDSN event query service
    #[arg(long, env = "QUAKE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Minimum magnitude to include
    #[arg(long, env = "QUAKE_MIN_MAGNITUDE", allow_hyphen_values = true)]
    pub min_magnitude: Option<String>,

    /// Sort order: time or magnitude
    #[arg(long)]
    pub order_by: Option<OrderBy>,

    /// Maximum number of earthquakes to request
    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Connect timeout in seconds
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds
    #[arg(long)]
    pub read_timeout: Option<u64>,

    /// Skip the DNS reachability check before fetching
    #[arg(long)]
    pub no_connectivity_check: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the settings file (or defaults) and layers the flags on top.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("Loading settings from {}", path.display());
                Settings::from_file(path)?
            }
            None => Settings::default(),
        };
        self.apply_to(&mut settings);
        Ok(settings)
    }

    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(endpoint) = &self.endpoint {
            settings.source.endpoint = endpoint.clone();
        }
        if let Some(min_magnitude) = &self.min_magnitude {
            settings.query.min_magnitude = Some(min_magnitude.clone());
        }
        if let Some(order_by) = self.order_by {
            settings.query.order_by = Some(order_by.to_string());
        }
        if let Some(limit) = self.limit {
            settings.query.limit = Some(limit);
        }
        if let Some(format) = self.format {
            settings.output.format = format;
        }
        if let Some(seconds) = self.connect_timeout {
            settings.source.connect_timeout_seconds = seconds;
        }
        if let Some(seconds) = self.read_timeout {
            settings.source.read_timeout_seconds = seconds;
        }
        if self.no_connectivity_check {
            settings.source.check_connectivity = false;
        }
    }
}
