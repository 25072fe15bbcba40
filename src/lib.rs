pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{OutputFormat, TerminalPresenter};
pub use config::Settings;
pub use core::{
    connectivity::{AlwaysOnline, DnsProbe},
    engine::ReportEngine,
    fetcher::HttpFetcher,
    loader::FeedLoader,
    parser::extract_earthquakes,
    pipeline::{fetch_earthquake_data, FeedPipeline},
};
pub use domain::model::{Earthquake, LoadState};
pub use utils::error::{QuakeError, Result};
