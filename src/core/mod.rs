pub mod connectivity;
pub mod engine;
pub mod fetcher;
pub mod format;
pub mod loader;
pub mod parser;
pub mod pipeline;
pub mod query;

pub use crate::domain::model::{Earthquake, LoadState, Location, OrderBy, QueryPreferences};
pub use crate::domain::ports::{ConnectivityProbe, Fetcher, PreferenceStore, Presenter};
pub use crate::utils::error::Result;
