// Adapters layer: concrete presenters for the earthquake list.

pub mod presenter;

pub use presenter::{OutputFormat, TerminalPresenter};
