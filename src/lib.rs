//! Movie discovery over a TMDB-style catalog, with a generative fallback
//! search when the catalog comes back empty.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use application::search::{SearchOptions, SearchSession};
pub use domain::error::CsError;
pub use domain::model::{MovieSummary, SearchBackend, SearchSnapshot};
