// Library root for the home-run analytics core: dataset model, CSV ingestion,
// player ranking, per-player series and the comparison/dashboard builders.

pub mod comparison;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod profile;
pub mod ranking;
pub mod series;
pub mod store;

pub use error::AnalysisError;
