pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpFetcher;
pub use app::pipelines::{LeaguePipeline, ReportPipeline};
pub use config::{cli::LocalStorage, toml_config::RosterConfig};
pub use core::etl::EtlEngine;
pub use domain::model::{League, PlayerRecord};
pub use utils::error::{EtlError, Result};
