pub mod league_pipeline;
pub mod report_pipeline;

pub use league_pipeline::LeaguePipeline;
pub use report_pipeline::{ReportPipeline, SchoolSummary};
