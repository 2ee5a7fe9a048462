pub mod pipelines;

#[cfg(feature = "cli")]
pub mod runner;
