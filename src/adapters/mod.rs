// Adapters layer: concrete implementations of the domain ports for external systems.
// Local file storage lives with the CLI config in `config::cli`.

pub mod http;

pub use http::HttpFetcher;
