pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{LocalStorage, SupabaseClient};
pub use app::pipelines::{SitemapPipeline, UploadPipeline};
pub use config::DirectoryConfig;
pub use crate::core::{etl::EtlEngine, listing::DirectoryListing, slug::slugify};
pub use utils::error::{DirectoryError, Result};
