pub mod sitemap_pipeline;
pub mod upload_pipeline;

pub use sitemap_pipeline::SitemapPipeline;
pub use upload_pipeline::UploadPipeline;
