pub mod business;
pub mod etl;
pub mod listing;
pub mod scope;
pub mod sitemap;
pub mod slug;
pub mod smoke;

pub use crate::domain::model::{Scope, ScopeRow, SitemapDocument};
pub use crate::domain::ports::{BusinessFilter, BusinessSource, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
