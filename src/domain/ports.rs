use crate::domain::model::{BusinessRecord, NewBusiness, ScopeRow};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn store_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn site_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn owner_website(&self) -> Option<&str>;
}

/// Equality filter on stored labels. `service: None` selects a whole city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessFilter {
    pub city: String,
    pub service: Option<String>,
}

/// The hosted store holding the `businesses` table.
pub trait BusinessSource: Send + Sync {
    fn fetch_scope_rows(&self) -> impl std::future::Future<Output = Result<Vec<ScopeRow>>> + Send;

    fn fetch_businesses(
        &self,
        filter: &BusinessFilter,
    ) -> impl std::future::Future<Output = Result<Vec<BusinessRecord>>> + Send;

    fn insert_business(
        &self,
        business: &NewBusiness,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Row: Send;
    type Output: Send;
    type Report: Send + std::fmt::Display;

    async fn extract(&self) -> Result<Vec<Self::Row>>;
    async fn transform(&self, rows: Vec<Self::Row>) -> Result<Self::Output>;
    async fn load(&self, output: Self::Output) -> Result<Self::Report>;
}
