use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business row as stored in the `businesses` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub service: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub review_count: Option<i64>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub pin_rank: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The projection the sitemap path reads. Every column is nullable on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeRow {
    pub city: Option<String>,
    pub service: Option<String>,
    pub updated_at: Option<String>,
}

impl ScopeRow {
    pub fn new(city: &str, service: &str, updated_at: Option<&str>) -> Self {
        Self {
            city: Some(city.to_string()),
            service: Some(service.to_string()),
            updated_at: updated_at.map(str::to_string),
        }
    }
}

/// One directory page: a distinct (city, service) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub city: String,
    pub service: String,
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub location: String,
    pub last_modified: Option<chrono::NaiveDate>,
    pub change_frequency: Option<ChangeFrequency>,
    pub priority: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct SitemapDocument {
    pub xml: String,
    pub url_count: usize,
}

/// A row from a scraper export. Older exports nest review data under `reviews`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedBusiness {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub reviews: Option<ScrapedReviews>,
    #[serde(default)]
    pub review_count: Option<serde_json::Value>,
    #[serde(default)]
    pub avg_rating: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedReviews {
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub count: Option<serde_json::Value>,
}

/// Insert payload, limited to the columns the store accepts from uploads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBusiness {
    pub name: String,
    pub website: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub service: String,
    pub review_count: i64,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl std::fmt::Display for UploadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} succeeded, {} failed", self.succeeded, self.failed)
    }
}
