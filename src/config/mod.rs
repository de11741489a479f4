use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_path, validate_secret, validate_url, Validate};

pub const DEFAULT_SITE_URL: &str = "https://www.handyman-tn.com";
pub const DEFAULT_SITEMAP_OUTPUT: &str = "public/sitemap.xml";

const STORE_URL_VARS: [&str; 2] = ["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
const API_KEY_VARS: [&str; 3] = [
    "SUPABASE_SERVICE_ROLE_KEY",
    "SUPABASE_KEY",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
];
const SITE_URL_VARS: [&str; 2] = ["SITE_URL", "NEXT_PUBLIC_SITE_URL"];
const OUTPUT_VAR: &str = "SITEMAP_OUTPUT";
const OWNER_WEBSITE_VAR: &str = "DIRECTORY_OWNER_WEBSITE";

/// Every variable the binaries read, for callers that need to scrub them.
pub const ENV_VARS: [&str; 9] = [
    "SUPABASE_URL",
    "NEXT_PUBLIC_SUPABASE_URL",
    "SUPABASE_SERVICE_ROLE_KEY",
    "SUPABASE_KEY",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
    "SITE_URL",
    "NEXT_PUBLIC_SITE_URL",
    OUTPUT_VAR,
    OWNER_WEBSITE_VAR,
];

/// Process-wide settings, built once at start-up and passed down.
#[derive(Clone, PartialEq)]
pub struct DirectoryConfig {
    pub store_url: String,
    pub api_key: String,
    pub site_url: String,
    pub output_path: String,
    pub owner_website: Option<String>,
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("store_url", &self.store_url)
            .field("api_key", &"<redacted>")
            .field("site_url", &self.site_url)
            .field("output_path", &self.output_path)
            .field("owner_website", &self.owner_website)
            .finish()
    }
}

impl DirectoryConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(*name))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let store_url = first(&STORE_URL_VARS[..]).ok_or_else(|| DirectoryError::MissingConfigError {
            field: STORE_URL_VARS[0].to_string(),
        })?;
        let api_key = first(&API_KEY_VARS[..]).ok_or_else(|| DirectoryError::MissingConfigError {
            field: API_KEY_VARS[0].to_string(),
        })?;
        let site_url = first(&SITE_URL_VARS[..]).unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        let output_path =
            first(&[OUTPUT_VAR][..]).unwrap_or_else(|| DEFAULT_SITEMAP_OUTPUT.to_string());

        Ok(Self {
            store_url: store_url.trim_end_matches('/').to_string(),
            api_key,
            site_url: site_url.trim_end_matches('/').to_string(),
            output_path,
            owner_website: first(&[OWNER_WEBSITE_VAR][..]),
        })
    }

    pub fn with_output_path(mut self, output_path: impl Into<String>) -> Self {
        self.output_path = output_path.into();
        self
    }
}

impl ConfigProvider for DirectoryConfig {
    fn store_url(&self) -> &str {
        &self.store_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn site_url(&self) -> &str {
        &self.site_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn owner_website(&self) -> Option<&str> {
        self.owner_website.as_deref()
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<()> {
        validate_url(STORE_URL_VARS[0], &self.store_url)?;
        validate_secret(API_KEY_VARS[0], &self.api_key)?;
        validate_url(SITE_URL_VARS[0], &self.site_url)?;
        validate_path(OUTPUT_VAR, &self.output_path)?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
