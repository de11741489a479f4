use crate::core::scope::collect_scopes;
use crate::core::slug::slugify;
use crate::domain::model::{BusinessRecord, Scope};
use crate::domain::ports::{BusinessFilter, BusinessSource};
use crate::utils::error::Result;
use std::collections::HashSet;

/// A path segment pair the page layer pre-renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticPath {
    pub city: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityPage {
    pub city: String,
    pub services: Vec<String>,
    pub businesses: Vec<BusinessRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServicePage {
    pub city: String,
    pub service: String,
    pub businesses: Vec<BusinessRecord>,
}

/// Resolves URL slugs back to stored labels and loads the rows for a page.
///
/// Slugs are matched against `slugify(label)` of every known scope; the
/// first scope in store order wins, so two labels that slug identically
/// share one page.
pub struct DirectoryListing<B: BusinessSource> {
    source: B,
}

impl<B: BusinessSource> DirectoryListing<B> {
    pub fn new(source: B) -> Self {
        Self { source }
    }

    async fn scopes(&self) -> Result<Vec<Scope>> {
        let rows = self.source.fetch_scope_rows().await?;
        Ok(collect_scopes(&rows))
    }

    pub async fn static_paths(&self) -> Result<Vec<StaticPath>> {
        let mut seen = HashSet::new();
        let paths = self
            .scopes()
            .await?
            .into_iter()
            .map(|scope| StaticPath {
                city: slugify(&scope.city),
                service: slugify(&scope.service),
            })
            .filter(|path| !path.city.is_empty() && !path.service.is_empty())
            .filter(|path| seen.insert(path.clone()))
            .collect();
        Ok(paths)
    }

    pub async fn city_page(&self, city_slug: &str) -> Result<Option<CityPage>> {
        let scopes = self.scopes().await?;
        let Some(city) = scopes
            .iter()
            .find(|scope| slugify(&scope.city) == city_slug)
            .map(|scope| scope.city.clone())
        else {
            tracing::debug!("No city matches slug '{}'", city_slug);
            return Ok(None);
        };

        let mut services = Vec::new();
        let mut seen = HashSet::new();
        for scope in scopes.iter().filter(|s| slugify(&s.city) == city_slug) {
            if seen.insert(slugify(&scope.service)) {
                services.push(scope.service.clone());
            }
        }

        let businesses = self
            .source
            .fetch_businesses(&BusinessFilter {
                city: city.clone(),
                service: None,
            })
            .await?;

        Ok(Some(CityPage {
            city,
            services,
            businesses,
        }))
    }

    pub async fn service_page(
        &self,
        city_slug: &str,
        service_slug: &str,
    ) -> Result<Option<ServicePage>> {
        let scopes = self.scopes().await?;
        let Some(scope) = scopes.into_iter().find(|scope| {
            slugify(&scope.city) == city_slug && slugify(&scope.service) == service_slug
        }) else {
            tracing::debug!("No scope matches '{}/{}'", city_slug, service_slug);
            return Ok(None);
        };

        let businesses = self
            .source
            .fetch_businesses(&BusinessFilter {
                city: scope.city.clone(),
                service: Some(scope.service.clone()),
            })
            .await?;

        Ok(Some(ServicePage {
            city: scope.city,
            service: scope.service,
            businesses,
        }))
    }
}
