use crate::domain::model::{NewBusiness, ScrapedBusiness};
use serde_json::Value;
use std::collections::HashSet;

/// Converts a scraper export row into an insert payload. Nested `reviews`
/// data takes precedence over flat review columns.
pub fn flatten_business(scraped: &ScrapedBusiness) -> NewBusiness {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    let (count, rating) = match &scraped.reviews {
        Some(reviews) => (reviews.count.as_ref(), reviews.rating.as_ref()),
        None => (scraped.review_count.as_ref(), scraped.avg_rating.as_ref()),
    };

    NewBusiness {
        name: text(&scraped.name),
        website: text(&scraped.website),
        phone: text(&scraped.phone),
        address: text(&scraped.address),
        city: text(&scraped.city),
        service: text(&scraped.service),
        review_count: count.and_then(Value::as_i64).unwrap_or(0),
        avg_rating: rating.and_then(parse_rating),
    }
}

/// A numeric zero means "no rating". A non-empty string is taken at face
/// value, so `"0"` is a real 0.0 rating.
fn parse_rating(value: &Value) -> Option<f64> {
    let rating = match value {
        Value::Number(n) => n.as_f64().filter(|rating| *rating != 0.0)?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !rating.is_finite() {
        return None;
    }
    Some((rating * 100.0).round() / 100.0)
}

/// Drops repeat (name, website) pairs, compared trimmed and lowercased.
/// Rows for `owner_website` always pass.
pub fn dedupe_businesses(
    businesses: Vec<NewBusiness>,
    owner_website: Option<&str>,
) -> Vec<NewBusiness> {
    let owner = owner_website.map(|w| w.trim().to_lowercase());
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(businesses.len());

    for business in businesses {
        let website = business.website.trim().to_lowercase();
        let name = business.name.trim().to_lowercase();

        if owner.as_deref() == Some(website.as_str()) {
            unique.push(business);
            continue;
        }

        if seen.insert((name, website)) {
            unique.push(business);
        }
    }

    unique
}
