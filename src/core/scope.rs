use crate::core::slug::slugify;
use crate::domain::model::{Scope, ScopeRow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;

/// (city slug, service slug). Two scopes with the same key would publish the
/// same URL, so labels differing only in case or punctuation share one scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScopeKey(String, String);

impl ScopeKey {
    /// `None` when either label has no slug-safe characters.
    fn new(city: &str, service: &str) -> Option<Self> {
        let city = slugify(city);
        let service = slugify(service);
        if city.is_empty() || service.is_empty() {
            return None;
        }
        Some(Self(city, service))
    }
}

/// Insertion-ordered set of scopes with a latest-timestamp merge.
#[derive(Debug, Default)]
pub struct ScopeSet {
    scopes: Vec<Scope>,
    index: HashMap<ScopeKey, usize>,
}

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one row in. Returns false when the row was skipped because its
    /// city or service is empty or slugs to nothing.
    pub fn insert(&mut self, row: &ScopeRow) -> bool {
        let city = row.city.as_deref().unwrap_or_default().trim();
        let service = row.service.as_deref().unwrap_or_default().trim();
        let Some(key) = ScopeKey::new(city, service) else {
            return false;
        };

        let updated_at = row.updated_at.as_deref().and_then(parse_timestamp);

        match self.index.get(&key) {
            Some(&position) => {
                let scope = &mut self.scopes[position];
                scope.last_modified = latest(scope.last_modified, updated_at);
            }
            None => {
                self.index.insert(key, self.scopes.len());
                self.scopes.push(Scope {
                    city: city.to_string(),
                    service: service.to_string(),
                    last_modified: updated_at,
                });
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn into_vec(self) -> Vec<Scope> {
        self.scopes
    }
}

impl<'a> FromIterator<&'a ScopeRow> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = &'a ScopeRow>>(rows: I) -> Self {
        let mut set = ScopeSet::new();
        for row in rows {
            set.insert(row);
        }
        set
    }
}

/// Reduces raw rows into unique scopes, in order of first appearance.
pub fn collect_scopes(rows: &[ScopeRow]) -> Vec<Scope> {
    let mut set = ScopeSet::new();
    let skipped = rows.iter().filter(|row| !set.insert(row)).count();
    if skipped > 0 {
        tracing::debug!("Skipped {} rows with an empty city or service slug", skipped);
    }
    set.into_vec()
}

fn latest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Parses the timestamp shapes the store emits. Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_dedup_keeps_latest_timestamp() {
        let rows = vec![
            ScopeRow::new("Nashville", "Plumbing", Some("2024-01-01")),
            ScopeRow::new("Nashville", "Plumbing", Some("2024-06-01")),
            ScopeRow::new("Memphis", "Plumbing", None),
        ];

        let scopes = collect_scopes(&rows);

        assert_eq!(scopes.len(), 2);
        assert_eq!(scopes[0].city, "Nashville");
        assert_eq!(scopes[0].service, "Plumbing");
        assert_eq!(scopes[0].last_modified, Some(date(2024, 6, 1)));
        assert_eq!(scopes[1].city, "Memphis");
        assert_eq!(scopes[1].last_modified, None);
    }

    #[test]
    fn test_earlier_timestamp_does_not_replace_later() {
        let rows = vec![
            ScopeRow::new("Franklin", "Handyman", Some("2024-06-01")),
            ScopeRow::new("Franklin", "Handyman", Some("2023-01-01")),
            ScopeRow::new("Franklin", "Handyman", None),
            ScopeRow::new("Franklin", "Handyman", Some("garbage")),
        ];

        let scopes = collect_scopes(&rows);
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].last_modified, Some(date(2024, 6, 1)));
    }

    #[test]
    fn test_timestamp_fills_in_after_null_first_occurrence() {
        let rows = vec![
            ScopeRow::new("Memphis", "Roofing", Some("not-a-date")),
            ScopeRow::new("Memphis", "Roofing", Some("2024-03-05T10:00:00Z")),
        ];

        let scopes = collect_scopes(&rows);
        assert_eq!(
            scopes[0].last_modified,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_empty_city_or_service_is_skipped() {
        let rows = vec![
            ScopeRow::new("   ", "Plumbing", Some("2024-01-01")),
            ScopeRow::new("Nashville", "", Some("2024-01-01")),
            ScopeRow {
                city: None,
                service: Some("Painting".to_string()),
                updated_at: None,
            },
        ];

        assert!(collect_scopes(&rows).is_empty());

        let mut set = ScopeSet::new();
        assert!(!set.insert(&rows[0]));
        assert!(set.is_empty());
    }

    #[test]
    fn test_trim_and_case_fold_share_one_scope() {
        let rows = vec![
            ScopeRow::new("  Spring Hill ", "Drywall", None),
            ScopeRow::new("spring hill", "DRYWALL", Some("2024-02-02")),
        ];

        let scopes = collect_scopes(&rows);
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].city, "Spring Hill");
        assert_eq!(scopes[0].service, "Drywall");
        assert_eq!(scopes[0].last_modified, Some(date(2024, 2, 2)));
    }

    #[test]
    fn test_label_without_slug_characters_is_skipped() {
        let rows = vec![
            ScopeRow::new("!!!", "Plumbing", Some("2024-01-01")),
            ScopeRow::new("Nashville", "日本語", None),
            ScopeRow::new("Nashville", "Plumbing", None),
        ];

        let scopes = collect_scopes(&rows);
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].city, "Nashville");

        let mut set = ScopeSet::new();
        assert!(!set.insert(&rows[0]));
        assert!(!set.insert(&rows[1]));
        assert!(set.is_empty());
    }

    #[test]
    fn test_labels_with_the_same_slug_share_one_scope() {
        let rows = vec![
            ScopeRow::new("St. Louis", "Plumbing", Some("2024-01-01")),
            ScopeRow::new("St Louis", "Plumbing", Some("2024-05-01")),
            ScopeRow::new("st-louis", "plumbing", None),
        ];

        let scopes = collect_scopes(&rows);
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].city, "St. Louis");
        assert_eq!(scopes[0].last_modified, Some(date(2024, 5, 1)));
    }

    #[test]
    fn test_pairs_that_would_collide_when_joined_stay_distinct() {
        let rows = vec![
            ScopeRow::new("a|b", "c", None),
            ScopeRow::new("a", "b|c", None),
        ];
        assert_eq!(collect_scopes(&rows).len(), 2);
    }

    #[test]
    fn test_order_is_first_appearance() {
        let rows = vec![
            ScopeRow::new("Brentwood", "Painting", None),
            ScopeRow::new("Franklin", "Painting", None),
            ScopeRow::new("Brentwood", "Painting", None),
            ScopeRow::new("Antioch", "Painting", None),
        ];
        let cities: Vec<String> = collect_scopes(&rows).into_iter().map(|s| s.city).collect();
        assert_eq!(cities, vec!["Brentwood", "Franklin", "Antioch"]);
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-06-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T12:30:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01 12:30:00+00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01 12:30:00.000+00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T12:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01"), Some(date(2024, 6, 1)));
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }
}
