//! Sitemap document construction.
//!
//! The home page is always listed first; every scope then contributes one
//! `/{city}/{service}` URL. Optional fields are left out of the XML entirely
//! rather than written as empty elements.

use crate::core::slug::slugify;
use crate::domain::model::{ChangeFrequency, Scope, SitemapDocument, SitemapEntry};
use crate::utils::error::{DirectoryError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub const HOME_PRIORITY: f32 = 1.0;
pub const SCOPE_PRIORITY: f32 = 0.8;

/// Builds the entry list: home page followed by one entry per scope.
pub fn build_entries(base_url: &str, scopes: &[Scope]) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    let mut entries = Vec::with_capacity(scopes.len() + 1);

    entries.push(SitemapEntry {
        location: format!("{}/", base),
        last_modified: None,
        change_frequency: Some(ChangeFrequency::Daily),
        priority: Some(HOME_PRIORITY),
    });

    for scope in scopes {
        entries.push(SitemapEntry {
            location: format!(
                "{}/{}/{}",
                base,
                slugify(&scope.city),
                slugify(&scope.service)
            ),
            last_modified: scope.last_modified.map(|ts| ts.date_naive()),
            change_frequency: Some(ChangeFrequency::Daily),
            priority: Some(SCOPE_PRIORITY),
        });
    }

    entries
}

pub fn render_entries(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
    ))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.location)?;
        if let Some(date) = entry.last_modified {
            write_text_element(&mut writer, "lastmod", &date.format("%Y-%m-%d").to_string())?;
        }
        if let Some(frequency) = entry.change_frequency {
            write_text_element(&mut writer, "changefreq", frequency.as_str())?;
        }
        if let Some(priority) = entry.priority {
            write_text_element(&mut writer, "priority", &format!("{:.1}", priority))?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| DirectoryError::ProcessingError {
        message: format!("sitemap is not valid UTF-8: {}", e),
    })
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Renders the full sitemap for `scopes` under `base_url`.
pub fn render_sitemap(base_url: &str, scopes: &[Scope]) -> Result<SitemapDocument> {
    let entries = build_entries(base_url, scopes);
    let xml = render_entries(&entries)?;
    Ok(SitemapDocument {
        xml,
        url_count: entries.len(),
    })
}
