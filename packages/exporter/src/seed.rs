//! Seed assembly: turn fetched collections and homepage fallbacks into the
//! versioned seed document.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use url::Url;

use crate::config::absolute_url;
use crate::fetch::ApiItem;
use crate::homepage::HomepageData;
use crate::text::{clamp_text, normalize_whitespace};
use crate::types::{
    AboutEntry, DocumentEntry, HeroEntry, MediaRef, ProjectEntry, SeedData, SeedDocument,
    SeedSource, Seo, ServiceItem, ServicesPageEntry, SiteSettingEntry, TeamEntry,
};

/// Current seed document version.
pub const SEED_VERSION: u32 = 2;

/// Strategy sentence recorded in every seed document.
pub const SEED_STRATEGY: &str =
    "API-first (Strapi public endpoints) with homepage HTML fallback for singleton text blocks.";

/// Character limit for `seo.metaTitle`.
pub const META_TITLE_CHARS: usize = 60;

/// Character limit for `seo.metaDescription`.
pub const META_DESCRIPTION_CHARS: usize = 160;

/// UTC timestamp in the millisecond ISO form the target backend uses.
#[must_use]
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fetched collection rows by type, borrowed from the fetch outcomes.
#[derive(Debug, Default)]
pub struct FetchedRows<'a> {
    pub heroes: &'a [ApiItem],
    pub teams: &'a [ApiItem],
    pub projects: &'a [ApiItem],
    pub documents: &'a [ApiItem],
}

/// Assemble the seed document from everything the export gathered.
#[must_use]
pub fn build_seed(base_url: &Url, rows: &FetchedRows<'_>, homepage: &HomepageData) -> SeedDocument {
    SeedDocument {
        version: SEED_VERSION,
        source: SeedSource {
            base_url: base_url.to_string(),
            extracted_at: now_iso(),
            strategy: SEED_STRATEGY.to_string(),
        },
        data: SeedData {
            heroes: vec![hero_entry(rows.heroes.first(), homepage, base_url)],
            abouts: vec![about_entry(homepage)],
            services_pages: vec![services_page_entry(homepage)],
            site_settings: vec![site_setting_entry(homepage)],
            teams: team_entries(rows.teams, homepage, base_url),
            projects: project_entries(rows.projects, base_url),
            documents: document_entries(rows.documents, base_url),
        },
    }
}

fn attr_str(attrs: &Value, key: &str) -> String {
    attrs
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn attr_opt_str(attrs: &Value, key: &str) -> Option<String> {
    attrs.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Publish stamp: the legacy value when present, otherwise now.
fn published_at(attrs: &Value) -> Option<String> {
    Some(attr_opt_str(attrs, "publishedAt").unwrap_or_else(now_iso))
}

/// Flatten a populated legacy media relation, absolutizing its URL.
fn media_ref(attrs: &Value, field: &str, base_url: &Url) -> Option<MediaRef> {
    let media = attrs.get(field)?.get("data")?.get("attributes")?;
    Some(MediaRef {
        name: attr_str(media, "name"),
        alternative_text: attr_opt_str(media, "alternativeText"),
        caption: attr_opt_str(media, "caption"),
        width: media.get("width").and_then(Value::as_i64),
        height: media.get("height").and_then(Value::as_i64),
        url: media
            .get("url")
            .and_then(Value::as_str)
            .and_then(|raw| absolute_url(raw, base_url)),
    })
}

/// Hero copy comes from the homepage HTML; the legacy hero record only
/// contributes its id, banner and publish date.
fn hero_entry(item: Option<&ApiItem>, homepage: &HomepageData, base_url: &Url) -> HeroEntry {
    let attrs = item.map_or(&Value::Null, |row| &row.attributes);
    let hero = &homepage.hero;

    HeroEntry {
        id: Some(item.and_then(|row| row.id).unwrap_or(1)),
        banner: media_ref(attrs, "Banner", base_url).or_else(|| Some(fallback_banner(homepage))),
        heading: hero.heading.clone(),
        subheading: hero.subheading.clone(),
        button_text: hero.button_text.clone(),
        button_url: hero.button_url.clone(),
        button_enabled: !hero.button_text.is_empty() && !hero.button_url.is_empty(),
        button_text2: String::new(),
        button_url2: String::new(),
        button_enabled2: false,
        published_at: published_at(attrs),
    }
}

/// Banner synthesized from the homepage background image when the legacy
/// record carries none. The URL may still be absent; the importer skips it.
fn fallback_banner(homepage: &HomepageData) -> MediaRef {
    let name = homepage
        .hero
        .banner_url_from_html
        .as_deref()
        .and_then(url_basename)
        .unwrap_or_else(|| "hero-banner.jpg".to_string());
    MediaRef {
        name,
        alternative_text: Some("Hero banner".to_string()),
        url: homepage.hero.banner_url_from_html.clone(),
        ..MediaRef::default()
    }
}

fn url_basename(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let name = parsed.path_segments()?.next_back()?.to_string();
    (!name.is_empty()).then_some(name)
}

fn about_entry(homepage: &HomepageData) -> AboutEntry {
    let content = homepage.about.content.clone();
    AboutEntry {
        id: Some(1),
        seo: Seo {
            meta_title: "About GeoSolutions".to_string(),
            meta_description: clamp_text(&content, META_DESCRIPTION_CHARS),
        },
        content,
        published_at: Some(now_iso()),
    }
}

fn services_page_entry(homepage: &HomepageData) -> ServicesPageEntry {
    ServicesPageEntry {
        id: Some(1),
        intro_text: homepage.services.intro_text.clone(),
        service_items: homepage
            .services
            .service_items
            .iter()
            .map(|label| ServiceItem {
                label: label.clone(),
            })
            .collect(),
        published_at: Some(now_iso()),
    }
}

fn site_setting_entry(homepage: &HomepageData) -> SiteSettingEntry {
    let block = &homepage.site_setting;
    SiteSettingEntry {
        id: Some(1),
        footer_tagline: block.footer_tagline.clone(),
        phone_number: block.phone_number.clone(),
        primary_email: block.primary_email.clone(),
        secondary_email: block.secondary_email.clone(),
        address: block.address.clone(),
    }
}

/// Team rows sorted by their position in the homepage display order. Names
/// missing from the homepage keep their API position; bios were never
/// public and stay blank.
fn team_entries(items: &[ApiItem], homepage: &HomepageData, base_url: &Url) -> Vec<TeamEntry> {
    let order_by_name: HashMap<String, u32> = homepage
        .team
        .display_order_names
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_lowercase(), index as u32))
        .collect();

    let mut rows: Vec<TeamEntry> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let attrs = &item.attributes;
            let name = attr_str(attrs, "name").trim().to_string();
            let order = order_by_name
                .get(&name.to_lowercase())
                .copied()
                .unwrap_or(index as u32);
            TeamEntry {
                id: item.id,
                name,
                role: attr_str(attrs, "role"),
                email: attr_str(attrs, "email"),
                image: media_ref(attrs, "image", base_url),
                bio: String::new(),
                order,
                published_at: published_at(attrs),
            }
        })
        .collect();

    rows.sort_by_key(|row| row.order);
    rows
}

fn project_entries(items: &[ApiItem], base_url: &Url) -> Vec<ProjectEntry> {
    items
        .iter()
        .map(|item| {
            let attrs = &item.attributes;
            let title = attr_str(attrs, "title");
            let description = normalize_whitespace(&attr_str(attrs, "description"));
            ProjectEntry {
                id: item.id,
                seo: Seo {
                    meta_title: clamp_text(&title, META_TITLE_CHARS),
                    meta_description: clamp_text(&description, META_DESCRIPTION_CHARS),
                },
                start_date: attr_opt_str(attrs, "startDate"),
                end_date: attr_opt_str(attrs, "endDate"),
                thumbnail: media_ref(attrs, "thumbnail", base_url),
                before_photo: media_ref(attrs, "beforePhoto", base_url),
                after_photo: media_ref(attrs, "afterPhoto", base_url),
                published_at: published_at(attrs),
                title,
                description,
            }
        })
        .collect()
}

fn document_entries(items: &[ApiItem], base_url: &Url) -> Vec<DocumentEntry> {
    items
        .iter()
        .map(|item| {
            let attrs = &item.attributes;
            let title = attr_str(attrs, "title");
            let description = normalize_whitespace(&attr_str(attrs, "description"));
            DocumentEntry {
                id: item.id,
                seo: Seo {
                    meta_title: clamp_text(&title, META_TITLE_CHARS),
                    meta_description: clamp_text(&description, META_DESCRIPTION_CHARS),
                },
                file: media_ref(attrs, "file", base_url),
                url: attr_str(attrs, "url"),
                published_at: published_at(attrs),
                title,
                description,
            }
        })
        .collect()
}
