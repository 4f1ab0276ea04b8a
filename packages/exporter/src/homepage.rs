//! Homepage scraping: the HTML fallback for singleton content blocks.
//!
//! The legacy API never exposed the about text, service list, hero copy or
//! contact details, so those come off the rendered homepage. Extraction
//! never fails; anything missing degrades to an empty value and shows up in
//! the migration report instead.

use scraper::{ElementRef, Html};
use serde::Serialize;
use url::Url;

use crate::config::absolute_url;
use crate::extract;

/// Everything pulled from the rendered homepage in one pass.
///
/// Serialized as the `homepage-extracted.json` raw artifact.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageData {
    pub hero: HeroBlock,
    pub about: AboutBlock,
    pub services: ServicesBlock,
    pub team: TeamBlock,
    pub site_setting: SiteSettingBlock,
    pub contact_raw_emails: Vec<String>,
}

/// Hero copy and the banner painted by CSS.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBlock {
    pub heading: String,
    pub subheading: String,
    pub button_text: String,
    pub button_url: String,
    pub banner_url_from_html: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AboutBlock {
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesBlock {
    pub intro_text: String,
    pub service_items: Vec<String>,
}

/// Team member names in homepage display order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBlock {
    pub display_order_names: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingBlock {
    pub phone_number: String,
    pub primary_email: String,
    pub secondary_email: String,
    pub address: String,
    pub footer_tagline: String,
}

/// Scrape the homepage sections used as fallback content.
///
/// # Arguments
///
/// * `html` - Raw homepage markup
/// * `base_url` - Legacy site base, used to absolutize the banner URL
#[must_use]
pub fn extract_homepage(html: &str, base_url: &Url) -> HomepageData {
    let doc = Html::parse_document(html);

    let hero = extract::section(&doc, "hero");
    let about = extract::section(&doc, "about");
    let services = extract::section(&doc, "services");
    let team = extract::section(&doc, "team");
    let contact = extract::section(&doc, "contact");
    let footer = extract::footer(&doc);

    let (button_text, button_url) = hero.and_then(extract::first_link).unwrap_or_default();
    let banner_url_from_html = hero
        .and_then(extract::background_image_url)
        .and_then(|raw| absolute_url(&raw, base_url));

    let service_paragraphs = texts_in(services, "p");
    let service_items: Vec<String> = texts_in(services, "li")
        .into_iter()
        .map(|line| line.trim_start_matches('-').trim_start().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    let footer_paragraphs = texts_in(footer, "p");

    HomepageData {
        hero: HeroBlock {
            heading: text_in(hero, "h1"),
            subheading: text_in(hero, "h2"),
            button_text,
            button_url,
            banner_url_from_html,
        },
        about: AboutBlock {
            content: text_in(about, "p"),
        },
        services: ServicesBlock {
            intro_text: service_paragraphs.first().cloned().unwrap_or_default(),
            service_items,
        },
        team: TeamBlock {
            display_order_names: texts_in(team, "h3"),
        },
        site_setting: SiteSettingBlock {
            phone_number: phone_number(contact),
            primary_email: String::new(),
            secondary_email: String::new(),
            address: contact_address(contact),
            footer_tagline: footer_paragraphs.get(1).cloned().unwrap_or_default(),
        },
        contact_raw_emails: contact_emails(contact),
    }
    .with_emails_assigned()
}

impl HomepageData {
    /// The first two unique contact emails become the site settings.
    fn with_emails_assigned(mut self) -> Self {
        self.site_setting.primary_email =
            self.contact_raw_emails.first().cloned().unwrap_or_default();
        self.site_setting.secondary_email =
            self.contact_raw_emails.get(1).cloned().unwrap_or_default();
        self
    }
}

fn text_in(fragment: Option<ElementRef<'_>>, tag: &str) -> String {
    fragment
        .and_then(|el| extract::first_text(el, tag))
        .unwrap_or_default()
}

fn texts_in(fragment: Option<ElementRef<'_>>, tag: &str) -> Vec<String> {
    fragment
        .map(|el| extract::all_texts(el, tag))
        .unwrap_or_default()
}

fn phone_number(contact: Option<ElementRef<'_>>) -> String {
    let Some(fragment) = contact else {
        return String::new();
    };
    extract::attr_values(fragment, r#"a[href^="tel:"]"#, "href")
        .first()
        .and_then(|href| href.strip_prefix("tel:"))
        .unwrap_or_default()
        .to_string()
}

/// Mailto anchors first, Cloudflare-obfuscated spans second, deduplicated
/// in document order.
fn contact_emails(contact: Option<ElementRef<'_>>) -> Vec<String> {
    let Some(fragment) = contact else {
        return Vec::new();
    };
    let mut emails: Vec<String> = Vec::new();

    for href in extract::attr_values(fragment, r#"a[href^="mailto:"]"#, "href") {
        if let Some(address) = href.strip_prefix("mailto:") {
            push_unique(&mut emails, address.trim());
        }
    }
    for encoded in extract::attr_values(fragment, "[data-cfemail]", "data-cfemail") {
        if let Some(address) = extract::decode_cfemail(&encoded) {
            push_unique(&mut emails, &address);
        }
    }
    emails
}

fn push_unique(emails: &mut Vec<String>, address: &str) {
    if !address.is_empty() && !emails.iter().any(|known| known == address) {
        emails.push(address.to_string());
    }
}

/// Street address from the `q` parameter of an embedded maps iframe.
fn contact_address(contact: Option<ElementRef<'_>>) -> String {
    let Some(fragment) = contact else {
        return String::new();
    };
    extract::attr_values(fragment, "iframe[src]", "src")
        .into_iter()
        .next()
        .and_then(|src| map_query(&src))
        .unwrap_or_default()
}

fn map_query(src: &str) -> Option<String> {
    let url = Url::parse(src).ok()?;
    let (_, value) = url.query_pairs().find(|(key, _)| key == "q")?;
    Some(value.trim().to_string())
}
