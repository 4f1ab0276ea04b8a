//! DOM helpers for scraping the legacy homepage.
//!
//! The legacy site is a server-rendered page with stable section ids, so
//! extraction works off parsed HTML rather than string matching. Block
//! boundaries survive as newlines so downstream normalization can keep
//! paragraphs apart.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::text::normalize_whitespace;

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static SECTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section[id]").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static FOOTER_DIV: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#footer").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static STYLED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[style]").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BACKGROUND_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)background-image:\s*url\('([^']+)'\)").expect("valid regex"));

/// First `section` element with the given id.
#[must_use]
pub fn section<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    doc.select(&SECTIONS).find(|el| el.value().id() == Some(id))
}

/// The footer container, a `div#footer` on the legacy layout.
#[must_use]
pub fn footer(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&FOOTER_DIV).next()
}

/// Flatten an element subtree to plain text.
///
/// Scripts and styles are skipped, `br` becomes a newline, closing `p` a
/// blank line and closing `li` a newline. Non-breaking spaces turn into
/// plain spaces before whitespace normalization.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(*element, &mut raw);
    normalize_whitespace(&raw.replace('\u{a0}', " "))
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            match element.name() {
                "script" | "style" => return,
                "br" => {
                    out.push('\n');
                    return;
                }
                _ => out.push(' '),
            }
            for child in node.children() {
                collect_text(child, out);
            }
            match element.name() {
                "p" => out.push_str("\n\n"),
                "li" => out.push('\n'),
                _ => out.push(' '),
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

/// Text of the first `tag` descendant, `None` when the tag is missing.
#[must_use]
pub fn first_text(fragment: ElementRef<'_>, tag: &str) -> Option<String> {
    let selector = Selector::parse(tag).ok()?;
    fragment.select(&selector).next().map(element_text)
}

/// Non-empty texts of every `tag` descendant, in document order.
#[must_use]
pub fn all_texts(fragment: ElementRef<'_>, tag: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };
    fragment
        .select(&selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// First anchor inside the fragment as `(text, href)`.
#[must_use]
pub fn first_link(fragment: ElementRef<'_>) -> Option<(String, String)> {
    let anchor = fragment.select(&LINKS).next()?;
    let href = anchor.value().attr("href").unwrap_or_default().to_string();
    Some((element_text(anchor), href))
}

/// Attribute values of every selector match inside the fragment.
#[must_use]
pub fn attr_values(fragment: ElementRef<'_>, selector_spec: &str, attr: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector_spec) else {
        return Vec::new();
    };
    fragment
        .select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::to_string)
        .collect()
}

/// CSS `background-image` URL from the fragment's own style attribute or
/// the first styled descendant carrying one.
#[must_use]
pub fn background_image_url(fragment: ElementRef<'_>) -> Option<String> {
    style_background(fragment.value().attr("style")).or_else(|| {
        fragment
            .select(&STYLED)
            .find_map(|el| style_background(el.value().attr("style")))
    })
}

fn style_background(style: Option<&str>) -> Option<String> {
    let captures = BACKGROUND_IMAGE.captures(style?)?;
    Some(captures[1].to_string())
}

/// Decode a Cloudflare-obfuscated email address.
///
/// The first hex byte is an XOR key for the rest. Anything that is not
/// plausibly an address comes back as `None`.
#[must_use]
pub fn decode_cfemail(encoded: &str) -> Option<String> {
    if !encoded.is_ascii() || encoded.len() < 4 || encoded.len() % 2 != 0 {
        return None;
    }
    let key = u8::from_str_radix(&encoded[0..2], 16).ok()?;
    let mut address = String::new();
    for index in (2..encoded.len()).step_by(2) {
        let byte = u8::from_str_radix(&encoded[index..index + 2], 16).ok()?;
        address.push(char::from(byte ^ key));
    }
    address.contains('@').then_some(address)
}
