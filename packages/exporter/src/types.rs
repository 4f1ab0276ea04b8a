//! Core data types: content types, entries and the versioned seed document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The content types known to the migration.
///
/// [`ContentType::Testimonial`] never carries exported data; it exists so
/// the importer's permission grants can reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Hero,
    About,
    ServicesPage,
    SiteSetting,
    Team,
    Project,
    Document,
    Testimonial,
}

impl ContentType {
    /// Strapi uid, e.g. `api::hero.hero`.
    #[must_use]
    pub const fn uid(self) -> &'static str {
        match self {
            Self::Hero => "api::hero.hero",
            Self::About => "api::about.about",
            Self::ServicesPage => "api::services-page.services-page",
            Self::SiteSetting => "api::site-setting.site-setting",
            Self::Team => "api::team.team",
            Self::Project => "api::project.project",
            Self::Document => "api::document.document",
            Self::Testimonial => "api::testimonial.testimonial",
        }
    }

    /// REST path segment on the target backend.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::ServicesPage => "services-page",
            Self::SiteSetting => "site-setting",
            Self::Team => "teams",
            Self::Project => "projects",
            Self::Document => "documents",
            Self::Testimonial => "testimonials",
        }
    }

    /// Whether the target backend models this as a single type or a collection.
    #[must_use]
    pub const fn kind(self) -> ContentKind {
        match self {
            Self::Hero | Self::About | Self::ServicesPage | Self::SiteSetting => ContentKind::Single,
            Self::Team | Self::Project | Self::Document | Self::Testimonial => {
                ContentKind::Collection
            }
        }
    }

    /// Media relation fields carried by entries of this type.
    #[must_use]
    pub const fn media_fields(self) -> &'static [&'static str] {
        match self {
            Self::Hero => &["Banner"],
            Self::Team => &["image"],
            Self::Project => &["thumbnail", "beforePhoto", "afterPhoto"],
            Self::Document => &["file"],
            _ => &[],
        }
    }

    /// Fields usable to match an existing collection entry, in preference order.
    #[must_use]
    pub const fn unique_candidates(self) -> &'static [&'static str] {
        match self {
            Self::Team => &["email", "name"],
            Self::Project => &["title"],
            Self::Document => &["url", "title"],
            _ => &[],
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.uid())
    }
}

/// Single type vs collection type on the target backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Single,
    Collection,
}

/// A media relation flattened out of the legacy API or synthesized from HTML.
///
/// All keys serialize even when empty so downstream tooling sees a stable
/// shape; `url` is `None` when the legacy record carried no usable source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaRef {
    pub name: String,
    pub alternative_text: Option<String>,
    pub caption: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub url: Option<String>,
}

/// SEO block attached to several entry types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seo {
    pub meta_title: String,
    pub meta_description: String,
}

/// Hero banner single type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The legacy schema capitalizes this one field.
    #[serde(rename = "Banner")]
    pub banner: Option<MediaRef>,
    pub heading: String,
    pub subheading: String,
    pub button_text: String,
    pub button_url: String,
    pub button_enabled: bool,
    pub button_text2: String,
    pub button_url2: String,
    pub button_enabled2: bool,
    pub published_at: Option<String>,
}

/// About page single type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub content: String,
    pub seo: Seo,
    pub published_at: Option<String>,
}

/// Services page single type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicesPageEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub intro_text: String,
    pub service_items: Vec<ServiceItem>,
    pub published_at: Option<String>,
}

/// One labelled row inside the services page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceItem {
    pub label: String,
}

/// Site-wide contact settings single type. The one type without a
/// `publishedAt` stamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettingEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub footer_tagline: String,
    pub phone_number: String,
    pub primary_email: String,
    pub secondary_email: String,
    pub address: String,
}

/// Team member collection entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub role: String,
    pub email: String,
    pub image: Option<MediaRef>,
    pub bio: String,
    pub order: u32,
    pub published_at: Option<String>,
}

/// Project collection entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub thumbnail: Option<MediaRef>,
    pub before_photo: Option<MediaRef>,
    pub after_photo: Option<MediaRef>,
    pub seo: Seo,
    pub published_at: Option<String>,
}

/// Downloadable document collection entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub file: Option<MediaRef>,
    pub url: String,
    pub seo: Seo,
    pub published_at: Option<String>,
}

/// Entries per content type, keyed by uid in the serialized form.
///
/// Every key is written even when its list is empty, so a seed consumer can
/// rely on the full shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    #[serde(rename = "api::hero.hero")]
    pub heroes: Vec<HeroEntry>,
    #[serde(rename = "api::about.about")]
    pub abouts: Vec<AboutEntry>,
    #[serde(rename = "api::services-page.services-page")]
    pub services_pages: Vec<ServicesPageEntry>,
    #[serde(rename = "api::site-setting.site-setting")]
    pub site_settings: Vec<SiteSettingEntry>,
    #[serde(rename = "api::team.team")]
    pub teams: Vec<TeamEntry>,
    #[serde(rename = "api::project.project")]
    pub projects: Vec<ProjectEntry>,
    #[serde(rename = "api::document.document")]
    pub documents: Vec<DocumentEntry>,
}

impl SeedData {
    /// Number of entries held for one content type.
    #[must_use]
    pub fn count(&self, content_type: ContentType) -> usize {
        match content_type {
            ContentType::Hero => self.heroes.len(),
            ContentType::About => self.abouts.len(),
            ContentType::ServicesPage => self.services_pages.len(),
            ContentType::SiteSetting => self.site_settings.len(),
            ContentType::Team => self.teams.len(),
            ContentType::Project => self.projects.len(),
            ContentType::Document => self.documents.len(),
            ContentType::Testimonial => 0,
        }
    }

    /// Entries for one content type as raw JSON objects.
    ///
    /// The importer works on JSON values so it can strip ids and swap media
    /// objects for uploaded asset ids without caring about the entry shape.
    ///
    /// # Errors
    ///
    /// Returns an error when an entry fails to serialize.
    pub fn entries_for(&self, content_type: ContentType) -> serde_json::Result<Vec<Value>> {
        fn rows<T: Serialize>(items: &[T]) -> serde_json::Result<Vec<Value>> {
            items.iter().map(serde_json::to_value).collect()
        }
        match content_type {
            ContentType::Hero => rows(&self.heroes),
            ContentType::About => rows(&self.abouts),
            ContentType::ServicesPage => rows(&self.services_pages),
            ContentType::SiteSetting => rows(&self.site_settings),
            ContentType::Team => rows(&self.teams),
            ContentType::Project => rows(&self.projects),
            ContentType::Document => rows(&self.documents),
            ContentType::Testimonial => Ok(Vec::new()),
        }
    }
}

/// Provenance block of the seed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedSource {
    pub base_url: String,
    pub extracted_at: String,
    pub strategy: String,
}

/// Versioned seed bundle tying provenance and per-type entries together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedDocument {
    pub version: u32,
    pub source: SeedSource,
    pub data: SeedData,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_uid_and_endpoint_pairing() {
        assert_eq!(ContentType::Hero.uid(), "api::hero.hero");
        assert_eq!(ContentType::Hero.endpoint(), "hero");
        assert_eq!(ContentType::ServicesPage.endpoint(), "services-page");
        assert_eq!(ContentType::Team.endpoint(), "teams");
    }

    #[test]
    fn test_kind_split() {
        assert_eq!(ContentType::SiteSetting.kind(), ContentKind::Single);
        assert_eq!(ContentType::Document.kind(), ContentKind::Collection);
    }

    #[test]
    fn test_media_fields_per_type() {
        assert_eq!(
            ContentType::Project.media_fields(),
            &["thumbnail", "beforePhoto", "afterPhoto"]
        );
        assert!(ContentType::About.media_fields().is_empty());
    }

    #[test]
    fn test_unique_candidates_order() {
        assert_eq!(ContentType::Team.unique_candidates(), &["email", "name"]);
        assert_eq!(ContentType::Document.unique_candidates(), &["url", "title"]);
        assert!(ContentType::Hero.unique_candidates().is_empty());
    }

    #[test]
    fn test_hero_serializes_capitalized_banner() {
        let hero = HeroEntry {
            id: Some(1),
            banner: Some(MediaRef {
                name: "banner.jpg".to_string(),
                url: Some("https://example.test/banner.jpg".to_string()),
                ..MediaRef::default()
            }),
            heading: "Kia ora".to_string(),
            ..HeroEntry::default()
        };
        let value = serde_json::to_value(&hero).unwrap();
        assert!(value.get("Banner").is_some());
        assert!(value.get("banner").is_none());
        assert_eq!(value["buttonEnabled"], json!(false));
    }

    #[test]
    fn test_media_ref_serializes_all_keys() {
        let media = MediaRef {
            name: "x.png".to_string(),
            ..MediaRef::default()
        };
        let value = serde_json::to_value(&media).unwrap();
        let object = value.as_object().unwrap();
        for key in ["name", "alternativeText", "caption", "width", "height", "url"] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(value["url"], json!(null));
    }

    #[test]
    fn test_entry_without_id_omits_the_key() {
        let entry = TeamEntry {
            name: "Aroha Ngata".to_string(),
            ..TeamEntry::default()
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["bio"], json!(""));
    }

    #[test]
    fn test_seed_data_always_writes_every_uid_key() {
        let value = serde_json::to_value(SeedData::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert!(object.contains_key("api::site-setting.site-setting"));
        assert_eq!(value["api::project.project"], json!([]));
    }

    #[test]
    fn test_seed_document_round_trip() {
        let document = SeedDocument {
            version: 2,
            source: SeedSource {
                base_url: "https://geosolutions.nz/".to_string(),
                extracted_at: "2025-06-01T02:03:04.000Z".to_string(),
                strategy: "test".to_string(),
            },
            data: SeedData {
                projects: vec![ProjectEntry {
                    id: Some(4),
                    title: "Harbour upgrade".to_string(),
                    ..ProjectEntry::default()
                }],
                ..SeedData::default()
            },
        };
        let raw = serde_json::to_string(&document).unwrap();
        let back: SeedDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn test_seed_data_tolerates_missing_keys() {
        let data: SeedData = serde_json::from_value(json!({
            "api::team.team": [{ "name": "Aroha Ngata" }]
        }))
        .unwrap();
        assert_eq!(data.teams.len(), 1);
        assert!(data.projects.is_empty());
    }

    #[test]
    fn test_entries_for_returns_raw_objects() {
        let data = SeedData {
            teams: vec![TeamEntry {
                name: "Aroha Ngata".to_string(),
                order: 3,
                ..TeamEntry::default()
            }],
            ..SeedData::default()
        };
        let rows = data.entries_for(ContentType::Team).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], json!("Aroha Ngata"));
        assert_eq!(rows[0]["order"], json!(3));
        assert!(data.entries_for(ContentType::Testimonial).unwrap().is_empty());
    }

    #[test]
    fn test_counts_follow_data() {
        let data = SeedData {
            documents: vec![DocumentEntry::default(), DocumentEntry::default()],
            ..SeedData::default()
        };
        assert_eq!(data.count(ContentType::Document), 2);
        assert_eq!(data.count(ContentType::Hero), 0);
    }
}
