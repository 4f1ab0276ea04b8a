//! Entry normalization before writing to the Strapi API.

use serde_json::Value;

use geosolutions_exporter::seed::{META_DESCRIPTION_CHARS, META_TITLE_CHARS};
use geosolutions_exporter::text::clamp_text;
use geosolutions_exporter::types::ContentType;

use crate::client::StrapiClient;
use crate::error::Result;
use crate::media::upload_media_if_needed;
use crate::state::RunState;

/// Clamp over-long SEO fields in place, returning how many were changed.
///
/// Seed bundles written before the exporter clamped these fields can carry
/// values the target schema rejects.
pub fn sanitize_seo_fields(entry: &mut Value) -> usize {
    let Some(seo) = entry.get_mut("seo").and_then(Value::as_object_mut) else {
        return 0;
    };
    let mut clamped = 0;
    for (key, max_chars) in [
        ("metaTitle", META_TITLE_CHARS),
        ("metaDescription", META_DESCRIPTION_CHARS),
    ] {
        if let Some(Value::String(text)) = seo.get_mut(key) {
            let next = clamp_text(text, max_chars);
            if next != *text {
                *text = next;
                clamped += 1;
            }
        }
    }
    clamped
}

/// Shape a seed entry into a Strapi write payload.
///
/// Drops the legacy id, clamps SEO fields, and replaces media objects with
/// uploaded asset ids (or null when the asset cannot be uploaded). Media
/// keys absent from the entry stay absent.
pub fn normalize_entry_for_write(
    entry: &Value,
    content_type: ContentType,
    client: &StrapiClient,
    state: &mut RunState,
) -> Result<Value> {
    let mut out = entry.clone();
    if let Some(object) = out.as_object_mut() {
        object.remove("id");
    }
    state.summary.seo_clamped += sanitize_seo_fields(&mut out);

    for field in content_type.media_fields() {
        let Some(media) = out.get(*field).cloned() else {
            continue;
        };
        let replacement = if media.is_object() {
            upload_media_if_needed(client, &media, content_type.uid(), field, state)?
                .map_or(Value::Null, Value::from)
        } else {
            Value::Null
        };
        if let Some(object) = out.as_object_mut() {
            object.insert((*field).to_string(), replacement);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sanitize_leaves_short_fields_alone() {
        let mut entry = json!({"seo": {"metaTitle": "Short", "metaDescription": "Fine"}});
        assert_eq!(sanitize_seo_fields(&mut entry), 0);
        assert_eq!(entry["seo"]["metaTitle"], "Short");
    }

    #[test]
    fn test_sanitize_clamps_long_title_and_description() {
        let mut entry = json!({
            "seo": {
                "metaTitle": "T".repeat(80),
                "metaDescription": "D".repeat(200),
            }
        });
        assert_eq!(sanitize_seo_fields(&mut entry), 2);
        let title = entry["seo"]["metaTitle"].as_str().unwrap();
        let description = entry["seo"]["metaDescription"].as_str().unwrap();
        assert_eq!(title.chars().count(), 60);
        assert!(title.ends_with("..."));
        assert_eq!(description.chars().count(), 160);
    }

    #[test]
    fn test_sanitize_ignores_missing_or_non_string_seo() {
        let mut no_seo = json!({"title": "x"});
        assert_eq!(sanitize_seo_fields(&mut no_seo), 0);

        let mut odd_seo = json!({"seo": {"metaTitle": 42}});
        assert_eq!(sanitize_seo_fields(&mut odd_seo), 0);
        assert_eq!(odd_seo["seo"]["metaTitle"], 42);
    }
}
