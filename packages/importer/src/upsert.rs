//! Write seed entries into the target backend.
//!
//! Single types are replaced with an unconditional PUT. Collection types
//! are matched against existing records by their first usable unique
//! field, then updated in place or created.

use serde_json::{json, Value};
use url::form_urlencoded;

use geosolutions_exporter::types::{ContentType, SeedDocument};

use crate::client::StrapiClient;
use crate::error::Result;
use crate::normalize::normalize_entry_for_write;
use crate::state::RunState;

/// Single types written with replace semantics, in write order.
pub const SINGLE_TYPES: [ContentType; 4] = [
    ContentType::Hero,
    ContentType::About,
    ContentType::ServicesPage,
    ContentType::SiteSetting,
];

/// Collection types reconciled by unique-field lookup, in write order.
pub const COLLECTION_TYPES: [ContentType; 3] =
    [ContentType::Team, ContentType::Project, ContentType::Document];

/// The field a collection entry can be matched on, with its trimmed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueField {
    pub key: &'static str,
    pub value: String,
}

/// First candidate field holding a non-empty string value.
#[must_use]
pub fn pick_unique_field(entry: &Value, candidates: &'static [&'static str]) -> Option<UniqueField> {
    for &key in candidates {
        if let Some(value) = entry.get(key).and_then(Value::as_str) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(UniqueField {
                    key,
                    value: trimmed.to_string(),
                });
            }
        }
    }
    None
}

fn unique_description(unique: Option<&UniqueField>) -> String {
    match unique {
        Some(field) => format!("{}=\"{}\"", field.key, field.value),
        None => "no unique field".to_string(),
    }
}

/// Look up an existing collection record by its unique field.
///
/// Queries with a page size of one, an id-only projection and
/// `publicationState=preview` so unpublished records still match.
pub fn find_existing_id(
    client: &StrapiClient,
    endpoint: &str,
    unique: &UniqueField,
) -> Result<Option<i64>> {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("pagination[pageSize]", "1")
        .append_pair("fields[0]", "id")
        .append_pair("publicationState", "preview")
        .append_pair(&format!("filters[{}][$eq]", unique.key), &unique.value)
        .finish();
    let response = client.get(&format!("/api/{endpoint}?{query}"))?;
    Ok(response
        .get("data")
        .and_then(Value::as_array)
        .and_then(|rows| rows.first())
        .and_then(|row| row.get("id"))
        .and_then(Value::as_i64))
}

/// Replace each single type that has a seed entry.
pub fn upsert_single_types(
    seed: &SeedDocument,
    client: &StrapiClient,
    state: &mut RunState,
) -> Result<()> {
    for content_type in SINGLE_TYPES {
        let rows = seed.data.entries_for(content_type)?;
        let Some(entry) = rows.first() else {
            continue;
        };
        let payload = normalize_entry_for_write(entry, content_type, client, state)?;

        if state.options.dry_run {
            println!("[dry-run] PUT /api/{}", content_type.endpoint());
            state.summary.single_updated += 1;
            continue;
        }

        client.put(
            &format!("/api/{}", content_type.endpoint()),
            &json!({ "data": payload }),
        )?;
        println!("Updated single type: {}", content_type.uid());
        state.summary.single_updated += 1;
    }
    Ok(())
}

/// Reconcile every collection entry: update when a unique field matches an
/// existing record, create otherwise.
pub fn upsert_collections(
    seed: &SeedDocument,
    client: &StrapiClient,
    state: &mut RunState,
) -> Result<()> {
    for content_type in COLLECTION_TYPES {
        for entry in seed.data.entries_for(content_type)? {
            let payload = normalize_entry_for_write(&entry, content_type, client, state)?;
            let unique = pick_unique_field(&payload, content_type.unique_candidates());
            let description = unique_description(unique.as_ref());

            if state.options.dry_run {
                println!(
                    "[dry-run] UPSERT /api/{} ({description})",
                    content_type.endpoint()
                );
                state.summary.collection_planned += 1;
                continue;
            }

            let existing_id = match &unique {
                Some(field) => find_existing_id(client, content_type.endpoint(), field)?,
                None => None,
            };

            if let Some(id) = existing_id {
                client.put(
                    &format!("/api/{}/{id}", content_type.endpoint()),
                    &json!({ "data": payload }),
                )?;
                println!("Updated {} id={id} ({description})", content_type.uid());
                state.summary.collection_updated += 1;
            } else {
                if unique.is_none() {
                    // No natural key means every re-run creates this entry again.
                    tracing::warn!(
                        uid = content_type.uid(),
                        "Creating entry without a unique field; re-runs will duplicate it"
                    );
                }
                client.post(
                    &format!("/api/{}", content_type.endpoint()),
                    &json!({ "data": payload }),
                )?;
                println!("Created {} ({description})", content_type.uid());
                state.summary.collection_created += 1;
            }
        }
    }
    Ok(())
}
