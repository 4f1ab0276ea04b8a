//! Grant public read access to the migrated content types.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::client::StrapiClient;
use crate::error::Result;

/// Actions to enable on the Public role, as (namespace, controller, action).
pub const PUBLIC_PERMISSIONS: [(&str, &str, &str); 14] = [
    // Single types
    ("api::hero", "hero", "find"),
    ("api::about", "about", "find"),
    ("api::services-page", "services-page", "find"),
    ("api::site-setting", "site-setting", "find"),
    // Collection types
    ("api::team", "team", "find"),
    ("api::team", "team", "findOne"),
    ("api::project", "project", "find"),
    ("api::project", "project", "findOne"),
    ("api::document", "document", "find"),
    ("api::document", "document", "findOne"),
    ("api::testimonial", "testimonial", "find"),
    ("api::testimonial", "testimonial", "findOne"),
    // Upload plugin, so media files are served
    ("plugin::upload", "content-api", "find"),
    ("plugin::upload", "content-api", "findOne"),
];

#[derive(Debug, Default, Deserialize)]
struct RolesResponse {
    #[serde(default)]
    roles: Vec<RoleSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RoleSummary {
    id: Option<i64>,
    #[serde(rename = "type")]
    role_type: String,
}

/// Force `key` to hold an object and return it for mutation.
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    entry.as_object_mut()
}

/// Switch one action on inside a role's permission tree.
fn enable_action(permissions: &mut Map<String, Value>, namespace: &str, controller: &str, action: &str) {
    let Some(namespace_map) = object_entry(permissions, namespace) else {
        return;
    };
    let Some(controllers) = object_entry(namespace_map, "controllers") else {
        return;
    };
    let Some(controller_map) = object_entry(controllers, controller) else {
        return;
    };
    controller_map.insert(action.to_string(), json!({ "enabled": true, "policy": "" }));
}

/// Enable the public read allow-list on the backend's Public role.
///
/// Additive only: existing permissions are carried over untouched. A
/// backend without a public role is tolerated with a warning.
pub fn configure_public_permissions(client: &StrapiClient, dry_run: bool) -> Result<()> {
    println!("\nConfiguring public role permissions...");

    if dry_run {
        println!("  [dry-run] Would enable the following public permissions:");
        for (namespace, controller, action) in PUBLIC_PERMISSIONS {
            println!("    {namespace}.{controller}.{action}");
        }
        return Ok(());
    }

    let roles: RolesResponse = serde_json::from_value(client.get("/api/users-permissions/roles")?)?;
    let public_role_id = roles
        .roles
        .iter()
        .find(|role| role.role_type == "public")
        .and_then(|role| role.id);
    let Some(role_id) = public_role_id else {
        println!("  Could not find Public role, skipping permissions config.");
        tracing::warn!("No role with type \"public\" on the target backend");
        return Ok(());
    };

    let role = client.get(&format!("/api/users-permissions/roles/{role_id}"))?;
    let mut permissions = role
        .pointer("/role/permissions")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    for (namespace, controller, action) in PUBLIC_PERMISSIONS {
        enable_action(&mut permissions, namespace, controller, action);
    }

    client.put(
        &format!("/api/users-permissions/roles/{role_id}"),
        &json!({ "permissions": permissions }),
    )?;
    println!(
        "  Enabled {} public permissions on role id={role_id}.",
        PUBLIC_PERMISSIONS.len()
    );
    Ok(())
}
