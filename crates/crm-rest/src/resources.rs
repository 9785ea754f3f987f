//! Resource-name-to-endpoint mapping.
//!
//! Known resources map to their fixed REST collections; anything else falls
//! back to `/rest/{name}`.

/// Collection endpoint for a resource name. Accepts singular or plural forms.
pub fn endpoint_for(resource: &str) -> String {
    format!("/rest/{}", collection_key(resource))
}

/// Endpoint for one record of a resource.
pub fn record_endpoint(resource: &str, id: &str) -> String {
    format!("{}/{}", endpoint_for(resource), id)
}

/// The collection name the CRM uses for a resource, both in endpoint paths
/// and as the type-named key in search payloads.
pub fn collection_key(resource: &str) -> String {
    match resource {
        "company" | "companies" => "companies".to_string(),
        "person" | "people" => "people".to_string(),
        "opportunity" | "opportunities" => "opportunities".to_string(),
        "lead" | "leads" => "leads".to_string(),
        "task" | "tasks" => "tasks".to_string(),
        "project" | "projects" => "projects".to_string(),
        "activity" | "activities" => "activities".to_string(),
        other => other.to_string(),
    }
}
