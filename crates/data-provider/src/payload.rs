//! Request bodies for create calls.

use log::warn;
use models::resource::Resource;
use serde_json::{Map, Value};

/// Form fields for a teacher that the backend has no column for
pub const UNSUPPORTED_USER_FIELDS: [&str; 6] = [
    "address",
    "age",
    "gender",
    "joiningDate",
    "allocatedClasses",
    "allocatedDepartments",
];

/// Form field names renamed to their backend columns for users
const USER_FIELD_RENAMES: [(&str, &str); 2] =
    [("bannerUrl", "image"), ("bannerCldPubId", "imageCldPubId")];

/// Builds the body sent when creating a record of `resource`
///
/// Teacher forms (`users`/`teachers` carrying `bannerUrl`) are rewritten to
/// the backend's column names and lose the fields it cannot store. Every
/// other payload is sent unchanged.
pub fn build_body_params(resource: Resource, variables: Value) -> Value {
    match (resource, variables) {
        (Resource::Users | Resource::Teachers, Value::Object(fields))
            if fields.contains_key("bannerUrl") =>
        {
            Value::Object(map_user_fields(resource, fields))
        }
        (_, variables) => variables,
    }
}

fn map_user_fields(resource: Resource, mut fields: Map<String, Value>) -> Map<String, Value> {
    let dropped: Vec<&str> = UNSUPPORTED_USER_FIELDS
        .into_iter()
        .filter(|name| fields.remove(*name).is_some())
        .collect();

    if !dropped.is_empty() {
        warn!(
            "Not sending {} for {resource}: the backend has no place to store them",
            dropped.join(", ")
        );
    }

    for (from, to) in USER_FIELD_RENAMES {
        if let Some(value) = fields.remove(from) {
            fields.insert(to.to_string(), value);
        }
    }

    fields
}
