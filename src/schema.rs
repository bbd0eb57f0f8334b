use rmcp::model::JsonObject;
use rmcp::schemars::{self, JsonSchema, generate::SchemaSettings};
use std::sync::Arc;

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// so tool parameters are described in place instead of through $ref definitions,
/// which some MCP clients do not resolve.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let serde_json::Value::Object(json_object) = object else {
        panic!("Schema serialization produced non-object value");
    };

    Arc::new(json_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{GetDocRequest, SearchRequest};
    use assert2::{check, let_assert};

    #[test]
    fn test_search_schema_lists_parameters() {
        let schema = inline_schema_for_type::<SearchRequest>();
        let_assert!(Some(serde_json::Value::Object(properties)) = schema.get("properties"));
        check!(properties.contains_key("query"));
        check!(properties.contains_key("limit"));
    }

    #[test]
    fn test_get_doc_schema_requires_id() {
        let schema = inline_schema_for_type::<GetDocRequest>();
        let_assert!(Some(serde_json::Value::Array(required)) = schema.get("required"));
        check!(required.iter().any(|v| v == "id"));
    }
}
