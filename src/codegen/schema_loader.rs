//! JSON slice-schema loader.
//!
//! Parses the payload submitted by the schema designer into a field list and
//! the raw naming-convention block. Only the shape is checked here; field type
//! tags are interpreted later by the classifier.

use crate::codegen::types::FieldSpec;
use crate::error::{GenerationError, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Key of the naming-convention block in the payload
pub const NAMING_BLOCK_KEY: &str = "namingConvention";
/// Key of the field list in the payload
pub const FIELDS_KEY: &str = "fields";
/// Members every generated record already carries (document id and timestamps)
pub const RESERVED_FIELD_NAMES: [&str; 3] = ["_id", "createdAt", "updatedAt"];

/// Parsed, not yet resolved, slice schema
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub fields: Vec<FieldSpec>,
    pub naming_block: Map<String, Value>,
    /// The payload exactly as parsed, persisted later as `slice-schema.json`
    pub raw: Value,
}

/// Parse schema JSON text
///
/// # Example
///
/// ```
/// use template_generator::codegen::schema_loader::parse_schema;
///
/// let loaded = parse_schema(r#"{
///     "namingConvention": {"Users_1_000___": "Posts", "users_2_000___": "posts", "User_3_000___": "Post"},
///     "fields": [{"name": "title", "type": "STRING"}]
/// }"#).unwrap();
/// assert_eq!(loaded.fields.len(), 1);
/// ```
pub fn parse_schema(json: &str) -> Result<LoadedSchema> {
    let raw: Value = serde_json::from_str(json)
        .map_err(|e| GenerationError::SchemaParse(format!("invalid JSON: {}", e)))?;

    from_value(raw)
}

/// Build a [`LoadedSchema`] from an already-decoded JSON value
pub fn from_value(raw: Value) -> Result<LoadedSchema> {
    let root = raw
        .as_object()
        .ok_or_else(|| GenerationError::SchemaParse("schema must be a JSON object".to_string()))?;

    let naming_block = match root.get(NAMING_BLOCK_KEY) {
        Some(Value::Object(block)) => block.clone(),
        Some(_) => {
            return Err(GenerationError::SchemaParse(format!(
                "'{}' must be an object",
                NAMING_BLOCK_KEY
            )))
        }
        None => {
            return Err(GenerationError::SchemaParse(format!(
                "missing '{}' block",
                NAMING_BLOCK_KEY
            )))
        }
    };

    let fields = match root.get(FIELDS_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => parse_fields(items)?,
        Some(_) => {
            return Err(GenerationError::SchemaParse(format!(
                "'{}' must be an array",
                FIELDS_KEY
            )))
        }
    };

    Ok(LoadedSchema {
        fields,
        naming_block,
        raw,
    })
}

fn parse_fields(items: &[Value]) -> Result<Vec<FieldSpec>> {
    let mut fields = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let field: FieldSpec = serde_json::from_value(normalize_field(item))
            .map_err(|e| GenerationError::SchemaParse(format!("field #{}: {}", index, e)))?;

        if field.name.trim().is_empty() {
            return Err(GenerationError::SchemaParse(format!(
                "field #{} has an empty name",
                index
            )));
        }
        if RESERVED_FIELD_NAMES.contains(&field.name.as_str()) {
            return Err(GenerationError::SchemaParse(format!(
                "field name '{}' is reserved",
                field.name
            )));
        }
        if !seen.insert(field.name.clone()) {
            return Err(GenerationError::SchemaParse(format!(
                "duplicate field name '{}'",
                field.name
            )));
        }

        fields.push(field);
    }

    Ok(fields)
}

/// Coerce the optional attributes of a field into their expected shape.
///
/// A missing or non-string `type` becomes a string tag the classifier will
/// degrade; non-string options are dropped and a non-bool `required` is
/// treated as absent.
fn normalize_field(item: &Value) -> Value {
    let mut item = item.clone();
    if let Value::Object(map) = &mut item {
        let tag = match map.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };
        map.insert("type".to_string(), Value::String(tag));

        let options_ok = match map.get_mut("options") {
            Some(Value::Array(options)) => {
                options.retain(Value::is_string);
                true
            }
            Some(_) => false,
            None => true,
        };
        if !options_ok {
            map.remove("options");
        }

        if !matches!(map.get("required"), Some(Value::Bool(_))) {
            map.remove("required");
        }
    }
    item
}

/// Extract the schema text from an inbound request body `{ "data": "<json>" }`.
///
/// `data` is normally a JSON-encoded string; an inline object is accepted too.
pub fn extract_request_data(body: &str) -> Result<String> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| GenerationError::SchemaParse(format!("invalid request body: {}", e)))?;

    match envelope.get("data") {
        Some(Value::String(data)) => Ok(data.clone()),
        Some(value @ Value::Object(_)) => Ok(value.to_string()),
        Some(_) => Err(GenerationError::SchemaParse(
            "'data' must be a JSON string".to_string(),
        )),
        None => Err(GenerationError::SchemaParse(
            "request body has no 'data' field".to_string(),
        )),
    }
}

/// Read schema text from a file on disk
pub fn read_schema_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        GenerationError::SchemaParse(format!("failed to read {}: {}", path.display(), e))
    })
}
