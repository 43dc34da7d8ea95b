//! Naming resolver.
//!
//! Turns the raw naming-convention block of a slice schema into a
//! [`NamingConvention`] holding every identifier form used by the renderers.
//! Resolution is pure: the same block always resolves to the same value.

use crate::codegen::types::{Endpoint, GenerationWarning, NamingConvention, QueryEndpoints};
use crate::codegen::utils::{is_ts_identifier, to_camel_case};
use crate::error::{GenerationError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Wire keys of the naming-convention block.
///
/// The defaults are the identifiers emitted by the upstream schema designer.
/// They are opaque; only their position (which case form they carry) matters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingKeys {
    pub plural_pascal: String,
    pub plural_lower: String,
    pub singular_pascal: String,
    /// Optional in the payload; derived when absent
    pub singular_lower: String,
    pub use_generate_folder: String,
}

impl Default for NamingKeys {
    fn default() -> Self {
        Self {
            plural_pascal: "Users_1_000___".to_string(),
            plural_lower: "users_2_000___".to_string(),
            singular_pascal: "User_3_000___".to_string(),
            singular_lower: "user_4_000___".to_string(),
            use_generate_folder: "use_generate_folder".to_string(),
        }
    }
}

fn folder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid folder regex"))
}

/// Whether `name` can be used as a single directory component
pub fn is_safe_folder_name(name: &str) -> bool {
    folder_regex().is_match(name)
}

/// Resolve the naming block into a full [`NamingConvention`].
///
/// Fails with [`GenerationError::MissingNamingField`] when a required key is
/// absent or empty. Supplied lower-case forms that disagree with the Pascal
/// forms are replaced and reported as warnings.
pub fn resolve_naming(
    block: &Map<String, Value>,
    keys: &NamingKeys,
) -> Result<(NamingConvention, Vec<GenerationWarning>)> {
    let mut warnings = Vec::new();

    let plural_pascal = pascal_value(block, &keys.plural_pascal, &mut warnings)?;
    let supplied_plural_lower = required_string(block, &keys.plural_lower)?;
    let singular_pascal = pascal_value(block, &keys.singular_pascal, &mut warnings)?;

    let plural_lower = plural_pascal.to_lowercase();
    if supplied_plural_lower != plural_lower {
        warnings.push(GenerationWarning::NamingCorrected {
            key: keys.plural_lower.clone(),
            supplied: supplied_plural_lower,
            resolved: plural_lower.clone(),
        });
    }

    let singular_lower = singular_pascal.to_lowercase();
    if let Some(supplied) = optional_string(block, &keys.singular_lower)? {
        if supplied != singular_lower {
            warnings.push(GenerationWarning::NamingCorrected {
                key: keys.singular_lower.clone(),
                supplied,
                resolved: singular_lower.clone(),
            });
        }
    }

    let folder_name = plural_lower.clone();
    if !is_safe_folder_name(&folder_name) {
        return Err(GenerationError::InvalidNamingValue {
            key: keys.plural_pascal.clone(),
            value: plural_pascal,
            reason: format!("'{}' is not a safe folder name", folder_name),
        });
    }

    let use_generate_folder = flag_value(block, &keys.use_generate_folder)?;

    let plural_camel = to_camel_case(&plural_pascal);
    let singular_camel = to_camel_case(&singular_pascal);

    Ok((
        NamingConvention {
            interface_name: format!("I{}", plural_pascal),
            default_const: format!("default{}", plural_pascal),
            store_hook: format!("use{}Store", plural_pascal),
            store_interface: format!("{}Store", plural_pascal),
            validate_fn: format!("validate{}", plural_pascal),
            api_slice: format!("{}Api", plural_camel),
            tag_type: format!("tagType{}", plural_pascal),
            model_name: plural_pascal.clone(),
            schema_const: format!("{}Schema", singular_camel),
            endpoints: endpoints_for(&plural_pascal),
            plural_pascal,
            singular_pascal,
            plural_lower,
            singular_lower,
            plural_camel,
            singular_camel,
            folder_name,
            use_generate_folder,
        },
        warnings,
    ))
}

fn endpoints_for(plural_pascal: &str) -> QueryEndpoints {
    let query = |verb: &str, suffix: &str| endpoint(verb, plural_pascal, suffix, "Query");
    let mutation = |verb: &str| endpoint(verb, plural_pascal, "", "Mutation");

    QueryEndpoints {
        list: query("get", ""),
        get_by_id: query("get", "ById"),
        summary: query("get", "Summary"),
        add: mutation("add"),
        update: mutation("update"),
        delete: mutation("delete"),
        bulk_update: mutation("bulkUpdate"),
        bulk_delete: mutation("bulkDelete"),
    }
}

fn endpoint(verb: &str, plural_pascal: &str, suffix: &str, kind: &str) -> Endpoint {
    let name = format!("{}{}{}", verb, plural_pascal, suffix);
    let mut chars = verb.chars();
    let verb_pascal: String = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };
    Endpoint {
        hook: format!("use{}{}{}{}", verb_pascal, plural_pascal, suffix, kind),
        name,
    }
}

fn required_string(block: &Map<String, Value>, key: &str) -> Result<String> {
    optional_string(block, key)?.ok_or_else(|| GenerationError::MissingNamingField {
        key: key.to_string(),
    })
}

fn optional_string(block: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match block.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(other) => Err(GenerationError::InvalidNamingValue {
            key: key.to_string(),
            value: other.to_string(),
            reason: "must be a string".to_string(),
        }),
    }
}

/// Read a Pascal-case value; a lowercase first letter is corrected with a warning
fn pascal_value(
    block: &Map<String, Value>,
    key: &str,
    warnings: &mut Vec<GenerationWarning>,
) -> Result<String> {
    let value = required_string(block, key)?;

    if !is_ts_identifier(&value) || value.contains('$') {
        return Err(GenerationError::InvalidNamingValue {
            key: key.to_string(),
            value,
            reason: "must be a valid identifier".to_string(),
        });
    }

    let mut chars = value.chars();
    let resolved = match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => value.clone(),
    };

    if resolved != value {
        warnings.push(GenerationWarning::NamingCorrected {
            key: key.to_string(),
            supplied: value,
            resolved: resolved.clone(),
        });
    }

    Ok(resolved)
}

fn flag_value(block: &Map<String, Value>, key: &str) -> Result<bool> {
    match block.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(true),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") || s.is_empty() => Ok(false),
        Some(other) => Err(GenerationError::InvalidNamingValue {
            key: key.to_string(),
            value: other.to_string(),
            reason: "must be a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn posts_block() -> Map<String, Value> {
        block(json!({
            "Users_1_000___": "Posts",
            "users_2_000___": "posts",
            "User_3_000___": "Post",
            "use_generate_folder": false
        }))
    }

    #[test]
    fn test_resolve_posts() {
        let (naming, warnings) = resolve_naming(&posts_block(), &NamingKeys::default()).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(naming.plural_pascal, "Posts");
        assert_eq!(naming.singular_pascal, "Post");
        assert_eq!(naming.plural_lower, "posts");
        assert_eq!(naming.singular_lower, "post");
        assert_eq!(naming.folder_name, "posts");
        assert_eq!(naming.interface_name, "IPosts");
        assert_eq!(naming.store_hook, "usePostsStore");
        assert_eq!(naming.api_slice, "postsApi");
        assert!(!naming.use_generate_folder);
    }

    #[test]
    fn test_endpoint_hooks() {
        let (naming, _) = resolve_naming(&posts_block(), &NamingKeys::default()).unwrap();
        let endpoints = &naming.endpoints;

        assert_eq!(endpoints.list.name, "getPosts");
        assert_eq!(endpoints.list.hook, "useGetPostsQuery");
        assert_eq!(endpoints.get_by_id.hook, "useGetPostsByIdQuery");
        assert_eq!(endpoints.summary.hook, "useGetPostsSummaryQuery");
        assert_eq!(endpoints.add.hook, "useAddPostsMutation");
        assert_eq!(endpoints.bulk_update.name, "bulkUpdatePosts");
        assert_eq!(endpoints.bulk_update.hook, "useBulkUpdatePostsMutation");
        assert_eq!(endpoints.bulk_delete.hook, "useBulkDeletePostsMutation");
    }

    #[test]
    fn test_camel_forms() {
        let mut b = posts_block();
        b.insert("Users_1_000___".into(), json!("BlogPosts"));
        b.insert("users_2_000___".into(), json!("blogposts"));
        b.insert("User_3_000___".into(), json!("BlogPost"));
        let (naming, warnings) = resolve_naming(&b, &NamingKeys::default()).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(naming.plural_camel, "blogPosts");
        assert_eq!(naming.api_slice, "blogPostsApi");
        assert_eq!(naming.folder_name, "blogposts");
    }

    #[test]
    fn test_missing_plural_pascal() {
        let mut b = posts_block();
        b.remove("Users_1_000___");
        let err = resolve_naming(&b, &NamingKeys::default()).unwrap_err();
        assert!(matches!(err, GenerationError::MissingNamingField { key } if key == "Users_1_000___"));
    }

    #[test]
    fn test_empty_value_is_missing() {
        let mut b = posts_block();
        b.insert("User_3_000___".into(), json!("  "));
        let err = resolve_naming(&b, &NamingKeys::default()).unwrap_err();
        assert!(matches!(err, GenerationError::MissingNamingField { key } if key == "User_3_000___"));
    }

    #[test]
    fn test_plural_lower_follows_pascal() {
        let mut b = posts_block();
        b.insert("users_2_000___".into(), json!("articles"));
        let (naming, warnings) = resolve_naming(&b, &NamingKeys::default()).unwrap();

        assert_eq!(naming.plural_lower, naming.plural_pascal.to_lowercase());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(&warnings[0], GenerationWarning::NamingCorrected { supplied, .. } if supplied == "articles"));
    }

    #[test]
    fn test_path_separator_rejected() {
        let mut b = posts_block();
        b.insert("Users_1_000___".into(), json!("../Posts"));
        let err = resolve_naming(&b, &NamingKeys::default()).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidNamingValue { .. }));
    }

    #[test]
    fn test_generate_folder_flag_variants() {
        let mut b = posts_block();
        b.insert("use_generate_folder".into(), json!("true"));
        assert!(resolve_naming(&b, &NamingKeys::default()).unwrap().0.use_generate_folder);

        b.remove("use_generate_folder");
        assert!(!resolve_naming(&b, &NamingKeys::default()).unwrap().0.use_generate_folder);

        b.insert("use_generate_folder".into(), json!(3));
        assert!(resolve_naming(&b, &NamingKeys::default()).is_err());
    }

    #[test]
    fn test_custom_keys() {
        let keys = NamingKeys {
            plural_pascal: "pluralPascal".into(),
            plural_lower: "pluralLower".into(),
            singular_pascal: "singularPascal".into(),
            ..NamingKeys::default()
        };
        let b = block(json!({"pluralPascal": "Tags", "pluralLower": "tags", "singularPascal": "Tag"}));
        let (naming, _) = resolve_naming(&b, &keys).unwrap();
        assert_eq!(naming.folder_name, "tags");
    }

    #[test]
    fn test_deterministic() {
        let first = resolve_naming(&posts_block(), &NamingKeys::default()).unwrap();
        let second = resolve_naming(&posts_block(), &NamingKeys::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_safe_folder_name() {
        assert!(is_safe_folder_name("posts"));
        assert!(is_safe_folder_name("blog-posts_2"));
        assert!(!is_safe_folder_name(".posts"));
        assert!(!is_safe_folder_name("a/b"));
        assert!(!is_safe_folder_name(""));
    }
}
