//! Type definitions for the entity schema and generated output.
//!
//! These types represent the structure of the incoming slice schema
//! and are shared by every stage of code generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One entity attribute as declared by the schema designer
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    /// Raw type tag, e.g. `STRING`, `EMAIL`, `SELECT`. Interpreted by the classifier.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            options: None,
            required: None,
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// Fully resolved identifier forms for one entity.
///
/// Produced once by [`crate::codegen::naming::resolve_naming`]. Renderers read
/// identifiers from here and never derive casing on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingConvention {
    /// `Posts`
    pub plural_pascal: String,
    /// `Post`
    pub singular_pascal: String,
    /// `posts`, always the lowercase of `plural_pascal`
    pub plural_lower: String,
    /// `post`
    pub singular_lower: String,
    /// `posts` for `Posts`, `blogPosts` for `BlogPosts`
    pub plural_camel: String,
    pub singular_camel: String,
    /// Directory name under the output root
    pub folder_name: String,
    pub use_generate_folder: bool,

    /// `IPosts`
    pub interface_name: String,
    /// `defaultPosts`
    pub default_const: String,
    /// `usePostsStore`
    pub store_hook: String,
    /// `PostsStore`, state interface of the UI store
    pub store_interface: String,
    /// `validatePosts`
    pub validate_fn: String,
    /// `postsApi`
    pub api_slice: String,
    /// `tagTypePosts`
    pub tag_type: String,
    /// Mongoose model registered under this name
    pub model_name: String,
    /// `postSchema`
    pub schema_const: String,
    pub endpoints: QueryEndpoints,
}

/// One query-client endpoint and the hook the client library derives from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// `getPosts`
    pub name: String,
    /// `useGetPostsQuery`
    pub hook: String,
}

/// Every endpoint of the generated query-client slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryEndpoints {
    pub list: Endpoint,
    pub get_by_id: Endpoint,
    pub add: Endpoint,
    pub update: Endpoint,
    pub delete: Endpoint,
    pub bulk_update: Endpoint,
    pub bulk_delete: Endpoint,
    pub summary: Endpoint,
}

impl QueryEndpoints {
    /// All endpoints in declaration order
    pub fn all(&self) -> [&Endpoint; 8] {
        [
            &self.list,
            &self.get_by_id,
            &self.add,
            &self.update,
            &self.delete,
            &self.bulk_update,
            &self.bulk_delete,
            &self.summary,
        ]
    }
}

/// The unit of generation: fields plus resolved naming. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    pub fields: Vec<FieldSpec>,
    pub naming: NamingConvention,
}

/// Output of one renderer, path relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Registry key of the renderer that produced this artifact
    pub key: String,
    pub relative_path: PathBuf,
    pub content: String,
}

/// Non-fatal condition observed during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GenerationWarning {
    /// Field type tag not in the classifier table; rendered as a plain string
    UnknownFieldType { field: String, type_tag: String },
    /// A supplied naming value disagreed with the derived one and was replaced
    NamingCorrected {
        key: String,
        supplied: String,
        resolved: String,
    },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::UnknownFieldType { field, type_tag } => write!(
                f,
                "UnknownFieldTypeWarning: field '{}' has unknown type '{}', using string widget",
                field, type_tag
            ),
            GenerationWarning::NamingCorrected { key, supplied, resolved } => write!(
                f,
                "naming field '{}' was '{}', resolved to '{}'",
                key, supplied, resolved
            ),
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub folder_name: String,
    pub root: String,
    pub files: Vec<PathBuf>,
    pub warnings: Vec<GenerationWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_spec_deserialize_minimal() {
        let field: FieldSpec = serde_json::from_str(r#"{"name":"title","type":"STRING"}"#).unwrap();
        assert_eq!(field.name, "title");
        assert_eq!(field.field_type, "STRING");
        assert!(field.options().is_empty());
        assert!(!field.is_required());
    }

    #[test]
    fn test_field_spec_deserialize_with_options() {
        let field: FieldSpec = serde_json::from_str(
            r#"{"name":"status","type":"SELECT","options":["draft","published"],"required":true}"#,
        )
        .unwrap();
        assert_eq!(field.options(), ["draft", "published"]);
        assert!(field.is_required());
    }

    #[test]
    fn test_warning_display() {
        let warning = GenerationWarning::UnknownFieldType {
            field: "mood".to_string(),
            type_tag: "unknown-x".to_string(),
        };
        assert!(warning.to_string().starts_with("UnknownFieldTypeWarning"));
    }
}
