//! Generation context shared by every renderer.

use crate::codegen::destination::{resolve_root, OutputRoot};
use crate::codegen::field_types::{ClassifiedField, WidgetKind};
use crate::codegen::types::{EntitySchema, NamingConvention};
use serde_json::Value;
use std::path::PathBuf;

/// Everything a renderer may read.
///
/// Built once per run after the destination root is resolved and never
/// mutated afterwards; fields are private so renderers only get shared access.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    schema: EntitySchema,
    fields: Vec<ClassifiedField>,
    root: OutputRoot,
    raw_schema: Value,
}

impl GenerationContext {
    /// Build the context, resolving the output root from the schema's naming
    pub fn new(schema: EntitySchema, fields: Vec<ClassifiedField>, raw_schema: Value) -> Self {
        let root = resolve_root(&schema.naming);
        Self {
            schema,
            fields,
            root,
            raw_schema,
        }
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn naming(&self) -> &NamingConvention {
        &self.schema.naming
    }

    pub fn fields(&self) -> &[ClassifiedField] {
        &self.fields
    }

    pub fn root(&self) -> OutputRoot {
        self.root
    }

    /// Payload as submitted, persisted as `slice-schema.json`
    pub fn raw_schema(&self) -> &Value {
        &self.raw_schema
    }

    /// `src/app/<root>/<folder>`
    pub fn feature_dir(&self) -> PathBuf {
        self.root.feature_dir(&self.schema.naming.folder_name)
    }

    /// `src/app/<root>/<folder>/all`
    pub fn all_dir(&self) -> PathBuf {
        self.feature_dir().join("all")
    }

    /// `src/app/<root>/<folder>/all/components`
    pub fn components_dir(&self) -> PathBuf {
        self.all_dir().join("components")
    }

    /// Base URL the query-client slice talks to: `/<root>/<folder>/api/v1`
    pub fn api_base_url(&self) -> String {
        format!("/{}/{}/api/v1", self.root.as_str(), self.schema.naming.folder_name)
    }

    /// Browser route of the list page: `/<root>/<folder>/all`
    pub fn page_route(&self) -> String {
        format!("/{}/{}/all", self.root.as_str(), self.schema.naming.folder_name)
    }

    /// Fields matched by the free-text search of the list endpoint
    pub fn searchable_fields(&self) -> impl Iterator<Item = &ClassifiedField> {
        self.fields.iter().filter(|f| f.widget().is_searchable())
    }

    /// Whether any field is edited with `widget`
    pub fn uses_widget(&self, widget: WidgetKind) -> bool {
        self.fields.iter().any(|f| f.widget() == widget)
    }

    /// Dedicated widget components needed by the schema, in table order, deduplicated
    pub fn widget_components(&self) -> Vec<(WidgetKind, &'static str)> {
        WidgetKind::ALL
            .iter()
            .filter(|w| self.uses_widget(**w))
            .filter_map(|w| w.widget_component().map(|c| (*w, c)))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::GenerationContext;
    use crate::codegen::field_types::classify_fields;
    use crate::codegen::naming::{resolve_naming, NamingKeys};
    use crate::codegen::schema_loader::parse_schema;
    use crate::codegen::types::EntitySchema;

    /// Posts schema touching every widget family
    pub(crate) fn posts_json(use_generate_folder: bool) -> String {
        serde_json::json!({
            "namingConvention": {
                "Users_1_000___": "Posts",
                "users_2_000___": "posts",
                "User_3_000___": "Post",
                "use_generate_folder": use_generate_folder
            },
            "fields": [
                {"name": "title", "type": "STRING", "required": true},
                {"name": "email", "type": "EMAIL"},
                {"name": "views", "type": "INTNUMBER"},
                {"name": "publishedAt", "type": "DATE"},
                {"name": "status", "type": "SELECT", "options": ["draft", "published"]},
                {"name": "tags", "type": "STRINGARRAY"},
                {"name": "body", "type": "RICHTEXT"},
                {"name": "summary", "type": "TEXTAREA"},
                {"name": "featured", "type": "BOOLEAN"}
            ]
        })
        .to_string()
    }

    pub(crate) fn context_from_json(json: &str) -> GenerationContext {
        let loaded = parse_schema(json).unwrap();
        let (naming, _) = resolve_naming(&loaded.naming_block, &NamingKeys::default()).unwrap();
        let (fields, _) = classify_fields(&loaded.fields);
        let schema = EntitySchema {
            fields: loaded.fields,
            naming,
        };
        GenerationContext::new(schema, fields, loaded.raw)
    }

    pub(crate) fn posts_context() -> GenerationContext {
        context_from_json(&posts_json(false))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_root_resolved_from_flag() {
        assert_eq!(posts_context().root(), OutputRoot::Dashboard);
        assert_eq!(context_from_json(&posts_json(true)).root(), OutputRoot::Generate);
    }

    #[test]
    fn test_paths() {
        let ctx = posts_context();
        assert_eq!(ctx.all_dir(), PathBuf::from("src/app/dashboard/posts/all"));
        assert_eq!(ctx.api_base_url(), "/dashboard/posts/api/v1");
        assert_eq!(ctx.page_route(), "/dashboard/posts/all");
    }

    #[test]
    fn test_widget_components() {
        let ctx = posts_context();
        let names: Vec<_> = ctx.widget_components().into_iter().map(|(_, c)| c).collect();
        assert_eq!(names, ["DateField", "RichTextField", "SelectField", "StringArrayField"]);
    }

    #[test]
    fn test_searchable_fields() {
        let ctx = posts_context();
        let names: Vec<_> = ctx.searchable_fields().map(|f| f.name()).collect();
        assert_eq!(names, ["title", "email", "status", "summary"]);
    }
}
