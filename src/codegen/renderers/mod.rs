//! Renderer registry.
//!
//! Every generated file is produced by a pure function registered under a
//! stable key. The registry maps key -> target path + render function; the
//! orchestrator renders the whole table into memory before anything is written.
//!
//! | key | file under `src/app/<root>/<folder>/` |
//! |-----|------|
//! | `sliceSchema` | `slice-schema/slice-schema.json` |
//! | `model`, `controller`, `route` | `api/v1/*.ts` |
//! | `querySlice` | `all/redux/rtk-api.ts` |
//! | `uiStore`, `entityData` | `all/store/store.ts`, `all/store/data/data.ts` |
//! | `page` | `all/page.tsx` |
//! | `component*` | `all/components/*.tsx` |
//! | `otherFieldTypeWidgets` | `all/components/others-field-type/*.tsx` |

mod api;
mod bulk;
mod client;
mod components;
pub mod form;
mod widgets;

use crate::codegen::context::GenerationContext;
use crate::codegen::field_types::WidgetKind;
use crate::codegen::types::GeneratedArtifact;
use crate::error::{GenerationError, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use std::path::{Component, PathBuf};

/// Renders one file's source text
pub type RenderFn = fn(&GenerationContext) -> std::result::Result<String, fmt::Error>;
/// Target path of a single-file renderer, relative to the project root
pub type PathFn = fn(&GenerationContext) -> PathBuf;
/// Renders the file of one dedicated widget component
pub type WidgetRenderFn = fn(&GenerationContext, WidgetKind, &str) -> std::result::Result<String, fmt::Error>;

/// What a registry entry produces
#[derive(Clone, Copy)]
pub enum RenderTarget {
    /// Exactly one file
    Single { path: PathFn, render: RenderFn },
    /// One file per widget component the schema uses, inside `dir`
    PerWidget { dir: PathFn, render: WidgetRenderFn },
}

/// Ordered table of every renderer
pub fn registry() -> IndexMap<&'static str, RenderTarget> {
    let mut table: IndexMap<&'static str, RenderTarget> = IndexMap::new();

    let mut single = |key: &'static str, path: PathFn, render: RenderFn| {
        table.insert(key, RenderTarget::Single { path, render });
    };

    single("sliceSchema", |c| c.feature_dir().join("slice-schema/slice-schema.json"), client::render_slice_schema);
    single("model", |c| c.feature_dir().join("api/v1/model.ts"), api::render_model);
    single("controller", |c| c.feature_dir().join("api/v1/controller.ts"), api::render_controller);
    single("route", |c| c.feature_dir().join("api/v1/route.ts"), api::render_route);
    single("querySlice", |c| c.all_dir().join("redux/rtk-api.ts"), client::render_query_slice);
    single("uiStore", |c| c.all_dir().join("store/store.ts"), client::render_ui_store);
    single("entityData", |c| c.all_dir().join("store/data/data.ts"), client::render_entity_data);
    single("page", |c| c.all_dir().join("page.tsx"), client::render_page);
    single("componentAdd", |c| c.components_dir().join("Add.tsx"), components::render_add);
    single("componentEdit", |c| c.components_dir().join("Edit.tsx"), components::render_edit);
    single("componentView", |c| c.components_dir().join("View.tsx"), components::render_view);
    single("componentDelete", |c| c.components_dir().join("Delete.tsx"), components::render_delete);
    single("componentTable", |c| c.components_dir().join("TableView.tsx"), components::render_table);
    single("componentBulkEdit", |c| c.components_dir().join("BulkEdit.tsx"), bulk::render_bulk_edit);
    single("componentBulkUpdate", |c| c.components_dir().join("BulkUpdate.tsx"), bulk::render_bulk_update);
    single(
        "componentBulkDynamicUpdate",
        |c| c.components_dir().join("BulkDynamicUpdate.tsx"),
        bulk::render_bulk_dynamic_update,
    );
    single("componentBulkDelete", |c| c.components_dir().join("BulkDelete.tsx"), bulk::render_bulk_delete);
    single("componentFilter", |c| c.components_dir().join("FilterDialog.tsx"), components::render_filter);
    single("componentSummary", |c| c.components_dir().join("Summary.tsx"), components::render_summary);
    single("componentExport", |c| c.components_dir().join("Export.tsx"), components::render_export);

    table.insert(
        "otherFieldTypeWidgets",
        RenderTarget::PerWidget {
            dir: |c| c.components_dir().join("others-field-type"),
            render: widgets::render_widget,
        },
    );

    table
}

fn render_target(key: &str, target: RenderTarget, ctx: &GenerationContext) -> Result<Vec<GeneratedArtifact>> {
    let render_error = |e: fmt::Error| GenerationError::Render {
        key: key.to_string(),
        reason: e.to_string(),
    };

    match target {
        RenderTarget::Single { path, render } => Ok(vec![GeneratedArtifact {
            key: key.to_string(),
            relative_path: path(ctx),
            content: render(ctx).map_err(render_error)?,
        }]),
        RenderTarget::PerWidget { dir, render } => {
            let dir = dir(ctx);
            ctx.widget_components()
                .into_iter()
                .map(|(widget, component)| {
                    Ok(GeneratedArtifact {
                        key: key.to_string(),
                        relative_path: dir.join(format!("{}.tsx", component)),
                        content: render(ctx, widget, component).map_err(render_error)?,
                    })
                })
                .collect()
        }
    }
}

/// Render every registered artifact into memory, in registry order.
///
/// `on_entry` sees each key before its renderer runs.
pub fn render_all<F>(ctx: &GenerationContext, mut on_entry: F) -> Result<Vec<GeneratedArtifact>>
where
    F: FnMut(&'static str),
{
    let mut artifacts = Vec::new();
    for (key, target) in registry() {
        on_entry(key);
        tracing::trace!(renderer = key, "rendering");
        artifacts.extend(render_target(key, target, ctx)?);
    }
    Ok(artifacts)
}

/// Check a rendered batch before anything touches the filesystem.
///
/// Every path must be unique, relative, free of `..`, and inside the
/// context's feature directory; every file must have content.
pub fn validate_batch(ctx: &GenerationContext, artifacts: &[GeneratedArtifact]) -> Result<()> {
    let feature_dir = ctx.feature_dir();
    let mut seen = HashSet::new();

    for artifact in artifacts {
        let path = &artifact.relative_path;
        let invalid = |reason: String| GenerationError::Render {
            key: artifact.key.clone(),
            reason,
        };

        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(invalid(format!("path {} is not a plain relative path", path.display())));
        }
        if !path.starts_with(&feature_dir) {
            return Err(invalid(format!(
                "path {} escapes {}",
                path.display(),
                feature_dir.display()
            )));
        }
        if !seen.insert(path.clone()) {
            return Err(invalid(format!("path {} rendered twice", path.display())));
        }
        if artifact.content.trim().is_empty() {
            return Err(invalid(format!("{} rendered empty", path.display())));
        }
    }

    Ok(())
}
