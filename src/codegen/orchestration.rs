//! High-level orchestration API for slice generation.
//!
//! One run walks `Received -> Parsed -> NamingResolved -> Classified ->
//! RootResolved -> Rendering(key)... -> Persisted -> Completed`. Any error moves
//! the run to `Failed` and aborts. Every artifact is rendered and validated in
//! memory before the first write, so failures before `Persisted` leave the
//! project untouched.

use crate::codegen::context::GenerationContext;
use crate::codegen::field_types::classify_fields;
use crate::codegen::fs_utils;
use crate::codegen::naming::{resolve_naming, NamingKeys};
use crate::codegen::renderers;
use crate::codegen::schema_loader::{self, LoadedSchema};
use crate::codegen::types::{EntitySchema, GeneratedArtifact, GenerationReport, GenerationWarning};
use crate::config::GeneratorConfig;
use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Step of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState {
    Received,
    Parsed,
    NamingResolved,
    Classified,
    RootResolved,
    Rendering(&'static str),
    Persisted,
    Completed,
    Failed,
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationState::Rendering(key) => write!(f, "Rendering({})", key),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Tracks the current state of one run and logs each transition
struct Run {
    state: GenerationState,
}

impl Run {
    fn new() -> Self {
        tracing::debug!(state = %GenerationState::Received, "generation state");
        Self {
            state: GenerationState::Received,
        }
    }

    fn advance(&mut self, next: GenerationState) {
        tracing::debug!(from = %self.state, to = %next, "generation state");
        self.state = next;
    }

    /// Record the outcome of a step, moving to `Failed` on error
    fn step<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            tracing::error!(state = %self.state, kind = e.kind(), error = %e, "generation failed");
            self.state = GenerationState::Failed;
        }
        result
    }
}

/// Everything a run would write, rendered and validated but not persisted
#[derive(Debug)]
pub struct GenerationPlan {
    pub context: GenerationContext,
    pub artifacts: Vec<GeneratedArtifact>,
    pub warnings: Vec<GenerationWarning>,
}

impl GenerationPlan {
    /// Relative paths in write order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.artifacts.iter().map(|a| a.relative_path.clone()).collect()
    }

    fn into_report(self, files: Vec<PathBuf>) -> GenerationReport {
        GenerationReport {
            folder_name: self.context.naming().folder_name.clone(),
            root: self.context.root().as_str().to_string(),
            files,
            warnings: self.warnings,
        }
    }
}

/// Runs generations against one project directory
#[derive(Debug, Clone)]
pub struct Generator {
    project_root: PathBuf,
    naming_keys: NamingKeys,
}

impl Generator {
    pub fn new(project_root: impl Into<PathBuf>, naming_keys: NamingKeys) -> Self {
        Self {
            project_root: project_root.into(),
            naming_keys,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.project_root.clone(), config.naming_keys.clone())
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Parse, resolve and classify a schema into a context. Writes nothing.
    pub fn prepare(&self, schema_json: &str) -> Result<(GenerationContext, Vec<GenerationWarning>)> {
        let mut run = Run::new();
        self.prepare_in(&mut run, schema_json)
    }

    /// Prepare and render every artifact into memory. Writes nothing.
    pub fn plan(&self, schema_json: &str) -> Result<GenerationPlan> {
        let mut run = Run::new();
        self.plan_in(&mut run, schema_json)
    }

    /// Full run: plan, then write the batch under the project root
    pub fn generate(&self, schema_json: &str) -> Result<GenerationReport> {
        let span = tracing::info_span!(
            "generation",
            request_id = %Uuid::new_v4(),
            folder = tracing::field::Empty
        );
        let _guard = span.enter();

        let mut run = Run::new();
        let plan = self.plan_in(&mut run, schema_json)?;

        let written = run.step(fs_utils::write_artifacts(&self.project_root, &plan.artifacts))?;
        run.advance(GenerationState::Persisted);

        let report = plan.into_report(written);
        run.advance(GenerationState::Completed);
        tracing::info!(
            root = %report.root,
            files = report.files.len(),
            warnings = report.warnings.len(),
            "generated {} slice",
            report.folder_name
        );
        Ok(report)
    }

    fn prepare_in(&self, run: &mut Run, schema_json: &str) -> Result<(GenerationContext, Vec<GenerationWarning>)> {
        let LoadedSchema {
            fields,
            naming_block,
            raw,
        } = run.step(schema_loader::parse_schema(schema_json))?;
        run.advance(GenerationState::Parsed);

        let (naming, mut warnings) = run.step(resolve_naming(&naming_block, &self.naming_keys))?;
        tracing::Span::current().record("folder", naming.folder_name.as_str());
        run.advance(GenerationState::NamingResolved);

        let (classified, field_warnings) = classify_fields(&fields);
        warnings.extend(field_warnings);
        run.advance(GenerationState::Classified);

        let context = GenerationContext::new(EntitySchema { fields, naming }, classified, raw);
        run.advance(GenerationState::RootResolved);

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        Ok((context, warnings))
    }

    fn plan_in(&self, run: &mut Run, schema_json: &str) -> Result<GenerationPlan> {
        let (context, warnings) = self.prepare_in(run, schema_json)?;

        let rendered = renderers::render_all(&context, |key| run.advance(GenerationState::Rendering(key)));
        let artifacts = run.step(rendered)?;
        run.step(renderers::validate_batch(&context, &artifacts))?;

        Ok(GenerationPlan {
            context,
            artifacts,
            warnings,
        })
    }
}

/// Generate one slice from schema JSON with the given configuration
pub fn generate_from_json(schema_json: &str, config: &GeneratorConfig) -> Result<GenerationReport> {
    Generator::from_config(config).generate(schema_json)
}

/// Generate one slice from a schema file
pub fn generate_from_file<P: AsRef<Path>>(schema_path: P, config: &GeneratorConfig) -> Result<GenerationReport> {
    let json = schema_loader::read_schema_file(schema_path)?;
    generate_from_json(&json, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::context::test_support::posts_json;
    use crate::error::GenerationError;
    use tempfile::TempDir;

    fn generator(dir: &TempDir) -> Generator {
        Generator::new(dir.path(), NamingKeys::default())
    }

    #[test]
    fn test_generate_writes_every_planned_file() {
        let dir = TempDir::new().unwrap();
        let gen = generator(&dir);
        let planned = gen.plan(&posts_json(false)).unwrap().paths();
        let report = gen.generate(&posts_json(false)).unwrap();

        assert_eq!(report.files, planned);
        assert_eq!(report.root, "dashboard");
        assert_eq!(report.folder_name, "posts");
        for path in &report.files {
            assert!(dir.path().join(path).is_file(), "missing {}", path.display());
        }
    }

    #[test]
    fn test_slice_schema_is_raw_payload() {
        let dir = TempDir::new().unwrap();
        generator(&dir).generate(&posts_json(false)).unwrap();

        let saved = std::fs::read_to_string(
            dir.path().join("src/app/dashboard/posts/slice-schema/slice-schema.json"),
        )
        .unwrap();
        let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
        let original: serde_json::Value = serde_json::from_str(&posts_json(false)).unwrap();
        assert_eq!(saved, original);
    }

    #[test]
    fn test_plan_writes_nothing() {
        let dir = TempDir::new().unwrap();
        generator(&dir).plan(&posts_json(false)).unwrap();
        assert!(!dir.path().join("src").exists());
    }

    #[test]
    fn test_parse_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = generator(&dir).generate("{not json").unwrap_err();
        assert!(matches!(err, GenerationError::SchemaParse(_)));
        assert!(!dir.path().join("src").exists());
    }

    #[test]
    fn test_prepare_collects_warnings() {
        let dir = TempDir::new().unwrap();
        let json = r#"{"namingConvention": {"Users_1_000___": "Notes", "users_2_000___": "Notes", "User_3_000___": "Note"},
                       "fields": [{"name": "mood", "type": "vibes"}]}"#;
        let (ctx, warnings) = generator(&dir).prepare(json).unwrap();

        assert_eq!(ctx.naming().plural_lower, "notes");
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(GenerationState::Rendering("page").to_string(), "Rendering(page)");
        assert_eq!(GenerationState::Failed.to_string(), "Failed");
    }
}
