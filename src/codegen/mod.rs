//! Slice code generation.
//!
//! A schema JSON payload goes through the loader, the naming resolver and the
//! field classifier into one immutable [`GenerationContext`]; the renderer
//! registry turns that context into a batch of [`GeneratedArtifact`]s, which
//! the orchestrator validates and writes.

pub mod context;
pub mod destination;
pub mod field_types;
pub mod fs_utils;
pub mod naming;
pub mod orchestration;
pub mod renderers;
pub mod schema_loader;
pub mod types;
pub mod utils;

pub use context::GenerationContext;
pub use destination::OutputRoot;
pub use field_types::{classify, ClassifiedField, FieldClass, SemanticType, ValidatorKind, WidgetKind};
pub use naming::{resolve_naming, NamingKeys};
pub use orchestration::{generate_from_file, generate_from_json, GenerationPlan, GenerationState, Generator};
pub use schema_loader::{extract_request_data, parse_schema, read_schema_file, LoadedSchema};
pub use types::{
    EntitySchema, FieldSpec, GeneratedArtifact, GenerationReport, GenerationWarning, NamingConvention,
};
