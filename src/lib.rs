//! # template-generator: schema-driven CRUD slice generator
//!
//! Takes one JSON entity schema (a naming-convention block plus a list of
//! typed fields) and writes a complete feature slice into a Next.js project:
//! mongoose model, controller and route handlers, an RTK Query client slice,
//! a zustand UI store, the entity interface with defaults and validation, the
//! list page and every CRUD/bulk component.
//!
//! ## Example schema
//!
//! ```json
//! {
//!   "namingConvention": {
//!     "Users_1_000___": "Posts",
//!     "users_2_000___": "posts",
//!     "User_3_000___": "Post",
//!     "use_generate_folder": false
//!   },
//!   "fields": [
//!     { "name": "title", "type": "STRING", "required": true },
//!     { "name": "status", "type": "SELECT", "options": ["draft", "published"] }
//!   ]
//! }
//! ```
//!
//! writes `src/app/dashboard/posts/...`; with `use_generate_folder: true` the
//! slice goes to `src/app/generate/posts/...` instead.
//!
//! ```rust,no_run
//! use template_generator::{Generator, NamingKeys};
//!
//! let schema = std::fs::read_to_string("posts.json").unwrap();
//! let report = Generator::new(".", NamingKeys::default()).generate(&schema).unwrap();
//! println!("wrote {} files", report.files.len());
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod server;

pub use codegen::{
    generate_from_file, generate_from_json, GenerationReport, GenerationWarning, Generator, NamingKeys,
};
pub use config::GeneratorConfig;
pub use error::{GenerationError, Result};
